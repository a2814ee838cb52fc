// Runtime values for constants and parameter defaults
//
// `Value` mirrors the scalar and array values a class constant or default
// parameter can hold. `var_export` renders a value as a parseable literal,
// `to_array_key` applies the runtime's array-key coercion rules.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Key of an ordered runtime array
#[derive(Debug, Clone, Serialize, PartialEq, Eq, Hash)]
#[serde(untagged)]
pub enum ArrayKey {
    Int(i64),
    String(String),
}

impl ArrayKey {
    /// Builds a string key, turning canonical decimal integers into int keys
    pub fn from_string(s: &str) -> Self {
        match parse_canonical_int(s) {
            Some(i) => ArrayKey::Int(i),
            None => ArrayKey::String(s.to_string()),
        }
    }

    fn export(&self) -> String {
        match self {
            ArrayKey::Int(i) => export_int(*i),
            ArrayKey::String(s) => export_string(s),
        }
    }
}

// numeric string keys are stored as int keys, as the runtime does
impl<'de> Deserialize<'de> for ArrayKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawKey {
            Int(i64),
            String(String),
        }

        Ok(match RawKey::deserialize(deserializer)? {
            RawKey::Int(i) => ArrayKey::Int(i),
            RawKey::String(s) => ArrayKey::from_string(&s),
        })
    }
}

impl fmt::Display for ArrayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArrayKey::Int(i) => write!(f, "{}", i),
            ArrayKey::String(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for ArrayKey {
    fn from(i: i64) -> Self {
        ArrayKey::Int(i)
    }
}

impl From<&str> for ArrayKey {
    fn from(s: &str) -> Self {
        ArrayKey::from_string(s)
    }
}

/// A constant or default value
///
/// Untagged serde representation: JSON `null`, booleans, integers, floats and
/// strings map directly; arrays are lists of `[key, value]` pairs so key order
/// and int/string keys survive the round trip.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Array(Vec<(ArrayKey, Value)>),
}

impl Value {
    /// Builds a list-style array with keys 0..n
    pub fn list<I, V>(items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Value::Array(
            items
                .into_iter()
                .enumerate()
                .map(|(i, v)| (ArrayKey::Int(i as i64), v.into()))
                .collect(),
        )
    }

    /// Key this value becomes when used as an array key, `None` for arrays
    pub fn to_array_key(&self) -> Option<ArrayKey> {
        match self {
            Value::Null => Some(ArrayKey::String(String::new())),
            Value::Bool(b) => Some(ArrayKey::Int(i64::from(*b))),
            Value::Int(i) => Some(ArrayKey::Int(*i)),
            Value::Float(f) => Some(ArrayKey::Int(float_to_key(*f))),
            Value::String(s) => Some(ArrayKey::from_string(s)),
            Value::Array(_) => None,
        }
    }

    /// Parseable literal representation, as `var_export($value, true)` prints it
    pub fn var_export(&self) -> String {
        let mut out = String::new();
        self.export_into(&mut out, 1);
        out
    }

    fn export_into(&self, out: &mut String, level: usize) {
        match self {
            Value::Null => out.push_str("NULL"),
            Value::Bool(true) => out.push_str("true"),
            Value::Bool(false) => out.push_str("false"),
            Value::Int(i) => out.push_str(&export_int(*i)),
            Value::Float(f) => out.push_str(&export_float(*f)),
            Value::String(s) => out.push_str(&export_string(s)),
            Value::Array(entries) => {
                if level > 1 {
                    out.push('\n');
                    out.push_str(&" ".repeat(level - 1));
                }
                out.push_str("array (\n");
                for (key, value) in entries {
                    out.push_str(&" ".repeat(level + 1));
                    out.push_str(&key.export());
                    out.push_str(" => ");
                    value.export_into(out, level + 2);
                    out.push_str(",\n");
                }
                if level > 1 {
                    out.push_str(&" ".repeat(level - 1));
                }
                out.push(')');
            }
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl<V: Into<Value>> From<Option<V>> for Value {
    fn from(v: Option<V>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

/// Truncates toward zero; NaN, infinities and out-of-range values become 0
fn float_to_key(f: f64) -> i64 {
    // i64::MAX is not representable, 2^63 is the first value out of range
    if !f.is_finite() || f < i64::MIN as f64 || f >= 9_223_372_036_854_775_808.0 {
        return 0;
    }
    f.trunc() as i64
}

fn parse_canonical_int(s: &str) -> Option<i64> {
    let digits = s.strip_prefix('-').unwrap_or(s);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    // "01" and "-0" stay string keys
    if (digits.len() > 1 && digits.starts_with('0')) || s == "-0" {
        return None;
    }
    s.parse().ok()
}

fn export_int(i: i64) -> String {
    // the minimum cannot be written as a single literal
    if i == i64::MIN {
        format!("{}-1", i + 1)
    } else {
        i.to_string()
    }
}

fn export_float(f: f64) -> String {
    if f.is_nan() {
        return "NAN".to_string();
    }
    if f.is_infinite() {
        return if f > 0.0 { "INF" } else { "-INF" }.to_string();
    }

    let abs = f.abs();
    if abs != 0.0 && !(1e-4..1e15).contains(&abs) {
        // 1.5e-5 -> 1.5E-5, 1e15 -> 1.0E+15
        let formatted = format!("{:e}", f);
        let (mantissa, exponent) = formatted
            .split_once('e')
            .unwrap_or((formatted.as_str(), "0"));
        let mantissa = if mantissa.contains('.') {
            mantissa.to_string()
        } else {
            format!("{}.0", mantissa)
        };
        let exponent = match exponent.strip_prefix('-') {
            Some(digits) => format!("-{}", digits),
            None => format!("+{}", exponent),
        };
        return format!("{}E{}", mantissa, exponent);
    }

    let formatted = format!("{}", f);
    if formatted.contains('.') {
        formatted
    } else {
        format!("{}.0", formatted)
    }
}

fn export_string(s: &str) -> String {
    let escaped = s.replace('\\', "\\\\").replace('\'', "\\'");
    // NUL bytes cannot live inside single quotes
    let escaped = escaped.replace('\0', "' . \"\\0\" . '");
    format!("'{}'", escaped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_scalars() {
        assert_eq!(Value::Null.var_export(), "NULL");
        assert_eq!(Value::Bool(true).var_export(), "true");
        assert_eq!(Value::Bool(false).var_export(), "false");
        assert_eq!(Value::Int(-42).var_export(), "-42");
        assert_eq!(Value::Int(i64::MIN).var_export(), "-9223372036854775807-1");
    }

    #[test]
    fn test_export_floats() {
        assert_eq!(Value::Float(1.0).var_export(), "1.0");
        assert_eq!(Value::Float(0.5).var_export(), "0.5");
        assert_eq!(Value::Float(-2.25).var_export(), "-2.25");
        assert_eq!(Value::Float(1e15).var_export(), "1.0E+15");
        assert_eq!(Value::Float(1.5e-5).var_export(), "1.5E-5");
        assert_eq!(Value::Float(f64::INFINITY).var_export(), "INF");
        assert_eq!(Value::Float(f64::NAN).var_export(), "NAN");
    }

    #[test]
    fn test_export_strings_are_escaped() {
        assert_eq!(Value::from("plain").var_export(), "'plain'");
        assert_eq!(Value::from("it's").var_export(), "'it\\'s'");
        assert_eq!(Value::from("a\\b").var_export(), "'a\\\\b'");
    }

    #[test]
    fn test_export_nested_array() {
        let value = Value::Array(vec![
            (ArrayKey::from("a"), Value::list([1i64])),
            (ArrayKey::from("b"), Value::Int(2)),
        ]);
        let expected = "array (\n  'a' => \n  array (\n    0 => 1,\n  ),\n  'b' => 2,\n)";
        assert_eq!(value.var_export(), expected);
    }

    #[test]
    fn test_export_empty_array() {
        assert_eq!(Value::Array(vec![]).var_export(), "array (\n)");
    }

    #[test]
    fn test_array_key_coercion() {
        assert_eq!(Value::Null.to_array_key(), Some(ArrayKey::String(String::new())));
        assert_eq!(Value::Bool(true).to_array_key(), Some(ArrayKey::Int(1)));
        assert_eq!(Value::Float(2.9).to_array_key(), Some(ArrayKey::Int(2)));
        assert_eq!(Value::from("7").to_array_key(), Some(ArrayKey::Int(7)));
        assert_eq!(
            Value::from("07").to_array_key(),
            Some(ArrayKey::String("07".to_string()))
        );
        assert_eq!(Value::list([1i64]).to_array_key(), None);
    }

    #[test]
    fn test_non_finite_float_keys_become_zero() {
        assert_eq!(Value::Float(f64::INFINITY).to_array_key(), Some(ArrayKey::Int(0)));
        assert_eq!(Value::Float(f64::NEG_INFINITY).to_array_key(), Some(ArrayKey::Int(0)));
        assert_eq!(Value::Float(f64::NAN).to_array_key(), Some(ArrayKey::Int(0)));
        assert_eq!(Value::Float(1e19).to_array_key(), Some(ArrayKey::Int(0)));
        assert_eq!(Value::Float(-1e19).to_array_key(), Some(ArrayKey::Int(0)));
        assert_eq!(Value::Float(-3.7).to_array_key(), Some(ArrayKey::Int(-3)));
    }

    #[test]
    fn test_numeric_string_keys_deserialize_as_int() {
        let value: Value = serde_json::from_str(r#"[["7", "a"], ["07", "b"], ["-3", "c"]]"#).unwrap();
        assert_eq!(
            value,
            Value::Array(vec![
                (ArrayKey::Int(7), Value::from("a")),
                (ArrayKey::String("07".to_string()), Value::from("b")),
                (ArrayKey::Int(-3), Value::from("c")),
            ])
        );
        assert_eq!(value.var_export(), "array (\n  7 => 'a',\n  '07' => 'b',\n  -3 => 'c',\n)");
    }

    #[test]
    fn test_untagged_json_shape() {
        let value: Value = serde_json::from_str(r#"[[0, "x"], ["k", 1.5], [1, null]]"#).unwrap();
        assert_eq!(
            value,
            Value::Array(vec![
                (ArrayKey::Int(0), Value::from("x")),
                (ArrayKey::String("k".to_string()), Value::Float(1.5)),
                (ArrayKey::Int(1), Value::Null),
            ])
        );
        let int: Value = serde_json::from_str("3").unwrap();
        assert_eq!(int, Value::Int(3));
    }
}
