// Reflection Types
//
// All data structures describing reflected classes: classes, constants,
// properties, methods, parameters and type hints. Every type is serde-enabled
// so a host runtime can hand its metadata over as JSON.

use super::value::Value;
use once_cell::sync::Lazy;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;

/// Type names the runtime treats as builtin (rendered without a leading `\`)
static BUILTIN_TYPES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "string", "int", "float", "bool", "array", "callable", "iterable", "object", "mixed",
        "void", "null", "never", "false", "true",
    ]
    .into_iter()
    .collect()
});

/// Returns true when `name` is a builtin type name (case-insensitive)
pub fn is_builtin_type(name: &str) -> bool {
    BUILTIN_TYPES.contains(name.to_ascii_lowercase().as_str())
}

/// Kind of class-like declaration
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ClassKind {
    #[default]
    Class,
    Interface,
    Trait,
}

/// Member visibility
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    #[default]
    Public,
    Protected,
    Private,
}

impl std::fmt::Display for Visibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Visibility::Public => write!(f, "public"),
            Visibility::Protected => write!(f, "protected"),
            Visibility::Private => write!(f, "private"),
        }
    }
}

/// A declared type: `int`, `?string`, `\App\Model\User`, `self`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct TypeHint {
    /// Type name without nullability marker or leading namespace separator
    #[serde(deserialize_with = "unqualified_name")]
    pub name: String,
    /// Whether `null` is accepted (`?T` or a `null` default)
    #[serde(default)]
    pub allows_null: bool,
}

impl TypeHint {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into().trim_start_matches('\\').to_string(),
            allows_null: false,
        }
    }

    pub fn nullable(name: impl Into<String>) -> Self {
        Self {
            allows_null: true,
            ..Self::new(name)
        }
    }

    pub fn is_builtin(&self) -> bool {
        is_builtin_type(&self.name)
    }

    /// `self`, `static` and `parent` refer to classes relative to the declaring class
    pub fn is_relative(&self) -> bool {
        matches!(
            self.name.to_ascii_lowercase().as_str(),
            "self" | "static" | "parent"
        )
    }
}

fn unqualified_name<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let name = String::deserialize(deserializer)?;
    Ok(name.trim_start_matches('\\').to_string())
}

/// A class constant with its evaluated value
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConstantInfo {
    pub name: String,
    pub value: Value,
}

/// A present field is always `Some`, so an explicit `null` default survives
fn present_value<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Value>, D::Error> {
    Value::deserialize(deserializer).map(Some)
}

/// A member variable descriptor
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PropertyInfo {
    pub name: String,
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default)]
    pub is_static: bool,
    /// Filled in by the registry when left empty
    #[serde(default)]
    pub declaring_class: String,
}

impl PropertyInfo {
    pub fn new(name: impl Into<String>, visibility: Visibility) -> Self {
        Self {
            name: name.into(),
            visibility,
            is_static: false,
            declaring_class: String::new(),
        }
    }

    pub fn make_static(mut self) -> Self {
        self.is_static = true;
        self
    }

    pub fn is_public(&self) -> bool {
        self.visibility == Visibility::Public
    }
}

/// A single parameter of a callable
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParameterInfo {
    /// Parameter name without `$`; may be empty or `...` for some builtins
    pub name: String,
    #[serde(default)]
    pub type_hint: Option<TypeHint>,
    /// Default value, when one is available to reflection
    #[serde(default, deserialize_with = "present_value")]
    pub default: Option<Value>,
    /// Optional without a reflectable default (internal functions)
    #[serde(default)]
    pub is_optional: bool,
    #[serde(default)]
    pub is_variadic: bool,
    #[serde(default)]
    pub by_reference: bool,
}

impl ParameterInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_hint: None,
            default: None,
            is_optional: false,
            is_variadic: false,
            by_reference: false,
        }
    }

    pub fn typed(mut self, type_hint: TypeHint) -> Self {
        self.type_hint = Some(type_hint);
        self
    }

    /// Sets a default value; a `null` default makes a typed parameter nullable
    pub fn with_default(mut self, value: Value) -> Self {
        if value == Value::Null {
            if let Some(hint) = self.type_hint.as_mut() {
                hint.allows_null = true;
            }
        }
        self.default = Some(value);
        self.is_optional = true;
        self
    }

    pub fn optional(mut self) -> Self {
        self.is_optional = true;
        self
    }

    pub fn variadic(mut self) -> Self {
        self.is_variadic = true;
        self.is_optional = true;
        self
    }

    pub fn by_reference(mut self) -> Self {
        self.by_reference = true;
        self
    }

    pub fn allows_null(&self) -> bool {
        self.type_hint.as_ref().is_some_and(|t| t.allows_null)
    }
}

/// A method descriptor
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MethodInfo {
    pub name: String,
    /// Filled in by the registry when left empty
    #[serde(default)]
    pub declaring_class: String,
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default)]
    pub is_abstract: bool,
    #[serde(default)]
    pub is_static: bool,
    #[serde(default)]
    pub parameters: Vec<ParameterInfo>,
    #[serde(default)]
    pub return_type: Option<TypeHint>,
}

impl MethodInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declaring_class: String::new(),
            visibility: Visibility::Public,
            is_abstract: false,
            is_static: false,
            parameters: Vec::new(),
            return_type: None,
        }
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn make_abstract(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    pub fn make_static(mut self) -> Self {
        self.is_static = true;
        self
    }

    pub fn param(mut self, parameter: ParameterInfo) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn returns(mut self, return_type: TypeHint) -> Self {
        self.return_type = Some(return_type);
        self
    }

    pub fn declared_in(mut self, class: impl Into<String>) -> Self {
        self.declaring_class = class.into();
        self
    }
}

/// A reflected class, interface or trait with its own declarations
///
/// Inherited members are not stored here; the `Reflector` resolves them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClassInfo {
    /// Fully qualified name without leading separator (`App\Model\User`)
    pub name: String,
    #[serde(default)]
    pub kind: ClassKind,
    #[serde(default)]
    pub is_abstract: bool,
    /// Parent class for classes; interfaces use `interfaces` for `extends`
    #[serde(default)]
    pub parent: Option<String>,
    /// Directly implemented (or, for interfaces, extended) interfaces
    #[serde(default)]
    pub interfaces: Vec<String>,
    #[serde(default)]
    pub constants: Vec<ConstantInfo>,
    #[serde(default)]
    pub properties: Vec<PropertyInfo>,
    #[serde(default)]
    pub methods: Vec<MethodInfo>,
}

impl ClassInfo {
    fn with_kind(name: impl Into<String>, kind: ClassKind) -> Self {
        Self {
            name: name.into().trim_start_matches('\\').to_string(),
            kind,
            is_abstract: false,
            parent: None,
            interfaces: Vec::new(),
            constants: Vec::new(),
            properties: Vec::new(),
            methods: Vec::new(),
        }
    }

    pub fn class(name: impl Into<String>) -> Self {
        Self::with_kind(name, ClassKind::Class)
    }

    pub fn interface(name: impl Into<String>) -> Self {
        Self::with_kind(name, ClassKind::Interface)
    }

    pub fn abstract_class(name: impl Into<String>) -> Self {
        Self {
            is_abstract: true,
            ..Self::with_kind(name, ClassKind::Class)
        }
    }

    pub fn extends(mut self, parent: impl Into<String>) -> Self {
        let parent = parent.into().trim_start_matches('\\').to_string();
        match self.kind {
            // interfaces extend interfaces
            ClassKind::Interface => self.interfaces.push(parent),
            _ => self.parent = Some(parent),
        }
        self
    }

    pub fn implements(mut self, interface: impl Into<String>) -> Self {
        self.interfaces
            .push(interface.into().trim_start_matches('\\').to_string());
        self
    }

    pub fn constant(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.constants.push(ConstantInfo {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    pub fn property(mut self, property: PropertyInfo) -> Self {
        self.properties.push(property);
        self
    }

    pub fn method(mut self, method: MethodInfo) -> Self {
        self.methods.push(method);
        self
    }

    pub fn is_interface(&self) -> bool {
        self.kind == ClassKind::Interface
    }

    /// Stamp `declaring_class` onto members that do not carry one
    pub(crate) fn fill_declaring_class(&mut self) {
        for property in &mut self.properties {
            if property.declaring_class.is_empty() {
                property.declaring_class = self.name.clone();
            }
        }
        for method in &mut self.methods {
            if method.declaring_class.is_empty() {
                method.declaring_class = self.name.clone();
            }
        }
    }
}

/// A live object handle: its runtime class plus property values
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Instance {
    pub class: String,
    #[serde(default)]
    pub properties: Vec<(String, Value)>,
}

impl Instance {
    pub fn of(class: impl Into<String>) -> Self {
        Self {
            class: class.into().trim_start_matches('\\').to_string(),
            properties: Vec::new(),
        }
    }

    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.push((name.into(), value.into()));
        self
    }

    pub fn class_name(&self) -> &str {
        &self.class
    }
}

/// Either a live instance or a class name, resolved once to a class name
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TypeReference<'a> {
    Class(&'a str),
    Instance(&'a Instance),
}

impl<'a> TypeReference<'a> {
    pub fn class_name(&self) -> &'a str {
        match *self {
            TypeReference::Class(name) => name,
            TypeReference::Instance(instance) => instance.class_name(),
        }
    }
}

impl<'a> From<&'a str> for TypeReference<'a> {
    fn from(name: &'a str) -> Self {
        TypeReference::Class(name)
    }
}

impl<'a> From<&'a String> for TypeReference<'a> {
    fn from(name: &'a String) -> Self {
        TypeReference::Class(name.as_str())
    }
}

impl<'a> From<&'a Instance> for TypeReference<'a> {
    fn from(instance: &'a Instance) -> Self {
        TypeReference::Instance(instance)
    }
}

impl<'a> From<&'a ClassInfo> for TypeReference<'a> {
    fn from(class: &'a ClassInfo) -> Self {
        TypeReference::Class(class.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_types() {
        assert!(is_builtin_type("int"));
        assert!(is_builtin_type("String"));
        assert!(is_builtin_type("callable"));
        assert!(!is_builtin_type("self"));
        assert!(!is_builtin_type("DateTime"));
    }

    #[test]
    fn test_type_hint_strips_leading_separator() {
        let hint = TypeHint::nullable("\\App\\Model\\User");
        assert_eq!(hint.name, "App\\Model\\User");
        assert!(hint.allows_null);
        assert!(!hint.is_builtin());
    }

    #[test]
    fn test_null_default_makes_typed_parameter_nullable() {
        let param = ParameterInfo::new("y")
            .typed(TypeHint::new("string"))
            .with_default(Value::Null);
        assert!(param.allows_null());
        assert!(param.is_optional);

        let untyped = ParameterInfo::new("z").with_default(Value::Null);
        assert!(!untyped.allows_null(), "untyped parameters carry no nullability");
    }

    #[test]
    fn test_json_null_default_is_kept() {
        let param: ParameterInfo =
            serde_json::from_str(r#"{"name": "y", "default": null, "is_optional": true}"#).unwrap();
        assert_eq!(param.default, Some(Value::Null));

        let param: ParameterInfo = serde_json::from_str(r#"{"name": "x"}"#).unwrap();
        assert_eq!(param.default, None);
    }

    #[test]
    fn test_interface_extends_goes_to_interfaces() {
        let iface = ClassInfo::interface("Countable").extends("Traversable");
        assert_eq!(iface.parent, None);
        assert_eq!(iface.interfaces, vec!["Traversable".to_string()]);

        let class = ClassInfo::class("Child").extends("\\Parent");
        assert_eq!(class.parent.as_deref(), Some("Parent"));
    }

    #[test]
    fn test_fill_declaring_class() {
        let mut class = ClassInfo::class("App\\Thing")
            .property(PropertyInfo::new("id", Visibility::Public))
            .method(MethodInfo::new("run"))
            .method(MethodInfo::new("other").declared_in("App\\Base"));
        class.fill_declaring_class();

        assert_eq!(class.properties[0].declaring_class, "App\\Thing");
        assert_eq!(class.methods[0].declaring_class, "App\\Thing");
        assert_eq!(class.methods[1].declaring_class, "App\\Base");
    }

    #[test]
    fn test_type_reference_resolves_class_name() {
        let instance = Instance::of("\\App\\Standard");
        assert_eq!(TypeReference::from(&instance).class_name(), "App\\Standard");
        assert_eq!(TypeReference::from("App\\Other").class_name(), "App\\Other");
    }
}
