// Class utilities - Method signature rendering for stubs and mocks

use super::{Classes, ClassesError};
use crate::reflection::{MethodInfo, ParameterInfo, Reflector, TypeHint};
use tracing::warn;

impl<'r, R: Reflector + ?Sized> Classes<'r, R> {
    /// Parameter list of a method, as source text
    ///
    /// Declaration form (`for_call = false`) carries nullability, types,
    /// by-reference and variadic markers and default values:
    /// `int $x, ?string $y = NULL, ...$rest`. Call form keeps only the names
    /// and drops variadic parameters: `$x, $y`.
    ///
    /// Empty names and `...` (left by some builtin callables) become `$arg{index}`.
    pub fn method_parameters(
        &self,
        method: &MethodInfo,
        for_call: bool,
    ) -> Result<String, ClassesError> {
        let mut parameters = Vec::with_capacity(method.parameters.len());

        for (index, parameter) in method.parameters.iter().enumerate() {
            let mut name = if parameter.name.is_empty() || parameter.name == "..." {
                format!("$arg{}", index)
            } else {
                format!("${}", parameter.name)
            };

            if parameter.is_variadic {
                if for_call {
                    continue;
                }
                name = format!("...{}", name);
            }

            if for_call {
                parameters.push(name);
                continue;
            }

            let (nullable, type_declaration) = match &parameter.type_hint {
                Some(hint) => (
                    if accepts_null_marker(hint) { "?" } else { "" },
                    format!("{} ", self.render_parameter_type(method, hint)?),
                ),
                None => ("", String::new()),
            };
            let reference = if parameter.by_reference { "&" } else { "" };

            parameters.push(format!(
                "{}{}{}{}{}",
                nullable,
                type_declaration,
                reference,
                name,
                render_default(parameter)
            ));
        }

        Ok(parameters.join(", "))
    }

    /// A body-less method declaration for stub and interface generation
    ///
    /// ```text
    ///
    ///     abstract public static function find(int $id): ?\App\Model\User;
    /// ```
    pub fn generate_method_without_body(&self, method: &MethodInfo) -> Result<String, ClassesError> {
        let parameters = self.method_parameters(method, false)?;

        let is_abstract = if method.is_abstract { "abstract " } else { "" };
        let is_static = if method.is_static { " static" } else { "" };

        let mut definition = format!(
            "\n    {}{}{} function {}({})",
            is_abstract, method.visibility, is_static, method.name, parameters
        );

        if let Some(return_type) = &method.return_type {
            definition.push_str(": ");
            if accepts_null_marker(return_type) {
                definition.push('?');
            }
            if return_type.is_builtin() || return_type.is_relative() {
                definition.push_str(&return_type.name);
            } else {
                // unknown return classes are written as declared
                let name = self
                    .reflector
                    .class(&return_type.name)
                    .map_or(return_type.name.as_str(), |class| class.name.as_str());
                definition.push('\\');
                definition.push_str(name);
            }
        }

        definition.push(';');
        Ok(definition)
    }

    /// Builtins stay bare, classes become fully qualified, relative names resolve
    fn render_parameter_type(
        &self,
        method: &MethodInfo,
        hint: &TypeHint,
    ) -> Result<String, ClassesError> {
        if hint.is_builtin() {
            return Ok(hint.name.clone());
        }

        let target = match hint.name.to_ascii_lowercase().as_str() {
            "self" | "static" => Some(method.declaring_class.clone()),
            "parent" => self.reflector.parent_of(&method.declaring_class),
            _ => Some(hint.name.clone()),
        };

        match target.as_deref().and_then(|name| self.reflector.class(name)) {
            Some(class) => Ok(format!("\\{}", class.name)),
            None => {
                warn!(
                    "Type {} in {}::{}() is not loaded",
                    hint.name, method.declaring_class, method.name
                );
                Err(ClassesError::UnresolvedSignatureType {
                    class: method.declaring_class.clone(),
                    method: method.name.clone(),
                    type_name: hint.name.clone(),
                })
            }
        }
    }
}

/// `?T` is only written for types that do not already include null
fn accepts_null_marker(hint: &TypeHint) -> bool {
    hint.allows_null
        && !matches!(
            hint.name.to_ascii_lowercase().as_str(),
            "mixed" | "null"
        )
}

fn render_default(parameter: &ParameterInfo) -> String {
    if parameter.is_variadic {
        return String::new();
    }
    match &parameter.default {
        Some(value) => format!(" = {}", value.var_export()),
        None if parameter.is_optional => " = null".to_string(),
        None => String::new(),
    }
}
