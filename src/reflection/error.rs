//! Reflection errors

use thiserror::Error;

/// Errors raised by a `Reflector` when metadata cannot be resolved
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ReflectionError {
    /// The named class, interface or trait is not known
    #[error("Class \"{name}\" does not exist")]
    ClassNotFound { name: String },

    /// The class exists but neither declares nor inherits the method
    #[error("Method {class}::{method}() does not exist")]
    MethodNotFound { class: String, method: String },

    /// Rejected at registration: not a valid (optionally namespaced) identifier
    #[error("Invalid class name: '{name}'")]
    InvalidClassName { name: String },

    /// Rejected at registration: class names are unique, case-insensitively
    #[error("Cannot declare class {name}, because the name is already in use")]
    DuplicateClass { name: String },
}
