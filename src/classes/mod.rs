// Class utilities - Modular structure
// Main facade and public API
//
// - hierarchy.rs: common ancestors, parent lists, subtype/interface checks
// - naming.rs: namespace and short-name string helpers
// - members.rs: constants, public properties, interface method lookup
// - signature.rs: parameter lists and body-less method declarations

mod hierarchy;
mod members;
mod naming;
mod signature;

#[cfg(test)]
mod fixtures;

pub use naming::{get_namespace, is_namespaced, short, short_class, NAMESPACE_SEPARATOR};

use crate::reflection::{ReflectionError, Reflector};
use thiserror::Error;

/// Errors surfaced by the class utilities
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ClassesError {
    /// A class, interface or method could not be resolved
    #[error(transparent)]
    Reflection(#[from] ReflectionError),

    /// A parameter type names a class the reflector does not know
    #[error(
        "Cannot mock {class}::{method}() because a class or interface used in the signature is not loaded"
    )]
    UnresolvedSignatureType {
        class: String,
        method: String,
        type_name: String,
    },
}

/// Class-hierarchy utilities over a reflection facility
///
/// Every operation is a pure function of its arguments and the reflector's
/// metadata; the facade holds nothing but the borrowed reflector.
#[derive(Debug)]
pub struct Classes<'r, R: Reflector + ?Sized> {
    reflector: &'r R,
}

impl<'r, R: Reflector + ?Sized> Clone for Classes<'r, R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'r, R: Reflector + ?Sized> Copy for Classes<'r, R> {}

impl<'r, R: Reflector + ?Sized> Classes<'r, R> {
    pub fn new(reflector: &'r R) -> Self {
        Self { reflector }
    }

    pub fn reflector(&self) -> &'r R {
        self.reflector
    }
}
