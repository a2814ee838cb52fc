// Reflection facility
//
// The narrow capability the utility layer depends on:
// - types.rs: class, member and signature descriptors
// - value.rs: constant/default values and their literal rendering
// - error.rs: resolution failures
// - registry.rs: in-memory `Reflector` backed by registered `ClassInfo`s
//
// `Reflector` only requires a class lookup; ancestor chains, interface sets
// and inherited members are derived from it by the provided methods.

pub mod error;
pub mod registry;
pub mod types;
pub mod value;

pub use error::ReflectionError;
pub use registry::ClassRegistry;
pub use types::{
    is_builtin_type, ClassInfo, ClassKind, ConstantInfo, Instance, MethodInfo, ParameterInfo,
    PropertyInfo, TypeHint, TypeReference, Visibility,
};
pub use value::{ArrayKey, Value};

use std::collections::HashSet;

/// Canonical lookup key: no leading separator, ASCII-lowercased
pub fn normalize_class_name(name: &str) -> String {
    name.trim_start_matches('\\').to_ascii_lowercase()
}

/// Class names compare case-insensitively, ignoring a leading separator
pub fn same_class_name(a: &str, b: &str) -> bool {
    a.trim_start_matches('\\')
        .eq_ignore_ascii_case(b.trim_start_matches('\\'))
}

/// Access to reflected class metadata
pub trait Reflector {
    /// Look up a class, interface or trait by name (case-insensitive)
    fn class(&self, name: &str) -> Option<&ClassInfo>;

    fn class_exists(&self, name: &str) -> bool {
        self.class(name).is_some()
    }

    fn require_class(&self, name: &str) -> Result<&ClassInfo, ReflectionError> {
        self.class(name).ok_or_else(|| ReflectionError::ClassNotFound {
            name: name.trim_start_matches('\\').to_string(),
        })
    }

    /// Canonical name of the direct parent class, `None` at the root or for unknown classes
    fn parent_of(&self, name: &str) -> Option<String> {
        let parent = self.class(name)?.parent.as_deref()?;
        Some(
            self.class(parent)
                .map(|c| c.name.clone())
                .unwrap_or_else(|| parent.to_string()),
        )
    }

    /// The class itself followed by each successive superclass up to the root
    ///
    /// Unknown classes yield a chain holding only the given name.
    fn ancestor_chain(&self, name: &str) -> Vec<String> {
        let mut chain = vec![self
            .class(name)
            .map(|c| c.name.clone())
            .unwrap_or_else(|| name.trim_start_matches('\\').to_string())];
        let mut seen: HashSet<String> = chain.iter().map(|n| normalize_class_name(n)).collect();

        let mut current = chain[0].clone();
        while let Some(parent) = self.parent_of(&current) {
            // malformed metadata may loop
            if !seen.insert(normalize_class_name(&parent)) {
                break;
            }
            chain.push(parent.clone());
            current = parent;
        }
        chain
    }

    /// Every interface implemented by the class, transitively, without duplicates
    fn interfaces_of(&self, name: &str) -> Result<Vec<String>, ReflectionError> {
        self.require_class(name)?;
        let mut found = Vec::new();
        let mut seen = HashSet::new();
        for class in self.ancestor_chain(name) {
            if let Some(info) = self.class(&class) {
                collect_interfaces(self, &info.interfaces, &mut found, &mut seen);
            }
        }
        Ok(found)
    }

    /// Own constants first, then inherited ones not redeclared
    fn constants_of(&self, name: &str) -> Result<Vec<ConstantInfo>, ReflectionError> {
        let info = self.require_class(name)?;
        let mut constants = info.constants.clone();

        let mut sources: Vec<String> = self.ancestor_chain(name).into_iter().skip(1).collect();
        sources.extend(self.interfaces_of(name)?);

        for source in sources {
            let Some(inherited) = self.class(&source) else {
                continue;
            };
            for constant in &inherited.constants {
                if !constants.iter().any(|c| c.name == constant.name) {
                    constants.push(constant.clone());
                }
            }
        }
        Ok(constants)
    }

    /// Own properties first, then non-private inherited ones not redeclared
    fn properties_of(&self, name: &str) -> Result<Vec<PropertyInfo>, ReflectionError> {
        let info = self.require_class(name)?;
        let mut properties = info.properties.clone();

        for ancestor in self.ancestor_chain(name).into_iter().skip(1) {
            let Some(inherited) = self.class(&ancestor) else {
                continue;
            };
            for property in &inherited.properties {
                if property.visibility != Visibility::Private
                    && !properties.iter().any(|p| p.name == property.name)
                {
                    properties.push(property.clone());
                }
            }
        }
        Ok(properties)
    }

    /// Own methods first, then inherited class methods, then interface methods
    fn methods_of(&self, name: &str) -> Result<Vec<MethodInfo>, ReflectionError> {
        let info = self.require_class(name)?;
        let mut methods = info.methods.clone();

        let push_inherited = |inherited: &ClassInfo, methods: &mut Vec<MethodInfo>| {
            for method in &inherited.methods {
                if method.visibility != Visibility::Private
                    && !methods
                        .iter()
                        .any(|m| m.name.eq_ignore_ascii_case(&method.name))
                {
                    methods.push(method.clone());
                }
            }
        };

        for ancestor in self.ancestor_chain(name).into_iter().skip(1) {
            if let Some(inherited) = self.class(&ancestor) {
                push_inherited(inherited, &mut methods);
            }
        }
        for interface in self.interfaces_of(name)? {
            if let Some(inherited) = self.class(&interface) {
                push_inherited(inherited, &mut methods);
            }
        }
        Ok(methods)
    }

    /// Method names are case-insensitive
    fn has_method(&self, class: &str, method: &str) -> Result<bool, ReflectionError> {
        Ok(self
            .methods_of(class)?
            .iter()
            .any(|m| m.name.eq_ignore_ascii_case(method)))
    }

    fn method(&self, class: &str, method: &str) -> Result<MethodInfo, ReflectionError> {
        self.methods_of(class)?
            .into_iter()
            .find(|m| m.name.eq_ignore_ascii_case(method))
            .ok_or_else(|| ReflectionError::MethodNotFound {
                class: class.trim_start_matches('\\').to_string(),
                method: method.to_string(),
            })
    }

    /// Strict subtype check: a proper ancestor or an implemented interface
    ///
    /// Unknown classes are never subclasses of anything.
    fn is_subclass_of(&self, class: &str, parent: &str) -> bool {
        if !self.class_exists(class) {
            return false;
        }
        if self
            .ancestor_chain(class)
            .iter()
            .skip(1)
            .any(|ancestor| same_class_name(ancestor, parent))
        {
            return true;
        }
        self.interfaces_of(class)
            .map(|interfaces| interfaces.iter().any(|i| same_class_name(i, parent)))
            .unwrap_or(false)
    }
}

fn collect_interfaces<R: Reflector + ?Sized>(
    reflector: &R,
    names: &[String],
    found: &mut Vec<String>,
    seen: &mut HashSet<String>,
) {
    for name in names {
        if !seen.insert(normalize_class_name(name)) {
            continue;
        }
        match reflector.class(name) {
            Some(interface) => {
                found.push(interface.name.clone());
                collect_interfaces(reflector, &interface.interfaces, found, seen);
            }
            None => found.push(name.trim_start_matches('\\').to_string()),
        }
    }
}
