// Class utilities - Member introspection (constants, properties, interface methods)

use super::{Classes, ClassesError};
use crate::reflection::{same_class_name, ArrayKey, PropertyInfo, Reflector, TypeReference, Value};
use tracing::debug;

impl<'r, R: Reflector + ?Sized> Classes<'r, R> {
    /// Constant values mapped to constant names, inherited constants included
    ///
    /// Only names starting with `prefix` are kept (an empty prefix keeps all).
    /// Values become keys, so constants sharing a value collapse: the last
    /// name wins while the key keeps the position of its first occurrence.
    /// Array-valued constants cannot be keys and are skipped.
    pub fn grab_constants_from_class<'a>(
        &self,
        class: impl Into<TypeReference<'a>>,
        prefix: &str,
    ) -> Result<Vec<(ArrayKey, String)>, ClassesError> {
        let mut result: Vec<(ArrayKey, String)> = Vec::new();

        for (name, value) in self.grab_prefixed_constants_from_class(class, prefix)? {
            let Some(key) = value.to_array_key() else {
                debug!("Skipping constant {}: array values cannot be keys", name);
                continue;
            };
            match result.iter_mut().find(|(existing, _)| *existing == key) {
                Some(entry) => entry.1 = name,
                None => result.push((key, name)),
            }
        }

        Ok(result)
    }

    /// Constant names mapped to their values, filtered by name prefix
    pub fn grab_prefixed_constants_from_class<'a>(
        &self,
        class: impl Into<TypeReference<'a>>,
        prefix: &str,
    ) -> Result<Vec<(String, Value)>, ClassesError> {
        let constants = self.reflector.constants_of(class.into().class_name())?;
        Ok(constants
            .into_iter()
            .filter(|c| prefix.is_empty() || c.name.starts_with(prefix))
            .map(|c| (c.name, c.value))
            .collect())
    }

    /// Name of the first constant (in declaration order) strictly equal to `value`
    ///
    /// `None` when nothing matches or the class cannot be resolved.
    pub fn get_constant_name_by_value(
        &self,
        value: &Value,
        class: &str,
        prefix: &str,
    ) -> Option<String> {
        match self.grab_prefixed_constants_from_class(class, prefix) {
            Ok(constants) => constants
                .into_iter()
                .find(|(_, constant_value)| constant_value == value)
                .map(|(name, _)| name),
            Err(e) => {
                debug!("Constant lookup on {} failed: {}", class, e);
                None
            }
        }
    }

    /// The only public property of the class, `None` if there are zero or several
    ///
    /// Unknown classes also yield `None`.
    pub fn single_public_property_or_none(&self, class: &str) -> Option<PropertyInfo> {
        let properties = match self.reflector.properties_of(class) {
            Ok(properties) => properties,
            Err(e) => {
                debug!("Property lookup on {} failed: {}", class, e);
                return None;
            }
        };

        let mut public = properties.into_iter().filter(PropertyInfo::is_public);
        match (public.next(), public.next()) {
            (Some(only), None) => Some(only),
            _ => None,
        }
    }

    /// Number of public properties, inherited ones included; `None` for unknown classes
    pub fn public_properties_count_or_none(&self, class: &str) -> Option<usize> {
        match self.reflector.properties_of(class) {
            Ok(properties) => Some(properties.iter().filter(|p| p.is_public()).count()),
            Err(e) => {
                debug!("Property lookup on {} failed: {}", class, e);
                None
            }
        }
    }

    /// Whether `method` is declared by `interface` or, recursively, by its parents
    ///
    /// With `search_in_interface` the interface itself is checked first. With
    /// `recursive` every interface it extends (transitively, minus the names
    /// in `skip`) is checked as well. Each of those nested checks runs with
    /// `search_in_interface = recursive`, no further recursion and an empty
    /// skip list, so a skipped interface's methods are still found through
    /// any non-skipped interface that extends it.
    pub fn is_method_declared_in_interface<'a>(
        &self,
        method: &str,
        interface: impl Into<TypeReference<'a>>,
        search_in_interface: bool,
        recursive: bool,
        skip: &[&str],
    ) -> Result<bool, ClassesError> {
        let interface = interface.into().class_name();
        self.reflector.require_class(interface)?;

        if search_in_interface && self.reflector.has_method(interface, method)? {
            return Ok(true);
        }

        if recursive {
            for used in self.reflector.interfaces_of(interface)? {
                if skip.iter().any(|s| same_class_name(s, &used)) {
                    continue;
                }
                if self.is_method_declared_in_interface(method, &used, recursive, false, &[])? {
                    return Ok(true);
                }
            }
        }

        Ok(false)
    }
}
