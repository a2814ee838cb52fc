// In-memory class registry
//
// `ClassRegistry` is the stock `Reflector`: classes are registered once,
// either programmatically or from a JSON metadata dump exported by the
// host runtime, and never mutated afterwards.

use super::{normalize_class_name, ClassInfo, ReflectionError, Reflector};
use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Optionally namespaced identifier: `Foo`, `App\Model\Foo`, `\Foo`
static CLASS_NAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^\\?[A-Za-z_[^\x00-\x7F]][A-Za-z0-9_[^\x00-\x7F]]*(?:\\[A-Za-z_[^\x00-\x7F]][A-Za-z0-9_[^\x00-\x7F]]*)*$",
    )
    .unwrap()
});

/// Returns true when `name` is a syntactically valid class name
pub fn is_valid_class_name(name: &str) -> bool {
    CLASS_NAME_RE.is_match(name)
}

/// Reflector over a fixed set of registered classes
#[derive(Debug, Clone, Default)]
pub struct ClassRegistry {
    /// Lookup by normalized (lowercase) name
    classes: HashMap<String, ClassInfo>,
    /// Registration order, for stable listings
    order: Vec<String>,
}

impl ClassRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a class, interface or trait
    ///
    /// Members without a declaring class are stamped with this class' name.
    pub fn register(&mut self, mut class: ClassInfo) -> Result<(), ReflectionError> {
        if !is_valid_class_name(&class.name) {
            return Err(ReflectionError::InvalidClassName { name: class.name });
        }
        class.name = class.name.trim_start_matches('\\').to_string();

        let key = normalize_class_name(&class.name);
        if self.classes.contains_key(&key) {
            return Err(ReflectionError::DuplicateClass { name: class.name });
        }

        class.fill_declaring_class();
        debug!(
            "Registered {:?} {} ({} constants, {} properties, {} methods)",
            class.kind,
            class.name,
            class.constants.len(),
            class.properties.len(),
            class.methods.len()
        );

        self.order.push(key.clone());
        self.classes.insert(key, class);
        Ok(())
    }

    /// Builder-style `register`
    pub fn with_class(mut self, class: ClassInfo) -> Result<Self, ReflectionError> {
        self.register(class)?;
        Ok(self)
    }

    pub fn from_classes<I>(classes: I) -> Result<Self, ReflectionError>
    where
        I: IntoIterator<Item = ClassInfo>,
    {
        let mut registry = Self::new();
        for class in classes {
            registry.register(class)?;
        }
        Ok(registry)
    }

    /// Load a JSON array of class descriptors
    pub fn from_json(json: &str) -> Result<Self> {
        let classes: Vec<ClassInfo> =
            serde_json::from_str(json).context("Failed to parse class metadata")?;
        let count = classes.len();
        let registry = Self::from_classes(classes).context("Invalid class metadata")?;
        debug!("Loaded {} classes from class metadata", count);
        Ok(registry)
    }

    /// Load a JSON metadata dump from disk
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read class metadata from {}", path.display()))?;
        Self::from_json(&json).with_context(|| format!("Failed to load {}", path.display()))
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Canonical class names in registration order
    pub fn class_names(&self) -> Vec<&str> {
        self.order
            .iter()
            .filter_map(|key| self.classes.get(key))
            .map(|class| class.name.as_str())
            .collect()
    }
}

impl Reflector for ClassRegistry {
    fn class(&self, name: &str) -> Option<&ClassInfo> {
        self.classes.get(&normalize_class_name(name))
    }
}
