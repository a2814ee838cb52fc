// Class utilities - Namespace and short-name helpers
//
// Pure string transforms; no reflection involved.

use crate::reflection::TypeReference;

pub const NAMESPACE_SEPARATOR: char = '\\';

/// True when the name has more than one namespace segment
pub fn is_namespaced(class_name: &str) -> bool {
    class_name.matches(NAMESPACE_SEPARATOR).count() + 1 > 1
}

/// Everything before the last segment; empty for unnamespaced names
///
/// `App\Model\User` → `App\Model`, `User` → ``
pub fn get_namespace(class_name: &str) -> String {
    let mut parts: Vec<&str> = class_name.split(NAMESPACE_SEPARATOR).collect();
    if parts.len() == 1 {
        return String::new();
    }
    parts.pop();
    parts.join("\\")
}

/// Just the class name: `LE\Application\Buro\Standard` → `Standard`
///
/// Accepts a class name or a live instance, whose runtime class is used.
pub fn short_class<'a>(class: impl Into<TypeReference<'a>>) -> String {
    let path = class.into().class_name().replace(NAMESPACE_SEPARATOR, "/");
    basename(&path).to_string()
}

/// Alias of [`short_class`]
pub fn short<'a>(class: impl Into<TypeReference<'a>>) -> String {
    short_class(class)
}

/// Last path component, ignoring trailing slashes
fn basename(path: &str) -> &str {
    path.trim_end_matches('/').rsplit('/').next().unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reflection::Instance;

    #[test]
    fn test_is_namespaced() {
        assert!(is_namespaced("A\\B"));
        assert!(is_namespaced("\\Root"));
        assert!(!is_namespaced("C"));
        assert!(!is_namespaced(""));
    }

    #[test]
    fn test_get_namespace() {
        assert_eq!(get_namespace("A\\B\\C"), "A\\B");
        assert_eq!(get_namespace("C"), "");
        assert_eq!(get_namespace("\\Root"), "");
        assert_eq!(get_namespace("\\A\\B"), "\\A");
    }

    #[test]
    fn test_short_class_from_name() {
        assert_eq!(short_class("LE\\Application\\Buro\\Standard"), "Standard");
        assert_eq!(short_class("Standard"), "Standard");
        assert_eq!(short_class("A\\B\\"), "B");
        assert_eq!(short(""), "");
    }

    #[test]
    fn test_short_class_from_instance() {
        let standard = Instance::of("A\\B\\Standard");
        assert_eq!(short_class(&standard), "Standard");
        assert_eq!(short(&standard), "Standard");
    }
}
