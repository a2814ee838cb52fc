// Class Introspect - class-hierarchy queries and stub signature rendering
//
// A thin layer over a reflection facility: the `reflection` module defines
// the capability trait and an in-memory registry, `classes` holds the
// utility surface built on top of it.

// Reflection seam: data model, Reflector trait, ClassRegistry
pub mod reflection;

// Utility surface: hierarchy, naming, constants, signatures
pub mod classes;

pub use classes::{
    get_namespace, is_namespaced, short, short_class, Classes, ClassesError,
};
pub use reflection::{
    ArrayKey, ClassInfo, ClassKind, ClassRegistry, ConstantInfo, Instance, MethodInfo,
    ParameterInfo, PropertyInfo, ReflectionError, Reflector, TypeHint, TypeReference, Value,
    Visibility,
};
