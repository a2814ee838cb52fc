// Shared test hierarchies

use crate::reflection::{
    ClassInfo, ClassRegistry, MethodInfo, ParameterInfo, PropertyInfo, TypeHint, Value,
    Visibility,
};

/// GrandparentClass <- ParentClass <- ChildClass
pub fn family() -> ClassRegistry {
    ClassRegistry::from_classes([
        ClassInfo::class("Fixtures\\GrandparentClass")
            .implements("Fixtures\\Named")
            .property(PropertyInfo::new("id", Visibility::Public))
            .property(PropertyInfo::new("secret", Visibility::Private)),
        ClassInfo::class("Fixtures\\ParentClass").extends("Fixtures\\GrandparentClass"),
        ClassInfo::class("Fixtures\\ChildClass")
            .extends("Fixtures\\ParentClass")
            .implements("Fixtures\\Printable")
            .property(PropertyInfo::new("label", Visibility::Public)),
        ClassInfo::interface("Fixtures\\Named"),
        ClassInfo::interface("Fixtures\\Printable"),
    ])
    .unwrap()
}

/// B, C extend A; D, E extend B; F extends C; G extends F; H stands alone
pub fn letters() -> ClassRegistry {
    ClassRegistry::from_classes([
        ClassInfo::class("A"),
        ClassInfo::class("B").extends("A"),
        ClassInfo::class("C").extends("A"),
        ClassInfo::class("D").extends("B"),
        ClassInfo::class("E").extends("B"),
        ClassInfo::class("F").extends("C"),
        ClassInfo::class("G").extends("F"),
        ClassInfo::class("H"),
    ])
    .unwrap()
}

/// Chain\E extends D extends C extends B extends A
pub fn chain() -> ClassRegistry {
    ClassRegistry::from_classes([
        ClassInfo::class("Chain\\A"),
        ClassInfo::class("Chain\\B").extends("Chain\\A"),
        ClassInfo::class("Chain\\C").extends("Chain\\B"),
        ClassInfo::class("Chain\\D").extends("Chain\\C"),
        ClassInfo::class("Chain\\E").extends("Chain\\D"),
    ])
    .unwrap()
}

/// Constants, including duplicated values and inherited ones
pub fn statuses() -> ClassRegistry {
    ClassRegistry::from_classes([
        ClassInfo::interface("Status\\HasDefault").constant("DEFAULT_STATUS", 1),
        ClassInfo::class("Status\\BaseStatus").constant("STATUS_UNKNOWN", 0),
        ClassInfo::class("Status\\Order")
            .extends("Status\\BaseStatus")
            .implements("Status\\HasDefault")
            .constant("STATUS_OK", 1)
            .constant("STATUS_BAD", 2)
            .constant("STATUS_FAILED", 2)
            .constant("TYPE_ONLINE", "online")
            .constant("TYPE_RATIO", 0.5)
            .constant("TYPE_FLAGS", Value::list(["a", "b"]))
            .property(PropertyInfo::new("status", Visibility::Public))
            .property(PropertyInfo::new("registry", Visibility::Public).make_static())
            .property(PropertyInfo::new("log", Visibility::Protected)),
        ClassInfo::class("Status\\Single")
            .property(PropertyInfo::new("value", Visibility::Public))
            .property(PropertyInfo::new("cache", Visibility::Private)),
        ClassInfo::class("Status\\Empty"),
    ])
    .unwrap()
}

/// Interfaces for method lookups: Leaf extends Middle extends Root
pub fn interfaces() -> ClassRegistry {
    ClassRegistry::from_classes([
        ClassInfo::interface("Api\\Root").method(MethodInfo::new("rootMethod").make_abstract()),
        ClassInfo::interface("Api\\Middle")
            .extends("Api\\Root")
            .method(MethodInfo::new("middleMethod").make_abstract()),
        ClassInfo::interface("Api\\Leaf")
            .extends("Api\\Middle")
            .method(MethodInfo::new("leafMethod").make_abstract()),
        ClassInfo::interface("Api\\Side").method(MethodInfo::new("sideMethod").make_abstract()),
        ClassInfo::interface("Api\\Combined")
            .extends("Api\\Side")
            .extends("Api\\Root"),
    ])
    .unwrap()
}

/// Classes referenced from method signatures
pub fn signatures() -> ClassRegistry {
    ClassRegistry::from_classes([
        ClassInfo::class("App\\Model\\User"),
        ClassInfo::interface("App\\Contract\\Repository"),
        ClassInfo::class("App\\Service\\BaseService"),
        ClassInfo::abstract_class("App\\Service\\UserService")
            .extends("App\\Service\\BaseService")
            .implements("App\\Contract\\Repository")
            .method(
                MethodInfo::new("find")
                    .param(ParameterInfo::new("id").typed(TypeHint::new("int")))
                    .returns(TypeHint::nullable("App\\Model\\User")),
            ),
    ])
    .unwrap()
}

/// `f(int $x, ?string $y = null, ...$rest)`
pub fn mixed_method() -> MethodInfo {
    MethodInfo::new("f")
        .declared_in("App\\Service\\UserService")
        .param(ParameterInfo::new("x").typed(TypeHint::new("int")))
        .param(
            ParameterInfo::new("y")
                .typed(TypeHint::nullable("string"))
                .with_default(Value::Null),
        )
        .param(ParameterInfo::new("rest").variadic())
}
