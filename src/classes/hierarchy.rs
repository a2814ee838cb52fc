// Class utilities - Hierarchy queries (common ancestors, parents, subtyping)

use super::{Classes, ClassesError};
use crate::reflection::{same_class_name, Reflector, TypeReference};
use tracing::debug;

impl<'r, R: Reflector + ?Sized> Classes<'r, R> {
    /// Name of the first common class in the hierarchies of all given classes
    ///
    /// Each input contributes its ancestor-or-self chain; the chains are
    /// intersected preserving the order of the first one and the most derived
    /// survivor is returned. `None` when nothing is shared, when the input is
    /// empty, or when an unknown class is given (its chain is only itself).
    ///
    /// ```text
    /// B, C extend A; D, E extend B; F extends C; G extends F; H
    ///
    /// [G, E]          -> A
    /// [new G(), F]    -> F
    /// [C, H]          -> None
    /// [new B(), X]    -> None
    /// ```
    pub fn first_common_parent<'a, I, T>(&self, classes: I) -> Option<String>
    where
        I: IntoIterator<Item = T>,
        T: Into<TypeReference<'a>>,
    {
        let mut common: Option<Vec<String>> = None;

        for class in classes {
            let chain = self.reflector.ancestor_chain(class.into().class_name());
            common = Some(match common {
                None => chain,
                Some(previous) => previous
                    .into_iter()
                    .filter(|ancestor| chain.contains(ancestor))
                    .collect(),
            });
        }

        let found = common.and_then(|ancestors| ancestors.into_iter().next());
        if found.is_none() {
            debug!("No common parent class found");
        }
        found
    }

    /// Parent classes from the nearest up, stopping before `until` when given
    ///
    /// `E extends D, D extends C, C extends B, B extends A`:
    /// `parent_classes(E, None) = [D, C, B, A]`, `parent_classes(E, Some(B)) = [D, C]`
    pub fn parent_classes<'a>(
        &self,
        class: impl Into<TypeReference<'a>>,
        until: Option<&str>,
    ) -> Result<Vec<String>, ClassesError> {
        let name = class.into().class_name();
        self.reflector.require_class(name)?;
        let until = until.filter(|u| !u.is_empty());

        Ok(self
            .reflector
            .ancestor_chain(name)
            .into_iter()
            .skip(1)
            .take_while(|parent| until.map_or(true, |u| !same_class_name(parent, u)))
            .collect())
    }

    /// True when both denote the same class or `class` is a subclass of `parent`
    pub fn is_same_or_extends<'a, 'b>(
        &self,
        class: impl Into<TypeReference<'a>>,
        parent: impl Into<TypeReference<'b>>,
    ) -> bool {
        let class = class.into().class_name();
        let parent = parent.into().class_name();
        same_class_name(class, parent) || self.reflector.is_subclass_of(class, parent)
    }

    /// Alias of [`Classes::is_same_or_extends`]
    pub fn get_is_same_or_extends<'a, 'b>(
        &self,
        class: impl Into<TypeReference<'a>>,
        parent: impl Into<TypeReference<'b>>,
    ) -> bool {
        self.is_same_or_extends(class, parent)
    }

    /// True when `interface` is among the interfaces `class` implements
    pub fn is_implements<'a>(
        &self,
        class: impl Into<TypeReference<'a>>,
        interface: &str,
    ) -> Result<bool, ClassesError> {
        let interfaces = self.reflector.interfaces_of(class.into().class_name())?;
        Ok(interfaces.iter().any(|i| same_class_name(i, interface)))
    }

    /// Alias of [`Classes::is_implements`]
    pub fn implement<'a>(
        &self,
        class: impl Into<TypeReference<'a>>,
        interface: &str,
    ) -> Result<bool, ClassesError> {
        self.is_implements(class, interface)
    }
}
