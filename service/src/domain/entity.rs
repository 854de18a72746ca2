//! [`Entity`] definitions.

use std::hash::{Hash, Hasher};

/// Identified payload of domain properties.
///
/// Two [`Entity`]s are equal if and only if their IDs are equal, regardless
/// of their properties.
#[derive(Clone, Debug)]
pub struct Entity<Id, Props> {
    /// ID of this [`Entity`].
    id: Id,

    /// Properties of this [`Entity`].
    props: Props,
}

impl<Id, Props> Entity<Id, Props> {
    /// Creates a new [`Entity`] out of the provided parts.
    #[must_use]
    pub fn new(id: Id, props: Props) -> Self {
        Self { id, props }
    }

    /// Returns ID of this [`Entity`].
    #[must_use]
    pub fn id(&self) -> &Id {
        &self.id
    }

    /// Returns properties of this [`Entity`].
    #[must_use]
    pub fn props(&self) -> &Props {
        &self.props
    }

    /// Returns mutable properties of this [`Entity`].
    ///
    /// ID is never reassigned, so only the properties are exposed.
    pub(crate) fn props_mut(&mut self) -> &mut Props {
        &mut self.props
    }
}

impl<Id: PartialEq, Props> PartialEq for Entity<Id, Props> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<Id: Eq, Props> Eq for Entity<Id, Props> {}

impl<Id: Hash, Props> Hash for Entity<Id, Props> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

#[cfg(test)]
mod spec {
    use super::Entity;

    #[test]
    fn equality_is_identity() {
        let a = Entity::new(1, "first");
        let b = Entity::new(1, "second");
        let c = Entity::new(2, "first");

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn props_mutation_keeps_id() {
        let mut e = Entity::new(7, 1);
        *e.props_mut() += 1;

        assert_eq!(*e.id(), 7);
        assert_eq!(*e.props(), 2);
    }
}
