use crate::{
    model::FieldRule,
    naming,
    traits::{Entity, EntityKind},
};
use std::fmt;

///
/// EntityModel
///
/// Static runtime model for one entity type, and that type's identity.
/// Two models are the same type when their paths match.
///

pub struct EntityModel {
    /// Fully-qualified type path (for identity and diagnostics).
    pub path: &'static str,
    /// Short type name; drives the default attribute prefix.
    pub entity_name: &'static str,
    /// Ordered field list.
    pub fields: &'static [&'static str],
    /// Rules declared directly on this type.
    pub rules: &'static [FieldRule],
    /// Base type whose rules this type inherits.
    pub parent: Option<&'static Self>,
    /// `None` marks an abstract type that cannot back a transient instance.
    pub constructor: Option<fn() -> Box<dyn Entity>>,
}

impl EntityModel {
    #[must_use]
    pub const fn is_constructible(&self) -> bool {
        self.constructor.is_some()
    }

    /// Fresh default instance, or `None` for an abstract type.
    #[must_use]
    pub fn new_instance(&self) -> Option<Box<dyn Entity>> {
        self.constructor.map(|construct| construct())
    }

    /// Default attribute prefix (`Car` → `car`).
    #[must_use]
    pub fn prefix(&self) -> String {
        naming::prefix_for(self.entity_name)
    }

    /// Default collection attribute name (`Car` → `cars`).
    #[must_use]
    pub fn plural_prefix(&self) -> String {
        naming::pluralize(&self.prefix())
    }

    /// This model followed by its ancestors, nearest first.
    pub fn lineage(&'static self) -> impl Iterator<Item = &'static Self> {
        std::iter::successors(Some(self), |model| model.parent)
    }

    /// Every rule registered against `field`, including inherited ones,
    /// in declaration order from this type outward.
    pub fn rules_on<'a>(&'static self, field: &'a str) -> impl Iterator<Item = &'static FieldRule> + 'a {
        self.lineage()
            .flat_map(|model| model.rules.iter())
            .filter(move |rule| rule.field == field)
    }
}

impl PartialEq for EntityModel {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl Eq for EntityModel {}

impl fmt::Debug for EntityModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityModel")
            .field("path", &self.path)
            .field("fields", &self.fields)
            .field("rules", &self.rules)
            .field("parent", &self.parent.map(|p| p.path))
            .field("abstract", &!self.is_constructible())
            .finish()
    }
}

/// Constructor stored on generated models.
#[must_use]
pub fn construct<E: EntityKind>() -> Box<dyn Entity> {
    Box::new(E::default())
}
