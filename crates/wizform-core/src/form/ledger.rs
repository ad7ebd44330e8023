use crate::{
    error::UsageError,
    model::EntityModel,
    traits::{Entity, EntityKind},
    value::{FieldMap, Value},
};

///
/// ModelSource
///
/// What a caller hands to registration: either a live instance, whose
/// current field values seed the form, or just a type.
///

#[derive(Debug)]
pub enum ModelSource {
    Type(&'static EntityModel),
    Instance(Box<dyn Entity>),
}

impl ModelSource {
    #[must_use]
    pub fn model(&self) -> &'static EntityModel {
        match self {
            Self::Type(model) => model,
            Self::Instance(instance) => instance.model(),
        }
    }

    /// Field values the caller supplied, if any; a bare type supplies none.
    #[must_use]
    pub fn supplied_values(&self) -> Option<FieldMap> {
        match self {
            Self::Type(_) => None,
            Self::Instance(instance) => Some(instance.field_values()),
        }
    }

    /// Resolve to a concrete instance, constructing a default one for a
    /// bare type.
    pub fn into_instance(self) -> Result<Box<dyn Entity>, UsageError> {
        match self {
            Self::Instance(instance) => Ok(instance),
            Self::Type(model) => model
                .new_instance()
                .ok_or(UsageError::NotConstructible { path: model.path }),
        }
    }
}

impl From<&'static EntityModel> for ModelSource {
    fn from(model: &'static EntityModel) -> Self {
        Self::Type(model)
    }
}

impl From<Box<dyn Entity>> for ModelSource {
    fn from(instance: Box<dyn Entity>) -> Self {
        Self::Instance(instance)
    }
}

impl<E: EntityKind> From<E> for ModelSource {
    fn from(instance: E) -> Self {
        Self::Instance(Box::new(instance))
    }
}

///
/// EntityRef
///
/// One registered entity: the prefix its fields appear under and a
/// snapshot of its field values taken at registration.
///

#[derive(Clone, Debug, PartialEq)]
pub struct EntityRef {
    pub prefix: String,
    pub model: &'static EntityModel,
    pub fields: FieldMap,
}

impl EntityRef {
    #[must_use]
    pub fn snapshot<E: Entity + ?Sized>(prefix: impl Into<String>, instance: &E) -> Self {
        Self {
            prefix: prefix.into(),
            model: instance.model(),
            fields: instance.field_values(),
        }
    }

    /// Value of one field as captured, `Null` when absent.
    #[must_use]
    pub fn value_of(&self, field: &str) -> Value {
        self.fields.get(field).cloned().unwrap_or_default()
    }
}

///
/// MultipleInstanceGroup
///
/// A named collection of same-typed entities, exposed on the form as one
/// attribute holding a list of field records.
///

#[derive(Clone, Debug, PartialEq)]
pub struct MultipleInstanceGroup {
    pub attribute_name: String,
    pub model: &'static EntityModel,
    pub instances: Vec<EntityRef>,
}

impl MultipleInstanceGroup {
    /// Current collection value: one record per instance, in order.
    #[must_use]
    pub fn records(&self) -> Value {
        Value::records(self.instances.iter().map(|instance| instance.fields.clone()))
    }

    /// The default instance of the group's type under the type's own
    /// prefix, or `None` when the type is abstract.
    #[must_use]
    pub fn template(&self) -> Option<EntityRef> {
        let instance = self.model.new_instance()?;

        Some(EntityRef::snapshot(self.model.prefix(), instance.as_ref()))
    }
}

///
/// ExtraAttributeSpec
///
/// Bare attribute names with an optional prefix and an optional model
/// that supplies their initial values and lookup entries.
///

#[derive(Clone, Debug, PartialEq)]
pub struct ExtraAttributeSpec {
    pub prefix: Option<String>,
    pub names: Vec<String>,
    pub model: Option<&'static EntityModel>,
    pub values: Option<FieldMap>,
}

impl ExtraAttributeSpec {
    /// Initial value for `name`; `Null` unless a supplied instance has it.
    #[must_use]
    pub fn initial_value(&self, name: &str) -> Value {
        self.values
            .as_ref()
            .and_then(|values| values.get(name))
            .cloned()
            .unwrap_or_default()
    }
}

///
/// Ledger
///
/// Everything registered so far, in registration order per kind. Single
/// and dynamic lists are emptied once the namespace is built; groups are
/// kept for collection validation.
///

#[derive(Clone, Debug, Default)]
pub struct Ledger {
    pub(crate) models: Vec<EntityRef>,
    pub(crate) dynamic_models: Vec<EntityRef>,
    pub(crate) multiple_instance_models: Vec<MultipleInstanceGroup>,
    pub(crate) extra_attributes: Vec<ExtraAttributeSpec>,
}

impl Ledger {
    #[must_use]
    pub fn models(&self) -> &[EntityRef] {
        &self.models
    }

    #[must_use]
    pub fn dynamic_models(&self) -> &[EntityRef] {
        &self.dynamic_models
    }

    #[must_use]
    pub fn multiple_instance_models(&self) -> &[MultipleInstanceGroup] {
        &self.multiple_instance_models
    }

    #[must_use]
    pub fn extra_attributes(&self) -> &[ExtraAttributeSpec] {
        &self.extra_attributes
    }

    #[must_use]
    pub fn multiple_instance_model(&self, attribute_name: &str) -> Option<&MultipleInstanceGroup> {
        self.multiple_instance_models
            .iter()
            .find(|group| group.attribute_name == attribute_name)
    }

    pub(crate) fn clear_entities(&mut self) {
        self.models.clear();
        self.dynamic_models.clear();
    }
}
