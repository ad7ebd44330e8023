use crate::{
    error::{Error, UsageError},
    form::{
        DEFAULT_ATTRIBUTES, Form, FormKind,
        ledger::{EntityRef, ExtraAttributeSpec, Ledger, ModelSource, MultipleInstanceGroup},
        namespace::Namespace,
    },
    model::EntityModel,
    naming,
    traits::Entity,
    value::FieldMap,
};
use std::{fmt, marker::PhantomData};
use tracing::debug;

///
/// CollisionPolicy
///
/// What the namespace builder does when two registrations produce the
/// same attribute name.
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum CollisionPolicy {
    /// Later registration wins; a warning is logged.
    #[default]
    Overwrite,
    /// Building fails with `BuildError::DuplicateAttribute`.
    Strict,
}

///
/// FormBuilder
///
/// Registration phase of a form. Every `add_*` call validates its
/// arguments before touching the ledger, so a rejected call leaves the
/// builder unchanged.
///

pub struct FormBuilder<K: FormKind> {
    ledger: Ledger,
    policy: CollisionPolicy,
    _kind: PhantomData<K>,
}

impl<K: FormKind> Default for FormBuilder<K> {
    fn default() -> Self {
        Self {
            ledger: Ledger::default(),
            policy: CollisionPolicy::default(),
            _kind: PhantomData,
        }
    }
}

impl<K: FormKind> fmt::Debug for FormBuilder<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormBuilder")
            .field("kind", &std::any::type_name::<K>())
            .field("ledger", &self.ledger)
            .field("policy", &self.policy)
            .finish()
    }
}

impl<K: FormKind> FormBuilder<K> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn collision_policy(&mut self, policy: CollisionPolicy) -> &mut Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub const fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Register one entity under `prefix`, defaulting to the type's own
    /// prefix. A bare type registers its default instance.
    pub fn add_model(
        &mut self,
        model: impl Into<ModelSource>,
        prefix: Option<&str>,
    ) -> Result<&mut Self, Error> {
        let source = model.into();
        let prefix = match prefix {
            Some(prefix) => checked_prefix(prefix)?,
            None => source.model().prefix(),
        };
        let instance = source.into_instance()?;
        let entity = EntityRef::snapshot(prefix, instance.as_ref());

        debug!(model = entity.model.path, prefix = %entity.prefix, "model registered");
        self.ledger.models.push(entity);

        Ok(self)
    }

    /// Register one entity under an explicit, caller-chosen prefix.
    pub fn add_dynamic_model(
        &mut self,
        prefix: &str,
        model: impl Into<ModelSource>,
    ) -> Result<&mut Self, Error> {
        let prefix = checked_prefix(prefix)?;
        let instance = model.into().into_instance()?;
        let entity = EntityRef::snapshot(prefix, instance.as_ref());

        debug!(model = entity.model.path, prefix = %entity.prefix, "dynamic model registered");
        self.ledger.dynamic_models.push(entity);

        Ok(self)
    }

    /// Register a collection of `model` instances as one attribute,
    /// named `attribute_name` or the type's plural prefix. The type may
    /// be abstract; every instance must be of exactly that type.
    pub fn add_multiple_instance_model<'a, I, E>(
        &mut self,
        attribute_name: Option<&str>,
        model: &'static EntityModel,
        instances: I,
    ) -> Result<&mut Self, Error>
    where
        I: IntoIterator<Item = &'a E>,
        E: Entity + ?Sized + 'a,
    {
        let attribute_name = match attribute_name {
            Some(name) => checked_name(name)?,
            None => model.plural_prefix(),
        };

        let mut snapshots = Vec::new();
        for instance in instances {
            let found = instance.model();
            if found != model {
                return Err(UsageError::InstanceModelMismatch {
                    expected: model.path,
                    found: found.path,
                }
                .into());
            }

            snapshots.push(EntityRef::snapshot(attribute_name.clone(), instance));
        }

        debug!(
            model = model.path,
            attribute = %attribute_name,
            instances = snapshots.len(),
            "multiple instance model registered"
        );
        self.ledger
            .multiple_instance_models
            .push(MultipleInstanceGroup {
                attribute_name,
                model,
                instances: snapshots,
            });

        Ok(self)
    }

    /// Register bare attributes with no backing model; they start `Null`
    /// and are never validated.
    pub fn add_extra_attributes<S: AsRef<str>>(
        &mut self,
        prefix: Option<&str>,
        attributes: &[S],
    ) -> Result<&mut Self, Error> {
        let prefix = prefix.map(checked_prefix).transpose()?;

        self.push_extra(prefix, attributes, None, None)
    }

    /// Register bare attributes that resolve to fields of `model`. The
    /// prefix defaults to the type's own; a live instance supplies the
    /// initial values.
    pub fn add_extra_attributes_for<S: AsRef<str>>(
        &mut self,
        prefix: Option<&str>,
        attributes: &[S],
        model: impl Into<ModelSource>,
    ) -> Result<&mut Self, Error> {
        let source = model.into();
        let prefix = match prefix {
            Some(prefix) => checked_prefix(prefix)?,
            None => source.model().prefix(),
        };

        self.push_extra(
            Some(prefix),
            attributes,
            Some(source.model()),
            source.supplied_values(),
        )
    }

    fn push_extra<S: AsRef<str>>(
        &mut self,
        prefix: Option<String>,
        attributes: &[S],
        model: Option<&'static EntityModel>,
        values: Option<FieldMap>,
    ) -> Result<&mut Self, Error> {
        let mut names: Vec<String> = Vec::with_capacity(attributes.len());
        for attribute in attributes {
            let name = checked_name(attribute.as_ref())?;
            let aggregated = naming::prefixed(prefix.as_deref(), &name);
            if DEFAULT_ATTRIBUTES.contains(&aggregated.as_str()) {
                return Err(UsageError::ReservedAttribute { name: aggregated }.into());
            }
            if !names.contains(&name) {
                names.push(name);
            }
        }

        debug!(
            prefix = prefix.as_deref().unwrap_or(""),
            model = model.map_or("", |m| m.path),
            attributes = names.len(),
            "extra attributes registered"
        );
        self.ledger.extra_attributes.push(ExtraAttributeSpec {
            prefix,
            names,
            model,
            values,
        });

        Ok(self)
    }

    /// Construct the namespace and finish the form. Single and dynamic
    /// registrations are released afterwards.
    pub fn build(self) -> Result<Form<K>, Error> {
        let Self {
            mut ledger, policy, ..
        } = self;

        let namespace = Namespace::build(&ledger, policy)?;
        ledger.clear_entities();

        Ok(Form::from_parts(namespace, ledger))
    }
}

fn checked_prefix(prefix: &str) -> Result<String, UsageError> {
    if naming::is_identifier(prefix) {
        Ok(prefix.to_string())
    } else {
        Err(UsageError::InvalidPrefix {
            prefix: prefix.to_string(),
        })
    }
}

fn checked_name(name: &str) -> Result<String, UsageError> {
    if naming::is_identifier(name) {
        Ok(name.to_string())
    } else {
        Err(UsageError::InvalidAttributeName {
            name: name.to_string(),
        })
    }
}
