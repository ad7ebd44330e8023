//! Validation delegation: form attributes are checked by the rules of the
//! entity type they came from, on a transient instance of that type.

use crate::{
    error::{Error, UnknownAttributeError, UsageError},
    form::{Form, FormKind},
    naming,
    traits::{Entity, FieldAssignError},
    validate::{full_message, validate_fields},
    value::Value,
};
use tracing::trace;

const INVALID: &str = "is invalid";

impl<K: FormKind> Form<K> {
    /// Validate each named attribute with its originating type's rules.
    ///
    /// Every name is checked first; an unknown or malformed name fails
    /// the whole call before any error is recorded. Attributes with no
    /// lookup entry, or whose type is abstract, are skipped. Messages
    /// land under the form attribute name. Returns the conjunction over
    /// attributes that were checked.
    pub fn validate_attributes<I, S>(&mut self, attributes: I) -> Result<bool, Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names: Vec<S> = attributes.into_iter().collect();
        for name in &names {
            self.check_name(name.as_ref())?;
        }

        let mut valid = true;
        for name in &names {
            let name = name.as_ref();
            let Some(entry) = self.lookup.get(name).cloned() else {
                trace!(attribute = name, "no lookup entry, skipped");
                continue;
            };

            let Some(field) = entry.original_field else {
                if let Some(group_valid) = self.validate_multiple_instance_model(name)? {
                    valid &= group_valid;
                }
                continue;
            };

            let Some(mut instance) = entry.model.new_instance() else {
                trace!(attribute = name, model = entry.model.path, "abstract model, skipped");
                continue;
            };

            let value = self.values.get(name).cloned().unwrap_or_default();
            valid &= self.check_field(name, instance.as_mut(), &field, &value);
        }

        Ok(valid)
    }

    /// Validate every field of every record in a collection attribute
    /// against its type's rules, reusing one transient instance.
    ///
    /// Returns `None` when the attribute has no lookup entry or its type
    /// is abstract. A scalar attribute is a `MalformedCollection`.
    pub fn validate_multiple_instance_model(&mut self, name: &str) -> Result<Option<bool>, Error> {
        self.check_name(name)?;

        let Some(entry) = self.lookup.get(name) else {
            return Ok(None);
        };
        if entry.original_field.is_some() {
            return Err(UsageError::MalformedCollection {
                name: name.to_string(),
            }
            .into());
        }
        let model = entry.model;
        let Some(mut instance) = model.new_instance() else {
            trace!(attribute = name, model = model.path, "abstract model, skipped");
            return Ok(None);
        };

        let records = match self.values.get(name) {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::List(items)) => items
                .iter()
                .map(|item| {
                    item.as_record().cloned().ok_or_else(|| UsageError::MalformedCollection {
                        name: name.to_string(),
                    })
                })
                .collect::<Result<Vec<_>, _>>()?,
            Some(_) => {
                return Err(UsageError::MalformedCollection {
                    name: name.to_string(),
                }
                .into());
            }
        };

        let mut valid = true;
        for record in &records {
            for (field, value) in record {
                valid &= self.check_field(name, instance.as_mut(), field, value);
            }
        }

        Ok(Some(valid))
    }

    fn check_name(&self, name: &str) -> Result<(), Error> {
        if !naming::is_identifier(name) {
            return Err(UsageError::InvalidAttributeName {
                name: name.to_string(),
            }
            .into());
        }
        if !self.has_attribute(name) {
            return Err(UnknownAttributeError::new(name).into());
        }

        Ok(())
    }

    /// Assign `value` to `field` on `instance`, run that field's rules,
    /// and record any messages under `attribute`.
    fn check_field(
        &mut self,
        attribute: &str,
        instance: &mut dyn Entity,
        field: &str,
        value: &Value,
    ) -> bool {
        match instance.set_value(field, value) {
            Ok(()) => {}
            Err(FieldAssignError::TypeMismatch { .. }) => {
                self.errors.add(attribute, full_message(field, INVALID));
                return false;
            }
            Err(FieldAssignError::UnknownField(_)) => {
                trace!(attribute, field, model = instance.model().path, "field not on model");
            }
        }

        let result = validate_fields(&*instance, &[field]);
        self.errors.extend(attribute, result.messages);

        result.valid
    }
}
