mod builder;
mod delegate;
mod errors;
mod ledger;
mod lookup;
mod namespace;


pub use builder::{CollisionPolicy, FormBuilder};
pub use errors::Errors;
pub use ledger::{EntityRef, ExtraAttributeSpec, Ledger, ModelSource, MultipleInstanceGroup};
pub use lookup::{AttributeLookup, LookupEntry};

use crate::{
    FINISH_STEP,
    error::{Error, UnknownAttributeError, UsageError},
    model::EntityModel,
    traits::FieldValue,
    value::{FieldMap, Value},
};
use namespace::Namespace;
use std::{fmt, marker::PhantomData};

/// Attributes every form carries regardless of registrations.
pub const DEFAULT_ATTRIBUTES: &[&str] = &["current_step", "new_record"];

const ASSOCIATED_MODEL: &str = "associated_model";
const SAVE_FAILED: &str = "could not be properly save";

///
/// FormKind
///
/// One aggregate variant: its wizard steps and its hooks. Hooks default
/// to "valid" and "persisted".
///

pub trait FormKind: Sized + 'static {
    /// Ordered wizard steps; the first one is where the wizard starts.
    const STEPS: &'static [&'static str] = &[];

    /// Variant-level validation, run by `Form::valid`. Failures go into
    /// `form.errors_mut()`; the returned error is reserved for misuse.
    fn validate(_form: &mut Form<Self>) -> Result<(), Error> {
        Ok(())
    }

    fn create(_form: &Form<Self>) -> bool {
        true
    }

    fn update(_form: &Form<Self>) -> bool {
        true
    }
}

///
/// Form
///
/// The aggregate record: a flat attribute namespace over every registered
/// entity, plus the wizard step and new-record flag, and the error
/// collection filled by validation.
///

pub struct Form<K: FormKind> {
    current_step: Option<String>,
    new_record: bool,
    values: FieldMap,
    errors: Errors,
    lookup: AttributeLookup,
    ledger: Ledger,
    _kind: PhantomData<K>,
}

impl<K: FormKind> Form<K> {
    // ---------------------------------------------------------------------
    // Construction
    // ---------------------------------------------------------------------

    /// Run `register` against a fresh builder and build the form.
    pub fn create_form<F>(register: F) -> Result<Self, Error>
    where
        F: FnOnce(&mut FormBuilder<K>) -> Result<(), Error>,
    {
        let mut builder = FormBuilder::new();
        register(&mut builder)?;

        builder.build()
    }

    #[must_use]
    pub fn builder() -> FormBuilder<K> {
        FormBuilder::new()
    }

    fn from_parts(namespace: Namespace, ledger: Ledger) -> Self {
        Self {
            current_step: None,
            new_record: true,
            values: namespace.values,
            errors: Errors::new(),
            lookup: namespace.lookup,
            ledger,
            _kind: PhantomData,
        }
    }

    // ---------------------------------------------------------------------
    // Attributes
    // ---------------------------------------------------------------------

    #[must_use]
    pub fn has_attribute(&self, name: &str) -> bool {
        DEFAULT_ATTRIBUTES.contains(&name) || self.values.contains_key(name)
    }

    /// Default attributes first, then the namespace in declaration order.
    #[must_use]
    pub fn attribute_keys(&self) -> Vec<&str> {
        DEFAULT_ATTRIBUTES
            .iter()
            .copied()
            .chain(self.values.keys().map(String::as_str))
            .collect()
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<Value> {
        match name {
            "current_step" => Some(self.current_step.to_value()),
            "new_record" => Some(Value::Bool(self.new_record)),
            _ => self.values.get(name).cloned(),
        }
    }

    pub fn attribute(&self, name: &str) -> Result<Value, UnknownAttributeError> {
        self.get(name)
            .ok_or_else(|| UnknownAttributeError::new(name))
    }

    /// Write one attribute. Unknown names fail with `UnknownAttribute`;
    /// default attributes reject values of the wrong shape.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<(), Error> {
        let value = value.into();

        match name {
            "current_step" => {
                self.current_step = Option::<String>::from_value(&value)
                    .ok_or_else(|| invalid_value(name, &value))?;
            }
            "new_record" => {
                self.new_record =
                    bool::from_value(&value).ok_or_else(|| invalid_value(name, &value))?;
            }
            _ => match self.values.get_mut(name) {
                Some(slot) => *slot = value,
                None => return Err(UnknownAttributeError::new(name).into()),
            },
        }

        Ok(())
    }

    /// Like `set`, reporting failure as `false` instead of an error.
    pub fn try_set(&mut self, name: &str, value: impl Into<Value>) -> bool {
        self.set(name, value).is_ok()
    }

    /// Bulk assignment; names the form does not know are skipped.
    pub fn set_attributes<I, N, V>(&mut self, attributes: I) -> &mut Self
    where
        I: IntoIterator<Item = (N, V)>,
        N: AsRef<str>,
        V: Into<Value>,
    {
        for (name, value) in attributes {
            self.try_set(name.as_ref(), value);
        }

        self
    }

    /// Every attribute, default attributes first.
    #[must_use]
    pub fn attributes(&self) -> FieldMap {
        self.attribute_keys()
            .into_iter()
            .map(|name| (name.to_string(), self.get(name).unwrap_or_default()))
            .collect()
    }

    /// Current values for the scalar attributes originating from `model`,
    /// keyed by the model's own field names. Collection attributes are
    /// not included.
    #[must_use]
    pub fn attributes_for(&self, model: &EntityModel) -> FieldMap {
        self.lookup
            .fields_of(model)
            .map(|(name, field)| {
                let value = self.values.get(name).cloned().unwrap_or_default();
                (field.to_string(), value)
            })
            .collect()
    }

    #[must_use]
    pub fn as_json(&self) -> serde_json::Value {
        self.attributes()
            .into_iter()
            .map(|(name, value)| (name, serde_json::to_value(value).unwrap_or_default()))
            .collect::<serde_json::Map<_, _>>()
            .into()
    }

    #[must_use]
    pub fn current_step(&self) -> Option<&str> {
        self.current_step.as_deref()
    }

    pub fn set_current_step(&mut self, step: Option<impl Into<String>>) {
        self.current_step = step.map(Into::into);
    }

    #[must_use]
    pub const fn is_new_record(&self) -> bool {
        self.new_record
    }

    pub const fn set_new_record(&mut self, new_record: bool) {
        self.new_record = new_record;
    }

    #[must_use]
    pub const fn lookup(&self) -> &AttributeLookup {
        &self.lookup
    }

    #[must_use]
    pub const fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    #[must_use]
    pub fn multiple_instance_models(&self) -> &[MultipleInstanceGroup] {
        self.ledger.multiple_instance_models()
    }

    // ---------------------------------------------------------------------
    // Errors and validity
    // ---------------------------------------------------------------------

    #[must_use]
    pub const fn errors(&self) -> &Errors {
        &self.errors
    }

    pub const fn errors_mut(&mut self) -> &mut Errors {
        &mut self.errors
    }

    /// Record a persistence failure against the form, preceded by
    /// `message` when one is given.
    pub fn invalidate(&mut self, message: Option<&str>) {
        if let Some(message) = message {
            self.errors.add(ASSOCIATED_MODEL, message);
        }
        self.errors.add(ASSOCIATED_MODEL, SAVE_FAILED);
    }

    /// Clear errors, run the variant's validation, and report whether
    /// any errors were recorded.
    pub fn valid(&mut self) -> Result<bool, Error> {
        self.errors.clear();
        K::validate(self)?;

        Ok(self.errors.is_empty())
    }

    /// Validation only; persistence is `persist`.
    pub fn save(&mut self) -> Result<bool, Error> {
        self.valid()
    }

    /// Dispatch to the variant's create or update hook.
    #[must_use]
    pub fn persist(&self) -> bool {
        if self.new_record {
            K::create(self)
        } else {
            K::update(self)
        }
    }

    /// `persist`, recording a failure on the form when it returns false.
    pub fn models_persisted(&mut self) -> bool {
        let persisted = self.persist();
        if !persisted {
            self.errors.add(ASSOCIATED_MODEL, SAVE_FAILED);
        }

        persisted
    }

    // ---------------------------------------------------------------------
    // Steps
    // ---------------------------------------------------------------------

    #[must_use]
    pub fn first_step(&self) -> bool {
        match (self.current_step.as_deref(), K::STEPS.first()) {
            (Some(current), Some(first)) => current == *first,
            _ => false,
        }
    }

    /// Whether rules tied to `step` apply at the current step: always
    /// when no step is set or the wizard is finishing, otherwise when
    /// `step` comes no later than the current one. Unlisted steps never
    /// apply.
    #[must_use]
    pub fn required_for_step(&self, step: &str) -> bool {
        let Some(current) = self.current_step.as_deref() else {
            return true;
        };
        if current == FINISH_STEP {
            return true;
        }

        let position = |name: &str| K::STEPS.iter().position(|s| *s == name);
        match (position(step), position(current)) {
            (Some(step), Some(current)) => step <= current,
            _ => false,
        }
    }
}

impl<K: FormKind> fmt::Debug for Form<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Form")
            .field("kind", &std::any::type_name::<K>())
            .field("current_step", &self.current_step)
            .field("new_record", &self.new_record)
            .field("values", &self.values)
            .field("errors", &self.errors)
            .finish_non_exhaustive()
    }
}

fn invalid_value(name: &str, value: &Value) -> Error {
    UsageError::InvalidValue {
        name: name.to_string(),
        value: value.to_string(),
    }
    .into()
}
