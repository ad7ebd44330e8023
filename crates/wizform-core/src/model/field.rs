use crate::traits::Validator;
use std::fmt;

///
/// FieldRule
/// One validator registered against one entity field.
///

#[derive(Clone, Copy)]
pub struct FieldRule {
    /// Field name the rule is registered against.
    pub field: &'static str,
    pub validator: &'static (dyn Validator + Sync),
}

impl FieldRule {
    #[must_use]
    pub const fn new(field: &'static str, validator: &'static (dyn Validator + Sync)) -> Self {
        Self { field, validator }
    }

    #[must_use]
    pub fn kind(&self) -> &'static str {
        self.validator.kind()
    }
}

impl fmt::Debug for FieldRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldRule")
            .field("field", &self.field)
            .field("kind", &self.kind())
            .finish()
    }
}
