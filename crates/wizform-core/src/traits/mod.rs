use crate::{
    model::EntityModel,
    value::{FieldMap, Value},
    visitor::VisitorContext,
};
use std::fmt::Debug;
use thiserror::Error as ThisError;

// ============================================================================
// FOUNDATIONAL KINDS
// ============================================================================

///
/// Path
/// Fully-qualified type path, used as entity identity.
///

pub trait Path {
    const PATH: &'static str;
}

// ============================================================================
// ENTITY CAPABILITIES
// ============================================================================
//
// Everything the form needs from a backing entity: read fields by name,
// write fields by name, and a static model carrying the validation rules.
//

///
/// FieldValues
/// Read access to an entity's fields by name.
///

pub trait FieldValues {
    fn get_value(&self, field: &str) -> Option<Value>;
}

///
/// FieldAssign
/// Write access to an entity's fields by name.
///

pub trait FieldAssign {
    fn set_value(&mut self, field: &str, value: &Value) -> Result<(), FieldAssignError>;
}

///
/// FieldAssignError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum FieldAssignError {
    #[error("unknown field '{0}'")]
    UnknownField(String),

    #[error("field '{field}' cannot hold '{value}'")]
    TypeMismatch { field: String, value: String },
}

impl FieldAssignError {
    #[must_use]
    pub fn type_mismatch(field: &str, value: &Value) -> Self {
        Self::TypeMismatch {
            field: field.to_string(),
            value: value.to_string(),
        }
    }
}

///
/// EntityKind
///
/// Statically known entity type. `Default` provides the fresh instance
/// registered when a caller passes the type rather than a live value.
///

pub trait EntityKind: Path + FieldValues + FieldAssign + Debug + Default + 'static {
    const MODEL: &'static EntityModel;
}

///
/// Entity
///
/// Object-safe view of any entity. The registration ledger and the
/// validation delegator only ever see entities through this trait.
///

pub trait Entity: FieldValues + FieldAssign + Debug {
    fn model(&self) -> &'static EntityModel;

    /// Snapshot of every declared field, in declaration order.
    fn field_values(&self) -> FieldMap {
        self.model()
            .fields
            .iter()
            .map(|field| {
                let value = self.get_value(field).unwrap_or_default();
                ((*field).to_string(), value)
            })
            .collect()
    }
}

impl<E: EntityKind> Entity for E {
    fn model(&self) -> &'static EntityModel {
        E::MODEL
    }
}

// ============================================================================
// FIELD VALUE CONVERSION
// ============================================================================

///
/// FieldValue
///
/// Conversion boundary between a typed entity field and `Value`.
/// `from_value` coerces the way form submissions expect (numeric text
/// into integers, scalars into text); `None` means the value does not fit.
///

pub trait FieldValue {
    fn to_value(&self) -> Value;

    #[must_use]
    fn from_value(value: &Value) -> Option<Self>
    where
        Self: Sized;
}

impl FieldValue for String {
    fn to_value(&self) -> Value {
        Value::Text(self.clone())
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Text(v) => Some(v.clone()),
            Value::Bool(_) | Value::Int(_) | Value::Uint(_) | Value::Float(_) => {
                Some(value.to_string())
            }
            _ => None,
        }
    }
}

impl FieldValue for bool {
    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(v) => Some(*v),
            Value::Text(s) => match s.trim() {
                "true" | "1" => Some(true),
                "false" | "0" => Some(false),
                _ => None,
            },
            _ => None,
        }
    }
}

impl FieldValue for f64 {
    fn to_value(&self) -> Value {
        Value::Float(*self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        value.as_f64()
    }
}

impl FieldValue for Value {
    fn to_value(&self) -> Value {
        self.clone()
    }

    fn from_value(value: &Value) -> Option<Self> {
        Some(value.clone())
    }
}

impl FieldValue for FieldMap {
    fn to_value(&self) -> Value {
        Value::Record(self.clone())
    }

    fn from_value(value: &Value) -> Option<Self> {
        value.as_record().cloned()
    }
}

impl<T: FieldValue> FieldValue for Option<T> {
    fn to_value(&self) -> Value {
        match self {
            Some(v) => v.to_value(),
            None => Value::Null,
        }
    }

    fn from_value(value: &Value) -> Option<Self> {
        if value.is_null() {
            return Some(None);
        }

        match T::from_value(value) {
            Some(v) => Some(Some(v)),
            // blank text submitted for a non-text field reads as absent
            None if value.is_blank() => Some(None),
            None => None,
        }
    }
}

impl<T: FieldValue> FieldValue for Vec<T> {
    fn to_value(&self) -> Value {
        Value::List(self.iter().map(FieldValue::to_value).collect())
    }

    fn from_value(value: &Value) -> Option<Self> {
        let Value::List(items) = value else {
            return None;
        };

        items.iter().map(T::from_value).collect()
    }
}

/// Integral floats coerce into integer fields; anything else does not fit.
#[expect(clippy::cast_possible_truncation)]
fn integral(v: f64) -> Option<i64> {
    const LIMIT: f64 = 9_007_199_254_740_992.0; // 2^53

    (v.fract() == 0.0 && v.abs() <= LIMIT).then_some(v as i64)
}

// impl_field_value
macro_rules! impl_field_value {
    ( $( $type:ty => $variant:ident ),* $(,)? ) => {
        $(
            impl FieldValue for $type {
                fn to_value(&self) -> Value {
                    Value::$variant((*self).into())
                }

                fn from_value(value: &Value) -> Option<Self> {
                    match value {
                        Value::Int(v) => (*v).try_into().ok(),
                        Value::Uint(v) => (*v).try_into().ok(),
                        Value::Float(v) => integral(*v).and_then(|i| i.try_into().ok()),
                        Value::Text(s) => s.trim().parse().ok(),
                        _ => None,
                    }
                }
            }
        )*
    };
}

impl_field_value!(
    i8 => Int,
    i16 => Int,
    i32 => Int,
    i64 => Int,
    u8 => Uint,
    u16 => Uint,
    u32 => Uint,
    u64 => Uint,
);

// ============================================================================
// VALIDATION
// ============================================================================

///
/// Validator
///
/// One rule attached to one entity field. Rules report failures through
/// the context and never fail fast.
///

pub trait Validator {
    /// Rule family name, used to restrict a check to certain kinds.
    fn kind(&self) -> &'static str;

    fn validate(&self, value: &Value, ctx: &mut dyn VisitorContext);

    /// Validate `field` against the whole record. Cross-field rules
    /// override this; the default only looks at the field itself.
    fn validate_record(
        &self,
        field: &str,
        record: &dyn FieldValues,
        ctx: &mut dyn VisitorContext,
    ) {
        let value = record.get_value(field).unwrap_or_default();
        self.validate(&value, ctx);
    }
}
