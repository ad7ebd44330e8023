//! Core runtime for Wizform: values, entity capability traits, entity models
//! and rules, and the form aggregate that folds many backing entities into one
//! flat, validated attribute namespace.
#![warn(unreachable_pub)]

extern crate self as wizform_core;

#[macro_use]
mod macros;

// public exports are one module level down
pub mod error;
pub mod form;
pub mod model;
pub mod naming;
pub mod traits;
pub mod validate;
pub mod validator;
pub mod value;
pub mod visitor;

// test
#[cfg(test)]
pub(crate) mod test_support;

pub use error::Error;

///
/// CONSTANTS
///

/// Step marker that counts as "past every step" for step-conditional checks.
pub const FINISH_STEP: &str = "wicked_finish";

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No errors, builders, or helpers are re-exported here.
///

pub mod prelude {
    pub use crate::{
        form::{Form, FormKind},
        model::{EntityModel, FieldRule},
        traits::{Entity, EntityKind, FieldAssign, FieldValue, FieldValues, Path},
        value::{FieldMap, Value},
    };
}
