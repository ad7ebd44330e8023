//! ## Crate layout
//! - `core`: values, entity models and rules, and the form aggregate.
//! - `config`: process-wide settings for the session layer.
//! - `error`: public error type with a stable kind + origin taxonomy.
//! - `session`: moves the in-progress form between wizard steps.
//!
//! Backing entities are declared with the `entity!` macro; forms are
//! built with `Form::create_form`.

pub use wizform_core as core;
pub use wizform_core::entity;

pub mod config;
pub mod error;
pub mod session;

pub use error::Error;

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        config::{Config, StoreLocation, configuration, configure},
        core::{
            form::{CollisionPolicy, Errors, FormBuilder},
            prelude::*,
            validator::*,
        },
        session::{MemoryStore, SessionStore, WizardSession},
    };
}
