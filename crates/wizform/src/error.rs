use derive_more::Display;
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;
use wizform_core::error::{BuildError, Error as CoreError};

///
/// Error
/// Public error type with a stable kind + origin taxonomy.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize, ThisError)]
#[error("{message}")]
pub struct Error {
    pub kind: ErrorKind,
    pub origin: ErrorOrigin,
    pub message: String,
}

impl Error {
    pub fn new(kind: ErrorKind, origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self {
            kind,
            origin,
            message: message.into(),
        }
    }
}

impl From<CoreError> for Error {
    fn from(err: CoreError) -> Self {
        let message = err.to_string();

        match err {
            CoreError::Usage(_) => Self::new(ErrorKind::Usage, ErrorOrigin::Form, message),
            CoreError::UnknownAttribute(_) => {
                Self::new(ErrorKind::UnknownAttribute, ErrorOrigin::Form, message)
            }
            CoreError::Build(BuildError::DuplicateAttribute { .. }) => {
                Self::new(ErrorKind::DuplicateAttribute, ErrorOrigin::Namespace, message)
            }
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::new(ErrorKind::Serialize, ErrorOrigin::Session, err.to_string())
    }
}

///
/// ErrorKind
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
pub enum ErrorKind {
    /// Malformed arguments; a caller mistake.
    Usage,

    /// A name the form has no attribute for.
    UnknownAttribute,

    /// Two registrations produced one attribute under a strict policy.
    DuplicateAttribute,

    /// Session payload could not be encoded.
    Serialize,
}

///
/// ErrorOrigin
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
pub enum ErrorOrigin {
    Form,
    Namespace,
    Session,
}
