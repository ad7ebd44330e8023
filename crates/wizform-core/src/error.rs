use thiserror::Error as ThisError;

///
/// Error
///
/// Fatal, caller-facing failures. Rule failures are never reported here;
/// they are folded into the form's error collection instead.
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    Usage(#[from] UsageError),

    #[error(transparent)]
    UnknownAttribute(#[from] UnknownAttributeError),

    #[error(transparent)]
    Build(#[from] BuildError),
}

impl Error {
    #[must_use]
    pub const fn is_unknown_attribute(&self) -> bool {
        matches!(self, Self::UnknownAttribute(_))
    }

    #[must_use]
    pub const fn is_usage(&self) -> bool {
        matches!(self, Self::Usage(_))
    }
}

///
/// UsageError
///
/// Malformed arguments to a public operation. Raised at the call site,
/// before any registration or namespace state changes.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum UsageError {
    #[error("attribute name '{name}' must be an identifier")]
    InvalidAttributeName { name: String },

    #[error("prefix '{prefix}' must be an identifier")]
    InvalidPrefix { prefix: String },

    #[error("model '{path}' cannot be instantiated")]
    NotConstructible { path: &'static str },

    #[error("instance of '{found}' cannot join a group of '{expected}'")]
    InstanceModelMismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("attribute '{name}' does not hold a list of records")]
    MalformedCollection { name: String },

    #[error("attribute name '{name}' is reserved")]
    ReservedAttribute { name: String },

    #[error("attribute '{name}' cannot hold '{value}'")]
    InvalidValue { name: String, value: String },
}

///
/// UnknownAttributeError
///
/// A name with no accessor on the form. Kept apart from `UsageError` so
/// callers probing attribute existence can match on it directly.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[error("{name} is not a valid attribute of this form object")]
pub struct UnknownAttributeError {
    pub name: String,
}

impl UnknownAttributeError {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

///
/// BuildError
///
/// Namespace construction failures. Only reachable with a strict
/// collision policy; the default policy overwrites silently.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum BuildError {
    #[error("attribute '{name}' is declared more than once")]
    DuplicateAttribute { name: String },
}
