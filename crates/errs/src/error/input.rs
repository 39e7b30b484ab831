//! Error Input - Accepted input shapes
//!
//! [`ErrorInput`] lists every shape the normalizer understands. Conversions
//! from common Rust and JSON values live in
//! [`conversions`](super::conversions).

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use super::object::{ErrorObject, Properties};

/// Deferred input, evaluated once during normalization
pub type ErrorFactory = Box<dyn FnOnce() -> ErrorInput + Send>;

/// Input to [`Errs::create`](crate::Errs::create)
///
/// ## Examples
/// ```rust
/// use errs::ErrorInput;
/// use serde_json::json;
///
/// assert!(matches!(ErrorInput::from("Disk full"), ErrorInput::Message(_)));
/// assert!(matches!(ErrorInput::from(["Disk", "full"]), ErrorInput::Words(_)));
/// assert!(matches!(ErrorInput::from(json!({ "status": 507 })), ErrorInput::Record(_)));
/// assert!(matches!(ErrorInput::factory(|| "later"), ErrorInput::Factory(_)));
/// ```
#[derive(Default)]
pub enum ErrorInput {
    /// No input at all
    #[default]
    Empty,
    /// Message text
    Message(String),
    /// Message words, joined with the configured separator
    Words(Vec<String>),
    /// Attribute record; `message` is the message, every key is copied
    Record(Properties),
    /// Produces the actual input when evaluated
    Factory(ErrorFactory),
    /// Already-built error; passed through untouched when it carries a stack
    Error(Arc<ErrorObject>),
    /// Any other JSON value (numbers, booleans)
    Other(Value),
}

impl ErrorInput {
    /// Wrap a closure as a [`ErrorInput::Factory`]
    pub fn factory<F, T>(factory: F) -> Self
    where
        F: FnOnce() -> T + Send + 'static,
        T: Into<ErrorInput>,
    {
        Self::Factory(Box::new(move || factory().into()))
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Short name of the shape, for logging
    pub const fn shape(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Message(_) => "message",
            Self::Words(_) => "words",
            Self::Record(_) => "record",
            Self::Factory(_) => "factory",
            Self::Error(_) => "error",
            Self::Other(_) => "other",
        }
    }
}

impl fmt::Debug for ErrorInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("Empty"),
            Self::Message(message) => f.debug_tuple("Message").field(message).finish(),
            Self::Words(words) => f.debug_tuple("Words").field(words).finish(),
            Self::Record(record) => f.debug_tuple("Record").field(record).finish(),
            Self::Factory(_) => f.write_str("Factory(..)"),
            Self::Error(error) => f.debug_tuple("Error").field(error).finish(),
            Self::Other(value) => f.debug_tuple("Other").field(value).finish(),
        }
    }
}
