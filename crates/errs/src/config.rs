//! Normalizer Configuration

use std::borrow::Cow;

/// Message used when an input carries no usable message
pub const UNSPECIFIED_MESSAGE: &str = "Unspecified error";

/// Separator used to join word-list inputs
pub const WORD_SEPARATOR: &str = " ";

/// Normalizer configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrsConfig {
    /// Message for inputs without one
    pub fallback_message: Cow<'static, str>,
    /// Separator for word-list inputs
    pub word_separator: Cow<'static, str>,
}

impl Default for ErrsConfig {
    fn default() -> Self {
        Self {
            fallback_message: Cow::Borrowed(UNSPECIFIED_MESSAGE),
            word_separator: Cow::Borrowed(WORD_SEPARATOR),
        }
    }
}

impl ErrsConfig {
    pub fn with_fallback_message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        self.fallback_message = message.into();
        self
    }

    pub fn with_word_separator(mut self, separator: impl Into<Cow<'static, str>>) -> Self {
        self.word_separator = separator.into();
        self
    }
}
