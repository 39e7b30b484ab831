//! Input conversions - From implementations into [`ErrorInput`]
//!
//! Lets callers pass plain Rust values, JSON values and common error types
//! straight to `create` / `handle`.

use std::sync::Arc;

use serde_json::Value;

use super::input::ErrorInput;
use super::object::{ErrorObject, Properties};

// ============================================================================
// Text and word lists
// ============================================================================

impl From<()> for ErrorInput {
    fn from(_: ()) -> Self {
        ErrorInput::Empty
    }
}

impl From<&str> for ErrorInput {
    fn from(message: &str) -> Self {
        ErrorInput::Message(message.to_owned())
    }
}

impl From<String> for ErrorInput {
    fn from(message: String) -> Self {
        ErrorInput::Message(message)
    }
}

impl From<Vec<String>> for ErrorInput {
    fn from(words: Vec<String>) -> Self {
        ErrorInput::Words(words)
    }
}

impl From<Vec<&str>> for ErrorInput {
    fn from(words: Vec<&str>) -> Self {
        ErrorInput::Words(words.into_iter().map(str::to_owned).collect())
    }
}

impl<const N: usize> From<[&str; N]> for ErrorInput {
    fn from(words: [&str; N]) -> Self {
        ErrorInput::Words(words.iter().map(|word| (*word).to_owned()).collect())
    }
}

impl<T> From<Option<T>> for ErrorInput
where
    T: Into<ErrorInput>,
{
    fn from(input: Option<T>) -> Self {
        input.map_or(ErrorInput::Empty, Into::into)
    }
}

// ============================================================================
// Errors
// ============================================================================

impl From<ErrorObject> for ErrorInput {
    fn from(error: ErrorObject) -> Self {
        ErrorInput::Error(Arc::new(error))
    }
}

impl From<Arc<ErrorObject>> for ErrorInput {
    fn from(error: Arc<ErrorObject>) -> Self {
        ErrorInput::Error(error)
    }
}

impl From<&Arc<ErrorObject>> for ErrorInput {
    fn from(error: &Arc<ErrorObject>) -> Self {
        ErrorInput::Error(Arc::clone(error))
    }
}

// ============================================================================
// serde_json conversions
// ============================================================================

impl From<Properties> for ErrorInput {
    fn from(record: Properties) -> Self {
        if record.get("stack").is_some_and(is_truthy) {
            ErrorInput::Error(Arc::new(ErrorObject::from_record(record)))
        } else {
            ErrorInput::Record(record)
        }
    }
}

impl From<Value> for ErrorInput {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => ErrorInput::Empty,
            Value::String(message) => ErrorInput::Message(message),
            Value::Array(items) => ErrorInput::Words(items.into_iter().map(word_text).collect()),
            Value::Object(record) => record.into(),
            other @ (Value::Bool(_) | Value::Number(_)) => ErrorInput::Other(other),
        }
    }
}

/// Render an array element the way it appears in a joined message
fn word_text(value: Value) -> String {
    match value {
        Value::String(text) => text,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Whether a JSON value counts as present (`null`, `false`, `0` and `""`
/// do not)
pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

impl From<serde_json::Error> for ErrorInput {
    fn from(err: serde_json::Error) -> Self {
        let category = match err.classify() {
            serde_json::error::Category::Io => "io",
            serde_json::error::Category::Syntax => "syntax",
            serde_json::error::Category::Data => "data",
            serde_json::error::Category::Eof => "eof",
        };
        let mut record = Properties::new();
        record.insert("message".to_owned(), Value::String(err.to_string()));
        record.insert("category".to_owned(), Value::from(category));
        record.insert("line".to_owned(), Value::from(err.line()));
        record.insert("column".to_owned(), Value::from(err.column()));
        ErrorInput::Record(record)
    }
}

// ============================================================================
// Standard library conversions
// ============================================================================

impl From<std::io::Error> for ErrorInput {
    fn from(err: std::io::Error) -> Self {
        let mut record = Properties::new();
        record.insert("message".to_owned(), Value::String(err.to_string()));
        record.insert("code".to_owned(), Value::String(format!("{:?}", err.kind())));
        ErrorInput::Record(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_conversions() {
        assert!(matches!(ErrorInput::from(()), ErrorInput::Empty));
        assert!(matches!(ErrorInput::from("boom"), ErrorInput::Message(m) if m == "boom"));
        assert!(matches!(ErrorInput::from(None::<&str>), ErrorInput::Empty));
        assert!(matches!(ErrorInput::from(Some("boom")), ErrorInput::Message(m) if m == "boom"));

        let ErrorInput::Words(words) = ErrorInput::from(vec!["a", "b"]) else {
            panic!("expected words");
        };
        assert_eq!(words, ["a", "b"]);
    }

    #[test]
    fn test_json_value_conversion() {
        assert!(matches!(ErrorInput::from(json!(null)), ErrorInput::Empty));
        assert!(matches!(ErrorInput::from(json!("boom")), ErrorInput::Message(_)));
        assert!(matches!(ErrorInput::from(json!(404)), ErrorInput::Other(_)));
        assert!(matches!(ErrorInput::from(json!(true)), ErrorInput::Other(_)));
        assert!(matches!(ErrorInput::from(json!({ "foo": "bar" })), ErrorInput::Record(_)));

        let ErrorInput::Words(words) = ErrorInput::from(json!(["status", 404, null, true])) else {
            panic!("expected words");
        };
        assert_eq!(words, ["status", "404", "", "true"]);
    }

    #[test]
    fn test_record_with_stack_is_error() {
        let input = ErrorInput::from(json!({
            "name": "NamedError",
            "message": "boom",
            "stack": "NamedError: boom\n    at src/main.rs:1:1",
            "status": 500,
        }));
        let ErrorInput::Error(error) = input else {
            panic!("expected error");
        };
        assert_eq!(error.name(), "NamedError");
        assert_eq!(error.message(), "boom");
        assert_eq!(error.stack().map(|s| s.len()), Some(1));
        assert_eq!(error.get("status"), Some(&json!(500)));

        // an empty stack does not make a record an error
        assert!(matches!(
            ErrorInput::from(json!({ "stack": "" })),
            ErrorInput::Record(_)
        ));
    }

    #[test]
    fn test_is_truthy() {
        assert!(!is_truthy(&json!(null)));
        assert!(!is_truthy(&json!(false)));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!(0.0)));
        assert!(!is_truthy(&json!("")));
        assert!(is_truthy(&json!(1)));
        assert!(is_truthy(&json!("x")));
        assert!(is_truthy(&json!([])));
        assert!(is_truthy(&json!({})));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let ErrorInput::Record(record) = ErrorInput::from(io_err) else {
            panic!("expected record");
        };
        assert_eq!(record.get("message"), Some(&json!("file not found")));
        assert_eq!(record.get("code"), Some(&json!("NotFound")));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<Value>("invalid json").unwrap_err();
        let ErrorInput::Record(record) = ErrorInput::from(json_err) else {
            panic!("expected record");
        };
        assert_eq!(record.get("category"), Some(&json!("syntax")));
        assert_eq!(record.get("line"), Some(&json!(1)));
    }
}
