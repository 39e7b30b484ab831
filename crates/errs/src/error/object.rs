//! Error Object - Canonical error value
//!
//! Defines [`ErrorObject`], the single shape every input is normalized into,
//! and the [`Properties`] record type used for extra attributes.

use std::error::Error;
use std::fmt;

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;

use super::trace::Trace;

/// エラーに付与する追加属性（JSON オブジェクト）
pub type Properties = serde_json::Map<String, Value>;

/// 基底エラー種別の名前
pub const BASE_NAME: &str = "Error";

/// 正規化済みエラー型
///
/// あらゆる入力はこの型に正規化されます。
/// [`Errs::create`](crate::Errs::create) が返す値は、空でない名前と空でないスタックを必ず持ちます。
///
/// ## Fields
/// * `name` - エラー種別名（型なしエラーは `"Error"`）
/// * `message` - 人が読むためのメッセージ
/// * `stack` - 呼び出しトレース（取得済みの場合）
/// * `properties` - 入力レコードからコピーされた追加属性
///
/// ## Examples
/// ```rust
/// use errs::ErrorObject;
///
/// let err = ErrorObject::new("Disk full")
///     .with_name("StorageError")
///     .with_property("status", 507);
///
/// assert_eq!(err.to_string(), "StorageError: Disk full");
/// assert_eq!(err.get("status"), Some(&serde_json::json!(507)));
/// ```
#[derive(Clone, PartialEq)]
pub struct ErrorObject {
    name: String,
    message: String,
    stack: Option<Trace>,
    properties: Properties,
}

impl ErrorObject {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// スタックを持たない基底エラーを作成
    ///
    /// ## Arguments
    /// * `message` - エラーメッセージ
    #[inline]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            name: BASE_NAME.to_owned(),
            message: message.into(),
            stack: None,
            properties: Properties::new(),
        }
    }

    /// 属性レコードからエラーを作成
    ///
    /// `name`・`message`・`stack` はレコードから読み取り（スタックはテキストから解析）、
    /// その他のキーは追加属性になります。
    ///
    /// ## Arguments
    /// * `record` - エラーの属性レコード
    pub fn from_record(record: Properties) -> Self {
        let mut error = Self::new(String::new());
        for (key, value) in record {
            error.set_property(key, value);
        }
        error
    }

    // ========================================================================
    // Builder methods
    // ========================================================================

    #[inline]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    #[inline]
    pub fn with_stack(mut self, stack: Trace) -> Self {
        self.stack = Some(stack);
        self
    }

    /// 属性を設定（[`ErrorObject::set_property`] 参照）
    #[inline]
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set_property(key.into(), value.into());
        self
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[inline]
    pub fn stack(&self) -> Option<&Trace> {
        self.stack.as_ref()
    }

    #[inline]
    pub fn has_stack(&self) -> bool {
        self.stack.is_some()
    }

    /// テキスト化したスタック
    ///
    /// `"<name>: <message>"` の後にフレームごとの `at …` 行が続きます。
    pub fn stack_text(&self) -> Option<String> {
        let stack = self.stack.as_ref()?;
        if stack.is_empty() {
            Some(self.to_string())
        } else {
            Some(format!("{self}\n{stack}"))
        }
    }

    /// 追加属性（`name`・`message`・`stack` を除く）
    #[inline]
    pub fn properties(&self) -> &Properties {
        &self.properties
    }

    /// 追加属性を取得
    #[inline]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }

    /// 全属性をひとつのレコードとして取得（スタックはテキスト化）
    pub fn to_record(&self) -> Properties {
        let mut record = Properties::new();
        record.insert("name".to_owned(), Value::String(self.name.clone()));
        record.insert("message".to_owned(), Value::String(self.message.clone()));
        if let Some(stack) = self.stack_text() {
            record.insert("stack".to_owned(), Value::String(stack));
        }
        for (key, value) in &self.properties {
            record.insert(key.clone(), value.clone());
        }
        record
    }

    // ========================================================================
    // Mutators
    // ========================================================================

    #[inline]
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    #[inline]
    pub fn set_stack(&mut self, stack: Trace) {
        self.stack = Some(stack);
    }

    #[inline]
    pub fn stack_mut(&mut self) -> Option<&mut Trace> {
        self.stack.as_mut()
    }

    /// キーを指定して属性を設定
    ///
    /// `name` と `message` はテキストとして、`stack` はテキストから解析して格納し、
    /// その他のキーは追加属性として保持します。
    ///
    /// ## Arguments
    /// * `key` - 属性名
    /// * `value` - 属性値
    pub fn set_property(&mut self, key: String, value: Value) {
        match key.as_str() {
            "name" => self.name = value_text(value),
            "message" => self.message = value_text(value),
            "stack" => self.stack = Some(Trace::parse(&value_text(value))),
            _ => {
                self.properties.insert(key, value);
            }
        }
    }
}

/// JSON 値を属性テキストに変換
///
/// 文字列はそのまま、`null` は空文字列、それ以外は JSON 表現になります。
pub(crate) fn value_text(value: Value) -> String {
    match value {
        Value::String(text) => text,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

impl fmt::Debug for ErrorObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut builder = f.debug_struct("ErrorObject");
        builder.field("name", &self.name);
        builder.field("message", &self.message);
        if let Some(stack) = &self.stack {
            builder.field("stack", stack);
        }
        if !self.properties.is_empty() {
            builder.field("properties", &self.properties);
        }
        builder.finish()
    }
}

impl fmt::Display for ErrorObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.message.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}: {}", self.name, self.message)
        }
    }
}

impl Error for ErrorObject {}

impl Serialize for ErrorObject {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let stack = self.stack_text();
        let len = 2 + usize::from(stack.is_some()) + self.properties.len();
        let mut map = serializer.serialize_map(Some(len))?;
        map.serialize_entry("name", &self.name)?;
        map.serialize_entry("message", &self.message)?;
        if let Some(stack) = &stack {
            map.serialize_entry("stack", stack)?;
        }
        for (key, value) in &self.properties {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::trace::{Frame, SourceLocation};
    use serde_json::json;

    fn sample_trace() -> Trace {
        Trace::new(vec![Frame::at(SourceLocation::new("src/main.rs", 4, 2))])
    }

    #[test]
    fn test_new_error() {
        let err = ErrorObject::new("boom");
        assert_eq!(err.name(), "Error");
        assert_eq!(err.message(), "boom");
        assert!(!err.has_stack());
        assert!(err.properties().is_empty());
    }

    #[test]
    fn test_display() {
        assert_eq!(ErrorObject::new("boom").to_string(), "Error: boom");
        assert_eq!(ErrorObject::new("").with_name("Empty").to_string(), "Empty");
    }

    #[test]
    fn test_stack_text() {
        let err = ErrorObject::new("boom").with_name("NamedError").with_stack(sample_trace());
        assert_eq!(
            err.stack_text().as_deref(),
            Some("NamedError: boom\n    at src/main.rs:4:2")
        );
        assert_eq!(ErrorObject::new("boom").stack_text(), None);
    }

    #[test]
    fn test_set_property_reserved_keys() {
        let mut err = ErrorObject::new("boom");
        err.set_property("name".to_owned(), json!("Custom"));
        err.set_property("message".to_owned(), json!(42));
        err.set_property("stack".to_owned(), json!("Custom: 42\n    at src/lib.rs:1:1"));
        err.set_property("status".to_owned(), json!(404));

        assert_eq!(err.name(), "Custom");
        assert_eq!(err.message(), "42");
        assert_eq!(
            err.stack().unwrap().frames(),
            &[Frame::at(SourceLocation::new("src/lib.rs", 1, 1))]
        );
        assert_eq!(err.get("status"), Some(&json!(404)));
        assert!(err.get("name").is_none());
    }

    #[test]
    fn test_record_roundtrip() {
        let err = ErrorObject::new("boom")
            .with_name("NamedError")
            .with_stack(sample_trace())
            .with_property("testing", true);

        let restored = ErrorObject::from_record(err.to_record());
        assert_eq!(restored, err);
    }

    #[test]
    fn test_serialize() {
        let err = ErrorObject::new("boom").with_stack(sample_trace()).with_property("status", 404);
        let value = serde_json::to_value(&err).unwrap();
        assert_eq!(
            value,
            json!({
                "name": "Error",
                "message": "boom",
                "stack": "Error: boom\n    at src/main.rs:4:2",
                "status": 404,
            })
        );
    }
}
