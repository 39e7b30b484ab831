//! Error Kind - Constructor capability for named errors
//!
//! Defines the [`ErrorConstructor`] trait the registry stores, the
//! [`BaseError`] constructor used for untyped errors, and [`ErrorKind`], a
//! ready-made constructor for declaring named error kinds.

use std::borrow::Cow;
use std::sync::Arc;

use serde_json::Value;

use super::object::{BASE_NAME, ErrorObject, Properties};
use super::trace::Trace;

/// メッセージからエラーを構築する能力
///
/// `trace` はこの構築時に取得したトレースです。実装はエラーに付与しても破棄しても構いません。
/// トレースを持たないエラーには正規化時に新しいトレースが付与されます。
pub trait ErrorConstructor: Send + Sync {
    /// エラーに付ける宣言名（例: `"NamedError"`）
    fn declared_name(&self) -> Option<&str>;

    /// `message` を持つ新しいエラーを構築
    ///
    /// ## Arguments
    /// * `message` - エラーメッセージ
    /// * `trace` - 構築時のトレース
    fn construct(&self, message: String, trace: Trace) -> ErrorObject;
}

impl<C> ErrorConstructor for Arc<C>
where
    C: ErrorConstructor + ?Sized,
{
    fn declared_name(&self) -> Option<&str> {
        (**self).declared_name()
    }

    fn construct(&self, message: String, trace: Trace) -> ErrorObject {
        (**self).construct(message, trace)
    }
}

impl<C> ErrorConstructor for Box<C>
where
    C: ErrorConstructor + ?Sized,
{
    fn declared_name(&self) -> Option<&str> {
        (**self).declared_name()
    }

    fn construct(&self, message: String, trace: Trace) -> ErrorObject {
        (**self).construct(message, trace)
    }
}

// ============================================================================
// BaseError
// ============================================================================

/// 型なしエラー（`name == "Error"`）のコンストラクタ
///
/// 渡されたトレースを常に保持します。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BaseError;

impl ErrorConstructor for BaseError {
    fn declared_name(&self) -> Option<&str> {
        Some(BASE_NAME)
    }

    fn construct(&self, message: String, trace: Trace) -> ErrorObject {
        ErrorObject::new(message).with_stack(trace)
    }
}

// ============================================================================
// ErrorKind
// ============================================================================

/// 宣言的な名前付きエラー種別
///
/// 構築直後は基底エラーで、正規化時に宣言名へ改名されます。
/// デフォルト属性は呼び出し側の属性より先に設定されます。
///
/// ## Examples
/// ```rust
/// use errs::{ErrorKind, Errs};
///
/// let errs = Errs::new();
/// let key = errs.register(ErrorKind::new("NotFoundError").with_default("status", 404))?;
/// assert_eq!(key, "notfounderror");
///
/// let err = errs.create_kind("notfounderror", "No such user");
/// assert_eq!(err.name(), "NotFoundError");
/// assert_eq!(err.get("status"), Some(&serde_json::json!(404)));
/// # Ok::<(), errs::RegistryError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ErrorKind {
    name: Option<Cow<'static, str>>,
    defaults: Properties,
    keep_trace: bool,
}

impl ErrorKind {
    /// `name` を宣言する種別を作成
    ///
    /// ## Arguments
    /// * `name` - 宣言名（例: `"NamedError"`）
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: Some(name.into()),
            defaults: Properties::new(),
            keep_trace: true,
        }
    }

    /// 宣言名を持たない種別（エラーは基底名のまま）
    pub fn anonymous() -> Self {
        Self {
            keep_trace: true,
            ..Self::default()
        }
    }

    /// この種別の全エラーに設定する属性を追加
    ///
    /// ## Arguments
    /// * `key` - 属性名
    /// * `value` - 属性値
    pub fn with_default(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.defaults.insert(key.into(), value.into());
        self
    }

    /// 構築時のトレースを破棄（正規化時に呼び出し元を起点とするトレースが付与される）
    pub fn without_trace(mut self) -> Self {
        self.keep_trace = false;
        self
    }
}

impl ErrorConstructor for ErrorKind {
    fn declared_name(&self) -> Option<&str> {
        self.name.as_deref().filter(|name| !name.is_empty())
    }

    fn construct(&self, message: String, trace: Trace) -> ErrorObject {
        let mut error = ErrorObject::new(message);
        for (key, value) in &self.defaults {
            error.set_property(key.clone(), value.clone());
        }
        if self.keep_trace {
            error.set_stack(trace);
        }
        error
    }
}
