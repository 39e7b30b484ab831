//! Error Kind Registry
//!
//! Maps type names to [`ErrorConstructor`]s. Names are case-sensitive and
//! the last registration for a name wins.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use thiserror::Error;

use crate::error::kind::ErrorConstructor;

/// レジストリに格納されるコンストラクタ
pub type SharedConstructor = Arc<dyn ErrorConstructor>;

/// レジストリ操作のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// キーが指定されず、コンストラクタも宣言名を持たない
    #[error("error constructor declares no name; register it under an explicit name")]
    AnonymousConstructor,
}

/// 名前 → コンストラクタの対応表
///
/// ## Examples
/// ```rust
/// use errs::{ErrorKind, Registry};
///
/// let registry = Registry::new();
/// registry.register_as("named", ErrorKind::new("NamedError"));
/// assert_eq!(registry.register(ErrorKind::new("AnError")), Ok("anerror".to_owned()));
///
/// assert_eq!(registry.names(), ["anerror", "named"]);
/// registry.unregister("named");
/// assert!(!registry.contains("named"));
/// ```
#[derive(Default)]
pub struct Registry {
    kinds: RwLock<HashMap<String, SharedConstructor>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 宣言名の小文字をキーとしてコンストラクタを登録
    ///
    /// 登録したキーを返します。
    ///
    /// ## Arguments
    /// * `constructor` - 登録するコンストラクタ（宣言名が必須）
    pub fn register<C>(&self, constructor: C) -> Result<String, RegistryError>
    where
        C: ErrorConstructor + 'static,
    {
        let key = constructor
            .declared_name()
            .map(str::to_lowercase)
            .ok_or(RegistryError::AnonymousConstructor)?;
        self.register_as(key.clone(), constructor);
        Ok(key)
    }

    /// `name` をキーとしてコンストラクタを登録（既存の登録は置き換え）
    ///
    /// 置き換えられたコンストラクタがあれば返します。
    ///
    /// ## Arguments
    /// * `name` - 登録キー
    /// * `constructor` - 登録するコンストラクタ
    pub fn register_as<C>(&self, name: impl Into<String>, constructor: C) -> Option<SharedConstructor>
    where
        C: ErrorConstructor + 'static,
    {
        self.insert(name.into(), Arc::new(constructor))
    }

    /// 共有済みのコンストラクタを `name` で登録
    pub fn insert(&self, name: String, constructor: SharedConstructor) -> Option<SharedConstructor> {
        tracing::debug!(
            kind = %name,
            declared_name = constructor.declared_name().unwrap_or_default(),
            "Registered error kind"
        );
        self.kinds.write().insert(name, constructor)
    }

    /// `name` の登録を削除（未登録の名前は無視）
    pub fn unregister(&self, name: &str) -> Option<SharedConstructor> {
        let removed = self.kinds.write().remove(name);
        if removed.is_some() {
            tracing::debug!(kind = %name, "Unregistered error kind");
        }
        removed
    }

    pub fn get(&self, name: &str) -> Option<SharedConstructor> {
        self.kinds.read().get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.kinds.read().contains_key(name)
    }

    /// 登録済みの名前（ソート済み）
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.kinds.read().keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.kinds.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.read().is_empty()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("kinds", &self.names())
            .finish()
    }
}
