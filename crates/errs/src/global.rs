//! Process-wide default context
//!
//! Free functions mirroring [`Errs`] for code that does not carry its own
//! context. All of them share one lazily created registry.

use std::sync::Arc;

use lazy_static::lazy_static;

use crate::dispatch::Notification;
use crate::error::input::ErrorInput;
use crate::error::kind::ErrorConstructor;
use crate::error::object::ErrorObject;
use crate::normalize::Errs;
use crate::registry::{RegistryError, SharedConstructor};

lazy_static! {
    static ref DEFAULT: Errs = Errs::new();
}

/// The process-wide default context
#[inline]
pub fn default_errs() -> &'static Errs {
    &DEFAULT
}

/// Register on the default context, see [`Errs::register`]
pub fn register<C>(constructor: C) -> Result<String, RegistryError>
where
    C: ErrorConstructor + 'static,
{
    DEFAULT.register(constructor)
}

/// Register on the default context, see [`Errs::register_as`]
pub fn register_as<C>(name: impl Into<String>, constructor: C) -> Option<SharedConstructor>
where
    C: ErrorConstructor + 'static,
{
    DEFAULT.register_as(name, constructor)
}

/// Unregister from the default context, see [`Errs::unregister`]
pub fn unregister(name: &str) -> Option<SharedConstructor> {
    DEFAULT.unregister(name)
}

/// Create on the default context, see [`Errs::create`]
#[track_caller]
pub fn create(input: impl Into<ErrorInput>) -> Arc<ErrorObject> {
    DEFAULT.create(input)
}

/// Create on the default context, see [`Errs::create_kind`]
#[track_caller]
pub fn create_kind(kind: &str, input: impl Into<ErrorInput>) -> Arc<ErrorObject> {
    DEFAULT.create_kind(kind, input)
}

/// Handle on the default context, see [`Errs::handle`]
#[track_caller]
pub fn handle(input: impl Into<ErrorInput>) -> Notification {
    DEFAULT.handle(input)
}

/// Handle on the default context, see [`Errs::handle_with`]
#[track_caller]
pub fn handle_with<F, R>(input: impl Into<ErrorInput>, callback: F) -> R
where
    F: FnOnce(Arc<ErrorObject>) -> R,
{
    DEFAULT.handle_with(input, callback)
}
