//! errs - Error creation and passing utilities
//!
//! Turns loosely shaped error inputs into one canonical [`ErrorObject`]:
//! - Strings, word lists, JSON records and factories are normalized by [`Errs::create`]
//! - Named error kinds are looked up in a [`Registry`]
//! - [`Errs::handle`] either passes the error to a continuation or
//!   delivers it through a one-shot [`Notification`]
//!
//! **Design Principle**: normalization never fails. Unrecognized shapes
//! degrade to a fallback message instead of producing a second error.
//!
//! ## Examples
//! ```rust
//! use errs::{ErrorKind, Errs};
//! use serde_json::json;
//!
//! let errs = Errs::new();
//! errs.register_as("named", ErrorKind::new("NamedError"));
//!
//! let err = errs.create_kind("named", json!({ "message": "boom", "status": 500 }));
//! assert_eq!(err.name(), "NamedError");
//! assert_eq!(err.message(), "boom");
//! assert_eq!(err.get("status"), Some(&json!(500)));
//! ```

pub mod error {
    pub mod conversions;
    pub mod input;
    pub mod kind;
    pub mod object;
    pub mod trace;
}
pub mod config;
pub mod dispatch;
pub mod global;
pub mod normalize;
pub mod registry;

pub use config::ErrsConfig;
pub use dispatch::Notification;
pub use error::{
    input::ErrorInput,
    kind::{BaseError, ErrorConstructor, ErrorKind},
    object::{ErrorObject, Properties},
    trace::{Frame, SourceLocation, Trace},
};
pub use global::{
    create, create_kind, default_errs, handle, handle_with, register, register_as, unregister,
};
pub use normalize::Errs;
pub use registry::{Registry, RegistryError, SharedConstructor};
