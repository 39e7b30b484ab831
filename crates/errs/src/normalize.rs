//! Normalizer - Builds canonical errors from loose inputs
//!
//! [`Errs`] is the context object tying a [`Registry`] and an
//! [`ErrsConfig`] together. `create` resolves an input in a fixed order:
//!
//! 1. Errors that already carry a non-empty stack are returned as-is
//! 2. Factories are evaluated once
//! 3. A message (and optional property record) is extracted by shape
//! 4. The constructor is the registered kind, or [`BaseError`]
//! 5. The new error is renamed after its constructor if still unnamed
//! 6. The trace is trimmed of the normalizer's frame, or rooted at the caller
//! 7. Record properties are copied over the new error

use std::panic::Location;
use std::sync::Arc;

use crate::config::ErrsConfig;
use crate::error::conversions::is_truthy;
use crate::error::input::ErrorInput;
use crate::error::kind::{BaseError, ErrorConstructor};
use crate::error::object::{BASE_NAME, ErrorObject, Properties, value_text};
use crate::error::trace::Trace;
use crate::registry::{Registry, RegistryError, SharedConstructor};

/// Error creation context
///
/// Owns (or shares) the registry consulted for named kinds.
///
/// ## Examples
/// ```rust
/// use errs::Errs;
/// use serde_json::json;
///
/// let errs = Errs::new();
/// let err = errs.create(json!({ "foo": "bar", "status": 404 }));
///
/// assert_eq!(err.name(), "Error");
/// assert_eq!(err.message(), "Unspecified error");
/// assert_eq!(err.get("status"), Some(&json!(404)));
/// assert!(err.has_stack());
/// ```
#[derive(Debug, Default)]
pub struct Errs {
    registry: Arc<Registry>,
    config: ErrsConfig,
}

impl Errs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ErrsConfig) -> Self {
        Self {
            registry: Arc::default(),
            config,
        }
    }

    /// Context backed by a registry shared with other contexts
    pub fn with_registry(registry: Arc<Registry>) -> Self {
        Self {
            registry,
            config: ErrsConfig::default(),
        }
    }

    #[inline]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    #[inline]
    pub fn shared_registry(&self) -> Arc<Registry> {
        Arc::clone(&self.registry)
    }

    #[inline]
    pub fn config(&self) -> &ErrsConfig {
        &self.config
    }

    // ========================================================================
    // Registry shortcuts
    // ========================================================================

    /// See [`Registry::register`]
    pub fn register<C>(&self, constructor: C) -> Result<String, RegistryError>
    where
        C: ErrorConstructor + 'static,
    {
        self.registry.register(constructor)
    }

    /// See [`Registry::register_as`]
    pub fn register_as<C>(&self, name: impl Into<String>, constructor: C) -> Option<SharedConstructor>
    where
        C: ErrorConstructor + 'static,
    {
        self.registry.register_as(name, constructor)
    }

    /// See [`Registry::unregister`]
    pub fn unregister(&self, name: &str) -> Option<SharedConstructor> {
        self.registry.unregister(name)
    }

    // ========================================================================
    // Creation
    // ========================================================================

    /// Normalize `input` into an untyped error
    #[track_caller]
    pub fn create(&self, input: impl Into<ErrorInput>) -> Arc<ErrorObject> {
        self.build(None, input.into(), Location::caller())
    }

    /// Normalize `input` into an error of the registered `kind`
    ///
    /// Unregistered kinds fall back to the base error. Without input, an
    /// unregistered `kind` is taken as the message itself.
    #[track_caller]
    pub fn create_kind(&self, kind: &str, input: impl Into<ErrorInput>) -> Arc<ErrorObject> {
        let input = input.into();
        if input.is_empty() && !self.registry.contains(kind) {
            return self.build(None, ErrorInput::Message(kind.to_owned()), Location::caller());
        }
        self.build(Some(kind), input, Location::caller())
    }

    fn build(
        &self,
        kind: Option<&str>,
        input: ErrorInput,
        caller: &'static Location<'static>,
    ) -> Arc<ErrorObject> {
        tracing::trace!(shape = input.shape(), kind, "Normalizing error input");

        let input = match input {
            ErrorInput::Error(error) if error.stack().is_some_and(|stack| !stack.is_empty()) => {
                return error;
            }
            ErrorInput::Factory(factory) => factory(),
            other => other,
        };
        let (message, overlay) = self.extract(input);

        let registered = kind.and_then(|name| {
            let constructor = self.registry.get(name);
            if constructor.is_none() {
                tracing::debug!(kind = name, "Error kind not registered, using base error");
            }
            constructor
        });
        let constructor: &dyn ErrorConstructor = match &registered {
            Some(constructor) => &**constructor,
            None => &BaseError,
        };

        let mut error = constructor.construct(message, Trace::for_construction(caller));

        if error.name().is_empty() || error.name() == BASE_NAME {
            error.set_name(constructor.declared_name().unwrap_or(BASE_NAME));
        }

        match error.stack_mut() {
            Some(stack) => {
                stack.drop_own_frame();
                if stack.is_empty() {
                    *stack = Trace::rooted_at(caller);
                }
            }
            None => error.set_stack(Trace::rooted_at(caller)),
        }

        if let Some(record) = overlay {
            for (key, value) in record {
                error.set_property(key, value);
            }
        }

        Arc::new(error)
    }

    /// Message and property record for an (already expanded) input
    fn extract(&self, input: ErrorInput) -> (String, Option<Properties>) {
        match input {
            ErrorInput::Words(words) => (words.join(self.config.word_separator.as_ref()), None),
            ErrorInput::Message(message) if !message.is_empty() => (message, None),
            ErrorInput::Record(record) => (self.record_message(&record), Some(record)),
            // stackless or factory-produced errors: name and stack stay behind
            ErrorInput::Error(error) => {
                let message = match error.message() {
                    "" => self.fallback_message(),
                    message => message.to_owned(),
                };
                (message, Some(error.properties().clone()))
            }
            ErrorInput::Empty
            | ErrorInput::Message(_)
            | ErrorInput::Factory(_)
            | ErrorInput::Other(_) => (self.fallback_message(), None),
        }
    }

    fn record_message(&self, record: &Properties) -> String {
        match record.get("message") {
            Some(message) if is_truthy(message) => value_text(message.clone()),
            _ => self.fallback_message(),
        }
    }

    fn fallback_message(&self) -> String {
        self.config.fallback_message.clone().into_owned()
    }
}
