//! Dispatcher - Hands normalized errors to their consumer
//!
//! `handle_with` passes the error to a continuation right away; `handle`
//! returns a [`Notification`] that delivers it one scheduler turn later.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use crate::error::input::ErrorInput;
use crate::error::object::ErrorObject;
use crate::normalize::Errs;

impl Errs {
    /// Normalize `input` and pass it to `callback`, returning its result
    ///
    /// ## Examples
    /// ```rust
    /// use errs::Errs;
    ///
    /// let errs = Errs::new();
    /// let message = errs.handle_with("Some async error", |err| err.message().to_owned());
    /// assert_eq!(message, "Some async error");
    /// ```
    #[track_caller]
    pub fn handle_with<F, R>(&self, input: impl Into<ErrorInput>, callback: F) -> R
    where
        F: FnOnce(Arc<ErrorObject>) -> R,
    {
        callback(self.create(input))
    }

    /// Normalize `input` and deliver it through a one-shot [`Notification`]
    ///
    /// ## Examples
    /// ```rust
    /// # #[tokio::main(flavor = "current_thread")]
    /// # async fn main() {
    /// use errs::Errs;
    ///
    /// let errs = Errs::new();
    /// let err = errs.handle("Some emitted error").await;
    /// assert_eq!(err.message(), "Some emitted error");
    /// # }
    /// ```
    #[track_caller]
    pub fn handle(&self, input: impl Into<ErrorInput>) -> Notification {
        Notification::new(self.create(input))
    }
}

/// One-shot delivery of a normalized error
///
/// Pending on its first poll (rescheduling itself), ready with the error on
/// the next. Dropping it before completion delivers the error to no one.
#[must_use = "notifications deliver nothing unless awaited"]
#[derive(Debug)]
pub struct Notification {
    error: Option<Arc<ErrorObject>>,
    deferred: bool,
}

impl Notification {
    fn new(error: Arc<ErrorObject>) -> Self {
        Self {
            error: Some(error),
            deferred: false,
        }
    }

    /// Whether the error has been delivered
    #[inline]
    pub fn is_delivered(&self) -> bool {
        self.error.is_none()
    }
}

impl Future for Notification {
    type Output = Arc<ErrorObject>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        if !this.deferred {
            this.deferred = true;
            cx.waker().wake_by_ref();
            return Poll::Pending;
        }
        match this.error.take() {
            Some(error) => {
                tracing::trace!(error_name = error.name(), "Delivering error notification");
                Poll::Ready(error)
            }
            None => panic!("`Notification` polled after completion"),
        }
    }
}
