//! Error types for Entwine.
//!
//! Two error surfaces exist, matching the two ways things can fail:
//!
//! - [`WeaveError`] - attach/detach operations on the engine
//! - [`CallError`] - invoking a method on an instance, including failures
//!   raised by hook callbacks along the way

use crate::method::MethodId;
use thiserror::Error;

/// A boxed error type for dynamic error handling.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors from attaching or detaching an interception configuration.
#[derive(Error, Debug)]
pub enum WeaveError {
    /// Detach was requested for a single-instance attachment.
    ///
    /// Singleton overrides have no removal path; this is reported
    /// explicitly rather than silently ignored.
    #[error("detach is not supported for single-instance attachments")]
    DetachUnsupported,
}

/// Errors from invoking a method on an [`Instance`].
///
/// [`Instance`]: crate::Instance
#[derive(Error, Debug)]
pub enum CallError {
    /// No method with the given identifier is visible on the receiver.
    #[error("no method named `{0}`")]
    NoSuchMethod(MethodId),

    /// A hook callback failed.
    ///
    /// Propagates unmodified to the intercepted method's caller: the
    /// engine performs no suppression, retry, or logging of its own.
    #[error(transparent)]
    Hook(BoxError),

    /// A method body failed.
    #[error(transparent)]
    Method(BoxError),
}

impl CallError {
    /// Wrap a method-body failure.
    pub fn method(err: impl Into<BoxError>) -> Self {
        CallError::Method(err.into())
    }
}

impl From<BoxError> for CallError {
    fn from(err: BoxError) -> Self {
        CallError::Method(err)
    }
}
