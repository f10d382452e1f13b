//! Structured errors for the effect system.
//!
//! Every failed evaluation carries an [`Error`]: a message, an optional
//! numeric code, a [`ErrorKind`] describing how the error came to be, and an
//! optional inner cause. Errors are plain values, compared by content.
//!
//! # Examples
//!
//! ```rust
//! use effkit::effect::{Error, ErrorKind};
//!
//! let root = Error::new("connection refused");
//! let error = Error::with_code(503, "service unavailable").with_inner(root.clone());
//!
//! assert_eq!(error.code(), Some(503));
//! assert_eq!(error.inner(), Some(&root));
//! assert_eq!(error.kind(), ErrorKind::Message);
//! assert_eq!(format!("{error}"), "service unavailable");
//! ```

use std::any::Any;

/// Message carried by [`Error::cancelled`].
pub const CANCELLED_MESSAGE: &str = "cancelled";

/// Describes how an [`Error`] was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Built directly from a message (and optionally a code).
    Message,
    /// Built from a foreign [`std::error::Error`].
    Exceptional,
    /// Built from a panic intercepted while evaluating user code.
    Panic,
    /// The fixed cancellation error used by `filter` and by async cancellation.
    Cancelled,
}

/// A structured failure description.
///
/// `Error` is what a failed [`Fin`](crate::control::Fin) carries. It is cheap
/// to clone and implements [`std::error::Error`], exposing its inner cause
/// through [`source`](std::error::Error::source).
///
/// # Examples
///
/// ```rust
/// use effkit::effect::Error;
/// use std::error::Error as _;
///
/// let error = Error::new("outer").with_inner(Error::new("inner"));
/// assert_eq!(error.source().map(|cause| cause.to_string()), Some("inner".to_string()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct Error {
    kind: ErrorKind,
    code: Option<i32>,
    message: String,
    #[source]
    inner: Option<Box<Error>>,
}

impl Error {
    /// Creates an error from a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Message,
            code: None,
            message: message.into(),
            inner: None,
        }
    }

    /// Creates an error from a code and a message.
    pub fn with_code(code: i32, message: impl Into<String>) -> Self {
        Self {
            code: Some(code),
            ..Self::new(message)
        }
    }

    /// The fixed cancellation error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use effkit::effect::Error;
    ///
    /// assert!(Error::cancelled().is_cancelled());
    /// ```
    pub fn cancelled() -> Self {
        Self {
            kind: ErrorKind::Cancelled,
            ..Self::new(CANCELLED_MESSAGE)
        }
    }

    /// Captures a foreign error, including its chain of sources.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use effkit::effect::{Error, ErrorKind};
    ///
    /// let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.toml");
    /// let error = Error::from_error(&io_error);
    ///
    /// assert_eq!(error.kind(), ErrorKind::Exceptional);
    /// assert_eq!(error.message(), "missing.toml");
    /// ```
    pub fn from_error(error: &(dyn std::error::Error + 'static)) -> Self {
        Self {
            kind: ErrorKind::Exceptional,
            code: None,
            message: error.to_string(),
            inner: error.source().map(|source| Box::new(Self::from_error(source))),
        }
    }

    /// Converts an intercepted panic payload into an error.
    ///
    /// String payloads (the common `panic!("...")` case) become the message;
    /// anything else is reported as an unknown panic.
    pub fn from_panic(payload: &(dyn Any + Send)) -> Self {
        let message = if let Some(string) = payload.downcast_ref::<&str>() {
            (*string).to_string()
        } else if let Some(string) = payload.downcast_ref::<String>() {
            string.clone()
        } else {
            "Unknown panic".to_string()
        };
        Self {
            kind: ErrorKind::Panic,
            ..Self::new(message)
        }
    }

    /// Attaches an inner cause, replacing any previous one.
    #[must_use]
    pub fn with_inner(mut self, inner: Self) -> Self {
        self.inner = Some(Box::new(inner));
        self
    }

    /// How this error was produced.
    #[inline]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The numeric code, if one was supplied.
    #[inline]
    pub const fn code(&self) -> Option<i32> {
        self.code
    }

    /// The error message.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The inner cause, if any.
    #[inline]
    pub fn inner(&self) -> Option<&Self> {
        self.inner.as_deref()
    }

    /// Returns `true` for the cancellation error.
    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.kind == ErrorKind::Cancelled
    }

    /// Returns `true` for errors built from an intercepted panic.
    #[inline]
    pub fn is_panic(&self) -> bool {
        self.kind == ErrorKind::Panic
    }
}

impl From<&str> for Error {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

impl From<String> for Error {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}
