//! `Fin` - the outcome of evaluating an effect.
//!
//! A `Fin<A>` is either `Succ(A)` or `Fail(Error)`. Every evaluation of an
//! [`Eff`](crate::effect::Eff) produces one, and combinators that need to
//! look at an outcome (`match_with`, `if_fail`, `tap`) branch on it.
//!
//! # Examples
//!
//! ```rust
//! use effkit::control::Fin;
//! use effkit::effect::Error;
//!
//! let success: Fin<i32> = Fin::Succ(21);
//! assert_eq!(success.map(|x| x * 2), Fin::Succ(42));
//!
//! let failure: Fin<i32> = Fin::Fail(Error::new("boom"));
//! assert!(failure.is_fail());
//! ```

use std::fmt;

use crate::effect::Error;

/// A success value or a structured error.
///
/// # Type Parameters
///
/// * `A` - The type of the success value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fin<A> {
    /// The computation succeeded.
    Succ(A),
    /// The computation failed.
    Fail(Error),
}

impl<A> Fin<A> {
    /// Wraps a success value.
    #[inline]
    pub const fn succ(value: A) -> Self {
        Self::Succ(value)
    }

    /// Wraps an error.
    #[inline]
    pub fn fail(error: impl Into<Error>) -> Self {
        Self::Fail(error.into())
    }

    /// Returns `true` if this is `Succ`.
    #[inline]
    pub const fn is_succ(&self) -> bool {
        matches!(self, Self::Succ(_))
    }

    /// Returns `true` if this is `Fail`.
    #[inline]
    pub const fn is_fail(&self) -> bool {
        matches!(self, Self::Fail(_))
    }

    /// Re-types a failure without touching its error.
    ///
    /// Used to move a failure across a change of success type, as `zip` does
    /// when one side fails.
    ///
    /// # Panics
    ///
    /// Panics if called on `Succ`. Only call this where the variant is known
    /// to be `Fail`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use effkit::control::Fin;
    /// use effkit::effect::Error;
    ///
    /// let failure: Fin<i32> = Fin::Fail(Error::new("boom"));
    /// let recast: Fin<(i32, String)> = failure.cast();
    /// assert_eq!(recast, Fin::Fail(Error::new("boom")));
    /// ```
    #[track_caller]
    pub fn cast<B>(self) -> Fin<B> {
        match self {
            Self::Fail(error) => Fin::Fail(error),
            Self::Succ(_) => panic!("Fin::cast called on a success value"),
        }
    }

    /// Transforms the success value, passing failures through.
    pub fn map<B, F>(self, function: F) -> Fin<B>
    where
        F: FnOnce(A) -> B,
    {
        match self {
            Self::Succ(value) => Fin::Succ(function(value)),
            Self::Fail(error) => Fin::Fail(error),
        }
    }

    /// Transforms the error, passing successes through.
    #[must_use]
    pub fn map_fail<F>(self, function: F) -> Self
    where
        F: FnOnce(Error) -> Error,
    {
        match self {
            Self::Succ(value) => Self::Succ(value),
            Self::Fail(error) => Self::Fail(function(error)),
        }
    }

    /// Transforms both channels.
    pub fn bimap<B, S, E>(self, succ: S, fail: E) -> Fin<B>
    where
        S: FnOnce(A) -> B,
        E: FnOnce(Error) -> Error,
    {
        match self {
            Self::Succ(value) => Fin::Succ(succ(value)),
            Self::Fail(error) => Fin::Fail(fail(error)),
        }
    }

    /// Sequences a dependent computation; failures short-circuit.
    pub fn bind<B, F>(self, function: F) -> Fin<B>
    where
        F: FnOnce(A) -> Fin<B>,
    {
        match self {
            Self::Succ(value) => function(value),
            Self::Fail(error) => Fin::Fail(error),
        }
    }

    /// Recovers a failure into a plain value.
    pub fn if_fail<F>(self, function: F) -> A
    where
        F: FnOnce(Error) -> A,
    {
        match self {
            Self::Succ(value) => value,
            Self::Fail(error) => function(error),
        }
    }

    /// Returns the success value, if any.
    #[inline]
    pub fn succ_value(self) -> Option<A> {
        match self {
            Self::Succ(value) => Some(value),
            Self::Fail(_) => None,
        }
    }

    /// Returns a reference to the error, if any.
    #[inline]
    pub const fn error(&self) -> Option<&Error> {
        match self {
            Self::Succ(_) => None,
            Self::Fail(error) => Some(error),
        }
    }

    /// Converts into a standard `Result`.
    ///
    /// # Errors
    ///
    /// Returns the carried [`Error`] when this is `Fail`.
    #[inline]
    pub fn into_result(self) -> Result<A, Error> {
        self.into()
    }
}

impl<A> From<Result<A, Error>> for Fin<A> {
    fn from(result: Result<A, Error>) -> Self {
        match result {
            Ok(value) => Self::Succ(value),
            Err(error) => Self::Fail(error),
        }
    }
}

impl<A> From<Fin<A>> for Result<A, Error> {
    fn from(fin: Fin<A>) -> Self {
        match fin {
            Fin::Succ(value) => Ok(value),
            Fin::Fail(error) => Err(error),
        }
    }
}

impl<A: fmt::Display> fmt::Display for Fin<A> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Succ(value) => write!(formatter, "Succ({value})"),
            Self::Fail(error) => write!(formatter, "Fail({error})"),
        }
    }
}
