//! `PureEff` - memoizing effects that need no environment.
//!
//! `PureEff<A>` follows the same rules as [`Eff`]: lazy, memoized, panics
//! intercepted as failures. It can stand in for any `Eff<Env, A>` through
//! [`PureEff::with_env`] (or `From`), which simply ignores the environment.
//!
//! # Examples
//!
//! ```rust
//! use effkit::control::Fin;
//! use effkit::effect::{Eff, PureEff};
//!
//! let answer = PureEff::effect(|| 6 * 7);
//! assert_eq!(answer.run_io(), Fin::Succ(42));
//!
//! let widened: Eff<String, i32> = answer.with_env();
//! assert_eq!(widened.run_io(&"ignored".to_string()), Fin::Succ(42));
//! ```

use std::fmt;
use std::ops::BitOr;

use super::{Eff, Error};
use crate::control::{Fin, Thunk};

/// A deferred, memoizing computation producing a [`Fin`] without an environment.
pub struct PureEff<A> {
    thunk: Thunk<(), A>,
}

impl<A> Clone for PureEff<A> {
    fn clone(&self) -> Self {
        Self {
            thunk: self.thunk.clone(),
        }
    }
}

impl<A> PureEff<A>
where
    A: Clone + Send + Sync + 'static,
{
    /// Lifts a total function into an effect.
    pub fn effect<F>(function: F) -> Self
    where
        F: Fn() -> A + Send + Sync + 'static,
    {
        Self {
            thunk: Thunk::lazy(move |_| Fin::Succ(function())),
        }
    }

    /// Lifts a function that may itself fail.
    pub fn effect_maybe<F>(function: F) -> Self
    where
        F: Fn() -> Fin<A> + Send + Sync + 'static,
    {
        Self {
            thunk: Thunk::lazy(move |_| function()),
        }
    }

    /// An effect that always succeeds with `value`.
    pub fn success(value: A) -> Self {
        Self {
            thunk: Thunk::success(value),
        }
    }

    /// An effect that always fails with `error`.
    pub fn fail(error: impl Into<Error>) -> Self {
        Self {
            thunk: Thunk::fail(error.into()),
        }
    }

    /// Evaluates the effect, memoizing the outcome.
    pub fn run_io(&self) -> Fin<A> {
        self.thunk.value(&())
    }

    /// Evaluates the effect for its side effects only.
    pub fn run_unit_io(&self) {
        let _ = self.thunk.value(&());
    }

    /// Forgets the memoized outcome of this value.
    pub fn clear(&mut self) {
        tracing::debug!("clearing memoized pure effect");
        self.thunk = self.thunk.reset();
    }

    /// Transforms the success value.
    pub fn map<B, F>(self, function: F) -> PureEff<B>
    where
        B: Clone + Send + Sync + 'static,
        F: Fn(A) -> B + Send + Sync + 'static,
    {
        PureEff {
            thunk: self.thunk.map(function),
        }
    }

    /// Transforms the error.
    #[must_use]
    pub fn map_fail<F>(self, function: F) -> Self
    where
        F: Fn(Error) -> Error + Send + Sync + 'static,
    {
        Self {
            thunk: self.thunk.bimap(|value| value, function),
        }
    }

    /// Sequences a dependent environment-free computation.
    pub fn bind<B, F>(self, function: F) -> PureEff<B>
    where
        B: Clone + Send + Sync + 'static,
        F: Fn(A) -> PureEff<B> + Send + Sync + 'static,
    {
        PureEff {
            thunk: self.thunk.map(move |value| function(value).thunk).flatten(),
        }
    }

    /// Left-biased choice: the first success wins.
    #[must_use]
    pub fn or_else(self, other: Self) -> Self {
        Self::effect_maybe(move || match self.run_io() {
            success @ Fin::Succ(_) => success,
            Fin::Fail(_) => other.run_io(),
        })
    }

    /// Widens into an effect over any environment.
    pub fn with_env<Env: 'static>(self) -> Eff<Env, A> {
        Eff::from_pure(self)
    }

    /// Left-biased choice with an environment-reading fallback.
    pub fn or_else_env<Env: 'static>(self, other: Eff<Env, A>) -> Eff<Env, A> {
        Eff::effect_maybe(move |env| match self.run_io() {
            success @ Fin::Succ(_) => success,
            Fin::Fail(_) => other.run_io(env),
        })
    }

    /// Pairs this effect with an environment-reading one, left first.
    pub fn zip_env<Env, B>(self, other: Eff<Env, B>) -> Eff<Env, (A, B)>
    where
        Env: 'static,
        B: Clone + Send + Sync + 'static,
    {
        Eff::effect_maybe(move |env| {
            let first = match self.run_io() {
                Fin::Succ(value) => value,
                failure @ Fin::Fail(_) => return failure.cast(),
            };
            match other.run_io(env) {
                Fin::Succ(second) => Fin::Succ((first, second)),
                failure @ Fin::Fail(_) => failure.cast(),
            }
        })
    }
}

impl<A> BitOr for PureEff<A>
where
    A: Clone + Send + Sync + 'static,
{
    type Output = Self;

    fn bitor(self, other: Self) -> Self {
        self.or_else(other)
    }
}

impl<Env, A> BitOr<Eff<Env, A>> for PureEff<A>
where
    Env: 'static,
    A: Clone + Send + Sync + 'static,
{
    type Output = Eff<Env, A>;

    fn bitor(self, other: Eff<Env, A>) -> Eff<Env, A> {
        self.or_else_env(other)
    }
}

impl<A: fmt::Debug> fmt::Debug for PureEff<A> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_tuple("PureEff").field(&self.thunk).finish()
    }
}
