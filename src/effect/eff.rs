//! `Eff` - memoizing effects that read an environment.
//!
//! An `Eff<Env, A>` describes a computation that, given an `Env`, produces a
//! [`Fin<A>`](crate::control::Fin). Nothing runs until [`Eff::run_io`] is
//! called; the first outcome is then cached and returned by every later run
//! until the effect is [cleared](Eff::clear).
//!
//! # Design Philosophy
//!
//! Composition is pure: every combinator returns a new `Eff` around a derived
//! [`Thunk`] and never evaluates or mutates its source. Failures
//! short-circuit through everything except the explicit recovery points
//! (`match_with`, `fold`, `if_fail` and their variants).
//!
//! # Examples
//!
//! ```rust
//! use effkit::control::Fin;
//! use effkit::effect::{Eff, Error};
//!
//! struct Config {
//!     retries: u32,
//! }
//!
//! let retries = Eff::effect(|config: &Config| config.retries);
//! let checked = retries.bind(|count| {
//!     if count > 0 {
//!         Eff::success(count)
//!     } else {
//!         Eff::fail(Error::new("retries must be positive"))
//!     }
//! });
//!
//! assert_eq!(checked.run_io(&Config { retries: 3 }), Fin::Succ(3));
//! ```
//!
//! # Alternation
//!
//! `ma | mb` runs `mb` only when `ma` fails:
//!
//! ```rust
//! use effkit::control::Fin;
//! use effkit::effect::{Eff, Error};
//!
//! let primary: Eff<(), i32> = Eff::fail(Error::new("primary down"));
//! let fallback = Eff::success(42);
//!
//! assert_eq!((primary | fallback).run_io(&()), Fin::Succ(42));
//! ```

use std::fmt;
use std::ops::BitOr;

use static_assertions::assert_impl_all;

use super::{Error, PureEff};
use crate::control::{Fin, Thunk};

/// A deferred, memoizing computation from an environment to a [`Fin`].
///
/// # Type Parameters
///
/// - `Env`: The environment supplied at evaluation time.
/// - `A`: The success type.
///
/// # Sharing
///
/// `Eff` is cheap to clone. Clones share the underlying memo cell, so
/// evaluating one evaluates them all; [`clear`](Eff::clear) rebinds only
/// the value it is called on.
///
/// # Monad Laws
///
/// 1. **Left Identity**: `Eff::success(a).bind(f) == f(a)`
/// 2. **Right Identity**: `m.bind(Eff::success) == m`
/// 3. **Associativity**: `m.bind(f).bind(g) == m.bind(|x| f(x).bind(g))`
pub struct Eff<Env, A> {
    pub(crate) thunk: Thunk<Env, A>,
}

assert_impl_all!(Eff<(), i32>: Send, Sync, Clone);

impl<Env, A> Clone for Eff<Env, A> {
    fn clone(&self) -> Self {
        Self {
            thunk: self.thunk.clone(),
        }
    }
}

impl<Env, A> Eff<Env, A>
where
    Env: 'static,
    A: Clone + Send + Sync + 'static,
{
    /// Wraps an existing thunk.
    pub const fn from_thunk(thunk: Thunk<Env, A>) -> Self {
        Self { thunk }
    }

    /// Lifts a total environment function into an effect.
    ///
    /// The effect always succeeds unless the function panics, in which case
    /// it fails with the intercepted panic.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use effkit::control::Fin;
    /// use effkit::effect::Eff;
    ///
    /// let length = Eff::effect(|name: &String| name.len());
    /// assert_eq!(length.run_io(&"effkit".to_string()), Fin::Succ(6));
    /// ```
    pub fn effect<F>(function: F) -> Self
    where
        F: Fn(&Env) -> A + Send + Sync + 'static,
    {
        Self::from_thunk(Thunk::lazy(move |env| Fin::Succ(function(env))))
    }

    /// Lifts an environment function that may itself fail.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use effkit::control::Fin;
    /// use effkit::effect::{Eff, Error};
    ///
    /// let parse = Eff::effect_maybe(|input: &String| {
    ///     Fin::from(input.parse::<i32>().map_err(|error| Error::from_error(&error)))
    /// });
    /// assert_eq!(parse.run_io(&"12".to_string()), Fin::Succ(12));
    /// ```
    pub fn effect_maybe<F>(function: F) -> Self
    where
        F: Fn(&Env) -> Fin<A> + Send + Sync + 'static,
    {
        Self::from_thunk(Thunk::lazy(function))
    }

    /// An effect that always succeeds with `value`.
    pub fn success(value: A) -> Self {
        Self::from_thunk(Thunk::success(value))
    }

    /// An effect that always fails with `error`.
    pub fn fail(error: impl Into<Error>) -> Self {
        Self::from_thunk(Thunk::fail(error.into()))
    }

    /// Widens an environment-free effect; the environment is ignored.
    ///
    /// The widened effect reads through `effect`'s memo cell.
    pub fn from_pure(effect: PureEff<A>) -> Self {
        Self::effect_maybe(move |_| effect.run_io())
    }

    /// Evaluates the effect.
    ///
    /// The first call runs the computation with `env`; later calls return
    /// the memoized outcome even when given a different environment.
    pub fn run_io(&self, env: &Env) -> Fin<A> {
        self.thunk.value(env)
    }

    /// Evaluates the effect for its side effects only.
    ///
    /// The outcome is still memoized.
    pub fn run_unit_io(&self, env: &Env) {
        let _ = self.thunk.value(env);
    }

    /// Forgets the memoized outcome of this value.
    ///
    /// The next [`run_io`](Eff::run_io) on `self` re-runs the original
    /// computation. Clones taken before the call and effects derived from
    /// `self` keep the old cell and its cached outcome.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use effkit::control::Fin;
    /// use effkit::effect::Eff;
    ///
    /// let mut echo = Eff::effect(|env: &i32| *env);
    /// assert_eq!(echo.run_io(&1), Fin::Succ(1));
    /// assert_eq!(echo.run_io(&2), Fin::Succ(1));
    ///
    /// echo.clear();
    /// assert_eq!(echo.run_io(&2), Fin::Succ(2));
    /// ```
    pub fn clear(&mut self) {
        tracing::debug!("clearing memoized effect");
        self.thunk = self.thunk.reset();
    }

    /// Returns whether this value holds a memoized outcome.
    pub fn is_evaluated(&self) -> bool {
        self.thunk.is_evaluated()
    }

    /// Left-biased choice: the first success wins.
    ///
    /// `other` runs, against the same environment, only when `self` fails;
    /// its outcome is then returned as is.
    #[must_use]
    pub fn or_else(self, other: Self) -> Self {
        Self::effect_maybe(move |env| match self.run_io(env) {
            success @ Fin::Succ(_) => success,
            Fin::Fail(_) => other.run_io(env),
        })
    }

    /// Left-biased choice against an environment-free fallback.
    #[must_use]
    pub fn or_else_pure(self, other: PureEff<A>) -> Self {
        Self::effect_maybe(move |env| match self.run_io(env) {
            success @ Fin::Succ(_) => success,
            Fin::Fail(_) => other.run_io(),
        })
    }
}

impl<Env, A> From<PureEff<A>> for Eff<Env, A>
where
    Env: 'static,
    A: Clone + Send + Sync + 'static,
{
    fn from(effect: PureEff<A>) -> Self {
        Self::from_pure(effect)
    }
}

impl<Env, A> BitOr for Eff<Env, A>
where
    Env: 'static,
    A: Clone + Send + Sync + 'static,
{
    type Output = Self;

    fn bitor(self, other: Self) -> Self {
        self.or_else(other)
    }
}

impl<Env, A> BitOr<PureEff<A>> for Eff<Env, A>
where
    Env: 'static,
    A: Clone + Send + Sync + 'static,
{
    type Output = Self;

    fn bitor(self, other: PureEff<A>) -> Self {
        self.or_else_pure(other)
    }
}

impl<Env, A: fmt::Debug> fmt::Debug for Eff<Env, A> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_tuple("Eff").field(&self.thunk).finish()
    }
}
