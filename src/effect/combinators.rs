//! The combinator algebra over [`Eff`].
//!
//! Every combinator consumes its source, returns a new effect around a
//! derived [`Thunk`](crate::control::Thunk) and runs nothing until the result
//! is evaluated. Failure handling falls into three groups:
//!
//! - **Propagating**: `map`, `bimap`, `bind`, `flatten`, `zip`, `filter`,
//!   and `tap` when the nested action fails.
//! - **Recovering**: `match_with`, `fold`, `if_fail` and their variants.
//! - **Swallowing**: `iter` ignores the nested action's failure.
//!
//! # Examples
//!
//! ```rust
//! use effkit::control::Fin;
//! use effkit::effect::{Eff, Error};
//!
//! let total = Eff::effect(|prices: &Vec<u32>| prices.iter().sum::<u32>())
//!     .filter(|total| *total > 0)
//!     .map(|total| total * 2)
//!     .if_fail(|_| 0);
//!
//! assert_eq!(total.run_io(&vec![1, 2, 3]), Fin::Succ(12));
//! ```

use std::sync::Arc;

use super::{Branch, Eff, Error, PureEff};
use crate::control::Fin;

// =============================================================================
// Functor
// =============================================================================

impl<Env, A> Eff<Env, A>
where
    Env: 'static,
    A: Clone + Send + Sync + 'static,
{
    /// Transforms the success value; failures pass through.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use effkit::control::Fin;
    /// use effkit::effect::Eff;
    ///
    /// let eff = Eff::<(), _>::success(21).map(|x| x * 2);
    /// assert_eq!(eff.run_io(&()), Fin::Succ(42));
    /// ```
    pub fn map<B, F>(self, function: F) -> Eff<Env, B>
    where
        B: Clone + Send + Sync + 'static,
        F: Fn(A) -> B + Send + Sync + 'static,
    {
        Eff::from_thunk(self.thunk.map(function))
    }

    /// Transforms the error; successes pass through.
    #[must_use]
    pub fn map_fail<F>(self, function: F) -> Self
    where
        F: Fn(Error) -> Error + Send + Sync + 'static,
    {
        self.bimap(|value| value, function)
    }

    /// Transforms both channels.
    pub fn bimap<B, S, E>(self, succ: S, fail: E) -> Eff<Env, B>
    where
        B: Clone + Send + Sync + 'static,
        S: Fn(A) -> B + Send + Sync + 'static,
        E: Fn(Error) -> Error + Send + Sync + 'static,
    {
        Eff::from_thunk(self.thunk.bimap(succ, fail))
    }

    /// Alias for [`map`](Eff::map).
    pub fn select<B, F>(self, function: F) -> Eff<Env, B>
    where
        B: Clone + Send + Sync + 'static,
        F: Fn(A) -> B + Send + Sync + 'static,
    {
        self.map(function)
    }
}

// =============================================================================
// Recovery
// =============================================================================

impl<Env, A> Eff<Env, A>
where
    Env: 'static,
    A: Clone + Send + Sync + 'static,
{
    /// Eliminates the outcome: exactly one branch runs, chosen by the tag.
    ///
    /// The selected branch's own outcome becomes the result, so an effect
    /// branch may still fail.
    pub fn match_with<B>(self, succ: Branch<Env, A, B>, fail: Branch<Env, Error, B>) -> Eff<Env, B>
    where
        B: Clone + Send + Sync + 'static,
    {
        Eff::effect_maybe(move |env| match self.run_io(env) {
            Fin::Succ(value) => succ.run(value, env),
            Fin::Fail(error) => fail.run(error, env),
        })
    }

    /// Eliminates the outcome with two plain functions.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use effkit::control::Fin;
    /// use effkit::effect::Eff;
    ///
    /// let describe = Eff::<(), i32>::fail("timeout")
    ///     .fold(|value| format!("got {value}"), |error| format!("failed: {error}"));
    /// assert_eq!(describe.run_io(&()), Fin::Succ("failed: timeout".to_string()));
    /// ```
    pub fn fold<B, S, E>(self, succ: S, fail: E) -> Eff<Env, B>
    where
        B: Clone + Send + Sync + 'static,
        S: Fn(A) -> B + Send + Sync + 'static,
        E: Fn(Error) -> B + Send + Sync + 'static,
    {
        self.match_with(Branch::function(succ), Branch::function(fail))
    }

    /// Replaces a failure using the given branch; successes pass through.
    #[must_use]
    pub fn if_fail_with(self, alternative: Branch<Env, Error, A>) -> Self {
        Self::effect_maybe(move |env| match self.run_io(env) {
            success @ Fin::Succ(_) => success,
            Fin::Fail(error) => alternative.run(error, env),
        })
    }

    /// Replaces a failure with a function of the error.
    #[must_use]
    pub fn if_fail<F>(self, function: F) -> Self
    where
        F: Fn(Error) -> A + Send + Sync + 'static,
    {
        self.if_fail_with(Branch::function(function))
    }

    /// Replaces a failure with a fixed value.
    #[must_use]
    pub fn if_fail_value(self, alternative: A) -> Self {
        self.if_fail_with(Branch::value(alternative))
    }
}

// =============================================================================
// Side effects
// =============================================================================

impl<Env, A> Eff<Env, A>
where
    Env: 'static,
    A: Clone + Send + Sync + 'static,
{
    /// Runs `function` on the success value and always succeeds with `()`.
    pub fn iter<F>(self, function: F) -> Eff<Env, ()>
    where
        F: Fn(A) + Send + Sync + 'static,
    {
        Eff::effect(move |env| {
            if let Fin::Succ(value) = self.run_io(env) {
                function(value);
            }
        })
    }

    /// Runs the effect built by `function` on success; its failure is ignored.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use effkit::control::Fin;
    /// use effkit::effect::Eff;
    ///
    /// let logged = Eff::<(), _>::success(5).iter_eff(|_| Eff::fail("log sink offline"));
    /// assert_eq!(logged.run_io(&()), Fin::Succ(()));
    /// ```
    pub fn iter_eff<F>(self, function: F) -> Eff<Env, ()>
    where
        F: Fn(A) -> Eff<Env, ()> + Send + Sync + 'static,
    {
        Eff::effect(move |env| {
            if let Fin::Succ(value) = self.run_io(env) {
                function(value).run_unit_io(env);
            }
        })
    }

    /// Like [`iter_eff`](Eff::iter_eff) with an environment-free action.
    pub fn iter_pure<F>(self, function: F) -> Eff<Env, ()>
    where
        F: Fn(A) -> PureEff<()> + Send + Sync + 'static,
    {
        Eff::effect(move |env| {
            if let Fin::Succ(value) = self.run_io(env) {
                function(value).run_unit_io();
            }
        })
    }

    /// Runs `function` on the success value and passes the outcome through.
    #[must_use]
    pub fn tap<F>(self, function: F) -> Self
    where
        F: Fn(&A) + Send + Sync + 'static,
    {
        Self::effect_maybe(move |env| {
            let result = self.run_io(env);
            if let Fin::Succ(value) = &result {
                function(value);
            }
            result
        })
    }

    /// Runs the effect built by `function` on success; its failure replaces
    /// the outcome.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use effkit::control::Fin;
    /// use effkit::effect::{Eff, Error};
    ///
    /// let audited = Eff::<(), _>::success(5).tap_eff(|_| Eff::fail("audit log full"));
    /// assert_eq!(audited.run_io(&()), Fin::Fail(Error::new("audit log full")));
    /// ```
    #[must_use]
    pub fn tap_eff<F>(self, function: F) -> Self
    where
        F: Fn(&A) -> Eff<Env, ()> + Send + Sync + 'static,
    {
        Self::effect_maybe(move |env| {
            let result = self.run_io(env);
            if let Fin::Succ(value) = &result
                && let Fin::Fail(error) = function(value).run_io(env)
            {
                return Fin::Fail(error);
            }
            result
        })
    }

    /// Like [`tap_eff`](Eff::tap_eff) with an environment-free action.
    #[must_use]
    pub fn tap_pure<F>(self, function: F) -> Self
    where
        F: Fn(&A) -> PureEff<()> + Send + Sync + 'static,
    {
        Self::effect_maybe(move |env| {
            let result = self.run_io(env);
            if let Fin::Succ(value) = &result
                && let Fin::Fail(error) = function(value).run_io()
            {
                return Fin::Fail(error);
            }
            result
        })
    }
}

// =============================================================================
// Monad
// =============================================================================

impl<Env, A> Eff<Env, A>
where
    Env: 'static,
    A: Clone + Send + Sync + 'static,
{
    /// Sequences a dependent computation.
    ///
    /// A failed source short-circuits without calling `function`. The source
    /// is read through its memo cell, so it never runs twice.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use effkit::control::Fin;
    /// use effkit::effect::Eff;
    ///
    /// let eff = Eff::effect(|base: &i32| *base).bind(|x| Eff::effect(move |base: &i32| x * base));
    /// assert_eq!(eff.run_io(&7), Fin::Succ(49));
    /// ```
    pub fn bind<B, F>(self, function: F) -> Eff<Env, B>
    where
        B: Clone + Send + Sync + 'static,
        F: Fn(A) -> Eff<Env, B> + Send + Sync + 'static,
    {
        Eff::from_thunk(self.thunk.map(move |value| function(value).thunk).flatten())
    }

    /// Sequences an environment-free dependent computation.
    pub fn bind_pure<B, F>(self, function: F) -> Eff<Env, B>
    where
        B: Clone + Send + Sync + 'static,
        F: Fn(A) -> PureEff<B> + Send + Sync + 'static,
    {
        self.bind(move |value| function(value).with_env())
    }

    /// Alias for [`bind`](Eff::bind).
    pub fn select_many<B, F>(self, function: F) -> Eff<Env, B>
    where
        B: Clone + Send + Sync + 'static,
        F: Fn(A) -> Eff<Env, B> + Send + Sync + 'static,
    {
        self.bind(function)
    }

    /// Binds and projects in one step: `bind` then `map` with both values.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use effkit::control::Fin;
    /// use effkit::effect::Eff;
    ///
    /// let eff = Eff::<(), _>::success(2)
    ///     .select_many_with(|x| Eff::success(x * 10), |x, y| x + y);
    /// assert_eq!(eff.run_io(&()), Fin::Succ(22));
    /// ```
    pub fn select_many_with<B, C, F, P>(self, bind: F, project: P) -> Eff<Env, C>
    where
        B: Clone + Send + Sync + 'static,
        C: Clone + Send + Sync + 'static,
        F: Fn(A) -> Eff<Env, B> + Send + Sync + 'static,
        P: Fn(A, B) -> C + Send + Sync + 'static,
    {
        let project = Arc::new(project);
        self.bind(move |first| {
            let project = Arc::clone(&project);
            bind(first.clone()).map(move |second| project(first.clone(), second))
        })
    }

    /// Keeps successes satisfying `predicate`; others fail with
    /// [`Error::cancelled`].
    #[must_use]
    pub fn filter<F>(self, predicate: F) -> Self
    where
        F: Fn(&A) -> bool + Send + Sync + 'static,
    {
        self.bind(move |value| {
            if predicate(&value) {
                Self::success(value)
            } else {
                Self::fail(Error::cancelled())
            }
        })
    }

    /// Pairs two effects, evaluating `self` first.
    ///
    /// A failure of `self` is returned without evaluating `other`.
    pub fn zip<B>(self, other: Eff<Env, B>) -> Eff<Env, (A, B)>
    where
        B: Clone + Send + Sync + 'static,
    {
        Eff::effect_maybe(move |env| {
            let first = match self.run_io(env) {
                Fin::Succ(value) => value,
                failure @ Fin::Fail(_) => return failure.cast(),
            };
            match other.run_io(env) {
                Fin::Succ(second) => Fin::Succ((first, second)),
                failure @ Fin::Fail(_) => failure.cast(),
            }
        })
    }

    /// Pairs this effect with an environment-free one, `self` first.
    pub fn zip_pure<B>(self, other: PureEff<B>) -> Eff<Env, (A, B)>
    where
        B: Clone + Send + Sync + 'static,
    {
        self.zip(other.with_env())
    }
}

impl<Env, A> Eff<Env, Eff<Env, A>>
where
    Env: 'static,
    A: Clone + Send + Sync + 'static,
{
    /// Collapses a nested effect; both layers see the same environment.
    pub fn flatten(self) -> Eff<Env, A> {
        Eff::from_thunk(self.thunk.map(|inner| inner.thunk).flatten())
    }
}

impl<Env, A> Eff<Env, PureEff<A>>
where
    Env: 'static,
    A: Clone + Send + Sync + 'static,
{
    /// Collapses an effect producing an environment-free effect.
    pub fn flatten_pure(self) -> Eff<Env, A> {
        self.bind(PureEff::with_env)
    }
}

/// Pairs two effects, evaluating `first` before `second`.
///
/// Free-function form of [`Eff::zip`].
pub fn zip<Env, A, B>(first: Eff<Env, A>, second: Eff<Env, B>) -> Eff<Env, (A, B)>
where
    Env: 'static,
    A: Clone + Send + Sync + 'static,
    B: Clone + Send + Sync + 'static,
{
    first.zip(second)
}
