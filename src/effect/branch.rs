//! Branches for the recovery combinators.
//!
//! [`Eff::match_with`] and [`Eff::if_fail_with`] take their arms as
//! [`Branch`] values instead of one overload per shape. A branch is a fixed
//! value, a function of the arm's input, an environment-reading effect or an
//! environment-free effect.
//!
//! # Examples
//!
//! ```rust
//! use effkit::control::Fin;
//! use effkit::effect::{Branch, Eff, Error};
//!
//! let lookup: Eff<u16, String> = Eff::fail(Error::new("not cached"));
//! let from_env = Eff::effect(|port: &u16| format!("localhost:{port}"));
//!
//! let address = lookup.match_with(Branch::function(|cached: String| cached), Branch::from(from_env));
//! assert_eq!(address.run_io(&8080), Fin::Succ("localhost:8080".to_string()));
//! ```

use std::sync::Arc;

use super::{Eff, PureEff};
use crate::control::Fin;

/// One arm of a recovery combinator.
///
/// # Type Parameters
///
/// - `Env`: The environment an [`Effect`](Branch::Effect) arm runs against.
/// - `In`: The arm's input (the success value or the [`Error`](super::Error)).
/// - `B`: The arm's output.
pub enum Branch<Env, In, B> {
    /// Succeeds with a fixed value, ignoring the input.
    Value(B),
    /// Succeeds with a function of the input.
    Function(Arc<dyn Fn(In) -> B + Send + Sync>),
    /// Runs an effect against the environment, ignoring the input.
    Effect(Eff<Env, B>),
    /// Runs an environment-free effect, ignoring the input.
    Pure(PureEff<B>),
}

impl<Env, In, B> Branch<Env, In, B>
where
    Env: 'static,
    B: Clone + Send + Sync + 'static,
{
    /// A branch that succeeds with `value`.
    pub const fn value(value: B) -> Self {
        Self::Value(value)
    }

    /// A branch that applies `function` to its input.
    pub fn function<F>(function: F) -> Self
    where
        F: Fn(In) -> B + Send + Sync + 'static,
    {
        Self::Function(Arc::new(function))
    }

    /// Runs the branch with its input and the environment.
    pub(crate) fn run(&self, input: In, env: &Env) -> Fin<B> {
        match self {
            Self::Value(value) => Fin::Succ(value.clone()),
            Self::Function(function) => Fin::Succ(function(input)),
            Self::Effect(effect) => effect.run_io(env),
            Self::Pure(effect) => effect.run_io(),
        }
    }
}

impl<Env, In, B> From<Eff<Env, B>> for Branch<Env, In, B> {
    fn from(effect: Eff<Env, B>) -> Self {
        Self::Effect(effect)
    }
}

impl<Env, In, B> From<PureEff<B>> for Branch<Env, In, B> {
    fn from(effect: PureEff<B>) -> Self {
        Self::Pure(effect)
    }
}

impl<Env, In, B> Clone for Branch<Env, In, B>
where
    B: Clone,
{
    fn clone(&self) -> Self {
        match self {
            Self::Value(value) => Self::Value(value.clone()),
            Self::Function(function) => Self::Function(Arc::clone(function)),
            Self::Effect(effect) => Self::Effect(effect.clone()),
            Self::Pure(effect) => Self::Pure(effect.clone()),
        }
    }
}
