//! Memoizing evaluation cells.
//!
//! A [`Thunk<Env, A>`] is a computation `&Env -> Fin<A>` that runs at most
//! once. The first evaluation caches its [`Fin`]; every later evaluation
//! returns the cached outcome, whatever environment it is given.
//!
//! # Examples
//!
//! ```rust
//! use effkit::control::{Fin, Thunk};
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//!
//! let calls = Arc::new(AtomicUsize::new(0));
//! let counter = Arc::clone(&calls);
//! let thunk = Thunk::lazy(move |env: &i32| {
//!     counter.fetch_add(1, Ordering::SeqCst);
//!     Fin::Succ(*env * 2)
//! });
//!
//! assert_eq!(thunk.value(&21), Fin::Succ(42));
//! // Memoized: the environment is ignored from now on
//! assert_eq!(thunk.value(&100), Fin::Succ(42));
//! assert_eq!(calls.load(Ordering::SeqCst), 1);
//!
//! // A reset thunk runs the original function again
//! assert_eq!(thunk.reset().value(&100), Fin::Succ(200));
//! assert_eq!(calls.load(Ordering::SeqCst), 2);
//! ```

use std::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

use parking_lot::Mutex;

use super::Fin;
use crate::effect::Error;

type ThunkFn<Env, A> = Arc<dyn Fn(&Env) -> Fin<A> + Send + Sync>;

/// The internal state of a thunk cell.
enum ThunkState<Env, A> {
    /// Not evaluated yet. Contains the function to run.
    Unevaluated(ThunkFn<Env, A>),
    /// Evaluated once. Keeps the function so the thunk can be reset.
    Evaluated {
        function: ThunkFn<Env, A>,
        result: Fin<A>,
    },
    /// Built from a known outcome; there is no function to run.
    Constant(Fin<A>),
}

/// A shared, memoizing computation from an environment to a [`Fin`].
///
/// Cloning a `Thunk` shares its cell: all clones observe the same cached
/// outcome. [`reset`](Thunk::reset) is the only way back to an unevaluated
/// state, and it produces a new cell instead of touching the shared one.
///
/// # Fault Interception
///
/// A panic raised by the wrapped function is caught and cached as
/// `Fin::Fail` with [`ErrorKind::Panic`](crate::effect::ErrorKind::Panic).
/// Process-level faults such as aborts are not intercepted.
///
/// # Thread Safety
///
/// The cell is guarded by a mutex held for the whole first evaluation, so
/// concurrent calls to [`value`](Thunk::value) run the function at most
/// once; late callers block until the outcome is cached.
///
/// # Re-entry Warning
///
/// Evaluating a thunk from inside its own function deadlocks.
pub struct Thunk<Env, A> {
    cell: Arc<Mutex<ThunkState<Env, A>>>,
}

impl<Env, A> Clone for Thunk<Env, A> {
    fn clone(&self) -> Self {
        Self {
            cell: Arc::clone(&self.cell),
        }
    }
}

impl<Env, A> Thunk<Env, A>
where
    Env: 'static,
    A: Clone + Send + 'static,
{
    /// Creates an unevaluated thunk around `function`.
    ///
    /// The function is not called until [`value`](Thunk::value) is.
    pub fn lazy<F>(function: F) -> Self
    where
        F: Fn(&Env) -> Fin<A> + Send + Sync + 'static,
    {
        Self::from_function(Arc::new(function))
    }

    fn from_function(function: ThunkFn<Env, A>) -> Self {
        Self {
            cell: Arc::new(Mutex::new(ThunkState::Unevaluated(function))),
        }
    }

    fn constant(result: Fin<A>) -> Self {
        Self {
            cell: Arc::new(Mutex::new(ThunkState::Constant(result))),
        }
    }

    /// Creates a thunk that always succeeds with `value`.
    pub fn success(value: A) -> Self {
        Self::constant(Fin::Succ(value))
    }

    /// Creates a thunk that always fails with `error`.
    pub fn fail(error: Error) -> Self {
        Self::constant(Fin::Fail(error))
    }

    /// Evaluates the thunk.
    ///
    /// The first call runs the function with `env` and caches the outcome,
    /// including an intercepted panic. Later calls return the cache without
    /// consulting `env`.
    pub fn value(&self, env: &Env) -> Fin<A> {
        let mut state = self.cell.lock();
        let function = match &*state {
            ThunkState::Constant(result) | ThunkState::Evaluated { result, .. } => {
                return result.clone();
            }
            ThunkState::Unevaluated(function) => Arc::clone(function),
        };

        tracing::trace!("evaluating thunk");
        let result = invoke(&function, env);
        *state = ThunkState::Evaluated {
            function,
            result: result.clone(),
        };
        result
    }

    /// Returns a fresh, unevaluated thunk around the original function.
    ///
    /// `self` and its clones keep their cached outcome. A constant thunk has
    /// nothing to re-run and resets to itself.
    #[must_use]
    pub fn reset(&self) -> Self {
        let state = self.cell.lock();
        match &*state {
            ThunkState::Unevaluated(function) | ThunkState::Evaluated { function, .. } => {
                tracing::trace!("resetting thunk");
                Self::from_function(Arc::clone(function))
            }
            ThunkState::Constant(_) => self.clone(),
        }
    }

    /// Returns whether the thunk holds an outcome.
    ///
    /// Constant thunks are always evaluated.
    pub fn is_evaluated(&self) -> bool {
        !matches!(&*self.cell.lock(), ThunkState::Unevaluated(_))
    }

    /// Derives a thunk that transforms the success value.
    ///
    /// The parent is only evaluated when the derived thunk is, and failures
    /// pass through untouched.
    pub fn map<B, F>(&self, function: F) -> Thunk<Env, B>
    where
        B: Clone + Send + 'static,
        F: Fn(A) -> B + Send + Sync + 'static,
    {
        let parent = self.clone();
        Thunk::lazy(move |env| parent.value(env).map(&function))
    }

    /// Derives a thunk that transforms both the success value and the error.
    pub fn bimap<B, S, E>(&self, succ: S, fail: E) -> Thunk<Env, B>
    where
        B: Clone + Send + 'static,
        S: Fn(A) -> B + Send + Sync + 'static,
        E: Fn(Error) -> Error + Send + Sync + 'static,
    {
        let parent = self.clone();
        Thunk::lazy(move |env| parent.value(env).bimap(&succ, &fail))
    }
}

impl<Env, A> Thunk<Env, Thunk<Env, A>>
where
    Env: 'static,
    A: Clone + Send + 'static,
{
    /// Collapses a thunk of thunks.
    ///
    /// The outer layer is evaluated first; on success the inner thunk is
    /// evaluated with the same environment.
    pub fn flatten(&self) -> Thunk<Env, A> {
        let outer = self.clone();
        Thunk::lazy(move |env| outer.value(env).bind(|inner| inner.value(env)))
    }
}

fn invoke<Env, A>(function: &ThunkFn<Env, A>, env: &Env) -> Fin<A> {
    catch_unwind(AssertUnwindSafe(|| function(env))).unwrap_or_else(|payload| {
        let error = Error::from_panic(payload.as_ref());
        tracing::warn!(error = %error, "intercepted panic while evaluating thunk");
        Fin::Fail(error)
    })
}

impl<Env, A: fmt::Debug> fmt::Debug for Thunk<Env, A> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(state) = self.cell.try_lock() else {
            return formatter.write_str("Thunk(<evaluating>)");
        };
        match &*state {
            ThunkState::Unevaluated(_) => formatter.write_str("Thunk(<unevaluated>)"),
            ThunkState::Evaluated { result, .. } | ThunkState::Constant(result) => {
                formatter.debug_tuple("Thunk").field(result).finish()
            }
        }
    }
}
