//! `Aff` - the asynchronous sibling of [`Eff`].
//!
//! `Aff<Env, A>` is the minimal asynchronous effect the synchronous core
//! hands off to: a re-runnable function from an environment to a future of
//! [`Fin<A>`]. Scheduling is left to whatever executor polls the future.
//!
//! Environments of async effects carry their cancellation capability through
//! [`HasCancel`]. Evaluation checks it before every poll and stops with
//! [`Error::cancelled`] once it is raised.
//!
//! Every `*_async` combinator on [`Eff`] runs the synchronous source to
//! completion first and only then awaits the asynchronous part, with the
//! same environment.
//!
//! # Examples
//!
//! ```rust
//! use effkit::control::Fin;
//! use effkit::effect::{Aff, Eff};
//!
//! #[tokio::main]
//! async fn main() {
//!     let remote = Aff::effect(|()| async { 40 });
//!     let total = Eff::<(), _>::success(2).bind_async(move |local| remote.clone().map(move |x| x + local));
//!     assert_eq!(total.run_io(()).await, Fin::Succ(42));
//! }
//! ```

use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures::FutureExt;
use futures::future::BoxFuture;
use pin_project_lite::pin_project;

use super::{Branch, Eff, Error, PureEff};
use crate::control::Fin;

/// An environment that can signal cancellation to async effects.
///
/// # Examples
///
/// ```rust
/// use effkit::effect::HasCancel;
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicBool, Ordering};
///
/// #[derive(Clone, Default)]
/// struct RequestEnv {
///     cancelled: Arc<AtomicBool>,
/// }
///
/// impl HasCancel for RequestEnv {
///     fn is_cancelled(&self) -> bool {
///         self.cancelled.load(Ordering::SeqCst)
///     }
/// }
///
/// let env = RequestEnv::default();
/// assert!(!env.is_cancelled());
/// env.cancelled.store(true, Ordering::SeqCst);
/// assert!(env.is_cancelled());
/// ```
pub trait HasCancel: Clone + Send + Sync + 'static {
    /// Returns `true` once the work running under this environment should stop.
    fn is_cancelled(&self) -> bool;
}

impl HasCancel for () {
    fn is_cancelled(&self) -> bool {
        false
    }
}

type AffFn<Env, A> = Arc<dyn Fn(Env) -> BoxFuture<'static, Fin<A>> + Send + Sync>;

/// A deferred asynchronous computation from an environment to a [`Fin`].
///
/// Unlike [`Eff`], an `Aff` is not memoized: each [`run_io`](Aff::run_io)
/// starts the computation afresh.
pub struct Aff<Env, A> {
    run: AffFn<Env, A>,
}

impl<Env, A> Clone for Aff<Env, A> {
    fn clone(&self) -> Self {
        Self {
            run: Arc::clone(&self.run),
        }
    }
}

impl<Env, A> Aff<Env, A>
where
    Env: HasCancel,
    A: Send + 'static,
{
    /// Lifts an async function that may itself fail.
    pub fn effect_maybe<F, Fut>(function: F) -> Self
    where
        F: Fn(Env) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Fin<A>> + Send + 'static,
    {
        Self {
            run: Arc::new(move |env| function(env).boxed()),
        }
    }

    /// Lifts an async function that always succeeds.
    pub fn effect<F, Fut>(function: F) -> Self
    where
        F: Fn(Env) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = A> + Send + 'static,
    {
        Self::effect_maybe(move |env| function(env).map(Fin::Succ))
    }

    /// An async effect that always succeeds with `value`.
    pub fn success(value: A) -> Self
    where
        A: Clone + Sync,
    {
        Self::effect_maybe(move |_| futures::future::ready(Fin::Succ(value.clone())))
    }

    /// An async effect that always fails with `error`.
    pub fn fail(error: impl Into<Error>) -> Self {
        let error = error.into();
        Self::effect_maybe(move |_| futures::future::ready(Fin::Fail(error.clone())))
    }

    /// Transforms the success value.
    pub fn map<B, F>(self, function: F) -> Aff<Env, B>
    where
        B: Send + 'static,
        F: Fn(A) -> B + Send + Sync + 'static,
    {
        let function = Arc::new(function);
        Aff::effect_maybe(move |env| {
            let source = self.clone();
            let function = Arc::clone(&function);
            async move { source.run_io(env).await.map(|value| function(value)) }
        })
    }

    /// Starts the computation.
    ///
    /// The returned future yields `Fail(Error::cancelled())` as soon as it is
    /// polled with `env` cancelled, and converts a panic raised while polling
    /// into `Fail` with [`ErrorKind::Panic`](super::ErrorKind::Panic).
    pub fn run_io(&self, env: Env) -> BoxFuture<'static, Fin<A>> {
        let run = Arc::clone(&self.run);
        let watched = env.clone();
        let guarded = AssertUnwindSafe(async move { run(env).await })
            .catch_unwind()
            .map(|outcome| {
                outcome.unwrap_or_else(|payload| {
                    let error = Error::from_panic(payload.as_ref());
                    tracing::warn!(error = %error, "intercepted panic while running async effect");
                    Fin::Fail(error)
                })
            });
        CancelAware {
            env: watched,
            inner: guarded,
        }
        .boxed()
    }
}

pin_project! {
    /// Polls `inner` until it completes or `env` is cancelled.
    struct CancelAware<Env, Fut> {
        env: Env,
        #[pin]
        inner: Fut,
    }
}

impl<Env, Fut, A> Future for CancelAware<Env, Fut>
where
    Env: HasCancel,
    Fut: Future<Output = Fin<A>>,
{
    type Output = Fin<A>;

    fn poll(self: Pin<&mut Self>, context: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.project();
        if this.env.is_cancelled() {
            tracing::debug!("async effect cancelled");
            return Poll::Ready(Fin::Fail(Error::cancelled()));
        }
        this.inner.poll(context)
    }
}

/// One arm of an async recovery combinator.
pub enum AsyncBranch<Env, In, B> {
    /// A synchronous arm.
    Sync(Branch<Env, In, B>),
    /// An asynchronous effect, ignoring the input.
    Async(Aff<Env, B>),
}

impl<Env, In, B> AsyncBranch<Env, In, B>
where
    Env: HasCancel,
    B: Clone + Send + Sync + 'static,
{
    async fn run(&self, input: In, env: Env) -> Fin<B> {
        match self {
            Self::Sync(branch) => branch.run(input, &env),
            Self::Async(effect) => effect.run_io(env).await,
        }
    }
}

impl<Env, In, B> From<Branch<Env, In, B>> for AsyncBranch<Env, In, B> {
    fn from(branch: Branch<Env, In, B>) -> Self {
        Self::Sync(branch)
    }
}

impl<Env, In, B> From<Aff<Env, B>> for AsyncBranch<Env, In, B> {
    fn from(effect: Aff<Env, B>) -> Self {
        Self::Async(effect)
    }
}

// =============================================================================
// Eff -> Aff interop
// =============================================================================

impl<Env, A> Eff<Env, A>
where
    Env: HasCancel,
    A: Clone + Send + Sync + 'static,
{
    /// Converts into an async effect that evaluates this one when run.
    ///
    /// The conversion is one-way; the memo cell is shared with `self`.
    pub fn to_async(self) -> Aff<Env, A> {
        Aff::effect_maybe(move |env: Env| futures::future::ready(self.run_io(&env)))
    }

    /// Async form of [`match_with`](Eff::match_with).
    ///
    /// The source runs first; the selected arm is then awaited.
    pub fn match_async<B>(
        self,
        succ: impl Into<AsyncBranch<Env, A, B>>,
        fail: impl Into<AsyncBranch<Env, Error, B>>,
    ) -> Aff<Env, B>
    where
        B: Clone + Send + Sync + 'static,
    {
        let succ = Arc::new(succ.into());
        let fail = Arc::new(fail.into());
        Aff::effect_maybe(move |env: Env| {
            let source = self.clone();
            let succ = Arc::clone(&succ);
            let fail = Arc::clone(&fail);
            async move {
                match source.run_io(&env) {
                    Fin::Succ(value) => succ.run(value, env).await,
                    Fin::Fail(error) => fail.run(error, env).await,
                }
            }
        })
    }

    /// Async form of [`if_fail_with`](Eff::if_fail_with).
    pub fn if_fail_async_with(self, alternative: impl Into<AsyncBranch<Env, Error, A>>) -> Aff<Env, A> {
        let alternative = Arc::new(alternative.into());
        Aff::effect_maybe(move |env: Env| {
            let source = self.clone();
            let alternative = Arc::clone(&alternative);
            async move {
                match source.run_io(&env) {
                    success @ Fin::Succ(_) => success,
                    Fin::Fail(error) => alternative.run(error, env).await,
                }
            }
        })
    }

    /// Replaces a failure with the outcome of an async effect.
    pub fn if_fail_async(self, alternative: Aff<Env, A>) -> Aff<Env, A> {
        self.if_fail_async_with(alternative)
    }

    /// Runs the async effect built by `function` on success; its failure is
    /// ignored and the result is always `Succ(())`.
    pub fn iter_async<F>(self, function: F) -> Aff<Env, ()>
    where
        F: Fn(A) -> Aff<Env, ()> + Send + Sync + 'static,
    {
        let function = Arc::new(function);
        Aff::effect_maybe(move |env: Env| {
            let source = self.clone();
            let function = Arc::clone(&function);
            async move {
                if let Fin::Succ(value) = source.run_io(&env) {
                    let _ = function(value).run_io(env).await;
                }
                Fin::Succ(())
            }
        })
    }

    /// Runs the async effect built by `function` on success; its failure
    /// replaces the outcome.
    pub fn tap_async<F>(self, function: F) -> Aff<Env, A>
    where
        F: Fn(&A) -> Aff<Env, ()> + Send + Sync + 'static,
    {
        let function = Arc::new(function);
        Aff::effect_maybe(move |env: Env| {
            let source = self.clone();
            let function = Arc::clone(&function);
            async move {
                let result = source.run_io(&env);
                if let Fin::Succ(value) = &result {
                    let nested = function(value);
                    if let Fin::Fail(error) = nested.run_io(env).await {
                        return Fin::Fail(error);
                    }
                }
                result
            }
        })
    }

    /// Sequences an async dependent computation.
    pub fn bind_async<B, F>(self, function: F) -> Aff<Env, B>
    where
        B: Clone + Send + Sync + 'static,
        F: Fn(A) -> Aff<Env, B> + Send + Sync + 'static,
    {
        let function = Arc::new(function);
        Aff::effect_maybe(move |env: Env| {
            let source = self.clone();
            let function = Arc::clone(&function);
            async move {
                match source.run_io(&env) {
                    Fin::Succ(value) => function(value).run_io(env).await,
                    Fin::Fail(error) => Fin::Fail(error),
                }
            }
        })
    }
}

impl<Env, A> Eff<Env, Aff<Env, A>>
where
    Env: HasCancel,
    A: Clone + Send + Sync + 'static,
{
    /// Collapses an effect producing an async effect.
    pub fn flatten_async(self) -> Aff<Env, A> {
        self.bind_async(|inner| inner)
    }
}

impl<A> PureEff<A>
where
    A: Clone + Send + Sync + 'static,
{
    /// Converts into an async effect over any cancellable environment.
    pub fn to_async<Env: HasCancel>(self) -> Aff<Env, A> {
        self.with_env::<Env>().to_async()
    }
}
