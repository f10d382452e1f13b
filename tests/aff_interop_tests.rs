#![cfg(feature = "async")]
//! Tests for handing synchronous effects over to async code.

use effkit::control::Fin;
use effkit::effect::{Aff, AsyncBranch, Branch, Eff, Error, HasCancel, PureEff};
use rstest::rstest;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

#[derive(Clone, Default)]
struct TestEnv {
    cancelled: Arc<AtomicBool>,
    base: i32,
}

impl TestEnv {
    fn with_base(base: i32) -> Self {
        Self {
            base,
            ..Self::default()
        }
    }

    fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }
}

impl HasCancel for TestEnv {
    fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

fn remote_add(amount: i32) -> Aff<TestEnv, i32> {
    Aff::effect(move |env: TestEnv| async move {
        tokio::task::yield_now().await;
        env.base + amount
    })
}

// =============================================================================
// Conversion
// =============================================================================

#[rstest]
#[tokio::test]
async fn to_async_evaluates_sync_effect() {
    let aff = Eff::effect(|env: &TestEnv| env.base * 2).to_async();
    assert_eq!(aff.run_io(TestEnv::with_base(21)).await, Fin::Succ(42));
}

#[rstest]
#[tokio::test]
async fn pure_to_async_ignores_environment() {
    let aff: Aff<TestEnv, &str> = PureEff::success("pure").to_async();
    assert_eq!(aff.run_io(TestEnv::default()).await, Fin::Succ("pure"));
}

#[rstest]
#[tokio::test]
async fn aff_is_not_memoized() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let aff = Aff::effect(move |()| {
        let counter = Arc::clone(&counter);
        async move { counter.fetch_add(1, Ordering::SeqCst) }
    });

    assert_eq!(aff.run_io(()).await, Fin::Succ(0));
    assert_eq!(aff.run_io(()).await, Fin::Succ(1));
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

// =============================================================================
// Async Combinators
// =============================================================================

#[rstest]
#[tokio::test]
async fn bind_async_runs_sync_source_first() {
    let aff = Eff::effect(|env: &TestEnv| env.base).bind_async(remote_add);
    assert_eq!(aff.run_io(TestEnv::with_base(10)).await, Fin::Succ(20));
}

#[rstest]
#[tokio::test]
async fn bind_async_short_circuits() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let aff = Eff::<TestEnv, i32>::fail("sync failed").bind_async(move |x| {
        counter.fetch_add(1, Ordering::SeqCst);
        remote_add(x)
    });

    assert_eq!(aff.run_io(TestEnv::default()).await, Fin::Fail(Error::new("sync failed")));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[rstest]
#[tokio::test]
async fn match_async_selects_branch_by_outcome() {
    let on_succ = Eff::effect(|env: &TestEnv| env.base).match_async::<i32>(remote_add(1), Branch::value(-1));
    let on_fail = Eff::<TestEnv, i32>::fail("down").match_async::<i32>(
        AsyncBranch::Sync(Branch::function(|x: i32| x)),
        Branch::function(|error: Error| i32::from(error.is_cancelled())),
    );

    assert_eq!(on_succ.run_io(TestEnv::with_base(4)).await, Fin::Succ(5));
    assert_eq!(on_fail.run_io(TestEnv::default()).await, Fin::Succ(0));
}

#[rstest]
#[tokio::test]
async fn if_fail_async_recovers() {
    let recovered = Eff::<TestEnv, i32>::fail("down").if_fail_async(remote_add(100));
    let untouched = Eff::<TestEnv, _>::success(1).if_fail_async(remote_add(100));
    let by_value = Eff::<TestEnv, i32>::fail("down").if_fail_async_with(Branch::value(7));

    assert_eq!(recovered.run_io(TestEnv::with_base(1)).await, Fin::Succ(101));
    assert_eq!(untouched.run_io(TestEnv::with_base(1)).await, Fin::Succ(1));
    assert_eq!(by_value.run_io(TestEnv::default()).await, Fin::Succ(7));
}

#[rstest]
#[tokio::test]
async fn tap_async_propagates_and_iter_async_ignores_failure() {
    let tapped = Eff::<TestEnv, _>::success(5).tap_async(|_| Aff::fail("audit down"));
    let iterated = Eff::<TestEnv, _>::success(5).iter_async(|_| Aff::fail("audit down"));

    assert_eq!(tapped.run_io(TestEnv::default()).await, Fin::Fail(Error::new("audit down")));
    assert_eq!(iterated.run_io(TestEnv::default()).await, Fin::Succ(()));
}

#[rstest]
#[tokio::test]
async fn flatten_async_collapses_layers() {
    let aff = Eff::effect(|env: &TestEnv| remote_add(env.base)).flatten_async();
    assert_eq!(aff.run_io(TestEnv::with_base(3)).await, Fin::Succ(6));
}

// =============================================================================
// Cancellation and Faults
// =============================================================================

#[rstest]
#[tokio::test]
async fn cancelled_environment_stops_evaluation() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let aff = Eff::effect(move |_: &TestEnv| counter.fetch_add(1, Ordering::SeqCst)).to_async();

    let env = TestEnv::default();
    env.cancel();

    let result = aff.run_io(env).await;
    assert!(result.error().is_some_and(Error::is_cancelled));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn cancellation_while_pending_fails_with_cancelled() {
    let aff: Aff<TestEnv, i32> = Aff::effect(|_| async {
        tokio::time::sleep(Duration::from_secs(60)).await;
        1
    });
    let env = TestEnv::default();
    let handle = tokio::spawn(aff.run_io(env.clone()));

    tokio::time::sleep(Duration::from_secs(1)).await;
    env.cancel();
    tokio::time::advance(Duration::from_secs(60)).await;

    let result = handle.await.expect("task panicked");
    assert!(result.error().is_some_and(Error::is_cancelled));
}

#[rstest]
#[tokio::test]
async fn panic_in_async_branch_becomes_failure() {
    fn explode(_: i32) -> Aff<TestEnv, i32> {
        panic!("branch builder exploded")
    }

    let aff = Eff::<TestEnv, _>::success(1).bind_async(explode);
    let result = aff.run_io(TestEnv::default()).await;

    assert!(result.error().is_some_and(Error::is_panic));
}
