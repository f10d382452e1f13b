//! Property-based tests for Eff laws.
//!
//! This module verifies that Eff satisfies:
//!
//! - **Functor Laws**: identity and composition
//! - **Monad Laws**: left identity, right identity, associativity
//! - **Alternation**: left-biased choice with `|`
//!
//! Two effects are considered equal when they produce the same outcome for
//! the same environment.

use effkit::control::Fin;
use effkit::effect::{Eff, Error, PureEff};
use proptest::prelude::*;

fn reader(offset: i32) -> Eff<i32, i32> {
    Eff::effect(move |env: &i32| env.wrapping_add(offset))
}

fn failing_or(value: i32, fails: bool) -> Eff<i32, i32> {
    if fails {
        Eff::fail(Error::new("generated failure"))
    } else {
        Eff::success(value)
    }
}

// =============================================================================
// Functor Laws
// =============================================================================

proptest! {
    /// Identity: eff.map(|x| x) == eff
    #[test]
    fn prop_eff_functor_identity(offset in any::<i32>(), env in any::<i32>()) {
        let mapped = reader(offset).map(|x| x);
        prop_assert_eq!(mapped.run_io(&env), reader(offset).run_io(&env));
    }
}

proptest! {
    /// Composition: eff.map(f).map(g) == eff.map(|x| g(f(x)))
    #[test]
    fn prop_eff_functor_composition(offset in any::<i32>(), env in any::<i32>()) {
        let function1 = |x: i32| x.wrapping_mul(3);
        let function2 = |x: i32| x.wrapping_sub(7);

        let chained = reader(offset).map(function1).map(function2);
        let composed = reader(offset).map(move |x| function2(function1(x)));

        prop_assert_eq!(chained.run_io(&env), composed.run_io(&env));
    }
}

proptest! {
    /// Failures are untouched by map
    #[test]
    fn prop_eff_map_preserves_failure(message in "[a-z]{1,16}", env in any::<i32>()) {
        let eff: Eff<i32, i32> = Eff::fail(Error::new(message.clone()));
        prop_assert_eq!(eff.map(|x| x + 1).run_io(&env), Fin::Fail(Error::new(message)));
    }
}

// =============================================================================
// Monad Laws
// =============================================================================

proptest! {
    /// Left Identity: Eff::success(a).bind(f) == f(a)
    #[test]
    fn prop_eff_monad_left_identity(value in any::<i32>(), env in any::<i32>()) {
        let function = |x: i32| reader(x);

        let left = Eff::success(value).bind(function);
        let right = function(value);

        prop_assert_eq!(left.run_io(&env), right.run_io(&env));
    }
}

proptest! {
    /// Right Identity: eff.bind(Eff::success) == eff
    #[test]
    fn prop_eff_monad_right_identity(value in any::<i32>(), fails in any::<bool>(), env in any::<i32>()) {
        let left = failing_or(value, fails).bind(Eff::success);
        let right = failing_or(value, fails);

        prop_assert_eq!(left.run_io(&env), right.run_io(&env));
    }
}

proptest! {
    /// Associativity: eff.bind(f).bind(g) == eff.bind(|x| f(x).bind(g))
    #[test]
    fn prop_eff_monad_associativity(offset in any::<i32>(), env in any::<i32>(), threshold in any::<i32>()) {
        let function1 = |x: i32| reader(x);
        let function2 = move |x: i32| failing_or(x, x < threshold);

        let left = reader(offset).bind(function1).bind(function2);
        let right = reader(offset).bind(move |x| function1(x).bind(function2));

        prop_assert_eq!(left.run_io(&env), right.run_io(&env));
    }
}

// =============================================================================
// Alternation
// =============================================================================

proptest! {
    /// A successful left side always wins
    #[test]
    fn prop_eff_alternation_left_success_wins(left in any::<i32>(), right in any::<i32>(), right_fails in any::<bool>()) {
        let eff = Eff::<(), _>::success(left) | Eff::effect_maybe(move |_: &()| {
            if right_fails { Fin::Fail(Error::new("right")) } else { Fin::Succ(right) }
        });
        prop_assert_eq!(eff.run_io(&()), Fin::Succ(left));
    }
}

proptest! {
    /// A failed left side yields the right side's outcome
    #[test]
    fn prop_eff_alternation_left_failure_yields_right(right in any::<i32>(), right_fails in any::<bool>()) {
        let expected = if right_fails { Fin::Fail(Error::new("right")) } else { Fin::Succ(right) };
        let fallback = PureEff::effect_maybe({
            let expected = expected.clone();
            move || expected.clone()
        });

        let eff = Eff::<(), i32>::fail("left") | fallback;
        prop_assert_eq!(eff.run_io(&()), expected);
    }
}

// =============================================================================
// Memoization
// =============================================================================

proptest! {
    /// The first environment decides the memoized outcome
    #[test]
    fn prop_eff_first_environment_wins(first in any::<i32>(), second in any::<i32>()) {
        let eff = reader(0);

        let initial = eff.run_io(&first);
        prop_assert_eq!(eff.run_io(&second), initial);
        prop_assert_eq!(eff.run_io(&second), Fin::Succ(first));
    }
}
