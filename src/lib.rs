//! # effkit
//!
//! Lazy, memoizing effects that read an environment and fail with a
//! structured error instead of panicking.
//!
//! ## Overview
//!
//! - **Outcomes**: [`Fin`](control::Fin) is either `Succ(value)` or `Fail(error)`
//! - **Memoization**: [`Thunk`](control::Thunk) evaluates its computation at
//!   most once and caches the outcome, panics included
//! - **Effects**: [`Eff`](effect::Eff) and [`PureEff`](effect::PureEff) wrap
//!   a thunk with a combinator algebra (map, bind, zip, filter, recovery,
//!   alternation)
//! - **Async interop**: [`Aff`](effect::Aff) bridges into async code
//!
//! ## Feature Flags
//!
//! - `async` (default): The asynchronous [`Aff`](effect::Aff) and the
//!   `*_async` combinators
//!
//! ## Example
//!
//! ```rust
//! use effkit::prelude::*;
//!
//! let port = Eff::effect(|env: &Vec<(String, String)>| {
//!     env.iter()
//!         .find(|(key, _)| key == "PORT")
//!         .map(|(_, value)| value.clone())
//! })
//! .filter(Option::is_some)
//! .map(|value| value.unwrap_or_default())
//! .if_fail_value("8080".to_string());
//!
//! assert_eq!(port.run_io(&Vec::new()), Fin::Succ("8080".to_string()));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
// Note: Disabling redundant_closure_for_method_calls due to clippy 0.1.92 panic bug
#![allow(clippy::redundant_closure_for_method_calls)]

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```rust
/// use effkit::prelude::*;
/// ```
pub mod prelude {
    pub use crate::control::*;
    pub use crate::effect::*;
}

pub mod control;
pub mod effect;
