//! Memoizing effects over an environment.
//!
//! This module provides the effect types and their combinator algebra:
//!
//! - [`Eff`]: A deferred computation reading an environment, evaluated at
//!   most once until cleared
//! - [`PureEff`]: The same without an environment; usable wherever an
//!   [`Eff`] is expected
//! - [`Error`]: The failure type carried by [`Fin`](crate::control::Fin)
//! - [`Branch`]: The arms accepted by the recovery combinators
//!
//! With the `async` feature the asynchronous sibling [`Aff`] is available,
//! together with the `*_async` combinators on [`Eff`].
//!
//! # Example
//!
//! ```rust
//! use effkit::control::Fin;
//! use effkit::effect::{Eff, PureEff};
//!
//! let greeting = Eff::effect(|name: &String| format!("hello, {name}"));
//! let fallback = PureEff::success("hello, stranger".to_string());
//!
//! let safe = greeting.filter(|text| text.len() < 32) | fallback;
//! assert_eq!(safe.run_io(&"effkit".to_string()), Fin::Succ("hello, effkit".to_string()));
//! ```

#[cfg(feature = "async")]
mod aff;
mod branch;
mod combinators;
mod eff;
mod error;
mod pure_eff;

#[cfg(feature = "async")]
pub use aff::{Aff, AsyncBranch, HasCancel};
pub use branch::Branch;
pub use combinators::zip;
pub use eff::Eff;
pub use error::{CANCELLED_MESSAGE, Error, ErrorKind};
pub use pure_eff::PureEff;
