//! Evaluation primitives shared by every effect.
//!
//! - [`Fin`]: the success-or-error outcome of an evaluation
//! - [`Thunk`]: a memoizing cell that turns an environment into a [`Fin`]
//!
//! # Examples
//!
//! ```rust
//! use effkit::control::{Fin, Thunk};
//!
//! let thunk = Thunk::lazy(|env: &String| Fin::Succ(env.len()));
//! let doubled = thunk.map(|length| length * 2);
//!
//! assert_eq!(doubled.value(&"four".to_string()), Fin::Succ(8));
//! // The parent was evaluated through the derived thunk
//! assert!(thunk.is_evaluated());
//! ```

mod fin;
mod thunk;

pub use fin::Fin;
pub use thunk::Thunk;
