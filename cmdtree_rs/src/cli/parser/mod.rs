//! Turning token sequences into a resolved action and typed option values.
//!
//! - [`resolve`] - greedy, exact descent through the action tree
//! - [`coerce`] - option/positional split and type coercion for the terminal node
//! - [`suggest`] - "did you mean" lookup over a node's children

pub mod coerce;
pub mod resolve;
pub mod suggest;

pub use coerce::{Coerced, OptionValues, coerce};
pub use resolve::{Resolution, descend, resolve};
pub use suggest::suggest_action;
