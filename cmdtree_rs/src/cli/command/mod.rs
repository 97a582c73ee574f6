//! Built-in command behaviour.
//!
//! - [`help`] - the `help` listing shared by the built-in action and default help

pub mod help;

pub use help::{render_help, run_help};
