//! Invocation engine: token resolution, dispatch and the interactive shell.
//!
//! # Architecture
//!
//! ```text
//! tokens (argv or a shell line)
//!     │
//!     ▼
//! ┌──────────────┐   path + remaining   ┌──────────────┐
//! │   resolve    │ ───────────────────▶ │    coerce    │
//! └──────────────┘                      └──────┬───────┘
//!                                              │ OptionValues + arguments
//!                                              ▼
//! ┌──────────────┐      Context         ┌──────────────┐
//! │   handler    │ ◀─────────────────── │  Dispatcher  │
//! └──────────────┘                      └──────┬───────┘
//!                                              │ built-in `shell`
//!                                              ▼
//!                                       ┌──────────────┐
//!                                       │ ShellSession │ (dispatches each line)
//!                                       └──────────────┘
//! ```
//!
//! # Module Structure
//!
//! - [`parser`] - Resolver, option coercion and action suggestions
//! - [`dispatch`] - Handler trait, execution context and the dispatcher
//! - [`command`] - Built-in help rendering
//! - [`shell`] - Prompt/banner producers and the shell session loop
//! - [`entrypoint`] - Process-level runner used by binaries

pub mod command;
pub mod dispatch;
pub mod entrypoint;
pub mod parser;
pub mod shell;

pub use dispatch::{Context, Dispatcher, Handler, HandlerResult, Outcome, Streams};
pub use parser::{Coerced, OptionValues, Resolution, coerce, resolve};
pub use shell::{DisplayBuilder, DisplayContext, DisplayText, SessionState, ShellSession};

/// Where a token sequence came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InvocationMode {
    /// Process arguments.
    Process,
    /// A line typed inside a running shell session.
    Shell,
}
