//! # cmdtree
//!
//! **Action tree & invocation engine** for command-line tools with nested
//! sub-commands, typed options and an optional interactive shell.
//!
//! A host program declares a tree of named actions, each with its own
//! options, handler and sub-actions. The engine resolves a token sequence
//! (process arguments or a line typed in the shell) to the deepest matching
//! action, coerces its options, runs the handler and classifies failures.
//!
//! ## Features
//!
//! - **Greedy resolution** - exact, deterministic descent through action names
//! - **Typed options** - `any`, `numeric` and `boolean` kinds with defaults,
//!   required options, short aliases and `--no-<name>` negation
//! - **Built-in help** - a `help` action on every node
//! - **Interactive shell** - numbered prompts, start/stop hooks and pluggable
//!   prompt/banner producers
//! - **Uniform failures** - handler errors surface as
//!   `command '<path>' failed` with the original kind and message
//!
//! ## Quick Start
//!
//! ```rust
//! use cmdtree::{Action, ColorMode, CommandBuilder, OptionSpec, Outcome};
//!
//! let tree = CommandBuilder::new("my-command")
//!     .color(ColorMode::Never)
//!     .action(
//!         Action::new("greet")
//!             .option(OptionSpec::new("name").short('n').with_default("world"))
//!             .handler(|ctx| {
//!                 let name = ctx.text("name").unwrap_or_default().to_string();
//!                 ctx.println(format!("hello {name}"))?;
//!                 Ok(Outcome::Done)
//!             }),
//!     )
//!     .build()
//!     .unwrap();
//!
//! let args: Vec<String> = ["greet", "-n", "cmdtree"].map(String::from).to_vec();
//! let mut out = Vec::new();
//! tree.execute(&args, &mut std::io::empty(), &mut out).unwrap();
//! assert_eq!(String::from_utf8(out).unwrap(), "hello cmdtree\n");
//! ```

// ============================================================================
// Core Modules
// ============================================================================

/// Invocation engine: resolver, coercer, dispatcher, help and shell session.
///
/// # Submodules
///
/// - [`cli::parser`] - Token resolution and option coercion
/// - [`cli::dispatch`] - Handlers, contexts and the dispatcher
/// - [`cli::command`] - Built-in help rendering
/// - [`cli::shell`] - Interactive shell session
/// - [`cli::entrypoint`] - Process-level runner
pub mod cli;

/// Command tree declarations and the validated tree.
pub mod tree;

/// Terminal colour utilities.
pub mod colors;

/// Configuration file support (`.cmdtree/config.toml`).
pub mod config;

/// Error taxonomy.
pub mod error;

/// Shared value types.
pub mod types;

// ============================================================================
// Re-exports
// ============================================================================

pub use cli::{
    Context, DisplayBuilder, DisplayContext, DisplayText, Handler, HandlerResult, InvocationMode,
    OptionValues, Outcome, SessionState, ShellSession,
};
pub use colors::Painter;
pub use config::CmdtreeConfig;
pub use error::{ArgumentError, CommandError, CommandRuntimeError, HandlerError, ValidationError};
pub use tree::{Action, ActionNode, CommandBuilder, CommandTree, Event, Operator, OptionSpec, ShellBuilder, ShellMode};
pub use types::{ColorMode, OptionKind, OptionValue};
