//! The declared command tree.
//!
//! Builders ([`CommandBuilder`], [`Action`], [`OptionSpec`], [`ShellBuilder`])
//! collect declarations; [`CommandBuilder::build`] validates them and returns
//! an immutable [`CommandTree`] of [`ActionNode`]s with the built-in `help`
//! and `shell` actions already attached.

pub mod action;
pub mod command;
pub mod option;
pub mod shell;

use std::sync::OnceLock;

use regex::Regex;

pub use action::{Action, ActionNode, Builtin};
pub use command::{CommandBuilder, CommandTree, HELP_ACTION};
pub use option::{Operator, OptionSpec};
pub use shell::{Event, Hook, ShellBuilder, ShellMode, ShellSettings};

fn name_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("valid regex literal"))
}

/// Action and option names share one grammar.
pub(crate) fn is_valid_name(name: &str) -> bool {
    name_regex().is_match(name)
}
