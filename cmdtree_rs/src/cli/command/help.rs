//! Help listing for an action node.

use std::fmt::Write as _;
use std::io::Write;

use crate::error::{ArgumentError, CommandError};
use crate::tree::{ActionNode, Builtin, CommandTree, ShellMode};

const ACTIONS_HEADER: &str = "Available actions:";
const ACTIONS_HINT: &str = "[ Type \"help [action-name]\" to get more information about that action ]";
const INDENT: &str = "    ";

/// Render the listing for `node`: its path and description, then every
/// visible child in declaration order.
pub fn render_help(tree: &CommandTree, node: &ActionNode) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}{}", node.path(), describe(node.description()));

    let visible: Vec<&ActionNode> = node
        .children()
        .iter()
        .filter(|child| is_listed(tree, child))
        .collect();
    if visible.is_empty() {
        return out;
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "{ACTIONS_HEADER}");
    let _ = writeln!(out, "{ACTIONS_HINT}");
    let _ = writeln!(out);
    for child in visible {
        let _ = writeln!(out, "{INDENT}{}{}", child.name(), describe(child.description()));
    }
    out
}

/// Built-in `help [action-name]` invoked on `target`.
pub fn run_help(
    tree: &CommandTree,
    target: &ActionNode,
    arguments: &[String],
    out: &mut dyn Write,
) -> Result<(), CommandError> {
    let node = match arguments {
        [] => target,
        [name] => target
            .child(name)
            .ok_or_else(|| CommandError::UnknownAction(name.clone()))?,
        _ => return Err(ArgumentError::HelpArguments.into()),
    };
    write!(out, "{}", render_help(tree, node))?;
    Ok(())
}

/// The shell is listed only when explicitly enabled.
fn is_listed(tree: &CommandTree, child: &ActionNode) -> bool {
    child.builtin() != Some(Builtin::Shell) || tree.shell().mode() == ShellMode::Enabled
}

fn describe(description: &str) -> String {
    if description.is_empty() {
        String::new()
    } else {
        format!(" -- {description}")
    }
}
