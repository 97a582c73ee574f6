//! Greedy action-path resolution.

use tracing::trace;

use crate::cli::InvocationMode;
use crate::error::{ArgumentError, CommandError};
use crate::tree::ActionNode;

/// Result of walking the tree: the matched path and the tokens left for the
/// terminal node.
#[derive(Debug)]
pub struct Resolution<'t, 'a> {
    /// Root-first; never empty.
    pub path: Vec<&'t ActionNode>,
    pub remaining: &'a [String],
}

impl<'t> Resolution<'t, '_> {
    /// The terminal node.
    pub fn node(&self) -> &'t ActionNode {
        self.path[self.path.len() - 1]
    }

    /// The node above the terminal one, or the terminal node itself for the root.
    pub fn parent(&self) -> &'t ActionNode {
        let len = self.path.len();
        self.path[len.saturating_sub(2)]
    }
}

/// Follow exact child-name matches from `root` for as long as they last.
///
/// Returns the matched path and the index of the first unconsumed token.
/// Empty tokens and tokens starting with `-` stop the descent.
pub fn descend<'t>(root: &'t ActionNode, tokens: &[String]) -> (Vec<&'t ActionNode>, usize) {
    let mut path = vec![root];
    let mut node = root;
    let mut consumed = 0;

    for token in tokens {
        if token.is_empty() || token.starts_with('-') {
            break;
        }
        match node.child(token) {
            Some(child) => {
                path.push(child);
                node = child;
                consumed += 1;
            }
            None => break,
        }
    }
    (path, consumed)
}

/// Resolve `tokens` against the tree rooted at `root`.
///
/// In [`InvocationMode::Shell`] the first token must name a root child.
/// A terminal node that takes neither arguments nor options rejects its
/// first remaining token.
pub fn resolve<'t, 'a>(
    root: &'t ActionNode,
    tokens: &'a [String],
    mode: InvocationMode,
) -> Result<Resolution<'t, 'a>, CommandError> {
    let (path, consumed) = descend(root, tokens);
    let remaining = &tokens[consumed..];

    if mode == InvocationMode::Shell
        && consumed == 0
        && let Some(token) = remaining.first()
    {
        return Err(CommandError::UnknownAction(token.clone()));
    }

    let resolution = Resolution { path, remaining };
    let node = resolution.node();
    if !node.arguments_enabled()
        && node.options().is_empty()
        && let Some(token) = remaining.first()
    {
        return Err(ArgumentError::InvalidArgument(token.clone()).into());
    }

    trace!(
        action = node.path(),
        remaining = resolution.remaining.len(),
        "resolved action path"
    );
    Ok(resolution)
}
