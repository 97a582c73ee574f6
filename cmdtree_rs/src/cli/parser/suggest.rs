//! Action suggestions for mistyped names.

use strsim::levenshtein;

use crate::tree::ActionNode;

/// Largest edit distance still considered a typo.
const MAX_DISTANCE: usize = 2;

/// Suggest the child of `node` closest to `input` using Levenshtein distance.
/// Returns Some(name) if a close match is found (distance <= 2).
pub fn suggest_action<'n>(node: &'n ActionNode, input: &str) -> Option<&'n str> {
    let input_lower = input.to_lowercase();
    let mut best_match: Option<(&str, usize)> = None;

    for child in node.children() {
        let distance = levenshtein(&input_lower, child.name());
        if distance > MAX_DISTANCE {
            continue;
        }
        match best_match {
            Some((_, best)) if best <= distance => {}
            _ => best_match = Some((child.name(), distance)),
        }
    }

    best_match.map(|(name, _)| name)
}
