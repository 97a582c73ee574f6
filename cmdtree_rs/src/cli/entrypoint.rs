//! Process-level runner shared by binaries built on a [`CommandTree`].
//!
//! Wires stdin/stdout into a single invocation, reports failures on stderr
//! with a "Did you mean" hint, and maps the result to an exit code.

use std::io::{self, Write};
use std::process::ExitCode;

use tracing::debug;

use crate::cli::parser::{descend, suggest_action};
use crate::error::CommandError;
use crate::tree::CommandTree;

/// Exit code reported for failed invocations.
pub const FAILURE_CODE: u8 = 1;

/// Run `args` (program name excluded) against `tree` using the process's
/// standard streams.
pub fn run(tree: &CommandTree, args: &[String]) -> ExitCode {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let stdout = io::stdout();
    let mut output = stdout.lock();

    match tree.execute(args, &mut input, &mut output) {
        Ok(code) => {
            debug!(code, "invocation finished");
            exit_code(code)
        }
        Err(err) => {
            let _ = output.flush();
            eprintln!("{}", report(tree, args, &err));
            ExitCode::from(FAILURE_CODE)
        }
    }
}

/// Error text as shown to the user, with a suggestion when the failing
/// token looks like a mistyped action name.
pub fn report(tree: &CommandTree, args: &[String], err: &CommandError) -> String {
    let Some(token) = err.token() else {
        return err.to_string();
    };
    let (path, _) = descend(tree.root(), args);
    let node = path[path.len() - 1];
    match suggest_action(node, token) {
        Some(suggestion) => format!("{err}\nDid you mean: {suggestion}?"),
        None => err.to_string(),
    }
}

fn exit_code(code: i32) -> ExitCode {
    u8::try_from(code).map_or(ExitCode::from(FAILURE_CODE), ExitCode::from)
}
