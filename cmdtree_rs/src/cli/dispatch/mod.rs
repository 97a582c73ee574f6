//! Dispatcher: binds a resolved action to a [`Context`], runs its handler or
//! built-in behaviour, and classifies failures.
//!
//! Resolution and coercion errors are returned as-is; anything raised while
//! the action runs is wrapped into a [`CommandRuntimeError`] carrying the
//! action's display path.

mod context;
mod handler;

use std::io::{BufRead, Write};

use tracing::{debug, warn};

pub use context::Context;
pub use handler::{Handler, HandlerResult, Outcome};

use crate::cli::InvocationMode;
use crate::cli::command::{render_help, run_help};
use crate::cli::parser::{Coerced, OptionValues, Resolution, coerce, resolve};
use crate::cli::shell::ShellSession;
use crate::error::{ArgumentError, CommandError, CommandRuntimeError, NESTED_SHELL_MESSAGE};
use crate::tree::{ActionNode, Builtin, CommandTree};

/// Input and output for one top-level invocation.
///
/// The output sink is flushed when the guard is dropped, on success and
/// failure paths alike.
pub struct Streams<'a> {
    pub(crate) input: &'a mut dyn BufRead,
    pub(crate) output: &'a mut dyn Write,
}

impl<'a> Streams<'a> {
    pub fn new(input: &'a mut dyn BufRead, output: &'a mut dyn Write) -> Self {
        Self { input, output }
    }

    pub fn input(&mut self) -> &mut dyn BufRead {
        &mut *self.input
    }

    pub fn output(&mut self) -> &mut dyn Write {
        &mut *self.output
    }
}

impl Drop for Streams<'_> {
    fn drop(&mut self) {
        if let Err(err) = self.output.flush() {
            warn!(error = %err, "failed to flush output sink");
        }
    }
}

/// Runs token sequences against a [`CommandTree`].
#[derive(Clone, Copy, Debug)]
pub struct Dispatcher<'t> {
    tree: &'t CommandTree,
    mode: InvocationMode,
}

impl<'t> Dispatcher<'t> {
    pub fn new(tree: &'t CommandTree, mode: InvocationMode) -> Self {
        Self { tree, mode }
    }

    pub fn mode(&self) -> InvocationMode {
        self.mode
    }

    /// Resolve, coerce and run one invocation.
    pub fn dispatch(&self, tokens: &[String], streams: &mut Streams<'_>) -> Result<Outcome, CommandError> {
        let resolution = resolve(self.tree.root(), tokens, self.mode)?;
        let node = resolution.node();
        let Coerced { options, arguments } = coerce(node, resolution.remaining)?;

        debug!(
            action = node.path(),
            mode = ?self.mode,
            arguments = arguments.len(),
            "dispatching action"
        );
        self.invoke(&resolution, &options, &arguments, streams)
            .map_err(|cause| {
                debug!(action = node.path(), kind = cause.kind(), "action failed");
                CommandRuntimeError::new(node.path(), cause).into()
            })
    }

    fn invoke(
        &self,
        resolution: &Resolution<'t, '_>,
        options: &OptionValues,
        arguments: &[String],
        streams: &mut Streams<'_>,
    ) -> HandlerResult {
        let node = resolution.node();
        match node.builtin() {
            Some(Builtin::Help) => {
                run_help(self.tree, resolution.parent(), arguments, &mut *streams.output)
                    .map_err(CommandError::into_handler_error)?;
                Ok(Outcome::Done)
            }
            Some(Builtin::Shell) => self.start_shell(node, options, streams),
            None => match node.handler() {
                Some(handler) => {
                    let mut ctx = Context::new(
                        node,
                        options,
                        arguments,
                        self.tree.painter(),
                        &mut *streams.output,
                    );
                    handler.call(&mut ctx)
                }
                None if node.has_declared_children() => {
                    if !arguments.is_empty() {
                        return Err(CommandError::from(ArgumentError::DefaultHelpArguments)
                            .into_handler_error());
                    }
                    write!(streams.output, "{}", render_help(self.tree, node))?;
                    Ok(Outcome::Done)
                }
                None => Ok(Outcome::Done),
            },
        }
    }

    fn start_shell(&self, node: &'t ActionNode, options: &OptionValues, streams: &mut Streams<'_>) -> HandlerResult {
        if self.mode == InvocationMode::Shell {
            return Err(CommandError::IllegalCommand(NESTED_SHELL_MESSAGE.to_string()).into_handler_error());
        }
        let mut session = ShellSession::new(self.tree, node, options.clone());
        let code = session.run(streams)?;
        Ok(Outcome::Exit(code))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::error::HandlerError;
    use crate::tree::{Action, CommandBuilder, OptionSpec};
    use crate::types::ColorMode;

    fn tokens(line: &str) -> Vec<String> {
        line.split_whitespace().map(String::from).collect()
    }

    fn tree() -> CommandTree {
        CommandBuilder::new("my-command")
            .color(ColorMode::Never)
            .action(
                Action::new("foo")
                    .action(
                        Action::new("bar")
                            .option(OptionSpec::new("opt"))
                            .handler(|ctx| {
                                ctx.println("bar executed")?;
                                if ctx.is_set("opt") {
                                    let opt = ctx.text("opt").unwrap_or_default().to_string();
                                    ctx.println(format!("option: {opt}"))?;
                                }
                                Ok(Outcome::Done)
                            }),
                    )
                    .action(Action::new("leaf")),
            )
            .action(Action::new("fail").handler(|_| Err(HandlerError::new("StandardError", "I failed!"))))
            .action(Action::new("parse").handler(|ctx| {
                let n: i64 = ctx.arguments().first().map(String::as_str).unwrap_or("").parse()?;
                ctx.println(n)?;
                Ok(Outcome::Done)
            }))
            .build()
            .unwrap()
    }

    fn run(tree: &CommandTree, mode: InvocationMode, line: &str) -> (Result<Outcome, CommandError>, String) {
        let mut input = Cursor::new(Vec::new());
        let mut output = Vec::new();
        let result = {
            let mut streams = Streams::new(&mut input, &mut output);
            Dispatcher::new(tree, mode).dispatch(&tokens(line), &mut streams)
        };
        (result, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_handler_sees_options() {
        let tree = tree();
        let (result, out) = run(&tree, InvocationMode::Process, "foo bar --opt yes");
        assert_eq!(result.unwrap(), Outcome::Done);
        assert_eq!(out, "bar executed\noption: yes\n");
    }

    #[test]
    fn test_missing_handler_without_children_is_noop() {
        let tree = tree();
        let (result, out) = run(&tree, InvocationMode::Process, "foo leaf");
        assert_eq!(result.unwrap(), Outcome::Done);
        assert_eq!(out, "");
    }

    #[test]
    fn test_default_help_rejects_arguments() {
        let tree = tree();
        let (result, _) = run(&tree, InvocationMode::Process, "foo shell");
        assert_eq!(
            result.unwrap_err().to_string(),
            "command 'my-command foo' failed\n\nCause: IllegalArgument - no arguments allowed for default help action"
        );
    }

    #[test]
    fn test_default_help_lists_children() {
        let tree = tree();
        let (result, out) = run(&tree, InvocationMode::Process, "foo");
        assert!(result.is_ok());
        assert!(out.starts_with("my-command foo\n\nAvailable actions:\n"));
        assert!(out.contains("    bar\n    leaf\n    help -- "));
    }

    #[test]
    fn test_handler_failure_is_wrapped() {
        let tree = tree();
        let (result, _) = run(&tree, InvocationMode::Process, "fail");
        let CommandError::Runtime(err) = result.unwrap_err() else {
            panic!("expected runtime error");
        };
        assert_eq!(err.path(), "my-command fail");
        assert_eq!(err.kind(), "StandardError");
        assert_eq!(err.message(), "I failed!");

        let (result, _) = run(&tree, InvocationMode::Process, "parse x");
        assert_eq!(
            result.unwrap_err().to_string(),
            "command 'my-command parse' failed\n\nCause: ParseIntError - invalid digit found in string"
        );
    }

    #[test]
    fn test_resolution_errors_are_not_wrapped() {
        let tree = tree();
        let (result, _) = run(&tree, InvocationMode::Process, "foo bar --nope");
        assert!(matches!(
            result.unwrap_err(),
            CommandError::IllegalArgument(ArgumentError::UnknownOption(_))
        ));
        let (result, _) = run(&tree, InvocationMode::Shell, "nothing");
        assert!(matches!(result.unwrap_err(), CommandError::UnknownAction(_)));
    }

    #[test]
    fn test_nested_shell_is_illegal() {
        let tree = tree();
        let (result, out) = run(&tree, InvocationMode::Shell, "shell");
        assert_eq!(
            result.unwrap_err().to_string(),
            "command 'my-command shell' failed\n\nCause: IllegalCommand - Cannot run another shell within an already running shell"
        );
        assert_eq!(out, "");
    }

    #[test]
    fn test_help_builtin_errors() {
        let tree = tree();
        let (result, _) = run(&tree, InvocationMode::Process, "help nothing");
        assert_eq!(
            result.unwrap_err().to_string(),
            "command 'my-command help' failed\n\nCause: UnknownAction - unknown action \"nothing\""
        );
        let (result, _) = run(&tree, InvocationMode::Process, "help foo bar");
        assert_eq!(
            result.unwrap_err().to_string(),
            "command 'my-command help' failed\n\nCause: IllegalArgument - too many arguments for help action"
        );
    }
}
