//! Root declaration and the validated, immutable command tree.

use std::fmt;
use std::io::{BufRead, Write};

use tracing::debug;

use crate::cli::InvocationMode;
use crate::cli::dispatch::{Context, Dispatcher, Handler, HandlerResult, Streams};
use crate::colors::Painter;
use crate::config::CmdtreeConfig;
use crate::error::{CommandError, HandlerError, ValidationError};
use crate::types::ColorMode;

use super::action::{Action, ActionNode, Builtin};
use super::is_valid_name;
use super::option::{OptionSpec, validate_options};
use super::shell::{Event, Hooks, ShellBuilder, ShellMode, ShellSettings};

/// Name of the built-in help action.
pub const HELP_ACTION: &str = "help";

/// Declaration of a whole command: the root action plus command-wide settings.
///
/// ```
/// use cmdtree::{Action, CommandBuilder, ColorMode, Outcome, OptionSpec};
///
/// let tree = CommandBuilder::new("my-command")
///     .description("demo")
///     .color(ColorMode::Never)
///     .action(
///         Action::new("foo").action(
///             Action::new("bar")
///                 .option(OptionSpec::new("opt"))
///                 .handler(|ctx| {
///                     ctx.println("bar executed")?;
///                     Ok(Outcome::Done)
///                 }),
///         ),
///     )
///     .build()
///     .unwrap();
///
/// let mut out = Vec::new();
/// let args: Vec<String> = vec!["foo".into(), "bar".into()];
/// let code = tree.execute(&args, &mut std::io::empty(), &mut out).unwrap();
/// assert_eq!(code, 0);
/// assert_eq!(String::from_utf8(out).unwrap(), "bar executed\n");
/// ```
pub struct CommandBuilder {
    root: Action,
    color: ColorMode,
    help: bool,
    shell: ShellBuilder,
    hooks: Hooks,
}

impl CommandBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            root: Action::new(name),
            color: ColorMode::default(),
            help: true,
            shell: ShellBuilder::default(),
            hooks: Hooks::default(),
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.root = self.root.description(description);
        self
    }

    pub fn handler<F>(self, handler: F) -> Self
    where
        F: Fn(&mut Context<'_>) -> HandlerResult + 'static,
    {
        self.handler_with(handler)
    }

    pub fn handler_with(mut self, handler: impl Handler + 'static) -> Self {
        self.root = self.root.handler_with(handler);
        self
    }

    pub fn option(mut self, option: OptionSpec) -> Self {
        self.root = self.root.option(option);
        self
    }

    pub fn action(mut self, action: Action) -> Self {
        self.root = self.root.action(action);
        self
    }

    pub fn arguments(mut self, enabled: bool) -> Self {
        self.root = self.root.arguments(enabled);
        self
    }

    pub fn color(mut self, mode: ColorMode) -> Self {
        self.color = mode;
        self
    }

    /// Attach the built-in `help` action to every node (on by default).
    pub fn help(mut self, enabled: bool) -> Self {
        self.help = enabled;
        self
    }

    /// Configure the root's shell. Display settings left unset here keep
    /// values applied earlier (e.g. from [`CommandBuilder::config`]).
    pub fn shell(mut self, shell: ShellBuilder) -> Self {
        let previous = std::mem::take(&mut self.shell);
        self.shell = shell.inherit(previous);
        self
    }

    /// Root-level hook; fires after the shell-level hooks for the same event.
    pub fn on<F>(mut self, event: Event, hook: F) -> Self
    where
        F: Fn(&mut Context<'_>) -> Result<(), HandlerError> + 'static,
    {
        self.hooks.add(event, Box::new(hook));
        self
    }

    /// Apply file configuration. Later builder calls override it.
    pub fn config(mut self, config: &CmdtreeConfig) -> Self {
        if let Some(color) = config.color {
            self.color = color;
        }
        if let Some(prompt) = &config.shell.prompt {
            self.shell.prompt = Some(prompt.clone().into());
        }
        if let Some(banner) = &config.shell.banner {
            self.shell.banner = Some(banner.clone().into());
        }
        if let Some(echo) = config.shell.echo_input {
            self.shell.echo_input = Some(echo);
        }
        self
    }

    /// Validate every declaration and produce the immutable tree.
    pub fn build(self) -> Result<CommandTree, ValidationError> {
        let CommandBuilder {
            root,
            color,
            help,
            shell,
            hooks,
        } = self;

        let mut root = finalize(root, None, help)?;

        if shell.mode != ShellMode::Disabled && !root.children.is_empty() {
            root.children.push(shell_node(&root, &shell, help)?);
        }

        let shell = shell.finish(hooks);
        debug!(
            command = %root.name,
            children = root.children.len(),
            shell = ?shell.mode(),
            "built command tree"
        );
        Ok(CommandTree {
            root,
            color,
            help,
            shell,
        })
    }
}

impl fmt::Debug for CommandBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandBuilder")
            .field("root", &self.root)
            .field("color", &self.color)
            .field("help", &self.help)
            .field("shell", &self.shell)
            .finish()
    }
}

fn finalize(action: Action, parent: Option<&str>, help: bool) -> Result<ActionNode, ValidationError> {
    if !is_valid_name(&action.name) {
        return Err(ValidationError::InvalidName {
            what: "action",
            name: action.name,
        });
    }
    let path = match parent {
        Some(parent) => format!("{parent} {}", action.name),
        None => action.name.clone(),
    };
    if !action.arguments && !action.options.is_empty() {
        return Err(ValidationError::OptionsWithoutArguments { action: path });
    }
    validate_options(&path, &action.options)?;

    let mut children: Vec<ActionNode> = Vec::with_capacity(action.actions.len() + 1);
    for child in action.actions {
        if help && child.name == HELP_ACTION {
            return Err(ValidationError::ReservedAction {
                parent: path,
                name: child.name,
                builtin: Builtin::Help.name(),
            });
        }
        if children.iter().any(|sibling| sibling.name == child.name) {
            return Err(ValidationError::DuplicateAction {
                parent: path,
                name: child.name,
            });
        }
        children.push(finalize(child, Some(&path), help)?);
    }
    if help {
        children.push(help_node(&path));
    }

    Ok(ActionNode {
        name: action.name,
        description: action.description,
        path,
        handler: action.handler,
        options: action.options,
        children,
        arguments_enabled: action.arguments,
        builtin: None,
    })
}

fn help_node(parent_path: &str) -> ActionNode {
    ActionNode {
        name: HELP_ACTION.to_string(),
        description: format!(
            "The help action for command \"{parent_path}\" which provides details and usage information on how to use the command."
        ),
        path: format!("{parent_path} {HELP_ACTION}"),
        handler: None,
        options: Vec::new(),
        children: Vec::new(),
        arguments_enabled: true,
        builtin: Some(Builtin::Help),
    }
}

fn shell_node(root: &ActionNode, shell: &ShellBuilder, help: bool) -> Result<ActionNode, ValidationError> {
    let name = shell.shell_name();
    if !is_valid_name(name) {
        return Err(ValidationError::InvalidName {
            what: "shell",
            name: name.to_string(),
        });
    }
    let taken = root.children.iter().any(|child| child.name == name) || (help && name == HELP_ACTION);
    if taken {
        return Err(ValidationError::ReservedAction {
            parent: root.path.clone(),
            name: name.to_string(),
            builtin: Builtin::Shell.name(),
        });
    }
    let path = format!("{} {name}", root.path);
    validate_options(&path, &shell.options)?;

    Ok(ActionNode {
        name: name.to_string(),
        description: shell.description.clone(),
        path,
        handler: None,
        options: shell.options.clone(),
        children: Vec::new(),
        arguments_enabled: false,
        builtin: Some(Builtin::Shell),
    })
}

/// A validated command tree, ready to execute invocations.
pub struct CommandTree {
    root: ActionNode,
    color: ColorMode,
    help: bool,
    shell: ShellSettings,
}

impl CommandTree {
    pub fn root(&self) -> &ActionNode {
        &self.root
    }

    pub fn name(&self) -> &str {
        self.root.name()
    }

    pub fn color(&self) -> ColorMode {
        self.color
    }

    pub fn painter(&self) -> Painter {
        Painter::new(self.color)
    }

    pub fn help_enabled(&self) -> bool {
        self.help
    }

    pub fn shell(&self) -> &ShellSettings {
        &self.shell
    }

    /// Node reached by following `names` from the root, if any.
    pub fn find(&self, names: &[&str]) -> Option<&ActionNode> {
        names
            .iter()
            .try_fold(&self.root, |node, name| node.child(name))
    }

    /// Run one process-level invocation. `args` excludes the program name;
    /// `input` is only read when the invocation starts a shell.
    pub fn execute(
        &self,
        args: &[String],
        input: &mut dyn BufRead,
        output: &mut dyn Write,
    ) -> Result<i32, CommandError> {
        let mut streams = Streams::new(input, output);
        let outcome = Dispatcher::new(self, InvocationMode::Process).dispatch(args, &mut streams)?;
        Ok(outcome.exit_code())
    }
}

impl fmt::Debug for CommandTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandTree")
            .field("root", &self.root)
            .field("color", &self.color)
            .field("help", &self.help)
            .field("shell", &self.shell)
            .finish()
    }
}
