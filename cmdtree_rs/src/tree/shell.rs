//! Shell declaration: availability, naming, display producers and hooks.

use std::fmt;

use crate::cli::dispatch::Context;
use crate::cli::shell::DisplayText;
use crate::error::HandlerError;

use super::option::OptionSpec;

/// Name of the shell action unless renamed.
pub const DEFAULT_SHELL_NAME: &str = "shell";

/// How the root exposes its interactive shell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ShellMode {
    /// Runnable when the root has children, but not listed in help.
    #[default]
    Default,
    /// Runnable and listed in help.
    Enabled,
    /// Not available at all.
    Disabled,
}

/// Session lifecycle points hooks can attach to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    ShellStart,
    ShellStop,
}

/// Callback fired on a session [`Event`]; sees the `shell` invocation's options.
pub type Hook = Box<dyn Fn(&mut Context<'_>) -> Result<(), HandlerError>>;

#[derive(Default)]
pub(crate) struct Hooks {
    start: Vec<Hook>,
    stop: Vec<Hook>,
}

impl Hooks {
    pub(crate) fn add(&mut self, event: Event, hook: Hook) {
        match event {
            Event::ShellStart => self.start.push(hook),
            Event::ShellStop => self.stop.push(hook),
        }
    }

    pub(crate) fn get(&self, event: Event) -> &[Hook] {
        match event {
            Event::ShellStart => &self.start,
            Event::ShellStop => &self.stop,
        }
    }

    fn len(&self) -> usize {
        self.start.len() + self.stop.len()
    }
}

impl fmt::Debug for Hooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hooks")
            .field("start", &self.start.len())
            .field("stop", &self.stop.len())
            .finish()
    }
}

/// Shell declaration passed to [`CommandBuilder::shell`](super::CommandBuilder::shell).
///
/// ```
/// use cmdtree::{Event, OptionSpec, ShellBuilder};
///
/// let shell = ShellBuilder::enabled()
///     .name("console")
///     .description("interactive console")
///     .prompt("> ")
///     .option(OptionSpec::flag("quiet"))
///     .on(Event::ShellStart, |ctx| {
///         ctx.println("welcome")?;
///         Ok(())
///     });
/// # let _ = shell;
/// ```
#[derive(Debug, Default)]
pub struct ShellBuilder {
    pub(crate) mode: ShellMode,
    pub(crate) name: Option<String>,
    pub(crate) description: String,
    pub(crate) prompt: Option<DisplayText>,
    pub(crate) banner: Option<DisplayText>,
    pub(crate) echo_input: Option<bool>,
    pub(crate) options: Vec<OptionSpec>,
    pub(crate) hooks: Hooks,
}

impl ShellBuilder {
    /// Shell in the default mode: runnable, not listed in help.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enabled() -> Self {
        Self::new().mode(ShellMode::Enabled)
    }

    pub fn disabled() -> Self {
        Self::new().mode(ShellMode::Disabled)
    }

    pub fn mode(mut self, mode: ShellMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn prompt(mut self, prompt: impl Into<DisplayText>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    pub fn banner(mut self, banner: impl Into<DisplayText>) -> Self {
        self.banner = Some(banner.into());
        self
    }

    /// Write each line read back after the prompt (on by default).
    pub fn echo_input(mut self, echo: bool) -> Self {
        self.echo_input = Some(echo);
        self
    }

    /// Option accepted by the `shell` action and visible to its hooks.
    pub fn option(mut self, option: OptionSpec) -> Self {
        self.options.push(option);
        self
    }

    /// Shell-level hook; fires before root-level hooks for the same event.
    pub fn on<F>(mut self, event: Event, hook: F) -> Self
    where
        F: Fn(&mut Context<'_>) -> Result<(), HandlerError> + 'static,
    {
        self.hooks.add(event, Box::new(hook));
        self
    }

    /// Fill display settings this declaration leaves open from `base`.
    pub(crate) fn inherit(mut self, base: ShellBuilder) -> Self {
        self.prompt = self.prompt.or(base.prompt);
        self.banner = self.banner.or(base.banner);
        self.echo_input = self.echo_input.or(base.echo_input);
        self
    }

    pub(crate) fn shell_name(&self) -> &str {
        self.name.as_deref().unwrap_or(DEFAULT_SHELL_NAME)
    }

    pub(crate) fn finish(self, root_hooks: Hooks) -> ShellSettings {
        let name = self.shell_name().to_string();
        ShellSettings {
            mode: self.mode,
            name,
            prompt: self.prompt,
            banner: self.banner,
            echo_input: self.echo_input.unwrap_or(true),
            shell_hooks: self.hooks,
            root_hooks,
        }
    }
}

/// Finalized shell settings held by a [`CommandTree`](super::CommandTree).
pub struct ShellSettings {
    mode: ShellMode,
    name: String,
    prompt: Option<DisplayText>,
    banner: Option<DisplayText>,
    echo_input: bool,
    shell_hooks: Hooks,
    root_hooks: Hooks,
}

impl ShellSettings {
    pub fn mode(&self) -> ShellMode {
        self.mode
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn prompt(&self) -> Option<&DisplayText> {
        self.prompt.as_ref()
    }

    pub fn banner(&self) -> Option<&DisplayText> {
        self.banner.as_ref()
    }

    pub fn echo_input(&self) -> bool {
        self.echo_input
    }

    /// Hooks for `event` in firing order: shell-level, then root-level.
    pub fn hooks(&self, event: Event) -> impl Iterator<Item = &Hook> {
        self.shell_hooks
            .get(event)
            .iter()
            .chain(self.root_hooks.get(event))
    }

    pub fn hook_count(&self) -> usize {
        self.shell_hooks.len() + self.root_hooks.len()
    }
}

impl fmt::Debug for ShellSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShellSettings")
            .field("mode", &self.mode)
            .field("name", &self.name)
            .field("prompt", &self.prompt)
            .field("banner", &self.banner)
            .field("echo_input", &self.echo_input)
            .field("shell_hooks", &self.shell_hooks)
            .field("root_hooks", &self.root_hooks)
            .finish()
    }
}
