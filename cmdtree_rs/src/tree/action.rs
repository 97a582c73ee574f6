//! Action declarations and the finalized nodes built from them.

use std::fmt;

use crate::cli::dispatch::{Context, Handler, HandlerResult};

use super::option::OptionSpec;

/// Declaration of a sub-action, nested under a [`CommandBuilder`](super::CommandBuilder)
/// or another `Action`.
pub struct Action {
    pub(crate) name: String,
    pub(crate) description: String,
    pub(crate) handler: Option<Box<dyn Handler>>,
    pub(crate) options: Vec<OptionSpec>,
    pub(crate) actions: Vec<Action>,
    pub(crate) arguments: bool,
}

impl Action {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            handler: None,
            options: Vec::new(),
            actions: Vec::new(),
            arguments: true,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Run `handler` when this action is invoked.
    pub fn handler<F>(self, handler: F) -> Self
    where
        F: Fn(&mut Context<'_>) -> HandlerResult + 'static,
    {
        self.handler_with(handler)
    }

    /// Like [`Action::handler`], for types implementing [`Handler`].
    pub fn handler_with(mut self, handler: impl Handler + 'static) -> Self {
        self.handler = Some(Box::new(handler));
        self
    }

    pub fn option(mut self, option: OptionSpec) -> Self {
        self.options.push(option);
        self
    }

    pub fn action(mut self, action: Action) -> Self {
        self.actions.push(action);
        self
    }

    /// Allow or reject positional arguments (allowed by default).
    pub fn arguments(mut self, enabled: bool) -> Self {
        self.arguments = enabled;
        self
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("handler", &self.handler.is_some())
            .field("options", &self.options)
            .field("actions", &self.actions)
            .field("arguments", &self.arguments)
            .finish()
    }
}

/// Actions the engine synthesizes itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Builtin {
    Help,
    Shell,
}

impl Builtin {
    pub fn name(self) -> &'static str {
        match self {
            Builtin::Help => "help",
            Builtin::Shell => "shell",
        }
    }
}

/// A finalized command in the tree.
pub struct ActionNode {
    pub(crate) name: String,
    pub(crate) description: String,
    pub(crate) path: String,
    pub(crate) handler: Option<Box<dyn Handler>>,
    pub(crate) options: Vec<OptionSpec>,
    pub(crate) children: Vec<ActionNode>,
    pub(crate) arguments_enabled: bool,
    pub(crate) builtin: Option<Builtin>,
}

impl ActionNode {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Space-separated names from the root, e.g. `my-command foo bar`.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn options(&self) -> &[OptionSpec] {
        &self.options
    }

    /// Declared children first, then the built-in `help` and `shell` nodes.
    pub fn children(&self) -> &[ActionNode] {
        &self.children
    }

    pub fn arguments_enabled(&self) -> bool {
        self.arguments_enabled
    }

    pub fn builtin(&self) -> Option<Builtin> {
        self.builtin
    }

    pub fn has_handler(&self) -> bool {
        self.handler.is_some()
    }

    pub(crate) fn handler(&self) -> Option<&dyn Handler> {
        self.handler.as_deref()
    }

    pub fn child(&self, name: &str) -> Option<&ActionNode> {
        self.children.iter().find(|child| child.name == name)
    }

    pub fn option(&self, name: &str) -> Option<&OptionSpec> {
        self.options.iter().find(|option| option.name == name)
    }

    pub fn option_by_short(&self, short: char) -> Option<&OptionSpec> {
        self.options.iter().find(|option| option.short == Some(short))
    }

    /// Whether any child was declared by the user (built-ins excluded).
    pub fn has_declared_children(&self) -> bool {
        self.children.iter().any(|child| child.builtin.is_none())
    }
}

impl fmt::Debug for ActionNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionNode")
            .field("path", &self.path)
            .field("builtin", &self.builtin)
            .field("handler", &self.handler.is_some())
            .field("options", &self.options)
            .field("children", &self.children)
            .field("arguments_enabled", &self.arguments_enabled)
            .finish()
    }
}
