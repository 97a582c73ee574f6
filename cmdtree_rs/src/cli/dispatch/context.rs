//! Execution context handed to handlers and hooks.

use std::fmt::Display;
use std::io::{self, Write};

use crate::cli::parser::OptionValues;
use crate::colors::Painter;
use crate::tree::ActionNode;
use crate::types::OptionValue;

/// Everything a handler can see about its invocation.
pub struct Context<'a> {
    node: &'a ActionNode,
    options: &'a OptionValues,
    arguments: &'a [String],
    painter: Painter,
    out: &'a mut dyn Write,
}

impl<'a> Context<'a> {
    pub(crate) fn new(
        node: &'a ActionNode,
        options: &'a OptionValues,
        arguments: &'a [String],
        painter: Painter,
        out: &'a mut dyn Write,
    ) -> Self {
        Self {
            node,
            options,
            arguments,
            painter,
            out,
        }
    }

    /// Name of the running action.
    pub fn name(&self) -> &str {
        self.node.name()
    }

    /// Display path of the running action, e.g. `my-command foo bar`.
    pub fn path(&self) -> &str {
        self.node.path()
    }

    pub fn node(&self) -> &ActionNode {
        self.node
    }

    /// Whether `--name` was supplied explicitly.
    pub fn is_set(&self, name: &str) -> bool {
        self.options.is_set(name)
    }

    pub fn value(&self, name: &str) -> Option<&OptionValue> {
        self.options.get(name)
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.options.text(name)
    }

    pub fn number(&self, name: &str) -> Option<i64> {
        self.options.number(name)
    }

    pub fn flag(&self, name: &str) -> bool {
        self.options.flag(name)
    }

    pub fn options(&self) -> &OptionValues {
        self.options
    }

    /// Positional arguments in the order given.
    pub fn arguments(&self) -> &[String] {
        self.arguments
    }

    pub fn painter(&self) -> Painter {
        self.painter
    }

    /// The invocation's output sink.
    pub fn out(&mut self) -> &mut dyn Write {
        &mut *self.out
    }

    /// Write `line` and a newline to the output sink.
    pub fn println(&mut self, line: impl Display) -> io::Result<()> {
        writeln!(self.out, "{line}")
    }
}
