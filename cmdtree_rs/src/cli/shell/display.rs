//! Prompt and banner producers.
//!
//! A [`DisplayText`] is a constant string, a stateless function, or a
//! stateful [`DisplayBuilder`]; each is rendered against a [`DisplayContext`].

use std::cell::RefCell;
use std::fmt;

use crate::colors::Painter;

/// Session state visible to prompt and banner producers.
#[derive(Clone, Copy, Debug)]
pub struct DisplayContext<'a> {
    /// Root command name.
    pub command: &'a str,
    /// Number of the line about to be read, starting at 1.
    pub invocation: u64,
    /// Painter following the command's colour setting.
    pub painter: Painter,
}

/// Stateful display producer.
pub trait DisplayBuilder {
    fn build(&mut self, ctx: &DisplayContext<'_>) -> String;
}

pub type DisplayFn = Box<dyn Fn(&DisplayContext<'_>) -> String>;

/// One way of producing a prompt or banner string.
pub enum DisplayText {
    Text(String),
    Function(DisplayFn),
    Builder(RefCell<Box<dyn DisplayBuilder>>),
}

impl DisplayText {
    pub fn function<F>(f: F) -> Self
    where
        F: Fn(&DisplayContext<'_>) -> String + 'static,
    {
        DisplayText::Function(Box::new(f))
    }

    pub fn builder(builder: impl DisplayBuilder + 'static) -> Self {
        DisplayText::Builder(RefCell::new(Box::new(builder)))
    }

    pub fn render(&self, ctx: &DisplayContext<'_>) -> String {
        match self {
            DisplayText::Text(text) => text.clone(),
            DisplayText::Function(f) => f(ctx),
            DisplayText::Builder(builder) => builder.borrow_mut().build(ctx),
        }
    }
}

impl From<&str> for DisplayText {
    fn from(text: &str) -> Self {
        DisplayText::Text(text.to_string())
    }
}

impl From<String> for DisplayText {
    fn from(text: String) -> Self {
        DisplayText::Text(text)
    }
}

impl fmt::Debug for DisplayText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayText::Text(text) => f.debug_tuple("Text").field(text).finish(),
            DisplayText::Function(_) => f.write_str("Function(..)"),
            DisplayText::Builder(_) => f.write_str("Builder(..)"),
        }
    }
}

/// `[<command>][<n>] $ ` with the command in cyan and `$` in bold.
pub fn default_prompt(ctx: &DisplayContext<'_>) -> String {
    format!(
        "[{}][{}] {} ",
        ctx.painter.cyan(ctx.command),
        ctx.invocation,
        ctx.painter.bold("$")
    )
}

pub fn default_banner(ctx: &DisplayContext<'_>) -> String {
    format!("Starting shell for command \"{}\"", ctx.command)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ColorMode;

    fn ctx(painter: Painter) -> DisplayContext<'static> {
        DisplayContext {
            command: "my-command",
            invocation: 2,
            painter,
        }
    }

    struct Counter(u32);

    impl DisplayBuilder for Counter {
        fn build(&mut self, ctx: &DisplayContext<'_>) -> String {
            self.0 += 1;
            format!("{}#{}> ", ctx.command, self.0)
        }
    }

    #[test]
    fn test_default_prompt() {
        assert_eq!(default_prompt(&ctx(Painter::plain())), "[my-command][2] $ ");
        assert_eq!(
            default_prompt(&ctx(Painter::new(ColorMode::Always))),
            "[\x1b[36mmy-command\x1b[0m][2] \x1b[1m$\x1b[22m "
        );
        assert_eq!(
            default_banner(&ctx(Painter::plain())),
            "Starting shell for command \"my-command\""
        );
    }

    #[test]
    fn test_variants() {
        let plain = ctx(Painter::plain());
        assert_eq!(DisplayText::from("> ").render(&plain), "> ");

        let function = DisplayText::function(|ctx| format!("{}:{} ", ctx.command, ctx.invocation));
        assert_eq!(function.render(&plain), "my-command:2 ");

        let builder = DisplayText::builder(Counter(0));
        assert_eq!(builder.render(&plain), "my-command#1> ");
        assert_eq!(builder.render(&plain), "my-command#2> ");
    }
}
