//! Error taxonomy for tree construction, resolution and dispatch.
//!
//! - [`ValidationError`]: raised by `build()` while finalizing a tree.
//! - [`ArgumentError`]: token-level misuse found by the resolver/coercer.
//! - [`CommandError`]: everything a dispatch can fail with.
//! - [`CommandRuntimeError`]: the uniform wrapper around handler failures.
//! - [`HandlerError`]: what handlers return; built from any `std::error::Error`.

use std::fmt;
use std::io;

use thiserror::Error;

use crate::types::OptionKind;

/// Message of the failure raised when `shell` is typed inside a running shell.
pub const NESTED_SHELL_MESSAGE: &str = "Cannot run another shell within an already running shell";

/// Construction-time failures. Never seen at dispatch time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid {what} name \"{name}\"; names must match ^[a-zA-Z0-9_-]+$")]
    InvalidName { what: &'static str, name: String },

    #[error("duplicate action \"{name}\" in command \"{parent}\"")]
    DuplicateAction { parent: String, name: String },

    #[error("action \"{name}\" in command \"{parent}\" conflicts with the built-in {builtin} action")]
    ReservedAction {
        parent: String,
        name: String,
        builtin: &'static str,
    },

    #[error("duplicate option \"--{option}\" in command \"{action}\"")]
    DuplicateOption { action: String, option: String },

    #[error("duplicate short option \"-{short}\" in command \"{action}\"")]
    DuplicateShort { action: String, short: char },

    #[error("invalid short name \"{short}\" for option \"--{option}\"; expected one alphanumeric character")]
    InvalidShort { option: String, short: char },

    #[error("default value for option \"--{option}\" must be of type '{}'", .kind.name())]
    DefaultType { option: String, kind: OptionKind },

    #[error("boolean option \"--{option}\" cannot be required")]
    RequiredBoolean { option: String },

    #[error("option \"--{option}\" conflicts with the negated form of boolean option \"--{boolean}\"")]
    NegationConflict { option: String, boolean: String },

    #[error("command \"{action}\" disables arguments but declares options")]
    OptionsWithoutArguments { action: String },
}

/// Token-level failures: structural misuse and option coercion errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgumentError {
    #[error("invalid command argument \"{0}\"")]
    InvalidArgument(String),

    #[error("unknown option \"{0}\"")]
    UnknownOption(String),

    #[error("a value must be defined for argument \"{0}\"")]
    MissingValue(String),

    #[error("multiple values are not allowed for option \"{0}\"")]
    DuplicateOption(String),

    #[error("only values of type '{}' allowed for option \"{option}\"", .kind.name())]
    OptionType {
        option: String,
        kind: OptionKind,
        value: String,
    },

    #[error("option \"--{0}\" is required")]
    MissingRequiredOption(String),

    #[error("invalid value for option \"{option}\": {}", .cause.message())]
    OperatorFailed { option: String, cause: HandlerError },

    #[error("no arguments allowed for default help action")]
    DefaultHelpArguments,

    #[error("too many arguments for help action")]
    HelpArguments,
}

impl ArgumentError {
    /// Fine-grained kind name; all variants are IllegalArgument-kind failures.
    pub fn kind(&self) -> &'static str {
        match self {
            ArgumentError::UnknownOption(_) => "UnknownOption",
            ArgumentError::OptionType { .. } => "OptionTypeError",
            ArgumentError::MissingRequiredOption(_) => "MissingRequiredOption",
            _ => "IllegalArgument",
        }
    }
}

/// A handler failure re-wrapped by the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("command '{path}' failed\n\nCause: {kind} - {message}")]
pub struct CommandRuntimeError {
    path: String,
    kind: String,
    message: String,
}

impl CommandRuntimeError {
    pub fn new(path: impl Into<String>, cause: HandlerError) -> Self {
        Self {
            path: path.into(),
            kind: cause.kind,
            message: cause.message,
        }
    }

    /// Display path of the command whose handler failed.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Kind name of the original failure.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Message of the original failure.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Everything a single dispatch can fail with.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("unknown action \"{0}\"")]
    UnknownAction(String),

    #[error(transparent)]
    IllegalArgument(#[from] ArgumentError),

    #[error("{0}")]
    IllegalCommand(String),

    #[error(transparent)]
    Runtime(#[from] CommandRuntimeError),

    #[error("I/O failure: {0}")]
    Io(#[from] io::Error),
}

impl CommandError {
    /// Kind name used when this error becomes the cause of a runtime failure.
    pub fn kind(&self) -> &'static str {
        match self {
            CommandError::UnknownAction(_) => "UnknownAction",
            CommandError::IllegalArgument(_) => "IllegalArgument",
            CommandError::IllegalCommand(_) => "IllegalCommand",
            CommandError::Runtime(_) => "CommandRuntimeError",
            CommandError::Io(_) => "Io",
        }
    }

    /// Convert into a handler failure, keeping the precise kind name.
    pub fn into_handler_error(self) -> HandlerError {
        HandlerError::new(self.kind(), self.to_string())
    }

    /// The offending token, when the failure is about a single token.
    pub fn token(&self) -> Option<&str> {
        match self {
            CommandError::UnknownAction(token)
            | CommandError::IllegalArgument(ArgumentError::InvalidArgument(token))
            | CommandError::IllegalArgument(ArgumentError::UnknownOption(token)) => Some(token),
            _ => None,
        }
    }
}

/// Failure returned by a handler or hook.
///
/// Any `std::error::Error` converts into it with `?`; the kind is the
/// error's type name (`io::Error` becomes `Error`, `ParseIntError` stays
/// `ParseIntError`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerError {
    kind: String,
    message: String,
}

impl HandlerError {
    pub fn new(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            message: message.into(),
        }
    }

    /// A failure with the generic `Error` kind.
    pub fn msg(message: impl Into<String>) -> Self {
        Self::new("Error", message)
    }

    /// Convert an `anyhow::Error`; the message keeps the whole context chain.
    pub fn from_anyhow(error: &anyhow::Error) -> Self {
        Self::new("Error", format!("{error:#}"))
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for HandlerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.kind, self.message)
    }
}

impl<E> From<E> for HandlerError
where
    E: std::error::Error + 'static,
{
    fn from(error: E) -> Self {
        Self::new(short_type_name::<E>(), error.to_string())
    }
}

/// Last path segment of a type name, without generic parameters.
fn short_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runtime_error_format() {
        let err = CommandRuntimeError::new(
            "my-command foo",
            HandlerError::new("StandardError", "I failed!"),
        );
        assert_eq!(
            err.to_string(),
            "command 'my-command foo' failed\n\nCause: StandardError - I failed!"
        );
        assert_eq!(err.path(), "my-command foo");
        assert_eq!(err.kind(), "StandardError");
        assert_eq!(err.message(), "I failed!");
    }

    #[test]
    fn test_handler_error_from_std_error() {
        let parse = "abc".parse::<i64>().unwrap_err();
        let err = HandlerError::from(parse);
        assert_eq!(err.kind(), "ParseIntError");
        assert_eq!(err.message(), "invalid digit found in string");

        let io_err = io::Error::other("disk on fire");
        let err = HandlerError::from(io_err);
        assert_eq!(err.kind(), "Error");
        assert_eq!(err.message(), "disk on fire");
    }

    #[test]
    fn test_command_error_messages() {
        assert_eq!(
            CommandError::UnknownAction("unknown".into()).to_string(),
            "unknown action \"unknown\""
        );
        assert_eq!(
            CommandError::from(ArgumentError::InvalidArgument("shell".into())).to_string(),
            "invalid command argument \"shell\""
        );
        assert_eq!(
            CommandError::IllegalCommand(NESTED_SHELL_MESSAGE.into()).to_string(),
            "Cannot run another shell within an already running shell"
        );
    }

    #[test]
    fn test_handler_error_from_anyhow_keeps_context() {
        let inner = anyhow::anyhow!("empty input");
        let err = HandlerError::from_anyhow(&inner.context("reading name"));
        assert_eq!(err.kind(), "Error");
        assert_eq!(err.message(), "reading name: empty input");
    }

    #[test]
    fn test_operator_failure_message() {
        let err = ArgumentError::OperatorFailed {
            option: "--port".into(),
            cause: HandlerError::msg("out of range"),
        };
        assert_eq!(err.to_string(), "invalid value for option \"--port\": out of range");
        assert_eq!(err.kind(), "IllegalArgument");
    }

    #[test]
    fn test_into_handler_error_keeps_kind() {
        let err = CommandError::from(ArgumentError::DefaultHelpArguments).into_handler_error();
        assert_eq!(err.kind(), "IllegalArgument");
        assert_eq!(err.message(), "no arguments allowed for default help action");
    }

    #[test]
    fn test_option_type_message() {
        let err = ArgumentError::OptionType {
            option: "--baz".into(),
            kind: OptionKind::Numeric,
            value: "ten".into(),
        };
        assert_eq!(
            err.to_string(),
            "only values of type 'numeric' allowed for option \"--baz\""
        );
        assert_eq!(err.kind(), "OptionTypeError");
    }
}
