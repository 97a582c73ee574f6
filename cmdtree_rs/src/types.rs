//! Shared value types: colour mode, option kinds and typed option values.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// Colour mode for terminal output.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

impl FromStr for ColorMode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "auto" => Ok(ColorMode::Auto),
            "always" | "yes" | "true" | "enable" => Ok(ColorMode::Always),
            "never" | "no" | "false" | "disable" => Ok(ColorMode::Never),
            _ => Err(format!(
                "Invalid color mode '{}'. Use: auto, always, or never.",
                value
            )),
        }
    }
}

/// The value type an option accepts.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum OptionKind {
    /// Any string value.
    #[default]
    Any,
    /// Signed integer value.
    Numeric,
    /// Flag without a value; `--no-<name>` negates it.
    Boolean,
}

impl OptionKind {
    /// Value an unset, non-required option falls back to when no default is declared.
    pub fn zero_value(self) -> OptionValue {
        match self {
            OptionKind::Any => OptionValue::Nil,
            OptionKind::Numeric => OptionValue::Number(0),
            OptionKind::Boolean => OptionValue::Flag(false),
        }
    }

    /// Name used in type error messages.
    pub fn name(self) -> &'static str {
        match self {
            OptionKind::Any => "any",
            OptionKind::Numeric => "numeric",
            OptionKind::Boolean => "boolean",
        }
    }

    /// Check whether `value` can be stored in an option of this kind.
    pub fn accepts(self, value: &OptionValue) -> bool {
        matches!(
            (self, value),
            (OptionKind::Any, OptionValue::Nil | OptionValue::Text(_))
                | (OptionKind::Numeric, OptionValue::Number(_))
                | (OptionKind::Boolean, OptionValue::Flag(_))
        )
    }
}

/// A typed option value after coercion.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum OptionValue {
    Nil,
    Text(String),
    Number(i64),
    Flag(bool),
}

impl OptionValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            OptionValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<i64> {
        match self {
            OptionValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            OptionValue::Flag(b) => Some(*b),
            _ => None,
        }
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, OptionValue::Nil)
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::Nil => Ok(()),
            OptionValue::Text(s) => f.write_str(s),
            OptionValue::Number(n) => write!(f, "{n}"),
            OptionValue::Flag(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        OptionValue::Text(value.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        OptionValue::Text(value)
    }
}

impl From<i64> for OptionValue {
    fn from(value: i64) -> Self {
        OptionValue::Number(value)
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        OptionValue::Flag(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_color_mode() {
        assert_eq!("auto".parse::<ColorMode>(), Ok(ColorMode::Auto));
        assert_eq!("ALWAYS".parse::<ColorMode>(), Ok(ColorMode::Always));
        assert_eq!("disable".parse::<ColorMode>(), Ok(ColorMode::Never));
        assert!("sometimes".parse::<ColorMode>().is_err());
    }

    #[test]
    fn test_zero_values() {
        assert_eq!(OptionKind::Any.zero_value(), OptionValue::Nil);
        assert_eq!(OptionKind::Numeric.zero_value(), OptionValue::Number(0));
        assert_eq!(OptionKind::Boolean.zero_value(), OptionValue::Flag(false));
    }

    #[test]
    fn test_kind_accepts() {
        assert!(OptionKind::Any.accepts(&OptionValue::Nil));
        assert!(OptionKind::Any.accepts(&"x".into()));
        assert!(!OptionKind::Numeric.accepts(&"10".into()));
        assert!(OptionKind::Numeric.accepts(&10i64.into()));
        assert!(!OptionKind::Boolean.accepts(&OptionValue::Nil));
    }

    #[test]
    fn test_display() {
        assert_eq!(OptionValue::Nil.to_string(), "");
        assert_eq!(OptionValue::from(10i64).to_string(), "10");
        assert_eq!(OptionValue::from(false).to_string(), "false");
        assert_eq!(OptionValue::from("qwerty").to_string(), "qwerty");
    }
}
