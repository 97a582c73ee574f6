//! Option declarations attached to an action.

use std::fmt;
use std::rc::Rc;

use crate::error::{HandlerError, ValidationError};
use crate::types::{OptionKind, OptionValue};

use super::is_valid_name;

/// Immutable description of one option.
///
/// Build it with struct-literal syntax or the chainable helpers:
///
/// ```
/// use cmdtree::{OptionKind, OptionSpec};
///
/// let baz = OptionSpec::new("baz").kind(OptionKind::Numeric).with_default(10i64);
/// let verbose = OptionSpec::flag("verbose").short('v');
/// assert_eq!(baz.fallback().to_string(), "10");
/// assert!(!verbose.required);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionSpec {
    /// Long name, used as `--name`
    pub name: String,

    /// Single-character alias, used as `-c`
    pub short: Option<char>,

    /// Shown next to the option in help output
    pub description: String,

    /// Value type
    pub kind: OptionKind,

    /// Value used when the option is not supplied
    pub default: Option<OptionValue>,

    /// Fail the invocation when the option is not supplied
    pub required: bool,

    /// Transformation applied to a supplied value after type parsing
    pub operator: Option<Operator>,
}

/// Maps a supplied option value to the value handlers see.
///
/// Runs only for values given on the command line, never for defaults.
/// The result must still fit the option's kind.
#[derive(Clone)]
pub struct Operator(Rc<dyn Fn(OptionValue) -> Result<OptionValue, HandlerError>>);

impl Operator {
    pub fn new<F>(operator: F) -> Self
    where
        F: Fn(OptionValue) -> Result<OptionValue, HandlerError> + 'static,
    {
        Self(Rc::new(operator))
    }

    pub fn apply(&self, value: OptionValue) -> Result<OptionValue, HandlerError> {
        (self.0)(value)
    }
}

impl fmt::Debug for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Operator(..)")
    }
}

impl PartialEq for Operator {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Operator {}

impl OptionSpec {
    /// An option accepting any string value.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// A boolean option; `--name` sets it, `--no-name` clears it.
    pub fn flag(name: impl Into<String>) -> Self {
        Self::new(name).kind(OptionKind::Boolean)
    }

    /// An integer option.
    pub fn numeric(name: impl Into<String>) -> Self {
        Self::new(name).kind(OptionKind::Numeric)
    }

    pub fn short(mut self, short: char) -> Self {
        self.short = Some(short);
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn kind(mut self, kind: OptionKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_default(mut self, value: impl Into<OptionValue>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Transform the supplied value, e.g. to normalize or range-check it.
    pub fn operator<F>(mut self, operator: F) -> Self
    where
        F: Fn(OptionValue) -> Result<OptionValue, HandlerError> + 'static,
    {
        self.operator = Some(Operator::new(operator));
        self
    }

    /// The value an unsupplied option resolves to.
    pub fn fallback(&self) -> OptionValue {
        self.default
            .clone()
            .unwrap_or_else(|| self.kind.zero_value())
    }

    /// Human-readable long form, e.g. `--name`.
    pub fn long_form(&self) -> String {
        format!("--{}", self.name)
    }

    pub(crate) fn validate(&self) -> Result<(), ValidationError> {
        if !is_valid_name(&self.name) {
            return Err(ValidationError::InvalidName {
                what: "option",
                name: self.name.clone(),
            });
        }
        if let Some(short) = self.short
            && !short.is_ascii_alphanumeric()
        {
            return Err(ValidationError::InvalidShort {
                option: self.name.clone(),
                short,
            });
        }
        if let Some(default) = &self.default
            && !self.kind.accepts(default)
        {
            return Err(ValidationError::DefaultType {
                option: self.name.clone(),
                kind: self.kind,
            });
        }
        if self.required && self.kind == OptionKind::Boolean {
            return Err(ValidationError::RequiredBoolean {
                option: self.name.clone(),
            });
        }
        Ok(())
    }
}

/// Check a node's option set as a whole: names, aliases and `--no-` forms.
pub(crate) fn validate_options(action: &str, options: &[OptionSpec]) -> Result<(), ValidationError> {
    for (index, option) in options.iter().enumerate() {
        option.validate()?;
        let earlier = &options[..index];
        if earlier.iter().any(|other| other.name == option.name) {
            return Err(ValidationError::DuplicateOption {
                action: action.to_string(),
                option: option.name.clone(),
            });
        }
        if let Some(short) = option.short
            && earlier.iter().any(|other| other.short == Some(short))
        {
            return Err(ValidationError::DuplicateShort {
                action: action.to_string(),
                short,
            });
        }
    }

    for option in options {
        if let Some(negated) = option.name.strip_prefix("no-")
            && let Some(boolean) = options
                .iter()
                .find(|other| other.name == negated && other.kind == OptionKind::Boolean)
        {
            return Err(ValidationError::NegationConflict {
                option: option.name.clone(),
                boolean: boolean.name.clone(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_uses_default_then_zero_value() {
        assert_eq!(OptionSpec::new("opt").fallback(), OptionValue::Nil);
        assert_eq!(OptionSpec::numeric("n").fallback(), OptionValue::Number(0));
        assert_eq!(OptionSpec::flag("b").fallback(), OptionValue::Flag(false));
        assert_eq!(
            OptionSpec::flag("b").with_default(true).fallback(),
            OptionValue::Flag(true)
        );
        assert_eq!(
            OptionSpec::numeric("baz").with_default(10i64).fallback(),
            OptionValue::Number(10)
        );
    }

    #[test]
    fn test_struct_literal_matches_builder() {
        let literal = OptionSpec {
            name: "foo".into(),
            short: Some('f'),
            ..Default::default()
        };
        assert_eq!(literal, OptionSpec::new("foo").short('f'));
    }

    #[test]
    fn test_operator_is_shared_by_clones() {
        let spec = OptionSpec::numeric("n")
            .operator(|value| Ok(OptionValue::Number(value.as_number().unwrap_or(0) * 2)));
        let copy = spec.clone();
        assert_eq!(spec, copy);
        assert_ne!(spec, OptionSpec::numeric("n").operator(Ok));

        let operator = copy.operator.unwrap();
        assert_eq!(operator.apply(OptionValue::Number(21)).unwrap(), OptionValue::Number(42));
        assert_eq!(format!("{operator:?}"), "Operator(..)");
    }

    #[test]
    fn test_validate_rejects_bad_names() {
        let err = OptionSpec::new("bad name").validate().unwrap_err();
        assert!(matches!(err, ValidationError::InvalidName { what: "option", .. }));
        assert!(OptionSpec::new("").validate().is_err());
        assert!(OptionSpec::new("ok_name-2").validate().is_ok());
    }

    #[test]
    fn test_validate_short_and_default() {
        assert!(matches!(
            OptionSpec::new("x").short('#').validate(),
            Err(ValidationError::InvalidShort { short: '#', .. })
        ));
        assert!(matches!(
            OptionSpec::numeric("n").with_default("ten").validate(),
            Err(ValidationError::DefaultType { .. })
        ));
        assert!(matches!(
            OptionSpec::flag("b").required().validate(),
            Err(ValidationError::RequiredBoolean { .. })
        ));
    }

    #[test]
    fn test_validate_options_duplicates() {
        let dup = [OptionSpec::new("a"), OptionSpec::new("a")];
        assert!(matches!(
            validate_options("cmd", &dup),
            Err(ValidationError::DuplicateOption { .. })
        ));

        let dup_short = [OptionSpec::new("a").short('x'), OptionSpec::new("b").short('x')];
        assert!(matches!(
            validate_options("cmd", &dup_short),
            Err(ValidationError::DuplicateShort { short: 'x', .. })
        ));
    }

    #[test]
    fn test_validate_options_negation_conflict() {
        let options = [OptionSpec::flag("bar"), OptionSpec::new("no-bar")];
        let err = validate_options("cmd", &options).unwrap_err();
        assert_eq!(
            err.to_string(),
            "option \"--no-bar\" conflicts with the negated form of boolean option \"--bar\""
        );

        // Only boolean options derive a negated form.
        let options = [OptionSpec::new("bar"), OptionSpec::new("no-bar")];
        assert!(validate_options("cmd", &options).is_ok());
    }
}
