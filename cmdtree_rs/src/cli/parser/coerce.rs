//! Option and positional coercion for a resolved action.

use std::collections::BTreeMap;

use tracing::trace;

use crate::error::ArgumentError;
use crate::tree::{ActionNode, OptionSpec};
use crate::types::{OptionKind, OptionValue};

/// Terminator after which every token is positional.
pub const END_OF_OPTIONS: &str = "--";

/// Prefix of the derived negated form of a boolean option.
pub const NEGATION_PREFIX: &str = "no-";

#[derive(Debug, Clone, PartialEq, Eq)]
struct Slot {
    value: OptionValue,
    present: bool,
}

/// Typed values for every option a node declares.
///
/// Unsupplied options hold their default (or the kind's zero value) and
/// report `false` from [`OptionValues::is_set`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionValues {
    slots: BTreeMap<String, Slot>,
}

impl OptionValues {
    /// Whether the option was supplied explicitly (`<name>?`).
    pub fn is_set(&self, name: &str) -> bool {
        self.slots.get(name).is_some_and(|slot| slot.present)
    }

    pub fn get(&self, name: &str) -> Option<&OptionValue> {
        self.slots.get(name).map(|slot| &slot.value)
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(OptionValue::as_text)
    }

    pub fn number(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(OptionValue::as_number)
    }

    /// Boolean value; `false` for unknown or non-boolean options.
    pub fn flag(&self, name: &str) -> bool {
        self.get(name).and_then(OptionValue::as_flag).unwrap_or(false)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &OptionValue)> {
        self.slots
            .iter()
            .map(|(name, slot)| (name.as_str(), &slot.value))
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// Coerced invocation data for one node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Coerced {
    pub options: OptionValues,
    pub arguments: Vec<String>,
}

/// Split `tokens` into typed options and positional arguments for `node`.
///
/// Nothing is returned on failure, so callers never see a half-filled map.
pub fn coerce(node: &ActionNode, tokens: &[String]) -> Result<Coerced, ArgumentError> {
    let mut supplied: BTreeMap<&str, OptionValue> = BTreeMap::new();
    let mut arguments = Vec::new();
    let mut options_done = false;
    let mut iter = tokens.iter();

    while let Some(token) = iter.next() {
        if options_done {
            push_positional(node, token, &mut arguments)?;
            continue;
        }
        if token == END_OF_OPTIONS {
            options_done = true;
            continue;
        }

        let Some((spec, negated)) = lookup(node, token)? else {
            push_positional(node, token, &mut arguments)?;
            continue;
        };
        if supplied.contains_key(spec.name.as_str()) {
            return Err(ArgumentError::DuplicateOption(token.clone()));
        }

        let value = if spec.kind == OptionKind::Boolean {
            OptionValue::Flag(!negated)
        } else {
            let raw = iter
                .next()
                .ok_or_else(|| ArgumentError::MissingValue(token.clone()))?;
            parse_value(spec, token, raw)?
        };
        let value = apply_operator(spec, token, value)?;
        trace!(option = %spec.name, value = %value, "coerced option");
        supplied.insert(spec.name.as_str(), value);
    }

    let mut options = OptionValues::default();
    for spec in node.options() {
        let slot = match supplied.remove(spec.name.as_str()) {
            Some(value) => Slot {
                value,
                present: true,
            },
            None if spec.required => {
                return Err(ArgumentError::MissingRequiredOption(spec.name.clone()));
            }
            None => Slot {
                value: spec.fallback(),
                present: false,
            },
        };
        options.slots.insert(spec.name.clone(), slot);
    }

    Ok(Coerced { options, arguments })
}

/// Classify `token`: `Ok(None)` for a positional, otherwise the matched
/// option and whether it is the negated `--no-` form.
fn lookup<'n>(node: &'n ActionNode, token: &str) -> Result<Option<(&'n OptionSpec, bool)>, ArgumentError> {
    let unknown = || ArgumentError::UnknownOption(token.to_string());

    if let Some(long) = token.strip_prefix("--") {
        if let Some(spec) = node.option(long) {
            return Ok(Some((spec, false)));
        }
        return long
            .strip_prefix(NEGATION_PREFIX)
            .and_then(|name| node.option(name))
            .filter(|spec| spec.kind == OptionKind::Boolean)
            .map(|spec| Some((spec, true)))
            .ok_or_else(unknown);
    }

    match token.strip_prefix('-') {
        None | Some("") => Ok(None),
        Some(short) => {
            let mut chars = short.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => node
                    .option_by_short(c)
                    .map(|spec| Some((spec, false)))
                    .ok_or_else(unknown),
                _ => Err(unknown()),
            }
        }
    }
}

fn parse_value(spec: &OptionSpec, token: &str, raw: &str) -> Result<OptionValue, ArgumentError> {
    match spec.kind {
        OptionKind::Numeric => raw
            .parse::<i64>()
            .map(OptionValue::Number)
            .map_err(|_| ArgumentError::OptionType {
                option: token.to_string(),
                kind: spec.kind,
                value: raw.to_string(),
            }),
        OptionKind::Any => Ok(OptionValue::Text(raw.to_string())),
        OptionKind::Boolean => Ok(OptionValue::Flag(true)),
    }
}

/// Run the option's operator, if any, and check the result still fits its kind.
fn apply_operator(spec: &OptionSpec, token: &str, value: OptionValue) -> Result<OptionValue, ArgumentError> {
    let Some(operator) = &spec.operator else {
        return Ok(value);
    };
    let mapped = operator
        .apply(value)
        .map_err(|cause| ArgumentError::OperatorFailed {
            option: token.to_string(),
            cause,
        })?;
    if !spec.kind.accepts(&mapped) {
        return Err(ArgumentError::OptionType {
            option: token.to_string(),
            kind: spec.kind,
            value: mapped.to_string(),
        });
    }
    Ok(mapped)
}

fn push_positional(node: &ActionNode, token: &str, arguments: &mut Vec<String>) -> Result<(), ArgumentError> {
    if !node.arguments_enabled() {
        return Err(ArgumentError::InvalidArgument(token.to_string()));
    }
    arguments.push(token.to_string());
    Ok(())
}
