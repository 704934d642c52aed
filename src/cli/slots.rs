//! Parameter slot declarations
//!
//! A command declares positional and named slots. Each slot carries one of a
//! closed set of value kinds which converts the raw token into a [`SlotValue`].

use crate::cli::tokenizer::fold_case;
use crate::error::ConversionError;

use std::fmt;

/// How a slot interprets its raw token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// Any string; a value is required
    Text,
    /// Signed 64-bit integer
    Integer,
    /// Boolean; a bare `--flag` means `true`
    Flag,
    /// One of a fixed list, matched ignoring case
    Choice(&'static [&'static str]),
}

/// A converted slot value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotValue {
    Text(String),
    Integer(i64),
    Flag(bool),
    /// The declared spelling of the matched choice
    Choice(&'static str),
}

impl ValueKind {
    /// Convert a raw token, which is `None` for a bare `--name`
    pub fn convert(&self, raw: Option<&str>) -> Result<SlotValue, ConversionError> {
        match (*self, raw) {
            (ValueKind::Flag, None) => Ok(SlotValue::Flag(true)),
            (_, None) => Err(ConversionError::MissingValue),
            (ValueKind::Text, Some(raw)) => Ok(SlotValue::Text(raw.to_string())),
            (ValueKind::Integer, Some(raw)) => raw
                .trim()
                .parse::<i64>()
                .map(SlotValue::Integer)
                .map_err(|_| ConversionError::InvalidInteger(raw.to_string())),
            (ValueKind::Flag, Some(raw)) => parse_bool(raw)
                .map(SlotValue::Flag)
                .ok_or_else(|| ConversionError::InvalidBoolean(raw.to_string())),
            (ValueKind::Choice(allowed), Some(raw)) => allowed
                .iter()
                .find(|choice| fold_case(choice) == fold_case(raw))
                .map(|choice| SlotValue::Choice(*choice))
                .ok_or_else(|| ConversionError::InvalidChoice {
                    value: raw.to_string(),
                    allowed: allowed.join(", "),
                }),
        }
    }

    /// Placeholder shown in usage lines
    pub fn placeholder(&self) -> String {
        match self {
            ValueKind::Text => "value".to_string(),
            ValueKind::Integer => "number".to_string(),
            ValueKind::Flag => "true|false".to_string(),
            ValueKind::Choice(allowed) => allowed.join("|"),
        }
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" => Some(true),
        "false" | "no" | "0" => Some(false),
        _ => None,
    }
}

/// A slot bound by position, after the command name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionalSlot {
    /// Zero-based index into the positional tokens after the command name
    pub index: usize,
    pub name: &'static str,
    pub description: &'static str,
    pub kind: ValueKind,
    pub optional: bool,
}

impl PositionalSlot {
    /// Declare a required positional slot
    pub const fn required(
        index: usize,
        name: &'static str,
        kind: ValueKind,
        description: &'static str,
    ) -> Self {
        Self {
            index,
            name,
            description,
            kind,
            optional: false,
        }
    }

    /// Declare an optional positional slot
    pub const fn optional(
        index: usize,
        name: &'static str,
        kind: ValueKind,
        description: &'static str,
    ) -> Self {
        Self {
            index,
            name,
            description,
            kind,
            optional: true,
        }
    }
}

impl fmt::Display for PositionalSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.optional {
            write!(f, "[{}]", self.name)
        } else {
            write!(f, "<{}>", self.name)
        }
    }
}

/// A slot bound by `--name` or `--name=value`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NamedSlot {
    /// Name matched against `--name`, ignoring case
    pub name: &'static str,
    pub description: &'static str,
    pub kind: ValueKind,
    pub optional: bool,
}

impl NamedSlot {
    /// Declare a required named slot
    pub const fn required(name: &'static str, kind: ValueKind, description: &'static str) -> Self {
        Self {
            name,
            description,
            kind,
            optional: false,
        }
    }

    /// Declare an optional named slot
    pub const fn optional(name: &'static str, kind: ValueKind, description: &'static str) -> Self {
        Self {
            name,
            description,
            kind,
            optional: true,
        }
    }
}

impl fmt::Display for NamedSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let body = match self.kind {
            ValueKind::Flag => format!("--{}", self.name),
            kind => format!("--{}=<{}>", self.name, kind.placeholder()),
        };

        if self.optional {
            write!(f, "[{}]", body)
        } else {
            write!(f, "{}", body)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MODES: &[&str] = &["replace", "merge"];

    #[test]
    fn test_text_requires_value() {
        assert_eq!(
            ValueKind::Text.convert(None),
            Err(ConversionError::MissingValue)
        );
        assert_eq!(
            ValueKind::Text.convert(Some("./dir")),
            Ok(SlotValue::Text("./dir".to_string()))
        );
    }

    #[test]
    fn test_integer_conversion() {
        assert_eq!(
            ValueKind::Integer.convert(Some("30")),
            Ok(SlotValue::Integer(30))
        );
        assert_eq!(
            ValueKind::Integer.convert(Some("-5")),
            Ok(SlotValue::Integer(-5))
        );
        assert!(matches!(
            ValueKind::Integer.convert(Some("thirty")),
            Err(ConversionError::InvalidInteger(_))
        ));
    }

    #[test]
    fn test_flag_presence_and_explicit() {
        assert_eq!(ValueKind::Flag.convert(None), Ok(SlotValue::Flag(true)));
        assert_eq!(
            ValueKind::Flag.convert(Some("FALSE")),
            Ok(SlotValue::Flag(false))
        );
        assert_eq!(ValueKind::Flag.convert(Some("yes")), Ok(SlotValue::Flag(true)));
        assert!(matches!(
            ValueKind::Flag.convert(Some("maybe")),
            Err(ConversionError::InvalidBoolean(_))
        ));
    }

    #[test]
    fn test_choice_normalizes_case() {
        let kind = ValueKind::Choice(MODES);
        assert_eq!(kind.convert(Some("MERGE")), Ok(SlotValue::Choice("merge")));
        let err = kind.convert(Some("append")).unwrap_err();
        assert!(err.to_string().contains("replace, merge"));
    }

    #[test]
    fn test_choice_folds_non_ascii() {
        let kind = ValueKind::Choice(&["größe"]);
        assert_eq!(kind.convert(Some("GRÖßE")), Ok(SlotValue::Choice("größe")));
    }

    #[test]
    fn test_slot_display() {
        let pkg = PositionalSlot::required(0, "package", ValueKind::Text, "Package file");
        let target = PositionalSlot::optional(1, "target", ValueKind::Text, "Target");
        let force = NamedSlot::optional("force", ValueKind::Flag, "Overwrite");
        let mode = NamedSlot::required("mode", ValueKind::Choice(MODES), "Mode");

        assert_eq!(pkg.to_string(), "<package>");
        assert_eq!(target.to_string(), "[target]");
        assert_eq!(force.to_string(), "[--force]");
        assert_eq!(mode.to_string(), "--mode=<replace|merge>");
    }
}
