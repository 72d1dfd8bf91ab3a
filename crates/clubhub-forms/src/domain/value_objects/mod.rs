//! Forms value objects
use std::fmt;

use serde::{Deserialize, Serialize};

/// Semantic type of a field together with its rule
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldKind {
    /// Free text, length counted in characters
    Text {
        min_len: Option<usize>,
        max_len: Option<usize>,
    },
    /// Whole number coerced from text
    Integer { min: Option<i64>, max: Option<i64> },
    /// Non-empty set of selected labels
    Choices { empty_message: String },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    pub label: String,
    pub kind: FieldKind,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            kind,
        }
    }
}

/// Raw, bound input for one field
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldInput {
    Text(String),
    Choices(Vec<String>),
}

/// A value that passed its field's rule
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldValue {
    Text(String),
    Integer(i64),
    Choices(Vec<String>),
}

const REQUIRED: &str = "Required";

impl FieldKind {
    /// Check one raw input against this kind's rule.
    ///
    /// Returns the typed value, or the message to show beside the field.
    pub fn validate(&self, input: Option<&FieldInput>) -> Result<FieldValue, String> {
        match self {
            FieldKind::Text { min_len, max_len } => {
                let text = match input {
                    None => return Err(REQUIRED.to_string()),
                    Some(FieldInput::Text(text)) => text,
                    Some(FieldInput::Choices(_)) => {
                        return Err("Expected string, received array".to_string())
                    }
                };
                let len = text.chars().count();
                if let Some(min) = min_len {
                    if len < *min {
                        return Err(format!("String must contain at least {} character(s)", min));
                    }
                }
                if let Some(max) = max_len {
                    if len > *max {
                        return Err(format!("String must contain at most {} character(s)", max));
                    }
                }
                Ok(FieldValue::Text(text.clone()))
            }
            FieldKind::Integer { min, max } => {
                let raw = match input {
                    None => return Err(REQUIRED.to_string()),
                    Some(FieldInput::Text(text)) => text.trim(),
                    Some(FieldInput::Choices(_)) => {
                        return Err("Expected number, received array".to_string())
                    }
                };
                if raw.is_empty() {
                    return Err(REQUIRED.to_string());
                }
                let value = coerce_integer(raw)?;
                if let Some(min) = min {
                    if value < *min {
                        return Err(format!("Number must be greater than or equal to {}", min));
                    }
                }
                if let Some(max) = max {
                    if value > *max {
                        return Err(format!("Number must be less than or equal to {}", max));
                    }
                }
                Ok(FieldValue::Integer(value))
            }
            FieldKind::Choices { empty_message } => match input {
                Some(FieldInput::Choices(selected)) if !selected.is_empty() => {
                    Ok(FieldValue::Choices(selected.clone()))
                }
                Some(FieldInput::Text(_)) => Err("Expected array, received string".to_string()),
                _ => Err(empty_message.clone()),
            },
        }
    }
}

/// 2^63, the first float past `i64::MAX`
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

fn coerce_integer(raw: &str) -> Result<i64, String> {
    if let Ok(value) = raw.parse::<i64>() {
        return Ok(value);
    }
    let f = match raw.parse::<f64>() {
        Ok(f) if f.is_finite() => f,
        _ => return Err("Expected number, received nan".to_string()),
    };
    if f >= I64_BOUND {
        return Err(format!("Number must be less than or equal to {}", i64::MAX));
    }
    if f < -I64_BOUND {
        return Err(format!("Number must be greater than or equal to {}", i64::MIN));
    }
    if f.fract() != 0.0 {
        return Err("Expected integer, received float".to_string());
    }
    // whole and in range, e.g. "1e3" or "12.0"
    Ok(f as i64)
}

/// Message attached to a single field
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Field-keyed validation messages, in schema order
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.push(FieldError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Message for `field`, if it failed
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for error in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", error.field, error.message)?;
            first = false;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> FieldInput {
        FieldInput::Text(s.to_string())
    }

    #[test]
    fn test_text_length_bounds() {
        let kind = FieldKind::Text {
            min_len: Some(3),
            max_len: Some(5),
        };
        assert_eq!(
            kind.validate(Some(&text("ab"))),
            Err("String must contain at least 3 character(s)".to_string())
        );
        assert_eq!(
            kind.validate(Some(&text("abcdef"))),
            Err("String must contain at most 5 character(s)".to_string())
        );
        assert_eq!(
            kind.validate(Some(&text("abc"))),
            Ok(FieldValue::Text("abc".to_string()))
        );
        // counted in characters, not bytes
        assert!(kind.validate(Some(&text("ééé"))).is_ok());
    }

    #[test]
    fn test_integer_coercion() {
        let kind = FieldKind::Integer {
            min: Some(1),
            max: Some(999),
        };
        assert_eq!(kind.validate(Some(&text(" 12 "))), Ok(FieldValue::Integer(12)));
        assert_eq!(
            kind.validate(Some(&text("0"))),
            Err("Number must be greater than or equal to 1".to_string())
        );
        assert_eq!(
            kind.validate(Some(&text("1000"))),
            Err("Number must be less than or equal to 999".to_string())
        );
        assert_eq!(
            kind.validate(Some(&text("twelve"))),
            Err("Expected number, received nan".to_string())
        );
        assert_eq!(
            kind.validate(Some(&text("2.5"))),
            Err("Expected integer, received float".to_string())
        );
        assert_eq!(kind.validate(Some(&text("1e2"))), Ok(FieldValue::Integer(100)));
        assert_eq!(kind.validate(Some(&text("12.0"))), Ok(FieldValue::Integer(12)));
        assert_eq!(kind.validate(Some(&text(""))), Err("Required".to_string()));
        assert_eq!(kind.validate(None), Err("Required".to_string()));
    }

    #[test]
    fn test_integer_exponent_and_overflow() {
        let kind = FieldKind::Integer {
            min: None,
            max: None,
        };
        assert_eq!(kind.validate(Some(&text("1e3"))), Ok(FieldValue::Integer(1000)));
        assert_eq!(kind.validate(Some(&text("-2E2"))), Ok(FieldValue::Integer(-200)));
        assert_eq!(
            kind.validate(Some(&text("99999999999999999999"))),
            Err("Number must be less than or equal to 9223372036854775807".to_string())
        );
        assert_eq!(
            kind.validate(Some(&text("-99999999999999999999"))),
            Err("Number must be greater than or equal to -9223372036854775808".to_string())
        );
        assert_eq!(
            kind.validate(Some(&text("9223372036854775807"))),
            Ok(FieldValue::Integer(i64::MAX))
        );
        assert_eq!(
            kind.validate(Some(&text("1.5e1"))),
            Err("Expected integer, received float".to_string())
        );
        assert_eq!(
            kind.validate(Some(&text("inf"))),
            Err("Expected number, received nan".to_string())
        );
    }

    #[test]
    fn test_choices_must_be_non_empty() {
        let kind = FieldKind::Choices {
            empty_message: "Pick one".into(),
        };
        assert_eq!(kind.validate(None), Err("Pick one".to_string()));
        assert_eq!(
            kind.validate(Some(&FieldInput::Choices(vec![]))),
            Err("Pick one".to_string())
        );
        assert_eq!(
            kind.validate(Some(&FieldInput::Choices(vec!["Chess".into()]))),
            Ok(FieldValue::Choices(vec!["Chess".into()]))
        );
    }

    #[test]
    fn test_field_errors_display() {
        let mut errors = FieldErrors::default();
        errors.push("value", "Pick one");
        errors.push("phoneNUmber", "Expected number, received nan");
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get("value"), Some("Pick one"));
        assert_eq!(errors.get("referral_name"), None);
        assert_eq!(
            errors.to_string(),
            "value: Pick one; phoneNUmber: Expected number, received nan"
        );
    }
}
