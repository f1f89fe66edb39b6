//! Form field input and validation
//!
//! Numeric fields are guarded twice: [`NumericInput`] refuses keystrokes that
//! cannot be part of an integer, and [`NumericRule`] checks presence and
//! bounds when the form is submitted.

use thiserror::Error;

/// Longest integer a numeric field will hold
const MAX_DIGITS: usize = 18;

/// A validation failure shown inline next to its field
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("{field} is required")]
    Required { field: String },
    #[error("{field} must be positive")]
    BelowMinimum { field: String, min: i64 },
    #[error("{field} may not be greater than {max}")]
    AboveMaximum { field: String, max: i64 },
}

/// Text buffer of a numeric input
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NumericInput {
    text: String,
}

impl NumericInput {
    pub fn with_value(value: i64) -> Self {
        Self {
            text: value.to_string(),
        }
    }

    fn accepts(text: &str, c: char) -> bool {
        if text.len() >= MAX_DIGITS {
            return false;
        }
        c.is_ascii_digit() || (c == '-' && text.is_empty())
    }

    /// Append a typed character; returns `false` if it was rejected
    pub fn push(&mut self, c: char) -> bool {
        let accepted = Self::accepts(&self.text, c);
        if accepted {
            self.text.push(c);
        }
        accepted
    }

    pub fn pop(&mut self) {
        self.text.pop();
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Parsed value; a lone `-` counts as empty
    pub fn value(&self) -> Option<i64> {
        self.text.parse().ok()
    }
}

/// Presence and bounds of one numeric field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumericRule {
    pub field: &'static str,
    pub required: bool,
    pub min: i64,
    pub max: i64,
}

impl NumericRule {
    pub fn validate(&self, value: Option<i64>) -> Result<Option<i64>, FieldError> {
        let Some(value) = value else {
            if self.required {
                return Err(FieldError::Required {
                    field: self.field.to_string(),
                });
            }
            return Ok(None);
        };

        if value < self.min {
            return Err(FieldError::BelowMinimum {
                field: self.field.to_string(),
                min: self.min,
            });
        }
        if value > self.max {
            return Err(FieldError::AboveMaximum {
                field: self.field.to_string(),
                max: self.max,
            });
        }
        Ok(Some(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sleep_rule() -> NumericRule {
        NumericRule {
            field: "sleepMs",
            required: true,
            min: 0,
            max: 60000,
        }
    }

    #[test]
    fn test_numeric_input_rejects_non_digits() {
        let mut input = NumericInput::default();
        for c in "not-a-number".chars() {
            input.push(c);
        }
        assert_eq!(input.text(), "");
        assert_eq!(input.value(), None);

        let mut input = NumericInput::with_value(1000);
        assert!(!input.push('x'));
        assert!(!input.push('-'));
        assert!(input.push('5'));
        assert_eq!(input.value(), Some(10005));
    }

    #[test]
    fn test_numeric_input_leading_minus() {
        let mut input = NumericInput::default();
        assert!(input.push('-'));
        assert_eq!(input.value(), None);
        assert!(input.push('1'));
        assert_eq!(input.value(), Some(-1));
    }

    #[test]
    fn test_numeric_input_length_limit() {
        let mut input = NumericInput::default();
        for _ in 0..40 {
            input.push('9');
        }
        assert_eq!(input.text().len(), MAX_DIGITS);
        assert!(input.value().is_some());
    }

    #[test]
    fn test_rule_messages() {
        let rule = sleep_rule();
        assert_eq!(rule.validate(Some(1000)), Ok(Some(1000)));
        assert_eq!(rule.validate(Some(0)), Ok(Some(0)));
        assert_eq!(rule.validate(Some(60000)), Ok(Some(60000)));

        let err = rule.validate(None).unwrap_err();
        assert_eq!(err.to_string(), "sleepMs is required");

        let err = rule.validate(Some(-1)).unwrap_err();
        assert_eq!(err.to_string(), "sleepMs must be positive");

        let err = rule.validate(Some(70000)).unwrap_err();
        assert_eq!(err.to_string(), "sleepMs may not be greater than 60000");
    }

    #[test]
    fn test_optional_rule_allows_missing_value() {
        let rule = NumericRule {
            required: false,
            ..sleep_rule()
        };
        assert_eq!(rule.validate(None), Ok(None));
    }
}
