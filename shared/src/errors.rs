//! Error types for the Weight Coach shared library

use thiserror::Error;

/// Raised when a string does not name a variant of one of the profile enums
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid {kind} '{value}'. Must be one of: {expected}")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
    pub expected: String,
}

impl ParseEnumError {
    pub fn new(kind: &'static str, value: &str, expected: &[&str]) -> Self {
        Self {
            kind,
            value: value.to_string(),
            expected: expected.join(", "),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_enum_error_message() {
        let err = ParseEnumError::new("gender", "robot", &["male", "female", "other"]);
        assert_eq!(
            err.to_string(),
            "Invalid gender 'robot'. Must be one of: male, female, other"
        );
    }
}
