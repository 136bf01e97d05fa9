use lazy_static::lazy_static;
use regex::Regex;
use validator::{Validate, ValidationError};

use crate::core::error::AppError;

lazy_static! {
    /// Any run of whitespace, collapsed to a single space by `normalize_whitespace`
    pub static ref WHITESPACE_REGEX: Regex = Regex::new(r"\s+").unwrap();
}

/// Trims and collapses inner whitespace: "  Green   Energy " -> "Green Energy"
pub fn normalize_whitespace(value: &str) -> String {
    WHITESPACE_REGEX.replace_all(value.trim(), " ").into_owned()
}

/// `validator` custom rule: the field must contain something besides whitespace
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("must not be blank".into());
        return Err(err);
    }
    Ok(())
}

/// Flattens `validator` output into one message per failing rule
pub fn validation_messages(errors: &validator::ValidationErrors) -> Vec<String> {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(msg) => msg.to_string(),
                None => format!("{} is invalid", field),
            })
        })
        .collect();
    messages.sort();
    messages
}

/// Runs `validator` rules on a request body, mapping failures to `AppError::Validation`
pub fn validate_request<T: Validate>(dto: &T) -> Result<(), AppError> {
    dto.validate()
        .map_err(|e| AppError::Validation(validation_messages(&e).join("; ")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Validate)]
    struct Sample {
        #[validate(custom(function = "validate_not_blank"))]
        text: String,
        #[validate(length(min = 5, message = "Title must be at least 5 characters"))]
        title: String,
    }

    #[test]
    fn test_normalize_whitespace() {
        assert_eq!(normalize_whitespace("  Green   Energy "), "Green Energy");
        assert_eq!(normalize_whitespace("tabs\tand\nnewlines"), "tabs and newlines");
        assert_eq!(normalize_whitespace("   "), "");
    }

    #[test]
    fn test_not_blank() {
        assert!(validate_not_blank("ok").is_ok());
        assert!(validate_not_blank("   \t").is_err());
        assert!(validate_not_blank("").is_err());
    }

    #[test]
    fn test_validation_messages_are_collected() {
        let sample = Sample {
            text: "  ".to_string(),
            title: "abc".to_string(),
        };
        let errors = sample.validate().unwrap_err();
        let messages = validation_messages(&errors);

        assert_eq!(
            messages,
            vec![
                "Title must be at least 5 characters".to_string(),
                "must not be blank".to_string()
            ]
        );
    }
}
