//! JSON body parsing with validation
//!
//! The account dispatcher receives the raw body for every method, so it
//! parses per operation instead of through an extractor. Deserialisation
//! errors (including missing required fields) and `validator` failures both
//! become [`DomainError::Validation`].

use serde::de::DeserializeOwned;
use validator::Validate;

use crate::shared::{DomainError, DomainResult};

/// Deserialize `body` as JSON and run `Validate::validate()` on it.
pub fn parse_validated<T>(body: &[u8]) -> DomainResult<T>
where
    T: DeserializeOwned + Validate,
{
    let value: T = serde_json::from_slice(body)
        .map_err(|e| DomainError::Validation(format!("Invalid JSON: {}", e)))?;

    value
        .validate()
        .map_err(|errors| DomainError::Validation(describe(&errors)))?;

    Ok(value)
}

fn describe(errors: &validator::ValidationErrors) -> String {
    let mut field_errors: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                let msg = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string());
                format!("{}: {}", field, msg)
            })
        })
        .collect();
    field_errors.sort();

    if field_errors.is_empty() {
        "Validation failed".to_string()
    } else {
        field_errors.join("; ")
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, Validate)]
    struct TestBody {
        #[validate(length(min = 1, max = 10))]
        name: String,
        #[validate(email(message = "must be a valid email address"))]
        email: String,
    }

    #[test]
    fn valid_body_parses() {
        let body = br#"{"name": "Alice", "email": "alice@x.com"}"#;
        let parsed: TestBody = parse_validated(body).unwrap();
        assert_eq!(parsed.name, "Alice");
        assert_eq!(parsed.email, "alice@x.com");
    }

    #[test]
    fn missing_field_is_rejected() {
        let err = parse_validated::<TestBody>(br#"{"name": "Alice"}"#).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        assert!(err.to_string().contains("missing field `email`"), "{err}");
    }

    #[test]
    fn empty_body_is_rejected() {
        let err = parse_validated::<TestBody>(b"").unwrap_err();
        assert!(err.to_string().starts_with("Validation: Invalid JSON"), "{err}");
    }

    #[test]
    fn validation_failures_name_each_field() {
        let err = parse_validated::<TestBody>(br#"{"name": "", "email": "nope"}"#).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("email: must be a valid email address"), "{message}");
        assert!(message.contains("name: length"), "{message}");
    }
}
