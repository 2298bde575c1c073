//! Common validation utilities.

use validator::ValidationError;

lazy_static::lazy_static! {
    static ref CURRENCY_CODE_REGEX: regex::Regex = regex::Regex::new(r"^[A-Z]{3}$").unwrap();
    static ref DECIMAL_REGEX: regex::Regex = regex::Regex::new(r"^\d+(\.\d+)?$").unwrap();
}

/// Validates an ISO-4217 style currency code (three uppercase letters).
pub fn validate_currency_code(code: &str) -> Result<(), ValidationError> {
    if CURRENCY_CODE_REGEX.is_match(code) {
        Ok(())
    } else {
        let mut err = ValidationError::new("currency_code");
        err.message = Some("Currency code must be three uppercase letters".into());
        Err(err)
    }
}

/// Validates a non-negative decimal amount carried as a string (e.g. "2000", "0.50").
pub fn validate_decimal_string(value: &str) -> Result<(), ValidationError> {
    if DECIMAL_REGEX.is_match(value) {
        Ok(())
    } else {
        let mut err = ValidationError::new("decimal_string");
        err.message = Some("Amount must be a non-negative decimal number".into());
        Err(err)
    }
}
