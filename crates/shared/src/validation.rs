//! Common validation utilities.

use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

lazy_static! {
    // Permissive on purpose: a non-empty local part, an `@`, and a dot
    // somewhere after it. The sign-up form accepts addresses this loose.
    static ref EMAIL_REGEX: Regex = Regex::new(r"^[^@]+@.+\..+$").unwrap();
}

/// Validates that an email has the rough `local@domain.tld` shape.
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if EMAIL_REGEX.is_match(email) {
        Ok(())
    } else {
        let mut err = ValidationError::new("email_format");
        err.message = Some("Please enter a valid email address".into());
        Err(err)
    }
}
