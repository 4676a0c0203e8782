//! Registration validation.
//!
//! One validator shared by every submission path. Which extra fields are
//! mandatory comes from [`Affiliation::required_extras`], not from
//! per-caller checks.

use chrono::{DateTime, Utc};
use std::str::FromStr;
use thiserror::Error;

use crate::models::{Affiliation, Attendance, RegistrationRecord, RegistrationSubmission};

/// Why a submission was rejected.
///
/// All variants are user-correctable; the caller surfaces the specific
/// reason so the form can be fixed and resubmitted.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistrationError {
    #[error("Missing required field: {0}")]
    MissingRequiredField(&'static str),

    #[error("Please enter a valid email address")]
    InvalidEmailFormat,

    #[error("Missing field required for this affiliation: {0}")]
    MissingConditionalField(&'static str),

    #[error("Unsupported value for {field}: {value}")]
    UnsupportedValue { field: &'static str, value: String },
}

/// Validates a submission and stamps it with the current server time.
pub fn validate(submission: RegistrationSubmission) -> Result<RegistrationRecord, RegistrationError> {
    validate_at(submission, Utc::now())
}

/// Validates a submission and stamps it with the given acceptance time.
///
/// The timestamp always comes from the server; anything the client sent is
/// already gone by the time the submission reaches this function.
pub fn validate_at(
    submission: RegistrationSubmission,
    accepted_at: DateTime<Utc>,
) -> Result<RegistrationRecord, RegistrationError> {
    for (name, value) in [
        ("firstName", &submission.first_name),
        ("lastName", &submission.last_name),
        ("email", &submission.email),
        ("affiliationType", &submission.affiliation_type),
        ("attendance", &submission.attendance),
    ] {
        if value.is_empty() {
            return Err(RegistrationError::MissingRequiredField(name));
        }
    }

    if shared::validation::validate_email(&submission.email).is_err() {
        return Err(RegistrationError::InvalidEmailFormat);
    }

    let affiliation = Affiliation::from_str(&submission.affiliation_type).map_err(|_| {
        RegistrationError::UnsupportedValue {
            field: "affiliationType",
            value: submission.affiliation_type.clone(),
        }
    })?;

    let attendance = Attendance::from_str(&submission.attendance).map_err(|_| {
        RegistrationError::UnsupportedValue {
            field: "attendance",
            value: submission.attendance.clone(),
        }
    })?;

    for &field in affiliation.required_extras() {
        let value = match field {
            "netId" => &submission.net_id,
            "graduationYear" => &submission.graduation_year,
            "program" => &submission.program,
            _ => continue,
        };
        if value.is_empty() {
            return Err(RegistrationError::MissingConditionalField(field));
        }
    }

    Ok(RegistrationRecord {
        first_name: submission.first_name,
        last_name: submission.last_name,
        email: submission.email,
        affiliation_type: affiliation,
        net_id: non_empty(submission.net_id),
        graduation_year: non_empty(submission.graduation_year),
        program: non_empty(submission.program),
        attendance,
        questions: non_empty(submission.questions),
        timestamp: accepted_at,
    })
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}
