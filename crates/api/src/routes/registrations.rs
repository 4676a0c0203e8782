//! Public sign-up endpoint handlers.

use axum::{extract::State, Json};
use serde::Serialize;
use tracing::info;

use domain::models::RegistrationSubmission;
use domain::services;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::record_registration_saved;

/// Acknowledgement returned for an accepted registration.
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub success: bool,
    pub message: String,
}

/// Accept a sign-up form submission.
///
/// POST /api/v1/registrations
pub async fn register(
    State(state): State<AppState>,
    Json(submission): Json<RegistrationSubmission>,
) -> Result<Json<RegisterResponse>, ApiError> {
    let record = services::validate(submission)?;

    state.store.append(&record).await?;
    record_registration_saved();

    info!(affiliation = %record.affiliation_type, "registration saved");

    Ok(Json(RegisterResponse {
        success: true,
        message: "Registration saved successfully".to_string(),
    }))
}
