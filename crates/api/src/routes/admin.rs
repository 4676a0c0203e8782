//! Admin endpoint handlers: listing, CSV export, status, bulk reset.

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use tracing::info;

use domain::models::{RegistrationRecord, CSV_HEADER};
use persistence::stores::StoreError;
use shared::csv;

use crate::app::AppState;
use crate::error::ApiError;

/// Registrations ordered most recent first.
#[derive(Debug, Serialize)]
pub struct RegistrationListResponse {
    pub count: usize,
    pub registrations: Vec<RegistrationRecord>,
}

/// Collection status as reported by the storage backend.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub success: bool,
    pub ready: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<String>,
    pub registrations_count: u64,
}

/// Acknowledgement for a bulk reset.
#[derive(Debug, Serialize)]
pub struct ResetResponse {
    pub success: bool,
    pub message: String,
}

/// List all registrations, most recent first.
///
/// GET /api/v1/admin/registrations
pub async fn list_registrations(
    State(state): State<AppState>,
) -> Result<Json<RegistrationListResponse>, ApiError> {
    let registrations = match state.store.list().await {
        Ok(records) => records,
        // Nothing stored yet reads as an empty listing.
        Err(StoreError::Csv(_)) => Vec::new(),
        Err(err) => return Err(err.into()),
    };

    Ok(Json(RegistrationListResponse {
        count: registrations.len(),
        registrations,
    }))
}

/// Download the whole collection as a CSV document.
///
/// GET /api/v1/admin/registrations/export
pub async fn export_registrations(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let records = state.store.list().await?;
    if records.is_empty() {
        return Err(ApiError::NotFound("No registrations to export".to_string()));
    }

    let document = csv::encode_document(&CSV_HEADER, records.iter().map(|r| r.csv_fields()));

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"registrations.csv\"",
            ),
        ],
        document,
    ))
}

/// Report the stored header line and registration count.
///
/// GET /api/v1/admin/registrations/status
pub async fn registration_status(
    State(state): State<AppState>,
) -> Result<Json<StatusResponse>, ApiError> {
    match state.store.status().await {
        Ok(status) => Ok(Json(StatusResponse {
            success: true,
            ready: status.ready,
            headers: status.header,
            registrations_count: status.registration_count,
        })),
        // An unreadable document reads as "no data yet", not a failure.
        Err(StoreError::Csv(_)) => Ok(Json(StatusResponse {
            success: true,
            ready: false,
            headers: None,
            registrations_count: 0,
        })),
        Err(err) => Err(err.into()),
    }
}

/// Discard every stored registration and reinitialize empty storage.
///
/// DELETE /api/v1/admin/registrations
pub async fn reset_registrations(
    State(state): State<AppState>,
) -> Result<Json<ResetResponse>, ApiError> {
    state.store.reset().await?;
    info!("registration collection reset");

    Ok(Json(ResetResponse {
        success: true,
        message: "Registrations reset successfully".to_string(),
    }))
}
