// src/errors.rs
// DOCUMENTATION: Custom error types and HTTP responses
// PURPOSE: Centralized error handling for entire application

use crate::models::BusinessRecord;
use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::json;
use thiserror::Error;

/// Domain error for calls to external collaborators
/// DOCUMENTATION: Raised by the Places and Sheets clients and the sheet sink
#[derive(Error, Debug)]
pub enum LeadsError {
    #[error("External API error: {0}")]
    ExternalApi(String),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Spreadsheet error: {0}")]
    Spreadsheet(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// A city search failed and the aggregation stopped
/// DOCUMENTATION: Carries the records gathered before the failing city
#[derive(Error, Debug)]
#[error("Search failed for {city}: {source}")]
pub struct AggregationError {
    /// Name of the city whose search failed
    pub city: String,
    /// Records gathered from earlier cities
    pub partial: Vec<BusinessRecord>,
    #[source]
    pub source: LeadsError,
}

/// Route-level failures
/// DOCUMENTATION: Each variant renders a fixed client-facing body; the
/// underlying cause is only logged, except for SpreadsheetLookup which
/// passes the upstream message through
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Failed to fetch window cleaning businesses")]
    FetchFailed,

    #[error("Failed to save data to Google Sheets")]
    SaveFailed,

    #[error("Failed to read data from Google Sheets")]
    ReadFailed,

    #[error("Failed to fetch spreadsheet")]
    SpreadsheetLookup(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Convert ApiError to HTTP response
impl ResponseError for ApiError {
    fn error_response(&self) -> HttpResponse {
        let body = match self {
            ApiError::SpreadsheetLookup(upstream) => json!({
                "message": self.to_string(),
                "error": upstream,
            }),
            _ => json!({ "error": self.to_string() }),
        };

        HttpResponse::build(self.status_code()).json(body)
    }

    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::FetchFailed | ApiError::SaveFailed | ApiError::ReadFailed => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::SpreadsheetLookup(_) | ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        }
    }
}
