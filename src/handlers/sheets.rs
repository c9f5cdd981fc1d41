// src/handlers/sheets.rs
// DOCUMENTATION: HTTP handlers for spreadsheet reads
// PURPOSE: Read persisted rows back and expose raw spreadsheet metadata

use crate::config::Config;
use crate::errors::{ApiError, LeadsError};
use crate::services::{GoogleSheetsClient, SheetSink, SheetsCredentials};
use actix_web::{web, HttpResponse, Responder};
use serde_json::json;

/// GET /get-sheet-data
/// Read all persisted rows from the configured spreadsheet
pub async fn get_sheet_data(
    config: web::Data<Config>,
    credentials: web::Data<SheetsCredentials>,
) -> Result<impl Responder, ApiError> {
    let sheet = GoogleSheetsClient::from_config(&config, credentials.get_ref().clone())
        .map_err(|e| {
            log::error!("Error reading sheet: {}", e);
            ApiError::ReadFailed
        })?;

    let records = SheetSink::new(&sheet).read_all().await.map_err(|e| {
        log::error!("Error reading sheet: {}", e);
        ApiError::ReadFailed
    })?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Sheet data retrieved",
        "data": records,
    })))
}

/// GET /sheetById/{id}
/// Raw passthrough of spreadsheet metadata for any id
pub async fn sheet_by_id(
    config: web::Data<Config>,
    credentials: web::Data<SheetsCredentials>,
    path: web::Path<String>,
) -> Result<impl Responder, ApiError> {
    let spreadsheet_id = path.into_inner();
    let client = GoogleSheetsClient::unbound(&config, credentials.get_ref().clone());

    let data = client.get_spreadsheet(&spreadsheet_id).await.map_err(|e| {
        log::error!("Error fetching spreadsheet {}: {}", spreadsheet_id, e);
        ApiError::SpreadsheetLookup(upstream_message(e))
    })?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Spreadsheet retrieved",
        "data": data,
    })))
}

/// Upstream message without our own prefix
fn upstream_message(err: LeadsError) -> String {
    match err {
        LeadsError::Spreadsheet(msg) | LeadsError::InvalidInput(msg) => msg,
        other => other.to_string(),
    }
}

/// Configuration for spreadsheet routes
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/get-sheet-data", web::get().to(get_sheet_data))
        .route("/sheetById/{id}", web::get().to(sheet_by_id));
}
