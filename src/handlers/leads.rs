// src/handlers/leads.rs
// DOCUMENTATION: HTTP handlers for business aggregation
// PURPOSE: Run the multi-city search and return or persist the results

use crate::config::Config;
use crate::errors::ApiError;
use crate::models::{AggregationQuery, BusinessRecord};
use crate::services::{
    CityCatalog, GooglePlacesClient, GoogleSheetsClient, NearbySearchAggregator, PlacesApi,
    SheetSink, SheetsCredentials, SpreadsheetApi,
};
use actix_web::{web, HttpResponse, Responder};
use chrono::Utc;
use serde::Serialize;
use validator::Validate;

/// Response for a successful save
#[derive(Debug, Serialize)]
pub struct SaveReport {
    pub message: String,
    /// Rows appended to the sheet
    pub rows_written: usize,
    /// When the append completed (RFC 3339)
    pub saved_at: String,
}

fn places_client(config: &Config) -> GooglePlacesClient {
    GooglePlacesClient::new(
        config.google_maps_api_key.clone(),
        config.places_base_url.clone(),
    )
}

/// Aggregate over the catalog with query overrides applied
async fn fetch_businesses(
    api: &dyn PlacesApi,
    config: &Config,
    query: &AggregationQuery,
) -> Result<Vec<BusinessRecord>, ApiError> {
    let keyword = query.keyword.as_deref().unwrap_or(&config.search_keyword);
    let radius = query.radius.unwrap_or(config.search_radius_m);

    NearbySearchAggregator::new(api)
        .aggregate(&CityCatalog::all(), keyword, radius)
        .await
        .map_err(|e| {
            log::error!(
                "Error fetching data: {} (discarding {} partial records)",
                e,
                e.partial.len()
            );
            ApiError::FetchFailed
        })
}

/// Aggregate, then append everything to the sheet
/// DOCUMENTATION: Nothing is written when the aggregation fails
async fn save_businesses(
    api: &dyn PlacesApi,
    sheet: &dyn SpreadsheetApi,
    config: &Config,
    query: &AggregationQuery,
) -> Result<SaveReport, ApiError> {
    let records = fetch_businesses(api, config, query).await.map_err(|_| ApiError::SaveFailed)?;

    let rows_written = SheetSink::new(sheet).append(&records).await.map_err(|e| {
        log::error!("Error saving data: {}", e);
        ApiError::SaveFailed
    })?;

    Ok(SaveReport {
        message: "Data saved to Google Sheets!".to_string(),
        rows_written,
        saved_at: Utc::now().to_rfc3339(),
    })
}

fn validated(query: web::Query<AggregationQuery>) -> Result<AggregationQuery, ApiError> {
    let query = query.into_inner();
    query
        .validate()
        .map_err(|e| ApiError::InvalidInput(e.to_string()))?;
    Ok(query)
}

/// GET /api/window-cleaners
/// Aggregate businesses across all catalog cities
pub async fn list_businesses(
    config: web::Data<Config>,
    query: web::Query<AggregationQuery>,
) -> Result<impl Responder, ApiError> {
    let query = validated(query)?;
    let places = places_client(&config);

    let records = fetch_businesses(&places, &config, &query).await?;
    Ok(HttpResponse::Ok().json(records))
}

/// GET /api/save-data
/// Aggregate businesses and append them to the configured spreadsheet
pub async fn save_data(
    config: web::Data<Config>,
    credentials: web::Data<SheetsCredentials>,
    query: web::Query<AggregationQuery>,
) -> Result<impl Responder, ApiError> {
    let query = validated(query)?;
    let places = places_client(&config);
    let sheet = GoogleSheetsClient::from_config(&config, credentials.get_ref().clone())
        .map_err(|e| {
            log::error!("Error saving data: {}", e);
            ApiError::SaveFailed
        })?;

    let report = save_businesses(&places, &sheet, &config, &query).await?;
    Ok(HttpResponse::Ok().json(report))
}

/// Configuration for aggregation routes (both path namings)
/// DOCUMENTATION: Unparseable query strings get the same JSON 400 body as
/// out-of-range values
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::QueryConfig::default().error_handler(|err, _req| {
        log::warn!("Rejected query string: {}", err);
        ApiError::InvalidInput(err.to_string()).into()
    }));

    cfg.route("/api/window-cleaners", web::get().to(list_businesses))
        .route("/window-cleaners", web::get().to(list_businesses))
        .route("/api/save-data", web::get().to(save_data))
        .route("/save-data", web::get().to(save_data));
}
