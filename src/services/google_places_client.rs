// src/services/google_places_client.rs
// DOCUMENTATION: Google Places API client
// PURPOSE: Nearby search and single-field place details lookups

use crate::errors::LeadsError;
use async_trait::async_trait;
use reqwest::{Client, Request};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Places operations used by the aggregator
/// DOCUMENTATION: Seam over the Places web service so the aggregation can
/// run against an in-memory fake in tests
#[async_trait]
pub trait PlacesApi: Send + Sync {
    /// Keyword search within `radius` meters of a point, first page only
    async fn nearby_search(
        &self,
        latitude: f64,
        longitude: f64,
        radius: u32,
        keyword: &str,
    ) -> Result<Vec<NearbyPlace>, LeadsError>;

    /// Phone number for a place; Ok(None) when the place has none
    async fn phone_number(&self, place_id: &str) -> Result<Option<String>, LeadsError>;
}

/// Google Places API client
/// DOCUMENTATION: Handles authentication and API calls to Google Places
pub struct GooglePlacesClient {
    /// HTTP client for making requests
    client: Client,
    /// Google Places API key
    api_key: String,
    /// Base URL for Google Places API
    base_url: String,
}

/// Response from Google Places Nearby Search
/// DOCUMENTATION: Parsed response from Google Places API
#[derive(Debug, Deserialize, Serialize)]
pub struct GooglePlacesResponse {
    /// Results array from API
    #[serde(default)]
    pub results: Vec<NearbyPlace>,
    /// Status of the API call
    pub status: String,
    /// Next page token (ignored, only the first page is consumed)
    pub next_page_token: Option<String>,
    /// Error message (if status is not OK)
    pub error_message: Option<String>,
}

/// Individual search result
/// DOCUMENTATION: Only the fields merged into a BusinessRecord are kept.
/// Every field is optional upstream, so all of them default
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct NearbyPlace {
    /// Google's unique place identifier
    #[serde(default)]
    pub place_id: String,
    /// Place name
    pub name: Option<String>,
    /// Vicinity (short address, from Nearby Search)
    pub vicinity: Option<String>,
    /// Formatted address (Text Search shape)
    pub formatted_address: Option<String>,
    /// Rating (1-5)
    pub rating: Option<f64>,
}

impl NearbyPlace {
    /// Display name, empty when upstream sent none
    pub fn display_name(&self) -> String {
        self.name.clone().unwrap_or_default()
    }

    /// Prefer vicinity, fall back to formatted_address, then empty
    pub fn address(&self) -> String {
        self.vicinity
            .clone()
            .or_else(|| self.formatted_address.clone())
            .unwrap_or_default()
    }
}

/// Response from Place Details scoped to the phone field
#[derive(Debug, Deserialize)]
pub struct PhoneDetailsResponse {
    pub result: Option<PhoneDetails>,
    pub status: String,
    pub error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PhoneDetails {
    pub formatted_phone_number: Option<String>,
}

impl GooglePlacesClient {
    /// Create new Google Places API client
    /// DOCUMENTATION: Initializes client with API key and base URL
    pub fn new(api_key: String, base_url: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Nearby Search request for one point
    pub fn nearby_request(
        &self,
        latitude: f64,
        longitude: f64,
        radius: u32,
        keyword: &str,
    ) -> Result<Request, LeadsError> {
        let mut params = HashMap::new();
        params.insert("location", format!("{},{}", latitude, longitude));
        params.insert("radius", radius.to_string());
        params.insert("keyword", keyword.to_string());
        params.insert("key", self.api_key.clone());

        self.get_request("nearbysearch/json", &params)
    }

    /// Place Details request limited to the phone field
    pub fn details_request(&self, place_id: &str) -> Result<Request, LeadsError> {
        let mut params = HashMap::new();
        params.insert("place_id", place_id.to_string());
        params.insert("fields", "formatted_phone_number".to_string());
        params.insert("key", self.api_key.clone());

        self.get_request("details/json", &params)
    }

    fn get_request(
        &self,
        path: &str,
        params: &HashMap<&str, String>,
    ) -> Result<Request, LeadsError> {
        let url = format!("{}/{}", self.base_url, path);

        self.client
            .get(&url)
            .query(params)
            .build()
            .map_err(|e| LeadsError::ExternalApi(format!("Request failed: {}", e)))
    }

    /// Execute a request and decode the JSON body
    /// DOCUMENTATION: Transport failures and non-2xx statuses become
    /// ExternalApi errors
    async fn execute_json<T: serde::de::DeserializeOwned>(
        &self,
        request: Request,
    ) -> Result<T, LeadsError> {
        let response = self.client.execute(request).await.map_err(|e| {
            log::error!("Google Places API request failed: {}", e);
            LeadsError::ExternalApi(format!("Request failed: {}", e))
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            log::error!("Google Places API error {}: {}", status, body);
            return Err(LeadsError::ExternalApi(format!(
                "API error {}: {}",
                status, body
            )));
        }

        response.json().await.map_err(|e| {
            log::error!("Failed to parse Google Places response: {}", e);
            LeadsError::ExternalApi(format!("Parse error: {}", e))
        })
    }
}

#[async_trait]
impl PlacesApi for GooglePlacesClient {
    async fn nearby_search(
        &self,
        latitude: f64,
        longitude: f64,
        radius: u32,
        keyword: &str,
    ) -> Result<Vec<NearbyPlace>, LeadsError> {
        log::debug!(
            "Google Places nearby search: lat={}, lng={}, radius={}, keyword={}",
            latitude,
            longitude,
            radius,
            keyword
        );

        let request = self.nearby_request(latitude, longitude, radius, keyword)?;
        let api_response: GooglePlacesResponse = self.execute_json(request).await?;
        parse_nearby_response(api_response)
    }

    async fn phone_number(&self, place_id: &str) -> Result<Option<String>, LeadsError> {
        log::debug!("Google Places details lookup: place_id={}", place_id);

        let request = self.details_request(place_id)?;
        let api_response: PhoneDetailsResponse = self.execute_json(request).await?;
        parse_phone_response(api_response)
    }
}

/// Check the status of a nearby search response
/// DOCUMENTATION: OK and ZERO_RESULTS are success; quota exhaustion maps to
/// RateLimitExceeded; anything else is an ExternalApi error
pub fn parse_nearby_response(
    api_response: GooglePlacesResponse,
) -> Result<Vec<NearbyPlace>, LeadsError> {
    match api_response.status.as_str() {
        "OK" | "ZERO_RESULTS" => {
            log::info!(
                "Google Places search returned {} results",
                api_response.results.len()
            );
            Ok(api_response.results)
        }
        "OVER_QUERY_LIMIT" => {
            log::error!("Google Places API quota exceeded");
            Err(LeadsError::RateLimitExceeded)
        }
        other => {
            let msg = api_response
                .error_message
                .unwrap_or_else(|| format!("Unknown status: {}", other));
            log::error!("Google Places API request rejected ({}): {}", other, msg);
            Err(LeadsError::ExternalApi(msg))
        }
    }
}

/// Extract the phone number from a details response
/// DOCUMENTATION: NOT_FOUND and ZERO_RESULTS count as a successful lookup
/// without a number; an empty string is treated as missing
pub fn parse_phone_response(
    api_response: PhoneDetailsResponse,
) -> Result<Option<String>, LeadsError> {
    match api_response.status.as_str() {
        "OK" | "NOT_FOUND" | "ZERO_RESULTS" => Ok(api_response
            .result
            .and_then(|details| details.formatted_phone_number)
            .filter(|phone| !phone.trim().is_empty())),
        "OVER_QUERY_LIMIT" => Err(LeadsError::RateLimitExceeded),
        other => Err(LeadsError::ExternalApi(
            api_response
                .error_message
                .unwrap_or_else(|| format!("Details status: {}", other)),
        )),
    }
}
