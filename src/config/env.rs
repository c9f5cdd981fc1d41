// src/config/env.rs
// DOCUMENTATION: Environment variable management
// PURPOSE: Load and validate configuration from .env files

use dotenv::dotenv;
use std::env;
use std::path::PathBuf;

/// How requests to the Sheets API are authorized
/// DOCUMENTATION: First match wins: service-account key file, then a
/// ready-made access token, then an API key
#[derive(Debug, Clone, PartialEq)]
pub enum SheetsAuth {
    /// Service-account JSON key; tokens are minted at request time
    ServiceAccount(PathBuf),
    /// OAuth access token obtained out-of-band
    BearerToken(String),
    /// API key, sufficient for reading public spreadsheets
    ApiKey(String),
    /// No credentials configured
    Anonymous,
}

impl SheetsAuth {
    fn from_env() -> Self {
        if let Some(path) = non_empty_var("GOOGLE_APPLICATION_CREDENTIALS") {
            SheetsAuth::ServiceAccount(PathBuf::from(path))
        } else if let Some(token) = non_empty_var("GOOGLE_SHEETS_ACCESS_TOKEN") {
            SheetsAuth::BearerToken(token)
        } else if let Some(key) = non_empty_var("GOOGLE_SHEETS_API_KEY") {
            SheetsAuth::ApiKey(key)
        } else {
            SheetsAuth::Anonymous
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            SheetsAuth::ServiceAccount(_) => "service account",
            SheetsAuth::BearerToken(_) => "access token",
            SheetsAuth::ApiKey(_) => "api key",
            SheetsAuth::Anonymous => "none",
        }
    }
}

/// Application configuration loaded from environment variables
/// DOCUMENTATION: Centralizes all configuration in one struct
/// Load with Config::from_env() at application startup
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address (e.g., "127.0.0.1")
    pub server_address: String,

    /// Server listen port (default 5000)
    pub server_port: u16,

    /// Environment: development, staging, production
    pub environment: String,

    /// Log level: debug, info, warn, error
    pub log_level: String,

    /// Google Maps (Places) API key
    pub google_maps_api_key: String,

    /// Base URL for the Places web service
    pub places_base_url: String,

    /// Target spreadsheet for save/read operations
    pub spreadsheet_id: String,

    /// Base URL for the Sheets API
    pub sheets_base_url: String,

    /// Sheets credentials
    pub sheets_auth: SheetsAuth,

    /// Default nearby search keyword
    pub search_keyword: String,

    /// Default nearby search radius in meters
    pub search_radius_m: u32,
}

impl Config {
    /// Load configuration from environment variables
    /// DOCUMENTATION: Reads from .env or process environment
    /// Called once at application startup
    pub fn from_env() -> Self {
        dotenv().ok();

        Config {
            server_address: env::var("SERVER_ADDRESS").unwrap_or_else(|_| "127.0.0.1".to_string()),

            server_port: env::var("PORT")
                .unwrap_or_else(|_| "5000".to_string())
                .parse()
                .unwrap_or(5000),

            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),

            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),

            google_maps_api_key: env::var("GOOGLE_MAPS_API_KEY").unwrap_or_default(),

            places_base_url: env::var("PLACES_BASE_URL")
                .unwrap_or_else(|_| "https://maps.googleapis.com/maps/api/place".to_string()),

            spreadsheet_id: env::var("GOOGLE_SPREADSHEET_ID").unwrap_or_default(),

            sheets_base_url: env::var("SHEETS_BASE_URL")
                .unwrap_or_else(|_| "https://sheets.googleapis.com".to_string()),

            sheets_auth: SheetsAuth::from_env(),

            search_keyword: env::var("SEARCH_KEYWORD")
                .unwrap_or_else(|_| "window cleaning".to_string()),

            search_radius_m: env::var("SEARCH_RADIUS_M")
                .unwrap_or_else(|_| "50000".to_string())
                .parse()
                .unwrap_or(50000),
        }
    }

    /// Validate critical configuration
    /// DOCUMENTATION: Ensures application can start safely
    pub fn validate(&self) -> Result<(), String> {
        if self.server_port == 0 {
            return Err("PORT must be non-zero".to_string());
        }

        if self.search_radius_m == 0 || self.search_radius_m > 50000 {
            return Err(format!(
                "SEARCH_RADIUS_M must be between 1 and 50000, got {}",
                self.search_radius_m
            ));
        }

        if self.google_maps_api_key.is_empty() {
            log::warn!("GOOGLE_MAPS_API_KEY not configured - searches will fail");
        }

        if self.spreadsheet_id.is_empty() {
            log::warn!("GOOGLE_SPREADSHEET_ID not configured - sheet routes will fail");
        }

        Ok(())
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
pub(crate) fn test_config() -> Config {
    Config {
        server_address: "127.0.0.1".to_string(),
        server_port: 5000,
        environment: "test".to_string(),
        log_level: "info".to_string(),
        google_maps_api_key: "maps-key".to_string(),
        places_base_url: "http://127.0.0.1:9/place".to_string(),
        spreadsheet_id: "sheet-123".to_string(),
        sheets_base_url: "http://127.0.0.1:9".to_string(),
        sheets_auth: SheetsAuth::Anonymous,
        search_keyword: "window cleaning".to_string(),
        search_radius_m: 50000,
    }
}
