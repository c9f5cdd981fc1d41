// src/models/business.rs
// DOCUMENTATION: Core data structures for aggregated businesses
// PURPOSE: City definitions, enriched business rows and the rating sentinel

use serde::ser::Serializer;
use serde::Serialize;

/// Placeholder phone when the details lookup succeeded without a number
pub const NO_PHONE_NUMBER: &str = "No Phone Number";

/// Placeholder phone when the details lookup failed
pub const ERROR_FETCHING_NUMBER: &str = "Error Fetching Number";

/// Placeholder rating when upstream did not report one
pub const RATING_NOT_AVAILABLE: &str = "N/A";

/// A search center
/// DOCUMENTATION: Statically configured, identity is the name
#[derive(Debug, Clone, PartialEq)]
pub struct City {
    /// Display name, e.g. "Chicago, IL"
    pub name: String,
    /// Center latitude
    pub lat: f64,
    /// Center longitude
    pub lng: f64,
}

impl City {
    pub fn new(name: impl Into<String>, lat: f64, lng: f64) -> Self {
        Self {
            name: name.into(),
            lat,
            lng,
        }
    }
}

/// Business rating as persisted and returned
/// DOCUMENTATION: Serializes as a JSON number or the literal string "N/A",
/// so both shapes share one column in the spreadsheet
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rating {
    Score(f64),
    NotAvailable,
}

impl Rating {
    /// Map an optional upstream rating onto the sentinel
    pub fn from_upstream(rating: Option<f64>) -> Self {
        match rating {
            Some(score) => Rating::Score(score),
            None => Rating::NotAvailable,
        }
    }

    /// Parse a rating cell read back from the spreadsheet
    /// DOCUMENTATION: Accepts numbers and numeric strings; anything else,
    /// including "N/A" and empty cells, becomes NotAvailable
    pub fn from_cell(cell: &serde_json::Value) -> Self {
        match cell {
            serde_json::Value::Number(n) => n
                .as_f64()
                .map(Rating::Score)
                .unwrap_or(Rating::NotAvailable),
            serde_json::Value::String(s) => s
                .trim()
                .parse::<f64>()
                .map(Rating::Score)
                .unwrap_or(Rating::NotAvailable),
            _ => Rating::NotAvailable,
        }
    }

    /// Cell value written to the spreadsheet
    pub fn to_cell(&self) -> serde_json::Value {
        match self {
            Rating::Score(score) => serde_json::json!(score),
            Rating::NotAvailable => serde_json::Value::String(RATING_NOT_AVAILABLE.to_string()),
        }
    }
}

impl Serialize for Rating {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Rating::Score(score) => serializer.serialize_f64(*score),
            Rating::NotAvailable => serializer.serialize_str(RATING_NOT_AVAILABLE),
        }
    }
}

/// One enriched business row
/// DOCUMENTATION: Built from a nearby-search result plus a phone lookup.
/// Immutable after construction; `phone` is never empty
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BusinessRecord {
    /// Name of the catalog city whose search produced this row
    pub city: String,
    /// Business name
    pub name: String,
    /// Short address (vicinity)
    pub address: String,
    /// Upstream rating or "N/A"
    pub rating: Rating,
    /// Phone number or one of the phone sentinels
    pub phone: String,
}
