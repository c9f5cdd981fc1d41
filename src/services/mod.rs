// src/services/mod.rs
// DOCUMENTATION: Services module organization
// PURPOSE: Re-export service components

pub mod aggregator;
pub mod city_catalog;
pub mod details_resolver;
pub mod google_places_client;
pub mod google_sheets_client;
pub mod sheet_sink;
pub mod token_source;

#[cfg(test)]
pub mod fakes;

pub use aggregator::*;
pub use city_catalog::*;
pub use details_resolver::*;
pub use google_places_client::*;
pub use google_sheets_client::{GoogleSheetsClient, SpreadsheetApi};
pub use sheet_sink::*;
pub use token_source::SheetsCredentials;
