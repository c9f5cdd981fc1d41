// src/services/fakes.rs
// In-memory stand-ins for the Places and Sheets APIs, used by unit tests

use crate::errors::LeadsError;
use crate::services::google_sheets_client::{
    SheetEntry, SheetProperties, SpreadsheetApi, SpreadsheetInfo,
};
use crate::services::{NearbyPlace, PlacesApi};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;

pub fn place(place_id: &str, name: &str, vicinity: &str, rating: Option<f64>) -> NearbyPlace {
    NearbyPlace {
        place_id: place_id.to_string(),
        name: Some(name.to_string()),
        vicinity: Some(vicinity.to_string()),
        formatted_address: None,
        rating,
    }
}

fn coord_key(lat: f64, lng: f64) -> String {
    format!("{},{}", lat, lng)
}

/// Search results keyed by coordinates, phones keyed by place id.
/// Anything not configured fails.
#[derive(Default)]
pub struct FakePlaces {
    searches: HashMap<String, Option<Vec<NearbyPlace>>>,
    phones: HashMap<String, Option<Option<String>>>,
    search_log: Mutex<Vec<(f64, f64, u32, String)>>,
    detail_log: Mutex<Vec<String>>,
}

impl FakePlaces {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, lat: f64, lng: f64, places: Vec<NearbyPlace>) -> Self {
        self.searches.insert(coord_key(lat, lng), Some(places));
        self
    }

    pub fn with_failing_search(mut self, lat: f64, lng: f64) -> Self {
        self.searches.insert(coord_key(lat, lng), None);
        self
    }

    pub fn with_phone(mut self, place_id: &str, phone: Option<&str>) -> Self {
        self.phones
            .insert(place_id.to_string(), Some(phone.map(str::to_string)));
        self
    }

    pub fn with_failing_phone(mut self, place_id: &str) -> Self {
        self.phones.insert(place_id.to_string(), None);
        self
    }

    pub fn search_calls(&self) -> Vec<(f64, f64, u32, String)> {
        self.search_log.lock().unwrap().clone()
    }

    pub fn detail_calls(&self) -> Vec<String> {
        self.detail_log.lock().unwrap().clone()
    }
}

#[async_trait]
impl PlacesApi for FakePlaces {
    async fn nearby_search(
        &self,
        latitude: f64,
        longitude: f64,
        radius: u32,
        keyword: &str,
    ) -> Result<Vec<NearbyPlace>, LeadsError> {
        self.search_log
            .lock()
            .unwrap()
            .push((latitude, longitude, radius, keyword.to_string()));

        match self.searches.get(&coord_key(latitude, longitude)) {
            Some(Some(places)) => Ok(places.clone()),
            _ => Err(LeadsError::ExternalApi("API error 500".to_string())),
        }
    }

    async fn phone_number(&self, place_id: &str) -> Result<Option<String>, LeadsError> {
        self.detail_log.lock().unwrap().push(place_id.to_string());

        match self.phones.get(place_id) {
            Some(Some(phone)) => Ok(phone.clone()),
            _ => Err(LeadsError::ExternalApi("connect ECONNREFUSED".to_string())),
        }
    }
}

/// A spreadsheet with one sheet held in memory
pub struct FakeSpreadsheet {
    title: Option<String>,
    rows: Mutex<Vec<Vec<Value>>>,
    info_loads: Mutex<usize>,
    append_calls: Mutex<usize>,
    fail_appends: bool,
}

impl FakeSpreadsheet {
    pub fn new(title: &str) -> Self {
        Self {
            title: Some(title.to_string()),
            rows: Mutex::new(Vec::new()),
            info_loads: Mutex::new(0),
            append_calls: Mutex::new(0),
            fail_appends: false,
        }
    }

    pub fn without_sheets() -> Self {
        Self {
            title: None,
            ..Self::new("")
        }
    }

    pub fn with_rows(self, rows: Vec<Vec<Value>>) -> Self {
        *self.rows.lock().unwrap() = rows;
        self
    }

    pub fn failing_appends(mut self) -> Self {
        self.fail_appends = true;
        self
    }

    pub fn rows(&self) -> Vec<Vec<Value>> {
        self.rows.lock().unwrap().clone()
    }

    pub fn info_loads(&self) -> usize {
        *self.info_loads.lock().unwrap()
    }

    pub fn append_calls(&self) -> usize {
        *self.append_calls.lock().unwrap()
    }
}

#[async_trait]
impl SpreadsheetApi for FakeSpreadsheet {
    async fn load_info(&self) -> Result<SpreadsheetInfo, LeadsError> {
        *self.info_loads.lock().unwrap() += 1;

        Ok(SpreadsheetInfo {
            sheets: self
                .title
                .iter()
                .map(|title| SheetEntry {
                    properties: SheetProperties {
                        title: title.clone(),
                        index: 0,
                    },
                })
                .collect(),
        })
    }

    async fn read_values(&self, _range: &str) -> Result<Vec<Vec<Value>>, LeadsError> {
        Ok(self.rows.lock().unwrap().clone())
    }

    async fn append_values(&self, _range: &str, rows: Vec<Vec<Value>>) -> Result<(), LeadsError> {
        *self.append_calls.lock().unwrap() += 1;
        if self.fail_appends {
            return Err(LeadsError::Spreadsheet(
                "The caller does not have permission".to_string(),
            ));
        }
        self.rows.lock().unwrap().extend(rows);
        Ok(())
    }
}
