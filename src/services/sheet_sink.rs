// src/services/sheet_sink.rs
// DOCUMENTATION: Spreadsheet persistence for aggregated businesses
// PURPOSE: Append BusinessRecords as rows and read them back by header name

use crate::errors::LeadsError;
use crate::models::{BusinessRecord, Rating};
use crate::services::google_sheets_client::{sheet_range, SpreadsheetApi};
use serde_json::Value;

/// Column headers, in the order used when bootstrapping an empty sheet
pub const SHEET_HEADERS: [&str; 5] = ["Name", "Location", "Address", "Rating", "Phone"];

/// Position of each record field in a sheet row
#[derive(Debug, Clone, Copy, PartialEq)]
struct ColumnLayout {
    name: usize,
    location: usize,
    address: usize,
    rating: usize,
    phone: usize,
}

impl ColumnLayout {
    fn standard() -> Self {
        Self {
            name: 0,
            location: 1,
            address: 2,
            rating: 3,
            phone: 4,
        }
    }

    /// Locate the five headers in a header row (trimmed, case-insensitive)
    fn from_header(header: &[Value]) -> Result<Self, LeadsError> {
        let find = |wanted: &str| {
            header
                .iter()
                .position(|cell| cell_text(cell).trim().eq_ignore_ascii_case(wanted))
                .ok_or_else(|| {
                    LeadsError::Spreadsheet(format!("Header row is missing column \"{}\"", wanted))
                })
        };

        Ok(Self {
            name: find("Name")?,
            location: find("Location")?,
            address: find("Address")?,
            rating: find("Rating")?,
            phone: find("Phone")?,
        })
    }

    fn width(&self) -> usize {
        [self.name, self.location, self.address, self.rating, self.phone]
            .into_iter()
            .max()
            .unwrap_or(0)
            + 1
    }

    fn encode(&self, record: &BusinessRecord) -> Vec<Value> {
        let mut row = vec![Value::String(String::new()); self.width()];
        row[self.name] = Value::String(record.name.clone());
        row[self.location] = Value::String(record.city.clone());
        row[self.address] = Value::String(record.address.clone());
        row[self.rating] = record.rating.to_cell();
        row[self.phone] = Value::String(record.phone.clone());
        row
    }

    fn decode(&self, row: &[Value]) -> BusinessRecord {
        let text = |idx: usize| row.get(idx).map(cell_text).unwrap_or_default();

        BusinessRecord {
            city: text(self.location),
            name: text(self.name),
            address: text(self.address),
            rating: row
                .get(self.rating)
                .map(Rating::from_cell)
                .unwrap_or(Rating::NotAvailable),
            phone: text(self.phone),
        }
    }
}

/// Render a raw cell value as text
fn cell_text(cell: &Value) -> String {
    match cell {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn is_blank_row(row: &[Value]) -> bool {
    row.iter().all(|cell| cell_text(cell).trim().is_empty())
}

/// Split sheet values into the header (first non-blank row) and the rows below it
fn split_header(values: Vec<Vec<Value>>) -> Option<(Vec<Value>, Vec<Vec<Value>>)> {
    let mut rows = values.into_iter().skip_while(|row| is_blank_row(row));
    let header = rows.next()?;
    Some((header, rows.collect()))
}

/// Spreadsheet sink
/// DOCUMENTATION: Every call reloads spreadsheet metadata and works on the
/// first sheet. Rows are matched to fields by header name
pub struct SheetSink<'a> {
    api: &'a dyn SpreadsheetApi,
}

impl<'a> SheetSink<'a> {
    pub fn new(api: &'a dyn SpreadsheetApi) -> Self {
        Self { api }
    }

    async fn first_sheet_title(&self) -> Result<String, LeadsError> {
        let info = self.api.load_info().await?;
        info.first_sheet_title()
            .map(str::to_string)
            .ok_or_else(|| LeadsError::Spreadsheet("Spreadsheet has no sheets".to_string()))
    }

    /// Append one row per record, in order
    /// DOCUMENTATION: Writes the header row first when the sheet is empty.
    /// Returns the number of records written
    pub async fn append(&self, records: &[BusinessRecord]) -> Result<usize, LeadsError> {
        let title = self.first_sheet_title().await?;

        if records.is_empty() {
            log::info!("No records to append to sheet {}", title);
            return Ok(0);
        }

        let values = self.api.read_values(&sheet_range(&title, None)).await?;
        let header = split_header(values).map(|(header, _)| header);

        let mut rows: Vec<Vec<Value>> = Vec::with_capacity(records.len() + 1);
        let layout = match header {
            Some(header) => ColumnLayout::from_header(&header)?,
            None => {
                log::info!("Sheet {} has no header row, writing headers", title);
                rows.push(
                    SHEET_HEADERS
                        .iter()
                        .map(|h| Value::String(h.to_string()))
                        .collect(),
                );
                ColumnLayout::standard()
            }
        };

        rows.extend(records.iter().map(|record| layout.encode(record)));

        self.api
            .append_values(&sheet_range(&title, Some("A1")), rows)
            .await?;

        log::info!("Appended {} rows to sheet {}", records.len(), title);
        Ok(records.len())
    }

    /// Read every data row of the first sheet back into records
    pub async fn read_all(&self) -> Result<Vec<BusinessRecord>, LeadsError> {
        let title = self.first_sheet_title().await?;
        let values = self.api.read_values(&sheet_range(&title, None)).await?;

        let (header, rows) = match split_header(values) {
            Some(split) => split,
            None => {
                log::info!("Sheet {} is empty", title);
                return Ok(Vec::new());
            }
        };

        let layout = ColumnLayout::from_header(&header)?;
        let records: Vec<BusinessRecord> = rows
            .into_iter()
            .filter(|row| !is_blank_row(row))
            .map(|row| layout.decode(&row))
            .collect();

        log::info!("Read {} rows from sheet {}", records.len(), title);
        Ok(records)
    }
}
