// src/services/google_sheets_client.rs
// DOCUMENTATION: Google Sheets API v4 client
// PURPOSE: Spreadsheet metadata, value reads and row appends over REST

use crate::config::Config;
use crate::errors::LeadsError;
use crate::services::token_source::SheetsCredentials;
use async_trait::async_trait;
use reqwest::{Client, Request, RequestBuilder, Url};
use serde::Deserialize;
use serde_json::{json, Value};

/// Fields requested when loading metadata; only the sheet list is used
const SHEET_LIST_FIELDS: &str = "sheets.properties(title,index)";

/// Spreadsheet operations used by the sheet sink
/// DOCUMENTATION: Seam over the Sheets API, bound to one spreadsheet
#[async_trait]
pub trait SpreadsheetApi: Send + Sync {
    /// Load the sheet list
    async fn load_info(&self) -> Result<SpreadsheetInfo, LeadsError>;

    /// Read a range as rows of raw cell values
    async fn read_values(&self, range: &str) -> Result<Vec<Vec<Value>>, LeadsError>;

    /// Append rows after the last row of the table found in `range`
    async fn append_values(&self, range: &str, rows: Vec<Vec<Value>>) -> Result<(), LeadsError>;
}

/// Spreadsheet metadata
#[derive(Debug, Clone, Deserialize)]
pub struct SpreadsheetInfo {
    #[serde(default)]
    pub sheets: Vec<SheetEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SheetEntry {
    pub properties: SheetProperties,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SheetProperties {
    pub title: String,
    #[serde(default)]
    pub index: i64,
}

impl SpreadsheetInfo {
    /// Title of the sheet at index 0
    pub fn first_sheet_title(&self) -> Option<&str> {
        self.sheets
            .iter()
            .min_by_key(|sheet| sheet.properties.index)
            .map(|sheet| sheet.properties.title.as_str())
    }
}

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<Value>>,
}

/// Google Sheets API client
/// DOCUMENTATION: Built per request from Config and the shared credentials.
/// Every call is a request builder followed by `execute`
pub struct GoogleSheetsClient {
    /// HTTP client for making requests
    client: Client,
    /// Base URL (scheme and host) of the Sheets API
    base_url: String,
    /// Spreadsheet the SpreadsheetApi operations target
    spreadsheet_id: String,
    /// Credentials attached to every request
    credentials: SheetsCredentials,
}

impl GoogleSheetsClient {
    pub fn new(base_url: String, spreadsheet_id: String, credentials: SheetsCredentials) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            spreadsheet_id,
            credentials,
        }
    }

    /// Create a client for the configured spreadsheet
    pub fn from_config(
        config: &Config,
        credentials: SheetsCredentials,
    ) -> Result<Self, LeadsError> {
        if config.spreadsheet_id.is_empty() {
            return Err(LeadsError::Configuration(
                "GOOGLE_SPREADSHEET_ID not configured".to_string(),
            ));
        }

        Ok(Self::new(
            config.sheets_base_url.clone(),
            config.spreadsheet_id.clone(),
            credentials,
        ))
    }

    /// Create a client for ad-hoc lookups (no fixed spreadsheet)
    pub fn unbound(config: &Config, credentials: SheetsCredentials) -> Self {
        Self::new(config.sheets_base_url.clone(), String::new(), credentials)
    }

    /// Fetch raw metadata for any spreadsheet id
    /// DOCUMENTATION: Errors carry the upstream error message verbatim
    pub async fn get_spreadsheet(&self, spreadsheet_id: &str) -> Result<Value, LeadsError> {
        let request = self.spreadsheet_request(spreadsheet_id).await?;
        self.execute(request).await
    }

    /// GET {base}/v4/spreadsheets/{id}
    pub async fn spreadsheet_request(&self, spreadsheet_id: &str) -> Result<Request, LeadsError> {
        if spreadsheet_id.trim().is_empty() {
            return Err(LeadsError::InvalidInput("spreadsheet id is empty".to_string()));
        }

        let url = self.url(spreadsheet_id, &[])?;
        self.prepare(self.client.get(url)).await
    }

    /// Metadata request for the bound spreadsheet, trimmed to the sheet list
    pub async fn load_info_request(&self) -> Result<Request, LeadsError> {
        let url = self.url(&self.spreadsheet_id, &[])?;
        self.prepare(self.client.get(url).query(&[("fields", SHEET_LIST_FIELDS)]))
            .await
    }

    /// Values read for `range`, with cells as raw (unformatted) values
    pub async fn read_request(&self, range: &str) -> Result<Request, LeadsError> {
        let url = self.url(&self.spreadsheet_id, &["values", range])?;
        self.prepare(
            self.client
                .get(url)
                .query(&[("valueRenderOption", "UNFORMATTED_VALUE")]),
        )
        .await
    }

    /// Row append after the table found in `range`
    pub async fn append_request(
        &self,
        range: &str,
        rows: &[Vec<Value>],
    ) -> Result<Request, LeadsError> {
        let append_range = format!("{}:append", range);
        let url = self.url(&self.spreadsheet_id, &["values", append_range.as_str()])?;
        self.prepare(
            self.client
                .post(url)
                .query(&[
                    ("valueInputOption", "RAW"),
                    ("insertDataOption", "INSERT_ROWS"),
                ])
                .json(&json!({ "majorDimension": "ROWS", "values": rows })),
        )
        .await
    }

    /// Build `{base}/v4/spreadsheets/{id}/{extra...}` with each segment escaped
    fn url(&self, spreadsheet_id: &str, extra: &[&str]) -> Result<Url, LeadsError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| LeadsError::Configuration(format!("Invalid SHEETS_BASE_URL: {}", e)))?;

        url.path_segments_mut()
            .map_err(|_| LeadsError::Configuration("SHEETS_BASE_URL cannot be a base".to_string()))?
            .pop_if_empty()
            .extend(["v4", "spreadsheets", spreadsheet_id])
            .extend(extra);

        Ok(url)
    }

    /// Attach credentials and finish the request
    async fn prepare(&self, request: RequestBuilder) -> Result<Request, LeadsError> {
        let request = match &self.credentials {
            SheetsCredentials::Bearer(tokens) => request.bearer_auth(tokens.access_token().await?),
            SheetsCredentials::ApiKey(key) => request.query(&[("key", key)]),
            SheetsCredentials::Anonymous => request,
        };

        request
            .build()
            .map_err(|e| LeadsError::Spreadsheet(format!("Request failed: {}", e)))
    }

    async fn execute(&self, request: Request) -> Result<Value, LeadsError> {
        let response = self.client.execute(request).await.map_err(|e| {
            log::error!("Google Sheets request failed: {}", e);
            LeadsError::Spreadsheet(format!("Request failed: {}", e))
        })?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if !status.is_success() {
            let message = google_error_message(&body)
                .unwrap_or_else(|| format!("Request failed with status code {}", status.as_u16()));
            log::error!("Google Sheets API error {}: {}", status, message);
            return Err(LeadsError::Spreadsheet(message));
        }

        serde_json::from_str(&body).map_err(|e| {
            log::error!("Failed to parse Google Sheets response: {}", e);
            LeadsError::Spreadsheet(format!("Parse error: {}", e))
        })
    }
}

#[async_trait]
impl SpreadsheetApi for GoogleSheetsClient {
    async fn load_info(&self) -> Result<SpreadsheetInfo, LeadsError> {
        let request = self.load_info_request().await?;
        let body = self.execute(request).await?;
        serde_json::from_value(body)
            .map_err(|e| LeadsError::Spreadsheet(format!("Malformed spreadsheet metadata: {}", e)))
    }

    async fn read_values(&self, range: &str) -> Result<Vec<Vec<Value>>, LeadsError> {
        log::debug!("Reading range {} from {}", range, self.spreadsheet_id);

        let request = self.read_request(range).await?;
        let body = self.execute(request).await?;
        let value_range: ValueRange = serde_json::from_value(body)
            .map_err(|e| LeadsError::Spreadsheet(format!("Malformed value range: {}", e)))?;
        Ok(value_range.values)
    }

    async fn append_values(&self, range: &str, rows: Vec<Vec<Value>>) -> Result<(), LeadsError> {
        let request = self.append_request(range, &rows).await?;
        self.execute(request).await?;
        log::debug!("Appended {} rows to {}", rows.len(), self.spreadsheet_id);
        Ok(())
    }
}

/// Pull `error.message` out of a Google API error body
pub fn google_error_message(body: &str) -> Option<String> {
    let parsed: Value = serde_json::from_str(body).ok()?;
    match parsed.get("error")? {
        Value::Object(error) => error
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string),
        Value::String(message) => Some(message.clone()),
        _ => None,
    }
}

/// A1 reference to a whole sheet, quoting the title
pub fn sheet_range(title: &str, cells: Option<&str>) -> String {
    let quoted = format!("'{}'", title.replace('\'', "''"));
    match cells {
        Some(cells) => format!("{}!{}", quoted, cells),
        None => quoted,
    }
}
