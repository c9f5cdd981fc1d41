// src/services/token_source.rs
// DOCUMENTATION: Credentials for the Google Sheets API
// PURPOSE: Mint OAuth access tokens for a service account, or pass a fixed token through

use crate::config::SheetsAuth;
use crate::errors::LeadsError;
use async_trait::async_trait;
use gcp_auth::{CustomServiceAccount, TokenProvider};
use std::sync::Arc;

/// OAuth scope granting read/write access to spreadsheets
pub const SPREADSHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";

/// Source of bearer tokens for outgoing Sheets requests
#[async_trait]
pub trait TokenSource: Send + Sync {
    async fn access_token(&self) -> Result<String, LeadsError>;
}

/// A token obtained out-of-band, used as is
pub struct StaticToken(pub String);

#[async_trait]
impl TokenSource for StaticToken {
    async fn access_token(&self) -> Result<String, LeadsError> {
        Ok(self.0.clone())
    }
}

/// Tokens minted from a service-account key file
/// DOCUMENTATION: gcp_auth caches the token and refreshes it before expiry,
/// so one instance should live for the whole process
pub struct ServiceAccountTokens {
    account: CustomServiceAccount,
}

impl ServiceAccountTokens {
    pub fn from_file(path: &std::path::Path) -> Result<Self, LeadsError> {
        let account = CustomServiceAccount::from_file(path).map_err(|e| {
            LeadsError::Configuration(format!(
                "Invalid service account key {}: {}",
                path.display(),
                e
            ))
        })?;

        Ok(Self { account })
    }
}

#[async_trait]
impl TokenSource for ServiceAccountTokens {
    async fn access_token(&self) -> Result<String, LeadsError> {
        let token = self.account.token(&[SPREADSHEETS_SCOPE]).await.map_err(|e| {
            log::error!("Failed to mint service account token: {}", e);
            LeadsError::Spreadsheet(format!("Authentication failed: {}", e))
        })?;

        Ok(token.as_str().to_string())
    }
}

/// Credentials attached to every Sheets request
/// DOCUMENTATION: Built once at startup from SheetsAuth and shared via app data
#[derive(Clone)]
pub enum SheetsCredentials {
    /// `Authorization: Bearer` from a token source
    Bearer(Arc<dyn TokenSource>),
    /// `key=` query parameter
    ApiKey(String),
    Anonymous,
}

impl SheetsCredentials {
    pub fn from_auth(auth: &SheetsAuth) -> Result<Self, LeadsError> {
        Ok(match auth {
            SheetsAuth::ServiceAccount(path) => {
                SheetsCredentials::Bearer(Arc::new(ServiceAccountTokens::from_file(path)?))
            }
            SheetsAuth::BearerToken(token) => {
                SheetsCredentials::Bearer(Arc::new(StaticToken(token.clone())))
            }
            SheetsAuth::ApiKey(key) => SheetsCredentials::ApiKey(key.clone()),
            SheetsAuth::Anonymous => SheetsCredentials::Anonymous,
        })
    }
}
