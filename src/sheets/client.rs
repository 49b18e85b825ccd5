use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Serialize;

use crate::error::{AppError, Result};

use super::{ServiceAccountAuth, SheetWriter};

const SHEETS_API_BASE: &str = "https://sheets.googleapis.com";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ValueRange<'a> {
    range: &'a str,
    major_dimension: &'static str,
    values: &'a [Vec<String>],
}

/// Google Sheets v4 values API.
#[derive(Clone)]
pub struct SheetsClient {
    client: Client,
    auth: Arc<ServiceAccountAuth>,
    api_base: String,
}

impl SheetsClient {
    pub fn new(client: Client, auth: Arc<ServiceAccountAuth>) -> Self {
        Self {
            client,
            auth,
            api_base: SHEETS_API_BASE.to_string(),
        }
    }

    /// Point the client at a different API host.
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    async fn check(response: reqwest::Response, action: &str) -> Result<()> {
        if response.status().is_success() {
            return Ok(());
        }
        let status = response.status();
        let error_text = response.text().await.unwrap_or_default();
        Err(AppError::Sheets(format!("{} failed ({}): {}", action, status, error_text)))
    }
}

/// `{base}/v4/spreadsheets/{id}/values/{range}{suffix}` with each segment
/// percent-encoded.
pub fn values_url(api_base: &str, spreadsheet_id: &str, range: &str, suffix: &str) -> Result<Url> {
    let mut url = Url::parse(api_base)
        .map_err(|e| AppError::Internal(format!("Invalid Sheets API base: {}", e)))?;
    let last = format!("{}{}", range, suffix);
    url.path_segments_mut()
        .map_err(|_| AppError::Internal("Sheets API base cannot be a base URL".into()))?
        .pop_if_empty()
        .extend(["v4", "spreadsheets", spreadsheet_id, "values", last.as_str()]);
    Ok(url)
}

#[async_trait]
impl SheetWriter for SheetsClient {
    async fn update_values(
        &self,
        spreadsheet_id: &str,
        range: &str,
        values: &[Vec<String>],
    ) -> Result<()> {
        let url = values_url(&self.api_base, spreadsheet_id, range, "")?;
        let token = self.auth.access_token().await?;

        let response = self
            .client
            .put(url)
            .bearer_auth(token)
            .query(&[("valueInputOption", "USER_ENTERED")])
            .json(&ValueRange {
                range,
                major_dimension: "ROWS",
                values,
            })
            .send()
            .await
            .map_err(|e| AppError::Sheets(format!("values update request failed: {}", e)))?;

        Self::check(response, "values update").await
    }

    async fn clear_values(&self, spreadsheet_id: &str, range: &str) -> Result<()> {
        let url = values_url(&self.api_base, spreadsheet_id, range, ":clear")?;
        let token = self.auth.access_token().await?;

        let response = self
            .client
            .post(url)
            .bearer_auth(token)
            .json(&serde_json::json!({}))
            .send()
            .await
            .map_err(|e| AppError::Sheets(format!("values clear request failed: {}", e)))?;

        Self::check(response, "values clear").await
    }
}
