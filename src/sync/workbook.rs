//! Remote mirror backed by an Excel workbook in the user's cloud drive.
//!
//! Uses the Graph drive and workbook endpoints: the workbook is looked up by
//! name in the drive root, uploaded as a header-only workbook when missing,
//! and on every push the data rows are overwritten and anything below them
//! is cleared.

use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::{Client, Response};
use serde::Deserialize;

use super::mirror::{AuthError, RemoteMirror, SyncError};
use crate::config::MirrorConfig;
use crate::export::{self, ExportRow};

/// Sheet the range endpoints address; the uploaded template uses the same name
pub(crate) const WORKSHEET: &str = "Sheet1";
const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

#[derive(Debug, Deserialize)]
struct DriveItem {
    id: String,
    #[allow(dead_code)]
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DriveItemList {
    value: Vec<DriveItem>,
}

/// Workbook mirror client
pub struct WorkbookMirror {
    pub(crate) client: Client,
    pub(crate) base_url: String,
    pub(crate) access_token: Option<String>,
    pub(crate) workbook_name: String,
}

impl WorkbookMirror {
    pub fn new(config: &MirrorConfig) -> Self {
        info!("Creating workbook mirror for {}", config.workbook_name);
        Self {
            client: Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            access_token: config.access_token.clone(),
            workbook_name: config.workbook_name.clone(),
        }
    }

    fn token(&self) -> Result<&str, SyncError> {
        self.access_token.as_deref().ok_or(SyncError::NotAuthenticated)
    }

    async fn check_status(response: Response) -> Result<Response, SyncError> {
        let status = response.status();
        debug!("Workbook API response status: {status}");
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        warn!("Workbook API request failed: {status} {body}");
        Err(SyncError::HttpStatus { status, body })
    }

    /// Id of the workbook in the drive root, if it exists
    async fn find_workbook(&self, token: &str) -> Result<Option<String>, SyncError> {
        let url = format!("{}/me/drive/root/children", self.base_url);
        debug!("Looking up workbook at: {url}");
        let response = self
            .client
            .get(&url)
            .bearer_auth(token)
            .query(&[("$filter", format!("name eq '{}'", self.workbook_name))])
            .send()
            .await?;
        let list: DriveItemList = Self::check_status(response).await?.json().await?;
        Ok(list.value.into_iter().next().map(|item| item.id))
    }

    /// Upload a new workbook holding only the header row
    async fn create_workbook(&self, token: &str) -> Result<String, SyncError> {
        let url = format!(
            "{}/me/drive/root:/{}:/content",
            self.base_url, self.workbook_name
        );
        info!("Creating workbook {}", self.workbook_name);
        let template = export::header_workbook_bytes(WORKSHEET)?;
        let response = self
            .client
            .put(&url)
            .bearer_auth(token)
            .header(reqwest::header::CONTENT_TYPE, XLSX_CONTENT_TYPE)
            .body(template)
            .send()
            .await?;
        let item: DriveItem = Self::check_status(response).await?.json().await?;
        Ok(item.id)
    }

    fn range_url(&self, workbook_id: &str, address: &str) -> String {
        format!(
            "{}/me/drive/items/{}/workbook/worksheets/{}/range(address='{}')",
            self.base_url, workbook_id, WORKSHEET, address
        )
    }

    /// Clear leftover rows from an earlier, longer push
    async fn clear_below(
        &self,
        token: &str,
        workbook_id: &str,
        row_count: usize,
    ) -> Result<(), SyncError> {
        let url = format!(
            "{}/clear",
            self.range_url(workbook_id, &export::stale_range(row_count))
        );
        debug!("Clearing stale rows at: {url}");
        let response = self
            .client
            .post(&url)
            .bearer_auth(token)
            .json(&serde_json::json!({ "applyTo": "Contents" }))
            .send()
            .await?;
        Self::check_status(response).await?;
        Ok(())
    }

    async fn ensure_workbook(&self, token: &str) -> Result<String, SyncError> {
        match self.find_workbook(token).await? {
            Some(id) => Ok(id),
            None => self.create_workbook(token).await,
        }
    }
}

#[async_trait]
impl RemoteMirror for WorkbookMirror {
    fn is_authenticated(&self) -> bool {
        self.access_token.is_some()
    }

    async fn login(&self) -> Result<(), AuthError> {
        let token = self.access_token.as_deref().ok_or(AuthError::NoCredentials)?;
        let url = format!("{}/me", self.base_url);
        debug!("Validating session at: {url}");
        let response = self.client.get(&url).bearer_auth(token).send().await?;
        if !response.status().is_success() {
            warn!("Sign-in rejected: {}", response.status());
            return Err(AuthError::Rejected(response.status()));
        }
        info!("Signed in to workbook mirror");
        Ok(())
    }

    async fn push_rows(&self, rows: &[ExportRow]) -> Result<(), SyncError> {
        let token = self.token()?;
        if rows.is_empty() {
            debug!("Nothing to push");
            return Ok(());
        }

        let workbook_id = self.ensure_workbook(token).await?;
        let url = self.range_url(&workbook_id, &export::sheet_range(rows.len()));
        debug!("Updating range at: {url}");

        let body = serde_json::json!({ "values": export::sheet_values(rows) });
        let response = self
            .client
            .patch(&url)
            .bearer_auth(token)
            .json(&body)
            .send()
            .await?;
        Self::check_status(response).await?;
        self.clear_below(token, &workbook_id, rows.len()).await?;

        info!("Pushed {} rows to {}", rows.len(), self.workbook_name);
        Ok(())
    }
}

#[cfg(test)]
#[path = "workbook_tests.rs"]
mod tests;
