//! The remote side of a sync: anything that can take a full copy of the rows.

use async_trait::async_trait;
use thiserror::Error;

use crate::export::ExportRow;

/// Sign-in failure
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("No access token configured")]
    NoCredentials,
    #[error("Sign-in rejected (HTTP {0})")]
    Rejected(reqwest::StatusCode),
    #[error("Network error during sign-in: {0}")]
    Network(#[from] reqwest::Error),
}

/// Push failure; its message is what the sync status shows
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("Not signed in")]
    NotAuthenticated,
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("HTTP error {status}: {body}")]
    HttpStatus {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("Failed to build workbook: {0}")]
    Workbook(#[from] crate::error::InventoryError),
    #[error("{0}")]
    Remote(String),
}

#[async_trait]
pub trait RemoteMirror: Send + Sync {
    /// Whether a signed-in session exists
    fn is_authenticated(&self) -> bool;

    async fn login(&self) -> Result<(), AuthError>;

    /// Replace the remote data rows with `rows` (full replace, not incremental).
    /// Rows left over from a longer earlier push must not survive.
    async fn push_rows(&self, rows: &[ExportRow]) -> Result<(), SyncError>;
}
