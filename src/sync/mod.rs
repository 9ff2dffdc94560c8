//! One-way, best-effort mirroring of the item list to a remote workbook.
//!
//! The orchestrator is a small state machine: `Idle -> Syncing -> Success | Error`,
//! re-entered on the next trigger. Each sync pushes the full current item list.
//! There is no retry; a failed sync stays in `Error` until the next trigger.
//! The local store stays the source of truth whatever the outcome.
//!
//! # Module Structure
//!
//! - [`mirror`] - The [`RemoteMirror`] seam and its error types
//! - [`workbook`] - HTTP client for a cloud-drive Excel workbook

pub mod mirror;
pub mod workbook;

use std::sync::Arc;
use tokio::sync::RwLock;

use crate::export;
use crate::models::InventoryItem;

pub use mirror::{AuthError, RemoteMirror, SyncError};
pub use workbook::WorkbookMirror;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncState {
    #[default]
    Idle,
    Syncing,
    Success,
    Error,
}

impl SyncState {
    pub fn label(&self) -> &'static str {
        match self {
            SyncState::Idle => "idle",
            SyncState::Syncing => "syncing",
            SyncState::Success => "success",
            SyncState::Error => "error",
        }
    }
}

/// Current sync state plus the message of the last failure
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SyncStatus {
    pub state: SyncState,
    pub last_error: Option<String>,
}

/// Drives pushes of the item list to a [`RemoteMirror`].
///
/// At most one push is in flight: a trigger arriving while the state is
/// `Syncing` is ignored, and the next store change after completion re-checks.
pub struct SyncOrchestrator {
    mirror: Arc<dyn RemoteMirror>,
    status: Arc<RwLock<SyncStatus>>,
}

impl SyncOrchestrator {
    pub fn new(mirror: Arc<dyn RemoteMirror>) -> Self {
        Self {
            mirror,
            status: Arc::new(RwLock::new(SyncStatus::default())),
        }
    }

    pub async fn status(&self) -> SyncStatus {
        self.status.read().await.clone()
    }

    pub async fn state(&self) -> SyncState {
        self.status.read().await.state
    }

    /// Automatic trigger, run after every change to the item list.
    ///
    /// An empty list leaves the state untouched. Without a signed-in session
    /// the sync is skipped silently and the state goes back to `Idle`; this is
    /// intentionally permissive, signing in is left to the manual path.
    pub async fn on_items_changed(&self, items: &[InventoryItem]) -> SyncState {
        let current = self.state().await;
        if current == SyncState::Syncing {
            log::debug!("Sync already in progress, ignoring change");
            return current;
        }
        if items.is_empty() {
            log::debug!("No items, nothing to sync");
            return current;
        }
        if !self.mirror.is_authenticated() {
            log::debug!("Not signed in, skipping sync");
            self.status.write().await.state = SyncState::Idle;
            return SyncState::Idle;
        }
        self.run(items).await
    }

    /// Manual "sync now". Signs in first when there is no session; a failed
    /// sign-in ends in `Error` with its message.
    pub async fn sync_now(&self, items: &[InventoryItem]) -> SyncState {
        let current = self.state().await;
        if current == SyncState::Syncing {
            log::debug!("Sync already in progress, ignoring request");
            return current;
        }
        if items.is_empty() {
            log::info!("No items to sync");
            return current;
        }
        if !self.mirror.is_authenticated() {
            log::info!("Not signed in, requesting sign-in before sync");
            if let Err(e) = self.mirror.login().await {
                log::error!("Sign-in failed: {e}");
                return self.finish(Err(e.to_string())).await;
            }
        }
        self.run(items).await
    }

    /// Move to `Syncing` unless a sync is already running
    async fn begin(&self) -> bool {
        let mut status = self.status.write().await;
        if status.state == SyncState::Syncing {
            return false;
        }
        status.state = SyncState::Syncing;
        status.last_error = None;
        true
    }

    async fn finish(&self, outcome: Result<(), String>) -> SyncState {
        let mut status = self.status.write().await;
        match outcome {
            Ok(()) => {
                status.state = SyncState::Success;
                status.last_error = None;
            }
            Err(message) => {
                status.state = SyncState::Error;
                status.last_error = Some(message);
            }
        }
        status.state
    }

    async fn run(&self, items: &[InventoryItem]) -> SyncState {
        if !self.begin().await {
            return SyncState::Syncing;
        }

        let rows = export::to_rows(items);
        log::debug!("Syncing {} items", rows.len());
        let outcome = match self.mirror.push_rows(&rows).await {
            Ok(()) => {
                log::info!("Synced {} items to remote workbook", rows.len());
                Ok(())
            }
            Err(e) => {
                log::error!("Failed to sync with remote workbook: {e}");
                Err(e.to_string())
            }
        };
        self.finish(outcome).await
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
