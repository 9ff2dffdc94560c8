//! Unit tests for the sync state machine.

use super::*;
use crate::export::ExportRow;
use crate::models::{Amount, MarketplaceListing};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use tokio::sync::Notify;

/// In-process mirror that records pushes and fails on request
#[derive(Default)]
struct ScriptedMirror {
    authenticated: AtomicBool,
    login_succeeds: bool,
    fail_with: Mutex<Option<String>>,
    pushes: Mutex<Vec<Vec<ExportRow>>>,
    logins: Mutex<usize>,
    /// When set, a push parks until `release` is notified
    gate: Option<(Arc<Notify>, Arc<Notify>)>,
}

impl ScriptedMirror {
    fn signed_in() -> Self {
        let mirror = Self::default();
        mirror.authenticated.store(true, Ordering::SeqCst);
        mirror
    }

    fn push_count(&self) -> usize {
        self.pushes.lock().unwrap().len()
    }
}

#[async_trait]
impl RemoteMirror for ScriptedMirror {
    fn is_authenticated(&self) -> bool {
        self.authenticated.load(Ordering::SeqCst)
    }

    async fn login(&self) -> Result<(), AuthError> {
        *self.logins.lock().unwrap() += 1;
        if self.login_succeeds {
            self.authenticated.store(true, Ordering::SeqCst);
            Ok(())
        } else {
            Err(AuthError::NoCredentials)
        }
    }

    async fn push_rows(&self, rows: &[ExportRow]) -> Result<(), SyncError> {
        self.pushes.lock().unwrap().push(rows.to_vec());
        if let Some((entered, release)) = &self.gate {
            entered.notify_one();
            release.notified().await;
        }
        match self.fail_with.lock().unwrap().clone() {
            Some(message) => Err(SyncError::Remote(message)),
            None => Ok(()),
        }
    }
}

fn widget() -> InventoryItem {
    InventoryItem {
        id: "1".to_string(),
        name: "Widget".to_string(),
        quantity: Amount::Number(5.0),
        category: "Electronics".to_string(),
        price: Amount::Number(9.99),
        marketplaces: vec![MarketplaceListing::new("Amazon", "12.50", None)],
    }
}

fn orchestrator(mirror: &Arc<ScriptedMirror>) -> SyncOrchestrator {
    SyncOrchestrator::new(mirror.clone())
}

mod automatic_trigger_tests {
    use super::*;

    #[tokio::test]
    async fn empty_store_stays_idle_without_remote_call() {
        let mirror = Arc::new(ScriptedMirror::signed_in());
        let sync = orchestrator(&mirror);

        assert_eq!(sync.on_items_changed(&[]).await, SyncState::Idle);
        assert_eq!(sync.status().await, SyncStatus::default());
        assert_eq!(mirror.push_count(), 0);
    }

    #[tokio::test]
    async fn unauthenticated_skips_silently() {
        let mirror = Arc::new(ScriptedMirror::default());
        let sync = orchestrator(&mirror);

        assert_eq!(sync.on_items_changed(&[widget()]).await, SyncState::Idle);
        assert_eq!(mirror.push_count(), 0);
        assert_eq!(*mirror.logins.lock().unwrap(), 0);
        assert!(sync.status().await.last_error.is_none());
    }

    #[tokio::test]
    async fn successful_push_sends_full_export_rows() {
        let mirror = Arc::new(ScriptedMirror::signed_in());
        let sync = orchestrator(&mirror);

        assert_eq!(sync.on_items_changed(&[widget()]).await, SyncState::Success);
        let pushes = mirror.pushes.lock().unwrap();
        assert_eq!(pushes.len(), 1);
        assert_eq!(pushes[0][0].marketplace_listings, "Amazon: $12.50");
    }

    #[tokio::test]
    async fn failure_records_message_and_next_change_retries() {
        let mirror = Arc::new(ScriptedMirror::signed_in());
        *mirror.fail_with.lock().unwrap() = Some("quota exceeded".to_string());
        let sync = orchestrator(&mirror);

        assert_eq!(sync.on_items_changed(&[widget()]).await, SyncState::Error);
        let status = sync.status().await;
        assert_eq!(status.state, SyncState::Error);
        assert_eq!(status.last_error.as_deref(), Some("quota exceeded"));

        *mirror.fail_with.lock().unwrap() = None;
        assert_eq!(sync.on_items_changed(&[widget()]).await, SyncState::Success);
        assert!(sync.status().await.last_error.is_none());
        assert_eq!(mirror.push_count(), 2);
    }

    #[tokio::test]
    async fn emptied_store_keeps_previous_outcome() {
        let mirror = Arc::new(ScriptedMirror::signed_in());
        let sync = orchestrator(&mirror);
        sync.on_items_changed(&[widget()]).await;

        assert_eq!(sync.on_items_changed(&[]).await, SyncState::Success);
        assert_eq!(mirror.push_count(), 1);
    }

    #[tokio::test]
    async fn trigger_during_sync_is_ignored() {
        let entered = Arc::new(Notify::new());
        let release = Arc::new(Notify::new());
        let mirror = Arc::new(ScriptedMirror {
            gate: Some((entered.clone(), release.clone())),
            ..ScriptedMirror::signed_in()
        });
        let sync = Arc::new(orchestrator(&mirror));

        let first = {
            let sync = sync.clone();
            tokio::spawn(async move { sync.on_items_changed(&[widget()]).await })
        };
        entered.notified().await;

        assert_eq!(sync.state().await, SyncState::Syncing);
        assert_eq!(sync.on_items_changed(&[widget()]).await, SyncState::Syncing);
        assert_eq!(sync.sync_now(&[widget()]).await, SyncState::Syncing);
        assert_eq!(mirror.push_count(), 1);

        release.notify_one();
        assert_eq!(first.await.unwrap(), SyncState::Success);
        assert_eq!(mirror.push_count(), 1);
    }
}

mod manual_trigger_tests {
    use super::*;

    #[tokio::test]
    async fn signs_in_before_pushing() {
        let mirror = Arc::new(ScriptedMirror {
            login_succeeds: true,
            ..ScriptedMirror::default()
        });
        let sync = orchestrator(&mirror);

        assert_eq!(sync.sync_now(&[widget()]).await, SyncState::Success);
        assert_eq!(*mirror.logins.lock().unwrap(), 1);
        assert_eq!(mirror.push_count(), 1);
    }

    #[tokio::test]
    async fn failed_sign_in_ends_in_error() {
        let mirror = Arc::new(ScriptedMirror::default());
        let sync = orchestrator(&mirror);

        assert_eq!(sync.sync_now(&[widget()]).await, SyncState::Error);
        let status = sync.status().await;
        assert_eq!(status.last_error.as_deref(), Some("No access token configured"));
        assert_eq!(mirror.push_count(), 0);
    }

    #[tokio::test]
    async fn signed_in_manual_sync_skips_login() {
        let mirror = Arc::new(ScriptedMirror::signed_in());
        let sync = orchestrator(&mirror);

        assert_eq!(sync.sync_now(&[widget()]).await, SyncState::Success);
        assert_eq!(*mirror.logins.lock().unwrap(), 0);
    }

    #[tokio::test]
    async fn empty_store_makes_no_call() {
        let mirror = Arc::new(ScriptedMirror::signed_in());
        let sync = orchestrator(&mirror);

        assert_eq!(sync.sync_now(&[]).await, SyncState::Idle);
        assert_eq!(mirror.push_count(), 0);
    }
}

#[test]
fn state_labels() {
    assert_eq!(SyncState::Idle.label(), "idle");
    assert_eq!(SyncState::Syncing.label(), "syncing");
    assert_eq!(SyncState::Success.label(), "success");
    assert_eq!(SyncState::Error.label(), "error");
}
