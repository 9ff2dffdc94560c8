pub mod catalog;
pub mod categories;
pub mod config;
pub mod draft;
pub mod error;
pub mod export;
pub mod ids;
pub mod import;
pub mod inventory;
pub mod item_store;
pub mod listing_codec;
pub mod models;
pub mod persistence;
pub mod sync;

// Re-export commonly used items
pub use catalog::{MarketplacePlatform, MARKETPLACE_PLATFORMS};
pub use categories::{CategoryRegistry, SENTINEL_CATEGORY};
pub use config::MirrorConfig;
pub use draft::ItemDraft;
pub use error::{InventoryError, InventoryResult};
pub use export::{to_rows, ExportRow};
pub use import::{read_rows, read_rows_from, Row, TableFormat};
pub use inventory::Inventory;
pub use item_store::ItemStore;
pub use models::{Amount, InventoryItem, MarketplaceListing};
pub use persistence::{BlobStore, MemoryBlobStore, SqliteBlobStore};
pub use sync::{RemoteMirror, SyncOrchestrator, SyncState, SyncStatus, WorkbookMirror};
