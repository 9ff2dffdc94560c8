//! Inventory Manager - command-line front end
//!
//! Keeps the item list in a local SQLite file and mirrors it to a remote
//! workbook after every change when an access token is configured.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use inventory_manager::config::{MirrorConfig, DEFAULT_MIRROR_BASE_URL, DEFAULT_WORKBOOK_NAME};
use inventory_manager::persistence::default_db_path;
use inventory_manager::{
    catalog, listing_codec, Amount, Inventory, InventoryError, InventoryItem, ItemDraft,
    SqliteBlobStore, SyncOrchestrator, SyncState, WorkbookMirror, MARKETPLACE_PLATFORMS,
};

/// Inventory list with categories, marketplace listings and spreadsheet import/export
#[derive(Parser, Debug)]
#[command(name = "inventory_manager")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the SQLite database file
    #[arg(short, long, env = "INVENTORY_DB")]
    database: Option<PathBuf>,

    /// Base URL of the drive API hosting the mirrored workbook
    #[arg(long, env = "INVENTORY_MIRROR_URL", default_value = DEFAULT_MIRROR_BASE_URL)]
    mirror_url: String,

    /// Access token for the drive API; without it automatic syncs are skipped
    #[arg(long, env = "INVENTORY_MIRROR_TOKEN", hide_env_values = true)]
    mirror_token: Option<String>,

    /// Name of the mirrored workbook
    #[arg(long, default_value = DEFAULT_WORKBOOK_NAME)]
    workbook: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show items, optionally filtered by name or category
    List {
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Add a new item
    Add {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "0")]
        quantity: String,
        #[arg(long, default_value = "")]
        category: String,
        #[arg(long, default_value = "0")]
        price: String,
        /// Listing as "Platform: $price (url)"; repeatable
        #[arg(long = "listing")]
        listings: Vec<String>,
    },
    /// Change fields of an existing item
    Edit {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        quantity: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        price: Option<String>,
        /// Replaces all listings when given; repeatable
        #[arg(long = "listing")]
        listings: Vec<String>,
        /// Remove the listing at this position (0-based)
        #[arg(long)]
        remove_listing: Option<usize>,
        /// Remove all listings
        #[arg(long, conflicts_with = "listings")]
        clear_listings: bool,
    },
    /// Delete an item
    Delete { id: String },
    /// Manage categories
    Categories {
        #[command(subcommand)]
        action: Option<CategoryAction>,
    },
    /// Import items from a .csv, .xlsx or .xls file
    Import { file: PathBuf },
    /// Export items to a .csv or .xlsx file
    Export { file: PathBuf },
    /// Show the known marketplace platforms
    Platforms,
    /// Push the item list to the remote workbook now
    Sync,
}

#[derive(Subcommand, Debug)]
enum CategoryAction {
    List,
    Add { name: String },
    /// Remove a category; its items move to the fallback category
    Remove { name: String },
}

/// Numbers are stored as numbers, anything else as the text given
fn parse_amount(input: &str) -> Amount {
    match input.trim().parse::<f64>() {
        Ok(n) => Amount::Number(n),
        Err(_) => Amount::from(input),
    }
}

fn apply_listings(draft: &mut ItemDraft, listings: &[String]) {
    for listing in listings.iter().flat_map(|text| listing_codec::decode(text)) {
        if let Some(url) = listing.url() {
            let platform = catalog::by_name(&listing.platform);
            if let Some(platform) = platform.filter(|p| !catalog::is_valid_url(p.id, url)) {
                log::warn!("URL {} does not look like a {} listing", url, platform.name);
            }
        }
        if !draft.push_listing(listing) {
            log::warn!("Skipped listing without platform or price");
        }
    }
}

fn print_items<'a>(items: impl Iterator<Item = &'a InventoryItem>) {
    let mut count = 0;
    for item in items {
        count += 1;
        println!(
            "{}  {}  qty {}  [{}]  ${}",
            item.id, item.name, item.quantity, item.category, item.price
        );
        if !item.marketplaces.is_empty() {
            println!("    {}", listing_codec::encode(&item.marketplaces));
        }
    }
    println!("{} item(s)", count);
}

fn export(inventory: &Inventory<SqliteBlobStore>, file: &Path) -> Result<()> {
    let extension = file
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();
    match extension.as_str() {
        "csv" => inventory.export_csv(file)?,
        "xlsx" => inventory.export_xlsx(file)?,
        _ => return Err(InventoryError::UnsupportedFormat(extension).into()),
    }
    println!("Exported {} item(s) to {}", inventory.items().len(), file.display());
    Ok(())
}

/// Run the command; returns true when the item list changed
async fn run_command(
    inventory: &mut Inventory<SqliteBlobStore>,
    sync: &SyncOrchestrator,
    command: Command,
) -> Result<bool> {
    let revision = inventory.revision();
    match command {
        Command::List { search } => {
            print_items(inventory.filtered(search.as_deref().unwrap_or("")));
        }
        Command::Add {
            name,
            quantity,
            category,
            price,
            listings,
        } => {
            if name.trim().is_empty() {
                bail!("Item name must not be empty");
            }
            let mut draft = ItemDraft {
                name,
                quantity: parse_amount(&quantity),
                category,
                price: parse_amount(&price),
                marketplaces: Vec::new(),
            };
            apply_listings(&mut draft, &listings);
            let id = inventory.add_item(draft);
            println!("Added item {}", id);
        }
        Command::Edit {
            id,
            name,
            quantity,
            category,
            price,
            listings,
            remove_listing,
            clear_listings,
        } => {
            let item = inventory
                .get(&id)
                .with_context(|| format!("No item with id {}", id))?;
            let mut draft = ItemDraft::from_item(item);
            if let Some(name) = name {
                draft.name = name;
            }
            if let Some(quantity) = quantity {
                draft.quantity = parse_amount(&quantity);
            }
            if let Some(category) = category {
                draft.category = category;
            }
            if let Some(price) = price {
                draft.price = parse_amount(&price);
            }
            if let Some(index) = remove_listing {
                if draft.remove_listing(index).is_none() {
                    bail!("Item {} has no listing at position {}", id, index);
                }
            }
            if clear_listings || !listings.is_empty() {
                draft.marketplaces.clear();
            }
            apply_listings(&mut draft, &listings);
            inventory.update_item(draft.into_item(id.clone()));
            println!("Updated item {}", id);
        }
        Command::Delete { id } => {
            if !inventory.delete_item(&id) {
                bail!("No item with id {}", id);
            }
            println!("Deleted item {}", id);
        }
        Command::Categories { action } => match action.unwrap_or(CategoryAction::List) {
            CategoryAction::List => {
                for name in inventory.categories().names() {
                    println!("{}", name);
                }
            }
            CategoryAction::Add { name } => {
                if !inventory.add_category(&name) {
                    bail!("Category {:?} is blank or already exists", name);
                }
                println!("Added category {}", name);
            }
            CategoryAction::Remove { name } => {
                if !inventory.remove_category(&name) {
                    bail!("Category {:?} cannot be removed", name);
                }
                println!("Removed category {}", name);
            }
        },
        Command::Import { file } => {
            let count = inventory
                .import_file(&file)
                .with_context(|| format!("Failed to import {}", file.display()))?;
            println!("Imported {} item(s)", count);
        }
        Command::Export { file } => {
            export(inventory, &file)
                .with_context(|| format!("Failed to export {}", file.display()))?;
        }
        Command::Platforms => {
            for platform in MARKETPLACE_PLATFORMS {
                println!(
                    "{:<10} {:<22} {}",
                    platform.id,
                    platform.name,
                    platform.url_pattern.unwrap_or("-")
                );
            }
        }
        Command::Sync => {
            if inventory.items().is_empty() {
                println!("No items to sync");
            } else {
                let state = sync.sync_now(inventory.items()).await;
                report_sync(state, sync.status().await.last_error);
                if state == SyncState::Success {
                    println!("Synced {} item(s)", inventory.items().len());
                }
            }
        }
    }
    Ok(inventory.revision() != revision)
}

fn report_sync(state: SyncState, last_error: Option<String>) {
    match (state, last_error) {
        (SyncState::Error, Some(message)) => eprintln!("Sync failed: {}", message),
        (state, _) => log::info!("Sync state: {}", state.label()),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Set RUST_LOG to control log level, e.g. RUST_LOG=inventory_manager=debug
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let db_path = args.database.unwrap_or_else(default_db_path);
    let store = SqliteBlobStore::open(&db_path)
        .with_context(|| format!("Failed to open database {}", db_path.display()))?;
    let mut inventory = Inventory::open(store);

    let mut config = MirrorConfig {
        base_url: args.mirror_url,
        workbook_name: args.workbook,
        ..MirrorConfig::default()
    };
    if let Some(token) = args.mirror_token {
        config = config.with_token(token);
    }
    let sync = SyncOrchestrator::new(Arc::new(WorkbookMirror::new(&config)));

    if run_command(&mut inventory, &sync, args.command).await? {
        let state = sync.on_items_changed(inventory.items()).await;
        report_sync(state, sync.status().await.last_error);
    }
    Ok(())
}
