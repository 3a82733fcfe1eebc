//! # Stockbook
//!
//! Inventory and sales ledger for a line of journals. One authoritative
//! catalog per session, every change mirrored to a single key-value slot.
//!
//! ## Core Concepts
//!
//! - **Catalog**: Ordered list of products with unique ids
//! - **Operations**: Pure transitions from one catalog to the next
//! - **Persistence**: The whole catalog as JSON under one storage key
//! - **Subscriptions**: Snapshots pushed to listeners after each change
//! - **View**: Tab, form and table state of the admin panel
//!
//! ## Example
//!
//! ```ignore
//! use stockbook::{DraftInput, FileStorage, ProductId, Store, StoreConfig};
//!
//! let store = Store::open(FileStorage::at("./stockbook")?, StoreConfig::default())?;
//!
//! // Add a journal from form input
//! let product = store.add(
//!     &DraftInput::default()
//!         .name("Field Notes")
//!         .color("Kraft")
//!         .price("7.25")
//!         .stock("30"),
//! )?;
//!
//! // Sell one
//! store.record_sale(&product.id, 1)?;
//!
//! println!("revenue: {}", store.aggregate().revenue_display());
//! ```

pub mod catalog;
pub mod error;
pub mod persistence;
pub mod store;
pub mod subscriptions;
pub mod types;
pub mod view;

// Re-exports
pub use catalog::{
    apply_operation, format_money, seed_catalog, Aggregates, CatalogOperation, Draft, DraftInput,
    OperationKind,
};
pub use error::{Field, Result, StoreError, ValidationError};
pub use persistence::{
    FileStorage, FileStorageConfig, MemoryStorage, Origin, PersistenceBridge, StorageBackend,
    DEFAULT_SLOT_KEY,
};
pub use store::{Store, StoreConfig};
pub use subscriptions::{
    CatalogEvent, DropReason, SubscriptionConfig, SubscriptionFilter, SubscriptionHandle,
    SubscriptionId, SubscriptionManager,
};
pub use types::*;
pub use view::{
    inventory_rows, sales_rows, Dashboard, InventoryRow, SalesRow, StockLevel, Tab, ViewState,
};
