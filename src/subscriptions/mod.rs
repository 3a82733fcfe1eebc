//! In-process subscriptions to catalog changes.
//!
//! Every committed mutation is broadcast with the catalog snapshot it
//! produced, which is what a view layer re-renders from. Buffers are
//! bounded; a subscriber that falls behind is dropped.
//!
//! # Example
//!
//! ```ignore
//! let handle = store.subscribe(SubscriptionConfig {
//!     filter: SubscriptionFilter::operations(vec![OperationKind::RecordSale]),
//!     ..Default::default()
//! });
//!
//! while let Ok(event) = handle.recv() {
//!     match event {
//!         CatalogEvent::Changed { snapshot, .. } => render(&snapshot),
//!         CatalogEvent::Dropped { .. } => break,
//!         CatalogEvent::Snapshot { .. } => {}
//!     }
//! }
//! ```

mod manager;
mod types;

pub use manager::SubscriptionManager;
pub use types::{
    CatalogEvent, DropReason, SubscriptionConfig, SubscriptionFilter, SubscriptionHandle,
    SubscriptionId,
};
