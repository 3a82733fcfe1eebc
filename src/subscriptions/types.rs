//! Subscription types for live catalog updates.

use crate::catalog::OperationKind;
use crate::types::{Catalog, ProductId};
use serde::{Deserialize, Serialize};

/// Configuration for a subscription.
#[derive(Clone, Debug)]
pub struct SubscriptionConfig {
    /// Max buffered events before dropping subscriber.
    /// Default: 64
    pub buffer_size: usize,

    /// Send the current catalog as the first event.
    pub include_snapshot: bool,

    /// Filter criteria.
    pub filter: SubscriptionFilter,
}

impl Default for SubscriptionConfig {
    fn default() -> Self {
        Self {
            buffer_size: 64,
            include_snapshot: false,
            filter: SubscriptionFilter::default(),
        }
    }
}

/// Filter criteria for subscriptions. `None` matches everything.
#[derive(Clone, Debug, Default)]
pub struct SubscriptionFilter {
    /// Only changes touching these products.
    pub product_ids: Option<Vec<ProductId>>,

    /// Only these kinds of change.
    pub operations: Option<Vec<OperationKind>>,
}

impl SubscriptionFilter {
    /// Every change.
    pub fn all() -> Self {
        Self::default()
    }

    /// Changes to specific products.
    pub fn products(ids: Vec<ProductId>) -> Self {
        Self {
            product_ids: Some(ids),
            ..Default::default()
        }
    }

    /// Specific kinds of change, e.g. only sales.
    pub fn operations(kinds: Vec<OperationKind>) -> Self {
        Self {
            operations: Some(kinds),
            ..Default::default()
        }
    }

    pub(crate) fn matches(&self, operation: OperationKind, product_id: &ProductId) -> bool {
        if let Some(ref kinds) = self.operations {
            if !kinds.contains(&operation) {
                return false;
            }
        }
        if let Some(ref ids) = self.product_ids {
            if !ids.contains(product_id) {
                return false;
            }
        }
        true
    }
}

/// Events emitted by subscriptions.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CatalogEvent {
    /// Catalog as it stood when the subscription was opened.
    Snapshot { snapshot: Catalog },

    /// A mutation was committed; `snapshot` is the catalog after it.
    Changed {
        operation: OperationKind,
        product_id: ProductId,
        snapshot: Catalog,
    },

    /// Subscription was dropped.
    Dropped { reason: DropReason },
}

/// Why a subscription was dropped.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DropReason {
    /// Send buffer overflowed (slow consumer).
    BufferOverflow,
    /// Explicitly unsubscribed.
    Unsubscribed,
}

/// Unique identifier for a subscription.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);

/// Handle to manage a subscription.
pub struct SubscriptionHandle {
    pub id: SubscriptionId,
    /// Channel to receive events.
    pub receiver: crossbeam_channel::Receiver<CatalogEvent>,
}

impl SubscriptionHandle {
    /// Receive the next event (blocking).
    pub fn recv(&self) -> Result<CatalogEvent, crossbeam_channel::RecvError> {
        self.receiver.recv()
    }

    /// Try to receive an event (non-blocking).
    pub fn try_recv(&self) -> Result<CatalogEvent, crossbeam_channel::TryRecvError> {
        self.receiver.try_recv()
    }

    /// Receive with timeout.
    pub fn recv_timeout(
        &self,
        timeout: std::time::Duration,
    ) -> Result<CatalogEvent, crossbeam_channel::RecvTimeoutError> {
        self.receiver.recv_timeout(timeout)
    }
}
