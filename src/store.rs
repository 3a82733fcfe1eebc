//! Main Store struct tying all components together.

use crate::catalog::{
    apply_operation, next_product_id, Aggregates, CatalogOperation, DraftInput, OperationKind,
};
use crate::error::{Result, StoreError};
use crate::persistence::{Origin, PersistenceBridge, StorageBackend, DEFAULT_SLOT_KEY};
use crate::subscriptions::{
    SubscriptionConfig, SubscriptionFilter, SubscriptionHandle, SubscriptionId,
    SubscriptionManager,
};
use crate::types::{Catalog, Product, ProductId, Timestamp};
use parking_lot::Mutex;
use tracing::{debug, error, info};

/// Store configuration.
#[derive(Clone, Debug)]
pub struct StoreConfig {
    /// Storage slot holding the catalog.
    pub slot_key: String,

    /// Start from the seed products when the slot is empty. When false an
    /// empty catalog is used instead.
    pub seed_if_missing: bool,

    /// Stock below this is flagged as low in inventory rows.
    pub low_stock_threshold: u32,

    /// Buffer size for subscriptions opened with [`Store::subscribe`].
    pub subscription_buffer: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            slot_key: DEFAULT_SLOT_KEY.to_string(),
            seed_if_missing: true,
            low_stock_threshold: 20,
            subscription_buffer: 64,
        }
    }
}

/// Before/after pair of one committed mutation.
struct Transition {
    id: ProductId,
    previous: Catalog,
    next: Catalog,
}

/// The catalog session.
///
/// Holds the one authoritative catalog. Every successful mutation replaces
/// it with a new snapshot, writes that snapshot through the persistence
/// bridge exactly once, and broadcasts it to subscribers. Rejected
/// mutations (validation failures, unknown ids) change nothing and write
/// nothing.
pub struct Store<B: StorageBackend> {
    /// Store configuration.
    config: StoreConfig,

    /// Serialized mirror of the catalog.
    bridge: PersistenceBridge<B>,

    /// Current catalog. Held across apply, save and broadcast so that
    /// writes and events follow commit order.
    catalog: Mutex<Catalog>,

    /// How the startup catalog was obtained.
    origin: Origin,

    /// Change listeners.
    subscriptions: SubscriptionManager,
}

impl<B: StorageBackend> Store<B> {
    /// Open a session over `backend`.
    ///
    /// Reads the slot once. An empty or unreadable slot is replaced with the
    /// starting catalog, which is persisted before this returns.
    pub fn open(backend: B, config: StoreConfig) -> Result<Self> {
        let bridge = PersistenceBridge::with_key(backend, config.slot_key.clone());

        let (catalog, origin) = if config.seed_if_missing {
            bridge.load_or_seed()?
        } else {
            bridge.load_or_else(Catalog::new)?
        };

        info!(
            key = %config.slot_key,
            count = catalog.len(),
            ?origin,
            "store opened"
        );

        Ok(Self {
            config,
            bridge,
            catalog: Mutex::new(catalog),
            origin,
            subscriptions: SubscriptionManager::new(),
        })
    }

    /// Open with the default configuration.
    pub fn with_backend(backend: B) -> Result<Self> {
        Self::open(backend, StoreConfig::default())
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn origin(&self) -> Origin {
        self.origin
    }

    pub fn backend(&self) -> &B {
        self.bridge.backend()
    }

    // --- Reads ---

    /// Snapshot of the current catalog.
    pub fn catalog(&self) -> Catalog {
        self.catalog.lock().clone()
    }

    pub fn get(&self, id: &ProductId) -> Option<Product> {
        self.catalog.lock().get(id).cloned()
    }

    pub fn len(&self) -> usize {
        self.catalog.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.catalog.lock().is_empty()
    }

    /// Dashboard totals over the current catalog.
    pub fn aggregate(&self) -> Aggregates {
        Aggregates::compute(&self.catalog.lock())
    }

    // --- Mutations ---

    /// Create a product from form input. The id comes from the clock.
    pub fn add(&self, input: &DraftInput) -> Result<Product> {
        let draft = input.parse()?;
        let transition = self.commit_with(|catalog| CatalogOperation::Add {
            id: next_product_id(catalog, Timestamp::now()),
            draft,
        })?;
        product_in(&transition.next, &transition.id)
    }

    /// Replace the editable fields of `id` from form input.
    pub fn update(&self, id: &ProductId, input: &DraftInput) -> Result<Product> {
        let draft = input.parse()?;
        let transition = self.commit(CatalogOperation::Update {
            id: id.clone(),
            draft,
        })?;
        product_in(&transition.next, &transition.id)
    }

    /// Delete `id`, returning the removed product.
    pub fn remove(&self, id: &ProductId) -> Result<Product> {
        let transition = self.commit(CatalogOperation::Remove { id: id.clone() })?;
        product_in(&transition.previous, &transition.id)
    }

    /// Move stock by `delta`, clamped at zero.
    pub fn adjust_stock(&self, id: &ProductId, delta: i64) -> Result<Product> {
        let transition = self.commit(CatalogOperation::AdjustStock {
            id: id.clone(),
            delta,
        })?;
        product_in(&transition.next, &transition.id)
    }

    /// Sell `quantity` units of `id`.
    pub fn record_sale(&self, id: &ProductId, quantity: u32) -> Result<Product> {
        let transition = self.commit(CatalogOperation::RecordSale {
            id: id.clone(),
            quantity,
        })?;
        product_in(&transition.next, &transition.id)
    }

    /// Apply a prepared operation, returning the new catalog.
    pub fn apply(&self, operation: CatalogOperation) -> Result<Catalog> {
        self.commit(operation).map(|t| t.next)
    }

    fn commit(&self, operation: CatalogOperation) -> Result<Transition> {
        self.commit_with(move |_| operation)
    }

    /// Apply, persist and broadcast under the catalog lock.
    ///
    /// A failed write leaves the new snapshot in memory and returns
    /// [`StoreError::PersistFailed`] carrying the affected product.
    fn commit_with(&self, build: impl FnOnce(&Catalog) -> CatalogOperation) -> Result<Transition> {
        let mut current = self.catalog.lock();

        let operation = build(&*current);
        let kind = operation.kind();
        let id = operation.product_id().clone();

        let next = match apply_operation(&*current, operation) {
            Ok(next) => next,
            Err(e) => {
                debug!(operation = ?kind, id = %id, error = %e, "operation rejected");
                return Err(e);
            }
        };

        let previous = std::mem::replace(&mut *current, next.clone());
        debug!(operation = ?kind, id = %id, count = next.len(), "catalog updated");

        let saved = self.bridge.save(&next);
        self.subscriptions.broadcast_change(kind, &id, &next);

        if let Err(e) = saved {
            error!(operation = ?kind, id = %id, error = %e, "failed to persist catalog");
            let affected = if kind == OperationKind::Remove {
                &previous
            } else {
                &next
            };
            let product = product_in(affected, &id)?;
            return Err(StoreError::PersistFailed {
                product: Box::new(product),
                source: Box::new(e),
            });
        }

        Ok(Transition { id, previous, next })
    }

    // --- Subscriptions ---

    /// Listen to every change, starting with the current catalog.
    pub fn subscribe(&self) -> SubscriptionHandle {
        self.subscribe_with(SubscriptionConfig {
            buffer_size: self.config.subscription_buffer,
            include_snapshot: true,
            filter: SubscriptionFilter::all(),
        })
    }

    pub fn subscribe_with(&self, config: SubscriptionConfig) -> SubscriptionHandle {
        let current = self.catalog.lock();
        self.subscriptions.subscribe(config, &current)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.subscriptions.unsubscribe(id);
    }

    pub fn subscription_count(&self) -> usize {
        self.subscriptions.subscription_count()
    }
}

fn product_in(catalog: &Catalog, id: &ProductId) -> Result<Product> {
    catalog
        .get(id)
        .cloned()
        .ok_or_else(|| StoreError::ProductNotFound(id.clone()))
}
