//! Catalog mirror in a single storage slot.

use super::backend::StorageBackend;
use crate::catalog::seed_catalog;
use crate::error::{Result, StoreError};
use crate::types::{Catalog, Product};
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// Slot key the catalog lives under unless configured otherwise.
pub const DEFAULT_SLOT_KEY: &str = "journals";

/// Where the startup catalog came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Origin {
    /// Read back from the slot.
    Restored,
    /// Slot was empty or unreadable; the fallback catalog was written.
    Seeded,
}

/// Serializes catalogs into one named slot of a [`StorageBackend`].
pub struct PersistenceBridge<B> {
    backend: B,
    key: String,
}

impl<B: StorageBackend> PersistenceBridge<B> {
    pub fn new(backend: B) -> Self {
        Self::with_key(backend, DEFAULT_SLOT_KEY)
    }

    pub fn with_key(backend: B, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Read the slot.
    ///
    /// `Ok(None)` when the slot is absent. Content that isn't a JSON array
    /// of products, or that repeats an id, is returned as
    /// [`StoreError::Deserialization`] and left in place.
    pub fn load(&self) -> Result<Option<Catalog>> {
        let Some(raw) = self.backend.get(&self.key)? else {
            return Ok(None);
        };

        let catalog: Catalog = serde_json::from_str(&raw)
            .map_err(|e| StoreError::Deserialization(e.to_string()))?;

        let mut seen = HashSet::with_capacity(catalog.len());
        for product in catalog.iter() {
            if !seen.insert(&product.id) {
                return Err(StoreError::Deserialization(format!(
                    "duplicate product id: {}",
                    product.id
                )));
            }
            check_product(product)?;
        }

        Ok(Some(catalog))
    }

    /// Overwrite the slot with `catalog`.
    pub fn save(&self, catalog: &Catalog) -> Result<()> {
        let encoded = serde_json::to_string(catalog)?;
        self.backend.set(&self.key, &encoded)?;
        debug!(key = %self.key, count = catalog.len(), "catalog saved");
        Ok(())
    }

    /// Load the catalog, falling back to the seed list.
    pub fn load_or_seed(&self) -> Result<(Catalog, Origin)> {
        self.load_or_else(seed_catalog)
    }

    /// Load the catalog, or build one with `fallback` and persist it.
    ///
    /// Unreadable content counts as absent. Storage I/O failures are
    /// still returned.
    pub fn load_or_else(&self, fallback: impl FnOnce() -> Catalog) -> Result<(Catalog, Origin)> {
        match self.load() {
            Ok(Some(catalog)) => {
                info!(key = %self.key, count = catalog.len(), "catalog restored");
                return Ok((catalog, Origin::Restored));
            }
            Ok(None) => {}
            Err(StoreError::Deserialization(reason)) => {
                warn!(key = %self.key, %reason, "persisted catalog unreadable, starting fresh");
            }
            Err(e) => return Err(e),
        }

        let catalog = fallback();
        self.save(&catalog)?;
        info!(key = %self.key, count = catalog.len(), "catalog seeded");
        Ok((catalog, Origin::Seeded))
    }
}

/// Field rules the JSON shape alone doesn't enforce.
fn check_product(product: &Product) -> Result<()> {
    let problem = if product.name.trim().is_empty() {
        "empty name"
    } else if product.color.trim().is_empty() {
        "empty color"
    } else if !product.unit_price.is_finite() || product.unit_price < 0.0 {
        "negative or non-finite price"
    } else {
        return Ok(());
    };

    Err(StoreError::Deserialization(format!("product {}: {}", product.id, problem)))
}
