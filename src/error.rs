//! Error types for the catalog store.

use crate::types::{Product, ProductId};
use std::fmt;
use thiserror::Error;

/// Main error type for store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("Storage is locked by another process")]
    Locked,

    #[error("Storage not initialized: {0}")]
    NotInitialized(String),

    #[error("Invalid storage key: {0:?}")]
    InvalidKey(String),

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// The change was applied in memory but the write behind it failed.
    #[error("Change to {} applied but not persisted: {source}", .product.id)]
    PersistFailed {
        product: Box<Product>,
        source: Box<StoreError>,
    },
}

impl StoreError {
    /// Errors the session recovers from locally: the catalog is left as it
    /// was and nothing is written.
    pub fn is_no_op(&self) -> bool {
        matches!(self, StoreError::Validation(_) | StoreError::ProductNotFound(_))
    }

    /// The product a change produced (or removed) when the change itself
    /// went through and only its write failed.
    pub fn committed_product(&self) -> Option<&Product> {
        match self {
            StoreError::PersistFailed { product, .. } => Some(product),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Serialization(e.to_string())
    }
}

/// Form field names, as shown on the add/edit form.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    Name,
    Category,
    Size,
    Color,
    Price,
    Stock,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Name => "name",
            Field::Category => "category",
            Field::Size => "size",
            Field::Color => "color",
            Field::Price => "price",
            Field::Stock => "stock",
        };
        f.write_str(name)
    }
}

/// Why a draft was rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("missing required field: {0}")]
    MissingField(Field),

    #[error("{field} is not a number: {value:?}")]
    InvalidNumber { field: Field, value: String },

    #[error("{field} must not be negative: {value}")]
    NegativeNumber { field: Field, value: String },

    #[error("unknown category: {0:?}")]
    UnknownCategory(String),

    #[error("unknown size: {0:?}")]
    UnknownSize(String),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
