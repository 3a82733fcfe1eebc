//! The catalog model: typed drafts, pure transitions, totals and the seed.

mod aggregate;
mod draft;
mod operations;
mod seed;

pub use aggregate::{format_money, Aggregates};
pub use draft::{Draft, DraftInput};
pub use operations::{
    add, adjust_stock, apply_operation, next_product_id, record_sale, remove, update,
    CatalogOperation, OperationKind,
};
pub use seed::seed_catalog;
