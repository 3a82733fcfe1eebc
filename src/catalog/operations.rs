//! Catalog state transitions.
//!
//! Every function here takes a catalog by reference and returns a new one.
//! On error the input catalog is the state of record; nothing is half-applied.

use crate::catalog::draft::Draft;
use crate::error::{Result, StoreError};
use crate::types::{Catalog, Product, ProductId, Timestamp};
use serde::{Deserialize, Serialize};

/// A mutation of the catalog.
#[derive(Clone, Debug, PartialEq)]
pub enum CatalogOperation {
    /// Append a new product with the given id and zero sales.
    Add { id: ProductId, draft: Draft },

    /// Replace the mutable fields of an existing product.
    Update { id: ProductId, draft: Draft },

    /// Drop a product.
    Remove { id: ProductId },

    /// Move stock by a signed amount, clamped at zero.
    AdjustStock { id: ProductId, delta: i64 },

    /// Sell units: stock goes down (clamped), sold goes up.
    RecordSale { id: ProductId, quantity: u32 },
}

/// Discriminant of a [`CatalogOperation`], carried in change events.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    Add,
    Update,
    Remove,
    AdjustStock,
    RecordSale,
}

impl CatalogOperation {
    pub fn kind(&self) -> OperationKind {
        match self {
            CatalogOperation::Add { .. } => OperationKind::Add,
            CatalogOperation::Update { .. } => OperationKind::Update,
            CatalogOperation::Remove { .. } => OperationKind::Remove,
            CatalogOperation::AdjustStock { .. } => OperationKind::AdjustStock,
            CatalogOperation::RecordSale { .. } => OperationKind::RecordSale,
        }
    }

    /// The product this operation targets.
    pub fn product_id(&self) -> &ProductId {
        match self {
            CatalogOperation::Add { id, .. }
            | CatalogOperation::Update { id, .. }
            | CatalogOperation::Remove { id }
            | CatalogOperation::AdjustStock { id, .. }
            | CatalogOperation::RecordSale { id, .. } => id,
        }
    }
}

/// Apply an operation to a catalog.
pub fn apply_operation(catalog: &Catalog, operation: CatalogOperation) -> Result<Catalog> {
    match operation {
        CatalogOperation::Add { id, draft } => add(catalog, id, &draft),
        CatalogOperation::Update { id, draft } => update(catalog, &id, &draft),
        CatalogOperation::Remove { id } => remove(catalog, &id),
        CatalogOperation::AdjustStock { id, delta } => adjust_stock(catalog, &id, delta),
        CatalogOperation::RecordSale { id, quantity } => record_sale(catalog, &id, quantity),
    }
}

/// Append a product built from `draft`.
pub fn add(catalog: &Catalog, id: ProductId, draft: &Draft) -> Result<Catalog> {
    if catalog.contains(&id) {
        return Err(StoreError::InvalidOperation(format!(
            "Product id already in use: {}",
            id
        )));
    }

    let product = Product {
        id,
        name: draft.name.clone(),
        category: draft.category,
        size: draft.size,
        color: draft.color.clone(),
        unit_price: draft.unit_price,
        stock_quantity: draft.stock_quantity,
        units_sold: 0,
    };

    let mut next = catalog.clone();
    next.products_mut().push(product);
    Ok(next)
}

/// Replace name, category, size, color, price and stock of `id`.
pub fn update(catalog: &Catalog, id: &ProductId, draft: &Draft) -> Result<Catalog> {
    replace_with(catalog, id, |product| draft.apply_to(product))
}

/// Remove the product with `id`.
pub fn remove(catalog: &Catalog, id: &ProductId) -> Result<Catalog> {
    let index = catalog
        .position(id)
        .ok_or_else(|| StoreError::ProductNotFound(id.clone()))?;

    let mut next = catalog.clone();
    next.products_mut().remove(index);
    Ok(next)
}

/// `stock = max(0, stock + delta)`.
pub fn adjust_stock(catalog: &Catalog, id: &ProductId, delta: i64) -> Result<Catalog> {
    replace_with(catalog, id, |product| {
        let stock = (i64::from(product.stock_quantity) + delta).clamp(0, i64::from(u32::MAX));
        Product {
            stock_quantity: stock as u32,
            ..product.clone()
        }
    })
}

/// `stock = max(0, stock - quantity)`, `sold = sold + quantity`.
///
/// Selling more than is on hand still counts every unit as sold.
pub fn record_sale(catalog: &Catalog, id: &ProductId, quantity: u32) -> Result<Catalog> {
    replace_with(catalog, id, |product| Product {
        stock_quantity: product.stock_quantity.saturating_sub(quantity),
        units_sold: product.units_sold.saturating_add(quantity),
        ..product.clone()
    })
}

/// Id for a product created at `now`: the millisecond timestamp, bumped
/// past any id already in the catalog.
pub fn next_product_id(catalog: &Catalog, now: Timestamp) -> ProductId {
    let mut candidate = now.0;
    loop {
        let id = ProductId(candidate.to_string());
        if !catalog.contains(&id) {
            return id;
        }
        candidate = candidate.wrapping_add(1);
    }
}

fn replace_with(
    catalog: &Catalog,
    id: &ProductId,
    f: impl FnOnce(&Product) -> Product,
) -> Result<Catalog> {
    let index = catalog
        .position(id)
        .ok_or_else(|| StoreError::ProductNotFound(id.clone()))?;

    let mut next = catalog.clone();
    let products = next.products_mut();
    products[index] = f(&products[index]);
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::draft::DraftInput;
    use crate::catalog::seed::seed_catalog;
    use crate::types::{Category, Size};

    fn draft() -> Draft {
        DraftInput::default()
            .name("Field Notes")
            .category(Category::Volant)
            .size(Size::A5)
            .color("Kraft")
            .price("7.25")
            .stock("30")
            .parse()
            .unwrap()
    }

    #[test]
    fn test_add_appends_with_zero_sales() {
        let seed = seed_catalog();
        let next = add(&seed, ProductId::from("99"), &draft()).unwrap();

        assert_eq!(next.len(), seed.len() + 1);
        let added = next.products().last().unwrap();
        assert_eq!(added.id, ProductId::from("99"));
        assert_eq!(added.units_sold, 0);
        assert_eq!(added.stock_quantity, 30);
        assert_eq!(seed.len(), 4);
    }

    #[test]
    fn test_add_rejects_taken_id() {
        let seed = seed_catalog();
        let result = add(&seed, ProductId::from("1"), &draft());
        assert!(matches!(result, Err(StoreError::InvalidOperation(_))));
    }

    #[test]
    fn test_update_keeps_id_and_sales() {
        let seed = seed_catalog();
        let original = seed.get(&ProductId::from("2")).unwrap().clone();
        let input = DraftInput::from_product(&original).stock("10");
        let next = update(&seed, &original.id, &input.parse().unwrap()).unwrap();

        let updated = next.get(&original.id).unwrap();
        assert_eq!(updated.stock_quantity, 10);
        assert_eq!(updated.units_sold, 56);
        assert_eq!(updated.name, "Pocket Journal");
        assert_eq!(updated.unit_price, 12.99);
        assert_eq!(next.position(&original.id), Some(1));
    }

    #[test]
    fn test_update_unknown_id() {
        let seed = seed_catalog();
        let result = update(&seed, &ProductId::from("nope"), &draft());
        assert!(matches!(result, Err(StoreError::ProductNotFound(_))));
    }

    #[test]
    fn test_remove_preserves_order() {
        let seed = seed_catalog();
        let next = remove(&seed, &ProductId::from("2")).unwrap();
        let ids: Vec<&str> = next.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3", "4"]);
    }

    #[test]
    fn test_adjust_stock_clamps_at_zero() {
        let seed = seed_catalog();
        let id = ProductId::from("4");
        let next = adjust_stock(&seed, &id, -100).unwrap();
        assert_eq!(next.get(&id).unwrap().stock_quantity, 0);

        let next = adjust_stock(&next, &id, 1).unwrap();
        assert_eq!(next.get(&id).unwrap().stock_quantity, 1);
    }

    #[test]
    fn test_adjust_stock_saturates_high() {
        let seed = seed_catalog();
        let id = ProductId::from("1");
        let next = adjust_stock(&seed, &id, i64::MAX).unwrap();
        assert_eq!(next.get(&id).unwrap().stock_quantity, u32::MAX);
    }

    #[test]
    fn test_record_sale() {
        let seed = seed_catalog();
        let id = ProductId::from("1");
        let next = record_sale(&seed, &id, 1).unwrap();
        let product = next.get(&id).unwrap();
        assert_eq!(product.stock_quantity, 44);
        assert_eq!(product.units_sold, 24);
    }

    #[test]
    fn test_record_sale_beyond_stock() {
        let seed = seed_catalog();
        let id = ProductId::from("4");
        let next = record_sale(&seed, &id, 25).unwrap();
        let product = next.get(&id).unwrap();
        assert_eq!(product.stock_quantity, 0);
        assert_eq!(product.units_sold, 66);
    }

    #[test]
    fn test_apply_operation_dispatch() {
        let seed = seed_catalog();
        let op = CatalogOperation::RecordSale {
            id: ProductId::from("3"),
            quantity: 2,
        };
        assert_eq!(op.kind(), OperationKind::RecordSale);
        assert_eq!(op.product_id(), &ProductId::from("3"));

        let next = apply_operation(&seed, op).unwrap();
        assert_eq!(next.get(&ProductId::from("3")).unwrap().units_sold, 20);
    }

    #[test]
    fn test_next_product_id_skips_taken() {
        let seed = seed_catalog();
        assert_eq!(next_product_id(&seed, Timestamp(7)), ProductId::from("7"));
        assert_eq!(next_product_id(&seed, Timestamp(3)), ProductId::from("5"));
    }
}
