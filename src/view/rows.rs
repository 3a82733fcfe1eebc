//! Table and dashboard projections of a catalog.

use crate::catalog::{format_money, Aggregates};
use crate::types::{Catalog, Product, ProductId};

/// Stock indicator on the inventory table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StockLevel {
    Low,
    Healthy,
}

impl StockLevel {
    pub fn classify(stock: u32, low_threshold: u32) -> Self {
        if stock < low_threshold {
            StockLevel::Low
        } else {
            StockLevel::Healthy
        }
    }
}

/// The three dashboard cards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dashboard {
    pub total_stock: u64,
    pub total_sold: u64,
    pub revenue: String,
}

impl From<&Aggregates> for Dashboard {
    fn from(totals: &Aggregates) -> Self {
        Self {
            total_stock: totals.total_stock,
            total_sold: totals.total_sold,
            revenue: totals.revenue_display(),
        }
    }
}

/// One line of the inventory table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InventoryRow {
    pub id: ProductId,
    pub name: String,
    pub category: &'static str,
    pub size: &'static str,
    pub color: String,
    pub price: String,
    pub stock: u32,
    pub stock_level: StockLevel,
}

impl InventoryRow {
    pub fn new(product: &Product, low_threshold: u32) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            category: product.category.label(),
            size: product.size.label(),
            color: product.color.clone(),
            price: format_money(product.unit_price),
            stock: product.stock_quantity,
            stock_level: StockLevel::classify(product.stock_quantity, low_threshold),
        }
    }
}

/// One line of the sales table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SalesRow {
    pub id: ProductId,
    pub name: String,
    pub price: String,
    pub sold: u32,
    pub revenue: String,
    pub stock_left: u32,
    /// Quick sale is offered only while something is on hand.
    pub can_sell: bool,
}

impl From<&Product> for SalesRow {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            price: format_money(product.unit_price),
            sold: product.units_sold,
            revenue: format_money(product.revenue()),
            stock_left: product.stock_quantity,
            can_sell: product.in_stock(),
        }
    }
}

pub fn inventory_rows(catalog: &Catalog, low_threshold: u32) -> Vec<InventoryRow> {
    catalog
        .iter()
        .map(|p| InventoryRow::new(p, low_threshold))
        .collect()
}

pub fn sales_rows(catalog: &Catalog) -> Vec<SalesRow> {
    catalog.iter().map(SalesRow::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{adjust_stock, seed_catalog};

    #[test]
    fn test_dashboard_from_seed() {
        let dashboard = Dashboard::from(&Aggregates::compute(&seed_catalog()));
        assert_eq!(dashboard.total_stock, 176);
        assert_eq!(dashboard.total_sold, 138);
        assert_eq!(dashboard.revenue, "$3161.62");
    }

    #[test]
    fn test_inventory_rows() {
        let rows = inventory_rows(&seed_catalog(), 20);
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[2].category, "Art Plus");
        assert_eq!(rows[2].price, "$34.99");
        assert!(rows.iter().all(|r| r.stock_level == StockLevel::Healthy));

        let rows = inventory_rows(&seed_catalog(), 22);
        assert_eq!(rows[3].stock_level, StockLevel::Low);
    }

    #[test]
    fn test_sales_rows_disable_empty_stock() {
        let id = ProductId::from("4");
        let catalog = adjust_stock(&seed_catalog(), &id, -21).unwrap();
        let rows = sales_rows(&catalog);

        let row = rows.iter().find(|r| r.id == id).unwrap();
        assert!(!row.can_sell);
        assert_eq!(row.stock_left, 0);
        assert_eq!(row.revenue, "$1229.59");
        assert!(rows[0].can_sell);
    }
}
