//! Dashboard totals.

use crate::types::Catalog;
use serde::{Deserialize, Serialize};

/// Summary statistics over a whole catalog.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Aggregates {
    /// Sum of stock on hand.
    pub total_stock: u64,
    /// Sum of units sold.
    pub total_sold: u64,
    /// Sum of `unit_price * units_sold`. Not rounded; see [`format_money`].
    pub total_revenue: f64,
}

impl Aggregates {
    pub fn compute(catalog: &Catalog) -> Self {
        catalog.iter().fold(Aggregates::default(), |acc, product| Aggregates {
            total_stock: acc.total_stock + u64::from(product.stock_quantity),
            total_sold: acc.total_sold + u64::from(product.units_sold),
            total_revenue: acc.total_revenue + product.revenue(),
        })
    }

    /// Revenue rounded for display, e.g. `"$3161.62"`.
    pub fn revenue_display(&self) -> String {
        format_money(self.total_revenue)
    }
}

/// Format an amount with a leading `$` and two decimals.
pub fn format_money(amount: f64) -> String {
    format!("${:.2}", amount)
}
