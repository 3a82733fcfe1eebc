//! Headless model of the admin panel: which tab is open, what the form
//! holds, and the rows each table shows.

mod rows;
mod state;

pub use rows::{inventory_rows, sales_rows, Dashboard, InventoryRow, SalesRow, StockLevel};
pub use state::{Tab, ViewState};
