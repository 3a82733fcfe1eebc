//! First-run catalog contents.

use crate::types::{Catalog, Category, Product, ProductId, Size};

/// The four products a fresh store starts with.
pub fn seed_catalog() -> Catalog {
    let seed = [
        ("1", "Classic Notebook", Category::Classic, Size::Large, "Black", 24.99, 45, 23),
        ("2", "Pocket Journal", Category::Cahier, Size::Pocket, "Red", 12.99, 78, 56),
        ("3", "Art Plus Sketchbook", Category::ArtPlus, Size::A4, "Blue", 34.99, 32, 18),
        ("4", "Professional Planner", Category::Professional, Size::Large, "Green", 29.99, 21, 41),
    ];

    Catalog::from_products(
        seed.into_iter()
            .map(|(id, name, category, size, color, unit_price, stock_quantity, units_sold)| {
                Product {
                    id: ProductId::from(id),
                    name: name.to_string(),
                    category,
                    size,
                    color: color.to_string(),
                    unit_price,
                    stock_quantity,
                    units_sold,
                }
            })
            .collect(),
    )
}
