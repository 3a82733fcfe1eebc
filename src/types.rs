//! Core types for the journal catalog.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

/// Unique identifier for a product.
///
/// Opaque string on the wire; freshly created products get the creation time
/// in milliseconds.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub String);

impl ProductId {
    pub fn new(id: impl Into<String>) -> Self {
        ProductId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ProductId({})", self.0)
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(s: &str) -> Self {
        ProductId(s.to_string())
    }
}

/// Milliseconds since Unix epoch.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(pub u64);

impl Timestamp {
    /// Current time. A clock set before the epoch reads as zero.
    pub fn now() -> Self {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        Timestamp(millis)
    }
}

impl fmt::Debug for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Timestamp({})", self.0)
    }
}

/// Product line a journal belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Category {
    #[default]
    Classic,
    Cahier,
    #[serde(rename = "Art Plus")]
    ArtPlus,
    Professional,
    Volant,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Classic,
        Category::Cahier,
        Category::ArtPlus,
        Category::Professional,
        Category::Volant,
    ];

    /// Display label, identical to the persisted string.
    pub fn label(self) -> &'static str {
        match self {
            Category::Classic => "Classic",
            Category::Cahier => "Cahier",
            Category::ArtPlus => "Art Plus",
            Category::Professional => "Professional",
            Category::Volant => "Volant",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Classic" => Ok(Category::Classic),
            "Cahier" => Ok(Category::Cahier),
            "Art Plus" | "ArtPlus" => Ok(Category::ArtPlus),
            "Professional" => Ok(Category::Professional),
            "Volant" => Ok(Category::Volant),
            other => Err(other.to_string()),
        }
    }
}

/// Page format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Size {
    Pocket,
    #[default]
    Large,
    A4,
    A5,
}

impl Size {
    pub const ALL: [Size; 4] = [Size::Pocket, Size::Large, Size::A4, Size::A5];

    pub fn label(self) -> &'static str {
        match self {
            Size::Pocket => "Pocket",
            Size::Large => "Large",
            Size::A4 => "A4",
            Size::A5 => "A5",
        }
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Size {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Pocket" => Ok(Size::Pocket),
            "Large" => Ok(Size::Large),
            "A4" => Ok(Size::A4),
            "A5" => Ok(Size::A5),
            other => Err(other.to_string()),
        }
    }
}

/// A single journal product.
///
/// Field names on the wire follow the persisted slot layout
/// (`type`, `price`, `stock`, `sold`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Assigned at creation, never changed.
    pub id: ProductId,

    pub name: String,

    #[serde(rename = "type")]
    pub category: Category,

    pub size: Size,

    pub color: String,

    /// Price per unit, non-negative.
    #[serde(rename = "price")]
    pub unit_price: f64,

    /// Units on hand. Clamped at zero by every operation.
    #[serde(rename = "stock")]
    pub stock_quantity: u32,

    /// Units sold over the product's lifetime.
    #[serde(rename = "sold")]
    pub units_sold: u32,
}

impl Product {
    /// Revenue attributed to this product, unrounded.
    pub fn revenue(&self) -> f64 {
        self.unit_price * f64::from(self.units_sold)
    }

    pub fn in_stock(&self) -> bool {
        self.stock_quantity > 0
    }
}

/// Ordered collection of products. Insertion order is preserved and ids are
/// unique.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog(Vec<Product>);

impl Catalog {
    pub fn new() -> Self {
        Catalog(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn products(&self) -> &[Product] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Product> {
        self.0.iter()
    }

    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.0.iter().find(|p| &p.id == id)
    }

    pub fn contains(&self, id: &ProductId) -> bool {
        self.get(id).is_some()
    }

    pub(crate) fn position(&self, id: &ProductId) -> Option<usize> {
        self.0.iter().position(|p| &p.id == id)
    }

    pub(crate) fn products_mut(&mut self) -> &mut Vec<Product> {
        &mut self.0
    }

    pub fn into_products(self) -> Vec<Product> {
        self.0
    }

    /// Build a catalog, keeping the first occurrence of any repeated id.
    pub fn from_products(products: Vec<Product>) -> Self {
        let mut catalog = Catalog(Vec::with_capacity(products.len()));
        for product in products {
            if !catalog.contains(&product.id) {
                catalog.0.push(product);
            }
        }
        catalog
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Product;
    type IntoIter = std::slice::Iter<'a, Product>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
