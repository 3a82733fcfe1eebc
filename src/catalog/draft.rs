//! Form input and its validated counterpart.

use crate::error::{Field, ValidationError};
use crate::types::{Category, Product, Size};

/// Raw add/edit form fields, exactly as typed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DraftInput {
    pub name: String,
    pub category: String,
    pub size: String,
    pub color: String,
    pub price: String,
    pub stock: String,
}

impl Default for DraftInput {
    fn default() -> Self {
        Self {
            name: String::new(),
            category: Category::default().label().to_string(),
            size: Size::default().label().to_string(),
            color: String::new(),
            price: String::new(),
            stock: String::new(),
        }
    }
}

impl DraftInput {
    /// Fields pre-filled from an existing product, for editing.
    pub fn from_product(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            category: product.category.label().to_string(),
            size: product.size.label().to_string(),
            color: product.color.clone(),
            price: product.unit_price.to_string(),
            stock: product.stock_quantity.to_string(),
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn category(mut self, category: Category) -> Self {
        self.category = category.label().to_string();
        self
    }

    pub fn size(mut self, size: Size) -> Self {
        self.size = size.label().to_string();
        self
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    pub fn price(mut self, price: impl Into<String>) -> Self {
        self.price = price.into();
        self
    }

    pub fn stock(mut self, stock: impl Into<String>) -> Self {
        self.stock = stock.into();
        self
    }

    /// Validate and coerce into a typed draft.
    pub fn parse(&self) -> Result<Draft, ValidationError> {
        Draft::parse(self)
    }
}

/// Validated mutable fields of a product.
#[derive(Clone, Debug, PartialEq)]
pub struct Draft {
    pub name: String,
    pub category: Category,
    pub size: Size,
    pub color: String,
    pub unit_price: f64,
    pub stock_quantity: u32,
}

impl Draft {
    /// Presence checks first (name, color, price, stock), then coercion.
    ///
    /// Only empty input counts as missing: `"0"` is a valid price and a
    /// valid stock level.
    pub fn parse(input: &DraftInput) -> Result<Self, ValidationError> {
        let name = required(&input.name, Field::Name)?;
        let color = required(&input.color, Field::Color)?;
        let price = required(&input.price, Field::Price)?;
        let stock = required(&input.stock, Field::Stock)?;

        let category = input
            .category
            .parse::<Category>()
            .map_err(ValidationError::UnknownCategory)?;
        let size = input
            .size
            .parse::<Size>()
            .map_err(ValidationError::UnknownSize)?;

        Ok(Self {
            name: name.to_string(),
            category,
            size,
            color: color.to_string(),
            unit_price: parse_price(price)?,
            stock_quantity: parse_stock(stock)?,
        })
    }

    /// Overwrite the mutable fields of `product`, leaving id and sales alone.
    pub(crate) fn apply_to(&self, product: &Product) -> Product {
        Product {
            id: product.id.clone(),
            name: self.name.clone(),
            category: self.category,
            size: self.size,
            color: self.color.clone(),
            unit_price: self.unit_price,
            stock_quantity: self.stock_quantity,
            units_sold: product.units_sold,
        }
    }
}

fn required(value: &str, field: Field) -> Result<&str, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(ValidationError::MissingField(field))
    } else {
        Ok(trimmed)
    }
}

fn parse_price(raw: &str) -> Result<f64, ValidationError> {
    let value: f64 = raw.parse().map_err(|_| ValidationError::InvalidNumber {
        field: Field::Price,
        value: raw.to_string(),
    })?;
    if !value.is_finite() {
        return Err(ValidationError::InvalidNumber {
            field: Field::Price,
            value: raw.to_string(),
        });
    }
    if value < 0.0 {
        return Err(ValidationError::NegativeNumber {
            field: Field::Price,
            value: raw.to_string(),
        });
    }
    Ok(value)
}

fn parse_stock(raw: &str) -> Result<u32, ValidationError> {
    match raw.parse::<u32>() {
        Ok(value) => Ok(value),
        Err(_) if raw.parse::<i64>().map_or(false, |v| v < 0) => {
            Err(ValidationError::NegativeNumber {
                field: Field::Stock,
                value: raw.to_string(),
            })
        }
        Err(_) => Err(ValidationError::InvalidNumber {
            field: Field::Stock,
            value: raw.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> DraftInput {
        DraftInput::default()
            .name("Daily Log")
            .color("Teal")
            .price("9.50")
            .stock("12")
    }

    #[test]
    fn test_defaults_match_form() {
        let input = DraftInput::default();
        assert_eq!(input.category, "Classic");
        assert_eq!(input.size, "Large");
        assert!(input.name.is_empty());
    }

    #[test]
    fn test_parse_valid() {
        let draft = filled().category(Category::Volant).size(Size::A5).parse().unwrap();
        assert_eq!(draft.name, "Daily Log");
        assert_eq!(draft.category, Category::Volant);
        assert_eq!(draft.size, Size::A5);
        assert_eq!(draft.unit_price, 9.5);
        assert_eq!(draft.stock_quantity, 12);
    }

    #[test]
    fn test_missing_fields_in_form_order() {
        assert_eq!(
            filled().name("").parse(),
            Err(ValidationError::MissingField(Field::Name))
        );
        assert_eq!(
            filled().color("  ").parse(),
            Err(ValidationError::MissingField(Field::Color))
        );
        assert_eq!(
            filled().price("").parse(),
            Err(ValidationError::MissingField(Field::Price))
        );
        assert_eq!(
            filled().stock("").parse(),
            Err(ValidationError::MissingField(Field::Stock))
        );
    }

    #[test]
    fn test_zero_price_and_stock_accepted() {
        let draft = filled().price("0").stock("0").parse().unwrap();
        assert_eq!(draft.unit_price, 0.0);
        assert_eq!(draft.stock_quantity, 0);
    }

    #[test]
    fn test_non_numeric_rejected() {
        assert!(matches!(
            filled().price("abc").parse(),
            Err(ValidationError::InvalidNumber { field: Field::Price, .. })
        ));
        assert!(matches!(
            filled().price("NaN").parse(),
            Err(ValidationError::InvalidNumber { field: Field::Price, .. })
        ));
        assert!(matches!(
            filled().stock("3.5").parse(),
            Err(ValidationError::InvalidNumber { field: Field::Stock, .. })
        ));
    }

    #[test]
    fn test_negative_rejected() {
        assert!(matches!(
            filled().price("-1").parse(),
            Err(ValidationError::NegativeNumber { field: Field::Price, .. })
        ));
        assert!(matches!(
            filled().stock("-4").parse(),
            Err(ValidationError::NegativeNumber { field: Field::Stock, .. })
        ));
    }

    #[test]
    fn test_unknown_category() {
        let mut input = filled();
        input.category = "Leather".into();
        assert_eq!(
            input.parse(),
            Err(ValidationError::UnknownCategory("Leather".into()))
        );
    }
}
