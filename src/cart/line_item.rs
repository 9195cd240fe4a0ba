//! Line Items

use serde::{Deserialize, Serialize};

use crate::products::{Product, ProductId};

/// Identity of a cart line: the same product in a different size or colour is a
/// different line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineItemKey {
    /// Product id
    pub product_id: ProductId,

    /// Selected size
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,

    /// Selected colour
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl LineItemKey {
    /// Key for a product with no size or colour selected.
    pub fn new(product_id: impl Into<ProductId>) -> Self {
        Self {
            product_id: product_id.into(),
            size: None,
            color: None,
        }
    }

    /// Select a size.
    #[must_use]
    pub fn with_size(mut self, size: impl Into<String>) -> Self {
        self.size = Some(size.into());
        self
    }

    /// Select a colour.
    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }
}

/// A line in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Line identity
    #[serde(flatten)]
    pub key: LineItemKey,

    /// Product name at the time it was added
    pub name: String,

    /// Unit price in minor units
    pub unit_price: i64,

    /// Image reference
    #[serde(default)]
    pub image: String,

    /// Quantity, always at least 1 while the line is in a cart
    pub quantity: u32,
}

impl LineItem {
    /// Unit price multiplied by quantity.
    pub fn line_total(&self) -> i64 {
        self.unit_price.saturating_mul(i64::from(self.quantity))
    }
}

/// A product about to be added to the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLineItem {
    /// Line identity
    pub key: LineItemKey,

    /// Product name
    pub name: String,

    /// Unit price in minor units
    pub unit_price: i64,

    /// Image reference
    pub image: String,
}

impl NewLineItem {
    /// A product with no size or colour selected.
    pub fn new(product_id: impl Into<ProductId>, name: impl Into<String>, unit_price: i64) -> Self {
        Self {
            key: LineItemKey::new(product_id),
            name: name.into(),
            unit_price,
            image: String::new(),
        }
    }

    /// The product as shown on its card, with the shopper's size and colour choice.
    pub fn from_product(product: &Product, size: Option<&str>, color: Option<&str>) -> Self {
        Self {
            key: LineItemKey {
                product_id: product.id.clone(),
                size: size.map(ToString::to_string),
                color: color.map(ToString::to_string),
            },
            name: product.name.clone(),
            unit_price: product.price,
            image: product.primary_image().unwrap_or_default().to_string(),
        }
    }

    /// Select a size.
    #[must_use]
    pub fn with_size(mut self, size: impl Into<String>) -> Self {
        self.key.size = Some(size.into());
        self
    }

    /// Select a colour.
    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.key.color = Some(color.into());
        self
    }

    /// Set the image reference.
    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    pub(crate) fn into_line(self, quantity: u32) -> LineItem {
        LineItem {
            key: self.key,
            name: self.name,
            unit_price: self.unit_price,
            image: self.image,
            quantity,
        }
    }
}

impl From<LineItem> for NewLineItem {
    fn from(line: LineItem) -> Self {
        Self {
            key: line.key,
            name: line.name,
            unit_price: line.unit_price,
            image: line.image,
        }
    }
}
