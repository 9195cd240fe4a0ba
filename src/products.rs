//! Products

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::catalog::Category;

/// Product identifier, as issued by the catalog backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Create a product id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Merchandising flags shown on product cards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductFlags {
    /// New arrival
    #[serde(default)]
    pub is_new: bool,

    /// On sale
    #[serde(default)]
    pub is_sale: bool,

    /// Featured on the home page
    #[serde(default)]
    pub featured: bool,
}

/// A catalog product.
///
/// Products are owned by the catalog backend; the cart and section engines only read them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Product id
    pub id: ProductId,

    /// Display name
    pub name: String,

    /// Long description
    #[serde(default)]
    pub description: String,

    /// Current price in minor units
    pub price: i64,

    /// Price before markdown, in minor units
    #[serde(default)]
    pub original_price: Option<i64>,

    /// Product category
    pub category: Category,

    /// Available colours
    #[serde(default)]
    pub colors: Vec<String>,

    /// Available sizes
    #[serde(default)]
    pub sizes: Vec<String>,

    /// Image references
    #[serde(default)]
    pub images: Vec<String>,

    /// Whether the product can be bought right now
    #[serde(default = "in_stock_default")]
    pub in_stock: bool,

    /// Merchandising flags
    #[serde(default)]
    pub flags: ProductFlags,
}

fn in_stock_default() -> bool {
    true
}

impl Product {
    /// Create an in-stock product with no variants or imagery.
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        price: i64,
        category: impl Into<Category>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            price,
            original_price: None,
            category: category.into(),
            colors: Vec::new(),
            sizes: Vec::new(),
            images: Vec::new(),
            in_stock: true,
            flags: ProductFlags::default(),
        }
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the available colours.
    #[must_use]
    pub fn with_colors(mut self, colors: &[&str]) -> Self {
        self.colors = colors.iter().map(ToString::to_string).collect();
        self
    }

    /// Set the available sizes.
    #[must_use]
    pub fn with_sizes(mut self, sizes: &[&str]) -> Self {
        self.sizes = sizes.iter().map(ToString::to_string).collect();
        self
    }

    /// Set the merchandising flags.
    #[must_use]
    pub fn with_flags(mut self, flags: ProductFlags) -> Self {
        self.flags = flags;
        self
    }

    /// The first image reference, if any.
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    /// Whether `needle` (already lower-cased) appears in the name, description, category
    /// or any colour.
    pub fn matches_search(&self, needle: &str) -> bool {
        if needle.is_empty() {
            return true;
        }

        let contains = |haystack: &str| haystack.to_lowercase().contains(needle);

        contains(&self.name)
            || contains(&self.description)
            || contains(self.category.as_str())
            || self.colors.iter().any(|color| contains(color))
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Read access to the live catalog.
pub trait CatalogSource {
    /// Current product list.
    fn products(&self) -> &[Product];

    /// Current category list, not including the `All` sentinel.
    fn categories(&self) -> &[Category];
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kurta() -> Product {
        Product::new("p1", "Silk Kurta", 2_499_00, "Ethnic")
            .with_description("Hand-woven silk with zari border")
            .with_colors(&["Maroon", "Ivory"])
    }

    #[test]
    fn search_matches_name_case_insensitively() {
        assert!(kurta().matches_search("silk"));
    }

    #[test]
    fn search_matches_description_category_and_colours() {
        let product = kurta();

        assert!(product.matches_search("zari"));
        assert!(product.matches_search("ethnic"));
        assert!(product.matches_search("ivory"));
    }

    #[test]
    fn search_ignores_sizes() {
        let product = kurta().with_sizes(&["XXL"]);

        assert!(!product.matches_search("xxl"));
    }

    #[test]
    fn empty_search_matches_everything() {
        assert!(kurta().matches_search(""));
    }

    #[test]
    fn new_products_are_in_stock() {
        let product = kurta();

        assert!(product.in_stock);
        assert_eq!(product.primary_image(), None);
    }
}
