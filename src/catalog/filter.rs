//! Product Filters

use std::{cmp::Ordering, convert::Infallible, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{catalog::Category, products::Product};

/// Shop page sort order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SortKey {
    /// Name, A to Z
    #[default]
    Name,

    /// Cheapest first
    PriceLow,

    /// Most expensive first
    PriceHigh,

    /// New arrivals first
    Popularity,

    /// Catalog order. Unrecognised sort keys end up here.
    Unsorted,
}

impl SortKey {
    /// The query-string form of the key.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::PriceLow => "price-low",
            Self::PriceHigh => "price-high",
            Self::Popularity => "popularity",
            Self::Unsorted => "unsorted",
        }
    }

    /// Compare two products under this key. Equal products keep their catalog order when
    /// used with a stable sort.
    pub fn compare(self, a: &Product, b: &Product) -> Ordering {
        match self {
            Self::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            Self::PriceLow => a.price.cmp(&b.price),
            Self::PriceHigh => b.price.cmp(&a.price),
            Self::Popularity => b.flags.is_new.cmp(&a.flags.is_new),
            Self::Unsorted => Ordering::Equal,
        }
    }
}

impl FromStr for SortKey {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim() {
            "name" => Self::Name,
            "price-low" => Self::PriceLow,
            "price-high" => Self::PriceHigh,
            "popularity" => Self::Popularity,
            _ => Self::Unsorted,
        })
    }
}

impl From<String> for SortKey {
    fn from(s: String) -> Self {
        let Ok(key) = s.parse::<Self>();
        key
    }
}

impl From<SortKey> for String {
    fn from(key: SortKey) -> Self {
        key.as_str().to_string()
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shopper-controlled filters for the shop page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductFilter {
    /// Category filter; `All` means no filter
    #[serde(default)]
    pub category: Category,

    /// Free-text search
    #[serde(default)]
    pub search: String,

    /// Sort order
    #[serde(default)]
    pub sort: SortKey,
}

impl ProductFilter {
    /// Restrict to a category.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<Category>) -> Self {
        self.category = category.into();
        self
    }

    /// Search for `text`.
    #[must_use]
    pub fn with_search(mut self, text: impl Into<String>) -> Self {
        self.search = text.into();
        self
    }

    /// Sort by `sort`.
    #[must_use]
    pub fn with_sort(mut self, sort: SortKey) -> Self {
        self.sort = sort;
        self
    }

    /// Whether a search or a category other than `All` is in effect.
    pub fn is_active(&self) -> bool {
        !self.search.trim().is_empty() || !self.category.is_all()
    }

    /// Whether `product` passes the category and search filters.
    pub fn matches(&self, product: &Product) -> bool {
        let needle = self.search.trim().to_lowercase();

        self.matches_category(product) && product.matches_search(&needle)
    }

    fn matches_category(&self, product: &Product) -> bool {
        self.category.is_all() || self.category == product.category
    }

    /// Stable-sort `products` in place by this filter's sort key.
    pub fn sort(&self, products: &mut [&Product]) {
        if self.sort == SortKey::Unsorted {
            return;
        }

        products.sort_by(|a, b| self.sort.compare(a, b));
    }
}
