//! Utils

use std::path::PathBuf;

use clap::Parser;

use crate::catalog::{
    Category,
    filter::{ProductFilter, SortKey},
};

/// Arguments for the shop demo
#[derive(Debug, Parser)]
pub struct ShopArgs {
    /// Fixture set to load the catalog, promo codes and starter cart from
    #[clap(short, long, default_value = "apparel")]
    pub fixture: String,

    /// Storefront config file
    #[clap(short, long)]
    pub config: Option<PathBuf>,

    /// Search text matched against product names and descriptions
    #[clap(short, long)]
    pub search: Option<String>,

    /// Category to show, `All` for everything
    #[clap(long, default_value = "All")]
    pub category: String,

    /// Sort order: name, price-low, price-high or popularity
    #[clap(long, default_value = "name")]
    pub sort: SortKey,

    /// Page of each section to show
    #[clap(short, long, default_value_t = 1)]
    pub page: usize,

    /// Promo code to redeem against the cart
    #[clap(long)]
    pub promo: Option<String>,

    /// Place an order for the cart with a sample address
    #[clap(long)]
    pub checkout: bool,
}

impl ShopArgs {
    /// The shopper filter described by the arguments.
    pub fn filter(&self) -> ProductFilter {
        let filter = ProductFilter::default()
            .with_category(Category::new(self.category.as_str()))
            .with_sort(self.sort);

        match &self.search {
            Some(text) => filter.with_search(text.as_str()),
            None => filter,
        }
    }
}
