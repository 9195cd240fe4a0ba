//! Fixtures
//!
//! YAML fixture sets for demos and tests. A set called `name` is spread over
//! `products/<name>.yml`, `catalog/<name>.yml`, `promo_codes/<name>.yml` and
//! `cart/<name>.yml` under the fixture base path.

use std::{fs, path::PathBuf};

use rusty_money::iso::Currency;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::{
    cart::{Cart, NewLineItem},
    catalog::{CatalogError, Category, admin::CatalogAdmin},
    fixtures::{
        cart::{CartFixture, CartLineFixture},
        catalog::CatalogFixture,
        products::ProductsFixture,
        promo_codes::PromoCodesFixture,
    },
    pricing::{PriceError, parse_price},
    products::{CatalogSource, Product},
    promotions::{DiscountError, PromoCode, PromoCodeBook, PromoError},
};

pub mod cart;
pub mod catalog;
pub mod products;
pub mod promo_codes;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price or unknown currency
    #[error(transparent)]
    Price(#[from] PriceError),

    /// Catalog admin state the back office would refuse
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Invalid promo code
    #[error(transparent)]
    Promo(#[from] PromoError),

    /// Invalid promo discount
    #[error(transparent)]
    Discount(#[from] DiscountError),

    /// Product not found
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Currency mismatch between products
    #[error("Currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(String, String),

    /// No products loaded yet
    #[error("No products loaded yet; currency unknown")]
    NoCurrency,
}

/// Fixture
#[derive(Debug)]
pub struct Fixture {
    /// Base path for fixture files
    base_path: PathBuf,

    /// Products in catalog order
    products: Vec<Product>,

    /// Categories, sections and assignments
    catalog: CatalogAdmin,

    /// Promo codes
    promo_codes: Vec<PromoCode>,

    /// Cart lines, resolved against the products when the cart is built
    cart_lines: Vec<CartLineFixture>,

    /// Currency for the fixture set
    currency: Option<&'static Currency>,
}

impl Fixture {
    /// Create a new empty fixture with default base path
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a new empty fixture with custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            products: Vec::new(),
            catalog: CatalogAdmin::new(),
            promo_codes: Vec::new(),
            cart_lines: Vec::new(),
            currency: None,
        }
    }

    /// Load a complete fixture set (products, catalog, promo codes and cart with the same
    /// name)
    ///
    /// # Errors
    ///
    /// Returns an error if any of the fixture files cannot be loaded.
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        let mut fixture = Self::new();

        fixture
            .load_products(name)?
            .load_catalog(name)?
            .load_promo_codes(name)?
            .load_cart(name)?;

        Ok(fixture)
    }

    /// Load products from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or if there are currency mismatches.
    pub fn load_products(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let fixture: ProductsFixture = self.read("products", name)?;

        for product_fixture in fixture.products {
            let (_minor_units, currency) = parse_price(&product_fixture.price)?;

            match self.currency {
                Some(existing) if existing != currency => {
                    return Err(FixtureError::CurrencyMismatch(
                        existing.iso_alpha_code.to_string(),
                        currency.iso_alpha_code.to_string(),
                    ));
                }
                Some(_) => {}
                None => self.currency = Some(currency),
            }

            self.products.push(product_fixture.try_into()?);
        }

        Ok(self)
    }

    /// Load categories, sections and assignments from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or describes an invalid catalog.
    pub fn load_catalog(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let fixture: CatalogFixture = self.read("catalog", name)?;

        self.catalog = fixture.try_into()?;

        Ok(self)
    }

    /// Load promo codes from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or holds an invalid code.
    pub fn load_promo_codes(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let fixture: PromoCodesFixture = self.read("promo_codes", name)?;

        for code in fixture.promo_codes {
            self.promo_codes.push(code.try_into()?);
        }

        Ok(self)
    }

    /// Load cart lines from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or refers to unknown products.
    pub fn load_cart(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let fixture: CartFixture = self.read("cart", name)?;

        for line in &fixture.items {
            self.product(&line.product)?;
        }

        self.cart_lines.extend(fixture.items);

        Ok(self)
    }

    /// Get a product by its id
    ///
    /// # Errors
    ///
    /// Returns an error if the product is not found.
    pub fn product(&self, id: &str) -> Result<&Product, FixtureError> {
        self.products
            .iter()
            .find(|product| product.id.as_str() == id)
            .ok_or_else(|| FixtureError::ProductNotFound(id.to_string()))
    }

    /// Catalog admin state
    pub fn catalog(&self) -> &CatalogAdmin {
        &self.catalog
    }

    /// Take the catalog admin state, e.g. to seed a store
    pub fn into_catalog(self) -> CatalogAdmin {
        self.catalog
    }

    /// Get all promo codes
    pub fn promo_codes(&self) -> &[PromoCode] {
        &self.promo_codes
    }

    /// Build a promo code book from the loaded codes
    ///
    /// # Errors
    ///
    /// Returns an error if no products have been loaded yet.
    pub fn promo_book(&self) -> Result<PromoCodeBook, FixtureError> {
        let mut book = PromoCodeBook::new(self.currency()?);

        for code in &self.promo_codes {
            book.insert(code.clone());
        }

        Ok(book)
    }

    /// Build a cart from the loaded cart lines
    ///
    /// # Errors
    ///
    /// Returns an error if no products have been loaded or a line refers to an unknown
    /// product.
    pub fn cart(&self) -> Result<Cart, FixtureError> {
        let mut cart = Cart::new(self.currency()?);

        for line in &self.cart_lines {
            let product = self.product(&line.product)?;
            let item =
                NewLineItem::from_product(product, line.size.as_deref(), line.color.as_deref());

            cart.add_item(item, line.quantity);
        }

        Ok(cart)
    }

    /// Get the currency
    ///
    /// # Errors
    ///
    /// Returns an error if no products have been loaded yet.
    pub fn currency(&self) -> Result<&'static Currency, FixtureError> {
        self.currency.ok_or(FixtureError::NoCurrency)
    }

    fn read<T: DeserializeOwned>(&self, kind: &str, name: &str) -> Result<T, FixtureError> {
        let file_path = self.base_path.join(kind).join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;

        Ok(serde_norway::from_str(&contents)?)
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogSource for Fixture {
    fn products(&self) -> &[Product] {
        &self.products
    }

    fn categories(&self) -> &[Category] {
        self.catalog.categories()
    }
}
