//! Product Fixtures

use serde::Deserialize;

use crate::{
    catalog::Category,
    fixtures::FixtureError,
    pricing::parse_price,
    products::{Product, ProductFlags, ProductId},
};

/// Wrapper for products in YAML
#[derive(Debug, Deserialize)]
pub struct ProductsFixture {
    /// Products in catalog order
    pub products: Vec<ProductFixture>,
}

/// Product fixture from YAML
#[derive(Debug, Deserialize)]
pub struct ProductFixture {
    /// Product id
    pub id: String,

    /// Product name
    pub name: String,

    /// Product description
    #[serde(default)]
    pub description: String,

    /// Price string (e.g., "2499.00 INR")
    pub price: String,

    /// Price before markdown, same format as `price`
    #[serde(default)]
    pub original_price: Option<String>,

    /// Category name
    pub category: String,

    /// Available colours
    #[serde(default)]
    pub colors: Vec<String>,

    /// Available sizes
    #[serde(default)]
    pub sizes: Vec<String>,

    /// Image references
    #[serde(default)]
    pub images: Vec<String>,

    /// Defaults to in stock
    #[serde(default)]
    pub in_stock: Option<bool>,

    /// Merchandising flags
    #[serde(flatten)]
    pub flags: ProductFlags,
}

impl TryFrom<ProductFixture> for Product {
    type Error = FixtureError;

    fn try_from(fixture: ProductFixture) -> Result<Self, Self::Error> {
        let (price, _currency) = parse_price(&fixture.price)?;

        let original_price = fixture
            .original_price
            .as_deref()
            .map(parse_price)
            .transpose()?
            .map(|(minor, _currency)| minor);

        Ok(Product {
            id: ProductId::new(fixture.id),
            name: fixture.name,
            description: fixture.description,
            price,
            original_price,
            category: Category::new(fixture.category),
            colors: fixture.colors,
            sizes: fixture.sizes,
            images: fixture.images,
            in_stock: fixture.in_stock.unwrap_or(true),
            flags: fixture.flags,
        })
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn product_fixture_converts_prices_to_minor_units() -> TestResult {
        let yaml = r"
id: kurta
name: Silk Kurta
price: 2499.00 INR
original_price: 2999.00 INR
category: Ethnic
is_new: true
";
        let fixture: ProductFixture = serde_norway::from_str(yaml)?;
        let product = Product::try_from(fixture)?;

        assert_eq!(product.price, 249_900);
        assert_eq!(product.original_price, Some(299_900));
        assert!(product.flags.is_new);
        assert!(product.in_stock);

        Ok(())
    }

    #[test]
    fn product_fixture_rejects_bad_prices() -> TestResult {
        let yaml = r"
id: kurta
name: Silk Kurta
price: lots
category: Ethnic
";
        let fixture: ProductFixture = serde_norway::from_str(yaml)?;

        assert!(matches!(
            Product::try_from(fixture),
            Err(FixtureError::Price(_))
        ));

        Ok(())
    }
}
