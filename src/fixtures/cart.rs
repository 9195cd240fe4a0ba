//! Cart Fixtures

use serde::Deserialize;

/// Cart lines from YAML
#[derive(Debug, Deserialize)]
pub struct CartFixture {
    /// Lines, in the order they are added
    pub items: Vec<CartLineFixture>,
}

/// A cart line fixture, referring to a product by id
#[derive(Debug, Deserialize)]
pub struct CartLineFixture {
    /// Product id
    pub product: String,

    /// Selected size
    #[serde(default)]
    pub size: Option<String>,

    /// Selected colour
    #[serde(default)]
    pub color: Option<String>,

    /// Units to add
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}
