//! Shipping Addresses

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Country used when the checkout form leaves it blank.
pub const DEFAULT_COUNTRY: &str = "India";

/// Errors validating a shipping address.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AddressError {
    /// A required field is missing or blank.
    #[error("shipping address is missing {0}")]
    MissingField(&'static str),
}

/// The checkout address form as submitted. Any field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressForm {
    /// Recipient name
    pub full_name: Option<String>,

    /// Contact phone number
    pub phone: Option<String>,

    /// First address line
    pub line1: Option<String>,

    /// Second address line
    pub line2: Option<String>,

    /// City
    pub city: Option<String>,

    /// State
    pub state: Option<String>,

    /// Postal code
    pub postal_code: Option<String>,

    /// Country
    pub country: Option<String>,
}

/// A complete shipping address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingAddress {
    full_name: String,
    phone: String,
    line1: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    line2: Option<String>,
    city: String,
    state: String,
    postal_code: String,
    country: String,
}

impl ShippingAddress {
    /// Validate a submitted form. Values are trimmed; the country defaults to
    /// [`DEFAULT_COUNTRY`].
    ///
    /// # Errors
    ///
    /// Returns [`AddressError::MissingField`] naming the first required field that is
    /// missing or blank.
    pub fn new(form: AddressForm) -> Result<Self, AddressError> {
        Ok(Self {
            full_name: required(form.full_name, "full_name")?,
            phone: required(form.phone, "phone")?,
            line1: required(form.line1, "line1")?,
            line2: optional(form.line2),
            city: required(form.city, "city")?,
            state: required(form.state, "state")?,
            postal_code: required(form.postal_code, "postal_code")?,
            country: optional(form.country).unwrap_or_else(|| DEFAULT_COUNTRY.to_string()),
        })
    }

    /// Recipient name.
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// Contact phone number.
    pub fn phone(&self) -> &str {
        &self.phone
    }

    /// City.
    pub fn city(&self) -> &str {
        &self.city
    }

    /// Postal code.
    pub fn postal_code(&self) -> &str {
        &self.postal_code
    }

    /// Country.
    pub fn country(&self) -> &str {
        &self.country
    }

    /// The address as printed on a label, one line per entry.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![self.full_name.clone(), self.line1.clone()];

        lines.extend(self.line2.clone());
        lines.push(format!("{}, {} {}", self.city, self.state, self.postal_code));
        lines.push(self.country.clone());

        lines
    }
}

fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn required(value: Option<String>, field: &'static str) -> Result<String, AddressError> {
    optional(value).ok_or(AddressError::MissingField(field))
}
