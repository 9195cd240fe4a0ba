//! Promo Code Fixtures

use jiff::Timestamp;
use serde::Deserialize;

use crate::{
    fixtures::FixtureError,
    pricing::parse_price,
    promotions::{PromoCode, PromoDiscount},
};

/// Wrapper for promo codes in YAML
#[derive(Debug, Deserialize)]
pub struct PromoCodesFixture {
    /// Promo codes
    pub promo_codes: Vec<PromoCodeFixture>,
}

/// Discount configuration from YAML fixtures
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PromoDiscountFixtureConfig {
    /// Percentage discount in percent points (e.g., 10 for 10%)
    Percentage {
        /// Percent points, 1 to 100
        value: u32,
    },

    /// Fixed amount off (e.g., "500.00 INR")
    Fixed {
        /// Price string
        value: String,
    },
}

impl TryFrom<PromoDiscountFixtureConfig> for PromoDiscount {
    type Error = FixtureError;

    fn try_from(config: PromoDiscountFixtureConfig) -> Result<Self, Self::Error> {
        match config {
            PromoDiscountFixtureConfig::Percentage { value } => Ok(PromoDiscount::percent(value)?),
            PromoDiscountFixtureConfig::Fixed { value } => {
                let (minor_units, _currency) = parse_price(&value)?;

                Ok(PromoDiscount::fixed(minor_units)?)
            }
        }
    }
}

/// Promo code fixture from YAML
#[derive(Debug, Deserialize)]
pub struct PromoCodeFixture {
    /// The code shoppers type
    pub code: String,

    /// Discount granted
    pub discount: PromoDiscountFixtureConfig,

    /// Minimum order, as a price string
    #[serde(default)]
    pub min_order: Option<String>,

    /// Expiry time (RFC 3339)
    #[serde(default)]
    pub expires_at: Option<Timestamp>,

    /// Defaults to active
    #[serde(default)]
    pub active: Option<bool>,

    /// Redemptions so far
    #[serde(default)]
    pub usage_count: u32,

    /// Redemption limit
    #[serde(default)]
    pub usage_limit: Option<u32>,
}

impl TryFrom<PromoCodeFixture> for PromoCode {
    type Error = FixtureError;

    fn try_from(fixture: PromoCodeFixture) -> Result<Self, Self::Error> {
        let mut code = PromoCode::new(&fixture.code, fixture.discount.try_into()?)?
            .with_active(fixture.active.unwrap_or(true))
            .with_usage_count(fixture.usage_count);

        if let Some(min_order) = fixture.min_order {
            let (minor_units, _currency) = parse_price(&min_order)?;

            code = code.with_min_order_amount(minor_units)?;
        }

        if let Some(expires_at) = fixture.expires_at {
            code = code.with_expiry(expires_at);
        }

        if let Some(limit) = fixture.usage_limit {
            code = code.with_usage_limit(limit);
        }

        Ok(code)
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn promo_code_fixture_reads_every_rule() -> TestResult {
        let yaml = r"
code: save500
discount:
  type: fixed
  value: 500.00 INR
min_order: 2500.00 INR
expires_at: 2030-01-01T00:00:00Z
usage_limit: 10
usage_count: 3
";
        let fixture: PromoCodeFixture = serde_norway::from_str(yaml)?;
        let code = PromoCode::try_from(fixture)?;

        assert_eq!(code.code(), "SAVE500");
        assert_eq!(code.discount(), PromoDiscount::fixed(50_000)?);
        assert_eq!(code.min_order_amount(), Some(250_000));
        assert_eq!(code.expires_at(), Some("2030-01-01T00:00:00Z".parse::<Timestamp>()?));
        assert_eq!(code.usage_limit(), Some(10));
        assert_eq!(code.usage_count(), 3);
        assert!(code.is_active());

        Ok(())
    }

    #[test]
    fn out_of_range_percentages_fail_to_load() -> TestResult {
        let yaml = r"
code: huge
discount:
  type: percentage
  value: 150
";
        let fixture: PromoCodeFixture = serde_norway::from_str(yaml)?;

        assert!(matches!(
            PromoCode::try_from(fixture),
            Err(FixtureError::Discount(_))
        ));

        Ok(())
    }
}
