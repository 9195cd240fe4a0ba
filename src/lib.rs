//! Atelier
//!
//! Atelier is the storefront engine for a direct-to-consumer apparel shop: cart state and
//! promo code redemption, the catalog filter and section resolver behind the shop page, and
//! a local checkout flow.

pub mod cart;
pub mod catalog;
pub mod config;
pub mod fixtures;
pub mod notifications;
pub mod orders;
pub mod prelude;
pub mod pricing;
pub mod products;
pub mod promotions;
pub mod receipt;
pub mod storage;
pub mod utils;
