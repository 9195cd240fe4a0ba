//! Shop Example
//!
//! Prints the shop page and the shopper's cart for a fixture set.
//!
//! Use `-f` to load a fixture set by name
//! Use `--search`, `--category`, `--sort` and `-p` to filter and page the shop
//! Use `--promo` to redeem a promo code against the cart
//! Use `--checkout` to place an order for the cart
//!
//! The cart and order history are kept under the configured storage directory, so they
//! carry over between runs. Set `RUST_LOG` to see the engine's logs.

use std::io;

use anyhow::{Result, bail};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use atelier::{
    cart::{NewLineItem, session::CartSession, snapshot::CartSnapshot},
    catalog::admin::CatalogAdmin,
    config::StorefrontConfig,
    fixtures::Fixture,
    notifications::TracingNotifier,
    orders::{AddressForm, LocalOrderDesk, OrderHistory, PaymentMethod, checkout},
    pricing::money,
    products::CatalogSource,
    receipt::CartReceipt,
    storage::{CART_KEY, CATALOG_KEY, ORDERS_KEY, SnapshotStore, YamlFileStore},
    utils::ShopArgs,
};

/// Shop Example
#[expect(clippy::print_stdout, reason = "Example code")]
pub fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = ShopArgs::parse();

    let config = match &args.config {
        Some(path) => StorefrontConfig::from_path(path)?,
        None => StorefrontConfig::default(),
    };

    let currency = config.currency()?;
    let fixture = Fixture::from_set(&args.fixture)?;

    if fixture.currency()? != currency {
        bail!(
            "fixture set {} is priced in {}, config expects {}",
            args.fixture,
            fixture.currency()?.iso_alpha_code,
            currency.iso_alpha_code
        );
    }

    let catalog_store: YamlFileStore<CatalogAdmin> =
        YamlFileStore::new(&config.storage_dir, CATALOG_KEY);

    let catalog = match catalog_store.load()? {
        Some(catalog) => catalog,
        None => {
            catalog_store.save(fixture.catalog())?;
            fixture.catalog().clone()
        }
    };

    let resolved = catalog.resolve(fixture.products(), &args.filter(), config.page(args.page));

    for section in &resolved {
        println!(
            "\n{} (page {} of {}, {} products)",
            section.section.name,
            section.page.page,
            section.page.total_pages.max(1),
            section.page.total_items
        );

        for product in &section.page.products {
            println!("  {:<24} {}", product.name, money(product.price, currency));
        }
    }

    let cart_store: YamlFileStore<CartSnapshot> =
        YamlFileStore::new(&config.storage_dir, CART_KEY);
    let mut session = CartSession::open(cart_store, TracingNotifier, currency);

    if session.cart().is_empty() {
        for line in fixture.cart()?.items() {
            session.add_item(NewLineItem::from(line.clone()), line.quantity);
        }
    }

    if let Some(code) = args.promo.as_deref() {
        let book = fixture.promo_book()?;
        let verdict = session.redeem_promo_code(&book, code);

        println!("\n{}", verdict.message);
    }

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    CartReceipt::new(session.cart()).write_to(&mut handle)?;

    if args.checkout {
        let orders: YamlFileStore<OrderHistory> =
            YamlFileStore::new(&config.storage_dir, ORDERS_KEY);
        let mut desk = LocalOrderDesk::new(orders, config.estimated_delivery_days);

        let order = checkout(&mut session, &mut desk, sample_address(), PaymentMethod::Upi)?;

        println!(
            "Order {} {} for {}, arriving by {}",
            order.id,
            order.status,
            money(order.total, currency),
            order.estimated_delivery.strftime("%d %b %Y")
        );
    }

    Ok(())
}

fn sample_address() -> AddressForm {
    AddressForm {
        full_name: Some("Asha Menon".to_string()),
        phone: Some("+91 98450 00000".to_string()),
        line1: Some("12 MG Road".to_string()),
        city: Some("Bengaluru".to_string()),
        state: Some("Karnataka".to_string()),
        postal_code: Some("560001".to_string()),
        ..AddressForm::default()
    }
}
