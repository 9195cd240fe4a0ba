//! Integration tests for the cart engine driven through a [`CartSession`].
//!
//! The `apparel` fixture cart holds:
//!
//! - Silk Kurta (M, Maroon) x1 at ₹2,499.00
//! - Oxford Shirt (L, White) x2 at ₹1,799.00
//! - Silk Tie (Navy) x1 at ₹999.00
//!
//! for a subtotal of ₹7,096.00 (709600 minor units).

use rusty_money::iso::INR;
use testresult::TestResult;

use atelier::{
    cart::{Cart, LineItemKey, NewLineItem, session::CartSession, snapshot::CartSnapshot},
    fixtures::Fixture,
    notifications::{Notification, RecordingNotifier},
    pricing::money,
    storage::{MemoryStore, SnapshotStore},
};

type Session = CartSession<MemoryStore<CartSnapshot>, RecordingNotifier>;

fn seeded_session(fixture: &Fixture) -> TestResult<(Session, MemoryStore<CartSnapshot>)> {
    let store: MemoryStore<CartSnapshot> = MemoryStore::new();
    store.save(&CartSnapshot::from(&fixture.cart()?))?;

    let session = CartSession::open(store.clone(), RecordingNotifier::new(), INR);

    Ok((session, store))
}

fn kurta() -> LineItemKey {
    LineItemKey::new("silk-kurta")
        .with_size("M")
        .with_color("Maroon")
}

fn oxford() -> LineItemKey {
    LineItemKey::new("oxford-shirt")
        .with_size("L")
        .with_color("White")
}

#[test]
fn stale_discount_survives_item_removal() {
    let mut cart = Cart::new(INR);

    cart.add_item(NewLineItem::new("p1", "Linen Shirt", 1000), 2);
    cart.add_item(NewLineItem::new("p2", "Cotton Tee", 500), 1);

    assert_eq!(cart.subtotal(), 2500);

    cart.apply_discount(500, Some("SAVE500".to_string()));

    assert_eq!(cart.final_total(), 2000);

    cart.remove_item(&LineItemKey::new("p1"));

    assert_eq!(cart.subtotal(), 500);
    assert_eq!(cart.discount().amount(), 500);
    assert_eq!(cart.final_total(), 0);
}

#[test]
fn fixture_cart_is_restored_on_open() -> TestResult {
    let fixture = Fixture::from_set("apparel")?;
    let (session, _store) = seeded_session(&fixture)?;

    assert_eq!(session.cart().len(), 3);
    assert_eq!(session.cart().item_count(), 4);
    assert_eq!(session.cart().subtotal(), 709_600);
    assert_eq!(session.cart().final_total(), 709_600);

    Ok(())
}

#[test]
fn adding_the_same_variant_merges_and_persists() -> TestResult {
    let fixture = Fixture::from_set("apparel")?;
    let (mut session, store) = seeded_session(&fixture)?;

    let product = fixture.product("oxford-shirt")?;
    let merged = session.add_item(NewLineItem::from_product(product, Some("L"), Some("White")), 1);

    assert_eq!(merged, 3);
    assert_eq!(session.cart().len(), 3);

    let saved = store.load()?.map(Cart::try_from).transpose()?;

    assert_eq!(saved.as_ref(), Some(session.cart()));

    let other_size = NewLineItem::from_product(product, Some("M"), Some("White"));
    session.add_item(other_size, 1);

    assert_eq!(session.cart().len(), 4);
    assert_eq!(
        session.notifier().last(),
        Some(Notification::ItemAdded {
            name: "Oxford Shirt".to_string(),
            quantity: 1,
        })
    );

    Ok(())
}

#[test]
fn zero_or_negative_quantity_evicts_the_line() -> TestResult {
    let fixture = Fixture::from_set("apparel")?;
    let (mut session, _store) = seeded_session(&fixture)?;

    assert!(session.update_quantity(&oxford(), 5));
    assert_eq!(session.cart().get_item(&oxford()).map(|l| l.quantity), Some(5));

    assert!(session.update_quantity(&oxford(), -1));
    assert!(session.cart().get_item(&oxford()).is_none());

    assert!(session.update_quantity(&kurta(), 0));
    assert_eq!(session.cart().len(), 1);
    assert_eq!(session.cart().subtotal(), 99_900);

    assert!(!session.update_quantity(&kurta(), 2));

    Ok(())
}

#[test]
fn removal_is_idempotent() -> TestResult {
    let fixture = Fixture::from_set("apparel")?;
    let (mut session, _store) = seeded_session(&fixture)?;

    assert!(session.remove_item(&kurta()).is_some());

    let after_first = session.cart().clone();
    let notifications = session.notifier().received().len();

    assert!(session.remove_item(&kurta()).is_none());
    assert_eq!(session.cart(), &after_first);
    assert_eq!(session.notifier().received().len(), notifications);

    Ok(())
}

#[test]
fn promo_codes_from_the_fixture_book() -> TestResult {
    let fixture = Fixture::from_set("apparel")?;
    let book = fixture.promo_book()?;
    let (mut session, _store) = seeded_session(&fixture)?;

    let verdict = session.redeem_promo_code(&book, "welcome10");

    assert!(verdict.valid);
    assert_eq!(verdict.discount_amount, 70_960);
    assert_eq!(session.cart().discount().promo_code(), Some("WELCOME10"));
    assert_eq!(session.cart().final_total(), 709_600 - 70_960);

    let verdict = session.redeem_promo_code(&book, "SAVE500");

    assert!(verdict.valid);
    assert_eq!(
        verdict.message,
        format!("Promo code applied! You saved {}", money(50_000, INR))
    );
    assert_eq!(session.cart().discount().amount(), 50_000);
    assert_eq!(session.cart().final_total(), 659_600);

    for (code, message) in [
        ("FESTIVE20", "This promo code has expired"),
        ("FIRST50", "This promo code has reached its usage limit"),
        ("RETIRED", "This promo code is no longer active"),
        ("NOPE", "Invalid promo code"),
    ] {
        let verdict = session.redeem_promo_code(&book, code);

        assert!(!verdict.valid, "{code} should be refused");
        assert_eq!(verdict.message, message);
        assert_eq!(session.cart().discount().promo_code(), Some("SAVE500"));
    }

    Ok(())
}

#[test]
fn minimum_order_is_enforced_and_revalidation_drops_stale_codes() -> TestResult {
    let fixture = Fixture::from_set("apparel")?;
    let book = fixture.promo_book()?;
    let (mut session, _store) = seeded_session(&fixture)?;

    assert!(session.redeem_promo_code(&book, "SAVE500").valid);

    session.remove_item(&kurta());
    session.remove_item(&oxford());

    assert_eq!(session.cart().subtotal(), 99_900);
    assert_eq!(session.cart().discount().amount(), 50_000);
    assert_eq!(session.cart().final_total(), 49_900);

    let verdict = session.revalidate_discount(&book);

    assert_eq!(
        verdict.map(|v| v.message),
        Some(format!("Minimum order amount is {}", money(250_000, INR)))
    );
    assert!(!session.cart().discount().is_applied());
    assert_eq!(session.cart().final_total(), 99_900);

    Ok(())
}

#[test]
fn clear_empties_the_cart_and_its_discount() -> TestResult {
    let fixture = Fixture::from_set("apparel")?;
    let book = fixture.promo_book()?;
    let (mut session, store) = seeded_session(&fixture)?;

    session.redeem_promo_code(&book, "WELCOME10");
    session.clear();

    assert!(session.cart().is_empty());
    assert_eq!(session.cart().final_total(), 0);
    assert!(!session.cart().discount().is_applied());
    assert_eq!(session.notifier().last(), Some(Notification::CartCleared));

    let reopened = CartSession::open(store, RecordingNotifier::new(), INR);

    assert!(reopened.cart().is_empty());

    Ok(())
}
