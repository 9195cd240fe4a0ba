//! Atelier prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{
        AppliedDiscount, Cart, LineItem, LineItemKey, NewLineItem, session::CartSession,
        snapshot::CartSnapshot,
    },
    catalog::{
        CatalogError, Category, SectionId, ShopSection,
        admin::{CatalogAdmin, NewSection, SectionUpdate},
        assignments::{Assignments, SectionAssignment},
        filter::{ProductFilter, SortKey},
        resolver::{PageRequest, ProductPage, ResolvedSection, resolve_sections},
    },
    config::{ConfigError, StorefrontConfig},
    notifications::{Notification, Notifier, RecordingNotifier, TracingNotifier},
    orders::{
        AddressError, AddressForm, CheckoutError, LocalOrderDesk, Order, OrderError,
        OrderHistory, OrderRequest, OrderStatus, OrderSubmitter, PaymentMethod, ShippingAddress,
        checkout,
    },
    pricing::{PriceError, money},
    products::{CatalogSource, Product, ProductFlags, ProductId},
    promotions::{
        DiscountError, PromoCode, PromoCodeBook, PromoDiscount, PromoError, PromoRejection,
        PromoValidator, PromoVerdict,
    },
    receipt::CartReceipt,
    storage::{MemoryStore, SnapshotStore, StorageError, YamlFileStore},
};
