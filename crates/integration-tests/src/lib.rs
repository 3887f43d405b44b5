//! Integration test harness for the MORELUFS shop core.
//!
//! Provides in-process doubles for the shop's three external seams:
//!
//! - [`FakeCommerceApi`] - a scripted commerce backend recording every
//!   request, with per-step failure injection
//! - [`RecordingBridge`] - a host platform bridge capturing alerts and
//!   opened links
//! - the shop's own `MemoryStore` covers the storage seam
//!
//! [`TestShop::new`] wires a shop from these doubles; tests drive the
//! public entry points and assert on the recorded interactions.

#![allow(clippy::unwrap_used)]

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};

use async_trait::async_trait;
use morelufs_core::OrderId;
use morelufs_shop::api::{ApiError, CommerceApi, CreatedPayment, OrderRequest, PaymentRequest};
use morelufs_shop::app::Shop;
use morelufs_shop::bridge::PlatformBridge;
use morelufs_shop::catalog::Catalog;
use morelufs_shop::forms::CheckoutForm;
use morelufs_shop::storage::MemoryStore;

/// Scripted in-process commerce backend.
///
/// Records every request it receives; failures are injected per step
/// via the atomic flags. Order IDs are assigned sequentially starting
/// from `100`.
#[derive(Debug, Default)]
pub struct FakeCommerceApi {
    pub fail_order: AtomicBool,
    pub fail_payment: AtomicBool,
    next_order_id: AtomicI64,
    pub orders: Mutex<Vec<OrderRequest>>,
    pub payments: Mutex<Vec<PaymentRequest>>,
}

impl FakeCommerceApi {
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_order_id: AtomicI64::new(100),
            ..Self::default()
        }
    }

    /// Number of order-creation calls received.
    pub fn order_calls(&self) -> usize {
        self.orders.lock().unwrap().len()
    }

    /// Number of payment-creation calls received.
    pub fn payment_calls(&self) -> usize {
        self.payments.lock().unwrap().len()
    }
}

#[async_trait]
impl CommerceApi for FakeCommerceApi {
    async fn create_order(&self, request: &OrderRequest) -> Result<OrderId, ApiError> {
        self.orders.lock().unwrap().push(request.clone());
        if self.fail_order.load(Ordering::SeqCst) {
            return Err(ApiError::Rejected("Missing required fields".to_owned()));
        }
        Ok(OrderId::new(self.next_order_id.fetch_add(1, Ordering::SeqCst)))
    }

    async fn create_payment(&self, request: &PaymentRequest) -> Result<CreatedPayment, ApiError> {
        self.payments.lock().unwrap().push(request.clone());
        if self.fail_payment.load(Ordering::SeqCst) {
            return Err(ApiError::Rejected("Payment service unavailable".to_owned()));
        }
        Ok(CreatedPayment {
            payment_url: format!("https://pay.example/{}", request.order_id),
            payment_id: Some(format!("test_{}", request.order_id)),
        })
    }
}

/// Host platform bridge capturing every interaction.
#[derive(Debug, Default)]
pub struct RecordingBridge {
    pub ready_calls: AtomicUsize,
    pub alerts: Mutex<Vec<String>>,
    pub opened_links: Mutex<Vec<String>>,
}

impl RecordingBridge {
    /// All alerts shown so far, in order.
    pub fn alerts(&self) -> Vec<String> {
        self.alerts.lock().unwrap().clone()
    }

    /// All links handed to the host so far, in order.
    pub fn opened_links(&self) -> Vec<String> {
        self.opened_links.lock().unwrap().clone()
    }
}

impl PlatformBridge for RecordingBridge {
    fn ready(&self) {
        self.ready_calls.fetch_add(1, Ordering::SeqCst);
    }

    fn open_link(&self, url: &str) {
        self.opened_links.lock().unwrap().push(url.to_owned());
    }

    fn show_alert(&self, message: &str) {
        self.alerts.lock().unwrap().push(message.to_owned());
    }
}

/// A fully wired shop over in-process doubles.
pub type TestShop = Shop<MemoryStore, RecordingBridge, FakeCommerceApi>;

/// Build a started shop with the built-in catalog, an empty in-memory
/// store, a recording bridge and the fake backend.
#[must_use]
pub fn test_shop() -> TestShop {
    test_shop_with_store(MemoryStore::new())
}

/// Build a started shop over a pre-populated store, e.g. to simulate a
/// returning session.
#[must_use]
pub fn test_shop_with_store(store: MemoryStore) -> TestShop {
    let mut shop = Shop::new(
        Catalog::builtin(),
        store,
        RecordingBridge::default(),
        FakeCommerceApi::new(),
    );
    shop.start();
    shop
}

/// A checkout form that passes validation.
#[must_use]
pub fn valid_form() -> CheckoutForm {
    CheckoutForm {
        full_name: "Иван Петров".to_owned(),
        phone: "+7 (912) 345-67-89".to_owned(),
        email: "ivan@example.com".to_owned(),
        city: "Москва".to_owned(),
        postal_code: "101000".to_owned(),
        address: "ул. Тверская, д. 1".to_owned(),
        comments: "позвоните перед доставкой".to_owned(),
        ..CheckoutForm::default()
    }
}
