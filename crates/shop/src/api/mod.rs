//! Remote commerce API: the two-step order/payment protocol.
//!
//! # Architecture
//!
//! - Wire payloads mirror the backend contract exactly (`order_id`,
//!   `payment_url`, `postalCode` inside the address object)
//! - [`CommerceApi`] is the seam the submission pipeline depends on;
//!   the production [`HttpCommerceApi`] speaks JSON over HTTP, tests
//!   swap in a scripted fake
//! - The payment-creation call is never issued before order creation
//!   resolves successfully; the two are strictly sequential
//!
//! # Example
//!
//! ```rust,ignore
//! use morelufs_shop::api::{CommerceApi, HttpCommerceApi};
//!
//! let api = HttpCommerceApi::new(&config)?;
//! let order_id = api.create_order(&order).await?;
//! let payment = api.create_payment(&payment_request).await?;
//! ```

mod http;

pub use http::HttpCommerceApi;

use async_trait::async_trait;
use morelufs_core::{CartItemId, OrderId, Price, ProductId, Size};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cart::CartItem;
use crate::checkout::{CheckoutSummary, DeliveryMethod, PaymentMethod};
use crate::forms::CustomerDetails;

/// Errors that can occur when talking to the commerce backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP transport failed (connection, timeout, TLS).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success HTTP status.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// The backend answered `success: false`.
    #[error("request rejected: {0}")]
    Rejected(String),

    /// A success response was missing a required field.
    #[error("malformed response: missing {0}")]
    MissingField(&'static str),

    /// An endpoint URL could not be formed from the base URL.
    #[error("invalid endpoint URL: {0}")]
    Url(#[from] url::ParseError),
}

/// One order line on the wire. Field names match the cart snapshot the
/// backend expects: `product` carries the product ID.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    pub id: CartItemId,
    pub product: ProductId,
    pub title: String,
    pub price: Price,
    pub size: Size,
    pub quantity: u32,
}

impl From<&CartItem> for OrderLine {
    fn from(item: &CartItem) -> Self {
        Self {
            id: item.id,
            product: item.product_id.clone(),
            title: item.title.clone(),
            price: item.unit_price,
            size: item.size,
            quantity: item.quantity,
        }
    }
}

/// Structured address payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddressPayload {
    pub country: String,
    pub city: String,
    #[serde(rename = "postalCode")]
    pub postal_code: String,
    pub address: String,
}

/// Customer block of the order payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerPayload {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: AddressPayload,
}

/// Delivery block of the order payload: the chosen method plus its fee
/// echoed for the operator's summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryPayload {
    pub method: DeliveryMethod,
    pub price: Price,
}

/// Order-creation request: the full cart snapshot plus customer,
/// delivery and payment selections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRequest {
    pub items: Vec<OrderLine>,
    pub customer: CustomerPayload,
    pub delivery: DeliveryPayload,
    pub payment_method: PaymentMethod,
    pub discount: Price,
    pub comments: String,
    pub total: Price,
}

impl OrderRequest {
    /// Assemble the request from the cart snapshot, the validated
    /// customer record and the computed breakdown.
    #[must_use]
    pub fn assemble(
        items: &[CartItem],
        details: &CustomerDetails,
        delivery: DeliveryMethod,
        payment: PaymentMethod,
        summary: &CheckoutSummary,
    ) -> Self {
        Self {
            items: items.iter().map(OrderLine::from).collect(),
            customer: CustomerPayload {
                name: details.name.clone(),
                phone: details.phone.as_str().to_owned(),
                email: details.email.as_str().to_owned(),
                address: AddressPayload {
                    country: details.address.country.clone(),
                    city: details.address.city.clone(),
                    postal_code: details.address.postal_code.clone(),
                    address: details.address.street.clone(),
                },
            },
            delivery: DeliveryPayload {
                method: delivery,
                price: summary.delivery_fee,
            },
            payment_method: payment,
            discount: summary.discount,
            comments: details.comments.clone(),
            total: summary.total,
        }
    }
}

/// Order-creation response body.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderResponse {
    pub success: bool,
    #[serde(default)]
    pub order_id: Option<OrderId>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Payment-creation request. `amount` must equal the checkout
/// calculator's total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRequest {
    pub order_id: OrderId,
    pub amount: Price,
    pub payment_method: PaymentMethod,
    /// Human-readable description shown on the payment page.
    pub description: String,
}

/// Payment-creation response body.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentResponse {
    pub success: bool,
    #[serde(default)]
    pub payment_url: Option<String>,
    #[serde(default)]
    pub payment_id: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// A successfully created payment resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedPayment {
    /// Where the user completes payment.
    pub payment_url: String,
    /// Backend payment identifier, when provided.
    pub payment_id: Option<String>,
}

/// The commerce backend seam used by the submission pipeline.
#[async_trait]
pub trait CommerceApi {
    /// Create an order from the cart snapshot; returns the
    /// server-assigned order ID.
    async fn create_order(&self, request: &OrderRequest) -> Result<OrderId, ApiError>;

    /// Create a payment resource for an existing order.
    async fn create_payment(&self, request: &PaymentRequest) -> Result<CreatedPayment, ApiError>;
}
