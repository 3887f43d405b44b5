//! Checkout selections and the price breakdown calculator.
//!
//! The calculator is a pure function over (cart, delivery choice,
//! payment choice); it holds no state and must be re-invoked after any
//! cart or selection change.

use morelufs_core::Price;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cart::Cart;

/// Fixed discount applied when paying with cryptocurrency.
pub const CRYPTO_DISCOUNT: Price = Price::new(200);

/// Delivery method, with its fixed fee tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeliveryMethod {
    /// Почта России, 300 ₽. The pre-selected default.
    #[default]
    RussianPost,
    /// Яндекс Доставка, 400 ₽.
    YandexDelivery,
    /// СДЭК, 500 ₽.
    Cdek,
}

impl DeliveryMethod {
    /// The fixed delivery fee for this method.
    #[must_use]
    pub const fn fee(self) -> Price {
        match self {
            Self::RussianPost => Price::new(300),
            Self::YandexDelivery => Price::new(400),
            Self::Cdek => Price::new(500),
        }
    }

    /// Wire identifier, e.g. `russian-post`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RussianPost => "russian-post",
            Self::YandexDelivery => "yandex-delivery",
            Self::Cdek => "cdek",
        }
    }
}

/// Payment method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Card payment through ЮKassa. The pre-selected default.
    #[default]
    Yookassa,
    /// Cryptocurrency; the only discount-eligible method.
    Crypto,
}

impl PaymentMethod {
    /// The fixed discount this method grants.
    #[must_use]
    pub const fn discount(self) -> Price {
        match self {
            Self::Crypto => CRYPTO_DISCOUNT,
            Self::Yookassa => Price::ZERO,
        }
    }

    /// Wire identifier, e.g. `crypto`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Yookassa => "yookassa",
            Self::Crypto => "crypto",
        }
    }
}

/// Errors from the checkout calculator.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The configured discount exceeds subtotal + delivery. Cannot
    /// happen with the fixed constants, but the invariant is checked
    /// rather than assumed.
    #[error("discount {discount} exceeds order amount {amount}")]
    DiscountExceedsOrder {
        /// The discount that would apply.
        discount: Price,
        /// Subtotal plus delivery fee.
        amount: Price,
    },
}

/// Derived price breakdown for the current cart and selections.
///
/// Never persisted, never cached; recompute after every mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckoutSummary {
    pub subtotal: Price,
    pub delivery_fee: Price,
    pub discount: Price,
    pub total: Price,
}

impl CheckoutSummary {
    /// Compute the breakdown: `subtotal + delivery_fee - discount`.
    ///
    /// An unset delivery method contributes a zero fee; an unset
    /// payment method grants no discount.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::DiscountExceedsOrder`] if the discount
    /// would drive the total negative.
    pub fn compute(
        cart: &Cart,
        delivery: Option<DeliveryMethod>,
        payment: Option<PaymentMethod>,
    ) -> Result<Self, CheckoutError> {
        let subtotal = cart.total_price();
        let delivery_fee = delivery.map_or(Price::ZERO, DeliveryMethod::fee);
        let discount = payment.map_or(Price::ZERO, PaymentMethod::discount);

        let amount = subtotal + delivery_fee;
        if discount > amount {
            return Err(CheckoutError::DiscountExceedsOrder { discount, amount });
        }

        Ok(Self {
            subtotal,
            delivery_fee,
            discount,
            total: amount - discount,
        })
    }
}
