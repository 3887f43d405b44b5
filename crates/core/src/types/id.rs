//! Newtype IDs for type-safe entity references.
//!
//! Each entity gets its own wrapper type so that a cart item ID can
//! never be passed where an order ID is expected.

use core::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of a catalog product (e.g. `"dark"`, `"gray"`).
///
/// Product IDs are short human-readable slugs owned by the catalog;
/// they are stable across sessions and appear verbatim on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Create a product ID from a slug.
    #[must_use]
    pub fn new(slug: impl Into<String>) -> Self {
        Self(slug.into())
    }

    /// Get the slug as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ProductId {
    fn from(slug: &str) -> Self {
        Self(slug.to_owned())
    }
}

/// Identifier of a single cart line item.
///
/// Assigned once at item creation and never reused; random UUIDs make
/// collisions across restored sessions a non-issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CartItemId(Uuid);

impl CartItemId {
    /// Generate a fresh, unique item ID.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Get the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for CartItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for CartItemId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

/// Server-assigned order identifier, returned by the order-creation
/// endpoint on success.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(i64);

impl OrderId {
    /// Create an order ID from its numeric value.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the underlying i64 value.
    #[must_use]
    pub const fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for OrderId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_product_id_display() {
        let id = ProductId::new("dark");
        assert_eq!(id.to_string(), "dark");
        assert_eq!(id.as_str(), "dark");
    }

    #[test]
    fn test_product_id_serde_transparent() {
        let id = ProductId::new("gray");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"gray\"");
    }

    #[test]
    fn test_cart_item_id_unique() {
        let a = CartItemId::generate();
        let b = CartItemId::generate();
        assert_ne!(a, b);
    }

    #[test]
    fn test_cart_item_id_serde_roundtrip() {
        let id = CartItemId::generate();
        let json = serde_json::to_string(&id).unwrap();
        let parsed: CartItemId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_order_id_serde_transparent() {
        let id = OrderId::new(42);
        assert_eq!(serde_json::to_string(&id).unwrap(), "42");
        let parsed: OrderId = serde_json::from_str("42").unwrap();
        assert_eq!(parsed, id);
        assert_eq!(parsed.as_i64(), 42);
    }
}
