//! The cart aggregate.
//!
//! An ordered sequence of line items, one per distinct (product, size)
//! pair. Adding an already-present pair increments its quantity; a
//! quantity reaching zero removes the item. The aggregate is pure
//! in-memory state; persistence is wired in by [`crate::app::Shop`],
//! which saves after every mutation.

use morelufs_core::{CartItemId, Price, ProductId, Size};
use serde::{Deserialize, Serialize};

use crate::catalog::Product;

/// One (product, size) pairing with an associated quantity.
///
/// Title and unit price are snapshotted from the catalog at add time;
/// they ride along into persistence and the order payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: CartItemId,
    pub product_id: ProductId,
    pub title: String,
    pub unit_price: Price,
    pub size: Size,
    pub quantity: u32,
}

impl CartItem {
    /// Price of this line: unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.unit_price.times(self.quantity)
    }
}

/// The cart aggregate: line items in insertion order.
///
/// Invariants (enforced by the mutation methods, checked on restore):
/// - at most one item per distinct (`product_id`, `size`) pair
/// - every item has `quantity >= 1`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a cart from persisted items, dropping anything that
    /// violates the aggregate invariants (quantity 0 lines, duplicate
    /// (product, size) pairs are merged).
    #[must_use]
    pub fn restore(items: Vec<CartItem>) -> Self {
        let mut cart = Self::new();
        for item in items {
            if item.quantity == 0 {
                continue;
            }
            match cart.find_pair_mut(&item.product_id, item.size) {
                Some(existing) => existing.quantity += item.quantity,
                None => cart.items.push(item),
            }
        }
        cart
    }

    /// Add one unit of `product` in `size`.
    ///
    /// Merges into the existing line for the same (product, size) pair
    /// if there is one, otherwise appends a new line with a fresh ID.
    /// Returns the ID of the resulting line.
    pub fn add(&mut self, product: &Product, size: Size) -> CartItemId {
        if let Some(existing) = self.find_pair_mut(&product.id, size) {
            existing.quantity += 1;
            return existing.id;
        }

        let item = CartItem {
            id: CartItemId::generate(),
            product_id: product.id.clone(),
            title: product.title.clone(),
            unit_price: product.unit_price,
            size,
            quantity: 1,
        };
        let id = item.id;
        self.items.push(item);
        id
    }

    /// Adjust a line's quantity by `delta`; a resulting quantity of
    /// zero or less removes the line entirely.
    ///
    /// Unknown IDs are silently ignored: removal can race a second
    /// click and must not fail.
    pub fn change_quantity(&mut self, id: CartItemId, delta: i32) {
        let Some(item) = self.items.iter_mut().find(|i| i.id == id) else {
            return;
        };

        let quantity = i64::from(item.quantity) + i64::from(delta);
        if quantity <= 0 {
            self.remove(id);
        } else {
            item.quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        }
    }

    /// Remove a line. Idempotent; unknown IDs are a no-op.
    pub fn remove(&mut self, id: CartItemId) {
        self.items.retain(|i| i.id != id);
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Line items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Look up a line by ID.
    #[must_use]
    pub fn find(&self, id: CartItemId) -> Option<&CartItem> {
        self.items.iter().find(|i| i.id == id)
    }

    /// Whether the cart has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total unit count across all lines.
    #[must_use]
    pub fn total_items(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Sum of line totals. Recomputed on every call; the cart is small
    /// enough that caching would only add staleness risk.
    #[must_use]
    pub fn total_price(&self) -> Price {
        self.items.iter().map(CartItem::line_total).sum()
    }

    fn find_pair_mut(&mut self, product_id: &ProductId, size: Size) -> Option<&mut CartItem> {
        self.items
            .iter_mut()
            .find(|i| &i.product_id == product_id && i.size == size)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use morelufs_core::ProductId;

    fn catalog() -> Catalog {
        Catalog::builtin()
    }

    fn dark(catalog: &Catalog) -> &Product {
        catalog.get(&ProductId::new("dark")).unwrap()
    }

    #[test]
    fn test_add_merges_same_pair() {
        let catalog = catalog();
        let mut cart = Cart::new();

        let first = cart.add(dark(&catalog), Size::M);
        let second = cart.add(dark(&catalog), Size::M);

        assert_eq!(first, second);
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].quantity, 2);
    }

    #[test]
    fn test_add_distinct_sizes_make_distinct_lines() {
        let catalog = catalog();
        let mut cart = Cart::new();

        cart.add(dark(&catalog), Size::M);
        cart.add(dark(&catalog), Size::L);

        assert_eq!(cart.items().len(), 2);
        assert_eq!(cart.total_items(), 2);
    }

    #[test]
    fn test_change_quantity_to_zero_removes() {
        let catalog = catalog();
        let mut cart = Cart::new();

        let id = cart.add(dark(&catalog), Size::M);
        cart.add(dark(&catalog), Size::M);
        assert_eq!(cart.total_items(), 2);

        cart.change_quantity(id, -2);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_change_quantity_below_zero_removes_not_clamps() {
        let catalog = catalog();
        let mut cart = Cart::new();

        let id = cart.add(dark(&catalog), Size::M);
        cart.change_quantity(id, -5);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_change_quantity_unknown_id_is_noop() {
        let catalog = catalog();
        let mut cart = Cart::new();
        cart.add(dark(&catalog), Size::M);

        cart.change_quantity(CartItemId::generate(), 1);
        cart.change_quantity(CartItemId::generate(), -1);
        assert_eq!(cart.total_items(), 1);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let catalog = catalog();
        let mut cart = Cart::new();
        let id = cart.add(dark(&catalog), Size::M);

        cart.remove(id);
        cart.remove(id);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_totals() {
        let catalog = catalog();
        let mut cart = Cart::new();
        cart.add(dark(&catalog), Size::M);
        cart.add(dark(&catalog), Size::M);
        let gray = catalog.get(&ProductId::new("gray")).unwrap();
        cart.add(gray, Size::S);

        assert_eq!(cart.total_items(), 3);
        assert_eq!(cart.total_price(), Price::new(18000));
    }

    #[test]
    fn test_invariants_hold_under_mutation_sequences() {
        let catalog = catalog();
        let mut cart = Cart::new();
        let gray = catalog.get(&ProductId::new("gray")).unwrap();

        for _ in 0..3 {
            cart.add(dark(&catalog), Size::M);
            cart.add(gray, Size::Xl);
        }
        let id = cart.items()[0].id;
        cart.change_quantity(id, -1);
        cart.change_quantity(id, 2);

        let mut pairs: Vec<_> = cart
            .items()
            .iter()
            .map(|i| (i.product_id.clone(), i.size))
            .collect();
        pairs.sort_by(|a, b| a.0.as_str().cmp(b.0.as_str()));
        pairs.dedup();
        assert_eq!(pairs.len(), cart.items().len(), "duplicate (product, size) pair");
        assert!(cart.items().iter().all(|i| i.quantity >= 1));
    }

    #[test]
    fn test_restore_drops_zero_quantity_and_merges_duplicates() {
        let catalog = catalog();
        let mut source = Cart::new();
        source.add(dark(&catalog), Size::M);
        let mut items = source.items().to_vec();

        let mut zero = items[0].clone();
        zero.id = CartItemId::generate();
        zero.quantity = 0;
        items.push(zero);

        let mut dupe = items[0].clone();
        dupe.id = CartItemId::generate();
        dupe.quantity = 2;
        items.push(dupe);

        let cart = Cart::restore(items);
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].quantity, 3);
    }

    #[test]
    fn test_serde_roundtrip() {
        let catalog = catalog();
        let mut cart = Cart::new();
        cart.add(dark(&catalog), Size::M);

        let json = serde_json::to_string(&cart).unwrap();
        let parsed: Cart = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, cart);
    }
}
