//! Static product catalog.
//!
//! The storefront sells a fixed set of products; the catalog is built
//! once at startup and never mutated. Looking up an unknown ID is a
//! programming error (the UI only ever surfaces catalog IDs), so
//! [`Catalog::get`] fails loudly instead of degrading.

use morelufs_core::{Price, ProductId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from catalog lookups.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Lookup with an ID the catalog does not know. Callers must only
    /// pass IDs surfaced by the catalog itself.
    #[error("unknown product: {0}")]
    UnknownProduct(ProductId),
}

/// An immutable catalog product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    /// Unit price in whole rubles.
    pub unit_price: Price,
    pub description: String,
    /// Front-view image reference.
    pub front_image: String,
    /// Back-view image reference.
    pub back_image: String,
}

/// Read-only product catalog, ordered for display.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// The built-in two-product catalog.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            products: vec![
                Product {
                    id: ProductId::new("dark"),
                    title: "Dark Zip Hoodie".to_owned(),
                    unit_price: Price::new(6000),
                    description: "100% Cotton, 470 g/m³".to_owned(),
                    front_image: "static/images/dark_hoodie_front.jpg".to_owned(),
                    back_image: "static/images/dark_hoodie_back.png".to_owned(),
                },
                Product {
                    id: ProductId::new("gray"),
                    title: "Gray Zip Hoodie".to_owned(),
                    unit_price: Price::new(6000),
                    description: "100% Cotton, 470 g/m³".to_owned(),
                    front_image: "static/images/gray_hoodie_front.jpg".to_owned(),
                    back_image: "static/images/gray_hoodie_back.jpg".to_owned(),
                },
            ],
        }
    }

    /// Build a catalog from an explicit product list.
    #[must_use]
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// Look up a product by ID.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnknownProduct`] for IDs the catalog
    /// does not contain; this indicates a caller bug, not user error.
    pub fn get(&self, id: &ProductId) -> Result<&Product, CatalogError> {
        self.products
            .iter()
            .find(|p| &p.id == id)
            .ok_or_else(|| CatalogError::UnknownProduct(id.clone()))
    }

    /// Whether the catalog contains the given product ID.
    #[must_use]
    pub fn contains(&self, id: &ProductId) -> bool {
        self.products.iter().any(|p| &p.id == id)
    }

    /// Products in display order.
    pub fn products(&self) -> impl Iterator<Item = &Product> {
        self.products.iter()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_products() {
        let catalog = Catalog::builtin();
        let ids: Vec<_> = catalog.products().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["dark", "gray"]);

        let dark = catalog.get(&ProductId::new("dark")).unwrap();
        assert_eq!(dark.title, "Dark Zip Hoodie");
        assert_eq!(dark.unit_price, Price::new(6000));
    }

    #[test]
    fn test_unknown_product_fails_loudly() {
        let catalog = Catalog::builtin();
        let err = catalog.get(&ProductId::new("neon")).unwrap_err();
        assert!(matches!(err, CatalogError::UnknownProduct(id) if id.as_str() == "neon"));
    }

    #[test]
    fn test_contains() {
        let catalog = Catalog::builtin();
        assert!(catalog.contains(&ProductId::new("gray")));
        assert!(!catalog.contains(&ProductId::new("neon")));
    }
}
