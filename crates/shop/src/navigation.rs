//! Page navigation state machine.
//!
//! Three pages, cyclic: `Catalog` (initial) -> `ProductDetail` ->
//! `Checkout` -> back to `Catalog`. The transient product and size
//! selections live here and are cleared on every transition that
//! leaves the detail page, so a stale size can never leak into a later
//! add-to-cart call.

use morelufs_core::{ProductId, Size};
use thiserror::Error;

/// The currently visible page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    /// Product grid; the initial page.
    #[default]
    Catalog,
    /// Single product with the size picker.
    ProductDetail,
    /// Checkout form and order summary.
    Checkout,
}

/// Errors from navigation transitions.
#[derive(Debug, Error)]
pub enum NavigationError {
    /// Size picks are only meaningful on the product detail page.
    #[error("size can only be selected on the product detail page")]
    SizeOutsideDetail,
}

/// Navigation state: current page plus the mid-flow selections.
///
/// Invariant: `selected_size` is only ever set while the current page
/// is [`Page::ProductDetail`].
#[derive(Debug, Clone, Default)]
pub struct NavigationState {
    page: Page,
    selected_product: Option<ProductId>,
    selected_size: Option<Size>,
}

impl NavigationState {
    /// Fresh state on the catalog page.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The currently visible page.
    #[must_use]
    pub const fn page(&self) -> Page {
        self.page
    }

    /// The product open on the detail page, if any.
    #[must_use]
    pub const fn selected_product(&self) -> Option<&ProductId> {
        self.selected_product.as_ref()
    }

    /// The explicitly picked size, if any.
    #[must_use]
    pub const fn selected_size(&self) -> Option<Size> {
        self.selected_size
    }

    /// Open the detail page for a product.
    ///
    /// Always resets the size selection, including when re-entering the
    /// detail page for the product already shown.
    pub fn open_product(&mut self, product_id: ProductId) {
        self.page = Page::ProductDetail;
        self.selected_product = Some(product_id);
        self.selected_size = None;
    }

    /// Pick a size on the detail page (self-transition).
    ///
    /// # Errors
    ///
    /// Returns [`NavigationError::SizeOutsideDetail`] when called on
    /// any other page.
    pub fn select_size(&mut self, size: Size) -> Result<(), NavigationError> {
        if self.page != Page::ProductDetail {
            return Err(NavigationError::SizeOutsideDetail);
        }
        self.selected_size = Some(size);
        Ok(())
    }

    /// Return to the catalog page, clearing both selections.
    /// Unconditional from every page.
    pub fn back_to_catalog(&mut self) {
        self.page = Page::Catalog;
        self.selected_product = None;
        self.selected_size = None;
    }

    /// Enter the checkout page, clearing the detail-page selections.
    ///
    /// The non-empty-cart guard lives on [`crate::app::Shop`], which
    /// owns the cart; this transition itself is unconditional.
    pub fn enter_checkout(&mut self) {
        self.page = Page::Checkout;
        self.selected_product = None;
        self.selected_size = None;
    }
}
