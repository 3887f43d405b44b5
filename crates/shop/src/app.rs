//! The shop state container.
//!
//! [`Shop`] owns the catalog, cart and navigation state and exposes the
//! fixed set of mutation entry points external callers go through;
//! nothing outside this crate touches the aggregates directly. Every
//! cart mutation is persisted to the durable store before the entry
//! point returns; persistence failures are logged and swallowed, the
//! in-memory state stays authoritative for the session.

use morelufs_core::{CartItemId, ProductId, Size};
use thiserror::Error;
use tracing::warn;

use crate::api::CommerceApi;
use crate::bridge::PlatformBridge;
use crate::cart::Cart;
use crate::catalog::{Catalog, CatalogError};
use crate::checkout::{CheckoutError, CheckoutSummary};
use crate::forms::CheckoutForm;
use crate::navigation::{NavigationError, NavigationState};
use crate::storage::{CART_KEY, DRAFT_KEY, LocalStore};
use crate::submit::SubmissionStatus;

/// Notice shown after a successful add to cart.
pub const NOTICE_ADDED_TO_CART: &str = "Товар добавлен в корзину";

/// Notice shown when checkout is refused because the cart is empty.
pub const NOTICE_EMPTY_CART: &str = "Корзина пуста";

/// Errors from the add-to-cart entry point.
///
/// These are programmer-contract violations: the UI disables the
/// affordance until a product is open and a size is picked.
#[derive(Debug, Error)]
pub enum AddToCartError {
    /// No product is open on the detail page.
    #[error("no product is open on the detail page")]
    NoProductOpen,

    /// A size must be explicitly picked before adding.
    #[error("size must be selected before adding to cart")]
    NoSizeSelected,

    /// The selected product is not in the catalog.
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// The storefront state container.
///
/// Generic over its three external collaborators so tests can swap in
/// an in-memory store, a recording bridge and a scripted backend.
pub struct Shop<S, B, A> {
    pub(crate) catalog: Catalog,
    pub(crate) cart: Cart,
    pub(crate) nav: NavigationState,
    pub(crate) store: S,
    pub(crate) bridge: B,
    pub(crate) api: A,
    pub(crate) submission: SubmissionStatus,
}

impl<S, B, A> Shop<S, B, A>
where
    S: LocalStore,
    B: PlatformBridge,
    A: CommerceApi,
{
    /// Create a shop with an empty cart on the catalog page.
    pub fn new(catalog: Catalog, store: S, bridge: B, api: A) -> Self {
        Self {
            catalog,
            cart: Cart::new(),
            nav: NavigationState::new(),
            store,
            bridge,
            api,
            submission: SubmissionStatus::Idle,
        }
    }

    /// Start the session: signal readiness to the host platform and
    /// restore the persisted cart.
    ///
    /// A missing or corrupt cart record means starting empty, never a
    /// failure.
    pub fn start(&mut self) {
        self.bridge.ready();

        match self.store.read_json::<Cart>(CART_KEY) {
            Ok(Some(persisted)) => {
                self.cart = Cart::restore(persisted.items().to_vec());
            }
            Ok(None) => {}
            Err(e) => {
                warn!(error = %e, "could not restore persisted cart, starting empty");
            }
        }
    }

    /// Restore the persisted checkout form draft, or an empty form.
    #[must_use]
    pub fn load_draft(&self) -> CheckoutForm {
        match self.store.read_json::<CheckoutForm>(DRAFT_KEY) {
            Ok(Some(draft)) => draft,
            Ok(None) => CheckoutForm::default(),
            Err(e) => {
                warn!(error = %e, "could not restore form draft, starting empty");
                CheckoutForm::default()
            }
        }
    }

    /// Persist the in-progress checkout form as the draft record.
    pub fn save_draft(&mut self, form: &CheckoutForm) {
        if let Err(e) = self.store.write_json(DRAFT_KEY, form) {
            warn!(error = %e, "failed to persist form draft");
        }
    }

    // -------------------------------------------------------------------------
    // Navigation entry points
    // -------------------------------------------------------------------------

    /// Open the detail page for a catalog product.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnknownProduct`] for IDs not surfaced by
    /// the catalog; this indicates a caller bug.
    pub fn view_product(&mut self, id: &ProductId) -> Result<(), CatalogError> {
        self.catalog.get(id)?;
        self.nav.open_product(id.clone());
        Ok(())
    }

    /// Pick a size on the detail page.
    ///
    /// # Errors
    ///
    /// Returns [`NavigationError::SizeOutsideDetail`] off the detail page.
    pub fn select_size(&mut self, size: Size) -> Result<(), NavigationError> {
        self.nav.select_size(size)
    }

    /// Return to the catalog page.
    pub fn back_to_catalog(&mut self) {
        self.nav.back_to_catalog();
    }

    /// Enter checkout. Guarded: refused with a user-facing notice when
    /// the cart is empty, leaving the current page unchanged.
    pub fn open_checkout(&mut self) -> bool {
        if self.cart.is_empty() {
            self.bridge.show_alert(NOTICE_EMPTY_CART);
            return false;
        }
        self.nav.enter_checkout();
        true
    }

    // -------------------------------------------------------------------------
    // Cart entry points
    // -------------------------------------------------------------------------

    /// Add one unit of the currently open product in the currently
    /// picked size, then return to the catalog page.
    ///
    /// # Errors
    ///
    /// Returns [`AddToCartError`] when no product is open, no size has
    /// been picked for it, or the product ID no longer resolves.
    pub fn add_to_cart(&mut self) -> Result<CartItemId, AddToCartError> {
        let product_id = self
            .nav
            .selected_product()
            .cloned()
            .ok_or(AddToCartError::NoProductOpen)?;
        let size = self
            .nav
            .selected_size()
            .ok_or(AddToCartError::NoSizeSelected)?;

        let product = self.catalog.get(&product_id)?;
        let id = self.cart.add(product, size);
        self.persist_cart();

        self.bridge.show_alert(NOTICE_ADDED_TO_CART);
        self.nav.back_to_catalog();
        Ok(id)
    }

    /// Adjust a line's quantity; zero or less removes the line.
    /// Unknown IDs are ignored.
    pub fn change_quantity(&mut self, id: CartItemId, delta: i32) {
        self.cart.change_quantity(id, delta);
        self.persist_cart();
    }

    /// Remove a line. Idempotent.
    pub fn remove_item(&mut self, id: CartItemId) {
        self.cart.remove(id);
        self.persist_cart();
    }

    /// Explicitly empty the cart.
    pub fn clear_cart(&mut self) {
        self.cart.clear();
        self.persist_cart();
    }

    // -------------------------------------------------------------------------
    // Derived reads
    // -------------------------------------------------------------------------

    /// The current checkout breakdown for the given form selections.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError`] if the discount invariant is violated.
    pub fn summary(&self, form: &CheckoutForm) -> Result<CheckoutSummary, CheckoutError> {
        CheckoutSummary::compute(&self.cart, Some(form.delivery), Some(form.payment))
    }

    /// The product catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The cart aggregate (read-only; mutate through the entry points).
    #[must_use]
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// The navigation state.
    #[must_use]
    pub fn navigation(&self) -> &NavigationState {
        &self.nav
    }

    /// The current submission status.
    #[must_use]
    pub fn submission_status(&self) -> SubmissionStatus {
        self.submission
    }

    /// The durable store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The platform bridge.
    #[must_use]
    pub fn bridge(&self) -> &B {
        &self.bridge
    }

    /// The commerce API client.
    #[must_use]
    pub fn api(&self) -> &A {
        &self.api
    }

    /// Persist the whole cart, logging (never raising) failures.
    pub(crate) fn persist_cart(&mut self) {
        if let Err(e) = self.store.write_json(CART_KEY, &self.cart) {
            warn!(error = %e, "failed to persist cart, in-memory state remains authoritative");
        }
    }
}
