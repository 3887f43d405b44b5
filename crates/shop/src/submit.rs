//! Order submission pipeline.
//!
//! Submission is a two-step protocol against the commerce backend:
//! create the order, then create the payment for it. The steps are
//! strictly sequential and each can fail independently; the user-facing
//! notice always names which step failed. Cleanup (clearing the cart
//! and the form draft, handing the payment URL to the host) happens
//! exactly once, only after both steps succeeded.
//!
//! A status field guards against overlapping attempts: while one
//! submission is in flight, further calls are rejected without touching
//! any state.

use thiserror::Error;
use tracing::{error, info, warn};

use morelufs_core::OrderId;

use crate::api::{ApiError, CommerceApi, OrderRequest, PaymentRequest};
use crate::app::Shop;
use crate::bridge::PlatformBridge;
use crate::checkout::{CheckoutError, CheckoutSummary};
use crate::forms::{CheckoutForm, FieldError};
use crate::storage::{DRAFT_KEY, LocalStore};

/// Notice shown when a submission is rejected because another attempt
/// is still in flight.
pub const NOTICE_IN_FLIGHT: &str = "Заказ уже оформляется, пожалуйста, подождите";

/// Notice shown when form validation fails.
pub const NOTICE_VALIDATION_FAILED: &str =
    "Пожалуйста, заполните все обязательные поля корректно";

/// Notice shown when order creation fails; nothing was created.
pub const NOTICE_ORDER_FAILED: &str =
    "Ошибка при оформлении заказа. Пожалуйста, попробуйте еще раз.";

/// Notice shown when the order was created but payment initiation
/// failed. Deliberately distinct from [`NOTICE_ORDER_FAILED`]: an order
/// now exists on the backend.
pub const NOTICE_PAYMENT_FAILED: &str =
    "Заказ создан, но не удалось перейти к оплате. Мы свяжемся с вами для оплаты.";

/// Notice shown after a fully successful submission.
pub const NOTICE_ORDER_PLACED: &str = "Заказ оформлен! Открывается страница оплаты...";

/// Where the current submission attempt stands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubmissionStatus {
    /// No attempt in flight; submission is allowed.
    #[default]
    Idle,
    /// Validating the form and assembling the payloads.
    Validating,
    /// Waiting on the order-creation call.
    CreatingOrder,
    /// Order exists; waiting on the payment-creation call.
    CreatingPayment,
    /// The last attempt succeeded end to end.
    Completed,
}

impl SubmissionStatus {
    /// Whether an attempt is currently in flight (and further
    /// submissions must be rejected).
    #[must_use]
    pub const fn in_flight(self) -> bool {
        matches!(
            self,
            Self::Validating | Self::CreatingOrder | Self::CreatingPayment
        )
    }
}

/// Why a submission attempt did not complete.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// Another attempt is still in flight; nothing was changed.
    #[error("a submission is already in flight")]
    AlreadyInFlight,

    /// The cart is empty; there is nothing to order.
    #[error("cannot submit an order with an empty cart")]
    EmptyCart,

    /// One or more form fields failed validation.
    #[error("form validation failed for {} field(s)", .0.len())]
    Validation(Vec<FieldError>),

    /// The checkout breakdown could not be computed.
    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    /// Order creation failed; no order exists on the backend.
    #[error("order creation failed: {0}")]
    OrderCreation(#[source] ApiError),

    /// The order was created but payment initiation failed. The order
    /// remains on the backend for out-of-band follow-up.
    #[error("payment creation failed for order {order_id}: {source}")]
    PaymentCreation {
        order_id: OrderId,
        #[source]
        source: ApiError,
    },
}

/// Outcome of a fully successful submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedOrder {
    /// Server-assigned order ID.
    pub order_id: OrderId,
    /// Payment page handed to the host platform.
    pub payment_url: String,
    /// Backend payment identifier, when provided.
    pub payment_id: Option<String>,
}

impl<S, B, A> Shop<S, B, A>
where
    S: LocalStore,
    B: PlatformBridge,
    A: CommerceApi,
{
    /// Submit the current cart as an order using the given form.
    ///
    /// On success the cart and the draft are cleared, the payment URL
    /// is handed to the host bridge and a success notice is shown. On
    /// any failure the cart, draft and navigation are left untouched
    /// and a notice naming the failing step is shown.
    ///
    /// # Errors
    ///
    /// Returns [`SubmitError`] describing the failing step.
    pub async fn submit_order(
        &mut self,
        form: &CheckoutForm,
    ) -> Result<CompletedOrder, SubmitError> {
        if self.submission.in_flight() {
            warn!("submission requested while another attempt is in flight");
            self.bridge.show_alert(NOTICE_IN_FLIGHT);
            return Err(SubmitError::AlreadyInFlight);
        }

        self.submission = SubmissionStatus::Validating;
        match self.run_submission(form).await {
            Ok(completed) => {
                self.submission = SubmissionStatus::Completed;
                self.finish_successfully(&completed);
                Ok(completed)
            }
            Err(e) => {
                self.submission = SubmissionStatus::Idle;
                self.report_failure(&e);
                Err(e)
            }
        }
    }

    /// The pipeline proper: validate, price, create order, create
    /// payment. Leaves status handling and side effects to the caller.
    async fn run_submission(&mut self, form: &CheckoutForm) -> Result<CompletedOrder, SubmitError> {
        let details = form.validate().map_err(SubmitError::Validation)?;
        if self.cart.is_empty() {
            return Err(SubmitError::EmptyCart);
        }

        let summary = CheckoutSummary::compute(&self.cart, Some(form.delivery), Some(form.payment))?;
        let request = OrderRequest::assemble(
            self.cart.items(),
            &details,
            form.delivery,
            form.payment,
            &summary,
        );

        self.submission = SubmissionStatus::CreatingOrder;
        let order_id = self
            .api
            .create_order(&request)
            .await
            .map_err(SubmitError::OrderCreation)?;
        info!(order_id = %order_id, "order created");

        self.submission = SubmissionStatus::CreatingPayment;
        let payment_request = PaymentRequest {
            order_id,
            amount: summary.total,
            payment_method: form.payment,
            description: format!("Заказ #{order_id}"),
        };
        let payment = self
            .api
            .create_payment(&payment_request)
            .await
            .map_err(|source| SubmitError::PaymentCreation { order_id, source })?;

        Ok(CompletedOrder {
            order_id,
            payment_url: payment.payment_url,
            payment_id: payment.payment_id,
        })
    }

    /// Post-success cleanup: clear the cart and draft, hand over the
    /// payment URL, show the success notice. Runs exactly once per
    /// successful attempt.
    fn finish_successfully(&mut self, completed: &CompletedOrder) {
        info!(order_id = %completed.order_id, "order submitted, opening payment page");

        self.cart.clear();
        self.persist_cart();
        if let Err(e) = self.store.remove(DRAFT_KEY) {
            warn!(error = %e, "failed to clear form draft after submission");
        }

        self.bridge.open_link(&completed.payment_url);
        self.bridge.show_alert(NOTICE_ORDER_PLACED);
    }

    /// Surface the failure to the user, naming the step that failed.
    fn report_failure(&self, e: &SubmitError) {
        match e {
            SubmitError::Validation(errors) => {
                info!(fields = errors.len(), "form validation failed");
                self.bridge.show_alert(NOTICE_VALIDATION_FAILED);
            }
            SubmitError::EmptyCart => {
                warn!("submission attempted with an empty cart");
                self.bridge.show_alert(crate::app::NOTICE_EMPTY_CART);
            }
            SubmitError::Checkout(source) => {
                error!(error = %source, "checkout breakdown rejected");
                self.bridge.show_alert(NOTICE_ORDER_FAILED);
            }
            SubmitError::OrderCreation(source) => {
                error!(error = %source, "order creation failed");
                self.bridge.show_alert(NOTICE_ORDER_FAILED);
            }
            SubmitError::PaymentCreation { order_id, source } => {
                error!(order_id = %order_id, error = %source, "payment creation failed");
                self.bridge.show_alert(NOTICE_PAYMENT_FAILED);
            }
            // Handled before the pipeline starts.
            SubmitError::AlreadyInFlight => {}
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::api::CreatedPayment;
    use crate::catalog::Catalog;
    use crate::checkout::{DeliveryMethod, PaymentMethod};
    use crate::storage::{CART_KEY, MemoryStore};
    use async_trait::async_trait;
    use morelufs_core::{Price, ProductId, Size};
    use std::sync::Mutex;

    /// Which step the scripted backend should fail at.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Script {
        Succeed,
        FailOrder,
        FailPayment,
    }

    struct ScriptedApi {
        script: Script,
        orders: Mutex<Vec<OrderRequest>>,
        payments: Mutex<Vec<PaymentRequest>>,
    }

    impl ScriptedApi {
        fn new(script: Script) -> Self {
            Self {
                script,
                orders: Mutex::new(Vec::new()),
                payments: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl CommerceApi for ScriptedApi {
        async fn create_order(&self, request: &OrderRequest) -> Result<OrderId, ApiError> {
            self.orders.lock().unwrap().push(request.clone());
            if self.script == Script::FailOrder {
                return Err(ApiError::Rejected("база заказов недоступна".to_owned()));
            }
            Ok(OrderId::new(42))
        }

        async fn create_payment(&self, request: &PaymentRequest) -> Result<CreatedPayment, ApiError> {
            self.payments.lock().unwrap().push(request.clone());
            if self.script == Script::FailPayment {
                return Err(ApiError::Rejected("платежный шлюз недоступен".to_owned()));
            }
            Ok(CreatedPayment {
                payment_url: "https://pay.example/42".to_owned(),
                payment_id: Some("test_42".to_owned()),
            })
        }
    }

    #[derive(Default)]
    struct RecordingBridge {
        alerts: Mutex<Vec<String>>,
        opened: Mutex<Vec<String>>,
    }

    impl PlatformBridge for RecordingBridge {
        fn ready(&self) {}

        fn open_link(&self, url: &str) {
            self.opened.lock().unwrap().push(url.to_owned());
        }

        fn show_alert(&self, message: &str) {
            self.alerts.lock().unwrap().push(message.to_owned());
        }
    }

    fn shop_with(script: Script) -> Shop<MemoryStore, RecordingBridge, ScriptedApi> {
        let mut shop = Shop::new(
            Catalog::builtin(),
            MemoryStore::new(),
            RecordingBridge::default(),
            ScriptedApi::new(script),
        );
        shop.view_product(&ProductId::new("dark")).unwrap();
        shop.select_size(Size::M).unwrap();
        shop.add_to_cart().unwrap();
        shop
    }

    fn valid_form() -> CheckoutForm {
        CheckoutForm {
            full_name: "Иван Петров".to_owned(),
            phone: "+79123456789".to_owned(),
            email: "ivan@example.com".to_owned(),
            city: "Москва".to_owned(),
            postal_code: "101000".to_owned(),
            address: "ул. Тверская, д. 1".to_owned(),
            delivery: DeliveryMethod::RussianPost,
            payment: PaymentMethod::Yookassa,
            ..CheckoutForm::default()
        }
    }

    #[tokio::test]
    async fn test_successful_submission_cleans_up_once() {
        let mut shop = shop_with(Script::Succeed);
        shop.save_draft(&valid_form());

        let completed = shop.submit_order(&valid_form()).await.unwrap();
        assert_eq!(completed.order_id, OrderId::new(42));
        assert_eq!(completed.payment_url, "https://pay.example/42");

        assert!(shop.cart().is_empty());
        assert_eq!(shop.submission_status(), SubmissionStatus::Completed);

        // Persisted cart is now empty and the draft is gone.
        let persisted: crate::cart::Cart = shop.store.read_json(CART_KEY).unwrap().unwrap();
        assert!(persisted.is_empty());
        assert!(shop.store.read(DRAFT_KEY).unwrap().is_none());

        assert_eq!(
            shop.bridge().opened.lock().unwrap().as_slice(),
            ["https://pay.example/42"]
        );
        assert!(
            shop.bridge()
                .alerts
                .lock()
                .unwrap()
                .contains(&NOTICE_ORDER_PLACED.to_owned())
        );
    }

    #[tokio::test]
    async fn test_payment_amount_matches_checkout_total() {
        let mut shop = shop_with(Script::Succeed);
        let mut form = valid_form();
        form.delivery = DeliveryMethod::Cdek;
        form.payment = PaymentMethod::Crypto;

        shop.submit_order(&form).await.unwrap();

        let payments = shop.api().payments.lock().unwrap();
        // 6000 + 500 - 200
        assert_eq!(payments[0].amount, Price::new(6300));
        assert_eq!(payments[0].description, "Заказ #42");
    }

    #[tokio::test]
    async fn test_order_failure_keeps_cart_and_names_the_step() {
        let mut shop = shop_with(Script::FailOrder);

        let err = shop.submit_order(&valid_form()).await.unwrap_err();
        assert!(matches!(err, SubmitError::OrderCreation(_)));

        assert_eq!(shop.cart().total_items(), 1);
        assert_eq!(shop.submission_status(), SubmissionStatus::Idle);
        assert!(shop.api().payments.lock().unwrap().is_empty());
        assert_eq!(
            shop.bridge().alerts.lock().unwrap().last().unwrap(),
            NOTICE_ORDER_FAILED
        );
    }

    #[tokio::test]
    async fn test_payment_failure_is_reported_distinctly() {
        let mut shop = shop_with(Script::FailPayment);

        let err = shop.submit_order(&valid_form()).await.unwrap_err();
        let SubmitError::PaymentCreation { order_id, .. } = err else {
            panic!("expected a payment-step failure, got {err:?}");
        };
        assert_eq!(order_id, OrderId::new(42));

        // The order exists on the backend, but locally nothing was
        // cleaned up and no link was opened.
        assert_eq!(shop.cart().total_items(), 1);
        assert_eq!(shop.submission_status(), SubmissionStatus::Idle);
        assert!(shop.bridge().opened.lock().unwrap().is_empty());
        assert_eq!(
            shop.bridge().alerts.lock().unwrap().last().unwrap(),
            NOTICE_PAYMENT_FAILED
        );
    }

    #[tokio::test]
    async fn test_validation_failure_makes_no_remote_calls() {
        let mut shop = shop_with(Script::Succeed);

        let err = shop.submit_order(&CheckoutForm::default()).await.unwrap_err();
        assert!(matches!(err, SubmitError::Validation(_)));

        assert!(shop.api().orders.lock().unwrap().is_empty());
        assert_eq!(shop.cart().total_items(), 1);
        assert_eq!(
            shop.bridge().alerts.lock().unwrap().last().unwrap(),
            NOTICE_VALIDATION_FAILED
        );
    }

    #[tokio::test]
    async fn test_empty_cart_is_rejected_before_any_call() {
        let mut shop = shop_with(Script::Succeed);
        shop.clear_cart();

        let err = shop.submit_order(&valid_form()).await.unwrap_err();
        assert!(matches!(err, SubmitError::EmptyCart));
        assert!(shop.api().orders.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_in_flight_guard_rejects_reentry() {
        let mut shop = shop_with(Script::Succeed);
        shop.submission = SubmissionStatus::CreatingOrder;

        let err = shop.submit_order(&valid_form()).await.unwrap_err();
        assert!(matches!(err, SubmitError::AlreadyInFlight));
        assert!(shop.api().orders.lock().unwrap().is_empty());
        assert_eq!(
            shop.bridge().alerts.lock().unwrap().as_slice(),
            [NOTICE_IN_FLIGHT]
        );
    }

    #[test]
    fn test_in_flight_statuses() {
        assert!(!SubmissionStatus::Idle.in_flight());
        assert!(SubmissionStatus::Validating.in_flight());
        assert!(SubmissionStatus::CreatingOrder.in_flight());
        assert!(SubmissionStatus::CreatingPayment.in_flight());
        assert!(!SubmissionStatus::Completed.in_flight());
    }
}
