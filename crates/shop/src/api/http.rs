//! HTTP implementation of the commerce API.

use async_trait::async_trait;
use morelufs_core::OrderId;
use url::Url;

use crate::config::ShopConfig;

use super::{
    ApiError, CommerceApi, CreatedPayment, OrderRequest, OrderResponse, PaymentRequest,
    PaymentResponse,
};

/// Order-creation endpoint path.
const ORDER_PATH: &str = "api/order";

/// Payment-creation endpoint path.
const PAYMENT_PATH: &str = "api/create-payment";

/// JSON-over-HTTP client for the commerce backend.
///
/// Built once and reused; every request carries the configured bounded
/// timeout, and expiry surfaces as the corresponding step's failure.
#[derive(Debug, Clone)]
pub struct HttpCommerceApi {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpCommerceApi {
    /// Create a new client from the shop configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(config: &ShopConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: config.api_base_url.clone(),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        Ok(self.base_url.join(path)?)
    }

    async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R, ApiError>
    where
        B: serde::Serialize + Sync,
        R: serde::de::DeserializeOwned,
    {
        let url = self.endpoint(path)?;
        let response = self.client.post(url).json(body).send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ApiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl CommerceApi for HttpCommerceApi {
    async fn create_order(&self, request: &OrderRequest) -> Result<OrderId, ApiError> {
        let response: OrderResponse = self.post_json(ORDER_PATH, request).await?;

        if !response.success {
            return Err(ApiError::Rejected(
                response
                    .error
                    .unwrap_or_else(|| "order creation failed".to_owned()),
            ));
        }

        response.order_id.ok_or(ApiError::MissingField("order_id"))
    }

    async fn create_payment(&self, request: &PaymentRequest) -> Result<CreatedPayment, ApiError> {
        let response: PaymentResponse = self.post_json(PAYMENT_PATH, request).await?;

        if !response.success {
            return Err(ApiError::Rejected(
                response
                    .error
                    .unwrap_or_else(|| "payment creation failed".to_owned()),
            ));
        }

        let payment_url = response
            .payment_url
            .ok_or(ApiError::MissingField("payment_url"))?;

        Ok(CreatedPayment {
            payment_url,
            payment_id: response.payment_id,
        })
    }
}
