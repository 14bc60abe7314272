//! HTTP client for the marketplace seller API.
//!
//! Wraps `reqwest` with seller-specific error handling and typed response
//! deserialization. Batch lookups check the `"errors"` array in the JSON
//! envelope and surface API-level failures as [`SellerError::ApiError`].

use std::collections::HashMap;
use std::time::Duration;

use reqwest::{Client, Url};

use eandash_core::{EanCode, MarketplaceAttributes};

use crate::error::SellerError;
use crate::types::{ConnectionTest, SellerCredentials, SellerProduct};

/// Client for the marketplace seller API.
///
/// Manages the HTTP client and base URL; credentials travel with each call.
/// Use [`SellerClient::new`] with the configured regional endpoint, or point
/// `base_url` at a mock server in tests.
pub struct SellerClient {
    client: Client,
    base_url: Url,
}

impl SellerClient {
    /// Creates a new client against the given base URL.
    ///
    /// # Errors
    ///
    /// Returns [`SellerError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`SellerError::ApiError`] if `base_url` is
    /// not a valid URL.
    pub fn new(base_url: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, SellerError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Normalise: ensure the base URL ends with exactly one slash so that
        // join() appends paths rather than replacing the last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised)
            .map_err(|e| SellerError::ApiError(format!("invalid base URL '{base_url}': {e}")))?;

        Ok(Self { client, base_url })
    }

    /// Resolves a batch of EAN codes to marketplace attributes.
    ///
    /// Calls `POST products/lookup` with the full code list. EAN codes the
    /// marketplace cannot resolve are simply absent from the returned map —
    /// that is not an error.
    ///
    /// # Errors
    ///
    /// - [`SellerError::ApiError`] if the API returns an error payload.
    /// - [`SellerError::Http`] on network failure or non-2xx HTTP status.
    /// - [`SellerError::Deserialize`] if the response does not match the
    ///   expected shape.
    pub async fn fetch_batch(
        &self,
        ean_codes: &[String],
        credentials: &SellerCredentials,
    ) -> Result<HashMap<String, MarketplaceAttributes>, SellerError> {
        let url = self.endpoint("products/lookup")?;
        let payload = serde_json::json!({
            "eanCodes": ean_codes,
            "marketplaceId": credentials.marketplace_id,
            "merchantId": credentials.merchant_id,
        });

        let body = self.request_json(&url, credentials, &payload).await?;
        Self::check_api_error(&body)?;

        // A missing or null "products" field means nothing resolved.
        let products = match body.get("products") {
            Some(value) if !value.is_null() => value.clone(),
            _ => serde_json::Value::Object(serde_json::Map::new()),
        };
        let parsed: HashMap<String, SellerProduct> = serde_json::from_value(products)
            .map_err(|e| SellerError::Deserialize {
                context: format!("products/lookup({} codes)", ean_codes.len()),
                source: e,
            })?;

        Ok(parsed
            .into_iter()
            .map(|(ean, product)| (ean, MarketplaceAttributes::from(product)))
            .collect())
    }

    /// Resolves a single validated EAN code.
    ///
    /// Thin wrapper over [`SellerClient::fetch_batch`] with a one-element
    /// batch; returns `None` when the marketplace does not know the code.
    ///
    /// # Errors
    ///
    /// Same as [`SellerClient::fetch_batch`].
    pub async fn fetch_one(
        &self,
        code: &EanCode,
        credentials: &SellerCredentials,
    ) -> Result<Option<MarketplaceAttributes>, SellerError> {
        let mut mapping = self
            .fetch_batch(&[code.as_str().to_string()], credentials)
            .await?;
        Ok(mapping.remove(code.as_str()))
    }

    /// Verifies the supplied credentials against the seller API.
    ///
    /// # Errors
    ///
    /// - [`SellerError::Http`] on network failure or non-2xx HTTP status.
    /// - [`SellerError::Deserialize`] if the response does not match the
    ///   expected shape.
    pub async fn test_connection(
        &self,
        credentials: &SellerCredentials,
    ) -> Result<ConnectionTest, SellerError> {
        let url = self.endpoint("connection/test")?;
        let payload = serde_json::json!({
            "marketplaceId": credentials.marketplace_id,
            "merchantId": credentials.merchant_id,
        });

        let body = self.request_json(&url, credentials, &payload).await?;
        serde_json::from_value(body).map_err(|e| SellerError::Deserialize {
            context: "connection/test".to_string(),
            source: e,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, SellerError> {
        self.base_url
            .join(path)
            .map_err(|e| SellerError::ApiError(format!("invalid endpoint path '{path}': {e}")))
    }

    /// Sends an authenticated POST, asserts a 2xx HTTP status, and parses the
    /// response body as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`SellerError::Http`] on network failure or a non-2xx status.
    /// Returns [`SellerError::Deserialize`] if the body is not valid JSON.
    async fn request_json(
        &self,
        url: &Url,
        credentials: &SellerCredentials,
        payload: &serde_json::Value,
    ) -> Result<serde_json::Value, SellerError> {
        tracing::debug!(url = %url, "seller API request");
        let response = self
            .client
            .post(url.clone())
            .header("x-amz-access-token", &credentials.access_key)
            .json(payload)
            .send()
            .await?;
        let response = response.error_for_status()?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| SellerError::Deserialize {
            context: url.to_string(),
            source: e,
        })
    }

    /// Checks the top-level `"errors"` array and returns the first message
    /// if the API reported a failure.
    fn check_api_error(body: &serde_json::Value) -> Result<(), SellerError> {
        if let Some(errors) = body.get("errors").and_then(serde_json::Value::as_array) {
            if let Some(first) = errors.first() {
                let msg = first
                    .get("message")
                    .and_then(serde_json::Value::as_str)
                    .unwrap_or("unknown error")
                    .to_string();
                return Err(SellerError::ApiError(msg));
            }
        }
        Ok(())
    }
}
