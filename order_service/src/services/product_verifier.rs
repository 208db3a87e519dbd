// order_service/src/services/product_verifier.rs

use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::errors::{AppError, Result as AppResult};
use crate::models::ProductInfo;

pub const DEFAULT_PRODUCT_SERVICE_URL: &str = "http://product-service:8002";
pub const DEFAULT_LOOKUP_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerifyError {
  #[error("product '{0}' does not exist")]
  ProductNotFound(String),

  /// The lookup could not be completed: timeout, connection failure, an
  /// error status other than 404, or a body we could not read.
  #[error("product lookup failed: {0}")]
  ServiceUnavailable(String),
}

/// Confirms a product exists and returns its display metadata.
///
/// One call, one attempt: implementations do not retry.
#[async_trait]
pub trait ProductVerifier: Send + Sync {
  async fn verify(&self, product_id: &str) -> Result<ProductInfo, VerifyError>;
}

/// `GET {base_url}/{product_id}` against the product service.
#[derive(Debug, Clone)]
pub struct HttpProductVerifier {
  client: reqwest::Client,
  base_url: Url,
}

impl HttpProductVerifier {
  pub fn new(base_url: &str, timeout: Duration) -> AppResult<Self> {
    let base_url = Url::parse(base_url)
      .map_err(|e| AppError::Config(format!("Invalid product service URL '{}': {}", base_url, e)))?;
    if base_url.cannot_be_a_base() {
      return Err(AppError::Config(format!(
        "Product service URL '{}' cannot carry a path",
        base_url
      )));
    }
    let client = reqwest::Client::builder()
      .timeout(timeout)
      .build()
      .map_err(|e| AppError::Config(format!("Failed to build product service client: {}", e)))?;
    Ok(Self { client, base_url })
  }

  pub fn base_url(&self) -> &Url {
    &self.base_url
  }

  /// Appends the id as one percent-encoded path segment.
  ///
  /// `.` and `..` would be collapsed by URL normalisation and address some
  /// other resource, so no product can have those ids.
  pub fn product_url(&self, product_id: &str) -> Result<Url, VerifyError> {
    if matches!(product_id, "." | "..") {
      return Err(VerifyError::ProductNotFound(product_id.to_string()));
    }
    let mut url = self.base_url.clone();
    url
      .path_segments_mut()
      .map_err(|_| VerifyError::ServiceUnavailable(format!("product service URL '{}' cannot carry a path", self.base_url)))?
      .pop_if_empty()
      .push(product_id);
    Ok(url)
  }
}

#[async_trait]
impl ProductVerifier for HttpProductVerifier {
  #[instrument(name = "product_verifier::verify", skip(self))]
  async fn verify(&self, product_id: &str) -> Result<ProductInfo, VerifyError> {
    let url = self.product_url(product_id)?;
    debug!(%url, "Looking up product.");

    let response = self.client.get(url).send().await.map_err(|e| {
      warn!(error = %e, timeout = e.is_timeout(), "Product service request failed.");
      VerifyError::ServiceUnavailable(e.to_string())
    })?;

    match response.status() {
      StatusCode::NOT_FOUND => Err(VerifyError::ProductNotFound(product_id.to_string())),
      status if status.is_success() => response.json::<ProductInfo>().await.map_err(|e| {
        warn!(error = %e, "Product service returned an unreadable body.");
        VerifyError::ServiceUnavailable(format!("malformed product response: {}", e))
      }),
      status => {
        warn!(%status, "Product service returned an error status.");
        Err(VerifyError::ServiceUnavailable(format!(
          "product service responded with {}",
          status
        )))
      }
    }
  }
}
