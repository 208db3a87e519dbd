// order_service/src/errors.rs

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use stepwise::StepwiseError;
use thiserror::Error;

use crate::services::order_store::StoreError;
use crate::services::product_verifier::VerifyError;

pub const PRODUCT_ID_REQUIRED: &str = "productId is required";
pub const QUANTITY_MUST_BE_POSITIVE: &str = "quantity must be positive";
pub const QUANTITY_TOO_LARGE: &str = "quantity is too large";
pub const MALFORMED_JSON_BODY: &str = "malformed JSON body";

#[derive(Debug, Error)]
pub enum AppError {
  /// Client input failed validation. Carries the message returned to the client.
  #[error("Invalid request: {0}")]
  InvalidRequest(&'static str),

  #[error("Product not found: {0}")]
  ProductNotFound(String),

  #[error("Product service unavailable: {0}")]
  ProductServiceUnavailable(String),

  #[error("Storage unavailable: {0}")]
  StorageUnavailable(String),

  #[error("Order not found: {0}")]
  OrderNotFound(String),

  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("Workflow Error: {source}")]
  Workflow {
    #[from]
    source: StepwiseError,
  },

  #[error("Internal Server Error: {0}")]
  Internal(String),
}

impl From<VerifyError> for AppError {
  fn from(err: VerifyError) -> Self {
    match err {
      VerifyError::ProductNotFound(product_id) => AppError::ProductNotFound(product_id),
      VerifyError::ServiceUnavailable(reason) => AppError::ProductServiceUnavailable(reason),
    }
  }
}

impl From<StoreError> for AppError {
  fn from(err: StoreError) -> Self {
    match err {
      StoreError::NotFound(id) => AppError::OrderNotFound(id.to_string()),
      StoreError::StorageUnavailable(reason) => AppError::StorageUnavailable(reason),
    }
  }
}

impl AppError {
  /// The single `error` string a client sees. Internal detail stays in the logs.
  pub fn client_message(&self) -> &'static str {
    match self {
      AppError::InvalidRequest(message) => *message,
      AppError::ProductNotFound(_) => "Product not found",
      AppError::ProductServiceUnavailable(_) => "Product service unavailable",
      AppError::OrderNotFound(_) => "Order not found",
      AppError::StorageUnavailable(_) | AppError::Config(_) | AppError::Workflow { .. } | AppError::Internal(_) => {
        "Internal server error"
      }
    }
  }
}

impl ResponseError for AppError {
  fn status_code(&self) -> StatusCode {
    match self {
      AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
      AppError::ProductNotFound(_) | AppError::OrderNotFound(_) => StatusCode::NOT_FOUND,
      AppError::ProductServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
      AppError::StorageUnavailable(_) | AppError::Config(_) | AppError::Workflow { .. } | AppError::Internal(_) => {
        StatusCode::INTERNAL_SERVER_ERROR
      }
    }
  }

  fn error_response(&self) -> HttpResponse {
    let status = self.status_code();
    if status.is_server_error() {
      tracing::error!(application_error = %self, "Responding with error");
    } else {
      tracing::info!(application_error = %self, status = status.as_u16(), "Responding with client error");
    }
    HttpResponse::build(status).json(json!({ "error": self.client_message() }))
  }
}

pub type Result<T, E = AppError> = std::result::Result<T, E>;
