// order_service/src/models/product.rs

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// What the product service tells us about a product.
///
/// Only `title` is required; whatever else the service sends is kept as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductInfo {
  pub title: String,
  #[serde(flatten)]
  pub extra: Map<String, Value>,
}

impl ProductInfo {
  pub fn titled(title: impl Into<String>) -> Self {
    Self {
      title: title.into(),
      extra: Map::new(),
    }
  }
}
