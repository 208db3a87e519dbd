// tests/config_tests.rs

use order_service::config::AppConfig;
use std::collections::HashMap;
use std::time::Duration;

fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
  let vars: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
  move |name| vars.get(name).cloned()
}

#[test]
fn defaults_apply_when_only_database_url_is_set() {
  let config = AppConfig::from_lookup(lookup_from(&[("DATABASE_URL", "postgres://localhost/orders")])).unwrap();

  assert_eq!(config.server_host, "0.0.0.0");
  assert_eq!(config.server_port, 8003);
  assert_eq!(config.database_url, "postgres://localhost/orders");
  assert_eq!(config.database_max_connections, 5);
  assert_eq!(config.product_service_url, "http://product-service:8002");
  assert_eq!(config.product_service_timeout, Duration::from_secs(5));
  assert_eq!(config.broker_url, "broker:9092");
  assert_eq!(config.orders_topic, "orders");
}

#[test]
fn explicit_values_override_defaults() {
  let config = AppConfig::from_lookup(lookup_from(&[
    ("DATABASE_URL", "postgres://db/orders"),
    ("SERVER_HOST", "127.0.0.1"),
    ("SERVER_PORT", "9000"),
    ("DATABASE_MAX_CONNECTIONS", "20"),
    ("PRODUCT_SERVICE_URL", "http://localhost:8002/products"),
    ("PRODUCT_SERVICE_TIMEOUT_MS", "750"),
    ("BROKER_URL", "localhost:19092"),
    ("ORDERS_TOPIC", "orders.v2"),
  ]))
  .unwrap();

  assert_eq!(config.server_host, "127.0.0.1");
  assert_eq!(config.server_port, 9000);
  assert_eq!(config.database_max_connections, 20);
  assert_eq!(config.product_service_url, "http://localhost:8002/products");
  assert_eq!(config.product_service_timeout, Duration::from_millis(750));
  assert_eq!(config.broker_url, "localhost:19092");
  assert_eq!(config.orders_topic, "orders.v2");
}

#[test]
fn missing_database_url_is_a_config_error() {
  let err = AppConfig::from_lookup(lookup_from(&[])).unwrap_err();
  assert!(err.to_string().contains("DATABASE_URL"), "{}", err);
}

#[test]
fn unparsable_numbers_are_config_errors() {
  for (name, value) in [
    ("SERVER_PORT", "eighty"),
    ("SERVER_PORT", "70000"),
    ("DATABASE_MAX_CONNECTIONS", "-1"),
    ("PRODUCT_SERVICE_TIMEOUT_MS", "5s"),
  ] {
    let err = AppConfig::from_lookup(lookup_from(&[("DATABASE_URL", "postgres://db/orders"), (name, value)]))
      .unwrap_err();
    assert!(err.to_string().contains(name), "{} = {}: {}", name, value, err);
  }
}

#[test]
fn empty_topic_is_rejected() {
  let err = AppConfig::from_lookup(lookup_from(&[("DATABASE_URL", "postgres://db/orders"), ("ORDERS_TOPIC", " ")]))
    .unwrap_err();
  assert!(err.to_string().contains("ORDERS_TOPIC"));
}
