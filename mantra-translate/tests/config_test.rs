//! Tests for translation client configuration

use mantra_translate::{HttpTranslator, RetryConfig, TranslateConfig};

#[test]
fn test_valid_config() {
    let config = TranslateConfig::new("https://translate.example.com/api");
    assert!(config.validate().is_ok());
}

#[test]
fn test_empty_endpoint_rejected() {
    let config = TranslateConfig::new("");
    assert!(config.validate().is_err());
}

#[test]
fn test_non_http_endpoint_rejected() {
    let config = TranslateConfig::new("ftp://translate.example.com");
    assert!(config.validate().is_err());
}

#[test]
fn test_oversized_endpoint_rejected() {
    let config = TranslateConfig::new(format!("https://{}", "a".repeat(3000)));
    assert!(config.validate().is_err());
}

#[test]
fn test_zero_timeout_rejected() {
    let mut config = TranslateConfig::new("https://translate.example.com");
    config.timeout_secs = 0;
    assert!(config.validate().is_err());
}

#[test]
fn test_retry_delays_ordered() {
    let mut retry = RetryConfig::default();
    retry.initial_delay_ms = 10_000;
    retry.max_delay_ms = 100;
    assert!(retry.validate().is_err());
}

#[test]
fn test_client_rejects_invalid_config() {
    let config = TranslateConfig::new("not-a-url");
    assert!(HttpTranslator::new(config).is_err());
}
