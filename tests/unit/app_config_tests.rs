/*!
 * Tests for application configuration
 */

use std::str::FromStr;
use msgwai::app_config::{Config, TranslationProvider};

/// Test the shipped defaults
#[test]
fn test_default_config_shouldUseExpectedDefaults() {
    let config = Config::default();

    assert_eq!(config.translation.provider, TranslationProvider::OpenAI);
    assert_eq!(config.source_encoding, "windows-1251");
    assert_eq!(config.translation.common.temperature, 0.0);
    assert_eq!(config.translation.concurrent_files, 4);
    assert_eq!(config.translation.max_tokens_per_batch, 16384);
    assert_eq!(config.translation.get_model(), "gpt-4");
}

/// Test that an explicit model overrides the provider default
#[test]
fn test_get_model_withExplicitModel_shouldOverrideDefault() {
    let mut config = Config::default();
    config.translation.model = "gpt-3.5-turbo-16k".to_string();
    assert_eq!(config.translation.get_model(), "gpt-3.5-turbo-16k");
}

/// Test that remote providers require an API key
#[test]
fn test_validate_withMissingApiKey_shouldFail() {
    let config = Config::default();
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.translation.provider = TranslationProvider::Anthropic;
    assert!(config.validate().is_err());
}

/// Test that the mock provider validates without an API key
#[test]
fn test_validate_withMockProvider_shouldPassWithoutApiKey() {
    let mut config = Config::default();
    config.translation.provider = TranslationProvider::Mock;
    assert!(config.validate().is_ok());
}

/// Test that an unknown encoding label is rejected up front
#[test]
fn test_validate_withUnknownEncoding_shouldFail() {
    let mut config = Config::default();
    config.translation.provider = TranslationProvider::Mock;
    config.source_encoding = "klingon-8".to_string();
    assert!(config.validate().is_err());
}

/// Test the temperature bounds
#[test]
fn test_validate_withOutOfRangeTemperature_shouldFail() {
    let mut config = Config::default();
    config.translation.provider = TranslationProvider::Mock;
    config.translation.common.temperature = 3.0;
    assert!(config.validate().is_err());
}

/// Test that zero concurrency is rejected
#[test]
fn test_validate_withZeroConcurrency_shouldFail() {
    let mut config = Config::default();
    config.translation.provider = TranslationProvider::Mock;
    config.translation.concurrent_files = 0;
    assert!(config.validate().is_err());
}

/// Test provider round trip through FromStr and Display
#[test]
fn test_provider_fromStrAndDisplay_shouldRoundTrip() {
    for provider in [
        TranslationProvider::OpenAI,
        TranslationProvider::Anthropic,
        TranslationProvider::Mock,
    ] {
        let text = provider.to_string();
        assert_eq!(TranslationProvider::from_str(&text).unwrap(), provider);
    }

    assert!(TranslationProvider::from_str("ollama").is_err());
}

/// Test that an empty JSON object deserializes to the full default config
#[test]
fn test_config_fromEmptyJson_shouldApplyDefaults() {
    let config: Config = serde_json::from_str("{}").unwrap();
    assert_eq!(config.source_encoding, "windows-1251");
    assert_eq!(config.translation.provider, TranslationProvider::OpenAI);
}

/// Test JSON serialization round trip
#[test]
fn test_config_serdeRoundTrip_shouldPreserveValues() {
    let mut config = Config::default();
    config.translation.provider = TranslationProvider::Anthropic;
    config.translation.api_key = "secret".to_string();
    config.translation.common.temperature = 0.8;

    let json = serde_json::to_string(&config).unwrap();
    let parsed: Config = serde_json::from_str(&json).unwrap();

    assert_eq!(parsed.translation.provider, TranslationProvider::Anthropic);
    assert_eq!(parsed.translation.api_key, "secret");
    assert_eq!(parsed.translation.common.temperature, 0.8);
}
