use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

/// Returns a map with all required env vars populated.
fn full_env<'a>() -> HashMap<&'a str, &'a str> {
    let mut m = HashMap::new();
    m.insert("SERPAPI_API_KEY", "serp-test-key");
    m.insert("MISTRAL_API_KEY", "mistral-test-key");
    m
}

#[test]
fn build_app_config_fails_without_serpapi_key() {
    let mut map: HashMap<&str, &str> = HashMap::new();
    map.insert("MISTRAL_API_KEY", "mistral-test-key");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "SERPAPI_API_KEY"),
        "expected MissingEnvVar(SERPAPI_API_KEY), got: {result:?}"
    );
}

#[test]
fn build_app_config_fails_without_mistral_key() {
    let mut map: HashMap<&str, &str> = HashMap::new();
    map.insert("SERPAPI_API_KEY", "serp-test-key");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "MISTRAL_API_KEY"),
        "expected MissingEnvVar(MISTRAL_API_KEY), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_blank_serpapi_key() {
    let mut map = full_env();
    map.insert("SERPAPI_API_KEY", "   ");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::EmptyEnvVar(ref v)) if v == "SERPAPI_API_KEY"),
        "expected EmptyEnvVar(SERPAPI_API_KEY), got: {result:?}"
    );
}

#[test]
fn build_app_config_succeeds_with_all_required_vars() {
    let map = full_env();
    let result = build_app_config(lookup_from_map(&map));
    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    let cfg = result.unwrap();
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.serpapi_api_key, "serp-test-key");
    assert_eq!(cfg.mistral_api_key, "mistral-test-key");
    assert_eq!(cfg.search_engine, "google");
    assert_eq!(cfg.mistral_model, "mistral-large-latest");
    assert!(cfg.temperature.abs() < f32::EPSILON);
    assert_eq!(cfg.request_timeout_secs, 30);
    assert!(cfg.serpapi_base_url.is_none());
    assert!(cfg.mistral_base_url.is_none());
}

#[test]
fn build_app_config_reads_overrides() {
    let mut map = full_env();
    map.insert("NEWSMOOD_MISTRAL_MODEL", "mistral-small-latest");
    map.insert("NEWSMOOD_SEARCH_ENGINE", "google_news");
    map.insert("NEWSMOOD_REQUEST_TIMEOUT_SECS", "5");
    map.insert("NEWSMOOD_SERPAPI_BASE_URL", "http://127.0.0.1:9000");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.mistral_model, "mistral-small-latest");
    assert_eq!(cfg.search_engine, "google_news");
    assert_eq!(cfg.request_timeout_secs, 5);
    assert_eq!(
        cfg.serpapi_base_url.as_deref(),
        Some("http://127.0.0.1:9000")
    );
}

#[test]
fn blank_base_url_override_is_ignored() {
    let mut map = full_env();
    map.insert("NEWSMOOD_MISTRAL_BASE_URL", "");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(cfg.mistral_base_url.is_none());
}

#[test]
fn request_timeout_invalid() {
    let mut map = full_env();
    map.insert("NEWSMOOD_REQUEST_TIMEOUT_SECS", "not-a-number");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "NEWSMOOD_REQUEST_TIMEOUT_SECS"),
        "expected InvalidEnvVar(NEWSMOOD_REQUEST_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn temperature_out_of_range() {
    let mut map = full_env();
    map.insert("NEWSMOOD_TEMPERATURE", "3.0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "NEWSMOOD_TEMPERATURE"),
        "expected InvalidEnvVar(NEWSMOOD_TEMPERATURE), got: {result:?}"
    );
}

#[test]
fn debug_output_redacts_api_keys() {
    let cfg = build_app_config(lookup_from_map(&full_env())).unwrap();
    let rendered = format!("{cfg:?}");
    assert!(!rendered.contains("serp-test-key"));
    assert!(!rendered.contains("mistral-test-key"));
    assert!(rendered.contains("[redacted]"));
}

#[test]
fn unrelated_env_vars_do_not_affect_loading() {
    let mut map = full_env();
    map.insert("NEWSMOOD_ENV", "staging");
    let result = build_app_config(lookup_from_map(&map));
    assert!(result.is_ok(), "expected Ok, got: {result:?}");
}
