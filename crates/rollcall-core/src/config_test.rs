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

fn build(map: &HashMap<&str, &str>) -> Result<AppConfig, ConfigError> {
    build_app_config(lookup_from_map(map), &FileConfig::default())
}

fn temp_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("rollcall-{}-{name}", std::process::id()))
}

#[test]
fn defaults_apply_with_empty_environment() {
    let cfg = build(&HashMap::new()).unwrap();
    assert_eq!(cfg.intercom_token, None);
    assert_eq!(cfg.intercom_api_url, "https://api.intercom.io");
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.request_timeout_secs, 30);
    assert_eq!(cfg.page_size, 150);
    assert_eq!(cfg.max_rate_limit_retries, 5);
    assert_eq!(cfg.fee_waiver_tag_id, "11173348");
    assert_eq!(cfg.product_b_prefix, "usr");
    assert_eq!(cfg.tag_name, "Recently Active on 7S1 Only");
    assert_eq!(cfg.tag_batch_size, 50);
    assert_eq!(cfg.tag_batch_delay_ms, 2000);
    assert_eq!(cfg.sample_size, 10);
    assert_eq!(cfg.sample_seed, None);
    assert!(cfg.coda_credentials().is_none());
}

#[test]
fn env_overrides_are_read() {
    let mut map = HashMap::new();
    map.insert("INTERCOM_TOKEN", "tok");
    map.insert("ROLLCALL_PAGE_SIZE", "50");
    map.insert("ROLLCALL_SAMPLE_SEED", "1234");
    map.insert("ROLLCALL_PRODUCT_B_PREFIX", "cus");
    let cfg = build(&map).unwrap();
    assert_eq!(cfg.intercom_token.as_deref(), Some("tok"));
    assert_eq!(cfg.page_size, 50);
    assert_eq!(cfg.sample_seed, Some(1234));
    assert_eq!(cfg.product_b_prefix, "cus");
}

#[test]
fn require_intercom_token_reports_missing_var() {
    let cfg = build(&HashMap::new()).unwrap();
    let result = cfg.require_intercom_token();
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref var)) if var == "INTERCOM_TOKEN"),
        "expected MissingEnvVar(INTERCOM_TOKEN), got: {result:?}"
    );
}

#[test]
fn require_intercom_token_returns_configured_token() {
    let mut map = HashMap::new();
    map.insert("INTERCOM_TOKEN", "tok");
    let cfg = build(&map).unwrap();
    assert_eq!(cfg.require_intercom_token().unwrap(), "tok");
}

#[test]
fn empty_env_value_counts_as_unset() {
    let mut map = HashMap::new();
    map.insert("INTERCOM_TOKEN", "");
    map.insert("ROLLCALL_LOG_LEVEL", "");
    let cfg = build(&map).unwrap();
    assert_eq!(cfg.intercom_token, None);
    assert_eq!(cfg.log_level, "info");
}

#[test]
fn sample_size_is_clamped() {
    let mut map = HashMap::new();
    map.insert("ROLLCALL_SAMPLE_SIZE", "500");
    let cfg = build(&map).unwrap();
    assert_eq!(cfg.sample_size, 10);
}

#[test]
fn page_size_out_of_range_fails() {
    for bad in ["0", "151"] {
        let mut map = HashMap::new();
        map.insert("ROLLCALL_PAGE_SIZE", bad);
        let result = build(&map);
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "ROLLCALL_PAGE_SIZE"),
            "expected InvalidEnvVar(ROLLCALL_PAGE_SIZE) for {bad}, got: {result:?}"
        );
    }
}

#[test]
fn zero_tag_batch_size_fails() {
    let mut map = HashMap::new();
    map.insert("ROLLCALL_TAG_BATCH_SIZE", "0");
    let result = build(&map);
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "ROLLCALL_TAG_BATCH_SIZE"),
        "expected InvalidEnvVar(ROLLCALL_TAG_BATCH_SIZE), got: {result:?}"
    );
}

#[test]
fn non_numeric_values_fail() {
    for var in [
        "ROLLCALL_REQUEST_TIMEOUT_SECS",
        "ROLLCALL_MAX_RATE_LIMIT_RETRIES",
        "ROLLCALL_TAG_BATCH_DELAY_MS",
        "ROLLCALL_SAMPLE_SEED",
    ] {
        let mut map = HashMap::new();
        map.insert(var, "not-a-number");
        let result = build(&map);
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { var: ref v, .. }) if v == var),
            "expected InvalidEnvVar({var}), got: {result:?}"
        );
    }
}

#[test]
fn file_values_fill_gaps_but_env_wins() {
    let file = FileConfig {
        intercom_token: Some("file-token".to_string()),
        coda_webhook_url: Some("https://coda.example/hook".to_string()),
        coda_api_token: Some("file-coda".to_string()),
    };
    let mut map = HashMap::new();
    map.insert("CODA_API_TOKEN", "env-coda");
    let cfg = build_app_config(lookup_from_map(&map), &file).unwrap();
    assert_eq!(cfg.intercom_token.as_deref(), Some("file-token"));
    assert_eq!(
        cfg.coda_credentials(),
        Some(("https://coda.example/hook", "env-coda"))
    );
}

#[test]
fn debug_redacts_secrets() {
    let mut map = HashMap::new();
    map.insert("INTERCOM_TOKEN", "super-secret");
    map.insert("CODA_API_TOKEN", "also-secret");
    let cfg = build(&map).unwrap();
    let rendered = format!("{cfg:?}");
    assert!(!rendered.contains("super-secret"));
    assert!(!rendered.contains("also-secret"));
    assert!(rendered.contains("[redacted]"));
}

#[test]
fn missing_config_file_is_empty() {
    let file = load_config_file(&temp_path("does-not-exist.json")).unwrap();
    assert!(file.intercom_token.is_none());
}

#[test]
fn config_file_is_parsed() {
    let path = temp_path("valid.json");
    std::fs::write(
        &path,
        r#"{"intercom_token": "abc", "coda_webhook_url": "https://coda.example/hook"}"#,
    )
    .unwrap();
    let file = load_config_file(&path).unwrap();
    std::fs::remove_file(&path).ok();
    assert_eq!(file.intercom_token.as_deref(), Some("abc"));
    assert_eq!(file.coda_api_token, None);
}

#[test]
fn malformed_config_file_fails() {
    let path = temp_path("malformed.json");
    std::fs::write(&path, "{not json").unwrap();
    let result = load_config_file(&path);
    std::fs::remove_file(&path).ok();
    assert!(
        matches!(result, Err(ConfigError::ConfigFileParse { .. })),
        "expected ConfigFileParse, got: {result:?}"
    );
}
