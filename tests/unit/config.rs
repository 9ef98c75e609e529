use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use mercadolibre_sdk::{Config, ConfigLocation, DEFAULT_API_URL, Error, Site, read_config};

fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn lookup_reads_required_and_optional_values() {
    let cfg = Config::from_lookup(lookup(&[
        ("MELI_APP_ID", "396051416295796"),
        ("MELI_APP_SECRET", "secret"),
        ("MELI_REDIRECT_URI", "https://www.example.com"),
        ("MELI_SITE", "MLA"),
        ("MELI_CLOCK_SKEW_SECS", "30"),
        ("MELI_REAUTH_STATUS", "404"),
    ]))
    .expect("config");

    assert_eq!(cfg.app_id, 396051416295796);
    assert_eq!(cfg.site, Some(Site::Argentina));
    assert_eq!(cfg.auth_url(), Some("https://auth.mercadolibre.com.ar"));
    assert_eq!(cfg.expiry_policy().clock_skew, Duration::from_secs(30));
    assert!(cfg.reauth_plan().unwrap().should_retry(reqwest::StatusCode::NOT_FOUND));
    assert_eq!(cfg.identity().unwrap().api_url(), DEFAULT_API_URL);
}

#[test]
fn lookup_reports_missing_variable() {
    let err = Config::from_lookup(lookup(&[("MELI_APP_ID", "1")])).expect_err("missing");
    match err {
        Error::Config(msg) => assert!(msg.contains("MELI_APP_SECRET")),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn lookup_rejects_non_numeric_app_id() {
    let err = Config::from_lookup(lookup(&[
        ("MELI_APP_ID", "abc"),
        ("MELI_APP_SECRET", "s"),
        ("MELI_REDIRECT_URI", "r"),
    ]))
    .expect_err("bad id");
    assert!(matches!(err, Error::Config(msg) if msg.contains("MELI_APP_ID")));
}

#[test]
fn defaults_when_optional_values_absent() {
    let cfg = Config::from_values(1, "s", "r", None, None, None, None);
    assert_eq!(cfg.expiry_policy().clock_skew, Duration::from_secs(60));
    assert!(cfg.reauth_plan().unwrap().trigger().is_none());
    assert!(cfg.request_timeout().is_none());
    assert!(cfg.auth_url().is_none());
}

#[test]
fn api_url_trailing_slash_is_trimmed() {
    let cfg = Config::from_values(1, "s", "r", Some("http://localhost:8080/".into()), None, None, None);
    assert_eq!(cfg.identity().unwrap().api_url(), "http://localhost:8080");
    assert_eq!(cfg.identity().unwrap().token_url(), "http://localhost:8080/oauth/token");
}

#[test]
fn debug_output_redacts_secret() {
    let cfg = Config::from_values(1, "super-secret", "r", None, None, None, None);
    let rendered = format!("{:?}", cfg);
    assert!(!rendered.contains("super-secret"));
    let identity = format!("{:?}", cfg.identity().unwrap());
    assert!(!identity.contains("super-secret"));
}

#[tokio::test]
async fn reads_json_file() {
    let cfg = serde_json::json!({
        "app_id": 123456,
        "app_secret": "secret",
        "redirect_uri": "https://www.example.com",
        "api_url": "http://localhost:9999",
        "site": "MLM",
        "reauth_status": 404,
        "request_timeout_secs": 5
    });
    let mut cfg_path = PathBuf::from("target");
    fs::create_dir_all(&cfg_path).ok();
    cfg_path.push("unit-config-file.json");
    fs::write(&cfg_path, serde_json::to_string(&cfg).unwrap()).unwrap();

    let cfg = read_config(ConfigLocation::File(cfg_path.to_string_lossy().to_string()))
        .await
        .expect("cfg file");
    assert_eq!(cfg.app_id, 123456);
    assert_eq!(cfg.site, Some(Site::Mexico));
    assert_eq!(cfg.api_url.as_deref(), Some("http://localhost:9999"));
    assert_eq!(cfg.request_timeout(), Some(Duration::from_secs(5)));
}

#[test]
fn unknown_site_in_file_is_rejected() {
    let mut cfg_path = PathBuf::from("target");
    fs::create_dir_all(&cfg_path).ok();
    cfg_path.push("unit-config-bad-site.json");
    fs::write(
        &cfg_path,
        r#"{"app_id":1,"app_secret":"s","redirect_uri":"r","site":"NOPE"}"#,
    )
    .unwrap();

    assert!(matches!(Config::from_file(&cfg_path), Err(Error::Config(_))));
}

#[test]
fn missing_file_is_io_error() {
    assert!(matches!(
        Config::from_file("target/does-not-exist.json"),
        Err(Error::Io(_))
    ));
}
