use super::*;
use std::io::Write;

#[test]
fn test_default_config() {
    let config = Config::default();

    assert_eq!(config.network.timeout, None);
    assert_eq!(config.network.max_idle_per_host, 10);
    assert_eq!(config.quay.api_url, "https://quay.io/api/v1/repository");
}

#[test]
fn test_from_str_empty_yaml() {
    let config = Config::from_yaml_str("").unwrap();
    // Should be equivalent to default
    assert_eq!(config, Config::default());
}

#[test]
fn test_from_str_partial_yaml() {
    let yaml = r#"
network:
  timeout: 60
"#;
    let config = Config::from_yaml_str(yaml).unwrap();

    assert_eq!(config.network.timeout, Some(60));
    assert_eq!(config.network.max_idle_per_host, 10); // Default
    assert_eq!(config.quay.api_url, DEFAULT_API_URL); // Default
}

#[test]
fn test_from_str_full_yaml() {
    let yaml = r#"
network:
  timeout: 5
  max_idle_per_host: 2
quay:
  api_url: "http://localhost:8080/api/v1/repository"
"#;
    let config = Config::from_yaml_str(yaml).unwrap();

    assert_eq!(config.network.timeout, Some(5));
    assert_eq!(config.network.max_idle_per_host, 2);
    assert_eq!(config.quay.api_url, "http://localhost:8080/api/v1/repository");
}

#[test]
fn test_from_str_invalid_value() {
    let yaml = r#"
network:
  timeout: soon
"#;
    let err = Config::from_yaml_str(yaml).unwrap_err();
    assert!(matches!(err, RegistryError::Config { .. }));
}

#[test]
fn test_network_client_config() {
    let network = Network {
        timeout: Some(7),
        max_idle_per_host: 3,
    };
    let client_config = network.client_config();
    assert_eq!(client_config.timeout_seconds, Some(7));
    assert_eq!(client_config.max_idle_per_host, 3);
}

#[test]
fn test_network_default_sets_no_request_timeout() {
    let client_config = Network::default().client_config();
    assert_eq!(client_config.timeout_seconds, None);
    assert_eq!(client_config.max_idle_per_host, 10);
}

#[test]
fn test_load_without_path_returns_defaults() {
    let config = Config::load(None).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_load_from_file() {
    let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    writeln!(file, "quay:\n  api_url: \"http://mirror.local/api/v1/repository\"").unwrap();

    let config = Config::load(Some(file.path())).unwrap();
    assert_eq!(config.quay.api_url, "http://mirror.local/api/v1/repository");
    assert_eq!(config.network.timeout, None);
}

#[test]
fn test_load_missing_file_fails_with_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.yaml");

    let err = Config::load(Some(&path)).unwrap_err();
    match err {
        RegistryError::Config { path: Some(p), .. } => assert!(p.ends_with("missing.yaml")),
        other => panic!("Expected Config error with path, got {:?}", other),
    }
}
