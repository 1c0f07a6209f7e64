use datasources::config::Config;
use datasources::constants::{DEFAULT_DATASOURCES_PATH, DEFAULT_SERVER_URL, DEFAULT_TOKEN_ENV};
use std::io::Write;

#[test]
fn test_default_config() {
    let config = Config::default();
    assert_eq!(config.api.url, DEFAULT_SERVER_URL);
    assert_eq!(config.api.datasources_path, DEFAULT_DATASOURCES_PATH);
    assert_eq!(config.api.token_env, DEFAULT_TOKEN_ENV);
    assert!(!config.api.accept_invalid_certs);
    assert!(!config.logging.enabled);
    assert_eq!(config.logging.level, "info");
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_validation() {
    let mut config = Config::default();

    config.api.url = "ftp://server".to_string();
    assert!(config.validate().is_err());

    config.api.url = "https://server/rudder".to_string();
    config.api.datasources_path = " ".to_string();
    assert!(config.validate().is_err());

    config.api.datasources_path = DEFAULT_DATASOURCES_PATH.to_string();
    config.logging.level = "loud".to_string();
    assert!(config.validate().is_err());

    config.logging.level = "DEBUG".to_string();
    assert!(config.validate().is_ok());
}

#[test]
fn test_collection_url_joins_slashes() {
    let mut config = Config::default();
    config.api.url = "https://server/rudder/".to_string();
    config.api.datasources_path = "/api/latest/datasources".to_string();
    assert_eq!(
        config.api.collection_url(),
        "https://server/rudder/api/latest/datasources"
    );
}

#[test]
fn test_partial_config_deserialization() {
    let partial_toml = r#"
[api]
url = "https://rudder.example.com/rudder"
accept_invalid_certs = true

[logging]
enabled = true
"#;

    let config: Config = toml::from_str(partial_toml).unwrap();

    assert_eq!(config.api.url, "https://rudder.example.com/rudder");
    assert!(config.api.accept_invalid_certs);
    assert!(config.logging.enabled);

    // Unspecified values use defaults
    assert_eq!(config.api.datasources_path, DEFAULT_DATASOURCES_PATH);
    assert_eq!(config.api.token_env, DEFAULT_TOKEN_ENV);
    assert_eq!(config.logging.level, "info");
}

#[test]
fn test_empty_config_deserialization() {
    let config: Config = toml::from_str("").unwrap();
    assert_eq!(config.api.url, Config::default().api.url);
}

#[test]
fn test_load_from_file_validates() {
    let path = std::env::temp_dir().join(format!("datasources-config-test-{}.toml", std::process::id()));
    {
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "[api]\nurl = \"not-a-url\"").unwrap();
    }

    let result = Config::load_from_file(&path);
    let _ = std::fs::remove_file(&path);
    assert!(result.is_err());
}

#[test]
fn test_config_serialization() {
    let toml_str = toml::to_string_pretty(&Config::default()).unwrap();
    assert!(toml_str.contains("datasources_path = \"/api/latest/datasources\""));
    assert!(toml_str.contains("enabled = false"));
}
