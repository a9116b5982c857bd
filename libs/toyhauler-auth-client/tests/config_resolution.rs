//! Root URL resolution through the well-known config location.
#![cfg(not(target_os = "windows"))]

use std::fs;

use tempfile::tempdir;
use toyhauler_auth_client::{AuthClient, AuthClientConfig, AuthClientError, ConfigError, DEFAULT_API_AUTH_URL};

fn write_home_config(home: &std::path::Path, contents: &str) {
    let folder = home.join(".config/toyhauler-auth-client");
    fs::create_dir_all(&folder).unwrap();
    fs::write(folder.join("config.json"), contents).unwrap();
}

#[test]
fn no_config_file_uses_default() {
    let home = tempdir().unwrap();
    temp_env::with_var("HOME", Some(home.path().to_str().unwrap()), || {
        let client = AuthClient::new(None).unwrap();
        assert_eq!(client.auth_api_root_url(), DEFAULT_API_AUTH_URL);
    });
}

#[test]
fn config_file_url_is_used() {
    let home = tempdir().unwrap();
    write_home_config(home.path(), r#"{"authApiBaseUrl":"https://auth.example.com"}"#);

    temp_env::with_var("HOME", Some(home.path().to_str().unwrap()), || {
        let client = AuthClient::new(None).unwrap();
        assert_eq!(client.auth_api_root_url(), "https://auth.example.com");
    });
}

#[test]
fn explicit_url_beats_config_file() {
    let home = tempdir().unwrap();
    write_home_config(home.path(), r#"{"authApiBaseUrl":"https://auth.example.com"}"#);

    temp_env::with_var("HOME", Some(home.path().to_str().unwrap()), || {
        let client = AuthClient::new(Some("https://override.example.com")).unwrap();
        assert_eq!(client.auth_api_root_url(), "https://override.example.com");
    });
}

#[test]
fn config_with_comments_is_rejected_by_default_loader() {
    let home = tempdir().unwrap();
    write_home_config(
        home.path(),
        "{\n  // staging\n  \"authApiBaseUrl\": \"https://staging.example.com\"\n}",
    );

    temp_env::with_var("HOME", Some(home.path().to_str().unwrap()), || {
        let err = AuthClient::new(None).unwrap_err();
        assert!(
            matches!(err, AuthClientError::Config(ConfigError::Parse { .. })),
            "got {err:?}"
        );

        let cfg = AuthClientConfig::loader()
            .with_comments(true)
            .load()
            .unwrap()
            .unwrap();
        assert_eq!(
            cfg.auth_api_base_url.as_deref(),
            Some("https://staging.example.com")
        );
    });
}

#[test]
fn wrong_value_type_fails_loudly() {
    let home = tempdir().unwrap();
    write_home_config(home.path(), r#"{"authApiBaseUrl":42}"#);

    temp_env::with_var("HOME", Some(home.path().to_str().unwrap()), || {
        assert!(matches!(
            AuthClient::new(None),
            Err(AuthClientError::Config(ConfigError::Parse { .. }))
        ));
    });
}

#[test]
fn missing_home_fails_construction() {
    temp_env::with_var_unset("HOME", || {
        assert!(matches!(
            AuthClient::new(None),
            Err(AuthClientError::Config(ConfigError::HomeMissing))
        ));
    });
}

#[test]
fn saved_config_is_picked_up() {
    let home = tempdir().unwrap();
    temp_env::with_var("HOME", Some(home.path().to_str().unwrap()), || {
        AuthClientConfig::loader()
            .save(&AuthClientConfig {
                auth_api_base_url: Some("https://saved.example.com".to_owned()),
            })
            .unwrap();

        let client = AuthClient::new(None).unwrap();
        assert_eq!(client.auth_api_root_url(), "https://saved.example.com");
    });
}
