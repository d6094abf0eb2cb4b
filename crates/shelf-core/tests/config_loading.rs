//! 설정 로딩 통합 테스트
//!
//! 실제 TOML 파일과 명시적인 환경 변수 맵으로 설정 계층을 검증합니다.

use std::collections::HashMap;

use secrecy::ExposeSecret;
use shelf_core::{AppConfig, LogConfig, LogFormat, SameSite};

#[test]
fn test_missing_file_uses_defaults() {
    let path = std::env::temp_dir().join("shelf-config-does-not-exist.toml");
    let config = AppConfig::load(&path).unwrap();

    assert_eq!(config.server.port, 8000);
    assert_eq!(config.auth.access_token_ttl_minutes, 15);
    assert!(config.database.url.is_none());
}

#[test]
fn test_file_values_are_loaded() {
    let path = std::env::temp_dir().join(format!("shelf-config-{}.toml", std::process::id()));
    std::fs::write(
        &path,
        r#"
[server]
port = 9100

[auth]
jwt_secret = "from-file"
cookie_same_site = "lax"

[[auth.users]]
id = "1"
username = "reader"
password = "pw"
role = "user"
"#,
    )
    .unwrap();

    let config = AppConfig::load(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(config.server.port, 9100);
    assert_eq!(config.auth.secret().unwrap().expose_secret(), "from-file");
    assert_eq!(config.auth.cookie_same_site, Some(SameSite::Lax));
    assert_eq!(config.auth.users.len(), 1);
    assert_eq!(config.auth.users[0].username, "reader");
}

#[test]
fn test_env_overrides_file() {
    let toml = r#"
[server]
port = 9100

[logging]
format = "pretty"
"#;
    let env = HashMap::from([
        ("SHELF__SERVER__PORT".to_string(), "9200".to_string()),
        ("SHELF__LOGGING__FORMAT".to_string(), "json".to_string()),
        ("SHELF__DATABASE__URL".to_string(), "sqlite://books.db".to_string()),
    ]);

    let config = AppConfig::from_sources(toml, env).unwrap();
    assert_eq!(config.server.port, 9200);
    assert_eq!(config.database.url.as_deref(), Some("sqlite://books.db"));

    let log = LogConfig::from(&config.logging);
    assert_eq!(log.format, LogFormat::Json);
}
