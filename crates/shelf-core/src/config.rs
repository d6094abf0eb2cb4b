//! 설정 관리.
//!
//! 설정은 세 단계로 병합됩니다:
//! 1. 구조체 기본값
//! 2. TOML 파일 (선택)
//! 3. `SHELF__` 접두사 환경 변수 (예: `SHELF__SERVER__PORT=8080`)

use std::collections::HashMap;
use std::path::Path;

use config::{Config, ConfigError, Environment, File, FileFormat};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};

/// 환경 변수 접두사.
pub const ENV_PREFIX: &str = "SHELF";

/// 기본 설정 파일 경로.
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// 애플리케이션 설정.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// 서버 설정
    pub server: ServerConfig,
    /// 인증 설정
    pub auth: AuthConfig,
    /// 데이터베이스 설정
    pub database: DatabaseConfig,
    /// 로깅 설정
    pub logging: LoggingConfig,
    /// CORS 설정
    pub cors: CorsConfig,
}

/// 서버 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// 바인딩할 호스트
    pub host: String,
    /// 리스닝할 포트
    pub port: u16,
    /// 요청 타임아웃 (초)
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            request_timeout_secs: 30,
        }
    }
}

impl ServerConfig {
    /// `host:port` 형식의 바인딩 주소.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 쿠키 SameSite 속성.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SameSite {
    Strict,
    Lax,
    None,
}

impl SameSite {
    /// `Set-Cookie` 헤더에 쓰이는 값.
    pub fn as_attribute(&self) -> &'static str {
        match self {
            SameSite::Strict => "Strict",
            SameSite::Lax => "Lax",
            SameSite::None => "None",
        }
    }
}

/// 설정 파일로 주입되는 사용자 항목.
///
/// 비밀번호는 평문으로 주어지며 서버 시작 시 한 번 해싱됩니다.
#[derive(Clone, Deserialize, Serialize)]
pub struct SeedUser {
    pub id: String,
    pub username: String,
    pub password: String,
    pub role: String,
}

impl std::fmt::Debug for SeedUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SeedUser")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("role", &self.role)
            .finish()
    }
}

/// 인증 설정.
#[derive(Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AuthConfig {
    /// JWT 서명 비밀 키 (HS256)
    pub jwt_secret: Option<String>,
    /// Access Token 만료 시간 (분)
    pub access_token_ttl_minutes: i64,
    /// Refresh Token 만료 시간 (일)
    pub refresh_token_ttl_days: i64,
    /// 쿠키에 `Secure` 속성 추가 여부
    pub cookie_secure: bool,
    /// 쿠키 `SameSite` 속성 (미설정 시 생략)
    pub cookie_same_site: Option<SameSite>,
    /// 사용자 목록 (비어 있으면 내장 기본 사용자 사용)
    pub users: Vec<SeedUser>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: None,
            access_token_ttl_minutes: 15,
            refresh_token_ttl_days: 7,
            cookie_secure: false,
            cookie_same_site: None,
            users: Vec::new(),
        }
    }
}

impl AuthConfig {
    /// 설정된 JWT 비밀 키를 `SecretString`으로 반환합니다.
    pub fn secret(&self) -> Option<SecretString> {
        self.jwt_secret
            .as_ref()
            .filter(|s| !s.is_empty())
            .map(|s| SecretString::from(s.clone()))
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &self.jwt_secret.as_ref().map(|_| "[REDACTED]"))
            .field("access_token_ttl_minutes", &self.access_token_ttl_minutes)
            .field("refresh_token_ttl_days", &self.refresh_token_ttl_days)
            .field("cookie_secure", &self.cookie_secure)
            .field("cookie_same_site", &self.cookie_same_site)
            .field("users", &self.users)
            .finish()
    }
}

/// 데이터베이스 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// SQLite 연결 URL (예: `sqlite://books.db?mode=rwc`). 없으면 메모리 저장소 사용.
    pub url: Option<String>,
    /// 최대 연결 수
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: 5,
        }
    }
}

/// 로깅 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 로그 레벨
    pub level: String,
    /// 출력 형식 ("pretty" | "json" | "compact")
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "shelf_api=info,tower_http=debug".to_string(),
            format: "pretty".to_string(),
        }
    }
}

/// CORS 설정.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct CorsConfig {
    /// 허용 origin 목록 (비어 있으면 모든 origin 허용)
    pub origins: Vec<String>,
}

impl AppConfig {
    /// 파일과 환경 변수에서 설정을 로드합니다.
    ///
    /// 파일이 없으면 기본값과 환경 변수만 사용합니다.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .add_source(File::from(path.as_ref()).required(false))
            .add_source(env_source(None));

        builder.build()?.try_deserialize()
    }

    /// 기본 경로(또는 `SHELF_CONFIG`)에서 설정을 로드합니다.
    pub fn load_default() -> Result<Self, ConfigError> {
        let path = std::env::var("SHELF_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load(path)
    }

    /// TOML 문자열과 명시적인 환경 변수 맵에서 설정을 구성합니다.
    ///
    /// 프로세스 환경을 읽지 않으므로 테스트에서 사용합니다.
    pub fn from_sources(toml: &str, env: HashMap<String, String>) -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .add_source(env_source(Some(env)));

        builder.build()?.try_deserialize()
    }
}

fn env_source(source: Option<HashMap<String, String>>) -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .separator("__")
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key("cors.origins")
        .source(source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.auth.access_token_ttl_minutes, 15);
        assert_eq!(config.auth.refresh_token_ttl_days, 7);
        assert!(!config.auth.cookie_secure);
        assert!(config.auth.cookie_same_site.is_none());
        assert!(config.auth.secret().is_none());
        assert!(config.database.url.is_none());
    }

    #[test]
    fn test_from_toml_and_env() {
        let toml = r#"
            [server]
            port = 9000

            [auth]
            jwt_secret = "file-secret"
            cookie_same_site = "lax"

            [[auth.users]]
            id = "1"
            username = "alice"
            password = "wonderland"
            role = "admin"
        "#;

        let mut env = HashMap::new();
        env.insert("SHELF__SERVER__HOST".to_string(), "0.0.0.0".to_string());
        env.insert("SHELF__AUTH__ACCESS_TOKEN_TTL_MINUTES".to_string(), "5".to_string());

        let config = AppConfig::from_sources(toml, env).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.bind_address(), "0.0.0.0:9000");
        assert_eq!(config.auth.access_token_ttl_minutes, 5);
        assert_eq!(config.auth.refresh_token_ttl_days, 7);
        assert_eq!(config.auth.cookie_same_site, Some(SameSite::Lax));
        assert_eq!(config.auth.users.len(), 1);
        assert_eq!(config.auth.users[0].username, "alice");
        assert_eq!(
            config.auth.secret().unwrap().expose_secret(),
            "file-secret"
        );
    }

    #[test]
    fn test_env_overrides_file() {
        let toml = "[auth]\njwt_secret = \"file-secret\"\n";
        let mut env = HashMap::new();
        env.insert("SHELF__AUTH__JWT_SECRET".to_string(), "env-secret".to_string());

        let config = AppConfig::from_sources(toml, env).unwrap();
        assert_eq!(config.auth.secret().unwrap().expose_secret(), "env-secret");
    }

    #[test]
    fn test_empty_secret_is_none() {
        let config = AppConfig::from_sources("[auth]\njwt_secret = \"\"\n", HashMap::new()).unwrap();
        assert!(config.auth.secret().is_none());
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let toml = r#"
            [auth]
            jwt_secret = "super-secret"

            [[auth.users]]
            id = "1"
            username = "alice"
            password = "wonderland"
            role = "user"
        "#;
        let config = AppConfig::from_sources(toml, HashMap::new()).unwrap();
        let debug = format!("{:?}", config);
        assert!(!debug.contains("super-secret"));
        assert!(!debug.contains("wonderland"));
        assert!(debug.contains("alice"));
    }

    #[test]
    fn test_same_site_attribute() {
        assert_eq!(SameSite::Strict.as_attribute(), "Strict");
        assert_eq!(SameSite::Lax.as_attribute(), "Lax");
        assert_eq!(SameSite::None.as_attribute(), "None");
    }
}
