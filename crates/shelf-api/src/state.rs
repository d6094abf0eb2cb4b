//! 모든 핸들러에서 공유되는 애플리케이션 상태.
//!
//! `main`에서 한 번 구성되어 `Arc<AppState>`로 axum `State`에 주입됩니다.
//! 자격증명 저장소와 토큰 키는 시작 이후 변경되지 않습니다.

use std::sync::Arc;

use chrono::Duration;
use secrecy::SecretString;
use shelf_core::{AuthConfig, ShelfError};

use crate::auth::{CookiePolicy, CredentialStore, TokenIssuer, TokenVerifier};
use crate::repository::BookRepository;
use crate::tasks::{TaskDurations, TaskStats};

/// 애플리케이션 공유 상태.
#[derive(Clone)]
pub struct AppState {
    /// 토큰 발급기
    pub issuer: Arc<TokenIssuer>,

    /// 토큰 검증기 (라우트 가드에서 사용)
    pub verifier: Arc<TokenVerifier>,

    /// 읽기 전용 자격증명 저장소
    pub credentials: Arc<CredentialStore>,

    /// `Set-Cookie` 속성 정책
    pub cookies: CookiePolicy,

    /// 도서 저장소 (메모리 또는 SQLite)
    pub books: Arc<dyn BookRepository>,

    /// 백그라운드 작업 카운터
    pub tasks: Arc<TaskStats>,

    /// 백그라운드 작업 실행 시간
    pub task_durations: TaskDurations,

    /// 서버 시작 시간 (업타임 계산용)
    pub started_at: chrono::DateTime<chrono::Utc>,

    /// API 버전
    pub version: String,
}

impl AppState {
    /// 인증 설정과 서명 키, 도서 저장소로 상태를 구성합니다.
    ///
    /// # Errors
    ///
    /// 설정된 사용자 목록이나 토큰 수명이 잘못되었으면 [`ShelfError::Config`]를
    /// 반환합니다.
    pub fn new(
        auth: &AuthConfig,
        secret: &SecretString,
        books: Arc<dyn BookRepository>,
    ) -> Result<Self, ShelfError> {
        let issuer = TokenIssuer::new(
            secret,
            token_ttl(
                "access_token_ttl_minutes",
                auth.access_token_ttl_minutes,
                Duration::try_minutes,
            )?,
            token_ttl(
                "refresh_token_ttl_days",
                auth.refresh_token_ttl_days,
                Duration::try_days,
            )?,
        );

        Ok(Self {
            issuer: Arc::new(issuer),
            verifier: Arc::new(TokenVerifier::new(secret)),
            credentials: Arc::new(CredentialStore::from_config(auth)?),
            cookies: CookiePolicy::from_config(auth),
            books,
            tasks: Arc::new(TaskStats::default()),
            task_durations: TaskDurations::default(),
            started_at: chrono::Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        })
    }

    /// 백그라운드 작업 실행 시간 설정.
    pub fn with_task_durations(mut self, durations: TaskDurations) -> Self {
        self.task_durations = durations;
        self
    }

    /// 서버 업타임 (초).
    pub fn uptime_secs(&self) -> i64 {
        (chrono::Utc::now() - self.started_at).num_seconds()
    }

    /// 도서 저장소 연결 상태 확인.
    pub async fn is_book_store_healthy(&self) -> bool {
        self.books.is_healthy().await
    }
}

/// 설정된 토큰 수명을 `Duration`으로 변환합니다.
///
/// 0 이하이거나 만료 시각을 계산할 수 없을 만큼 큰 값은 설정 에러입니다.
fn token_ttl(
    field: &str,
    value: i64,
    to_duration: fn(i64) -> Option<Duration>,
) -> Result<Duration, ShelfError> {
    if value <= 0 {
        return Err(ShelfError::Config(format!(
            "auth.{} must be positive, got {}",
            field, value
        )));
    }

    to_duration(value)
        .filter(|ttl| chrono::Utc::now().checked_add_signed(*ttl).is_some())
        .ok_or_else(|| ShelfError::Config(format!("auth.{} is out of range: {}", field, value)))
}

/// 테스트용 AppState 생성.
///
/// 기본 사용자, 시드 도서가 든 메모리 저장소, 즉시 끝나는 백그라운드 작업을 사용합니다.
#[cfg(any(test, feature = "test-utils"))]
pub fn create_test_state() -> AppState {
    use crate::repository::InMemoryBookRepository;

    let secret = SecretString::from("test-secret-key-for-jwt-testing-minimum-32-chars".to_string());
    AppState::new(
        &AuthConfig::default(),
        &secret,
        Arc::new(InMemoryBookRepository::seeded()),
    )
    .expect("default test state")
    .with_task_durations(TaskDurations::instant())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_uses_configured_ttls() {
        let auth = AuthConfig {
            access_token_ttl_minutes: 5,
            refresh_token_ttl_days: 1,
            ..AuthConfig::default()
        };
        let secret = SecretString::from("k".to_string());
        let state = AppState::new(
            &auth,
            &secret,
            Arc::new(crate::repository::InMemoryBookRepository::new()),
        )
        .unwrap();

        assert_eq!(
            state.issuer.ttl(crate::auth::TokenKind::Access),
            Duration::minutes(5)
        );
        assert_eq!(
            state.issuer.ttl(crate::auth::TokenKind::Refresh),
            Duration::days(1)
        );
        assert_eq!(state.credentials.len(), 2);
    }

    #[test]
    fn test_invalid_ttls_are_config_errors() {
        let secret = SecretString::from("k".to_string());
        let cases = [
            (0, 7),
            (-5, 7),
            (i64::MAX, 7),
            (15, 0),
            (15, -1),
            (15, i64::MAX),
            (15, 10_000_000_000),
        ];

        for (access, refresh) in cases {
            let auth = AuthConfig {
                access_token_ttl_minutes: access,
                refresh_token_ttl_days: refresh,
                ..AuthConfig::default()
            };
            let result = AppState::new(
                &auth,
                &secret,
                Arc::new(crate::repository::InMemoryBookRepository::new()),
            );
            assert!(
                matches!(result, Err(ShelfError::Config(_))),
                "expected config error for ({}, {})",
                access,
                refresh
            );
        }
    }

    #[tokio::test]
    async fn test_create_test_state() {
        let state = create_test_state();
        assert!(state.is_book_store_healthy().await);
        assert_eq!(state.books.list().await.unwrap().len(), 2);
        assert!(state.uptime_secs() >= 0);
    }
}
