//! REST API 서버.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - Axum 기반 REST API
//! - 쿠키 기반 JWT 인증 (Access/Refresh Token)
//! - 도서 카탈로그 (메모리/SQLite 저장소)
//! - 헬스 체크 엔드포인트
//! - Prometheus 메트릭
//!
//! # 모듈 구성
//!
//! - [`state`]: 애플리케이션 공유 상태 (AppState)
//! - [`routes`]: REST API 엔드포인트
//! - [`auth`]: JWT 인증 및 권한 관리
//! - [`repository`]: 도서 저장소
//! - [`tasks`]: 백그라운드 작업
//! - [`metrics`]: Prometheus 메트릭 수집
//! - [`middleware`]: HTTP 미들웨어
//! - [`openapi`]: OpenAPI 문서 및 Swagger UI

pub mod auth;
pub mod error;
pub mod metrics;
pub mod middleware;
pub mod openapi;
pub mod repository;
pub mod routes;
pub mod state;
pub mod tasks;

pub use auth::{hash_password, verify_password, Claims, Role, TokenIssuer, TokenVerifier};
pub use error::{ApiError, ApiResult, ErrorResponse};
pub use metrics::setup_metrics_recorder;
pub use middleware::metrics_layer;
pub use repository::{BookRepository, InMemoryBookRepository, SqliteBookRepository};
pub use routes::*;
pub use state::AppState;

#[cfg(any(test, feature = "test-utils"))]
pub use state::create_test_state;
