//! API 라우트.
//!
//! 모든 REST API 엔드포인트를 정의하고 라우터를 구성합니다.
//!
//! # 라우트 구조
//!
//! - `/health` - 헬스 체크 (liveness)
//! - `/health/ready` - 상세 헬스 체크 (readiness)
//! - `/login`, `/refresh`, `/logout` - 쿠키 기반 토큰 발급/갱신/삭제
//! - `/protected`, `/admin` - 인증/관리자 전용 예제
//! - `/books`, `/books/search`, `/books/{id}`, `/setup-database` - 도서 카탈로그
//! - `/tasks`, `/tasks/stats` - 백그라운드 작업
//! - `/users` - 고정 사용자 예제

pub mod auth;
pub mod books;
pub mod health;
pub mod tasks;
pub mod users;

pub use auth::{auth_router, LoginRequest, ProtectedResponse};
pub use books::{books_router, SearchQuery};
pub use health::{health_router, ComponentHealth, ComponentStatus, HealthResponse};
pub use tasks::tasks_router;
pub use users::{users_router, UserResponse};

use axum::Router;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::state::AppState;

/// 단일 메시지 응답.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// 전체 API 라우터 생성.
///
/// 인증 가드가 상태를 필요로 하므로 `state`를 받습니다. 반환된 라우터에는
/// 호출자가 `with_state`로 같은 상태를 주입해야 합니다.
pub fn create_api_router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .nest("/health", health_router())
        .merge(auth_router(state))
        .merge(books_router())
        .merge(tasks_router())
        .merge(users_router())
}
