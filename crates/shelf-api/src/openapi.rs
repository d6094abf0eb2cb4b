//! OpenAPI 문서화 설정.
//!
//! utoipa를 사용하여 REST API의 OpenAPI 3.0 스펙을 생성합니다.
//! Swagger UI는 `/swagger-ui` 경로에서 사용 가능합니다.
//!
//! 새로운 엔드포인트를 추가할 때:
//!
//! 1. 응답/요청 타입에 `#[derive(ToSchema)]` 추가
//! 2. 핸들러에 `#[utoipa::path(...)]` 어노테이션 추가
//! 3. 이 파일의 `components(schemas(...))` 및 `paths(...)` 섹션에 추가

use axum::Router;
use shelf_core::{Book, NewBook};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::auth::{Role, TokenPair};
use crate::error::ErrorResponse;
use crate::routes::{
    ComponentHealth, ComponentStatus, HealthResponse, LoginRequest, MessageResponse,
    ProtectedResponse, UserResponse,
};
use crate::tasks::TaskStatsSnapshot;

/// Shelf API 문서.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Shelf API",
        description = r#"
# Shelf REST API

쿠키 기반 JWT 인증과 도서 카탈로그 API입니다.

## 인증

`POST /login`이 `access_token`(15분)과 `refresh_token`(7일)을
`HttpOnly` 쿠키로 설정합니다. 보호된 엔드포인트는 `access_token` 쿠키를 읽습니다.
"#,
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:8000", description = "로컬 개발 서버"),
    ),
    tags(
        (name = "health", description = "헬스 체크 - 서버 상태 확인"),
        (name = "auth", description = "인증 - 로그인, 토큰 갱신, 로그아웃, 보호된 리소스"),
        (name = "books", description = "도서 - 카탈로그 CRUD 및 저자 검색"),
        (name = "tasks", description = "작업 - 백그라운드 작업 예약"),
        (name = "users", description = "사용자 - 고정 사용자 예제")
    ),
    // ==================== 스키마 등록 ====================
    components(
        schemas(
            // ===== Health =====
            HealthResponse,
            ComponentHealth,
            ComponentStatus,

            // ===== Common =====
            ErrorResponse,
            MessageResponse,

            // ===== Auth =====
            LoginRequest,
            TokenPair,
            ProtectedResponse,
            Role,

            // ===== Books =====
            Book,
            NewBook,

            // ===== Tasks / Users =====
            TaskStatsSnapshot,
            UserResponse,
        )
    ),
    // ==================== 경로 등록 ====================
    paths(
        crate::routes::health::health_check,
        crate::routes::health::health_ready,

        crate::routes::auth::login,
        crate::routes::auth::refresh,
        crate::routes::auth::logout,
        crate::routes::auth::protected,
        crate::routes::auth::admin,

        crate::routes::books::list_books,
        crate::routes::books::search_books,
        crate::routes::books::get_book,
        crate::routes::books::create_book,
        crate::routes::books::update_book,
        crate::routes::books::delete_book,
        crate::routes::books::setup_database,

        crate::routes::tasks::schedule_tasks,
        crate::routes::tasks::task_stats,

        crate::routes::users::get_user,
    )
)]
pub struct ApiDoc;

/// Swagger UI 라우터 생성.
///
/// 다음 경로에 문서 UI를 마운트합니다:
/// - `/swagger-ui` - Swagger UI 대화형 문서
/// - `/api-docs/openapi.json` - OpenAPI JSON 스펙
pub fn swagger_ui_router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    SwaggerUi::new("/swagger-ui")
        .url("/api-docs/openapi.json", ApiDoc::openapi())
        .into()
}
