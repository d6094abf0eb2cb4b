//! 인증 endpoint.
//!
//! | 경로 | 가드 | 실패 |
//! |---|---|---|
//! | `POST /login` | - | 401 |
//! | `POST /refresh` | `refresh_token` 쿠키 | 403 |
//! | `POST /logout` | - | - |
//! | `GET /protected` | [`require_access_token`] | 401 |
//! | `GET /admin` | [`require_admin`] | 401, 403 |
//!
//! 토큰은 응답 본문과 `HttpOnly` 쿠키 두 곳으로 전달됩니다.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header::SET_COOKIE, HeaderMap},
    middleware,
    response::{AppendHeaders, IntoResponse},
    routing::{get, post},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use utoipa::ToSchema;

use super::MessageResponse;
use crate::auth::{
    get_cookie, require_access_token, require_admin, AuthError, Claims, CookiePolicy, Role,
    TokenKind, TokenPair, ACCESS_COOKIE_NAME, REFRESH_COOKIE_NAME,
};
use crate::error::{ApiError, ApiResult, ErrorResponse};
use crate::metrics::{record_login_attempt, record_token_refresh};
use crate::state::AppState;

/// 로그인 요청.
#[derive(Deserialize, ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// `GET /protected` 응답.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProtectedResponse {
    pub message: String,
    pub user_id: String,
    pub role: Role,
}

/// 토큰 쌍을 본문과 쿠키로 함께 반환합니다.
fn token_response(policy: &CookiePolicy, pair: TokenPair) -> impl IntoResponse {
    let cookies = AppendHeaders([
        (SET_COOKIE, policy.session_cookie(ACCESS_COOKIE_NAME, &pair.access_token)),
        (SET_COOKIE, policy.session_cookie(REFRESH_COOKIE_NAME, &pair.refresh_token)),
    ]);
    (cookies, Json(pair))
}

/// 로그인.
///
/// 비밀번호 검증(Argon2)은 blocking thread pool에서 실행됩니다.
#[utoipa::path(
    post,
    path = "/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "로그인 성공, 토큰 쿠키 설정", body = TokenPair),
        (status = 401, description = "잘못된 자격증명", body = ErrorResponse),
        (status = 422, description = "잘못된 요청 본문", body = ErrorResponse)
    )
)]
pub async fn login(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(request) = payload?;
    let username = request.username.clone();

    let credentials = state.credentials.clone();
    let user = tokio::task::spawn_blocking(move || {
        credentials
            .authenticate(&request.username, &request.password)
            .map(|user| (user.id.clone(), user.role))
    })
    .await
    .map_err(|e| ApiError::Internal(format!("credential check failed: {}", e)))?;

    let Some((user_id, role)) = user else {
        warn!(username = %username, "Login failed");
        record_login_attempt("failure");
        return Err(AuthError::InvalidCredentials.into());
    };

    let pair = state
        .issuer
        .issue_pair(&user_id, role)
        .map_err(AuthError::from)?;

    info!(username = %username, user_id = %user_id, role = %role, "Login succeeded");
    record_login_attempt("success");

    Ok(token_response(&state.cookies, pair))
}

/// Refresh Token으로 새 토큰 쌍을 발급합니다.
///
/// 모든 실패는 403입니다. `refresh_token` 쿠키에는 Refresh Token만 허용되며,
/// 사용된 Refresh Token은 무효화되지 않습니다.
#[utoipa::path(
    post,
    path = "/refresh",
    tag = "auth",
    responses(
        (status = 200, description = "새 토큰 쌍 발급", body = TokenPair),
        (status = 403, description = "Refresh Token 없음 또는 유효하지 않음", body = ErrorResponse)
    )
)]
pub async fn refresh(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> ApiResult<impl IntoResponse> {
    let Some(token) = get_cookie(&headers, REFRESH_COOKIE_NAME) else {
        record_token_refresh("missing");
        return Err(ApiError::Forbidden("Refresh token missing".to_string()));
    };

    let claims = state.verifier.verify_kind(token, TokenKind::Refresh).map_err(|e| {
        warn!(error = %e, "Refresh token rejected");
        record_token_refresh("rejected");
        ApiError::Forbidden("Invalid refresh token".to_string())
    })?;

    let pair = state
        .issuer
        .issue_pair(&claims.sub, claims.role)
        .map_err(AuthError::from)?;

    info!(user_id = %claims.sub, "Tokens refreshed");
    record_token_refresh("success");

    Ok(token_response(&state.cookies, pair))
}

/// 로그아웃: 두 토큰 쿠키를 만료시킵니다.
#[utoipa::path(
    post,
    path = "/logout",
    tag = "auth",
    responses(
        (status = 200, description = "쿠키 삭제", body = MessageResponse)
    )
)]
pub async fn logout(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let cookies = AppendHeaders([
        (SET_COOKIE, state.cookies.expired_cookie(ACCESS_COOKIE_NAME)),
        (SET_COOKIE, state.cookies.expired_cookie(REFRESH_COOKIE_NAME)),
    ]);
    (cookies, Json(MessageResponse::new("Successfully logged out")))
}

/// 인증된 사용자 정보.
#[utoipa::path(
    get,
    path = "/protected",
    tag = "auth",
    responses(
        (status = 200, description = "인증됨", body = ProtectedResponse),
        (status = 401, description = "토큰 없음, 만료 또는 위조", body = ErrorResponse)
    )
)]
pub async fn protected(Extension(claims): Extension<Claims>) -> Json<ProtectedResponse> {
    Json(ProtectedResponse {
        message: "You are authorized".to_string(),
        user_id: claims.sub,
        role: claims.role,
    })
}

/// 관리자 전용.
#[utoipa::path(
    get,
    path = "/admin",
    tag = "auth",
    responses(
        (status = 200, description = "관리자 확인", body = MessageResponse),
        (status = 401, description = "토큰 없음, 만료 또는 위조", body = ErrorResponse),
        (status = 403, description = "admin 역할 아님", body = ErrorResponse)
    )
)]
pub async fn admin(Extension(claims): Extension<Claims>) -> Json<MessageResponse> {
    Json(MessageResponse::new(format!("Welcome, admin {}", claims.sub)))
}

/// 인증 라우터 생성.
///
/// 가드 미들웨어가 상태를 필요로 하므로 `state`를 받습니다.
pub fn auth_router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    let protected_routes = Router::new()
        .route("/protected", get(protected))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_access_token,
        ));

    let admin_routes = Router::new()
        .route("/admin", get(admin))
        .route_layer(middleware::from_fn_with_state(state, require_admin));

    Router::new()
        .route("/login", post(login))
        .route("/refresh", post(refresh))
        .route("/logout", post(logout))
        .merge(protected_routes)
        .merge(admin_routes)
}
