//! 인증 가드.
//!
//! 라우트 등록 시 `route_layer`로 조합되는 미들웨어와, 그 안에서 쓰이는
//! 순수 함수 가드를 제공합니다. 요청마다 독립적으로 검증합니다:
//!
//! `Unauthenticated -> [쿠키 존재?] -> Verifying -> {Authenticated(role) | Rejected}`
//!
//! 검증에 성공하면 [`Claims`]가 request extension에 삽입되어 핸들러에서
//! `Extension<Claims>`로 꺼낼 수 있습니다.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use tracing::debug;

use super::cookies::{get_cookie, ACCESS_COOKIE_NAME};
use super::jwt::{Claims, TokenError, TokenKind, TokenVerifier};
use super::Role;
use crate::error::{ApiError, ErrorResponse};
use crate::state::AppState;

/// 인증/인가 실패.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Not authenticated")]
    MissingToken,
    #[error(transparent)]
    Token(#[from] TokenError),
    #[error("Admin privileges required")]
    InsufficientRole,
}

impl AuthError {
    /// 보호된 엔드포인트 기준 상태 코드.
    ///
    /// 역할 부족만 403이고 나머지는 401입니다.
    pub fn status(&self) -> StatusCode {
        match self {
            AuthError::InsufficientRole => StatusCode::FORBIDDEN,
            _ => StatusCode::UNAUTHORIZED,
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InsufficientRole => ApiError::Forbidden(err.to_string()),
            AuthError::Token(TokenError::Encoding(e)) => ApiError::Internal(e.to_string()),
            other => ApiError::Unauthorized(other.to_string()),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match self {
            AuthError::Token(TokenError::Encoding(_)) => ApiError::from(self).into_response(),
            other => (other.status(), Json(ErrorResponse::new(other.to_string()))).into_response(),
        }
    }
}

/// `access_token` 쿠키를 검증하고 Claims를 반환합니다.
///
/// 쿠키에 Refresh Token이 들어 있으면 [`TokenError::WrongKind`]로 거부합니다.
pub fn authenticate(headers: &HeaderMap, verifier: &TokenVerifier) -> Result<Claims, AuthError> {
    let token = get_cookie(headers, ACCESS_COOKIE_NAME).ok_or(AuthError::MissingToken)?;
    Ok(verifier.verify_kind(token, TokenKind::Access)?)
}

/// 요구 역할 이상인지 확인합니다.
pub fn require_role(required_role: Role, claims: &Claims) -> Result<(), AuthError> {
    if claims.has_role(required_role) {
        Ok(())
    } else {
        Err(AuthError::InsufficientRole)
    }
}

/// 유효한 Access Token을 요구하는 미들웨어.
pub async fn require_access_token(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let claims = authenticate(req.headers(), &state.verifier).inspect_err(|e| {
        debug!(path = %req.uri().path(), error = %e, "Access token rejected");
    })?;

    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

/// 유효한 Access Token과 admin 역할을 요구하는 미들웨어.
pub async fn require_admin(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let claims = authenticate(req.headers(), &state.verifier)?;
    require_role(Role::Admin, &claims).inspect_err(|_| {
        debug!(user_id = %claims.sub, role = %claims.role, "Admin access denied");
    })?;

    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}
