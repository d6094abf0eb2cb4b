//! 사용자 데모 endpoint.

use std::sync::Arc;

use axum::{routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::state::AppState;

/// 고정 사용자 응답.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: i64,
    pub name: String,
}

#[utoipa::path(
    get,
    path = "/users",
    tag = "users",
    responses(
        (status = 200, description = "고정 사용자", body = UserResponse)
    )
)]
pub async fn get_user() -> Json<UserResponse> {
    Json(UserResponse {
        id: 1,
        name: "John Doe".to_string(),
    })
}

pub fn users_router() -> Router<Arc<AppState>> {
    Router::new().route("/users", get(get_user))
}
