//! 백그라운드 작업 endpoint.

use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};

use super::MessageResponse;
use crate::state::AppState;
use crate::tasks::{spawn_demo_tasks, TaskStatsSnapshot};

/// 작업을 예약하고 즉시 응답합니다.
#[utoipa::path(
    post,
    path = "/tasks",
    tag = "tasks",
    responses(
        (status = 200, description = "작업 예약됨", body = MessageResponse)
    )
)]
pub async fn schedule_tasks(State(state): State<Arc<AppState>>) -> Json<MessageResponse> {
    spawn_demo_tasks(state.tasks.clone(), state.task_durations);
    Json(MessageResponse::new("Hello, World!"))
}

/// 작업 카운터 조회.
#[utoipa::path(
    get,
    path = "/tasks/stats",
    tag = "tasks",
    responses(
        (status = 200, description = "예약/완료 수", body = TaskStatsSnapshot)
    )
)]
pub async fn task_stats(State(state): State<Arc<AppState>>) -> Json<TaskStatsSnapshot> {
    Json(state.tasks.snapshot())
}

pub fn tasks_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/tasks", post(schedule_tasks))
        .route("/tasks/stats", get(task_stats))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use std::time::Duration;
    use tower::ServiceExt;

    use crate::state::create_test_state;

    #[tokio::test]
    async fn test_schedule_returns_immediately() {
        let state = Arc::new(create_test_state());
        let app = tasks_router().with_state(state.clone());

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/tasks")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(
            serde_json::from_slice::<serde_json::Value>(&body).unwrap(),
            serde_json::json!({ "message": "Hello, World!" })
        );
        assert_eq!(state.tasks.snapshot().scheduled, 2);

        for _ in 0..100 {
            if state.tasks.snapshot().completed == 2 {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        assert_eq!(state.tasks.snapshot().completed, 2);
    }
}
