//! HTTP 요청 metrics middleware.

use std::time::Instant;

use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};

use crate::metrics::{
    normalize_path, record_http_duration, record_http_request, record_http_response,
};

/// 메트릭 라벨로 쓸 경로.
///
/// 라우트 템플릿(`/books/{id}`)이 있으면 그대로 쓰고, 매칭되지 않은 요청은
/// 숫자 세그먼트를 정규화해 라벨 수가 늘어나지 않게 합니다.
fn path_label(request: &Request) -> String {
    match request.extensions().get::<MatchedPath>() {
        Some(matched) => matched.as_str().to_string(),
        None => normalize_path(request.uri().path()),
    }
}

/// 요청 수, 응답 수(status 포함), 처리 시간을 기록하는 미들웨어.
pub async fn metrics_layer(request: Request, next: Next) -> Response {
    let method = request.method().as_str().to_string();
    let path = path_label(&request);
    record_http_request(&method, &path);

    let started = Instant::now();
    let response = next.run(request).await;

    record_http_response(&method, &path, response.status().as_u16());
    record_http_duration(&method, &path, started.elapsed().as_secs_f64());
    response
}
