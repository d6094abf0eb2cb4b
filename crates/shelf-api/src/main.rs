//! Shelf API 서버 진입점.
//!
//! 설정 로드 → 로깅 → 메트릭 → 저장소 → 상태 → 라우터 순서로 구성한 뒤
//! Ctrl+C/SIGTERM까지 서비스합니다.

use std::sync::Arc;
use std::time::Duration;

use axum::{http::StatusCode, middleware, routing::get, Router};
use metrics_exporter_prometheus::PrometheusHandle;
use secrecy::SecretString;
use tokio_util::sync::CancellationToken;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use shelf_api::metrics::setup_metrics_recorder;
use shelf_api::middleware::metrics_layer;
use shelf_api::openapi::swagger_ui_router;
use shelf_api::repository::{BookRepository, InMemoryBookRepository, SqliteBookRepository};
use shelf_api::routes::create_api_router;
use shelf_api::state::AppState;
use shelf_core::{init_logging, AppConfig, CorsConfig, DatabaseConfig, LogConfig};

/// 비밀 키가 설정되지 않았을 때 사용하는 개발용 키.
const DEV_JWT_SECRET: &str = "dev-only-insecure-jwt-secret-change-me";

/// CORS 레이어 생성.
///
/// `cors.origins`가 비어 있으면 개발 모드로 간주하여 모든 origin을 허용합니다.
/// origin이 지정된 경우에만 자격 증명(쿠키) 전송을 허용합니다.
fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let origins: Vec<_> = config
        .origins
        .iter()
        .filter_map(|s| s.trim().parse().ok())
        .collect();

    let restricted = !origins.is_empty();
    let allow_origin = if restricted {
        info!("CORS configured with {} allowed origins", origins.len());
        AllowOrigin::list(origins)
    } else {
        if !config.origins.is_empty() {
            warn!("cors.origins contains no valid origins, allowing any");
        }
        AllowOrigin::any()
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::PUT,
            axum::http::Method::DELETE,
            axum::http::Method::OPTIONS,
        ])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::ACCEPT,
        ])
        .allow_credentials(restricted)
        .max_age(Duration::from_secs(3600))
}

/// /metrics 엔드포인트 핸들러.
async fn metrics_handler(
    axum::extract::State(handle): axum::extract::State<PrometheusHandle>,
) -> String {
    handle.render()
}

/// 전체 라우터 생성.
fn create_router(
    state: Arc<AppState>,
    metrics_handle: PrometheusHandle,
    config: &AppConfig,
) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(metrics_handler))
        .with_state(metrics_handle);

    let api_router = create_api_router(state.clone()).with_state(state);

    Router::new()
        .merge(metrics_router)
        .merge(api_router)
        .merge(swagger_ui_router())
        .layer(middleware::from_fn(metrics_layer))
        .layer(TraceLayer::new_for_http())
        // 요청 타임아웃 - 408 상태 코드 반환
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(config.server.request_timeout_secs),
        ))
        .layer(cors_layer(&config.cors))
}

/// 설정에 따라 도서 저장소를 선택합니다.
async fn create_book_repository(
    config: &DatabaseConfig,
) -> Result<Arc<dyn BookRepository>, Box<dyn std::error::Error>> {
    match config.url.as_deref().filter(|url| !url.is_empty()) {
        Some(url) => {
            let repo = SqliteBookRepository::connect(url, config.max_connections).await?;
            Ok(Arc::new(repo))
        }
        None => {
            info!("database.url not set, using in-memory book repository");
            Ok(Arc::new(InMemoryBookRepository::seeded()))
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // .env 파일 로드 (있는 경우)
    let _ = dotenvy::dotenv();

    let config = AppConfig::load_default()?;

    if let Err(e) = init_logging(LogConfig::from(&config.logging)) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    info!("Starting Shelf API server...");

    let metrics_handle = setup_metrics_recorder()?;
    info!("Prometheus metrics recorder initialized");

    let secret = config.auth.secret().unwrap_or_else(|| {
        warn!("auth.jwt_secret not set, using insecure development secret");
        SecretString::from(DEV_JWT_SECRET.to_string())
    });

    let books = create_book_repository(&config.database).await?;
    let state = Arc::new(AppState::new(&config.auth, &secret, books)?);
    info!(
        users = state.credentials.len(),
        book_backend = state.books.backend(),
        "Application state initialized"
    );

    let app = create_router(state, metrics_handle, &config);

    let addr = config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, "API server listening");
    info!("Swagger UI available at http://{}/swagger-ui", addr);

    let shutdown_token = CancellationToken::new();
    tokio::spawn(shutdown_signal(shutdown_token.clone()));

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_token.cancelled_owned())
        .await?;

    info!("Server stopped gracefully");
    Ok(())
}

/// Graceful shutdown 시그널 대기.
///
/// Ctrl+C 또는 SIGTERM 시그널을 수신하면 종료 토큰을 취소합니다.
async fn shutdown_signal(shutdown_token: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            warn!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            warn!("Received SIGTERM, initiating graceful shutdown...");
        }
    }

    shutdown_token.cancel();
}
