//! 포트폴리오 트래커 API 서버.
//!
//! Axum 기반 REST API 서버를 시작합니다. 설정은 환경변수(및 `.env`)에서
//! 로드하며, `JWT_SECRET`이 없으면 기동에 실패합니다.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use tracker_api::openapi::swagger_ui_router;
use tracker_api::routes::create_api_router;
use tracker_api::state::AppState;
use tracker_core::config::{AppConfig, DatabaseConfig};
use tracker_core::logging::init_logging_from_env;

/// 데이터베이스 연결 풀 생성 및 마이그레이션 실행.
///
/// `DATABASE_URL`이 없거나 연결에 실패하면 None을 반환하고, 스토어 의존
/// 핸들러는 500을 반환하게 됩니다. 헬스 체크로 상태를 확인할 수 있습니다.
async fn connect_database(config: &DatabaseConfig) -> Option<sqlx::PgPool> {
    let Some(url) = &config.url else {
        warn!("DATABASE_URL not set, database features will be disabled");
        return None;
    };

    match PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .connect(url)
        .await
    {
        Ok(pool) => {
            if let Err(e) = sqlx::migrate!("./migrations").run(&pool).await {
                error!(error = %e, "Failed to run migrations");
                return None;
            }
            info!("Connected to PostgreSQL, migrations applied");
            Some(pool)
        }
        Err(e) => {
            error!(error = %e, "Failed to connect to database");
            None
        }
    }
}

/// CORS 미들웨어 구성.
///
/// `CORS_ORIGINS` 환경변수가 설정되어 있으면 해당 origin만 허용합니다.
/// 설정되지 않으면 개발 모드로 간주하여 모든 origin을 허용합니다.
fn cors_layer() -> CorsLayer {
    let allow_origin = match std::env::var("CORS_ORIGINS") {
        Ok(origins) if !origins.is_empty() => {
            let origins: Vec<_> = origins
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();

            if origins.is_empty() {
                warn!("CORS_ORIGINS is set but contains no valid origins, allowing any");
                AllowOrigin::any()
            } else {
                info!("CORS configured with {} allowed origins", origins.len());
                AllowOrigin::list(origins)
            }
        }
        _ => {
            warn!("CORS_ORIGINS not set, allowing any origin (development mode)");
            AllowOrigin::any()
        }
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
            axum::http::header::AUTHORIZATION,
            axum::http::header::ACCEPT,
        ])
        .max_age(Duration::from_secs(3600))
}

/// 전체 라우터 생성.
fn create_router(state: Arc<AppState>) -> Router {
    create_api_router()
        .with_state(state)
        // OpenAPI 문서 및 Swagger UI
        .merge(swagger_ui_router())
        // 미들웨어
        .layer(TraceLayer::new_for_http())
        // 전역 요청 타임아웃 (30초)
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .layer(cors_layer())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // .env 파일 로드 (있는 경우)
    let _ = dotenvy::dotenv();

    init_logging_from_env()?;

    info!("Starting CryptoTrack API server...");

    // JWT_SECRET 미설정은 여기서 치명적 에러로 끝납니다
    let config = AppConfig::from_env()?;

    let pool = connect_database(&config.database).await;

    let mut state = AppState::new(config.auth.jwt_secret.clone());
    if let Some(pool) = pool {
        state = state.with_pool(pool);
    }
    let state = Arc::new(state);

    info!(
        version = %state.version,
        has_db = state.pool.is_some(),
        "Application state initialized"
    );

    let app = create_router(state);

    let addr = config.server.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!(%addr, "API server listening");
    info!("Swagger UI available at http://{}/swagger-ui", addr);
    info!("OpenAPI spec at http://{}/api-docs/openapi.json", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped gracefully");

    Ok(())
}

/// Graceful shutdown 시그널 대기.
///
/// Ctrl+C 또는 SIGTERM 수신 시 반환하며, axum이 진행 중인 요청을
/// 마무리한 뒤 종료합니다.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
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
}
