//! Coffee Shop Drinks API 서버.
//!
//! Axum 기반 REST API 서버를 시작합니다.
//! 음료 메뉴 조회/관리와 헬스 체크 엔드포인트를 제공합니다.

use std::sync::Arc;

use axum::http::{header, Method};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use drinks_api::config::AppConfig;
use drinks_api::repository::{connect_pool, DrinkRepository};
use drinks_api::routes::create_api_router;
use drinks_api::state::AppState;
use drinks_api::TokenVerifier;

/// CORS 레이어 생성.
///
/// `CORS_ORIGINS`가 설정되어 있으면 해당 origin만 허용합니다.
/// 설정되지 않으면 개발 모드로 간주하여 모든 origin을 허용합니다.
fn cors_layer(origins: Option<&[String]>) -> CorsLayer {
    let allow_origin = match origins {
        Some(origins) => {
            let origins: Vec<_> = origins.iter().filter_map(|s| s.parse().ok()).collect();

            if origins.is_empty() {
                warn!("CORS_ORIGINS is set but contains no valid origins, allowing any");
                AllowOrigin::any()
            } else {
                info!("CORS configured with {} allowed origins", origins.len());
                AllowOrigin::list(origins)
            }
        }
        None => {
            warn!("CORS_ORIGINS not set, allowing any origin (development mode)");
            AllowOrigin::any()
        }
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

/// `--export-openapi` 플래그 또는 `EXPORT_OPENAPI=1`이면 OpenAPI JSON을 stdout으로 출력하고 종료합니다.
fn handle_export_openapi() -> Result<(), Box<dyn std::error::Error>> {
    use drinks_api::openapi::ApiDoc;
    use utoipa::OpenApi as _;

    let export_flag = std::env::args().any(|arg| arg == "--export-openapi");
    let export_env = std::env::var("EXPORT_OPENAPI")
        .map(|v| v == "1" || v == "true")
        .unwrap_or(false);

    if export_flag || export_env {
        let json = serde_json::to_string_pretty(&ApiDoc::openapi())?;
        println!("{}", json);
        std::process::exit(0);
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // .env 파일 로드 (있는 경우)
    let _ = dotenvy::dotenv();

    handle_export_openapi()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "drinks_api=info,tower_http=debug".into()),
        )
        .init();

    info!("Starting Drinks API server...");

    let config = AppConfig::from_env().map_err(|e| {
        error!(error = %e, "Invalid configuration");
        e
    })?;
    let addr = config.server.socket_addr()?;

    // 데이터베이스 연결 및 스키마 준비
    let pool = connect_pool(&config.database).await.map_err(|e| {
        error!(error = %e, url = %config.database.url, "Failed to connect to database");
        e
    })?;
    DrinkRepository::init_schema(&pool).await?;
    info!(url = %config.database.url, "Database ready");

    let verifier = TokenVerifier::new(config.auth.clone());
    info!(
        audience = %config.auth.audience,
        issuer = %config.auth.issuer,
        "Token verifier configured"
    );

    let state = Arc::new(AppState::new(pool, verifier));

    let app = create_api_router()
        .with_state(state)
        .layer(cors_layer(config.cors_origins.as_deref()))
        .layer(TraceLayer::new_for_http());

    info!(%addr, "API server listening");
    info!("OpenAPI spec at http://{}/api-docs/openapi.json", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped gracefully");

    Ok(())
}

/// Graceful shutdown 시그널 대기.
///
/// Ctrl+C 또는 SIGTERM 시그널을 수신하면 반환합니다.
async fn shutdown_signal() {
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
}
