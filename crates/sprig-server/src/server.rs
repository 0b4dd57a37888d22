//! Router assembly and server startup.

use std::net::SocketAddr;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json};
use axum::routing::{get, post};
use axum::Router;
use serde_json::json;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware::rate_limit;
use crate::state::AppState;
use crate::ui;

/// Build the application router. The rate limiter wraps only the `/api`
/// routes; the liveness check and the UI stay outside it.
pub fn create_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/api/chat", post(handlers::chat::chat))
        .route(
            "/api/conversations/:session_id",
            get(handlers::conversations::get_conversation),
        )
        .route("/api/sessions", get(handlers::sessions::list_sessions))
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            rate_limit::enforce,
        ));

    let mut router = Router::new()
        .merge(api)
        .route("/test", get(liveness))
        .route("/", get(ui::index))
        .layer(TraceLayer::new_for_http());

    if state.config.server.cors {
        router = router.layer(CorsLayer::permissive());
    }

    router.with_state(state)
}

/// Bind and serve until the process exits.
pub async fn run_server(state: AppState) -> anyhow::Result<()> {
    let addr: SocketAddr = format!("{}:{}", state.config.server.host, state.config.server.port)
        .parse()
        .map_err(|e| anyhow::anyhow!("invalid listen address: {e}"))?;

    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("sprig server listening on http://{addr}");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

/// Static liveness payload.
async fn liveness() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "status": "ok",
            "timestamp": chrono::Utc::now().to_rfc3339(),
        })),
    )
}
