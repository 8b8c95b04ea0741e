//! HTTP routes
//!
//! | Path | Description |
//! |------|-------------|
//! | `/` | Entry page for phones |
//! | `/lousa` | Classroom display |
//! | `/stats` | Current stats as JSON |
//! | `/admin/reset?token=` | Zero the stats |
//! | `/ws` | Real-time channel |
//! | `/static/script.js` | Client script |

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap},
    response::{Html, IntoResponse},
    routing::get,
    Json, Router,
};
use lousa_ledger::StatsSnapshot;
use serde::Deserialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::error::ServerError;
use crate::net;
use crate::pages;
use crate::state::AppState;
use crate::ws;

#[derive(Debug, Deserialize)]
pub struct ResetQuery {
    pub token: Option<String>,
}

/// Build the router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(celular))
        .route("/lousa", get(lousa))
        .route("/stats", get(stats))
        .route("/admin/reset", get(admin_reset))
        .route("/ws", get(ws::ws_handler))
        .route("/static/script.js", get(script))
        .layer(CorsLayer::new().allow_origin(Any))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn celular() -> Html<String> {
    Html(pages::celular_page())
}

async fn lousa(State(state): State<AppState>, headers: HeaderMap) -> Html<String> {
    let public_url = net::public_base_url(state.config.public_url.as_deref(), &headers, net::local_ip);
    tracing::debug!("Display page QR points at {}", public_url);
    Html(pages::lousa_page(&public_url))
}

async fn stats(State(state): State<AppState>) -> Json<StatsSnapshot> {
    Json(state.board.snapshot().await)
}

async fn admin_reset(
    State(state): State<AppState>,
    Query(query): Query<ResetQuery>,
) -> Result<&'static str, ServerError> {
    state.board.admin_reset(query.token.as_deref()).await?;
    Ok("OK")
}

async fn script() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/javascript; charset=utf-8")],
        pages::SCRIPT_JS,
    )
}
