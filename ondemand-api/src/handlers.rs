//! API route handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use tracing::debug;

use ondemand_core::types::{Browser, Category};

use crate::dto::*;
use crate::error::ApiError;
use crate::state::AppState;

type Result<T> = std::result::Result<T, ApiError>;

fn parse_category(raw: &str) -> Result<Category> {
    raw.parse::<Category>().map_err(ApiError::from)
}

/// GET /health
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        cache: state.factory.stats(),
    })
}

/// GET /api/v1/browsers/:category
pub async fn list_browsers(
    State(state): State<Arc<AppState>>,
    Path(category): Path<String>,
) -> Result<Json<BrowserListResponse>> {
    let category = parse_category(&category)?;
    let browsers = state.factory.list(category).await;

    debug!(%category, count = browsers.len(), "Listed browsers");
    Ok(Json(BrowserListResponse::new(
        category,
        browsers,
        state.factory.last_fetch(),
    )))
}

/// GET /api/v1/browsers/:category/:key
pub async fn get_browser(
    State(state): State<Arc<AppState>>,
    Path((category, key)): Path<(String, String)>,
    Query(query): Query<LookupQuery>,
) -> Result<Json<Browser>> {
    let category = parse_category(&category)?;

    state
        .factory
        .lookup_with(category, &key, query.latest)?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(format!("No {} browser found for key '{}'", category, key)))
}

/// POST /api/v1/browsers/:category/refresh
pub async fn refresh_browsers(
    State(state): State<Arc<AppState>>,
    Path(category): Path<String>,
) -> Result<Json<BrowserListResponse>> {
    let category = parse_category(&category)?;
    let browsers = state.factory.refresh(category).await?;

    Ok(Json(BrowserListResponse::new(
        category,
        browsers,
        state.factory.last_fetch(),
    )))
}
