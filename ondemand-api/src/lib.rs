//! # OnDemand API Server
//!
//! Read-mostly REST API over the browser cache, for CI integrations that
//! cannot link the library directly.
//!
//! ## Endpoints
//!
//! - `GET /health` - Liveness plus cache statistics
//! - `GET /api/v1/browsers/:category` - Sorted browser list (refreshes when stale)
//! - `GET /api/v1/browsers/:category/:key?latest=true` - One browser by key
//! - `POST /api/v1/browsers/:category/refresh` - Force a refresh, reporting failures
//!
//! ## Example
//!
//! ```rust,ignore
//! use ondemand_api::{ApiServer, ApiConfig};
//!
//! let server = ApiServer::new(ApiConfig::from_env()).await?;
//! server.run(([0, 0, 0, 0], 3002)).await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod dto;
mod error;
mod handlers;
mod routes;
mod state;

pub use error::ApiError;
pub use routes::create_router;
pub use state::{ApiConfig, AppState};

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use ondemand_core::error::Result;

/// API server for cached browser lookups.
pub struct ApiServer {
    state: Arc<AppState>,
}

impl ApiServer {
    /// Creates a server, warming the browser cache on a best-effort basis.
    ///
    /// Fails only on invalid configuration, never because the remote
    /// service is unreachable.
    pub async fn new(config: ApiConfig) -> Result<Self> {
        Ok(Self::from_state(Arc::new(AppState::new(config).await?)))
    }

    /// Creates a server around existing state.
    pub fn from_state(state: Arc<AppState>) -> Self {
        Self { state }
    }

    /// Creates the router with all routes and layers configured.
    pub fn router(&self) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        create_router(self.state.clone())
            .layer(cors)
            .layer(TraceLayer::new_for_http())
    }

    /// Runs the server on the given address.
    pub async fn run(self, addr: impl Into<SocketAddr>) -> std::io::Result<()> {
        let addr = addr.into();
        let listener = tokio::net::TcpListener::bind(addr).await?;

        info!("OnDemand API server listening on {}", addr);

        axum::serve(listener, self.router()).await
    }
}
