//! REST API exposure
//!
//! The REST exposure consumes a `ServerHost` and produces an Axum `Router`.

pub mod handlers;

use super::super::host::ServerHost;
use anyhow::Result;
use axum::{
    Json, Router,
    routing::{get, post},
};
use handlers::AppState;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// REST API exposure implementation
pub struct RestExposure;

impl RestExposure {
    /// Build the REST router from a host
    ///
    /// Returns a router with:
    /// - Health check routes
    /// - Pix and bill-splitting routes
    /// - Model-backed routes (answer `503` when no assistant is configured)
    /// - Custom routes
    pub fn build_router(host: Arc<ServerHost>, custom_routes: Vec<Router>) -> Result<Router> {
        let state = AppState {
            config: host.config.clone(),
            assistant: host.assistant.clone(),
            render: host.render.clone(),
        };

        let mut app = Self::health_routes().merge(Self::api_routes(state));

        for custom_router in custom_routes {
            app = app.merge(custom_router);
        }

        Ok(app.layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        ))
    }

    fn api_routes(state: AppState) -> Router {
        Router::new()
            .route("/pix", post(handlers::create_pix))
            .route("/pix/verify", post(handlers::verify_pix))
            .route("/split", post(handlers::split))
            .route("/shopping-list", post(handlers::shopping_list))
            .route("/receipt", post(handlers::read_receipt))
            .route("/charges", post(handlers::charge))
            .route("/charges/overdue", post(handlers::overdue_charge))
            .with_state(state)
    }

    /// Build health check routes
    fn health_routes() -> Router {
        Router::new()
            .route("/health", get(Self::health_check))
            .route("/healthz", get(Self::health_check))
    }

    /// Health check endpoint handler
    async fn health_check() -> Json<Value> {
        Json(json!({
            "status": "ok",
            "service": "churrasco-rs"
        }))
    }
}
