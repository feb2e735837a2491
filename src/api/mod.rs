pub mod handlers;

use crate::services::dashboard::DashboardService;
use axum::routing::get;
use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<DashboardService>,
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(handlers::health_check))
        .route("/api/initialize", get(handlers::initialize))
        .route("/api/transactions", get(handlers::list_transactions))
        .route("/api/statistics", get(handlers::statistics))
        .route("/api/bar-chart", get(handlers::bar_chart))
        .route("/api/pie-chart", get(handlers::pie_chart))
        .route("/api/combined", get(handlers::combined))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
