//! Router construction

use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use super::handlers::{self, AppState};

/// Build the service router
pub fn build_router(state: AppState, max_body_bytes: usize) -> Router {
    let api_routes = Router::new()
        .route("/api/v1/catalog", get(handlers::get_catalog))
        .route("/api/v1/dismantling/match", post(handlers::match_category))
        .route("/api/v1/dismantling/plan", post(handlers::plan_lot))
        .route("/api/v1/checklists", post(handlers::create_checklist))
        .route("/api/v1/dismantling/checklists", post(handlers::create_lot_checklist))
        .route(
            "/api/v1/checklists/:id",
            get(handlers::get_checklist)
                .put(handlers::regenerate_checklist)
                .delete(handlers::delete_checklist),
        )
        .route("/api/v1/checklists/:id/steps/:step/expand", post(handlers::expand_step))
        .route("/api/v1/checklists/:id/steps/:step/complete", post(handlers::complete_step));

    Router::new()
        .route("/health", get(handlers::health))
        .route("/metrics", get(handlers::metrics))
        .merge(api_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(RequestBodyLimitLayer::new(max_body_bytes)),
        )
        .with_state(state)
}
