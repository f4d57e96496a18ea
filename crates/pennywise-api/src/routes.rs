//! API Routes

use axum::{
    routing::{delete, get, post},
    Json, Router,
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::handlers;
use crate::openapi::ApiDoc;
use crate::state::AppState;

/// Routes under `/api`
pub fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/transactions",
            get(handlers::transactions::list_transactions)
                .post(handlers::transactions::create_transaction),
        )
        .route(
            "/transactions/:id",
            delete(handlers::transactions::delete_transaction),
        )
        .route(
            "/budgets",
            get(handlers::budgets::list_budgets).post(handlers::budgets::create_budget),
        )
        .route("/budgets/progress", get(handlers::budgets::budget_progress))
        .route("/budgets/:id", delete(handlers::budgets::delete_budget))
        .route("/financial-advice", post(handlers::advice::financial_advice))
        .route("/summary", get(handlers::advice::get_summary))
}

/// Serve the generated OpenAPI document
pub fn docs_routes() -> Router<Arc<AppState>> {
    Router::new().route(
        "/api-docs/openapi.json",
        get(|| async { Json(ApiDoc::openapi()) }),
    )
}
