//! Budget Handlers

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::dto::{BudgetProgressResponse, BudgetResponse, CreateBudgetRequest, MessageResponse};
use crate::error::ApiResult;
use crate::extractors::{Path, ValidatedJson};
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/api/budgets",
    tag = "Budgets",
    responses(
        (status = 200, description = "All budgets", body = Vec<BudgetResponse>)
    )
)]
pub async fn list_budgets(State(state): State<Arc<AppState>>) -> Json<Vec<BudgetResponse>> {
    let budgets = state.ledger.list_budgets().await;
    Json(budgets.into_iter().map(Into::into).collect())
}

/// Budgets with this month's live spending and a status
///
/// Unlike `spent`, `month_spent` only counts expenses dated in the budget's
/// month and follows later transactions.
#[utoipa::path(
    get,
    path = "/api/budgets/progress",
    tag = "Budgets",
    responses(
        (status = 200, description = "Progress for every budget", body = Vec<BudgetProgressResponse>)
    )
)]
pub async fn budget_progress(
    State(state): State<Arc<AppState>>,
) -> Json<Vec<BudgetProgressResponse>> {
    let progress = state.ledger.budget_progress().await;
    Json(progress.into_iter().map(Into::into).collect())
}

/// Create a budget
///
/// `spent` is the category's expense total at this moment and is not
/// updated afterwards.
#[utoipa::path(
    post,
    path = "/api/budgets",
    tag = "Budgets",
    request_body = CreateBudgetRequest,
    responses(
        (status = 201, description = "Budget created", body = BudgetResponse),
        (status = 400, description = "Invalid budget", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_budget(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<CreateBudgetRequest>,
) -> ApiResult<(StatusCode, Json<BudgetResponse>)> {
    let budget = state.ledger.append_budget(request.into_new_budget()?).await?;

    tracing::info!(
        id = budget.id,
        category = %budget.category,
        month = %budget.month,
        "Budget created"
    );

    Ok((StatusCode::CREATED, Json(budget.into())))
}

#[utoipa::path(
    delete,
    path = "/api/budgets/{id}",
    tag = "Budgets",
    params(("id" = u64, Path, description = "Budget id")),
    responses(
        (status = 200, description = "Budget deleted", body = MessageResponse),
        (status = 400, description = "Id is not a number", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_budget(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Json<MessageResponse> {
    if state.ledger.remove_budget(id).await {
        tracing::info!(id, "Budget deleted");
    }
    Json(MessageResponse::new("Budget deleted successfully"))
}
