//! Summary and Advice Handlers

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::dto::{AdviceRequest, AdviceResponse, SummaryResponse};
use crate::error::{ApiError, ApiResult};
use crate::extractors::ValidatedJson;
use crate::state::AppState;

/// Current income, expenses, balance and per-category spending
#[utoipa::path(
    get,
    path = "/api/summary",
    tag = "Summary",
    responses(
        (status = 200, description = "Ledger summary", body = SummaryResponse)
    )
)]
pub async fn get_summary(State(state): State<Arc<AppState>>) -> Json<SummaryResponse> {
    Json(state.ledger.summarize().await.into())
}

/// Ask for financial advice based on the current summary
///
/// Provider outages still answer 200 with the fallback advice text.
#[utoipa::path(
    post,
    path = "/api/financial-advice",
    tag = "Advice",
    request_body = AdviceRequest,
    responses(
        (status = 200, description = "Advice and the summary it was based on", body = AdviceResponse),
        (status = 400, description = "Malformed request", body = crate::error::ErrorResponse),
        (status = 500, description = "Advice could not be assembled", body = crate::error::ErrorResponse)
    )
)]
pub async fn financial_advice(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<AdviceRequest>,
) -> ApiResult<Json<AdviceResponse>> {
    let advisor = state.advisor.clone();
    let query = request.query.unwrap_or_default();

    // Run on its own task so a panic becomes a 500 instead of a dropped connection
    let advice = tokio::spawn(async move { advisor.advise(&query).await })
        .await
        .map_err(|e| ApiError::Internal(format!("Failed to get financial advice: {}", e)))?;

    Ok(Json(advice.into()))
}
