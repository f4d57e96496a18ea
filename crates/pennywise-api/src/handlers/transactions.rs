//! Transaction Handlers

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::dto::{CreateTransactionRequest, MessageResponse, TransactionResponse};
use crate::error::{ApiError, ApiResult};
use crate::extractors::{Path, ValidatedJson};
use crate::state::AppState;

/// List all transactions in insertion order
#[utoipa::path(
    get,
    path = "/api/transactions",
    tag = "Transactions",
    responses(
        (status = 200, description = "All transactions", body = Vec<TransactionResponse>)
    )
)]
pub async fn list_transactions(
    State(state): State<Arc<AppState>>,
) -> Json<Vec<TransactionResponse>> {
    let transactions = state.ledger.list_transactions().await;
    Json(transactions.into_iter().map(Into::into).collect())
}

/// Record an income or expense
#[utoipa::path(
    post,
    path = "/api/transactions",
    tag = "Transactions",
    request_body = CreateTransactionRequest,
    responses(
        (status = 201, description = "Transaction recorded", body = TransactionResponse),
        (status = 400, description = "Invalid transaction", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_transaction(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<CreateTransactionRequest>,
) -> ApiResult<(StatusCode, Json<TransactionResponse>)> {
    let new = request.into_new_transaction()?;
    let transaction = state
        .ledger
        .append_transaction(new)
        .await
        .map_err(ApiError::from)?;

    tracing::info!(
        id = transaction.id,
        kind = %transaction.kind,
        category = %transaction.category,
        "Transaction recorded"
    );

    Ok((StatusCode::CREATED, Json(transaction.into())))
}

/// Delete a transaction
///
/// Unknown ids are not an error.
#[utoipa::path(
    delete,
    path = "/api/transactions/{id}",
    tag = "Transactions",
    params(("id" = u64, Path, description = "Transaction id")),
    responses(
        (status = 200, description = "Transaction deleted", body = MessageResponse),
        (status = 400, description = "Id is not a number", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_transaction(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Json<MessageResponse> {
    if state.ledger.remove_transaction(id).await {
        tracing::info!(id, "Transaction deleted");
    }
    Json(MessageResponse::new("Transaction deleted successfully"))
}
