//! OpenAPI Documentation
//!
//! Auto-generated OpenAPI 3.0 specification for the Pennywise API.

use utoipa::OpenApi;

use crate::dto;
use crate::error::ErrorResponse;
use crate::handlers;

/// Pennywise API Documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Pennywise API",
        description = "Personal finance tracker: transactions, category budgets, summaries and AI financial advice.",
        version = "0.1.0",
        license(
            name = "Apache-2.0",
            url = "https://www.apache.org/licenses/LICENSE-2.0"
        )
    ),
    servers(
        (url = "http://localhost:5000", description = "Local Development")
    ),
    paths(
        handlers::health::health_check,
        handlers::transactions::list_transactions,
        handlers::transactions::create_transaction,
        handlers::transactions::delete_transaction,
        handlers::budgets::list_budgets,
        handlers::budgets::budget_progress,
        handlers::budgets::create_budget,
        handlers::budgets::delete_budget,
        handlers::advice::get_summary,
        handlers::advice::financial_advice,
    ),
    components(
        schemas(
            ErrorResponse,
            dto::MessageResponse,
            dto::HealthResponse,
            dto::CreateTransactionRequest,
            dto::TransactionResponse,
            dto::CreateBudgetRequest,
            dto::BudgetResponse,
            dto::BudgetProgressResponse,
            dto::SummaryResponse,
            dto::AdviceRequest,
            dto::AdviceResponse,
        )
    ),
    tags(
        (name = "Health", description = "Service health"),
        (name = "Transactions", description = "Income and expense records"),
        (name = "Budgets", description = "Per-category spending limits"),
        (name = "Summary", description = "Aggregate ledger view"),
        (name = "Advice", description = "Financial advice from chat-completion providers")
    )
)]
pub struct ApiDoc;
