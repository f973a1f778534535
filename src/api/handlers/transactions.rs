//! Transaction endpoints under `/api/v1/transactions`.

use super::MessageResponse;
use crate::{
    api::{
        ApiState,
        extract::{ApiJson, ApiPath, ApiQuery},
    },
    core::{
        Page,
        summary::{self, TransactionSummary},
        transaction::{self, NewTransaction},
    },
    entities::TransactionModel,
    errors::Result,
};
use axum::{Json, extract::State, http::StatusCode};
use tracing::info;

/// `GET /transactions?skip&limit`
pub async fn list_transactions(
    State(state): State<ApiState>,
    ApiQuery(page): ApiQuery<Page>,
) -> Result<Json<Vec<TransactionModel>>> {
    let page = page.clamped(state.max_page_limit);
    let transactions = transaction::list_transactions(&state.database, page).await?;
    Ok(Json(transactions))
}

/// `POST /transactions`
pub async fn create_transaction(
    State(state): State<ApiState>,
    ApiJson(input): ApiJson<NewTransaction>,
) -> Result<(StatusCode, Json<TransactionModel>)> {
    info!("POST /transactions - type: {}", input.transaction_type);
    let created = transaction::create_transaction(&state.database, input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// `GET /transactions/{id}`
pub async fn get_transaction(
    State(state): State<ApiState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<TransactionModel>> {
    Ok(Json(transaction::get_transaction(&state.database, id).await?))
}

/// `DELETE /transactions/{id}`
pub async fn delete_transaction(
    State(state): State<ApiState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<MessageResponse>> {
    transaction::delete_transaction(&state.database, id).await?;
    Ok(Json(MessageResponse::new("Transaction deleted successfully")))
}

/// `GET /transactions/summary/total`
pub async fn transactions_summary(
    State(state): State<ApiState>,
) -> Result<Json<TransactionSummary>> {
    Ok(Json(summary::transaction_summary(&state.database).await?))
}
