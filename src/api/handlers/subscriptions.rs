//! Subscription endpoints under `/api/v1/subscriptions`.

use super::MessageResponse;
use crate::{
    api::{
        ApiState,
        extract::{ApiJson, ApiPath, ApiQuery},
    },
    core::{
        Page,
        subscription::{self, SubscriptionFields},
        summary::{self, SubscriptionBreakdown},
    },
    entities::SubscriptionModel,
    errors::Result,
};
use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;
use tracing::info;

const fn default_limit() -> u64 {
    Page::DEFAULT_LIMIT
}

const fn default_active_only() -> bool {
    true
}

/// Query parameters for the subscription list endpoint
#[derive(Debug, Deserialize)]
pub struct SubscriptionListQuery {
    #[serde(default)]
    pub skip: u64,
    #[serde(default = "default_limit")]
    pub limit: u64,
    /// Hide inactive subscriptions unless explicitly `false`
    #[serde(default = "default_active_only")]
    pub active_only: bool,
}

/// `GET /subscriptions?skip&limit&active_only`
pub async fn list_subscriptions(
    State(state): State<ApiState>,
    ApiQuery(query): ApiQuery<SubscriptionListQuery>,
) -> Result<Json<Vec<SubscriptionModel>>> {
    let page = Page::new(query.skip, query.limit).clamped(state.max_page_limit);
    let subscriptions =
        subscription::list_subscriptions(&state.database, page, query.active_only).await?;
    Ok(Json(subscriptions))
}

/// `POST /subscriptions`
pub async fn create_subscription(
    State(state): State<ApiState>,
    ApiJson(fields): ApiJson<SubscriptionFields>,
) -> Result<(StatusCode, Json<SubscriptionModel>)> {
    info!("POST /subscriptions - name: {}", fields.name);
    let created = subscription::create_subscription(&state.database, fields).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// `GET /subscriptions/{id}`
pub async fn get_subscription(
    State(state): State<ApiState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<SubscriptionModel>> {
    Ok(Json(subscription::get_subscription(&state.database, id).await?))
}

/// `PUT /subscriptions/{id}` - full replace
pub async fn update_subscription(
    State(state): State<ApiState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(fields): ApiJson<SubscriptionFields>,
) -> Result<Json<SubscriptionModel>> {
    info!("PUT /subscriptions/{}", id);
    Ok(Json(
        subscription::update_subscription(&state.database, id, fields).await?,
    ))
}

/// `DELETE /subscriptions/{id}`
pub async fn delete_subscription(
    State(state): State<ApiState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<MessageResponse>> {
    subscription::delete_subscription(&state.database, id).await?;
    Ok(Json(MessageResponse::new("Subscription deleted successfully")))
}

/// `GET /subscriptions/summary/monthly`
pub async fn monthly_summary(State(state): State<ApiState>) -> Result<Json<SubscriptionBreakdown>> {
    Ok(Json(
        summary::monthly_subscriptions_breakdown(&state.database).await?,
    ))
}
