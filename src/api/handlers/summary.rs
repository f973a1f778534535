//! Dashboard overview endpoint.

use crate::{
    api::ApiState,
    core::summary::{self, Overview},
    errors::Result,
};
use axum::{Json, extract::State};

/// `GET /summary/overview`
pub async fn overview(State(state): State<ApiState>) -> Result<Json<Overview>> {
    Ok(Json(summary::overview(&state.database).await?))
}
