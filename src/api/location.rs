use axum::{
    Json,
    extract::{Query, State},
};
use std::sync::Arc;

use super::{ApiError, ApiResponse, ResourceQuery};
use crate::models::Location;
use crate::state::AppState;

pub async fn get_location(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ResourceQuery>,
) -> Result<Json<ApiResponse<Location>>, ApiError> {
    let data = query.require()?;
    let location = state.explore.location(data).await?;
    Ok(Json(ApiResponse::success(location)))
}
