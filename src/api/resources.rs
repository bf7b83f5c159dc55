//! Resource routes. Each resolves the search query to a cached location,
//! then serves the requested kind through the cache orchestrator.

use axum::{
    Json,
    extract::{Query, State},
};
use std::sync::Arc;

use super::{ApiError, ApiResponse, ResourceQuery};
use crate::models::{Event, Movie, Review, Trail, Weather};
use crate::state::AppState;

pub async fn get_weather(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ResourceQuery>,
) -> Result<Json<ApiResponse<Vec<Weather>>>, ApiError> {
    let data = query.require()?;
    let forecasts = state.explore.weather(data).await?;
    Ok(Json(ApiResponse::success(forecasts)))
}

pub async fn get_events(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ResourceQuery>,
) -> Result<Json<ApiResponse<Vec<Event>>>, ApiError> {
    let data = query.require()?;
    let events = state.explore.events(data).await?;
    Ok(Json(ApiResponse::success(events)))
}

pub async fn get_movies(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ResourceQuery>,
) -> Result<Json<ApiResponse<Vec<Movie>>>, ApiError> {
    let data = query.require()?;
    let movies = state.explore.movies(data).await?;
    Ok(Json(ApiResponse::success(movies)))
}

pub async fn get_reviews(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ResourceQuery>,
) -> Result<Json<ApiResponse<Vec<Review>>>, ApiError> {
    let data = query.require()?;
    let reviews = state.explore.reviews(data).await?;
    Ok(Json(ApiResponse::success(reviews)))
}

pub async fn get_trails(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ResourceQuery>,
) -> Result<Json<ApiResponse<Vec<Trail>>>, ApiError> {
    let data = query.require()?;
    let trails = state.explore.trails(data).await?;
    Ok(Json(ApiResponse::success(trails)))
}
