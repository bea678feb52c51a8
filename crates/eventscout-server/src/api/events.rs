use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use eventscout_core::NormalizedEvent;
use serde_json::Value;

use crate::middleware::RequestId;
use crate::search::{SearchParams, SearchQuery};

use super::{map_search_error, ApiError, AppState};

pub(super) async fn search_events(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<NormalizedEvent>>, ApiError> {
    let params =
        SearchParams::from_query(&query).map_err(|e| map_search_error(req_id.0.clone(), e))?;

    tracing::info!(
        keyword = %params.keyword,
        distance = params.distance,
        segment_id = params.segment_id,
        "searching events"
    );

    let events = state
        .search
        .search_events(&params)
        .await
        .map_err(|e| map_search_error(req_id.0.clone(), e))?;

    Ok(Json(events))
}

pub(super) async fn get_event(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(event_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    tracing::info!(event_id = %event_id, "fetching event detail");

    let data = state
        .search
        .event_detail(&event_id)
        .await
        .map_err(|e| map_search_error(req_id.0, e))?;

    Ok(Json(data))
}

pub(super) async fn get_venue(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(venue_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    tracing::info!(venue_id = %venue_id, "fetching venue detail");

    let data = state
        .search
        .venue_detail(&venue_id)
        .await
        .map_err(|e| map_search_error(req_id.0, e))?;

    Ok(Json(data))
}
