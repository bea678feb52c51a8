mod events;

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::get,
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use crate::middleware::{request_id, RequestId, REQUEST_ID_HEADER};
use crate::search::{SearchError, SearchOrchestrator};

#[derive(Clone)]
pub struct AppState {
    pub search: Arc<SearchOrchestrator>,
}

/// Filesystem locations of the browser front end.
#[derive(Debug, Clone)]
pub struct AssetDirs {
    pub templates_dir: PathBuf,
    pub static_dir: PathBuf,
    pub media_dir: PathBuf,
}

impl AssetDirs {
    pub fn from_config(config: &eventscout_core::AppConfig) -> Self {
        Self {
            templates_dir: config.templates_dir.clone(),
            static_dir: config.static_dir.clone(),
            media_dir: config.media_dir.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ErrorBody,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

impl ApiError {
    pub fn new(
        request_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
            meta: ResponseMeta::new(request_id.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.error.code.as_str() {
            "not_found" => StatusCode::NOT_FOUND,
            "bad_request" | "validation_error" => StatusCode::BAD_REQUEST,
            "upstream_error" => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

pub(super) fn map_search_error(request_id: String, error: SearchError) -> ApiError {
    let code = match &error {
        SearchError::Validation(_) => "validation_error",
        SearchError::Geocoding(_) => "geocoding_error",
        SearchError::Upstream(_) => "upstream_error",
        SearchError::Internal(_) => "internal_error",
    };
    ApiError::new(request_id, code, error.to_string())
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET])
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static(REQUEST_ID_HEADER)])
}

fn search_router() -> Router<AppState> {
    Router::new()
        .route("/search/events", get(events::search_events))
        .route("/search/events/{event_id}", get(events::get_event))
        .route("/search/venues/{venue_id}", get(events::get_venue))
}

fn asset_router(assets: &AssetDirs) -> Router<AppState> {
    let index = ServeFile::new(assets.templates_dir.join("index.html"));

    Router::new()
        .route_service("/", index.clone())
        .route_service("/index.html", index)
        .nest_service("/static", ServeDir::new(&assets.static_dir))
        .nest_service("/media", ServeDir::new(&assets.media_dir))
}

pub fn build_app(state: AppState, assets: &AssetDirs) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(search_router())
        .merge(asset_router(assets))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health(Extension(req_id): Extension<RequestId>) -> impl IntoResponse {
    Json(ApiResponse {
        data: HealthData { status: "ok" },
        meta: ResponseMeta::new(req_id.0),
    })
}
