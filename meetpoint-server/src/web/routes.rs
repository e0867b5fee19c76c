//! HTTP route handlers.

use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use chrono::Local;
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::domain::Coordinate;
use crate::planner::{Planner, SearchError, SearchRequest};
use crate::stations::{CatalogError, StationCatalog, nearest_with_distance};

use super::dto::*;
use super::state::AppState;

/// Default number of nearby stations returned.
const DEFAULT_NEARBY_LIMIT: usize = 10;

/// Cap on the number of nearby stations returned.
const MAX_NEARBY_LIMIT: usize = 50;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/stations/nearby", get(nearby_stations))
        .route("/api/meeting-point", post(find_meeting_point))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Stations nearest a point.
async fn nearby_stations(
    State(state): State<AppState>,
    Query(req): Query<NearbyStationsRequest>,
) -> Result<Json<NearbyStationsResponse>, AppError> {
    let point = Coordinate::new(req.lat, req.lon).map_err(|e| AppError::BadRequest {
        message: e.to_string(),
    })?;
    let limit = req.limit.unwrap_or(DEFAULT_NEARBY_LIMIT).min(MAX_NEARBY_LIMIT);

    let stations = state.catalog.all_stations().await?;
    let stations = nearest_with_distance(point, &stations, limit)
        .iter()
        .map(NearbyStationResult::from_nearby)
        .collect();

    Ok(Json(NearbyStationsResponse { stations }))
}

/// Find the best meeting stations for a group.
async fn find_meeting_point(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<MeetingPointResponse>, AppError> {
    // Parse JSON manually so we can log the body on failure
    let req: MeetingPointRequest = serde_json::from_slice(&body).map_err(|e| {
        warn!(
            error = %e,
            body = %String::from_utf8_lossy(&body),
            "Invalid meeting-point request"
        );
        AppError::BadRequest {
            message: format!("Invalid JSON: {e}"),
        }
    })?;

    let members = req
        .members
        .into_iter()
        .enumerate()
        .map(|(i, m)| m.into_member(i))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| AppError::BadRequest {
            message: e.to_string(),
        })?;

    // Request overrides are pulled into the recommended bounds
    let mut config = (*state.config).clone();
    if let Some(n) = req.candidate_count {
        config = config.with_candidate_count(n);
    }
    if let Some(n) = req.result_count {
        config = config.with_result_count(n);
    }
    let config = config.clamped();

    let searched_at = Local::now();
    let request = SearchRequest::new(members, req.optimization);
    let planner = Planner::new(&state.catalog, &*state.estimator, &config);
    let outcome = planner.find_meeting_point(&request).await?;

    Ok(Json(MeetingPointResponse::from_outcome(&outcome, searched_at)))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Internal { message: String },
}

impl From<CatalogError> for AppError {
    fn from(e: CatalogError) -> Self {
        AppError::Internal {
            message: e.to_string(),
        }
    }
}

impl From<SearchError> for AppError {
    fn from(e: SearchError) -> Self {
        match e {
            SearchError::MissingDeparture { .. } | SearchError::InsufficientMembers { .. } => {
                AppError::BadRequest {
                    message: e.to_string(),
                }
            }
            SearchError::NoStationsFound => AppError::NotFound {
                message: e.to_string(),
            },
            SearchError::Catalog(_) => AppError::Internal {
                message: e.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, %message, "Request failed");
        } else {
            warn!(%status, %message, "Request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
