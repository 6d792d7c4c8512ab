use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use catalog_api::{
    foods_for_city, health_message, list_cities, list_cities_with_food, list_distances, Catalog,
    CatalogContext,
};
use shared::{
    domain::CityId,
    error::{ApiError, ErrorCode},
    protocol::{CitiesResponse, CitiesWithFoodResponse, CityFoodResponse, DistancesResponse},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::warn;

mod app_state;
pub mod config;

use app_state::AppState;

/// Full catalog router with CORS and request tracing.
pub fn app(catalog: Catalog) -> Router {
    build_router(Arc::new(AppState {
        api: CatalogContext::new(catalog),
    }))
}

fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/cities", get(http_list_cities))
        .route("/api/cities/food", get(http_list_cities_with_food))
        .route("/api/cities/distances", get(http_list_distances))
        .route("/api/cities/:id/food", get(http_city_food))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> &'static str {
    health_message()
}

async fn http_list_cities(State(state): State<Arc<AppState>>) -> Json<CitiesResponse> {
    Json(list_cities(&state.api))
}

async fn http_list_cities_with_food(
    State(state): State<Arc<AppState>>,
) -> Json<CitiesWithFoodResponse> {
    Json(list_cities_with_food(&state.api))
}

async fn http_list_distances(State(state): State<Arc<AppState>>) -> Json<DistancesResponse> {
    Json(list_distances(&state.api))
}

async fn http_city_food(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
) -> Result<Json<CityFoodResponse>, (StatusCode, Json<ApiError>)> {
    let city_id = raw_id.parse::<i64>().map(CityId).map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            Json(ApiError::new(ErrorCode::Validation, "city id must be an integer")),
        )
    })?;

    foods_for_city(&state.api, city_id)
        .map(Json)
        .map_err(|e| {
            warn!(city_id = city_id.0, error = %e.message, "city food lookup failed");
            (status_for(e.code), Json(e))
        })
}

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Validation => StatusCode::BAD_REQUEST,
        ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
