// Axum API Server Module
//
// Purpose: REST API over the placement engine (catalog search, plant details,
// batch validation, availability, reports and submission)

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};

use tower_http::{
    compression::CompressionLayer,
    cors::CorsLayer,
    trace::TraceLayer,
};

use moka::future::Cache;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use serde::Deserialize;

use crate::catalog::{Difficulty, PlantCatalog, PlantTypeId};
use crate::data::{bundled_catalog, load_catalog};
use crate::query::{search_plants, PlantFilters};
use crate::system::{PlacedPlant, PlantEntry, SystemSnapshot};
use crate::validator::CombinationValidator;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_SEARCH_LIMIT: usize = 20;
const MAX_SEARCH_LIMIT: usize = 100;

// ============================================================================
// Configuration
// ============================================================================

/// Server settings read from the environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// JSON or CSV catalog; the bundled catalog is used when unset
    pub catalog_path: Option<PathBuf>,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            catalog_path: None,
            port: DEFAULT_PORT,
        }
    }
}

impl ServerConfig {
    /// Read `CATALOG_PATH` and `PORT`
    pub fn from_env() -> Self {
        let catalog_path = std::env::var("CATALOG_PATH")
            .ok()
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        Self { catalog_path, port }
    }

    pub fn load_catalog(&self) -> anyhow::Result<PlantCatalog> {
        match &self.catalog_path {
            Some(path) => load_catalog(path)
                .with_context(|| format!("Failed to load catalog from {}", path.display())),
            None => bundled_catalog().context("Failed to load bundled catalog"),
        }
    }
}

// ============================================================================
// Application State
// ============================================================================

#[derive(Clone)]
pub struct AppState {
    pub validator: Arc<CombinationValidator>,
    pub cache: Cache<String, serde_json::Value>,
}

impl AppState {
    pub fn new(catalog: PlantCatalog) -> Self {
        tracing::info!("Initializing validator with {} plant types...", catalog.len());
        let validator = Arc::new(CombinationValidator::new(Arc::new(catalog)));

        tracing::info!("Initializing Moka cache...");
        let cache = Cache::builder()
            .max_capacity(1_000)
            .time_to_live(Duration::from_secs(300)) // 5 min TTL
            .build();

        Self { validator, cache }
    }
}

// ============================================================================
// Router Configuration
// ============================================================================

pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))

        // Catalog
        .route("/api/plants", get(list_plants))
        .route("/api/plants/:id", get(get_plant))

        // Systems
        .route("/api/systems/validate", post(validate_batch))
        .route("/api/systems/report", post(report_batch))
        .route("/api/systems/availability", post(system_availability))
        .route("/api/systems/submit", post(submit_batch))

        // Middleware
        .layer(CompressionLayer::new()) // gzip + brotli compression
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http()) // Request logging
        .with_state(state)
}

// ============================================================================
// Endpoint Handlers
// ============================================================================

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

async fn list_plants(
    State(state): State<AppState>,
    Query(params): Query<PlantSearchParams>,
) -> Result<Json<serde_json::Value>, AppError> {
    let filters = params.into_filters()?;
    let plants = search_plants(state.validator.catalog(), &filters);

    Ok(Json(serde_json::json!({
        "rows": plants.len(),
        "data": plants,
    })))
}

async fn get_plant(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let cache_key = format!("plant:{}", id);

    if let Some(cached) = state.cache.get(&cache_key).await {
        tracing::debug!("Cache hit for plant {}", id);
        return Ok(Json(cached));
    }

    let catalog = state.validator.catalog();
    let plant = catalog
        .get(id.as_str())
        .ok_or_else(|| AppError::NotFound(format!("Plant {} not found", id)))?;

    let resolve = |ids: &[PlantTypeId]| -> Vec<serde_json::Value> {
        ids.iter()
            .map(|other| {
                serde_json::json!({
                    "id": other,
                    "name": catalog.display_name(other),
                })
            })
            .collect()
    };

    let mut result = serde_json::to_value(plant)
        .map_err(|e| AppError::Internal(format!("JSON encode error: {}", e)))?;
    if let Some(object) = result.as_object_mut() {
        object.insert("companions".to_string(), resolve(&plant.companion_plants).into());
        object.insert("incompatible".to_string(), resolve(&plant.incompatible_plants).into());
    }

    state.cache.insert(cache_key, result.clone()).await;

    Ok(Json(result))
}

async fn validate_batch(
    State(state): State<AppState>,
    payload: Result<Json<SystemBatchRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(payload) = payload?;
    let (system, entries) = payload.into_parts();
    let decision = state.validator.validate(&system, &entries);
    Ok(Json(decision).into_response())
}

async fn report_batch(
    State(state): State<AppState>,
    payload: Result<Json<SystemBatchRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(payload) = payload?;
    let (system, entries) = payload.into_parts();
    let report = state.validator.report(&system, &entries);
    Ok(Json(report).into_response())
}

async fn system_availability(
    State(state): State<AppState>,
    payload: Result<Json<SystemBatchRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(payload) = payload?;
    let (system, _) = payload.into_parts();
    Ok(Json(state.validator.availability(&system)).into_response())
}

async fn submit_batch(
    State(state): State<AppState>,
    payload: Result<Json<SystemBatchRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(payload) = payload?;
    let (system, entries) = payload.into_parts();

    let response = match state.validator.submit(&system, &entries, chrono::Utc::now()) {
        Ok(plantings) => (
            StatusCode::CREATED,
            Json(serde_json::json!({
                "accepted": true,
                "plantings": plantings,
            })),
        )
            .into_response(),
        Err(decision) => (StatusCode::UNPROCESSABLE_ENTITY, Json(decision)).into_response(),
    };
    Ok(response)
}

// ============================================================================
// Request Types
// ============================================================================

#[derive(Deserialize, Debug, Default)]
struct PlantSearchParams {
    q: Option<String>,
    /// Comma-separated, e.g. `herbs,greens`
    category: Option<String>,
    /// Comma-separated, e.g. `easy,medium`
    difficulty: Option<String>,
    min_growth_days: Option<u32>,
    max_growth_days: Option<u32>,
    limit: Option<usize>,
}

impl PlantSearchParams {
    fn into_filters(self) -> Result<PlantFilters, AppError> {
        let difficulty = split_list(self.difficulty.as_deref())
            .into_iter()
            .map(|d| d.parse::<Difficulty>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| AppError::BadRequest(e.to_string()))?;

        Ok(PlantFilters {
            categories: split_list(self.category.as_deref()),
            difficulty,
            min_growth_days: self.min_growth_days,
            max_growth_days: self.max_growth_days,
            search: self.q,
            limit: Some(self.limit.unwrap_or(DEFAULT_SEARCH_LIMIT).min(MAX_SEARCH_LIMIT)),
        })
    }
}

fn split_list(raw: Option<&str>) -> Vec<String> {
    raw.map(|s| {
        s.split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

#[derive(Deserialize, Debug)]
struct SystemBatchRequest {
    capacity: u32,
    #[serde(default)]
    placed_plants: Vec<PlacedPlant>,
    #[serde(default)]
    entries: Vec<PlantEntry>,
}

impl SystemBatchRequest {
    fn into_parts(self) -> (SystemSnapshot, Vec<PlantEntry>) {
        (SystemSnapshot::new(self.capacity, self.placed_plants), self.entries)
    }
}

// ============================================================================
// Error Handling
// ============================================================================

#[derive(Debug)]
enum AppError {
    NotFound(String),
    BadRequest(String),
    /// Body rejected by the JSON extractor (400 syntax, 422 data, 415 content type)
    InvalidBody(StatusCode, String),
    Internal(String),
}

// Malformed or mistyped request bodies
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidBody(rejection.status(), rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::InvalidBody(status, msg) => (status, msg),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(serde_json::json!({
            "error": message
        }));

        (status, body).into_response()
    }
}
