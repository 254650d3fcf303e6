//! HTTP route handlers for the persons API

use axum::extract::{Path, Query, State};
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderValue, Method};
use axum::response::Json;
use axum::routing::get;
use axum::Router;
use serde::Deserialize;
use serde_json::{json, Value};
use tower_http::cors::{Any, CorsLayer};
use tracing::debug;

use crate::db::persons::{self, PersonQuery, PersonRow, Stats};
use crate::error::ApiError;
use crate::state::SharedState;

/// Build the API router
pub fn create_router(state: SharedState) -> Result<Router, ApiError> {
    let cors = match &state.config.cors_allowed_origin {
        Some(origin) => {
            let origin = origin
                .parse::<HeaderValue>()
                .map_err(|e| ApiError::Config(format!("Invalid CORS origin {:?}: {}", origin, e)))?;
            CorsLayer::new()
                .allow_origin(origin)
                .allow_methods([Method::GET, Method::OPTIONS])
                .allow_headers([CONTENT_TYPE])
        }
        None => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::OPTIONS])
            .allow_headers([CONTENT_TYPE]),
    };

    Ok(Router::new()
        .route("/", get(api_index))
        .route("/health", get(health))
        .route("/api/persons", get(list_persons))
        .route("/api/persons/:id", get(get_person))
        .route("/api/categories", get(list_categories))
        .route("/api/countries", get(list_countries))
        .route("/api/stats", get(get_stats))
        .layer(cors)
        .with_state(state))
}

/// GET / - API index
async fn api_index() -> Json<Value> {
    Json(json!({
        "message": "Chronoline API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "persons": "/api/persons?category=&country=&startYear=&endYear=",
            "person": "/api/persons/:id",
            "categories": "/api/categories",
            "countries": "/api/countries",
            "stats": "/api/stats",
        },
    }))
}

/// GET /health
async fn health() -> &'static str {
    "OK"
}

/// Query string for GET /api/persons. Year values arrive as strings so a
/// malformed number yields the API's JSON error shape rather than an
/// extractor rejection.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonsParams {
    pub category: Option<String>,
    pub country: Option<String>,
    pub start_year: Option<String>,
    pub end_year: Option<String>,
}

impl PersonsParams {
    fn into_query(self) -> Result<PersonQuery, ApiError> {
        Ok(PersonQuery {
            categories: split_csv(self.category.as_deref()),
            countries: split_csv(self.country.as_deref()),
            start_year: parse_year(self.start_year.as_deref(), "startYear")?,
            end_year: parse_year(self.end_year.as_deref(), "endYear")?,
        })
    }
}

/// Split a comma-separated filter value into trimmed, non-empty tokens
fn split_csv(value: Option<&str>) -> Vec<String> {
    value
        .map(|v| {
            v.split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(String::from)
                .collect()
        })
        .unwrap_or_default()
}

fn parse_year(value: Option<&str>, name: &str) -> Result<Option<i32>, ApiError> {
    match value {
        None => Ok(None),
        Some(raw) => {
            let raw = raw.trim();
            if raw.is_empty() {
                return Ok(None);
            }
            raw.parse::<i32>()
                .map(Some)
                .map_err(|_| ApiError::BadRequest(format!("Invalid {}: {:?}", name, raw)))
        }
    }
}

/// GET /api/persons - filtered person list, ordered by birth year
pub async fn list_persons(
    State(state): State<SharedState>,
    Query(params): Query<PersonsParams>,
) -> Result<Json<Vec<PersonRow>>, ApiError> {
    let query = params.into_query()?;
    debug!(?query, "listing persons");

    let rows = state.db.with_conn(|conn| persons::list_persons(conn, &query))?;
    Ok(Json(rows))
}

/// GET /api/persons/:id - one person, or 404
pub async fn get_person(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<PersonRow>, ApiError> {
    let id = id.trim().to_string();
    if id.is_empty() {
        return Err(ApiError::BadRequest("Missing person id".to_string()));
    }

    let person = state.db.with_conn(|conn| persons::get_person(conn, &id))?;
    person
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("Person not found".to_string()))
}

/// GET /api/categories - distinct categories, alphabetical
pub async fn list_categories(
    State(state): State<SharedState>,
) -> Result<Json<Vec<String>>, ApiError> {
    let categories = state.db.with_conn(persons::list_categories)?;
    Ok(Json(categories))
}

/// GET /api/countries - distinct individual country names, alphabetical
pub async fn list_countries(
    State(state): State<SharedState>,
) -> Result<Json<Vec<String>>, ApiError> {
    let countries = state.db.with_conn(persons::list_countries)?;
    Ok(Json(countries))
}

/// GET /api/stats - dataset overview and per-group counts
pub async fn get_stats(State(state): State<SharedState>) -> Result<Json<Stats>, ApiError> {
    let stats = state.db.with_conn(persons::stats)?;
    Ok(Json(stats))
}
