//! String HTTP Routes
//!
//! - `POST   /strings` - analyze and store a string
//! - `GET    /strings` - structured filters over stored strings
//! - `GET    /strings/filter-by-natural-language?query=...`
//! - `GET    /strings/:value` - fetch one string
//! - `DELETE /strings/:value` - remove one string

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, Query, State,
    },
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::Value;

use crate::observability::Logger;
use crate::query::{self, FilterOutcome, FilterParams, NaturalLanguageOutcome};
use crate::store::StringRecord;

use super::errors::{ApiError, ApiResult};
use super::state::AppState;

/// Create string routes
pub fn string_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/strings", get(list_handler).post(create_handler))
        .route(
            "/strings/filter-by-natural-language",
            get(natural_language_handler),
        )
        .route("/strings/:value", get(get_handler).delete(delete_handler))
        .with_state(state)
}

async fn create_handler(
    State(state): State<Arc<AppState>>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<StringRecord>)> {
    let Json(body) = body.map_err(|e| state.reject(ApiError::InvalidBody(e.body_text())))?;

    let record = state.store.insert_json(&body).map_err(|e| state.reject(e))?;
    state.metrics.increment_created();

    let length = record.properties.length.to_string();
    Logger::info("STRING_CREATED", &[("id", record.id.as_str()), ("length", length.as_str())]);

    Ok((StatusCode::CREATED, Json(record)))
}

async fn get_handler(
    State(state): State<Arc<AppState>>,
    path: Result<Path<String>, PathRejection>,
) -> ApiResult<Json<StringRecord>> {
    let value = path_value(&state, path)?;
    let record = state.store.get(&value).map_err(|e| state.reject(e))?;
    Ok(Json(record))
}

async fn list_handler(
    State(state): State<Arc<AppState>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> ApiResult<Json<FilterOutcome>> {
    let params: FilterParams = pairs.into_iter().collect();
    let records = state.store.list().map_err(|e| state.reject(e))?;
    let outcome = query::filter_records(&params, &records).map_err(|e| state.reject(e))?;

    state.metrics.increment_filter_queries();
    Ok(Json(outcome))
}

async fn natural_language_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult<Json<NaturalLanguageOutcome>> {
    let records = state.store.list().map_err(|e| state.reject(e))?;
    let outcome = query::interpret(params.get("query").map(String::as_str), &records)
        .map_err(|e| state.reject(e))?;

    state.metrics.record_nl_query(outcome.is_parsed());
    if !outcome.is_parsed() {
        Logger::info(
            "NL_QUERY_UNPARSED",
            &[("query", outcome.interpreted_query.original.as_str())],
        );
    }

    Ok(Json(outcome))
}

async fn delete_handler(
    State(state): State<Arc<AppState>>,
    path: Result<Path<String>, PathRejection>,
) -> ApiResult<StatusCode> {
    let value = path_value(&state, path)?;
    state.store.delete(&value).map_err(|e| state.reject(e))?;
    state.metrics.increment_deleted();

    Logger::info("STRING_DELETED", &[("value", value.as_str())]);
    Ok(StatusCode::NO_CONTENT)
}

fn path_value(state: &AppState, path: Result<Path<String>, PathRejection>) -> ApiResult<String> {
    path.map(|Path(value)| value)
        .map_err(|e| state.reject(ApiError::InvalidPath(e.body_text())))
}
