//! Read-only HTTP query surface.
//!
//! Every handler resolves `?days=` through the query's fallback rules and
//! returns JSON. Lookups of unknown CSRs or criteria answer 404 with
//! `{"error": "..."}`; anything else that fails answers 500.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use coachdash_core::{
    analytics::{
        CriterionDistribution, CriterionRanking, CsrRankingEntry, IndividualView, TimelinePoint,
    },
    model::{CriterionInfo, Csr},
    query::GlobalMetricsResponse,
    types::{CsrId, Days},
    DashboardError, DashboardQuery,
};
use serde::Serialize;
use tower_http::cors::CorsLayer;

/// Raw query pairs. Values stay strings and keys may repeat, so a malformed
/// or duplicated `days` falls back instead of rejecting the request.
type QueryPairs = Query<Vec<(String, String)>>;

/// Window for a request: the first `days` value, resolved with fallback.
fn requested_window(query: &DashboardQuery, pairs: &[(String, String)]) -> Days {
    let raw = pairs
        .iter()
        .find(|(key, _)| key == "days")
        .map(|(_, value)| value.as_str());
    query.resolve_window(raw)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Health {
    pub status: &'static str,
    pub snapshot_id: String,
    pub simulations: usize,
    pub csrs: usize,
}

#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    Internal(String),
}

impl From<DashboardError> for ApiError {
    fn from(err: DashboardError) -> Self {
        if err.is_not_found() {
            ApiError::NotFound(err.to_string())
        } else {
            ApiError::Internal(err.to_string())
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Internal(msg) => {
                log::error!("request failed: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };
        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

type ApiResult<T> = Result<Json<T>, ApiError>;

pub fn router(query: DashboardQuery) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/metrics/global", get(global_metrics))
        .route("/api/timeline", get(timeline))
        .route("/api/criteria", get(criteria))
        .route("/api/criteria/distribution", get(criteria_distribution))
        .route("/api/criteria/:key/ranking", get(criterion_ranking))
        .route("/api/csrs", get(csrs))
        .route("/api/csrs/ranking", get(csr_ranking))
        .route("/api/csrs/:id/data", get(csr_data))
        .layer(CorsLayer::permissive())
        .with_state(query)
}

async fn health(State(query): State<DashboardQuery>) -> Json<Health> {
    let dataset = query.dataset();
    Json(Health {
        status: "ok",
        snapshot_id: dataset.snapshot_id.clone(),
        simulations: dataset.simulations.len(),
        csrs: dataset.csrs.len(),
    })
}

async fn global_metrics(
    State(query): State<DashboardQuery>,
    Query(pairs): QueryPairs,
) -> Json<GlobalMetricsResponse> {
    let days = requested_window(&query, &pairs);
    Json(query.global_metrics(days))
}

async fn timeline(
    State(query): State<DashboardQuery>,
    Query(pairs): QueryPairs,
) -> Json<Vec<TimelinePoint>> {
    let days = requested_window(&query, &pairs);
    Json(query.timeline(days))
}

async fn criteria_distribution(
    State(query): State<DashboardQuery>,
    Query(pairs): QueryPairs,
) -> Json<Vec<CriterionDistribution>> {
    let days = requested_window(&query, &pairs);
    Json(query.criteria_distribution(days))
}

async fn csr_ranking(
    State(query): State<DashboardQuery>,
    Query(pairs): QueryPairs,
) -> Json<Vec<CsrRankingEntry>> {
    let days = requested_window(&query, &pairs);
    Json(query.csr_ranking(days))
}

async fn csr_data(
    State(query): State<DashboardQuery>,
    Path(raw_id): Path<String>,
    Query(pairs): QueryPairs,
) -> ApiResult<IndividualView> {
    // A non-numeric id can never match a CSR.
    let id: CsrId = raw_id
        .parse()
        .map_err(|_| ApiError::NotFound(format!("CSR not found: {raw_id}")))?;
    let days = requested_window(&query, &pairs);
    Ok(Json(query.csr_profile(id, days)?))
}

async fn criterion_ranking(
    State(query): State<DashboardQuery>,
    Path(key): Path<String>,
    Query(pairs): QueryPairs,
) -> ApiResult<CriterionRanking> {
    let days = requested_window(&query, &pairs);
    Ok(Json(query.criterion_ranking(&key, days)?))
}

async fn csrs(State(query): State<DashboardQuery>) -> Json<Vec<Csr>> {
    Json(query.csrs().to_vec())
}

async fn criteria(State(query): State<DashboardQuery>) -> Json<Vec<CriterionInfo>> {
    Json(query.criteria())
}
