//! HTTP API handlers.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, info, instrument};
use utoipa::{IntoParams, ToSchema};

use crate::error::{ApiError, ApiResult, ErrorBody, FieldError};
use crate::metrics;
use crate::store::{Candidate, CandidateId, CandidatePatch, CandidateStore, NewCandidate};

/// Default page size for listings.
pub const DEFAULT_LIMIT: i64 = 100;
/// Largest page size a client may ask for.
pub const MAX_LIMIT: i64 = 100;

/// Application state shared with handlers.
#[derive(Clone)]
pub struct AppState {
    /// The candidate collection. Mutations take the write lock.
    pub store: Arc<RwLock<CandidateStore>>,
    /// Prometheus handle, when a recorder is installed.
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create app state around a store.
    pub fn new(store: CandidateStore) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
            metrics: None,
        }
    }

    /// Attach the Prometheus handle used by `/metrics`.
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(CandidateStore::with_sample_data())
    }
}

/// Plain message response.
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Status: "healthy".
    pub status: String,
    pub message: String,
}

/// One page of candidates.
#[derive(Debug, Serialize, ToSchema)]
pub struct CandidateListResponse {
    /// Candidates in this page.
    pub candidates: Vec<Candidate>,
    /// Total number of candidates (or matches, when searching).
    pub total: usize,
    /// 1-based page number, `skip / limit + 1`.
    pub page: usize,
    /// Requested page size.
    pub size: usize,
}

/// Aggregate counts.
#[derive(Debug, Serialize, ToSchema)]
pub struct StatsResponse {
    pub total_candidates: usize,
    /// Candidates per party.
    pub parties: BTreeMap<String, usize>,
    pub unique_parties: usize,
}

/// Query string of `GET /api/candidates`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListParams {
    /// Number of candidates to skip.
    pub skip: Option<i64>,
    /// Maximum number of candidates to return (1-100).
    pub limit: Option<i64>,
    /// Search query for candidates.
    pub search: Option<String>,
}

impl ListParams {
    /// Validated `(skip, limit)` window.
    pub fn window(&self) -> ApiResult<(usize, usize)> {
        let skip = self.skip.unwrap_or(0);
        let limit = self.limit.unwrap_or(DEFAULT_LIMIT);

        let mut errors = Vec::new();
        if skip < 0 {
            errors.push(FieldError::new("skip", "must be greater than or equal to 0"));
        }
        if !(1..=MAX_LIMIT).contains(&limit) {
            errors.push(FieldError::new(
                "limit",
                format!("must be between 1 and {}", MAX_LIMIT),
            ));
        }
        if !errors.is_empty() {
            return Err(ApiError::Validation(errors));
        }

        let skip = usize::try_from(skip).map_err(|_| ApiError::invalid("skip", "out of range"))?;
        let limit =
            usize::try_from(limit).map_err(|_| ApiError::invalid("limit", "out of range"))?;
        Ok((skip, limit))
    }

    /// Search term, if a non-empty one was given.
    pub fn search_term(&self) -> Option<&str> {
        self.search.as_deref().filter(|s| !s.is_empty())
    }
}

/// Query string of `GET /api/candidates/search`.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchParams {
    /// Search query.
    pub query: String,
}

/// Body of `POST /api/candidates`. Fields are optional here so missing ones
/// can be reported individually.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateCandidateRequest {
    pub name: Option<String>,
    pub image: Option<String>,
    pub political_party: Option<String>,
    pub description: Option<String>,
}

impl CreateCandidateRequest {
    /// Check every required field is present.
    pub fn validate(self) -> ApiResult<NewCandidate> {
        let mut errors = Vec::new();
        let mut require = |value: Option<String>, field: &str| {
            if value.is_none() {
                errors.push(FieldError::new(field, "field required"));
            }
            value.unwrap_or_default()
        };

        let candidate = NewCandidate {
            name: require(self.name, "name"),
            image: require(self.image, "image"),
            political_party: require(self.political_party, "politicalParty"),
            description: require(self.description, "description"),
        };

        if errors.is_empty() {
            Ok(candidate)
        } else {
            Err(ApiError::Validation(errors))
        }
    }
}

fn json_rejection(rejection: JsonRejection) -> ApiError {
    match rejection {
        JsonRejection::JsonDataError(e) => ApiError::invalid("body", e.body_text()),
        JsonRejection::JsonSyntaxError(e) => ApiError::BadRequest(e.body_text()),
        JsonRejection::MissingJsonContentType(e) => ApiError::BadRequest(e.body_text()),
        JsonRejection::BytesRejection(e) => ApiError::BadRequest(e.body_text()),
        other => ApiError::Internal(other.body_text()),
    }
}

/// Resolve the `{id}` path segment. Any integer is accepted; negative ids
/// can never exist and resolve to not-found.
fn candidate_id(id: Result<Path<i64>, PathRejection>) -> ApiResult<CandidateId> {
    let Path(id) = id.map_err(|rejection| {
        debug!("Rejected path: {}", rejection.body_text());
        ApiError::invalid("id", "must be an integer")
    })?;
    CandidateId::try_from(id).map_err(|_| ApiError::candidate_not_found())
}

fn query_rejection(rejection: QueryRejection) -> ApiError {
    ApiError::invalid("query", rejection.body_text())
}

/// Root liveness message.
#[utoipa::path(get, path = "/", tag = "health",
    responses((status = 200, description = "Service is running", body = MessageResponse)))]
pub async fn root() -> Json<MessageResponse> {
    Json(MessageResponse::new("Political Candidates API is running!"))
}

/// Health check handler - always returns 200.
#[utoipa::path(get, path = "/health", tag = "health",
    responses((status = 200, description = "Service is healthy", body = HealthResponse)))]
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        message: "API is operational".to_string(),
    })
}

/// List candidates with pagination, optionally filtered by a search term.
#[utoipa::path(get, path = "/api/candidates", tag = "candidates",
    params(ListParams),
    responses(
        (status = 200, description = "One page of candidates", body = CandidateListResponse),
        (status = 422, description = "Invalid pagination", body = ErrorBody),
    ))]
pub async fn list_candidates(
    State(state): State<AppState>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> ApiResult<Json<CandidateListResponse>> {
    let Query(params) = params.map_err(query_rejection)?;
    let (skip, limit) = params.window()?;

    let store = state.store.read().await;
    let (candidates, total) = match params.search_term() {
        // Search results are returned whole; skip/limit only shape page and size.
        Some(query) => {
            let matches: Vec<Candidate> = store.search(query).into_iter().cloned().collect();
            let total = matches.len();
            (matches, total)
        }
        None => (store.list(skip, limit).to_vec(), store.count()),
    };

    Ok(Json(CandidateListResponse {
        candidates,
        total,
        page: skip / limit + 1,
        size: limit,
    }))
}

/// Fetch one candidate.
#[utoipa::path(get, path = "/api/candidates/{id}", tag = "candidates",
    params(("id" = i64, Path, description = "Candidate id")),
    responses(
        (status = 200, description = "The candidate", body = Candidate),
        (status = 404, description = "Unknown id", body = ErrorBody),
    ))]
pub async fn get_candidate(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<Candidate>> {
    let id = candidate_id(id)?;

    let store = state.store.read().await;
    store
        .get(id)
        .cloned()
        .map(Json)
        .ok_or_else(ApiError::candidate_not_found)
}

/// Create a candidate.
#[utoipa::path(post, path = "/api/candidates", tag = "candidates",
    request_body = NewCandidate,
    responses(
        (status = 201, description = "Created", body = Candidate),
        (status = 400, description = "Malformed body", body = ErrorBody),
        (status = 422, description = "Missing or invalid fields", body = ErrorBody),
    ))]
#[instrument(skip_all)]
pub async fn create_candidate(
    State(state): State<AppState>,
    body: Result<Json<CreateCandidateRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Candidate>)> {
    let Json(request) = body.map_err(json_rejection)?;
    let fields = request.validate()?;

    let mut store = state.store.write().await;
    let candidate = store.create(fields);
    metrics::inc_candidates_created();
    metrics::set_candidates_stored(store.count());

    info!(id = candidate.id, name = %candidate.name, "Created candidate");
    Ok((StatusCode::CREATED, Json(candidate)))
}

/// Update a candidate. PUT and PATCH share this handler.
#[utoipa::path(patch, path = "/api/candidates/{id}", tag = "candidates",
    params(("id" = i64, Path, description = "Candidate id")),
    request_body = CandidatePatch,
    responses(
        (status = 200, description = "Updated", body = Candidate),
        (status = 404, description = "Unknown id", body = ErrorBody),
        (status = 422, description = "Invalid fields", body = ErrorBody),
    ))]
#[instrument(skip_all)]
pub async fn update_candidate(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<CandidatePatch>, JsonRejection>,
) -> ApiResult<Json<Candidate>> {
    let id = candidate_id(id)?;
    let Json(patch) = body.map_err(json_rejection)?;
    if patch.is_empty() {
        debug!(id, "Empty patch, only updatedAt changes");
    }

    let mut store = state.store.write().await;
    let candidate = store
        .update(id, patch)
        .ok_or_else(ApiError::candidate_not_found)?;
    metrics::inc_candidates_updated();

    info!(id, "Updated candidate");
    Ok(Json(candidate))
}

/// Delete a candidate.
#[utoipa::path(delete, path = "/api/candidates/{id}", tag = "candidates",
    params(("id" = i64, Path, description = "Candidate id")),
    responses(
        (status = 200, description = "Deleted", body = MessageResponse),
        (status = 404, description = "Unknown id", body = ErrorBody),
    ))]
#[instrument(skip_all)]
pub async fn delete_candidate(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let id = candidate_id(id)?;

    let mut store = state.store.write().await;
    if !store.delete(id) {
        return Err(ApiError::candidate_not_found());
    }
    metrics::inc_candidates_deleted();
    metrics::set_candidates_stored(store.count());

    info!(id, "Deleted candidate");
    Ok(Json(MessageResponse::new("Candidate deleted successfully")))
}

/// Candidates of one party, matched exactly.
#[utoipa::path(get, path = "/api/candidates/party/{party}", tag = "candidates",
    params(("party" = String, Path, description = "Exact party name")),
    responses((status = 200, description = "Matching candidates", body = [Candidate])))]
pub async fn candidates_by_party(
    State(state): State<AppState>,
    Path(party): Path<String>,
) -> Json<Vec<Candidate>> {
    let store = state.store.read().await;
    Json(store.filter_by_party(&party).into_iter().cloned().collect())
}

/// Case-insensitive search over name, party and description.
#[utoipa::path(get, path = "/api/candidates/search", tag = "candidates",
    params(SearchParams),
    responses(
        (status = 200, description = "Matching candidates", body = [Candidate]),
        (status = 422, description = "Missing query", body = ErrorBody),
    ))]
pub async fn search_candidates(
    State(state): State<AppState>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> ApiResult<Json<Vec<Candidate>>> {
    let Query(params) = params.map_err(query_rejection)?;

    let store = state.store.read().await;
    Ok(Json(store.search(&params.query).into_iter().cloned().collect()))
}

/// Total count and per-party counts.
#[utoipa::path(get, path = "/api/stats", tag = "candidates",
    responses((status = 200, description = "Aggregate counts", body = StatsResponse)))]
pub async fn stats(State(state): State<AppState>) -> Json<StatsResponse> {
    let store = state.store.read().await;
    let parties = store.party_counts();

    Json(StatsResponse {
        total_candidates: store.count(),
        unique_parties: parties.len(),
        parties,
    })
}

/// Prometheus exposition - returns 503 when no recorder is installed.
pub async fn metrics_page(State(state): State<AppState>) -> Response {
    match &state.metrics {
        Some(handle) => (
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            handle.render(),
        )
            .into_response(),
        None => (StatusCode::SERVICE_UNAVAILABLE, "metrics recorder not installed").into_response(),
    }
}
