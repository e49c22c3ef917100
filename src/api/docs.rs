//! OpenAPI document for the HTTP API.

use axum::Json;
use utoipa::OpenApi;

use super::handlers;
use crate::error::{ErrorBody, FieldError};
use crate::store::{Candidate, CandidatePatch, NewCandidate};

/// OpenAPI description of every public route.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Political Candidates API",
        description = "HTTP API for managing political candidates",
        version = "1.0.0"
    ),
    paths(
        handlers::root,
        handlers::health,
        handlers::list_candidates,
        handlers::get_candidate,
        handlers::create_candidate,
        handlers::update_candidate,
        handlers::delete_candidate,
        handlers::candidates_by_party,
        handlers::search_candidates,
        handlers::stats,
    ),
    components(schemas(
        Candidate,
        NewCandidate,
        CandidatePatch,
        ErrorBody,
        FieldError,
        handlers::CandidateListResponse,
        handlers::StatsResponse,
        handlers::MessageResponse,
        handlers::HealthResponse,
    )),
    tags(
        (name = "candidates", description = "Candidate records"),
        (name = "health", description = "Liveness checks"),
    )
)]
pub struct ApiDoc;

/// Serve the OpenAPI document as JSON.
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
