//! HTTP adapter for the issue tracker.
//!
//! Routes:
//!
//! - `POST /issue` creates an issue (`201 Created`)
//! - `GET /issues?status=` lists issues, optionally filtered by status
//! - `GET /issue/{id}` fetches one issue
//! - `PATCH /issue/{id}` partially updates an issue
//! - `GET /users` lists the users issues can be assigned to
//! - `GET /healthz` reports liveness
//!
//! Unknown paths and unsupported methods answer `404 Not Found` with the
//! usual JSON error body.
//!
//! Handlers only translate between HTTP and [`IssueTrackerService`]; every
//! rule lives in the issue module.

mod dto;
mod error;


pub use dto::{
    CreateIssueBody, IssueListResponse, IssueResponse, ListIssuesQuery, PatchIssueBody,
    UserListResponse,
};
pub use error::{ApiError, ErrorBody};

use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::{HeaderValue, Method, StatusCode, header, header::InvalidHeaderValue},
    routing::{get, post},
};
use mockable::DefaultClock;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::issue::{
    adapters::memory::{InMemoryIssueRepository, StaticUserDirectory},
    domain::{Issue, IssueId},
    services::IssueTrackerService,
};

/// Issue tracker wired to the in-memory adapters served over HTTP.
pub type TrackerService =
    IssueTrackerService<InMemoryIssueRepository, StaticUserDirectory, DefaultClock>;

/// Builds the CORS policy for `allowed_origin` (`*` allows any origin).
///
/// # Errors
///
/// Returns [`InvalidHeaderValue`] when `allowed_origin` is not a valid
/// header value.
pub fn cors_layer(allowed_origin: &str) -> Result<CorsLayer, InvalidHeaderValue> {
    let origin = if allowed_origin.trim() == "*" {
        AllowOrigin::from(Any)
    } else {
        AllowOrigin::exact(HeaderValue::from_str(allowed_origin.trim())?)
    };
    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]))
}

/// Builds the router serving `service`.
#[must_use]
pub fn build_router(service: TrackerService, cors: CorsLayer) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/issue", post(create_issue))
        .route("/issues", get(list_issues))
        .route("/issue/:id", get(get_issue).patch(update_issue))
        .route("/users", get(list_users))
        .method_not_allowed_fallback(not_found)
        .fallback(not_found)
        .layer(cors)
        .with_state(service)
}

fn render(service: &TrackerService, issue: &Issue) -> IssueResponse {
    IssueResponse::new(issue, service.assignee_of(issue))
}

fn parse_issue_id(raw: &str) -> Result<IssueId, ApiError> {
    raw.parse::<u64>()
        .map(IssueId::new)
        .map_err(|_| ApiError::bad_request(format!("invalid issue id: {raw}")))
}

fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| ApiError::bad_request(format!("invalid request body: {rejection}")))
}

async fn healthz() -> &'static str {
    "ok"
}

async fn not_found() -> ApiError {
    ApiError::new(StatusCode::NOT_FOUND, "not found")
}

async fn create_issue(
    State(service): State<TrackerService>,
    payload: Result<Json<CreateIssueBody>, JsonRejection>,
) -> Result<(StatusCode, Json<IssueResponse>), ApiError> {
    let body = json_body(payload)?;
    let issue = service.create(body.into()).await?;
    Ok((StatusCode::CREATED, Json(render(&service, &issue))))
}

async fn list_issues(
    State(service): State<TrackerService>,
    Query(query): Query<ListIssuesQuery>,
) -> Result<Json<IssueListResponse>, ApiError> {
    let filter = query.status.as_deref().filter(|status| !status.is_empty());
    let issues = service.list(filter).await?;
    Ok(Json(IssueListResponse {
        issues: issues.iter().map(|issue| render(&service, issue)).collect(),
    }))
}

async fn get_issue(
    State(service): State<TrackerService>,
    Path(raw_id): Path<String>,
) -> Result<Json<IssueResponse>, ApiError> {
    let id = parse_issue_id(&raw_id)?;
    let issue = service.find_by_id(id).await?;
    Ok(Json(render(&service, &issue)))
}

async fn update_issue(
    State(service): State<TrackerService>,
    Path(raw_id): Path<String>,
    payload: Result<Json<PatchIssueBody>, JsonRejection>,
) -> Result<Json<IssueResponse>, ApiError> {
    let id = parse_issue_id(&raw_id)?;
    let body = json_body(payload)?;
    let issue = service.update(id, body.into()).await?;
    Ok(Json(render(&service, &issue)))
}

async fn list_users(State(service): State<TrackerService>) -> Json<UserListResponse> {
    Json(UserListResponse {
        users: service.users(),
    })
}
