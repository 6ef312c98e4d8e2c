//! API handlers

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};
use uuid::Uuid;

use super::models::{
    error_codes, ApiError, HealthResponse, MatchRequest, MatchResponse, StepStateResponse,
    MAX_CANDIDATES,
};
use crate::catalog::DismantlingCatalog;
use crate::checklist::{
    parse_checklist_request, ChecklistError, ChecklistGenerator, ChecklistRequest,
};
use crate::matcher::{CategoryMatcher, MatcherConfig};
use crate::metrics::METRICS;
use crate::planner::{DismantlingPlan, DismantlingPlanner, Lot};
use crate::session::{
    ChecklistSession, SessionError, SessionOrigin, SessionStore, SessionView, StepToggle,
};

type ApiResult<T> = Result<T, (StatusCode, Json<ApiError>)>;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub planner: Arc<DismantlingPlanner>,
    pub sessions: Arc<SessionStore>,
}

impl AppState {
    pub fn new(
        catalog: Arc<DismantlingCatalog>,
        matcher_config: MatcherConfig,
        sessions: SessionStore,
    ) -> Self {
        let matcher = Arc::new(CategoryMatcher::new(catalog, matcher_config));
        Self {
            planner: Arc::new(DismantlingPlanner::new(matcher, ChecklistGenerator::new())),
            sessions: Arc::new(sessions),
        }
    }

    fn catalog(&self) -> &DismantlingCatalog {
        self.planner.matcher().catalog()
    }
}

fn checklist_rejection(e: ChecklistError) -> (StatusCode, Json<ApiError>) {
    let (kind, code) = match e {
        ChecklistError::Parse(_) => ("parse", error_codes::PARSE_ERROR),
        ChecklistError::Validation(_) => ("validation", error_codes::VALIDATION_ERROR),
    };
    METRICS.record_input_error(kind);
    warn!("Rejected checklist request: {}", e);
    (StatusCode::BAD_REQUEST, Json(ApiError::new(code, e.to_string())))
}

fn session_rejection(e: SessionError) -> (StatusCode, Json<ApiError>) {
    let (status, code) = match e {
        SessionError::NotFound(_) => (StatusCode::NOT_FOUND, error_codes::NOT_FOUND),
        SessionError::UnknownStep { .. } => (StatusCode::BAD_REQUEST, error_codes::UNKNOWN_STEP),
    };
    (status, Json(ApiError::new(code, e.to_string())))
}

/// Validate a lot and build its plan; shared by every lot endpoint
fn planned_lot(state: &AppState, lot: &Lot) -> ApiResult<DismantlingPlan> {
    lot.validate().map_err(checklist_rejection)?;
    let plan = state.planner.plan(lot);
    METRICS.record_match(plan.configuration.is_some());
    Ok(plan)
}

/// GET /health
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let catalog = state.catalog();
    Json(HealthResponse {
        status: "ok".to_string(),
        catalog_categories: catalog.category_count(),
        configured_subcategories: catalog.configured_count(),
        active_sessions: state.sessions.len(),
    })
}

/// GET /metrics
pub async fn metrics() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        METRICS.export_prometheus(),
    )
}

/// GET /api/v1/catalog
pub async fn get_catalog(State(state): State<AppState>) -> Json<DismantlingCatalog> {
    Json(state.catalog().clone())
}

/// Find the dismantling configuration for a category name
///
/// POST /api/v1/dismantling/match
pub async fn match_category(
    State(state): State<AppState>,
    Json(request): Json<MatchRequest>,
) -> ApiResult<Json<MatchResponse>> {
    let start = Instant::now();

    if request.limit > MAX_CANDIDATES {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ApiError::new(
                error_codes::VALIDATION_ERROR,
                format!("limit cannot exceed {}", MAX_CANDIDATES),
            )),
        ));
    }

    let matcher = state.planner.matcher();
    let best = matcher.find_best_match(&request.category_name);
    let candidates = matcher.rank(&request.category_name, request.limit);

    METRICS.record_match(best.is_some());
    METRICS.observe_request("match", start.elapsed().as_secs_f64());
    info!(
        "Category match for '{}': {}",
        request.category_name,
        best.as_ref()
            .map(|m| m.matched_sub_category.as_str())
            .unwrap_or("unavailable")
    );

    Ok(Json(MatchResponse {
        available: best.is_some(),
        best,
        candidates,
    }))
}

/// Build the dismantling plan for a lot
///
/// POST /api/v1/dismantling/plan
pub async fn plan_lot(
    State(state): State<AppState>,
    Json(lot): Json<Lot>,
) -> ApiResult<Json<DismantlingPlan>> {
    let plan = crate::time_operation!("plan", planned_lot(&state, &lot))?;
    METRICS.record_checklist(plan.component_source.as_str());
    Ok(Json(plan))
}

/// Create a checklist session from a raw JSON request
///
/// POST /api/v1/checklists
pub async fn create_checklist(
    State(state): State<AppState>,
    body: String,
) -> ApiResult<(StatusCode, Json<SessionView>)> {
    let start = Instant::now();

    let request = parse_checklist_request(&body).map_err(checklist_rejection)?;
    let checklist = state.planner.generator().generate(&request);
    let view = state
        .sessions
        .insert(ChecklistSession::new(SessionOrigin::Json, request, checklist));

    METRICS.record_checklist("json");
    METRICS.set_active_sessions(state.sessions.len());
    METRICS.observe_request("create_checklist", start.elapsed().as_secs_f64());
    info!("Created checklist session {} ({} steps)", view.id, view.checklist.steps.len());

    Ok((StatusCode::CREATED, Json(view)))
}

/// Create a checklist session for a lot
///
/// POST /api/v1/dismantling/checklists
pub async fn create_lot_checklist(
    State(state): State<AppState>,
    Json(lot): Json<Lot>,
) -> ApiResult<(StatusCode, Json<SessionView>)> {
    let plan = planned_lot(&state, &lot)?;
    let request = ChecklistRequest::new(
        lot.category_name.clone(),
        plan.configuration
            .as_ref()
            .map(|m| m.matched_sub_category.clone())
            .unwrap_or_default(),
        plan.components,
    );
    let origin = SessionOrigin::Lot {
        code: lot.code.clone(),
    };
    let view = state
        .sessions
        .insert(ChecklistSession::new(origin, request, plan.checklist));

    METRICS.record_checklist(plan.component_source.as_str());
    METRICS.set_active_sessions(state.sessions.len());
    info!("Created checklist session {} for lot {}", view.id, lot.code);

    Ok((StatusCode::CREATED, Json(view)))
}

/// GET /api/v1/checklists/:id
pub async fn get_checklist(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<SessionView>> {
    state.sessions.get(id).map(Json).map_err(session_rejection)
}

/// Regenerate a session's checklist from a raw JSON request.
///
/// A rejected request leaves the previous checklist and its state intact.
///
/// PUT /api/v1/checklists/:id
pub async fn regenerate_checklist(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    body: String,
) -> ApiResult<Json<SessionView>> {
    // fail before touching the session
    state.sessions.get(id).map_err(session_rejection)?;
    let request = parse_checklist_request(&body).map_err(checklist_rejection)?;
    let checklist = state.planner.generator().generate(&request);

    let view = state
        .sessions
        .update(id, |session| {
            session.regenerate(SessionOrigin::Json, request, checklist);
            Ok::<_, SessionError>(session.view())
        })
        .map_err(session_rejection)?;

    METRICS.record_checklist("json");
    info!("Regenerated checklist session {}", id);
    Ok(Json(view))
}

/// DELETE /api/v1/checklists/:id
pub async fn delete_checklist(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    state.sessions.remove(id).map_err(session_rejection)?;
    METRICS.set_active_sessions(state.sessions.len());
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/checklists/:id/steps/:step/expand
pub async fn expand_step(
    State(state): State<AppState>,
    Path((id, step)): Path<(Uuid, u32)>,
) -> ApiResult<Json<StepStateResponse>> {
    toggle_step(&state, id, step, StepToggle::Expanded)
}

/// POST /api/v1/checklists/:id/steps/:step/complete
pub async fn complete_step(
    State(state): State<AppState>,
    Path((id, step)): Path<(Uuid, u32)>,
) -> ApiResult<Json<StepStateResponse>> {
    toggle_step(&state, id, step, StepToggle::Completed)
}

fn toggle_step(
    state: &AppState,
    id: Uuid,
    step: u32,
    toggle: StepToggle,
) -> ApiResult<Json<StepStateResponse>> {
    let response = state
        .sessions
        .update(id, |session| {
            session.toggle(step, toggle)?;
            Ok::<_, SessionError>(StepStateResponse {
                step_number: step,
                expanded: session.state.is_expanded(step),
                completed: session.state.is_completed(step),
                completed_count: session.state.completed_count(),
                finished: session.is_finished(),
            })
        })
        .map_err(session_rejection)?;

    METRICS.record_toggle(toggle.as_str());
    Ok(Json(response))
}
