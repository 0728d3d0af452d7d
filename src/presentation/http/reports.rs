use axum::{Json, Router, extract::State, http::StatusCode, routing::get};

use crate::application::access::Actor;
use crate::application::services::reports::progress::{ReportAction, ReportProgressState};
use crate::bootstrap::app_context::AppContext;
use crate::presentation::http::actor::RequestActor;
use crate::presentation::http::error::{ApiError, ErrorBody};

/// Report progress belongs to whoever opened the dialog, so callers must be
/// identified.
fn identified(actor: Actor) -> Result<Actor, ApiError> {
    match actor {
        Actor::Anonymous => Err(ApiError::new(
            StatusCode::FORBIDDEN,
            "report progress requires an identified user",
        )),
        user => Ok(user),
    }
}

#[utoipa::path(get, path = "/api/reports/progress", tag = "Reports",
    responses((status = 200, body = ReportProgressState), (status = 403, body = ErrorBody)))]
pub async fn get_progress(
    State(ctx): State<AppContext>,
    RequestActor(actor): RequestActor,
) -> Result<Json<ReportProgressState>, ApiError> {
    let actor = identified(actor)?;
    Ok(Json(ctx.report_tracker().snapshot(&actor).await))
}

#[utoipa::path(post, path = "/api/reports/progress", tag = "Reports",
    request_body = ReportAction,
    responses((status = 200, body = ReportProgressState), (status = 403, body = ErrorBody)))]
pub async fn dispatch_action(
    State(ctx): State<AppContext>,
    RequestActor(actor): RequestActor,
    Json(action): Json<ReportAction>,
) -> Result<Json<ReportProgressState>, ApiError> {
    let actor = identified(actor)?;
    Ok(Json(ctx.report_tracker().dispatch(&actor, action).await))
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/reports/progress", get(get_progress).post(dispatch_action))
        .with_state(ctx)
}
