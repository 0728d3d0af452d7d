use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::services::filters::FilterCriteria;
use crate::application::use_cases::meetings::create_meeting::CreateMeeting;
use crate::application::use_cases::meetings::list_meetings::ListMeetings;
use crate::bootstrap::app_context::AppContext;
use crate::domain::meetings::meeting::{MeetingFields, MeetingMetadata};
use crate::presentation::http::actor::RequestActor;
use crate::presentation::http::error::ApiError;

#[derive(Debug, Serialize, ToSchema)]
pub struct MeetingListResponse {
    pub items: Vec<MeetingMetadata>,
}

#[utoipa::path(get, path = "/api/projects/{project_id}/meetings", tag = "Meetings",
    params(("project_id" = Uuid, Path, description = "Project ID")),
    responses((status = 200, body = MeetingListResponse)))]
pub async fn list_meetings(
    State(ctx): State<AppContext>,
    RequestActor(actor): RequestActor,
    Path(project_id): Path<Uuid>,
) -> Result<Json<MeetingListResponse>, ApiError> {
    query_with(&ctx, &actor, project_id, &FilterCriteria::default()).await
}

#[utoipa::path(post, path = "/api/projects/{project_id}/meetings/query", tag = "Meetings",
    params(("project_id" = Uuid, Path, description = "Project ID")),
    request_body = FilterCriteria,
    responses((status = 200, body = MeetingListResponse)))]
pub async fn query_meetings(
    State(ctx): State<AppContext>,
    RequestActor(actor): RequestActor,
    Path(project_id): Path<Uuid>,
    Json(criteria): Json<FilterCriteria>,
) -> Result<Json<MeetingListResponse>, ApiError> {
    query_with(&ctx, &actor, project_id, &criteria).await
}

async fn query_with(
    ctx: &AppContext,
    actor: &crate::application::access::Actor,
    project_id: Uuid,
    criteria: &FilterCriteria,
) -> Result<Json<MeetingListResponse>, ApiError> {
    let repo = ctx.document_repo();
    let permissions = ctx.permissions();
    let uc = ListMeetings {
        repo: repo.as_ref(),
        permissions: permissions.as_ref(),
    };
    let items = uc.execute(actor, project_id, criteria).await?;
    Ok(Json(MeetingListResponse { items }))
}

#[utoipa::path(post, path = "/api/projects/{project_id}/meetings", tag = "Meetings",
    params(("project_id" = Uuid, Path, description = "Project ID")),
    request_body = MeetingFields,
    responses((status = 200, body = MeetingMetadata)))]
pub async fn create_meeting(
    State(ctx): State<AppContext>,
    RequestActor(actor): RequestActor,
    Path(project_id): Path<Uuid>,
    Json(fields): Json<MeetingFields>,
) -> Result<Json<MeetingMetadata>, ApiError> {
    let _guard = ctx.write_guard(project_id).await;
    let repo = ctx.document_repo();
    let permissions = ctx.permissions();
    let uc = CreateMeeting {
        repo: repo.as_ref(),
        permissions: permissions.as_ref(),
    };
    Ok(Json(uc.execute(&actor, project_id, fields).await?))
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route(
            "/projects/:project_id/meetings",
            get(list_meetings).post(create_meeting),
        )
        .route("/projects/:project_id/meetings/query", post(query_meetings))
        .with_state(ctx)
}
