use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use uuid::Uuid;

use crate::application::services::dashboard::DashboardSummary;
use crate::application::services::filters::FilterCriteria;
use crate::application::use_cases::documents::get_dashboard::GetDashboard;
use crate::bootstrap::app_context::AppContext;
use crate::presentation::http::actor::RequestActor;
use crate::presentation::http::error::ApiError;

#[utoipa::path(get, path = "/api/projects/{project_id}/dashboard", tag = "Dashboard",
    params(("project_id" = Uuid, Path, description = "Project ID")),
    responses((status = 200, body = DashboardSummary)))]
pub async fn get_dashboard(
    State(ctx): State<AppContext>,
    RequestActor(actor): RequestActor,
    Path(project_id): Path<Uuid>,
) -> Result<Json<DashboardSummary>, ApiError> {
    summary_for(&ctx, &actor, project_id, &FilterCriteria::default()).await
}

#[utoipa::path(post, path = "/api/projects/{project_id}/dashboard", tag = "Dashboard",
    params(("project_id" = Uuid, Path, description = "Project ID")),
    request_body = FilterCriteria,
    responses((status = 200, body = DashboardSummary)))]
pub async fn query_dashboard(
    State(ctx): State<AppContext>,
    RequestActor(actor): RequestActor,
    Path(project_id): Path<Uuid>,
    Json(criteria): Json<FilterCriteria>,
) -> Result<Json<DashboardSummary>, ApiError> {
    summary_for(&ctx, &actor, project_id, &criteria).await
}

async fn summary_for(
    ctx: &AppContext,
    actor: &crate::application::access::Actor,
    project_id: Uuid,
    criteria: &FilterCriteria,
) -> Result<Json<DashboardSummary>, ApiError> {
    let repo = ctx.document_repo();
    let permissions = ctx.permissions();
    let uc = GetDashboard {
        repo: repo.as_ref(),
        permissions: permissions.as_ref(),
    };
    Ok(Json(uc.execute(actor, project_id, criteria).await?))
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route(
            "/projects/:project_id/dashboard",
            get(get_dashboard).post(query_dashboard),
        )
        .with_state(ctx)
}
