use axum::{
    Json, Router,
    extract::{Path, State},
    routing::post,
};
use serde::Deserialize;
use serde_json::Value as JsonValue;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::use_cases::ingest::import_from_url::ImportFromUrl;
use crate::application::use_cases::ingest::import_rows::{ImportReport, ImportRows};
use crate::bootstrap::app_context::AppContext;
use crate::presentation::http::actor::RequestActor;
use crate::presentation::http::error::{ApiError, ErrorBody};

#[derive(Debug, Deserialize, ToSchema)]
pub struct ImportRowsRequest {
    /// Spreadsheet rows keyed by header text, as exported by the sheet reader.
    #[schema(value_type = Vec<Object>)]
    pub rows: Vec<JsonValue>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ImportUrlRequest {
    pub url: String,
}

#[utoipa::path(post, path = "/api/projects/{project_id}/imports/rows", tag = "Imports",
    params(("project_id" = Uuid, Path, description = "Project ID")),
    request_body = ImportRowsRequest,
    responses((status = 200, body = ImportReport), (status = 403, body = ErrorBody)))]
pub async fn import_rows(
    State(ctx): State<AppContext>,
    RequestActor(actor): RequestActor,
    Path(project_id): Path<Uuid>,
    Json(req): Json<ImportRowsRequest>,
) -> Result<Json<ImportReport>, ApiError> {
    let _guard = ctx.write_guard(project_id).await;
    let repo = ctx.document_repo();
    let permissions = ctx.permissions();
    let uc = ImportRows {
        repo: repo.as_ref(),
        permissions: permissions.as_ref(),
        max_rows: ctx.cfg.import_max_rows,
    };
    Ok(Json(uc.execute(&actor, project_id, &req.rows).await?))
}

#[utoipa::path(post, path = "/api/projects/{project_id}/imports/url", tag = "Imports",
    params(("project_id" = Uuid, Path, description = "Project ID")),
    request_body = ImportUrlRequest,
    responses(
        (status = 200, body = ImportReport),
        (status = 422, body = ErrorBody),
        (status = 502, body = ErrorBody)
    ))]
pub async fn import_from_url(
    State(ctx): State<AppContext>,
    RequestActor(actor): RequestActor,
    Path(project_id): Path<Uuid>,
    Json(req): Json<ImportUrlRequest>,
) -> Result<Json<ImportReport>, ApiError> {
    let fetcher = ctx.sheet_fetcher();
    let repo = ctx.document_repo();
    let permissions = ctx.permissions();
    let uc = ImportFromUrl {
        fetcher: fetcher.as_ref(),
        repo: repo.as_ref(),
        permissions: permissions.as_ref(),
        max_rows: ctx.cfg.import_max_rows,
    };
    let fetched = uc.fetch(&actor, project_id, req.url.trim()).await?;
    let _guard = ctx.write_guard(project_id).await;
    Ok(Json(uc.commit(fetched).await?))
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/projects/:project_id/imports/rows", post(import_rows))
        .route("/projects/:project_id/imports/url", post(import_from_url))
        .with_state(ctx)
}
