use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, patch, post},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::services::filters::FilterCriteria;
use crate::application::use_cases::documents::clear_document::ClearDocument;
use crate::application::use_cases::documents::create_document::CreateDocument;
use crate::application::use_cases::documents::list_documents::ListDocuments;
use crate::application::use_cases::documents::update_document::UpdateDocument;
use crate::bootstrap::app_context::AppContext;
use crate::domain::documents::document::{DocumentFields, DocumentPatch, DocumentRecord};
use crate::domain::documents::status::DocumentStatus;
use crate::presentation::http::actor::RequestActor;
use crate::presentation::http::error::ApiError;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: Uuid,
    pub project_id: Uuid,
    pub code: String,
    pub title: String,
    pub detail: String,
    pub revision: String,
    pub owner: String,
    pub status: DocumentStatus,
    pub area: String,
    pub participants: Vec<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub baseline_date: Option<NaiveDate>,
    pub dates_consistent: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
    pub is_cleared: bool,
}

impl From<DocumentRecord> for Document {
    fn from(d: DocumentRecord) -> Self {
        let dates_consistent = d.has_consistent_dates();
        Document {
            id: d.id,
            project_id: d.project_id,
            code: d.code,
            title: d.title,
            detail: d.detail,
            revision: d.revision,
            owner: d.owner,
            status: d.status,
            area: d.area,
            participants: d.participants,
            start_date: d.start_date,
            end_date: d.end_date,
            baseline_date: d.baseline_date,
            dates_consistent,
            created_at: d.created_at,
            updated_at: d.updated_at,
            is_cleared: d.is_cleared,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DocumentListResponse {
    pub items: Vec<Document>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateDocumentRequest {
    pub code: Option<String>,
    pub title: Option<String>,
    pub detail: Option<String>,
    pub revision: Option<String>,
    pub owner: Option<String>,
    /// Free text; mapped onto the closed status vocabulary.
    pub status: Option<String>,
    pub area: Option<String>,
    pub participants: Option<Vec<String>>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub baseline_date: Option<NaiveDate>,
}

impl From<CreateDocumentRequest> for DocumentFields {
    fn from(req: CreateDocumentRequest) -> Self {
        DocumentFields {
            code: req.code.unwrap_or_default(),
            title: req.title.unwrap_or_default(),
            detail: req.detail.unwrap_or_default(),
            revision: req.revision.unwrap_or_default(),
            owner: req.owner.unwrap_or_default(),
            status: req
                .status
                .as_deref()
                .map(DocumentStatus::from_raw)
                .unwrap_or_default(),
            area: req.area.unwrap_or_default(),
            participants: req.participants.unwrap_or_default(),
            start_date: req.start_date,
            end_date: req.end_date,
            baseline_date: req.baseline_date,
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDocumentRequest {
    pub code: Option<String>,
    pub title: Option<String>,
    pub detail: Option<String>,
    pub revision: Option<String>,
    pub owner: Option<String>,
    pub status: Option<String>,
    pub area: Option<String>,
    pub participants: Option<Vec<String>>,
    #[serde(default, deserialize_with = "deserialize_double_option")]
    #[schema(value_type = Option<NaiveDate>)]
    pub start_date: DoubleOption<NaiveDate>,
    #[serde(default, deserialize_with = "deserialize_double_option")]
    #[schema(value_type = Option<NaiveDate>)]
    pub end_date: DoubleOption<NaiveDate>,
    #[serde(default, deserialize_with = "deserialize_double_option")]
    #[schema(value_type = Option<NaiveDate>)]
    pub baseline_date: DoubleOption<NaiveDate>,
}

impl From<UpdateDocumentRequest> for DocumentPatch {
    fn from(req: UpdateDocumentRequest) -> Self {
        DocumentPatch {
            code: req.code,
            title: req.title,
            detail: req.detail,
            revision: req.revision,
            owner: req.owner,
            status: req.status.as_deref().map(DocumentStatus::from_raw),
            area: req.area,
            participants: req.participants,
            start_date: req.start_date.into_patch(),
            end_date: req.end_date.into_patch(),
            baseline_date: req.baseline_date.into_patch(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub enum DoubleOption<T> {
    #[default]
    NotProvided,
    Null,
    Some(T),
}

impl<T> DoubleOption<T> {
    fn into_patch(self) -> Option<Option<T>> {
        match self {
            DoubleOption::NotProvided => None,
            DoubleOption::Null => Some(None),
            DoubleOption::Some(v) => Some(Some(v)),
        }
    }
}

fn deserialize_double_option<'de, D, T>(deserializer: D) -> Result<DoubleOption<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: serde::Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(|opt| match opt {
        None => DoubleOption::Null,
        Some(value) => DoubleOption::Some(value),
    })
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListDocumentsQuery {
    #[serde(default)]
    pub include_cleared: bool,
}

#[utoipa::path(get, path = "/api/projects/{project_id}/documents", tag = "Documents",
    params(
        ("project_id" = Uuid, Path, description = "Project ID"),
        ("includeCleared" = Option<bool>, Query, description = "Include cleared documents")
    ),
    responses((status = 200, body = DocumentListResponse)))]
pub async fn list_documents(
    State(ctx): State<AppContext>,
    RequestActor(actor): RequestActor,
    Path(project_id): Path<Uuid>,
    Query(q): Query<ListDocumentsQuery>,
) -> Result<Json<DocumentListResponse>, ApiError> {
    let criteria = FilterCriteria {
        include_cleared: q.include_cleared,
        ..Default::default()
    };
    query_with(&ctx, &actor, project_id, &criteria).await
}

#[utoipa::path(post, path = "/api/projects/{project_id}/documents/query", tag = "Documents",
    params(("project_id" = Uuid, Path, description = "Project ID")),
    request_body = FilterCriteria,
    responses((status = 200, body = DocumentListResponse)))]
pub async fn query_documents(
    State(ctx): State<AppContext>,
    RequestActor(actor): RequestActor,
    Path(project_id): Path<Uuid>,
    Json(criteria): Json<FilterCriteria>,
) -> Result<Json<DocumentListResponse>, ApiError> {
    query_with(&ctx, &actor, project_id, &criteria).await
}

async fn query_with(
    ctx: &AppContext,
    actor: &crate::application::access::Actor,
    project_id: Uuid,
    criteria: &FilterCriteria,
) -> Result<Json<DocumentListResponse>, ApiError> {
    let repo = ctx.document_repo();
    let permissions = ctx.permissions();
    let uc = ListDocuments {
        repo: repo.as_ref(),
        permissions: permissions.as_ref(),
    };
    let docs = uc.execute(actor, project_id, criteria).await?;
    Ok(Json(DocumentListResponse {
        items: docs.into_iter().map(Into::into).collect(),
    }))
}

#[utoipa::path(post, path = "/api/projects/{project_id}/documents", tag = "Documents",
    params(("project_id" = Uuid, Path, description = "Project ID")),
    request_body = CreateDocumentRequest,
    responses((status = 200, body = Document)))]
pub async fn create_document(
    State(ctx): State<AppContext>,
    RequestActor(actor): RequestActor,
    Path(project_id): Path<Uuid>,
    Json(req): Json<CreateDocumentRequest>,
) -> Result<Json<Document>, ApiError> {
    let _guard = ctx.write_guard(project_id).await;
    let repo = ctx.document_repo();
    let permissions = ctx.permissions();
    let uc = CreateDocument {
        repo: repo.as_ref(),
        permissions: permissions.as_ref(),
    };
    let doc = uc.execute(&actor, project_id, req.into()).await?;
    Ok(Json(doc.into()))
}

#[utoipa::path(patch, path = "/api/projects/{project_id}/documents/{id}", tag = "Documents",
    params(
        ("project_id" = Uuid, Path, description = "Project ID"),
        ("id" = Uuid, Path, description = "Document ID")
    ),
    request_body = UpdateDocumentRequest,
    responses((status = 200, body = Document), (status = 404, body = crate::presentation::http::error::ErrorBody)))]
pub async fn update_document(
    State(ctx): State<AppContext>,
    RequestActor(actor): RequestActor,
    Path((project_id, id)): Path<(Uuid, Uuid)>,
    Json(req): Json<UpdateDocumentRequest>,
) -> Result<Json<Document>, ApiError> {
    let _guard = ctx.write_guard(project_id).await;
    let repo = ctx.document_repo();
    let permissions = ctx.permissions();
    let uc = UpdateDocument {
        repo: repo.as_ref(),
        permissions: permissions.as_ref(),
    };
    let doc = uc.execute(&actor, project_id, id, req.into()).await?;
    Ok(Json(doc.into()))
}

#[utoipa::path(post, path = "/api/projects/{project_id}/documents/{id}/clear", tag = "Documents",
    params(
        ("project_id" = Uuid, Path, description = "Project ID"),
        ("id" = Uuid, Path, description = "Document ID")
    ),
    responses((status = 200, body = Document), (status = 404, body = crate::presentation::http::error::ErrorBody)))]
pub async fn clear_document(
    State(ctx): State<AppContext>,
    RequestActor(actor): RequestActor,
    Path((project_id, id)): Path<(Uuid, Uuid)>,
) -> Result<Json<Document>, ApiError> {
    let _guard = ctx.write_guard(project_id).await;
    let repo = ctx.document_repo();
    let permissions = ctx.permissions();
    let uc = ClearDocument {
        repo: repo.as_ref(),
        permissions: permissions.as_ref(),
    };
    let doc = uc.clear(&actor, project_id, id).await?;
    Ok(Json(doc.into()))
}

#[utoipa::path(post, path = "/api/projects/{project_id}/documents/{id}/restore", tag = "Documents",
    params(
        ("project_id" = Uuid, Path, description = "Project ID"),
        ("id" = Uuid, Path, description = "Document ID")
    ),
    responses((status = 200, body = Document), (status = 404, body = crate::presentation::http::error::ErrorBody)))]
pub async fn restore_document(
    State(ctx): State<AppContext>,
    RequestActor(actor): RequestActor,
    Path((project_id, id)): Path<(Uuid, Uuid)>,
) -> Result<Json<Document>, ApiError> {
    let _guard = ctx.write_guard(project_id).await;
    let repo = ctx.document_repo();
    let permissions = ctx.permissions();
    let uc = ClearDocument {
        repo: repo.as_ref(),
        permissions: permissions.as_ref(),
    };
    let doc = uc.restore(&actor, project_id, id).await?;
    Ok(Json(doc.into()))
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route(
            "/projects/:project_id/documents",
            get(list_documents).post(create_document),
        )
        .route("/projects/:project_id/documents/query", post(query_documents))
        .route("/projects/:project_id/documents/:id", patch(update_document))
        .route(
            "/projects/:project_id/documents/:id/clear",
            post(clear_document),
        )
        .route(
            "/projects/:project_id/documents/:id/restore",
            post(restore_document),
        )
        .with_state(ctx)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_request_distinguishes_null_from_absent_dates() {
        let req: UpdateDocumentRequest =
            serde_json::from_str(r#"{"startDate": null, "endDate": "2024-05-01"}"#).unwrap();
        let patch: DocumentPatch = req.into();
        assert_eq!(patch.start_date, Some(None));
        assert_eq!(patch.end_date, Some(NaiveDate::from_ymd_opt(2024, 5, 1)));
        assert_eq!(patch.baseline_date, None);
    }

    #[test]
    fn create_request_maps_free_text_status() {
        let req: CreateDocumentRequest =
            serde_json::from_str(r#"{"title": "Memorial", "status": "Em andamento"}"#).unwrap();
        let fields: DocumentFields = req.into();
        assert_eq!(fields.status, DocumentStatus::InProgress);
        assert_eq!(fields.title, "Memorial");
    }
}
