use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::application::use_cases::documents::error::DocumentUseCaseError;
use crate::application::use_cases::ingest::import_from_url::IngestionError;

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
}

pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorBody {
                error: self.message,
            }),
        )
            .into_response()
    }
}

impl From<DocumentUseCaseError> for ApiError {
    fn from(err: DocumentUseCaseError) -> Self {
        match &err {
            DocumentUseCaseError::NotFound(_) => ApiError::new(StatusCode::NOT_FOUND, err.to_string()),
            DocumentUseCaseError::Forbidden(_) => ApiError::new(StatusCode::FORBIDDEN, "forbidden"),
            DocumentUseCaseError::Storage(e) => {
                tracing::error!(error = ?e, "document_storage_failed");
                ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "storage unavailable")
            }
        }
    }
}

impl From<IngestionError> for ApiError {
    fn from(err: IngestionError) -> Self {
        match err {
            IngestionError::Fetch(e) => {
                tracing::warn!(error = ?e, "sheet_fetch_failed");
                ApiError::new(
                    StatusCode::BAD_GATEWAY,
                    format!("could not load the spreadsheet: {e}"),
                )
            }
            IngestionError::NoSheets => ApiError::new(
                StatusCode::UNPROCESSABLE_ENTITY,
                "the spreadsheet contains no sheets",
            ),
            IngestionError::Import(inner) => inner.into(),
        }
    }
}
