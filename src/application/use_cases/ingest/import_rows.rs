use serde::Serialize;
use serde_json::Value as JsonValue;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::access::{self, Actor};
use crate::application::ports::document_repository::DocumentRepository;
use crate::application::ports::permission_port::PermissionPort;
use crate::application::services::normalize::row::normalize_row;
use crate::application::use_cases::documents::error::DocumentUseCaseError;
use crate::domain::documents::store::DocumentStore;

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RowIssue {
    /// Zero-based position in the submitted rows.
    pub row: usize,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImportReport {
    pub imported: usize,
    pub skipped_blank: usize,
    pub truncated: usize,
    pub issues: Vec<RowIssue>,
    pub document_ids: Vec<Uuid>,
}

/// Normalizes rows into the store. Each row stands alone: a bad row is
/// reported and the rest still land.
pub fn ingest_rows(store: &mut DocumentStore, rows: &[JsonValue], max_rows: usize) -> ImportReport {
    let mut report = ImportReport::default();
    let (accepted, rest) = rows.split_at(rows.len().min(max_rows));
    report.truncated = rest.len();

    for (idx, raw) in accepted.iter().enumerate() {
        let Some(row) = raw.as_object() else {
            report.issues.push(RowIssue {
                row: idx,
                message: format!("expected an object, got {}", json_kind(raw)),
            });
            continue;
        };
        let fields = normalize_row(row);
        if fields.is_blank() {
            report.skipped_blank += 1;
            continue;
        }
        let record = store.add(fields);
        if !record.has_consistent_dates() {
            report.issues.push(RowIssue {
                row: idx,
                message: "end date precedes start date".into(),
            });
        }
        report.document_ids.push(record.id);
        report.imported += 1;
    }
    report
}

fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}

pub struct ImportRows<'a, R, P>
where
    R: DocumentRepository + ?Sized,
    P: PermissionPort + ?Sized,
{
    pub repo: &'a R,
    pub permissions: &'a P,
    pub max_rows: usize,
}

impl<'a, R, P> ImportRows<'a, R, P>
where
    R: DocumentRepository + ?Sized,
    P: PermissionPort + ?Sized,
{
    pub async fn execute(
        &self,
        actor: &Actor,
        project_id: Uuid,
        rows: &[JsonValue],
    ) -> Result<ImportReport, DocumentUseCaseError> {
        access::require_edit(self.permissions, actor, project_id).await?;
        persist_rows(self.repo, project_id, rows, self.max_rows).await
    }
}

/// Load, ingest and save. Callers have already checked edit access.
pub(crate) async fn persist_rows<R>(
    repo: &R,
    project_id: Uuid,
    rows: &[JsonValue],
    max_rows: usize,
) -> Result<ImportReport, DocumentUseCaseError>
where
    R: DocumentRepository + ?Sized,
{
    let mut store = repo
        .load_store(project_id)
        .await
        .map_err(DocumentUseCaseError::Storage)?;
    let report = ingest_rows(&mut store, rows, max_rows);
    if report.imported > 0 {
        repo.save_store(&store)
            .await
            .map_err(DocumentUseCaseError::Storage)?;
    }
    tracing::info!(
        %project_id,
        imported = report.imported,
        skipped_blank = report.skipped_blank,
        truncated = report.truncated,
        issues = report.issues.len(),
        "rows_imported"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::use_cases::test_support::{AllowAll, memory_repo};
    use crate::domain::documents::status::DocumentStatus;
    use serde_json::json;

    #[test]
    fn one_bad_row_does_not_abort_the_rest() {
        let mut store = DocumentStore::new(Uuid::new_v4());
        let rows = vec![
            json!({"Titulo": "Memorial", "Situação": "Finalizado"}),
            json!(["not", "a", "row"]),
            json!({"Titulo": "Planta", "Data_inicio": "99/99/9999x"}),
            json!({}),
        ];
        let report = ingest_rows(&mut store, &rows, 100);
        assert_eq!(report.imported, 2);
        assert_eq!(report.skipped_blank, 1);
        assert_eq!(report.issues.len(), 1);
        assert_eq!(report.issues[0].row, 1);

        let listed = store.list(false);
        assert_eq!(listed[0].status, DocumentStatus::Finished);
        assert_eq!(listed[1].start_date, None);
    }

    #[test]
    fn inconsistent_dates_are_flagged_but_kept() {
        let mut store = DocumentStore::new(Uuid::new_v4());
        let rows = vec![json!({
            "Titulo": "Memorial",
            "Data_inicio": "10/05/2024",
            "Data_fim": "01/05/2024",
        })];
        let report = ingest_rows(&mut store, &rows, 100);
        assert_eq!(report.imported, 1);
        assert_eq!(report.issues[0].message, "end date precedes start date");
    }

    #[test]
    fn rows_beyond_limit_are_counted_not_imported() {
        let mut store = DocumentStore::new(Uuid::new_v4());
        let rows: Vec<JsonValue> = (0..5).map(|i| json!({"Titulo": format!("D{i}")})).collect();
        let report = ingest_rows(&mut store, &rows, 3);
        assert_eq!(report.imported, 3);
        assert_eq!(report.truncated, 2);
    }

    #[tokio::test]
    async fn import_persists_into_project() {
        let repo = memory_repo();
        let project = Uuid::new_v4();
        let uc = ImportRows {
            repo: &repo,
            permissions: &AllowAll,
            max_rows: 100,
        };
        let report = uc
            .execute(
                &Actor::User("ana".into()),
                project,
                &[json!({"Titulo": "Memorial"})],
            )
            .await
            .unwrap();
        let store = repo.load_store(project).await.unwrap();
        assert_eq!(store.records().len(), 1);
        assert_eq!(report.document_ids, vec![store.records()[0].id]);
    }
}
