use serde_json::Value as JsonValue;
use uuid::Uuid;

use crate::application::access::{self, Actor};
use crate::application::ports::document_repository::DocumentRepository;
use crate::application::ports::permission_port::PermissionPort;
use crate::application::ports::sheet_fetcher::{Sheet, SheetFetcher, Workbook};
use crate::application::use_cases::documents::error::DocumentUseCaseError;
use crate::application::use_cases::ingest::import_rows::{ImportReport, persist_rows};

const PREFERRED_SHEET: &str = "doc";

#[derive(thiserror::Error, Debug)]
pub enum IngestionError {
    #[error("failed to fetch spreadsheet")]
    Fetch(#[source] anyhow::Error),
    #[error("spreadsheet has no sheets")]
    NoSheets,
    #[error(transparent)]
    Import(#[from] DocumentUseCaseError),
}

/// The sheet literally named `doc` (any case) wins; otherwise the first one.
pub fn select_sheet(workbook: &Workbook) -> Option<&Sheet> {
    workbook
        .sheets
        .iter()
        .find(|s| s.name.trim().eq_ignore_ascii_case(PREFERRED_SHEET))
        .or_else(|| workbook.sheets.first())
}

/// Rows of the selected sheet, fetched on behalf of an actor already cleared
/// to edit the project. Only [`ImportFromUrl::fetch`] builds one.
#[derive(Debug)]
pub struct FetchedSheet {
    project_id: Uuid,
    sheet_name: String,
    rows: Vec<JsonValue>,
}

impl FetchedSheet {
    pub fn project_id(&self) -> Uuid {
        self.project_id
    }

    pub fn sheet_name(&self) -> &str {
        &self.sheet_name
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// Two steps so the network fetch runs outside the project's write lock:
/// `fetch` checks access and downloads, `commit` persists.
pub struct ImportFromUrl<'a, F, R, P>
where
    F: SheetFetcher + ?Sized,
    R: DocumentRepository + ?Sized,
    P: PermissionPort + ?Sized,
{
    pub fetcher: &'a F,
    pub repo: &'a R,
    pub permissions: &'a P,
    pub max_rows: usize,
}

impl<'a, F, R, P> ImportFromUrl<'a, F, R, P>
where
    F: SheetFetcher + ?Sized,
    R: DocumentRepository + ?Sized,
    P: PermissionPort + ?Sized,
{
    pub async fn fetch(
        &self,
        actor: &Actor,
        project_id: Uuid,
        url: &str,
    ) -> Result<FetchedSheet, IngestionError> {
        access::require_edit(self.permissions, actor, project_id)
            .await
            .map_err(DocumentUseCaseError::from)?;
        let workbook = self
            .fetcher
            .fetch(url)
            .await
            .map_err(IngestionError::Fetch)?;
        let sheet = select_sheet(&workbook).ok_or(IngestionError::NoSheets)?;
        tracing::info!(%project_id, sheet = %sheet.name, rows = sheet.rows.len(), "sheet_selected");
        Ok(FetchedSheet {
            project_id,
            sheet_name: sheet.name.clone(),
            rows: sheet.rows.clone(),
        })
    }

    pub async fn commit(&self, fetched: FetchedSheet) -> Result<ImportReport, IngestionError> {
        Ok(persist_rows(self.repo, fetched.project_id, &fetched.rows, self.max_rows).await?)
    }

    pub async fn execute(
        &self,
        actor: &Actor,
        project_id: Uuid,
        url: &str,
    ) -> Result<ImportReport, IngestionError> {
        let fetched = self.fetch(actor, project_id, url).await?;
        self.commit(fetched).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::access::Capability;
    use crate::application::use_cases::test_support::{AllowAll, DenyAll, memory_repo};
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FixedFetcher(Option<Workbook>);

    #[async_trait]
    impl SheetFetcher for FixedFetcher {
        async fn fetch(&self, _url: &str) -> anyhow::Result<Workbook> {
            self.0
                .clone()
                .ok_or_else(|| anyhow::anyhow!("upstream returned status 502"))
        }
    }

    fn sheet(name: &str, title: &str) -> Sheet {
        Sheet {
            name: name.into(),
            rows: vec![json!({ "Titulo": title })],
        }
    }

    #[test]
    fn prefers_sheet_named_doc() {
        let wb = Workbook {
            sheets: vec![sheet("Resumo", "a"), sheet(" DOC ", "b")],
        };
        assert_eq!(select_sheet(&wb).unwrap().name, " DOC ");

        let wb = Workbook {
            sheets: vec![sheet("Resumo", "a"), sheet("Docs", "b")],
        };
        assert_eq!(select_sheet(&wb).unwrap().name, "Resumo");
        assert!(select_sheet(&Workbook::default()).is_none());
    }

    #[tokio::test]
    async fn imports_rows_of_selected_sheet() {
        let repo = memory_repo();
        let project = Uuid::new_v4();
        let fetcher = FixedFetcher(Some(Workbook {
            sheets: vec![sheet("Capa", "ignored"), sheet("doc", "Memorial")],
        }));
        let uc = ImportFromUrl {
            fetcher: &fetcher,
            repo: &repo,
            permissions: &AllowAll,
            max_rows: 100,
        };
        let report = uc
            .execute(&Actor::User("ana".into()), project, "https://sheets.example/x")
            .await
            .unwrap();
        assert_eq!(report.imported, 1);
        let store = repo.load_store(project).await.unwrap();
        assert_eq!(store.records()[0].title, "Memorial");
    }

    #[tokio::test]
    async fn fetch_failures_surface_as_ingestion_errors() {
        let repo = memory_repo();
        let uc = ImportFromUrl {
            fetcher: &FixedFetcher(None),
            repo: &repo,
            permissions: &AllowAll,
            max_rows: 100,
        };
        let err = uc
            .execute(&Actor::User("ana".into()), Uuid::new_v4(), "https://x")
            .await
            .unwrap_err();
        assert!(matches!(err, IngestionError::Fetch(_)));

        let empty = FixedFetcher(Some(Workbook::default()));
        let uc = ImportFromUrl {
            fetcher: &empty,
            repo: &repo,
            permissions: &AllowAll,
            max_rows: 100,
        };
        let err = uc
            .execute(&Actor::User("ana".into()), Uuid::new_v4(), "https://x")
            .await
            .unwrap_err();
        assert!(matches!(err, IngestionError::NoSheets));
    }

    struct UnreachableFetcher;

    #[async_trait]
    impl SheetFetcher for UnreachableFetcher {
        async fn fetch(&self, url: &str) -> anyhow::Result<Workbook> {
            panic!("fetch attempted for {url}");
        }
    }

    #[derive(Default)]
    struct CountingPermissions {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl PermissionPort for CountingPermissions {
        async fn capability(&self, _actor: &Actor, _project_id: Uuid) -> anyhow::Result<Capability> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(Capability::Edit)
        }
    }

    #[tokio::test]
    async fn denied_actor_never_reaches_the_fetcher() {
        let repo = memory_repo();
        let uc = ImportFromUrl {
            fetcher: &UnreachableFetcher,
            repo: &repo,
            permissions: &DenyAll,
            max_rows: 100,
        };
        let err = uc
            .execute(&Actor::Anonymous, Uuid::new_v4(), "https://x")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            IngestionError::Import(DocumentUseCaseError::Forbidden(_))
        ));
    }

    #[tokio::test]
    async fn access_is_checked_once_per_import() {
        let repo = memory_repo();
        let permissions = CountingPermissions::default();
        let fetcher = FixedFetcher(Some(Workbook {
            sheets: vec![sheet("doc", "Memorial")],
        }));
        let uc = ImportFromUrl {
            fetcher: &fetcher,
            repo: &repo,
            permissions: &permissions,
            max_rows: 100,
        };
        let report = uc
            .execute(&Actor::User("ana".into()), Uuid::new_v4(), "https://x")
            .await
            .unwrap();
        assert_eq!(report.imported, 1);
        assert_eq!(permissions.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn fetch_leaves_the_store_untouched_until_commit() {
        let repo = memory_repo();
        let project = Uuid::new_v4();
        let fetcher = FixedFetcher(Some(Workbook {
            sheets: vec![sheet("doc", "Memorial")],
        }));
        let uc = ImportFromUrl {
            fetcher: &fetcher,
            repo: &repo,
            permissions: &AllowAll,
            max_rows: 100,
        };
        let fetched = uc
            .fetch(&Actor::User("ana".into()), project, "https://x")
            .await
            .unwrap();
        assert_eq!(fetched.sheet_name(), "doc");
        assert_eq!(fetched.row_count(), 1);
        assert!(repo.load_store(project).await.unwrap().records().is_empty());

        uc.commit(fetched).await.unwrap();
        assert_eq!(repo.load_store(project).await.unwrap().records().len(), 1);
    }
}
