use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard};
use uuid::Uuid;

use crate::application::ports::document_repository::DocumentRepository;
use crate::application::ports::permission_port::PermissionPort;
use crate::application::ports::sheet_fetcher::SheetFetcher;
use crate::application::services::reports::tracker::ReportTracker;
use crate::bootstrap::config::Config;

#[derive(Clone)]
pub struct AppContext {
    pub cfg: Config,
    services: Arc<AppServices>,
}

pub struct AppServices {
    document_repo: Arc<dyn DocumentRepository>,
    permissions: Arc<dyn PermissionPort>,
    sheet_fetcher: Arc<dyn SheetFetcher>,
    report_tracker: Arc<ReportTracker>,
    // load-mutate-save sequences of one project run one at a time
    write_locks: Mutex<HashMap<Uuid, Arc<Mutex<()>>>>,
}

impl AppServices {
    pub fn new(
        document_repo: Arc<dyn DocumentRepository>,
        permissions: Arc<dyn PermissionPort>,
        sheet_fetcher: Arc<dyn SheetFetcher>,
        report_tracker: Arc<ReportTracker>,
    ) -> Self {
        Self {
            document_repo,
            permissions,
            sheet_fetcher,
            report_tracker,
            write_locks: Mutex::new(HashMap::new()),
        }
    }
}

impl AppContext {
    pub fn new(cfg: Config, services: AppServices) -> Self {
        Self {
            cfg,
            services: Arc::new(services),
        }
    }

    pub fn document_repo(&self) -> Arc<dyn DocumentRepository> {
        self.services.document_repo.clone()
    }

    pub fn permissions(&self) -> Arc<dyn PermissionPort> {
        self.services.permissions.clone()
    }

    pub fn sheet_fetcher(&self) -> Arc<dyn SheetFetcher> {
        self.services.sheet_fetcher.clone()
    }

    pub fn report_tracker(&self) -> Arc<ReportTracker> {
        self.services.report_tracker.clone()
    }

    /// Serializes writers of one project. Hold it only around the
    /// load-mutate-save sequence, never across remote calls.
    pub async fn write_guard(&self, project_id: Uuid) -> OwnedMutexGuard<()> {
        self.services.project_lock(project_id).await.lock_owned().await
    }
}

impl AppServices {
    async fn project_lock(&self, project_id: Uuid) -> Arc<Mutex<()>> {
        let mut locks = self.write_locks.lock().await;
        locks.entry(project_id).or_default().clone()
    }
}
