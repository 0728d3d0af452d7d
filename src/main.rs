use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::extract::MatchedPath;
use dotenvy::dotenv;
use http::HeaderValue;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use doctrack::application::ports::kv_store::KvStore;
use doctrack::application::services::reports::tracker::ReportTracker;
use doctrack::bootstrap::app_context::{AppContext, AppServices};
use doctrack::bootstrap::config::{Config, StorageBackend};
use doctrack::infrastructure::access::permission_port_static::StaticPermissionPort;
use doctrack::infrastructure::db::PgPool;
use doctrack::infrastructure::sheets::sheet_fetcher_reqwest::ReqwestSheetFetcher;
use doctrack::infrastructure::storage::document_repository_kv::KvDocumentRepository;
use doctrack::infrastructure::storage::memory_kv::InMemoryKvStore;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
        paths(
            doctrack::presentation::http::documents::list_documents,
            doctrack::presentation::http::documents::query_documents,
            doctrack::presentation::http::documents::create_document,
            doctrack::presentation::http::documents::update_document,
            doctrack::presentation::http::documents::clear_document,
            doctrack::presentation::http::documents::restore_document,
            doctrack::presentation::http::dashboard::get_dashboard,
            doctrack::presentation::http::dashboard::query_dashboard,
            doctrack::presentation::http::imports::import_rows,
            doctrack::presentation::http::imports::import_from_url,
            doctrack::presentation::http::meetings::list_meetings,
            doctrack::presentation::http::meetings::query_meetings,
            doctrack::presentation::http::meetings::create_meeting,
            doctrack::presentation::http::reports::get_progress,
            doctrack::presentation::http::reports::dispatch_action,
            doctrack::presentation::http::health::health,
        ),
        components(schemas(
            doctrack::presentation::http::documents::Document,
            doctrack::presentation::http::documents::DocumentListResponse,
            doctrack::presentation::http::documents::CreateDocumentRequest,
            doctrack::presentation::http::documents::UpdateDocumentRequest,
            doctrack::presentation::http::imports::ImportRowsRequest,
            doctrack::presentation::http::imports::ImportUrlRequest,
            doctrack::presentation::http::meetings::MeetingListResponse,
            doctrack::presentation::http::error::ErrorBody,
            doctrack::presentation::http::health::HealthResp,
            doctrack::domain::documents::status::DocumentStatus,
            doctrack::domain::documents::summary::StatusDistribution,
            doctrack::domain::documents::summary::TimelinePoint,
            doctrack::domain::meetings::meeting::MeetingMetadata,
            doctrack::domain::meetings::meeting::MeetingFields,
            doctrack::application::services::filters::FilterCriteria,
            doctrack::application::services::filters::TextField,
            doctrack::application::services::filters::DateField,
            doctrack::application::services::filters::TextCriterion,
            doctrack::application::services::filters::SetCriterion,
            doctrack::application::services::filters::DateRangeCriterion,
            doctrack::application::services::dashboard::DashboardSummary,
            doctrack::application::services::reports::progress::ReportPhase,
            doctrack::application::services::reports::progress::ReportProgressState,
            doctrack::application::services::reports::progress::ReportAction,
            doctrack::application::use_cases::ingest::import_rows::ImportReport,
            doctrack::application::use_cases::ingest::import_rows::RowIssue,
        )),
        tags(
            (name = "Documents", description = "Engineering document register"),
            (name = "Dashboard", description = "Status distribution and timeline"),
            (name = "Imports", description = "Spreadsheet ingestion"),
            (name = "Meetings", description = "Meeting minutes"),
            (name = "Reports", description = "Report generation progress"),
            (name = "Health", description = "System health checks")
        )
    )]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "doctrack=debug,axum=info,tower_http=info".into()),
        )
        .init();

    let cfg = Config::from_env()?;
    info!(?cfg, "Starting document tracker backend");

    let (kv, pool): (Arc<dyn KvStore>, Option<PgPool>) = match cfg.storage_backend {
        StorageBackend::Memory => {
            tracing::warn!("storage_backend_memory_data_is_not_persisted");
            (Arc::new(InMemoryKvStore::default()), None)
        }
        StorageBackend::Postgres => {
            let url = cfg
                .database_url
                .as_deref()
                .ok_or_else(|| anyhow::anyhow!("DATABASE_URL is required"))?;
            let pool = doctrack::infrastructure::db::connect_pool(url).await?;
            doctrack::infrastructure::db::migrate(&pool).await?;
            (
                Arc::new(doctrack::infrastructure::db::kv_store_sqlx::SqlxKvStore::new(
                    pool.clone(),
                )),
                Some(pool),
            )
        }
    };

    let document_repo = Arc::new(KvDocumentRepository::new(kv));
    let permissions = Arc::new(StaticPermissionPort {
        allow_anonymous_view: cfg.allow_anonymous_view,
    });
    let sheet_fetcher = Arc::new(ReqwestSheetFetcher::new(
        &cfg.sheet_proxy_url,
        std::time::Duration::from_secs(cfg.sheet_fetch_timeout_secs),
    )?);
    let report_tracker = Arc::new(ReportTracker::new());

    let services = AppServices::new(document_repo, permissions, sheet_fetcher, report_tracker);
    let ctx = AppContext::new(cfg.clone(), services);

    let methods = [
        http::Method::GET,
        http::Method::POST,
        http::Method::PATCH,
        http::Method::OPTIONS,
    ];
    let headers = [
        http::header::CONTENT_TYPE,
        http::header::AUTHORIZATION,
        http::HeaderName::from_static(doctrack::presentation::http::actor::USER_HEADER),
    ];
    let cors = match cfg.frontend_url.as_deref().map(HeaderValue::from_str) {
        Some(Ok(v)) => CorsLayer::new()
            .allow_origin(v)
            .allow_methods(methods)
            .allow_headers(headers)
            .allow_credentials(true),
        _ if cfg.is_production => CorsLayer::new()
            .allow_origin(AllowOrigin::exact(HeaderValue::from_static(
                "http://invalid",
            )))
            .allow_methods(methods)
            .allow_headers(headers),
        _ => CorsLayer::new()
            .allow_origin(AllowOrigin::mirror_request())
            .allow_methods(methods)
            .allow_headers(headers)
            .allow_credentials(true),
    };

    let app = Router::new()
        .nest("/api", doctrack::presentation::http::health::routes(pool))
        .nest(
            "/api",
            doctrack::presentation::http::documents::routes(ctx.clone()),
        )
        .nest(
            "/api",
            doctrack::presentation::http::dashboard::routes(ctx.clone()),
        )
        .nest(
            "/api",
            doctrack::presentation::http::imports::routes(ctx.clone()),
        )
        .nest(
            "/api",
            doctrack::presentation::http::meetings::routes(ctx.clone()),
        )
        .nest(
            "/api",
            doctrack::presentation::http::reports::routes(ctx.clone()),
        )
        .merge(SwaggerUi::new("/api/docs").url("/api/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http().make_span_with(|req: &http::Request<_>| {
                let method = req.method().clone();
                let uri = req.uri().clone();
                let matched = req
                    .extensions()
                    .get::<MatchedPath>()
                    .map(|p| p.as_str().to_string())
                    .unwrap_or_default();
                tracing::info_span!("http", %method, %uri, matched_path = %matched)
            }),
        );

    let api_addr = SocketAddr::from(([0, 0, 0, 0], cfg.api_port));
    info!(%api_addr, "HTTP API listening");
    let listener = tokio::net::TcpListener::bind(api_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("HTTP API stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = ?e, "shutdown_signal_failed");
    }
}
