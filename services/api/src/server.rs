use crate::cli::ServeArgs;
use crate::infra::{AppState, FileInspectionRepository, InMemoryInspectionRepository};
use crate::routes::with_inspection_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use safety_inspection::config::AppConfig;
use safety_inspection::error::AppError;
use safety_inspection::inspections::{InspectionRepository, InspectionService};
use safety_inspection::telemetry;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }
    if let Some(store) = args.store.take() {
        config.store.path = Some(store);
    }

    telemetry::init(&config.telemetry)?;

    match config.store.path.clone() {
        Some(path) => {
            let repository = FileInspectionRepository::open(path)?;
            info!(path = %repository.path().display(), "using file-backed inspection store");
            serve(config, Arc::new(repository)).await
        }
        None => {
            info!("using in-memory inspection store; records are lost on exit");
            serve(config, Arc::new(InMemoryInspectionRepository::default())).await
        }
    }
}

async fn serve<R>(config: AppConfig, repository: Arc<R>) -> Result<(), AppError>
where
    R: InspectionRepository + 'static,
{
    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let service = Arc::new(InspectionService::new(repository));

    let app = with_inspection_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "safety inspection service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
