use crate::cli::ServeArgs;
use crate::infra::{AppState, DashboardLedger, ServiceState};
use crate::routes::router;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::{Arc, Mutex};

use opscore::config::AppConfig;
use opscore::departments::DepartmentSuite;
use opscore::error::AppError;
use opscore::registry::ModelRegistry;
use opscore::telemetry;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let registry = ModelRegistry::open(&config.registry.path)?;
    let service = Arc::new(ServiceState {
        suite: DepartmentSuite::default(),
        ledger: DashboardLedger::default(),
        registry: Mutex::new(registry),
    });

    let app = router(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "department scoring service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
