use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::with_leave_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use leave_intel::config::AppConfig;
use leave_intel::error::AppError;
use leave_intel::intelligence::LeaveIntelligence;
use leave_intel::telemetry;
use std::sync::atomic::Ordering;
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

    telemetry::init(&config.telemetry)?;

    let engine = Arc::new(LeaveIntelligence::from_config(&config.inference)?);
    let delegating = engine.is_delegating();

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        delegating,
    };

    let app = with_leave_routes(engine)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        delegating,
        inference_url = config.inference.base_url.as_deref().unwrap_or("none"),
        "leave intelligence engine ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
