use crate::cli::ServeArgs;
use crate::infra::{load_roster, AppState};
use crate::routes::with_marketplace_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use foundyou::config::AppConfig;
use foundyou::error::AppError;
use foundyou::marketplace::forms::SimulatedAuthenticator;
use foundyou::marketplace::search::FixtureDataSource;
use foundyou::marketplace::Marketplace;
use foundyou::telemetry;
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

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let roster = load_roster(None, &config.marketplace)?;
    let source = Arc::new(FixtureDataSource::from_config(roster, &config.marketplace));
    let marketplace = Arc::new(Marketplace::new(source, Arc::new(SimulatedAuthenticator)));

    let app = with_marketplace_routes(marketplace)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        listing_mode = ?config.marketplace.listing_mode,
        "foundyou marketplace api ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
