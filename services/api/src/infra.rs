use foundyou::config::MarketplaceConfig;
use foundyou::error::AppError;
use foundyou::marketplace::talent::{Availability, TalentRoster};
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Roster from `csv` when given, otherwise the configured CSV, otherwise the built-in fixtures.
pub(crate) fn load_roster(
    csv: Option<&Path>,
    config: &MarketplaceConfig,
) -> Result<TalentRoster, AppError> {
    match csv.or(config.roster_csv.as_deref()) {
        Some(path) => {
            let roster = TalentRoster::from_path(path)?;
            info!(path = %path.display(), records = roster.len(), "talent roster imported");
            Ok(roster)
        }
        None => Ok(TalentRoster::builtin()),
    }
}

pub(crate) fn parse_availability(raw: &str) -> Result<Availability, String> {
    Availability::from_label(raw).ok_or_else(|| {
        let known: Vec<_> = Availability::ALL.iter().map(|item| item.label()).collect();
        format!("unknown availability '{raw}' (expected one of: {})", known.join(", "))
    })
}
