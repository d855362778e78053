use metrics_exporter_prometheus::PrometheusHandle;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use opscore::departments::DepartmentSuite;
use opscore::registry::ModelRegistry;
use opscore::scoring::round2;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Shared handles the scoring routes operate on. Engines are pure and need no
/// locking; the ledger and registry guard their own interior state.
pub(crate) struct ServiceState {
    pub(crate) suite: DepartmentSuite,
    pub(crate) ledger: DashboardLedger,
    pub(crate) registry: Mutex<ModelRegistry>,
}

#[derive(Default)]
struct LedgerCounters {
    analyses: BTreeMap<&'static str, u64>,
    income_total: f64,
}

/// In-memory tally of what the service has analyzed since startup, surfaced
/// on the dashboard endpoint.
#[derive(Default)]
pub(crate) struct DashboardLedger {
    counters: Mutex<LedgerCounters>,
}

#[derive(Debug, Serialize)]
pub(crate) struct DashboardSnapshot {
    pub(crate) analyses_by_department: BTreeMap<&'static str, u64>,
    pub(crate) total_analyses: u64,
    pub(crate) analyzed_revenue: f64,
    pub(crate) registered_models: usize,
}

impl DashboardLedger {
    pub(crate) fn record_analysis(&self, department: &'static str) {
        let mut guard = self.counters.lock().expect("ledger mutex poisoned");
        *guard.analyses.entry(department).or_insert(0) += 1;
    }

    pub(crate) fn record_income(&self, amount: f64) {
        let mut guard = self.counters.lock().expect("ledger mutex poisoned");
        guard.income_total += amount;
    }

    pub(crate) fn snapshot(&self, registered_models: usize) -> DashboardSnapshot {
        let guard = self.counters.lock().expect("ledger mutex poisoned");
        DashboardSnapshot {
            analyses_by_department: guard.analyses.clone(),
            total_analyses: guard.analyses.values().sum(),
            analyzed_revenue: round2(guard.income_total),
            registered_models,
        }
    }
}
