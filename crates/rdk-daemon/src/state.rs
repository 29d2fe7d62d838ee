//! Shared runtime state for rdk-daemon.
//!
//! Handlers receive `State<Arc<AppState>>` from Axum.  All ledger mutations
//! go through the async mutex — `remove → undo` and `clear → undo` are
//! check-then-act sequences and need single-writer discipline.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use tokio::sync::Mutex;
use tracing::{info, warn};

use rdk_engine::RiskPolicy;
use rdk_ledger::{HistoryStore, LedgerConfig, RecentChecksLedger};
use rdk_store::JsonFileStore;
use rdk_submit::HttpOpinionClient;

/// Store key under which the recent-checks sequence is mirrored.
pub const HISTORY_KEY: &str = "recent_checks";

/// System wall clock in epoch-milliseconds (the ledger's injected clock).
pub fn wall_clock_ms() -> i64 {
    Utc::now().timestamp_millis()
}

pub type DaemonLedger = RecentChecksLedger<fn() -> i64, JsonFileStore>;

/// Static build metadata included in health responses.
#[derive(Clone, Debug)]
pub struct BuildInfo {
    pub service: &'static str,
    pub version: &'static str,
}

pub struct AppState {
    pub build: BuildInfo,
    pub policy: RiskPolicy,
    pub opinion: HttpOpinionClient,
    pub ledger: Mutex<DaemonLedger>,
}

impl AppState {
    /// Build the state: file store under `data_dir`, default policy, ledger
    /// rehydrated from the persisted sequence when one exists (preferred
    /// over any remote history fetch).
    pub fn new(data_dir: impl AsRef<Path>, opinion: HttpOpinionClient) -> Result<Self> {
        let store = JsonFileStore::new(&data_dir)
            .with_context(|| format!("open history store in {:?}", data_dir.as_ref()))?;

        let mut ledger = DaemonLedger::new(
            LedgerConfig::sane_defaults(),
            wall_clock_ms,
            store.clone(),
            HISTORY_KEY,
        );

        match store.read(HISTORY_KEY) {
            Ok(Some(entries)) => {
                info!(count = entries.len(), "rehydrated recent checks");
                ledger.hydrate(entries);
            }
            Ok(None) => {}
            // A broken history file must not stop the daemon; start empty.
            Err(err) => warn!("history rehydration failed: {err:#}"),
        }

        Ok(Self {
            build: BuildInfo {
                service: "rdk-daemon",
                version: env!("CARGO_PKG_VERSION"),
            },
            policy: RiskPolicy::sane_defaults(),
            opinion,
            ledger: Mutex::new(ledger),
        })
    }
}
