//! Disaster scanner
//!
//! One scan cycle: discover accounts, fetch and filter their positions, then
//! select a record to display, falling back to demo data when needed.

pub mod calc;
pub mod discovery;
pub mod fallback;
pub mod fetcher;
pub mod selector;


pub use discovery::discover_accounts;
pub use fallback::{DemoDisasters, FallbackProvider};
pub use fetcher::{AccountScan, PositionFetcher, ScanReport};
pub use selector::{DisasterSelector, Selection};

use crate::config::Config;
use crate::config::DiscoveryConfig;
use crate::connectors::traits::InfoSource;

use log::{info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;

pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch positions. Using demonstration data.";
pub const NO_ACCOUNTS_MESSAGE: &str = "No accounts to check. Using demonstration data.";
pub const NO_DISASTERS_MESSAGE: &str = "No live disasters found. Showing demonstration data.";

/// Result of one end-to-end cycle.
#[derive(Debug, Clone)]
pub enum CycleOutcome {
    /// Live disasters were found.
    Live { selection: Selection, report: ScanReport },
    /// Accounts were scanned but none qualified; demo data is shown.
    NoDisasters { selection: Selection, report: ScanReport, notice: String },
    /// The live query failed as a whole; demo data is shown.
    Failed { selection: Selection, message: String },
}

impl CycleOutcome {
    pub fn selection(&self) -> &Selection {
        match self {
            CycleOutcome::Live { selection, .. }
            | CycleOutcome::NoDisasters { selection, .. }
            | CycleOutcome::Failed { selection, .. } => selection,
        }
    }
}

pub struct DisasterScanner {
    source: Arc<dyn InfoSource>,
    fetcher: PositionFetcher,
    selector: DisasterSelector,
    discovery: DiscoveryConfig,
}

impl DisasterScanner {
    pub fn new(source: Arc<dyn InfoSource>, fallback: Arc<dyn FallbackProvider>, config: &Config) -> Self {
        Self {
            fetcher: PositionFetcher::new(source.clone(), config.api.max_concurrent_requests),
            selector: DisasterSelector::new(fallback, config.selection.pick_from_top),
            discovery: config.discovery.clone(),
            source,
        }
    }

    /// Discover accounts and scan them. Network only; no selection.
    pub async fn scan(&self) -> (Vec<String>, ScanReport) {
        let accounts = discover_accounts(self.source.as_ref(), &self.discovery).await;
        info!("Checking {} accounts for disaster positions", accounts.len());
        let report = self.fetcher.scan_accounts(&accounts).await;
        (accounts, report)
    }

    /// Turn a scan report into the record to display.
    pub fn resolve<R: Rng + ?Sized>(&self, accounts: &[String], report: ScanReport, rng: &mut R) -> CycleOutcome {
        if accounts.is_empty() {
            warn!("No candidate accounts configured");
            return CycleOutcome::Failed {
                selection: self.selector.select_fallback(rng),
                message: NO_ACCOUNTS_MESSAGE.to_string(),
            };
        }

        if report.all_failed() {
            warn!("All {} account scans failed, falling back to demo data", report.accounts_checked);
            return CycleOutcome::Failed {
                selection: self.selector.select_fallback(rng),
                message: FETCH_FAILED_MESSAGE.to_string(),
            };
        }

        if report.positions.is_empty() {
            info!("No real disasters found, using demo data");
            return CycleOutcome::NoDisasters {
                selection: self.selector.select_fallback(rng),
                report,
                notice: NO_DISASTERS_MESSAGE.to_string(),
            };
        }

        let selection = self.selector.select(report.positions.clone(), rng);
        CycleOutcome::Live { selection, report }
    }

    /// Run a full cycle with an entropy-seeded RNG.
    pub async fn run_cycle(&self) -> CycleOutcome {
        let (accounts, report) = self.scan().await;
        let mut rng = StdRng::from_entropy();
        self.resolve(&accounts, report, &mut rng)
    }
}
