//! Position fetcher
//!
//! Pulls account state and mid prices from an [`InfoSource`], normalizes every
//! open position into a [`DisasterPosition`] and keeps only the ones that pass
//! the disaster thresholds. Failures are contained per account.

use crate::connectors::traits::InfoSource;
use crate::scanner::calc::{calculate_liquidation_distance, calculate_pnl_percentage, parse_decimal};
use crate::types::{AllMids, AppError, DisasterPosition, PositionData, Result};

use futures::stream::{self, StreamExt};
use log::{debug, error, info, warn};
use std::sync::Arc;
use tokio::sync::OnceCell;

/// Outcome of scanning a single account.
#[derive(Debug, Clone)]
pub enum AccountScan {
    /// The account has open positions; holds the ones that qualify (possibly none).
    Found(Vec<DisasterPosition>),
    /// The account has no open positions.
    NoPositions,
    /// The account could not be scanned.
    Failed(AppError),
}

impl AccountScan {
    pub fn disasters(&self) -> &[DisasterPosition] {
        match self {
            AccountScan::Found(positions) => positions,
            _ => &[],
        }
    }
}

/// Aggregate result of one scan cycle over many accounts.
#[derive(Debug, Clone, Default)]
pub struct ScanReport {
    /// Eligible positions, in account order
    pub positions: Vec<DisasterPosition>,
    pub accounts_checked: usize,
    pub accounts_failed: usize,
    pub accounts_with_positions: usize,
}

impl ScanReport {
    /// True when at least one account was checked and every one of them failed.
    pub fn all_failed(&self) -> bool {
        self.accounts_checked > 0 && self.accounts_failed == self.accounts_checked
    }
}

pub struct PositionFetcher {
    source: Arc<dyn InfoSource>,
    max_concurrent_requests: usize,
}

impl PositionFetcher {
    pub fn new(source: Arc<dyn InfoSource>, max_concurrent_requests: usize) -> Self {
        Self {
            source,
            max_concurrent_requests: max_concurrent_requests.max(1),
        }
    }

    /// Scan a single account. Never fails; errors become [`AccountScan::Failed`].
    pub async fn fetch_user_positions(&self, account: &str) -> AccountScan {
        let mids = OnceCell::new();
        self.scan_account(account, &mids).await
    }

    /// Scan every account with at most `max_concurrent_requests` in flight.
    ///
    /// The mid price table is fetched lazily and shared by all accounts of this
    /// cycle. Results keep the order of `accounts`.
    pub async fn scan_accounts(&self, accounts: &[String]) -> ScanReport {
        let mids = OnceCell::new();
        let mids_ref = &mids;

        let scans: Vec<AccountScan> = stream::iter(accounts.iter())
            .map(|account| async move { self.scan_account(account, mids_ref).await })
            .buffered(self.max_concurrent_requests)
            .collect()
            .await;

        let mut report = ScanReport {
            accounts_checked: scans.len(),
            ..ScanReport::default()
        };
        for scan in scans {
            match scan {
                AccountScan::Found(positions) => {
                    report.accounts_with_positions += 1;
                    report.positions.extend(positions);
                }
                AccountScan::NoPositions => {}
                AccountScan::Failed(_) => report.accounts_failed += 1,
            }
        }

        info!(
            "Scanned {} accounts via {}: {} with positions, {} failed, {} disasters",
            report.accounts_checked,
            self.source.get_source_name(),
            report.accounts_with_positions,
            report.accounts_failed,
            report.positions.len()
        );
        report
    }

    async fn scan_account(&self, account: &str, mids: &OnceCell<AllMids>) -> AccountScan {
        match self.try_scan_account(account, mids).await {
            Ok(scan) => scan,
            Err(e) => {
                if e.is_transport() {
                    warn!("Error fetching positions for {account}: {e}");
                } else {
                    error!("Unexpected response for {account}: {e}");
                }
                AccountScan::Failed(e)
            }
        }
    }

    async fn try_scan_account(&self, account: &str, mids: &OnceCell<AllMids>) -> Result<AccountScan> {
        let state = self.source.clearinghouse_state(account).await?;
        if state.asset_positions.is_empty() {
            debug!("{account} has no open positions");
            return Ok(AccountScan::NoPositions);
        }

        let mids = mids
            .get_or_try_init(|| async { self.source.all_mids().await })
            .await?;

        let disasters: Vec<DisasterPosition> = state.asset_positions
            .iter()
            .map(|asset_position| normalize_position(account, &asset_position.position, mids))
            .filter(DisasterPosition::is_disaster)
            .collect();

        debug!(
            "{account}: {} open positions, {} disasters",
            state.asset_positions.len(),
            disasters.len()
        );
        Ok(AccountScan::Found(disasters))
    }
}

/// Build a normalized record from raw position data and the mid price table.
///
/// The mark price falls back to the entry price when the asset has no mid.
pub fn normalize_position(account: &str, raw: &PositionData, mids: &AllMids) -> DisasterPosition {
    let entry_price = parse_decimal(raw.entry_px.as_deref());
    let mark_price = mids
        .get(&raw.coin)
        .map(|mid| parse_decimal(Some(mid)))
        .filter(|mid| *mid != 0.0)
        .unwrap_or(entry_price);
    let size = parse_decimal(raw.szi.as_deref());
    let unrealized_pnl = parse_decimal(raw.unrealized_pnl.as_deref());
    let leverage = raw.leverage.as_ref().map(|l| l.value).unwrap_or(0.0);
    let position_value = (size * entry_price).abs();
    let is_long = size > 0.0;
    let liquidation_px = parse_decimal(raw.liquidation_px.as_deref());

    DisasterPosition {
        account: account.to_string(),
        asset: raw.coin.clone(),
        unrealized_pnl,
        pnl_percentage: calculate_pnl_percentage(unrealized_pnl, position_value),
        leverage,
        position_value,
        liquidation_distance: calculate_liquidation_distance(liquidation_px, mark_price, is_long),
        entry_price,
        mark_price,
        size,
        opened_at: raw.open_time,
        is_long,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Leverage;

    fn raw_position(coin: &str, szi: &str, entry: &str, upnl: &str, lev: f64, liq: Option<&str>) -> PositionData {
        PositionData {
            coin: coin.to_string(),
            szi: Some(szi.to_string()),
            entry_px: Some(entry.to_string()),
            unrealized_pnl: Some(upnl.to_string()),
            leverage: Some(Leverage { type_string: "cross".to_string(), value: lev }),
            liquidation_px: liq.map(str::to_string),
            open_time: None,
        }
    }

    #[test]
    fn test_normalize_short_eth() {
        let mut mids = AllMids::new();
        mids.insert("ETH".to_string(), "3125.50".to_string());

        let raw = raw_position("ETH", "-6.63", "3450.00", "-15430", 15.0, None);
        let pos = normalize_position("0xabc", &raw, &mids);

        assert!((pos.position_value - 22873.5).abs() < 1e-6);
        assert!((pos.pnl_percentage - (-67.458)).abs() < 0.01);
        assert_eq!(pos.mark_price, 3125.5);
        assert!(!pos.is_long);
        assert_eq!(pos.liquidation_distance, 0.0);
        assert!(pos.is_disaster());
    }

    #[test]
    fn test_normalize_mark_falls_back_to_entry() {
        let raw = raw_position("DOGE", "1000", "0.5", "-300", 20.0, Some("0.45"));
        let pos = normalize_position("0xabc", &raw, &AllMids::new());

        assert_eq!(pos.mark_price, 0.5);
        assert!(pos.is_long);
        assert!((pos.liquidation_distance - 10.0).abs() < 1e-9);
        // Position value of 500 is below the threshold
        assert!(!pos.is_disaster());
    }

    #[test]
    fn test_normalize_zero_size() {
        let raw = raw_position("SOL", "0", "100", "-10", 50.0, Some("90"));
        let pos = normalize_position("0xabc", &raw, &AllMids::new());
        assert_eq!(pos.position_value, 0.0);
        assert_eq!(pos.pnl_percentage, 0.0);
        assert!(!pos.is_long);
    }

    #[test]
    fn test_normalize_missing_fields() {
        let raw = PositionData {
            coin: "ARB".to_string(),
            szi: None,
            entry_px: None,
            unrealized_pnl: Some("garbage".to_string()),
            leverage: None,
            liquidation_px: None,
            open_time: Some(42),
        };
        let pos = normalize_position("0xabc", &raw, &AllMids::new());
        assert_eq!(pos.leverage, 0.0);
        assert_eq!(pos.unrealized_pnl, 0.0);
        assert_eq!(pos.opened_at, Some(42));
        assert!(pos.liquidation_distance >= 0.0 && pos.liquidation_distance <= 100.0);
    }

    #[test]
    fn test_report_all_failed() {
        let mut report = ScanReport::default();
        assert!(!report.all_failed());
        report.accounts_checked = 2;
        report.accounts_failed = 2;
        assert!(report.all_failed());
        report.accounts_failed = 1;
        assert!(!report.all_failed());
    }
}
