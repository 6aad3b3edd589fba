//! Candidate account discovery
//!
//! The static seed list is always used. Leaderboard discovery is best effort
//! and only adds accounts on top of the seeds.

use crate::config::DiscoveryConfig;
use crate::connectors::traits::InfoSource;

use log::{info, warn};
use std::collections::HashSet;

pub async fn discover_accounts(source: &dyn InfoSource, config: &DiscoveryConfig) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut accounts: Vec<String> = config.seed_addresses
        .iter()
        .filter_map(|address| normalize_address(address))
        .filter(|address| seen.insert(address.clone()))
        .collect();

    if !config.use_leaderboard {
        return accounts;
    }

    match source.leaderboard(&config.leaderboard_window).await {
        Ok(board) => {
            let before = accounts.len();
            accounts.extend(
                board.leaderboard_rows
                    .iter()
                    .filter_map(|row| normalize_address(&row.eth_address))
                    .filter(|address| seen.insert(address.clone()))
                    .take(config.max_leaderboard_accounts),
            );
            info!(
                "Leaderboard ({}) added {} accounts",
                config.leaderboard_window,
                accounts.len() - before
            );
        }
        Err(e) => warn!("Leaderboard discovery failed, using seed addresses only: {e}"),
    }

    accounts
}

fn normalize_address(address: &str) -> Option<String> {
    let trimmed = address.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}
