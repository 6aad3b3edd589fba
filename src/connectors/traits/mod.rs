// src/connectors/traits/mod.rs - Market data source seam

use async_trait::async_trait;
use crate::types::{AllMids, ClearinghouseState, Leaderboard, Result};

/// Read-only access to the exchange info endpoint.
///
/// The scanner only talks to the exchange through this trait, so tests can
/// substitute canned responses for the HTTP client.
#[async_trait]
pub trait InfoSource: Send + Sync {
    fn get_source_name(&self) -> &str;

    /// Account state including open positions.
    async fn clearinghouse_state(&self, user: &str) -> Result<ClearinghouseState>;

    /// Current mid price for every listed asset.
    async fn all_mids(&self) -> Result<AllMids>;

    /// Active accounts over a time window. Sources without a leaderboard
    /// report an empty one.
    async fn leaderboard(&self, _window: &str) -> Result<Leaderboard> {
        Ok(Leaderboard { leaderboard_rows: Vec::new() })
    }
}
