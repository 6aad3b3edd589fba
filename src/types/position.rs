//! Normalized disaster position record

use serde::{Deserialize, Serialize};

/// Minimum leverage for a position to qualify as a disaster.
pub const MIN_LEVERAGE: f64 = 10.0;
/// Minimum unrealized loss, in percent of position value.
pub const MIN_LOSS_PERCENTAGE: f64 = 50.0;
/// Minimum position value in USD.
pub const MIN_POSITION_VALUE: f64 = 1000.0;

/// An open leveraged position with derived risk metrics.
///
/// Built once per fetch cycle and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisasterPosition {
    /// Account address that owns the position
    pub account: String,
    /// Coin ticker
    pub asset: String,
    /// Signed unrealized PnL in USD
    pub unrealized_pnl: f64,
    /// Unrealized PnL relative to position value, in percent
    pub pnl_percentage: f64,
    pub leverage: f64,
    /// |size × entry price|
    pub position_value: f64,
    /// Distance from mark to liquidation price in percent, within [0, 100]
    pub liquidation_distance: f64,
    pub entry_price: f64,
    pub mark_price: f64,
    /// Signed position size
    pub size: f64,
    /// Epoch millis when the position was opened, if the exchange reported it
    pub opened_at: Option<i64>,
    pub is_long: bool,
}

impl DisasterPosition {
    /// Whether all three disaster thresholds hold. Every bound is inclusive.
    pub fn is_disaster(&self) -> bool {
        self.leverage >= MIN_LEVERAGE
            && self.pnl_percentage <= -MIN_LOSS_PERCENTAGE
            && self.position_value >= MIN_POSITION_VALUE
    }

    /// Composite ranking metric: loss severity weighted 70%, proximity to
    /// liquidation weighted 30%.
    pub fn pain_score(&self) -> f64 {
        0.7 * self.pnl_percentage.abs() + 0.3 * (100.0 - self.liquidation_distance)
    }

    pub fn entry_price_display(&self) -> String {
        format!("{:.2}", self.entry_price)
    }

    pub fn mark_price_display(&self) -> String {
        format!("{:.2}", self.mark_price)
    }

    pub fn side_label(&self) -> &'static str {
        if self.is_long { "LONG" } else { "SHORT" }
    }
}
