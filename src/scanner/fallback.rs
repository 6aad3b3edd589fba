//! Static fallback data shown when no live disasters are available

use crate::types::DisasterPosition;
use chrono::Utc;

const MILLIS_PER_HOUR: i64 = 60 * 60 * 1000;

/// Supplies the records displayed in demo mode.
pub trait FallbackProvider: Send + Sync {
    fn fallback_positions(&self) -> Vec<DisasterPosition>;
}

/// Built-in demonstration disasters.
///
/// Open times are expressed relative to a reference clock so the rendered
/// "time in position" stays stable across runs.
#[derive(Debug, Clone, Default)]
pub struct DemoDisasters {
    now_ms: Option<i64>,
}

struct DemoSpec {
    account: &'static str,
    asset: &'static str,
    unrealized_pnl: f64,
    pnl_percentage: f64,
    leverage: f64,
    position_value: f64,
    liquidation_distance: f64,
    entry_price: f64,
    mark_price: f64,
    hours_open: i64,
}

const DEMO_SPECS: [DemoSpec; 5] = [
    DemoSpec {
        account: "0x1234567890abcdef1234567890abcdef12347a3f",
        asset: "ETH",
        unrealized_pnl: -125430.0,
        pnl_percentage: -87.5,
        leverage: 25.0,
        position_value: 143348.0,
        liquidation_distance: 12.3,
        entry_price: 3850.0,
        mark_price: 3125.5,
        hours_open: 3 * 24 + 14,
    },
    DemoSpec {
        account: "0xabcdef1234567890abcdef1234567890abcd8b2e",
        asset: "BTC",
        unrealized_pnl: -89234.0,
        pnl_percentage: -72.1,
        leverage: 20.0,
        position_value: 123765.0,
        liquidation_distance: 8.7,
        entry_price: 68500.0,
        mark_price: 45230.0,
        hours_open: 24 + 7,
    },
    DemoSpec {
        account: "0x7890abcdef1234567890abcdef1234567890c4d1",
        asset: "SOL",
        unrealized_pnl: -45678.0,
        pnl_percentage: -94.2,
        leverage: 50.0,
        position_value: 48502.0,
        liquidation_distance: 3.2,
        entry_price: 185.0,
        mark_price: 98.5,
        hours_open: 18,
    },
    DemoSpec {
        account: "0xdef1234567890abcdef1234567890abcdef1f5a2",
        asset: "AVAX",
        unrealized_pnl: -234567.0,
        pnl_percentage: -91.8,
        leverage: 30.0,
        position_value: 255616.0,
        liquidation_distance: 5.4,
        entry_price: 95.0,
        mark_price: 42.3,
        hours_open: 5 * 24 + 2,
    },
    DemoSpec {
        account: "0x9876543210fedcba9876543210fedcba98765432",
        asset: "ARB",
        unrealized_pnl: -67890.0,
        pnl_percentage: -78.3,
        leverage: 35.0,
        position_value: 86678.0,
        liquidation_distance: 7.8,
        entry_price: 2.85,
        mark_price: 1.42,
        hours_open: 2 * 24 + 19,
    },
];

impl DemoDisasters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pin the reference clock used for open times.
    pub fn at(now_ms: i64) -> Self {
        Self { now_ms: Some(now_ms) }
    }
}

impl FallbackProvider for DemoDisasters {
    fn fallback_positions(&self) -> Vec<DisasterPosition> {
        let now_ms = self.now_ms.unwrap_or_else(|| Utc::now().timestamp_millis());

        DEMO_SPECS
            .iter()
            .map(|spec| DisasterPosition {
                account: spec.account.to_string(),
                asset: spec.asset.to_string(),
                unrealized_pnl: spec.unrealized_pnl,
                pnl_percentage: spec.pnl_percentage,
                leverage: spec.leverage,
                position_value: spec.position_value,
                liquidation_distance: spec.liquidation_distance,
                entry_price: spec.entry_price,
                mark_price: spec.mark_price,
                // Every demo disaster is a long caught in a sell-off
                size: spec.position_value / spec.entry_price,
                opened_at: Some(now_ms - spec.hours_open * MILLIS_PER_HOUR),
                is_long: true,
            })
            .collect()
    }
}
