//! Wire types for the Hyperliquid info endpoint.
//!
//! Numeric fields usually arrive as decimal strings but bare numbers are
//! accepted too. They are kept as strings here and parsed during normalization
//! so a single malformed field never rejects a whole account response.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Request body for `POST /info`, discriminated by `type`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum InfoRequest {
    #[serde(rename = "clearinghouseState")]
    ClearinghouseState { user: String },
    #[serde(rename = "allMids")]
    AllMids,
    #[serde(rename = "leaderboard")]
    Leaderboard { window: String },
}

/// Leverage setting attached to a position.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Leverage {
    #[serde(rename = "type", default)]
    pub type_string: String,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub value: f64,
}

/// Raw position data for a single asset.
///
/// Only the fields read during normalization are kept. Decimal fields accept
/// either a string or a bare number; anything else reads as absent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PositionData {
    pub coin: String,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub szi: Option<String>,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub entry_px: Option<String>,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub unrealized_pnl: Option<String>,
    #[serde(default, deserialize_with = "lenient_leverage")]
    pub leverage: Option<Leverage>,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub liquidation_px: Option<String>,
    /// Not part of the documented schema; honoured when present.
    #[serde(default, deserialize_with = "lenient_i64")]
    pub open_time: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AssetPosition {
    pub position: PositionData,
}

/// Response to `clearinghouseState`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClearinghouseState {
    #[serde(default)]
    pub asset_positions: Vec<AssetPosition>,
}

/// Response to `allMids`: coin symbol to mid price.
pub type AllMids = HashMap<String, String>;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardRow {
    pub eth_address: String,
}

/// Response to `leaderboard`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Leaderboard {
    #[serde(default)]
    pub leaderboard_rows: Vec<LeaderboardRow>,
}

fn lenient_decimal<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    })
}

fn lenient_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

fn lenient_leverage<'de, D>(deserializer: D) -> Result<Option<Leverage>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}
