// src/types/mod.rs - Shared types

pub mod api;
pub mod errors;
pub mod position;

pub use api::{AllMids, AssetPosition, ClearinghouseState, InfoRequest, Leaderboard, LeaderboardRow, Leverage, PositionData};
pub use errors::{AppError, Result};
pub use position::{DisasterPosition, MIN_LEVERAGE, MIN_LOSS_PERCENTAGE, MIN_POSITION_VALUE};
