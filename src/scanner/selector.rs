//! Disaster selector
//!
//! Ranking: records are ordered by [`DisasterPosition::pain_score`]
//! (`0.7 × |pnl%| + 0.3 × (100 − liquidation distance)`), most painful first.
//! The sort is stable, so equal scores keep their fetch order.
//!
//! Selection: the displayed record is a uniform random pick among the
//! `pick_from_top` highest ranked records (all of them when `pick_from_top` is 0).
//! With no eligible input the selector switches to demo mode and picks uniformly
//! from the fallback provider's records.

use crate::scanner::fallback::{DemoDisasters, FallbackProvider};
use crate::types::DisasterPosition;

use log::{debug, warn};
use rand::Rng;
use std::sync::Arc;

/// The record to display together with the ranked candidate list.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub current: DisasterPosition,
    /// Every candidate, most painful first
    pub candidates: Vec<DisasterPosition>,
    pub demo_mode: bool,
}

pub struct DisasterSelector {
    fallback: Arc<dyn FallbackProvider>,
    pick_from_top: usize,
}

impl DisasterSelector {
    pub fn new(fallback: Arc<dyn FallbackProvider>, pick_from_top: usize) -> Self {
        Self { fallback, pick_from_top }
    }

    /// Pick one record from the eligible set, or from the fallback set when it is empty.
    pub fn select<R: Rng + ?Sized>(&self, eligible: Vec<DisasterPosition>, rng: &mut R) -> Selection {
        if eligible.is_empty() {
            return self.select_fallback(rng);
        }

        let candidates = rank_by_pain(eligible);
        let pool = match self.pick_from_top {
            0 => candidates.len(),
            n => n.min(candidates.len()),
        };
        let index = rng.gen_range(0..pool);
        debug!("Selected disaster {} of top {} ({} candidates)", index + 1, pool, candidates.len());

        Selection {
            current: candidates[index].clone(),
            candidates,
            demo_mode: false,
        }
    }

    /// Demo-mode selection, used when nothing live is eligible or the scan failed.
    pub fn select_fallback<R: Rng + ?Sized>(&self, rng: &mut R) -> Selection {
        let mut candidates = self.fallback.fallback_positions();
        if candidates.is_empty() {
            warn!("Fallback provider returned no records, using built-in demo disasters");
            candidates = DemoDisasters::new().fallback_positions();
        }

        let index = rng.gen_range(0..candidates.len());
        Selection {
            current: candidates[index].clone(),
            candidates,
            demo_mode: true,
        }
    }
}

/// Sort descending by pain score. Stable for equal scores.
pub fn rank_by_pain(mut positions: Vec<DisasterPosition>) -> Vec<DisasterPosition> {
    positions.sort_by(|a, b| b.pain_score().total_cmp(&a.pain_score()));
    positions
}
