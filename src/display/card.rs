//! Terminal rendering of the disaster card and its surrounding view

use crate::app::{ButtonState, ViewState};
use crate::scanner::calc::{format_address, format_usd, time_in_position};
use crate::types::{DisasterPosition, MIN_LEVERAGE, MIN_LOSS_PERCENTAGE};

use colored::{ColoredString, Colorize};

const CARD_WIDTH: usize = 44;
const BAR_WIDTH: usize = 30;

/// Loss severity tiers used to colour the card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LossSeverity {
    Catastrophic,
    Severe,
    Heavy,
    Moderate,
    Mild,
}

impl LossSeverity {
    pub fn from_pnl_percentage(pnl_percentage: f64) -> Self {
        let loss = pnl_percentage.abs();
        if loss >= 90.0 {
            LossSeverity::Catastrophic
        } else if loss >= 70.0 {
            LossSeverity::Severe
        } else if loss >= 50.0 {
            LossSeverity::Heavy
        } else if loss >= 30.0 {
            LossSeverity::Moderate
        } else {
            LossSeverity::Mild
        }
    }

    fn paint(self, text: &str) -> ColoredString {
        match self {
            LossSeverity::Catastrophic => text.white().on_red().bold(),
            LossSeverity::Severe => text.bright_white().on_red(),
            LossSeverity::Heavy => text.red().bold(),
            LossSeverity::Moderate => text.bright_red(),
            LossSeverity::Mild => text.yellow(),
        }
    }
}

pub fn render_header(demo_mode: bool) -> String {
    let mut out = format!(
        "{}\n{}\n",
        "Hyper Rekt".bold(),
        "Witness Hyperliquid's Most Painful Positions".dimmed()
    );
    if demo_mode {
        out.push_str(&format!("{}\n", "Demo Mode - Add more addresses for real data".yellow()));
    }
    out
}

pub fn render_button(state: ButtonState) -> String {
    let label = match state {
        ButtonState::Loading => "⏳ Finding Disaster...".dimmed(),
        ButtonState::Ready => "💀 SPIN FOR PAIN 💀".bold().red(),
    };
    format!("[ {label} ]")
}

/// Bar filled in proportion to how close the position is to liquidation.
pub fn liquidation_bar(liquidation_distance: f64) -> String {
    let fill_pct = (100.0 - liquidation_distance).clamp(0.0, 100.0);
    let filled = ((fill_pct / 100.0) * BAR_WIDTH as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

pub fn render_card(position: &DisasterPosition, now_ms: i64) -> String {
    let severity = LossSeverity::from_pnl_percentage(position.pnl_percentage);
    let rule = "─".repeat(CARD_WIDTH);
    let mut lines = Vec::new();

    lines.push(severity.paint(&rule).to_string());
    lines.push(format!(
        "{:<22}{:>22}",
        format!("DEGEN {}", format_address(&position.account)),
        format!("ASSET {} {}", position.asset, position.side_label())
    ));
    lines.push(String::new());
    lines.push(format!("{:^44}", "UNREALIZED P&L"));
    lines.push(format!("{:^44}", severity.paint(&format_usd(position.unrealized_pnl))));
    lines.push(format!("{:^44}", format!("{:.1}%", position.pnl_percentage).red()));
    lines.push(String::new());
    lines.push(format!(
        "{} {:<16}{} {}",
        "⚡ LEVERAGE".yellow(),
        format!("{}x", position.leverage),
        "POSITION SIZE".dimmed(),
        format_usd(position.position_value)
    ));
    lines.push(format!("{}", "LIQUIDATION DISTANCE".truecolor(255, 165, 0)));
    lines.push(format!(
        "{} {}",
        liquidation_bar(position.liquidation_distance).red(),
        format!("{:.1}% away", position.liquidation_distance).truecolor(255, 165, 0)
    ));
    lines.push(format!(
        "ENTRY PRICE {:<12} MARK PRICE {}",
        position.entry_price_display(),
        position.mark_price_display()
    ));
    lines.push(format!("SUFFERING FOR {}", time_in_position(position.opened_at, now_ms)));
    lines.push(severity.paint(&rule).to_string());

    lines.join("\n")
}

pub fn render_stats(candidate_count: usize, demo_mode: bool) -> String {
    if demo_mode {
        return "Showing demo disasters".dimmed().to_string();
    }
    let suffix = if candidate_count == 1 { "" } else { "s" };
    format!("Found {candidate_count} disaster position{suffix}").dimmed().to_string()
}

pub fn render_footer() -> String {
    format!(
        "{}\n{}",
        format!("Live positions with leverage >{MIN_LEVERAGE}x and losses >{MIN_LOSS_PERCENTAGE}%").dimmed(),
        "Not financial advice. Just entertainment.".dimmed()
    )
}

/// Render the full view for the given state.
pub fn render_view(state: &ViewState, now_ms: i64) -> String {
    let mut sections = vec![render_header(state.is_demo_mode()), render_button(state.button_state())];

    if let Some(message) = state.error_message() {
        sections.push(message.red().to_string());
    }

    match state {
        ViewState::Idle => {
            sections.push("Press the button to reveal a trading disaster".dimmed().to_string());
        }
        ViewState::Loading => {}
        ViewState::Displaying(snapshot) | ViewState::ErrorWithFallback { snapshot, .. } => {
            if let Some(notice) = &snapshot.notice {
                sections.push(notice.yellow().to_string());
            }
            sections.push(render_card(&snapshot.current, now_ms));
            sections.push(render_stats(snapshot.candidates.len(), snapshot.demo_mode));
        }
    }

    sections.push(render_footer());
    sections.join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::DisplaySnapshot;
    use crate::scanner::{DemoDisasters, FallbackProvider};

    fn plain() {
        colored::control::set_override(false);
    }

    #[test]
    fn test_loss_severity_tiers() {
        assert_eq!(LossSeverity::from_pnl_percentage(-95.0), LossSeverity::Catastrophic);
        assert_eq!(LossSeverity::from_pnl_percentage(-90.0), LossSeverity::Catastrophic);
        assert_eq!(LossSeverity::from_pnl_percentage(-70.0), LossSeverity::Severe);
        assert_eq!(LossSeverity::from_pnl_percentage(-50.0), LossSeverity::Heavy);
        assert_eq!(LossSeverity::from_pnl_percentage(-30.0), LossSeverity::Moderate);
        assert_eq!(LossSeverity::from_pnl_percentage(-5.0), LossSeverity::Mild);
    }

    #[test]
    fn test_liquidation_bar() {
        assert_eq!(liquidation_bar(100.0), "░".repeat(BAR_WIDTH));
        assert_eq!(liquidation_bar(0.0), "█".repeat(BAR_WIDTH));
        let half = liquidation_bar(50.0);
        assert_eq!(half.chars().filter(|c| *c == '█').count(), BAR_WIDTH / 2);
    }

    #[test]
    fn test_render_card_contents() {
        plain();
        let now = 1_700_000_000_000;
        let demo = DemoDisasters::at(now).fallback_positions();
        let card = render_card(&demo[0], now);
        assert!(card.contains("...7a3f"));
        assert!(card.contains("ETH"));
        assert!(card.contains("-$125,430"));
        assert!(card.contains("-87.5%"));
        assert!(card.contains("25x"));
        assert!(card.contains("$143,348"));
        assert!(card.contains("12.3% away"));
        assert!(card.contains("3850.00"));
        assert!(card.contains("3125.50"));
        assert!(card.contains("3 days 14 hours"));
    }

    #[test]
    fn test_render_stats() {
        plain();
        assert_eq!(render_stats(1, false), "Found 1 disaster position");
        assert_eq!(render_stats(3, false), "Found 3 disaster positions");
        assert_eq!(render_stats(5, true), "Showing demo disasters");
    }

    #[test]
    fn test_render_views() {
        plain();
        let idle = render_view(&ViewState::Idle, 0);
        assert!(idle.contains("SPIN FOR PAIN"));
        assert!(idle.contains("Press the button"));
        assert!(!idle.contains("Demo Mode"));

        let loading = render_view(&ViewState::Loading, 0);
        assert!(loading.contains("Finding Disaster..."));

        let demo = DemoDisasters::at(0).fallback_positions();
        let state = ViewState::ErrorWithFallback {
            message: "Failed to fetch positions. Using demonstration data.".to_string(),
            snapshot: DisplaySnapshot {
                current: demo[1].clone(),
                candidates: demo,
                demo_mode: true,
                notice: None,
            },
        };
        let view = render_view(&state, 0);
        assert!(view.contains("Demo Mode"));
        assert!(view.contains("Failed to fetch positions"));
        assert!(view.contains("BTC"));
        assert!(view.contains("Showing demo disasters"));
        assert!(view.contains("Not financial advice"));
    }
}
