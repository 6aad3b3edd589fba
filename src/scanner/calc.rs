//! Pure risk and formatting helpers used by the scanner and the card renderer

const MILLIS_PER_HOUR: i64 = 60 * 60 * 1000;

pub const UNKNOWN_DURATION: &str = "Unknown";

/// Parse an exchange decimal string, treating absent or malformed values as zero.
pub fn parse_decimal(raw: Option<&str>) -> f64 {
    raw.and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Unrealized PnL in percent of position value. Zero when the value is zero.
pub fn calculate_pnl_percentage(unrealized_pnl: f64, position_value: f64) -> f64 {
    if position_value == 0.0 || !position_value.is_finite() {
        return 0.0;
    }
    unrealized_pnl / position_value * 100.0
}

/// Distance from mark to liquidation price in percent, clamped to [0, 100].
///
/// Longs liquidate below the mark and shorts above it, so the sign of the gap is
/// flipped for shorts. A missing liquidation or mark price yields 0.
pub fn calculate_liquidation_distance(liquidation_px: f64, mark_px: f64, is_long: bool) -> f64 {
    if liquidation_px == 0.0 || mark_px == 0.0 {
        return 0.0;
    }
    let distance = if is_long {
        (mark_px - liquidation_px) / mark_px * 100.0
    } else {
        (liquidation_px - mark_px) / mark_px * 100.0
    };
    if distance.is_nan() {
        return 0.0;
    }
    distance.clamp(0.0, 100.0)
}

/// Human readable time since `opened_at`, e.g. `3 days 14 hours` or `18 hours`.
pub fn time_in_position(opened_at: Option<i64>, now_ms: i64) -> String {
    let Some(opened_at) = opened_at else {
        return UNKNOWN_DURATION.to_string();
    };

    let hours = (now_ms - opened_at).max(0) / MILLIS_PER_HOUR;
    let days = hours / 24;
    let remaining_hours = hours % 24;

    if days > 0 {
        format!("{} {} {} {}", days, plural(days, "day"), remaining_hours, plural(remaining_hours, "hour"))
    } else {
        format!("{} {}", hours, plural(hours, "hour"))
    }
}

fn plural(count: i64, unit: &str) -> String {
    if count == 1 {
        unit.to_string()
    } else {
        format!("{unit}s")
    }
}

/// Shorten an address to its last four characters.
pub fn format_address(address: &str) -> String {
    if address.is_empty() {
        return "...????".to_string();
    }
    let chars: Vec<char> = address.chars().collect();
    let tail: String = chars[chars.len().saturating_sub(4)..].iter().collect();
    format!("...{tail}")
}

/// Format a USD amount with thousands separators and no fractional digits,
/// e.g. `-$125,430`.
pub fn format_usd(value: f64) -> String {
    if !value.is_finite() {
        return "$0".to_string();
    }
    let rounded = value.round();
    if rounded == 0.0 {
        return "$0".to_string();
    }

    let digits = format!("{:.0}", rounded.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if rounded < 0.0 {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_decimal() {
        assert_eq!(parse_decimal(Some("3450.0")), 3450.0);
        assert_eq!(parse_decimal(Some(" -6.63 ")), -6.63);
        assert_eq!(parse_decimal(Some("abc")), 0.0);
        assert_eq!(parse_decimal(Some("NaN")), 0.0);
        assert_eq!(parse_decimal(None), 0.0);
    }

    #[test]
    fn test_pnl_percentage_zero_value() {
        assert_eq!(calculate_pnl_percentage(-500.0, 0.0), 0.0);
        assert_eq!(calculate_pnl_percentage(0.0, 0.0), 0.0);
        assert!((calculate_pnl_percentage(-600.0, 1000.0) + 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_liquidation_distance_long_and_short() {
        assert!((calculate_liquidation_distance(90.0, 100.0, true) - 10.0).abs() < 1e-9);
        assert!((calculate_liquidation_distance(110.0, 100.0, false) - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_liquidation_distance_clamped() {
        // Liquidation on the wrong side of the mark
        assert_eq!(calculate_liquidation_distance(120.0, 100.0, true), 0.0);
        // Gap larger than the mark itself
        assert_eq!(calculate_liquidation_distance(1_000_000.0, 100.0, false), 100.0);
        assert_eq!(calculate_liquidation_distance(-50.0, 1.0, true), 100.0);
    }

    #[test]
    fn test_liquidation_distance_missing_prices() {
        assert_eq!(calculate_liquidation_distance(0.0, 100.0, true), 0.0);
        assert_eq!(calculate_liquidation_distance(90.0, 0.0, true), 0.0);
        assert_eq!(calculate_liquidation_distance(0.0, 0.0, false), 0.0);
    }

    #[test]
    fn test_time_in_position() {
        let now = 1_700_000_000_000;
        let hour = MILLIS_PER_HOUR;
        assert_eq!(time_in_position(None, now), "Unknown");
        assert_eq!(time_in_position(Some(now - 18 * hour), now), "18 hours");
        assert_eq!(time_in_position(Some(now - hour), now), "1 hour");
        assert_eq!(time_in_position(Some(now - (3 * 24 + 14) * hour), now), "3 days 14 hours");
        assert_eq!(time_in_position(Some(now - (24 + 1) * hour), now), "1 day 1 hour");
        assert_eq!(time_in_position(Some(now + hour), now), "0 hours");
    }

    #[test]
    fn test_format_address() {
        assert_eq!(format_address("0x1234567890abcdef1234567890abcdef12347a3f"), "...7a3f");
        assert_eq!(format_address("ab"), "...ab");
        assert_eq!(format_address(""), "...????");
    }

    #[test]
    fn test_format_usd() {
        assert_eq!(format_usd(-125430.0), "-$125,430");
        assert_eq!(format_usd(125430.0), "$125,430");
        assert_eq!(format_usd(1000.0), "$1,000");
        assert_eq!(format_usd(999.4), "$999");
        assert_eq!(format_usd(-1234567.6), "-$1,234,568");
        assert_eq!(format_usd(0.0), "$0");
        assert_eq!(format_usd(f64::NAN), "$0");
    }

    #[test]
    fn test_format_usd_beyond_u64() {
        assert_eq!(format_usd(1e20), "$100,000,000,000,000,000,000");
        assert_eq!(format_usd(-1e20), "-$100,000,000,000,000,000,000");
    }
}
