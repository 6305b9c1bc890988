//! Peg deviation evaluation
//!
//! Pure threshold logic: no I/O, no clock access. The caller supplies the
//! observation time so evaluation stays deterministic.

use chrono::{DateTime, FixedOffset, Utc};

use crate::models::{Breach, BreachDirection, PegStatus, PriceReading};

/// Lower edge of the tolerance band, exclusive
pub const LOWER_BOUND: f64 = 0.995;

/// Upper edge of the tolerance band, exclusive
pub const UPPER_BOUND: f64 = 1.005;

// Tokyo is a fixed +9h offset, no DST.
const TOKYO_OFFSET_SECS: i32 = 9 * 3600;

/// Evaluate one reading against the peg tolerance band
///
/// A price exactly on a bound counts as within the band.
pub fn evaluate(reading: &PriceReading, at: DateTime<Utc>) -> PegStatus {
    let baseline = format!(
        "🪙 DUSD monitor update\n💰 Price: ${:.4} USD\n📈 24h change: {:.4}%\n⏰ Time: {}",
        reading.price,
        reading.change_24h,
        tokyo_timestamp(at),
    );

    let breach = if reading.price < LOWER_BOUND {
        Some(Breach {
            direction: BreachDirection::Below,
            warning: format!("\n🚨 Warning: DUSD depegged (below {LOWER_BOUND} USD)!"),
        })
    } else if reading.price > UPPER_BOUND {
        Some(Breach {
            direction: BreachDirection::Above,
            warning: format!("\n🚨 Warning: DUSD depegged (above {UPPER_BOUND} USD)!"),
        })
    } else {
        None
    };

    PegStatus { baseline, breach }
}

/// Render an instant in Asia/Tokyo local time
pub fn tokyo_timestamp(at: DateTime<Utc>) -> String {
    let tokyo = FixedOffset::east_opt(TOKYO_OFFSET_SECS).expect("UTC+9 is a valid offset");
    at.with_timezone(&tokyo).format("%Y/%m/%d %H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn reading(price: f64, change_24h: f64) -> PriceReading {
        PriceReading { price, change_24h }
    }

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 3, 0, 0).unwrap()
    }

    #[rstest]
    #[case(1.0)]
    #[case(0.9999)]
    #[case(1.0049)]
    #[case(0.995)] // exact bounds are within the band
    #[case(1.005)]
    fn within_band_produces_no_warning(#[case] price: f64) {
        let status = evaluate(&reading(price, 0.0), at());

        assert!(!status.is_breach());
        assert_eq!(status.warning(), "");
        assert_eq!(status.message(), status.baseline);
    }

    #[rstest]
    #[case(0.9949)]
    #[case(0.98)]
    #[case(0.5)]
    fn below_band_warns_below(#[case] price: f64) {
        let status = evaluate(&reading(price, -1.0), at());

        let breach = status.breach.expect("expected a breach");
        assert_eq!(breach.direction, BreachDirection::Below);
        assert!(breach.warning.contains("below 0.995 USD"));
    }

    #[rstest]
    #[case(1.0051)]
    #[case(1.0062)]
    #[case(2.0)]
    fn above_band_warns_above(#[case] price: f64) {
        let status = evaluate(&reading(price, 1.0), at());

        let breach = status.breach.expect("expected a breach");
        assert_eq!(breach.direction, BreachDirection::Above);
        assert!(breach.warning.contains("above 1.005 USD"));
    }

    #[test]
    fn price_is_formatted_to_four_decimals() {
        let status = evaluate(&reading(1.0062, 0.0), at());

        assert!(status.baseline.contains("$1.0062 USD"));
        assert_eq!(
            status.breach.expect("expected a breach").direction,
            BreachDirection::Above
        );
    }

    #[test]
    fn baseline_pads_price_and_change_to_four_decimals() {
        let status = evaluate(&reading(1.0, 0.12), at());

        assert!(!status.is_breach());
        assert!(status.baseline.contains("1.0000"));
        assert!(status.baseline.contains("0.1200"));
    }

    #[test]
    fn timestamp_renders_in_tokyo_time() {
        // 03:00 UTC is noon in Tokyo
        let status = evaluate(&reading(1.0, 0.0), at());

        assert!(status.baseline.contains("⏰ Time: 2025/06/01 12:00:00"));
    }

    #[test]
    fn message_concatenates_baseline_and_warning() {
        let status = evaluate(&reading(0.98, -3.5), at());

        let message = status.message();
        assert!(message.starts_with(&status.baseline));
        assert!(message.ends_with("(below 0.995 USD)!"));
    }
}
