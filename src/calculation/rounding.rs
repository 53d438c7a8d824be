//! Hour conversion and rounding.
//!
//! Every hour figure leaving the engine goes through [`round_hours`], which
//! keeps at most two decimal places.

use rust_decimal::{Decimal, RoundingStrategy};

const SECONDS_PER_HOUR: i64 = 3600;
const MINUTES_PER_HOUR: i64 = 60;

/// Rounds an hour value to two decimal places, midpoint away from zero.
///
/// # Examples
///
/// ```
/// use sla_engine::calculation::round_hours;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let hours = Decimal::from_str("7.345").unwrap();
/// assert_eq!(round_hours(hours), Decimal::from_str("7.35").unwrap());
/// ```
pub fn round_hours(hours: Decimal) -> Decimal {
    hours.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Converts a number of seconds to rounded hours.
pub fn hours_from_seconds(seconds: i64) -> Decimal {
    round_hours(Decimal::from(seconds) / Decimal::from(SECONDS_PER_HOUR))
}

/// Converts a number of minutes to rounded hours.
///
/// ```
/// use sla_engine::calculation::hours_from_minutes;
/// use rust_decimal::Decimal;
///
/// assert_eq!(hours_from_minutes(90), Decimal::new(150, 2));
/// ```
pub fn hours_from_minutes(minutes: i64) -> Decimal {
    round_hours(Decimal::from(minutes) / Decimal::from(MINUTES_PER_HOUR))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_round_hours_keeps_two_places() {
        assert_eq!(round_hours(dec("1.005")), dec("1.01"));
        assert_eq!(round_hours(dec("1.004")), dec("1.00"));
        assert_eq!(round_hours(dec("2")), dec("2"));
    }

    #[test]
    fn test_hours_from_seconds_thirds() {
        // 20 minutes is a repeating fraction of an hour
        let hours = hours_from_seconds(1200);
        assert_eq!(hours, dec("0.33"));
        assert!(hours.scale() <= 2);
    }

    #[test]
    fn test_hours_from_seconds_exact() {
        assert_eq!(hours_from_seconds(11 * 3600), dec("11"));
        assert_eq!(hours_from_seconds(14436), dec("4.01"));
    }

    #[test]
    fn test_hours_from_minutes() {
        assert_eq!(hours_from_minutes(0), Decimal::ZERO);
        assert_eq!(hours_from_minutes(545), dec("9.08"));
        assert_eq!(hours_from_minutes(-30), dec("-0.5"));
    }
}
