//! Billing calculation
//!
//! Converts raw call duration into billable seconds and computes monetary
//! amounts in fixed-point decimal. Malformed input (negative durations or
//! rates) is rejected rather than coerced to zero, since silent zero-rating
//! would corrupt billing downstream.

use rust_decimal::{Decimal, RoundingStrategy};
use trunkrate_core::{AppError, AppResult};

/// Round raw seconds up to the zone's billing increment, with a
/// minimum-duration floor
///
/// A zero-duration attempt still incurs the minimum duration; with a zero
/// minimum it bills nothing.
pub fn billed_seconds(raw_seconds: i32, billing_increment: i32, minimum_duration: i32) -> AppResult<i32> {
    if raw_seconds < 0 {
        return Err(AppError::InvalidDuration(i64::from(raw_seconds)));
    }
    if billing_increment <= 0 {
        return Err(AppError::InvalidInput(format!(
            "billing increment must be positive, got {}",
            billing_increment
        )));
    }
    if minimum_duration < 0 {
        return Err(AppError::InvalidInput(format!(
            "minimum duration must not be negative, got {}",
            minimum_duration
        )));
    }

    if raw_seconds == 0 {
        return Ok(minimum_duration);
    }

    // Ceiling in i64: raw_seconds near i32::MAX would overflow the i32
    // intermediate and wrap negative, zero-rating the call.
    let raw = i64::from(raw_seconds);
    let increment = i64::from(billing_increment);
    let rounded = ((raw + increment - 1) / increment) * increment;
    let rounded = i32::try_from(rounded)
        .map_err(|_| AppError::InvalidDuration(rounded))?;
    Ok(rounded.max(minimum_duration))
}

/// Monetary amount for a billed duration at a per-minute rate
///
/// `(billed_seconds / 60) * rate`, rounded half-up to `scale` decimal
/// places. All arithmetic is fixed-point decimal.
pub fn amount(billed_seconds: i32, rate_per_minute: Decimal, scale: u32) -> AppResult<Decimal> {
    if billed_seconds < 0 {
        return Err(AppError::InvalidDuration(i64::from(billed_seconds)));
    }
    if rate_per_minute.is_sign_negative() {
        return Err(AppError::InvalidRate(format!(
            "rate must not be negative, got {}",
            rate_per_minute
        )));
    }

    let minutes = Decimal::from(billed_seconds) / Decimal::from(60);
    Ok((minutes * rate_per_minute)
        .round_dp_with_strategy(scale, RoundingStrategy::MidpointAwayFromZero))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_billed_seconds_rounds_to_increment() {
        // 65s at 60s increments bills two increments
        assert_eq!(billed_seconds(65, 60, 0).unwrap(), 120);
        assert_eq!(billed_seconds(60, 60, 0).unwrap(), 60);
        assert_eq!(billed_seconds(1, 6, 0).unwrap(), 6);
        assert_eq!(billed_seconds(7, 6, 0).unwrap(), 12);
    }

    #[test]
    fn test_billed_seconds_minimum_floor() {
        assert_eq!(billed_seconds(10, 6, 30).unwrap(), 30);
        // Above the floor the increment rounding governs
        assert_eq!(billed_seconds(31, 6, 30).unwrap(), 36);
    }

    #[test]
    fn test_zero_duration_bills_minimum() {
        assert_eq!(billed_seconds(0, 60, 30).unwrap(), 30);
        assert_eq!(billed_seconds(0, 60, 0).unwrap(), 0);
    }

    #[test]
    fn test_billed_seconds_multiple_of_increment_when_above_floor() {
        for raw in 1..=300 {
            let billed = billed_seconds(raw, 6, 0).unwrap();
            assert_eq!(billed % 6, 0);
            assert!(billed >= raw);
        }
    }

    #[test]
    fn test_billed_seconds_near_i32_max() {
        // 2147483637 rounds up to 2147483640, still representable
        assert_eq!(billed_seconds(i32::MAX - 10, 60, 0).unwrap(), 2147483640);
        // i32::MAX itself rounds past the representable range
        assert!(matches!(
            billed_seconds(i32::MAX, 60, 0),
            Err(AppError::InvalidDuration(2147483700))
        ));
    }

    #[test]
    fn test_negative_duration_rejected() {
        assert!(matches!(
            billed_seconds(-1, 60, 0),
            Err(AppError::InvalidDuration(-1))
        ));
    }

    #[test]
    fn test_invalid_increment_rejected() {
        assert!(billed_seconds(60, 0, 0).is_err());
        assert!(billed_seconds(60, -6, 0).is_err());
        assert!(billed_seconds(60, 60, -1).is_err());
    }

    #[test]
    fn test_amount_sixty_second_increments() {
        // 120 billed seconds at 0.0095/min -> 0.0190
        assert_eq!(amount(120, dec!(0.0095), 4).unwrap(), dec!(0.0190));
        assert_eq!(amount(120, dec!(0.0045), 4).unwrap(), dec!(0.0090));
    }

    #[test]
    fn test_amount_rounds_half_up() {
        // 30s at 0.0095/min = 0.00475 -> 0.0048 at scale 4
        assert_eq!(amount(30, dec!(0.0095), 4).unwrap(), dec!(0.0048));
    }

    #[test]
    fn test_amount_zero_rate() {
        assert_eq!(amount(120, dec!(0), 4).unwrap(), dec!(0));
    }

    #[test]
    fn test_amount_rejects_negative_rate() {
        assert!(matches!(
            amount(60, dec!(-0.01), 4),
            Err(AppError::InvalidRate(_))
        ));
    }
}
