//! Per-shift income calculation.
//!
//! Computes the minute counts and pay components of a single shift from its
//! worked interval, rest, and hourly rate snapshot. The holiday allowance
//! share is apportioned upstream by the weekly recalculation.

use crate::models::{ShiftEarnings, ShiftRecord};

use super::night_window::night_minutes;

/// Computes the earnings of one shift.
///
/// An open shift (no end yet) earns nothing: every computed field, including
/// the holiday share, is zero. For a closed shift:
///
/// - `net_work_minutes = max(0, gross - rest)`
/// - `base_pay = floor(net / 60 × hourly_rate)`
/// - `night_allowance = floor(night / 60 × hourly_rate × 0.5)` on raw night
///   minutes, only when `night_allowance_enabled`
/// - `gross_income = base_pay + night_allowance + holiday share`
///
/// `estimated_net_income` is left as it was; the monthly estimation owns it.
///
/// # Example
///
/// ```
/// use shift_pay_engine::calculation::calculate_shift_income;
/// use shift_pay_engine::models::ShiftRecord;
/// use chrono::{NaiveDate, NaiveDateTime};
///
/// let shift = ShiftRecord::new(
///     "shift_001",
///     "worker_001",
///     NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
///     NaiveDateTime::parse_from_str("2025-01-01 21:00:00", "%Y-%m-%d %H:%M:%S").unwrap(),
///     Some(NaiveDateTime::parse_from_str("2025-01-02 07:00:00", "%Y-%m-%d %H:%M:%S").unwrap()),
///     10_000,
/// );
///
/// let computed = calculate_shift_income(&shift, 0, true);
/// assert_eq!(computed.earnings.night_work_minutes, 480);
/// assert_eq!(computed.earnings.base_pay, 100_000);
/// assert_eq!(computed.earnings.night_allowance, 40_000);
/// ```
pub fn calculate_shift_income(
    shift: &ShiftRecord,
    daily_holiday_allowance_share: i64,
    night_allowance_enabled: bool,
) -> ShiftRecord {
    let mut computed = shift.clone();

    let (start, end) = shift.worked_interval();
    let Some(end) = end else {
        computed.earnings = ShiftEarnings::default();
        return computed;
    };

    let gross_work_minutes = (end - start).num_minutes().max(0);
    let night_work_minutes = if night_allowance_enabled {
        night_minutes(start, end)
    } else {
        0
    };
    let net_work_minutes = (gross_work_minutes - shift.rest_minutes).max(0);

    let base_pay = (net_work_minutes * shift.hourly_rate).div_euclid(60);
    let night_allowance = if night_allowance_enabled {
        // × 0.5 / 60
        (night_work_minutes * shift.hourly_rate).div_euclid(120)
    } else {
        0
    };

    computed.earnings = ShiftEarnings {
        gross_work_minutes,
        net_work_minutes,
        night_work_minutes,
        base_pay,
        night_allowance,
        holiday_allowance_share: daily_holiday_allowance_share,
        gross_income: base_pay + night_allowance + daily_holiday_allowance_share,
        estimated_net_income: shift.earnings.estimated_net_income,
    };
    computed
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate, NaiveDateTime};
    use proptest::prelude::*;

    fn make_datetime(date_str: &str, time_str: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(&format!("{} {}", date_str, time_str), "%Y-%m-%d %H:%M:%S")
            .unwrap()
    }

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn create_shift(start: (&str, &str), end: Option<(&str, &str)>, rate: i64) -> ShiftRecord {
        ShiftRecord::new(
            "shift_001",
            "worker_001",
            make_date(start.0),
            make_datetime(start.0, start.1),
            end.map(|(d, t)| make_datetime(d, t)),
            rate,
        )
    }

    fn assert_invariants(shift: &ShiftRecord) {
        let e = &shift.earnings;
        assert_eq!(
            e.net_work_minutes,
            (e.gross_work_minutes - shift.rest_minutes).max(0)
        );
        assert_eq!(
            e.gross_income,
            e.base_pay + e.night_allowance + e.holiday_allowance_share
        );
    }

    #[test]
    fn test_open_shift_earns_nothing() {
        let mut shift = create_shift(("2025-01-06", "09:00:00"), None, 10_000);
        shift.earnings.estimated_net_income = 5_000;
        shift.earnings.base_pay = 12_345;

        let computed = calculate_shift_income(&shift, 7_000, true);

        assert_eq!(computed.earnings, ShiftEarnings::default());
    }

    #[test]
    fn test_day_shift_has_no_night_minutes() {
        let shift = create_shift(
            ("2025-01-06", "09:00:00"),
            Some(("2025-01-06", "17:00:00")),
            10_000,
        );

        let computed = calculate_shift_income(&shift, 0, true);

        assert_eq!(computed.earnings.gross_work_minutes, 480);
        assert_eq!(computed.earnings.night_work_minutes, 0);
        assert_eq!(computed.earnings.night_allowance, 0);
        assert_eq!(computed.earnings.base_pay, 80_000);
        assert_invariants(&computed);
    }

    #[test]
    fn test_overnight_shift_night_premium() {
        let shift = create_shift(
            ("2025-01-01", "21:00:00"),
            Some(("2025-01-02", "07:00:00")),
            10_000,
        );

        let computed = calculate_shift_income(&shift, 0, true);

        assert_eq!(computed.earnings.gross_work_minutes, 600);
        assert_eq!(computed.earnings.night_work_minutes, 480);
        assert_eq!(computed.earnings.base_pay, 100_000);
        assert_eq!(computed.earnings.night_allowance, 40_000);
        assert_eq!(computed.earnings.gross_income, 140_000);
        assert_invariants(&computed);
    }

    #[test]
    fn test_night_disabled_counts_no_night_minutes() {
        let shift = create_shift(
            ("2025-01-01", "21:00:00"),
            Some(("2025-01-02", "07:00:00")),
            10_000,
        );

        let computed = calculate_shift_income(&shift, 0, false);

        assert_eq!(computed.earnings.night_work_minutes, 0);
        assert_eq!(computed.earnings.night_allowance, 0);
        assert_eq!(computed.earnings.gross_income, 100_000);
    }

    #[test]
    fn test_night_premium_ignores_rest() {
        let mut shift = create_shift(
            ("2025-01-06", "22:00:00"),
            Some(("2025-01-07", "06:00:00")),
            10_000,
        );
        shift.rest_minutes = 60;

        let computed = calculate_shift_income(&shift, 0, true);

        assert_eq!(computed.earnings.net_work_minutes, 420);
        assert_eq!(computed.earnings.base_pay, 70_000);
        // 480 raw night minutes, not 420
        assert_eq!(computed.earnings.night_allowance, 40_000);
    }

    #[test]
    fn test_rest_longer_than_shift_floors_net_at_zero() {
        let mut shift = create_shift(
            ("2025-01-06", "09:00:00"),
            Some(("2025-01-06", "09:30:00")),
            10_000,
        );
        shift.rest_minutes = 45;

        let computed = calculate_shift_income(&shift, 0, false);

        assert_eq!(computed.earnings.net_work_minutes, 0);
        assert_eq!(computed.earnings.base_pay, 0);
        assert_invariants(&computed);
    }

    #[test]
    fn test_base_pay_truncates() {
        // 7 minutes at 10,030/h = 1170.16...
        let shift = create_shift(
            ("2025-01-06", "09:00:00"),
            Some(("2025-01-06", "09:07:00")),
            10_030,
        );

        let computed = calculate_shift_income(&shift, 0, false);

        assert_eq!(computed.earnings.base_pay, 1_170);
    }

    #[test]
    fn test_night_allowance_truncates() {
        // 1 night minute at 10,030/h × 0.5 = 83.58...
        let shift = create_shift(
            ("2025-01-06", "22:00:00"),
            Some(("2025-01-06", "22:01:00")),
            10_030,
        );

        let computed = calculate_shift_income(&shift, 0, true);

        assert_eq!(computed.earnings.night_allowance, 83);
    }

    #[test]
    fn test_holiday_share_added_to_gross() {
        let shift = create_shift(
            ("2025-01-06", "09:00:00"),
            Some(("2025-01-06", "17:00:00")),
            10_000,
        );

        let computed = calculate_shift_income(&shift, 16_000, false);

        assert_eq!(computed.earnings.holiday_allowance_share, 16_000);
        assert_eq!(computed.earnings.gross_income, 96_000);
        assert_invariants(&computed);
    }

    #[test]
    fn test_estimated_net_income_is_preserved() {
        let mut shift = create_shift(
            ("2025-01-06", "09:00:00"),
            Some(("2025-01-06", "17:00:00")),
            10_000,
        );
        shift.earnings.estimated_net_income = 71_234;

        let computed = calculate_shift_income(&shift, 0, false);

        assert_eq!(computed.earnings.estimated_net_income, 71_234);
    }

    #[test]
    fn test_identity_fields_untouched() {
        let mut shift = create_shift(
            ("2025-01-06", "09:00:00"),
            Some(("2025-01-06", "17:00:00")),
            10_000,
        );
        shift.repeat_group_id = Some("series_1".to_string());

        let computed = calculate_shift_income(&shift, 0, false);

        assert_eq!(computed.id, shift.id);
        assert_eq!(computed.worker_id, shift.worker_id);
        assert_eq!(computed.repeat_group_id, shift.repeat_group_id);
        assert_eq!(computed.hourly_rate, shift.hourly_rate);
    }

    proptest! {
        #[test]
        fn prop_earnings_invariants_hold(
            offset in 0i64..(60 * 24 * 7),
            length in -120i64..(60 * 36),
            rest in 0i64..(60 * 12),
            rate in 0i64..100_000,
            share in 0i64..200_000,
            night in any::<bool>(),
        ) {
            let start = make_datetime("2025-01-06", "00:00:00") + Duration::minutes(offset);
            let mut shift = ShiftRecord::new(
                "shift_001",
                "worker_001",
                start.date(),
                start,
                Some(start + Duration::minutes(length)),
                rate,
            );
            shift.rest_minutes = rest;

            let e = calculate_shift_income(&shift, share, night).earnings;

            prop_assert_eq!(e.gross_work_minutes, length.max(0));
            prop_assert_eq!(e.net_work_minutes, (e.gross_work_minutes - rest).max(0));
            prop_assert!(e.night_work_minutes <= e.gross_work_minutes);
            prop_assert_eq!(
                e.gross_income,
                e.base_pay + e.night_allowance + e.holiday_allowance_share
            );
        }
    }
}
