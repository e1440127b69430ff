use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Standard gestation span: 40 weeks from the last menstrual period.
pub const GESTATION_DAYS: i64 = 280;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trimester {
    First,
    Second,
    Third,
}

/// Snapshot of pregnancy progress as of a given day. Computed on read from
/// (LMP, due date, today); nothing here is persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Progress {
    pub weeks: i64,
    pub days: i64,
    pub trimester: Trimester,
    pub due_date: NaiveDate,
    pub days_remaining: i64,
    pub percent: f64,
}

/// Due date default when the mother does not supply one: LMP + 280 days.
pub fn default_due_date(lmp: NaiveDate) -> NaiveDate {
    lmp + Duration::days(GESTATION_DAYS)
}

/// Trimester from completed weeks: <13 first, <27 second, else third.
pub fn trimester_for(weeks: i64) -> Trimester {
    if weeks < 13 {
        Trimester::First
    } else if weeks < 27 {
        Trimester::Second
    } else {
        Trimester::Third
    }
}

/// Computes elapsed weeks+days, trimester, days remaining (floored at zero)
/// and percent progress (clamped to [0, 100]).
///
/// An LMP in the future is rejected at input validation before a profile
/// exists; if one slips through, elapsed time is floored at zero rather than
/// going negative.
pub fn compute(lmp: NaiveDate, due_date: NaiveDate, today: NaiveDate) -> Progress {
    let elapsed = (today - lmp).num_days().max(0);
    let weeks = elapsed / 7;
    let days = elapsed % 7;
    let span = (due_date - lmp).num_days().max(1);
    let percent = (elapsed as f64 / span as f64 * 100.0).clamp(0.0, 100.0);
    let days_remaining = (due_date - today).num_days().max(0);

    Progress {
        weeks,
        days,
        trimester: trimester_for(weeks),
        due_date,
        days_remaining,
        percent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_default_due_date_is_lmp_plus_280() {
        assert_eq!(default_due_date(date(2024, 1, 1)), date(2024, 10, 7));
    }

    #[test]
    fn test_trimester_boundaries() {
        assert_eq!(trimester_for(0), Trimester::First);
        assert_eq!(trimester_for(12), Trimester::First);
        assert_eq!(trimester_for(13), Trimester::Second);
        assert_eq!(trimester_for(26), Trimester::Second);
        assert_eq!(trimester_for(27), Trimester::Third);
        assert_eq!(trimester_for(40), Trimester::Third);
    }

    #[test]
    fn test_weeks_and_days_split() {
        let lmp = date(2024, 1, 1);
        // 100 days = 14 weeks + 2 days
        let p = compute(lmp, default_due_date(lmp), lmp + Duration::days(100));
        assert_eq!(p.weeks, 14);
        assert_eq!(p.days, 2);
    }

    #[test]
    fn test_scenario_lmp_100_days_ago() {
        // 100 days in: second trimester, due LMP+280, 180 days remaining.
        let lmp = date(2024, 1, 1);
        let today = lmp + Duration::days(100);
        let p = compute(lmp, default_due_date(lmp), today);
        assert_eq!(p.trimester, Trimester::Second);
        assert_eq!(p.due_date, lmp + Duration::days(280));
        assert_eq!(p.days_remaining, 180);
    }

    #[test]
    fn test_trimester_boundary_at_exactly_13_weeks() {
        let lmp = date(2024, 1, 1);
        let due = default_due_date(lmp);
        let p = compute(lmp, due, lmp + Duration::days(13 * 7 - 1));
        assert_eq!(p.trimester, Trimester::First);
        let p = compute(lmp, due, lmp + Duration::days(13 * 7));
        assert_eq!(p.trimester, Trimester::Second);
    }

    #[test]
    fn test_percent_monotonic_and_clamped() {
        let lmp = date(2024, 1, 1);
        let due = default_due_date(lmp);
        let mut prev = -1.0;
        for offset in 0..320 {
            let p = compute(lmp, due, lmp + Duration::days(offset));
            assert!(p.percent >= prev, "percent decreased at day {offset}");
            assert!((0.0..=100.0).contains(&p.percent));
            prev = p.percent;
        }
    }

    #[test]
    fn test_percent_caps_at_100_past_due() {
        let lmp = date(2024, 1, 1);
        let due = default_due_date(lmp);
        let p = compute(lmp, due, due + Duration::days(10));
        assert_eq!(p.percent, 100.0);
        assert_eq!(p.days_remaining, 0);
    }

    #[test]
    fn test_days_remaining_floored_at_zero() {
        let lmp = date(2024, 1, 1);
        let p = compute(lmp, date(2024, 2, 1), date(2024, 3, 1));
        assert_eq!(p.days_remaining, 0);
    }

    #[test]
    fn test_future_lmp_floors_elapsed_at_zero() {
        let lmp = date(2024, 6, 1);
        let p = compute(lmp, default_due_date(lmp), date(2024, 1, 1));
        assert_eq!(p.weeks, 0);
        assert_eq!(p.days, 0);
        assert_eq!(p.percent, 0.0);
        assert_eq!(p.trimester, Trimester::First);
    }

    #[test]
    fn test_explicit_due_date_drives_percent() {
        // 50 days into a 100-day span: exactly half way.
        let lmp = date(2024, 1, 1);
        let due = lmp + Duration::days(100);
        let p = compute(lmp, due, lmp + Duration::days(50));
        assert!((p.percent - 50.0).abs() < f64::EPSILON, "percent was {}", p.percent);
    }
}
