use std::{fmt, str::FromStr};

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::errors::EngineError;

/// Cadence at which a recurring rule comes due.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Interval {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Interval {
    pub const ALL: [Interval; 4] = [
        Interval::Daily,
        Interval::Weekly,
        Interval::Monthly,
        Interval::Yearly,
    ];

    /// Returns the date one interval after `from`.
    ///
    /// Monthly and yearly steps keep the day-of-month and clamp it to the last
    /// valid day of the target month, so Jan 31 becomes Feb 28 (or 29) and
    /// Feb 29 becomes Feb 28 in a non-leap year. The result is always strictly
    /// later than `from`; dates past the end of chrono's calendar saturate at
    /// [`NaiveDate::MAX`].
    pub fn next_date(&self, from: NaiveDate) -> NaiveDate {
        self.checked_next_date(from).unwrap_or(NaiveDate::MAX)
    }

    /// Same as [`Interval::next_date`] but returns `None` instead of
    /// saturating at the end of the calendar.
    pub fn checked_next_date(&self, from: NaiveDate) -> Option<NaiveDate> {
        match self {
            Interval::Daily => from.checked_add_signed(Duration::days(1)),
            Interval::Weekly => from.checked_add_signed(Duration::weeks(1)),
            Interval::Monthly => shift_month(from, 1),
            Interval::Yearly => shift_year(from, 1),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Interval::Daily => "Daily",
            Interval::Weekly => "Weekly",
            Interval::Monthly => "Monthly",
            Interval::Yearly => "Yearly",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Interval::Daily => "daily",
            Interval::Weekly => "weekly",
            Interval::Monthly => "monthly",
            Interval::Yearly => "yearly",
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Interval {
    type Err = EngineError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "daily" => Ok(Interval::Daily),
            "weekly" => Ok(Interval::Weekly),
            "monthly" => Ok(Interval::Monthly),
            "yearly" => Ok(Interval::Yearly),
            _ => Err(EngineError::InvalidInterval(raw.to_string())),
        }
    }
}

/// Advances `date` by exactly one `interval` step.
pub fn advance(date: NaiveDate, interval: Interval) -> NaiveDate {
    interval.next_date(date)
}

/// Parses `interval` and advances `date` by one step of it.
pub fn parse_and_advance(date: NaiveDate, interval: &str) -> Result<NaiveDate, EngineError> {
    Ok(advance(date, interval.parse()?))
}

/// Granularity used when bucketing a transaction history into trends.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TrendPeriod {
    Daily,
    Weekly,
    Monthly,
}

impl TrendPeriod {
    /// Maps a date onto the first day of the bucket that contains it: the date
    /// itself, the Monday of its ISO week, or the first of its month.
    pub fn bucket_start(&self, date: NaiveDate) -> NaiveDate {
        match self {
            TrendPeriod::Daily => date,
            TrendPeriod::Weekly => {
                let delta = date.weekday().num_days_from_monday() as i64;
                date.checked_sub_signed(Duration::days(delta))
                    .unwrap_or(NaiveDate::MIN)
            }
            TrendPeriod::Monthly => date.with_day(1).unwrap_or(date),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TrendPeriod::Daily => "daily",
            TrendPeriod::Weekly => "weekly",
            TrendPeriod::Monthly => "monthly",
        }
    }
}

impl fmt::Display for TrendPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TrendPeriod {
    type Err = EngineError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "daily" => Ok(TrendPeriod::Daily),
            "weekly" => Ok(TrendPeriod::Weekly),
            "monthly" => Ok(TrendPeriod::Monthly),
            _ => Err(EngineError::InvalidPeriod(raw.to_string())),
        }
    }
}

fn shift_month(date: NaiveDate, months: i32) -> Option<NaiveDate> {
    let index = date.year() * 12 + date.month0() as i32 + months;
    let year = index.div_euclid(12);
    let month = index.rem_euclid(12) as u32 + 1;
    let day = date.day().min(days_in_month(year, month)?);
    NaiveDate::from_ymd_opt(year, month, day)
}

fn shift_year(date: NaiveDate, years: i32) -> Option<NaiveDate> {
    shift_month(date, years * 12)
}

fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    let first_next = NaiveDate::from_ymd_opt(next_year, next_month, 1)?;
    first_next.pred_opt().map(|last| last.day())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn daily_and_weekly_add_fixed_days() {
        assert_eq!(advance(date(2024, 12, 31), Interval::Daily), date(2025, 1, 1));
        assert_eq!(advance(date(2024, 12, 28), Interval::Weekly), date(2025, 1, 4));
    }

    #[test]
    fn monthly_clamps_to_end_of_short_month() {
        assert_eq!(advance(date(2024, 1, 31), Interval::Monthly), date(2024, 2, 29));
        assert_eq!(advance(date(2023, 1, 31), Interval::Monthly), date(2023, 2, 28));
        assert_eq!(advance(date(2024, 3, 31), Interval::Monthly), date(2024, 4, 30));
        assert_eq!(advance(date(2024, 12, 15), Interval::Monthly), date(2025, 1, 15));
    }

    #[test]
    fn monthly_clamp_does_not_restore_anchor_day() {
        let feb = advance(date(2023, 1, 31), Interval::Monthly);
        assert_eq!(advance(feb, Interval::Monthly), date(2023, 3, 28));
    }

    #[test]
    fn yearly_clamps_leap_day() {
        assert_eq!(advance(date(2024, 2, 29), Interval::Yearly), date(2025, 2, 28));
        assert_eq!(advance(date(2023, 7, 4), Interval::Yearly), date(2024, 7, 4));
    }

    #[test]
    fn advance_is_strictly_increasing() {
        let mut day = date(2023, 1, 1);
        let end = date(2025, 1, 1);
        while day < end {
            for interval in Interval::ALL {
                assert!(advance(day, interval) > day, "{interval} did not advance {day}");
            }
            day = day.succ_opt().unwrap();
        }
    }

    #[test]
    fn end_of_calendar_saturates() {
        assert_eq!(Interval::Daily.checked_next_date(NaiveDate::MAX), None);
        assert_eq!(Interval::Monthly.next_date(NaiveDate::MAX), NaiveDate::MAX);
    }

    #[test]
    fn parses_intervals_case_insensitively() {
        assert_eq!(" Monthly ".parse::<Interval>().unwrap(), Interval::Monthly);
        assert_eq!("YEARLY".parse::<Interval>().unwrap(), Interval::Yearly);
        assert_eq!(
            "fortnightly".parse::<Interval>(),
            Err(EngineError::InvalidInterval("fortnightly".into()))
        );
    }

    #[test]
    fn parse_and_advance_rejects_unknown_interval() {
        assert_eq!(
            parse_and_advance(date(2024, 1, 1), "weekly").unwrap(),
            date(2024, 1, 8)
        );
        assert!(matches!(
            parse_and_advance(date(2024, 1, 1), "hourly"),
            Err(EngineError::InvalidInterval(_))
        ));
    }

    #[test]
    fn bucket_start_uses_monday_and_first_of_month() {
        // 2024-03-14 is a Thursday.
        let thursday = date(2024, 3, 14);
        assert_eq!(TrendPeriod::Daily.bucket_start(thursday), thursday);
        assert_eq!(TrendPeriod::Weekly.bucket_start(thursday), date(2024, 3, 11));
        assert_eq!(TrendPeriod::Monthly.bucket_start(thursday), date(2024, 3, 1));
        // ISO weeks can start in the previous year.
        assert_eq!(
            TrendPeriod::Weekly.bucket_start(date(2025, 1, 1)),
            date(2024, 12, 30)
        );
    }

    #[test]
    fn unknown_period_is_rejected() {
        assert_eq!(
            "quarterly".parse::<TrendPeriod>(),
            Err(EngineError::InvalidPeriod("quarterly".into()))
        );
    }

    #[test]
    fn labels_are_human_readable() {
        assert_eq!(Interval::Monthly.label(), "Monthly");
        assert_eq!(Interval::Weekly.to_string(), "weekly");
    }

    #[test]
    fn weekly_bucket_saturates_at_calendar_start() {
        assert_eq!(TrendPeriod::Weekly.bucket_start(NaiveDate::MIN), NaiveDate::MIN);
        let next = NaiveDate::MIN.succ_opt().unwrap();
        assert!(TrendPeriod::Weekly.bucket_start(next) >= NaiveDate::MIN);
        assert!(TrendPeriod::Weekly.bucket_start(next) <= next);
    }
}
