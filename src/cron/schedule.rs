//! Upcoming run times of a valid expression
//!
//! Used for display only ("next run at ..."); nothing here sets timers.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Timelike};
use std::fmt;
use std::str::FromStr;

use super::field::CronField;
use super::grammar::Production;
use super::{parse_strict, CronError};

/// How far ahead `next_after` searches before giving up (e.g. `0 0 0 31 2 *`)
const SEARCH_DAYS: i64 = 5 * 366;

/// Expanded form of a six-field expression: one bit per allowed value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    expression: String,
    seconds: u64,
    minutes: u64,
    hours: u64,
    days_of_month: u64,
    months: u64,
    days_of_week: u64,
    /// Day-of-month or day-of-week starts with `*`: both must match
    restrict_both_days: bool,
}

fn mask(production: &Production, field: CronField) -> u64 {
    production
        .values(field)
        .into_iter()
        .fold(0, |mask, v| mask | (1u64 << v))
}

fn has(mask: u64, value: u32) -> bool {
    mask & (1u64 << value) != 0
}

fn starred(production: &Production) -> bool {
    matches!(
        production,
        Production::Wildcard | Production::StepWildcard { .. }
    )
}

impl Schedule {
    pub fn parse(expression: &str) -> Result<Self, CronError> {
        let [sec, min, hou, dom, mon, dow] = parse_strict(expression)?;

        Ok(Self {
            expression: expression.split_whitespace().collect::<Vec<_>>().join(" "),
            seconds: mask(&sec, CronField::Second),
            minutes: mask(&min, CronField::Minute),
            hours: mask(&hou, CronField::Hour),
            days_of_month: mask(&dom, CronField::DayOfMonth),
            months: mask(&mon, CronField::Month),
            days_of_week: mask(&dow, CronField::DayOfWeek),
            restrict_both_days: starred(&dom) || starred(&dow),
        })
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }

    fn day_matches(&self, date: NaiveDate) -> bool {
        let dom = has(self.days_of_month, date.day());
        let dow = has(self.days_of_week, date.weekday().num_days_from_sunday());
        if self.restrict_both_days {
            dom && dow
        } else {
            dom || dow
        }
    }

    /// First matching second strictly after `after`
    pub fn next_after(&self, after: NaiveDateTime) -> Option<NaiveDateTime> {
        let mut t = after.with_nanosecond(0)? + Duration::seconds(1);
        let limit = t + Duration::days(SEARCH_DAYS);

        while t <= limit {
            if !has(self.months, t.month()) {
                let (year, month) = if t.month() == 12 {
                    (t.year() + 1, 1)
                } else {
                    (t.year(), t.month() + 1)
                };
                t = NaiveDate::from_ymd_opt(year, month, 1)?.and_hms_opt(0, 0, 0)?;
                continue;
            }

            if !self.day_matches(t.date()) {
                t = t.date().succ_opt()?.and_hms_opt(0, 0, 0)?;
                continue;
            }

            if !has(self.hours, t.hour()) {
                t = t.date().and_hms_opt(t.hour(), 0, 0)? + Duration::hours(1);
                continue;
            }

            if !has(self.minutes, t.minute()) {
                t = t.date().and_hms_opt(t.hour(), t.minute(), 0)? + Duration::minutes(1);
                continue;
            }

            if !has(self.seconds, t.second()) {
                t += Duration::seconds(1);
                continue;
            }

            return Some(t);
        }

        None
    }

    /// The next `count` run times after `after`
    pub fn upcoming(&self, after: NaiveDateTime, count: usize) -> Vec<NaiveDateTime> {
        let mut runs = Vec::new();
        let mut cursor = after;
        while runs.len() < count {
            match self.next_after(cursor) {
                Some(next) => {
                    runs.push(next);
                    cursor = next;
                }
                None => break,
            }
        }
        runs
    }
}

impl FromStr for Schedule {
    type Err = CronError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.expression)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, s)
            .unwrap()
    }

    #[test]
    fn test_every_five_minutes() {
        let schedule = Schedule::parse("0 */5 * * * *").unwrap();
        assert_eq!(
            schedule.next_after(at(2024, 1, 1, 10, 2, 30)),
            Some(at(2024, 1, 1, 10, 5, 0))
        );
    }

    #[test]
    fn test_strictly_after() {
        let schedule = Schedule::parse("0 0 9 * * *").unwrap();
        assert_eq!(
            schedule.next_after(at(2024, 1, 1, 9, 0, 0)),
            Some(at(2024, 1, 2, 9, 0, 0))
        );
    }

    #[test]
    fn test_weekdays_skip_weekend() {
        // 2024-03-08 is a Friday
        let schedule = Schedule::parse("0 0 9 * * 1-5").unwrap();
        assert_eq!(
            schedule.next_after(at(2024, 3, 8, 10, 0, 0)),
            Some(at(2024, 3, 11, 9, 0, 0))
        );
    }

    #[test]
    fn test_day_of_month_or_day_of_week() {
        // both restricted: the 1st OR any Monday
        let either = Schedule::parse("0 0 0 1 * 1").unwrap();
        assert_eq!(
            either.next_after(at(2024, 3, 1, 0, 0, 0)),
            Some(at(2024, 3, 4, 0, 0, 0))
        );

        let first_only = Schedule::parse("0 0 0 1 * *").unwrap();
        assert_eq!(
            first_only.next_after(at(2024, 3, 1, 0, 0, 0)),
            Some(at(2024, 4, 1, 0, 0, 0))
        );
    }

    #[test]
    fn test_leap_day() {
        let schedule = Schedule::parse("0 0 12 29 2 *").unwrap();
        assert_eq!(
            schedule.next_after(at(2024, 3, 1, 0, 0, 0)),
            Some(at(2028, 2, 29, 12, 0, 0))
        );
    }

    #[test]
    fn test_impossible_date() {
        let schedule = Schedule::parse("0 0 0 31 2 *").unwrap();
        assert_eq!(schedule.next_after(at(2024, 1, 1, 0, 0, 0)), None);
        assert!(schedule.upcoming(at(2024, 1, 1, 0, 0, 0), 3).is_empty());
    }

    #[test]
    fn test_upcoming_huge_count() {
        let schedule = Schedule::parse("0 0 0 31 2 *").unwrap();
        assert!(schedule.upcoming(at(2024, 1, 1, 0, 0, 0), usize::MAX).is_empty());
    }

    #[test]
    fn test_upcoming() {
        let schedule: Schedule = "0 0 * * * *".parse().unwrap();
        assert_eq!(
            schedule.upcoming(at(2024, 12, 31, 22, 0, 0), 3),
            vec![
                at(2024, 12, 31, 23, 0, 0),
                at(2025, 1, 1, 0, 0, 0),
                at(2025, 1, 1, 1, 0, 0),
            ]
        );
    }

    #[test]
    fn test_invalid_expression() {
        assert_eq!(
            Schedule::parse("0 0 25 * * *").unwrap_err(),
            CronError::InvalidField {
                field: CronField::Hour,
                value: "25".into()
            }
        );
    }
}
