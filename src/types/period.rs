use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::fmt;
use std::fmt::{Display, Formatter};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Ord, PartialOrd, Hash, Serialize)]
pub struct Year(pub i32);
impl Year {
    pub fn get(self) -> i32 {
        self.0
    }
}

impl Display for Year {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}", self.0)
    }
}

/// A calendar month within a specific year, ordered chronologically.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Ord, PartialOrd, Hash, Serialize)]
pub struct YearMonth(pub i32, pub u32);
impl YearMonth {
    pub fn year(self) -> i32 {
        self.0
    }
    pub fn month(self) -> u32 {
        self.1
    }
    pub fn of(date: NaiveDate) -> Self {
        Self(date.year(), date.month())
    }
}

impl Display for YearMonth {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.0, self.1)
    }
}

pub struct StartEndDate {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Resolves a calendar period into its first and last day (inclusive).
pub trait DatePeriod {
    fn get_date_period(self) -> Option<StartEndDate>;
}

impl DatePeriod for Year {
    fn get_date_period(self) -> Option<StartEndDate> {
        Some(StartEndDate {
            start: NaiveDate::from_ymd_opt(self.0, 1, 1)?,
            end: NaiveDate::from_ymd_opt(self.0, 12, 31)?,
        })
    }
}

impl DatePeriod for YearMonth {
    fn get_date_period(self) -> Option<StartEndDate> {
        let year = self.year();
        let month = self.month();
        Some(StartEndDate {
            start: NaiveDate::from_ymd_opt(year, month, 1)?,
            end: NaiveDate::from_ymd_opt(year, month, days_in_month(year, month)?)?,
        })
    }
}

pub(crate) fn days_in_month(year: i32, month: u32) -> Option<u32> {
    if !(1..=12).contains(&month) {
        return None;
    }
    let next_month_start = match month {
        12 => NaiveDate::from_ymd_opt(year.checked_add(1)?, 1, 1)?,
        _ => NaiveDate::from_ymd_opt(year, month + 1, 1)?,
    };
    next_month_start.pred_opt().map(|last| last.day())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn year_month_orders_chronologically() {
        let mut months = vec![YearMonth(2020, 3), YearMonth(2019, 12), YearMonth(2020, 1)];
        months.sort();
        assert_eq!(
            months,
            vec![YearMonth(2019, 12), YearMonth(2020, 1), YearMonth(2020, 3)]
        );
        assert_eq!(YearMonth(2020, 3).to_string(), "2020-03");
    }

    #[test]
    fn february_period_respects_leap_years() {
        let leap = YearMonth(2020, 2).get_date_period().unwrap();
        assert_eq!(leap.end, NaiveDate::from_ymd_opt(2020, 2, 29).unwrap());
        let common = YearMonth(2021, 2).get_date_period().unwrap();
        assert_eq!(common.end, NaiveDate::from_ymd_opt(2021, 2, 28).unwrap());
    }

    #[test]
    fn invalid_month_has_no_period() {
        assert!(YearMonth(2020, 13).get_date_period().is_none());
        assert_eq!(days_in_month(2020, 0), None);
    }

    #[test]
    fn year_month_of_date_orders_chronologically() {
        let december = YearMonth::of(NaiveDate::from_ymd_opt(2020, 12, 31).unwrap());
        let january = YearMonth::of(NaiveDate::from_ymd_opt(2021, 1, 1).unwrap());
        assert_eq!(december, YearMonth(2020, 12));
        assert!(december < january);
        assert_eq!(january.to_string(), "2021-01");
    }
}
