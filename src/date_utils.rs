//! Date Utilities
//!
//! Calendar ranges used for filtering todos and building reports.
//! Everything works on local wall-clock time; nothing is normalized to UTC.

use chrono::{Datelike, Days, Duration, Local, NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::{AppError, AppResult};

/// An inclusive `[start, end]` interval of local instants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl DateRange {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    /// Whole days: `first` 00:00:00 through `last` 23:59:59.999
    pub fn from_days(first: NaiveDate, last: NaiveDate) -> Self {
        Self::new(first.and_time(NaiveTime::MIN), date_end(last.and_time(NaiveTime::MIN)))
    }

    pub fn contains(&self, timestamp: NaiveDateTime) -> bool {
        is_in_range(timestamp, self.start, self.end)
    }

    /// Every calendar day covered by the range
    pub fn days(&self) -> DatesBetween {
        dates_between(self.start, self.end)
    }

    pub fn format(&self) -> String {
        format_range(self.start, self.end)
    }
}

/// Current local time
pub fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

fn end_of_second(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::from_hms_opt(23, 59, 59).expect("23:59:59 is always valid"))
}

/// Today from 00:00:00 to 23:59:59
pub fn today() -> DateRange {
    today_at(now())
}

pub fn today_at(now: NaiveDateTime) -> DateRange {
    let date = now.date();
    DateRange::new(date.and_time(NaiveTime::MIN), end_of_second(date))
}

/// Monday 00:00:00 through Sunday 23:59:59.999 of the current week
pub fn this_week() -> DateRange {
    this_week_at(now())
}

pub fn this_week_at(now: NaiveDateTime) -> DateRange {
    let offset = i64::from(now.weekday().num_days_from_monday());
    let monday = now.date() - Duration::days(offset);
    let sunday = monday + Duration::days(6);
    DateRange::new(date_start(monday.and_time(NaiveTime::MIN)), date_end(sunday.and_time(NaiveTime::MIN)))
}

/// The trailing `days` days including today.
///
/// Fails with [`AppError::InvalidDayCount`] when `days < 1` or when the
/// first day would fall before the earliest representable date.
pub fn last_n_days(days: i64) -> AppResult<DateRange> {
    last_n_days_at(days, now())
}

pub fn last_n_days_at(days: i64, now: NaiveDateTime) -> AppResult<DateRange> {
    if days < 1 {
        return Err(AppError::InvalidDayCount(days));
    }
    let first = now
        .date()
        .checked_sub_days(Days::new((days - 1) as u64))
        .ok_or(AppError::InvalidDayCount(days))?;
    Ok(DateRange::new(first.and_time(NaiveTime::MIN), end_of_second(now.date())))
}

/// Inclusive on both ends
pub fn is_in_range(timestamp: NaiveDateTime, start: NaiveDateTime, end: NaiveDateTime) -> bool {
    timestamp >= start && timestamp <= end
}

/// `YYYY-MM-DD`
pub fn format_date(date: NaiveDateTime) -> String {
    format_day(date.date())
}

pub fn format_day(day: NaiveDate) -> String {
    format!("{:04}-{:02}-{:02}", day.year(), day.month(), day.day())
}

/// Inverse of [`format_day`]
pub fn parse_day(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

/// `YYYY-MM-DD 至 YYYY-MM-DD`
pub fn format_range(start: NaiveDateTime, end: NaiveDateTime) -> String {
    format!("{} 至 {}", format_date(start), format_date(end))
}

pub fn date_start(date: NaiveDateTime) -> NaiveDateTime {
    date.date().and_time(NaiveTime::MIN)
}

pub fn date_end(date: NaiveDateTime) -> NaiveDateTime {
    date.date()
        .and_time(NaiveTime::from_hms_milli_opt(23, 59, 59, 999).expect("23:59:59.999 is always valid"))
}

/// Local midnights from `start`'s day through `end`'s day.
///
/// The iterator is `Clone`, so a sequence can be replayed from the start.
/// An inverted range yields nothing.
pub fn dates_between(start: NaiveDateTime, end: NaiveDateTime) -> DatesBetween {
    DatesBetween { next: Some(start.date()), last: end.date() }
}

#[derive(Debug, Clone)]
pub struct DatesBetween {
    next: Option<NaiveDate>,
    last: NaiveDate,
}

impl Iterator for DatesBetween {
    type Item = NaiveDateTime;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.filter(|day| *day <= self.last)?;
        self.next = current.succ_opt();
        Some(current.and_time(NaiveTime::MIN))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = match self.next {
            Some(day) if day <= self.last => (self.last - day).num_days() as usize + 1,
            _ => 0,
        };
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for DatesBetween {}
