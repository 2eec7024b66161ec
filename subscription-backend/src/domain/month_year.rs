// src/domain/month_year.rs

use chrono::{DateTime, Datelike, Duration, TimeZone, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::str::FromStr;

/// `MM-YYYY`（2桁の月、4桁の年）
pub static MONTH_YEAR_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(0[1-9]|1[0-2])-(\d{4})$").unwrap());

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseMonthYearError(pub String);

impl fmt::Display for ParseMonthYearError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "expected MM-YYYY, got '{}'", self.0)
    }
}

impl std::error::Error for ParseMonthYearError {}

/// 日付を持たない暦月。比較・保存は常に月初 (UTC) で行う。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthYear {
    year: i32,
    month: u32,
}

impl MonthYear {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        if (1..=12).contains(&month) && (0..=9999).contains(&year) {
            Some(Self { year, month })
        } else {
            None
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// 月初 00:00:00 UTC
    pub fn first_instant(&self) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(self.year, self.month, 1, 0, 0, 0)
            .single()
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }

    /// 月末 23:59:59 UTC
    pub fn last_instant(&self) -> DateTime<Utc> {
        self.next().first_instant() - Duration::seconds(1)
    }

    /// 翌月
    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }
}

impl FromStr for MonthYear {
    type Err = ParseMonthYearError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let caps = MONTH_YEAR_REGEX
            .captures(s)
            .ok_or_else(|| ParseMonthYearError(s.to_string()))?;

        let month: u32 = caps[1]
            .parse()
            .map_err(|_| ParseMonthYearError(s.to_string()))?;
        let year: i32 = caps[2]
            .parse()
            .map_err(|_| ParseMonthYearError(s.to_string()))?;

        Self::new(year, month).ok_or_else(|| ParseMonthYearError(s.to_string()))
    }
}

impl fmt::Display for MonthYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}-{:04}", self.month, self.year)
    }
}

impl From<DateTime<Utc>> for MonthYear {
    fn from(dt: DateTime<Utc>) -> Self {
        Self {
            year: dt.year(),
            month: dt.month(),
        }
    }
}

/// 集計対象期間。開始月の月初から終了月の月末までを含む。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregationWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl AggregationWindow {
    pub fn from_months(start: MonthYear, end: MonthYear) -> Self {
        Self {
            start: start.first_instant(),
            end: end.last_instant(),
        }
    }

    /// `[start_date, end_date or ∞]` がこの期間と重なるか
    pub fn overlaps(&self, start_date: DateTime<Utc>, end_date: Option<DateTime<Utc>>) -> bool {
        start_date <= self.end && end_date.map_or(true, |end| end >= self.start)
    }
}
