//! `YYYY-MM` month values, the shared date-sequence rule and display formatting

use chrono::NaiveDate;
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

static MONTH_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{4})-(\d{2})$").expect("valid month pattern"));

/// Label rendered in place of an end date for ongoing entries
pub const PRESENT: &str = "Present";

/// A calendar month in the exact lexical form `YYYY-MM`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    /// Parse a date field; empty or malformed input yields `None`
    pub fn parse(value: &str) -> Option<Self> {
        let caps = MONTH_PATTERN.captures(value)?;
        let year = caps[1].parse().ok()?;
        let month = caps[2].parse().ok()?;
        Self::new(year, month)
    }

    /// "Mon YYYY", e.g. "Jun 2022"
    pub fn display(&self) -> String {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .map(|date| date.format("%b %Y").to_string())
            .unwrap_or_default()
    }
}

impl FromStr for YearMonth {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid month '{}': expected YYYY-MM", s))
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// True when a date field is empty or a well-formed `YYYY-MM`
pub fn is_valid_month_field(value: &str) -> bool {
    value.is_empty() || YearMonth::parse(value).is_some()
}

/// Whether `start`..`end` forms a valid span.
///
/// Ongoing entries only need a start date. Otherwise the end must fall in a
/// later year, or in the same year with a strictly later month.
pub fn is_valid_date_sequence(start: &str, end: &str, is_current: bool) -> bool {
    if start.is_empty() {
        return false;
    }
    if is_current {
        return true;
    }
    if end.is_empty() {
        return false;
    }

    let (Some(start), Some(end)) = (YearMonth::parse(start), YearMonth::parse(end)) else {
        return false;
    };

    if end.year < start.year {
        return false;
    }
    if end.year == start.year && end.month <= start.month {
        return false;
    }
    true
}

/// Display form of a date field; empty or invalid input renders as ""
pub fn format_month(value: &str) -> String {
    YearMonth::parse(value.trim())
        .map(|month| month.display())
        .unwrap_or_default()
}

/// "Jan 2020 - Jun 2022" or "Jan 2020 - Present"; empty when there is nothing to show
pub fn format_date_range(start: &str, end: &str, is_current: bool) -> String {
    let start = format_month(start);
    let end = if is_current {
        PRESENT.to_string()
    } else {
        format_month(end)
    };

    match (start.is_empty(), end.is_empty()) {
        (true, true) => String::new(),
        (false, true) => start,
        (true, false) => end,
        (false, false) => format!("{} - {}", start, end),
    }
}
