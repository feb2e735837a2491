use chrono::{DateTime, Datelike, Month, NaiveDate, TimeZone, Utc};
use std::fmt;
use std::str::FromStr;

/// Which sale dates a request is scoped to.
///
/// `2024-03` selects March 2024 only. `March`, `mar`, `3` or `03` select
/// March of every year. Membership is evaluated in UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthFilter {
    Calendar { year: i32, month: Month },
    AnyYear(Month),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseMonthError(String);

impl fmt::Display for ParseMonthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid month {:?}: expected YYYY-MM, a month name or a number 1-12",
            self.0
        )
    }
}

impl std::error::Error for ParseMonthError {}

fn month_from_number(number: &str) -> Option<Month> {
    let number: u8 = number.parse().ok()?;
    Month::try_from(number).ok()
}

fn first_instant(year: i32, month: Month) -> Option<DateTime<Utc>> {
    let date = NaiveDate::from_ymd_opt(year, month.number_from_month(), 1)?;
    Some(Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0)?))
}

impl FromStr for MonthFilter {
    type Err = ParseMonthError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let input = raw.trim();
        let error = || ParseMonthError(raw.to_string());

        if let Some((year, month)) = input.split_once('-') {
            if year.len() != 4 || month.len() != 2 {
                return Err(error());
            }
            let year: i32 = year.parse().map_err(|_| error())?;
            let month = month_from_number(month).ok_or_else(error)?;
            return Ok(MonthFilter::Calendar { year, month });
        }

        if input.chars().all(|c| c.is_ascii_digit()) && !input.is_empty() {
            return month_from_number(input)
                .map(MonthFilter::AnyYear)
                .ok_or_else(error);
        }

        input
            .parse::<Month>()
            .map(MonthFilter::AnyYear)
            .map_err(|_| error())
    }
}

impl MonthFilter {
    pub fn month(&self) -> Month {
        match self {
            MonthFilter::Calendar { month, .. } | MonthFilter::AnyYear(month) => *month,
        }
    }

    /// Half-open `[first of month, first of next month)` range for calendar
    /// months. `None` for any-year filters.
    pub fn date_range(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        let MonthFilter::Calendar { year, month } = *self else {
            return None;
        };
        let (next_year, next_month) = match month {
            Month::December => (year + 1, Month::January),
            _ => (year, month.succ()),
        };
        Some((
            first_instant(year, month)?,
            first_instant(next_year, next_month)?,
        ))
    }

    pub fn contains(&self, date_of_sale: &DateTime<Utc>) -> bool {
        match self.date_range() {
            Some((start, end)) => start <= *date_of_sale && *date_of_sale < end,
            None => date_of_sale.month() == self.month().number_from_month(),
        }
    }
}

impl fmt::Display for MonthFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonthFilter::Calendar { year, month } => {
                write!(f, "{:04}-{:02}", year, month.number_from_month())
            }
            MonthFilter::AnyYear(month) => write!(f, "{}", month.name()),
        }
    }
}
