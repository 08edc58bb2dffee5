//! Date normalization and the named calendar windows used by the date filter.
//!
//! Record dates arrive as strings in whatever shape the source produced.
//! [parse_date] turns them into a canonical [Date] or `None`; it never fails.
//! Window membership is decided by calendar-field comparison against a single
//! "today" captured once per recomputation pass, never by elapsed-duration
//! arithmetic, so behavior near month and year boundaries stays predictable.

use std::str::FromStr;

use time::{
    Date, Duration, Month, OffsetDateTime, PrimitiveDateTime,
    format_description::well_known::{Iso8601, Rfc3339},
    macros::format_description,
};

use crate::Error;

/// Parses a loosely-formatted date string into a calendar date.
///
/// Accepts ISO-8601 dates (`2024-01-05`), RFC-3339 instants
/// (`2024-01-05T10:30:00Z`, the date part is taken), ISO date-times without an
/// offset, and `MM/DD/YYYY`. Empty, whitespace-only, and unparseable input
/// yields `None`, never an error.
pub fn parse_date(raw: &str) -> Option<Date> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    Date::parse(trimmed, &Iso8601::DEFAULT)
        .or_else(|_| OffsetDateTime::parse(trimmed, &Rfc3339).map(|instant| instant.date()))
        .or_else(|_| {
            PrimitiveDateTime::parse(trimmed, &Iso8601::DEFAULT).map(|instant| instant.date())
        })
        .or_else(|_| {
            Date::parse(
                trimmed,
                format_description!("[month padding:none]/[day padding:none]/[year]"),
            )
        })
        .ok()
}

/// A named calendar window relative to a captured "today".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DateWindow {
    /// No date filtering. The only window that admits records without a
    /// parseable date.
    #[default]
    All,
    /// Exactly today.
    Today,
    /// Exactly the day before today.
    Yesterday,
    /// The last seven calendar days, today included.
    Last7,
    /// Any day in today's calendar month.
    ThisMonth,
    /// Any day in the calendar month before today's, rolling over the year
    /// in January.
    LastMonth,
    /// Any day in today's calendar year.
    ThisYear,
}

impl DateWindow {
    /// Whether a normalized record date falls inside this window.
    ///
    /// `today` must be the single snapshot captured for the whole
    /// recomputation pass. A `None` date is inside [DateWindow::All] and
    /// outside every other window.
    pub fn contains(self, date: Option<Date>, today: Date) -> bool {
        let Some(date) = date else {
            return self == DateWindow::All;
        };

        match self {
            DateWindow::All => true,
            DateWindow::Today => date == today,
            DateWindow::Yesterday => today.previous_day() == Some(date),
            DateWindow::Last7 => {
                let start = today.checked_sub(Duration::days(6)).unwrap_or(Date::MIN);
                start <= date && date <= today
            }
            DateWindow::ThisMonth => {
                date.year() == today.year() && date.month() == today.month()
            }
            DateWindow::LastMonth => {
                let month = today.month().previous();
                let year = if month == Month::December {
                    today.year() - 1
                } else {
                    today.year()
                };
                date.year() == year && date.month() == month
            }
            DateWindow::ThisYear => date.year() == today.year(),
        }
    }
}

impl FromStr for DateWindow {
    type Err = Error;

    fn from_str(keyword: &str) -> Result<Self, Self::Err> {
        match keyword.to_lowercase().as_str() {
            "all" => Ok(DateWindow::All),
            "today" => Ok(DateWindow::Today),
            "yesterday" => Ok(DateWindow::Yesterday),
            "last7" | "last-7" => Ok(DateWindow::Last7),
            "thismonth" | "this-month" => Ok(DateWindow::ThisMonth),
            "lastmonth" | "last-month" => Ok(DateWindow::LastMonth),
            "thisyear" | "this-year" => Ok(DateWindow::ThisYear),
            _ => Err(Error::UnknownDateWindow(keyword.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use crate::Error;

    use super::{DateWindow, parse_date};

    #[test]
    fn parses_iso_date() {
        assert_eq!(parse_date("2024-01-05"), Some(date!(2024 - 01 - 05)));
    }

    #[test]
    fn parses_rfc3339_instant() {
        assert_eq!(
            parse_date("2024-01-05T10:30:00Z"),
            Some(date!(2024 - 01 - 05))
        );
    }

    #[test]
    fn parses_slash_format_month_first() {
        assert_eq!(parse_date("1/5/2024"), Some(date!(2024 - 01 - 05)));
        assert_eq!(parse_date("01/05/2024"), Some(date!(2024 - 01 - 05)));
    }

    #[test]
    fn empty_and_whitespace_yield_none() {
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("   "), None);
    }

    #[test]
    fn unparseable_input_yields_none() {
        assert_eq!(parse_date("not-a-date"), None);
        assert_eq!(parse_date("2024-13-40"), None);
    }

    #[test]
    fn today_window_matches_only_today() {
        let today = date!(2024 - 03 - 15);

        assert!(DateWindow::Today.contains(Some(today), today));
        assert!(!DateWindow::Today.contains(Some(date!(2024 - 03 - 14)), today));
    }

    #[test]
    fn yesterday_window_matches_previous_day() {
        let today = date!(2024 - 03 - 01);

        assert!(DateWindow::Yesterday.contains(Some(date!(2024 - 02 - 29)), today));
        assert!(!DateWindow::Yesterday.contains(Some(today), today));
    }

    #[test]
    fn last7_includes_today_and_six_prior_days() {
        let today = date!(2024 - 03 - 10);

        assert!(DateWindow::Last7.contains(Some(today), today));
        assert!(DateWindow::Last7.contains(Some(date!(2024 - 03 - 04)), today));
        assert!(!DateWindow::Last7.contains(Some(date!(2024 - 03 - 03)), today));
        assert!(!DateWindow::Last7.contains(Some(date!(2024 - 03 - 11)), today));
    }

    #[test]
    fn this_month_uses_calendar_fields() {
        let today = date!(2024 - 03 - 01);

        assert!(DateWindow::ThisMonth.contains(Some(date!(2024 - 03 - 31)), today));
        assert!(!DateWindow::ThisMonth.contains(Some(date!(2024 - 02 - 29)), today));
    }

    #[test]
    fn last_month_rolls_over_the_year_in_january() {
        let today = date!(2024 - 01 - 15);

        assert!(DateWindow::LastMonth.contains(Some(date!(2023 - 12 - 20)), today));
        assert!(!DateWindow::LastMonth.contains(Some(date!(2023 - 11 - 30)), today));
        assert!(!DateWindow::LastMonth.contains(Some(date!(2024 - 01 - 01)), today));
    }

    #[test]
    fn this_year_matches_any_day_in_the_year() {
        let today = date!(2024 - 06 - 15);

        assert!(DateWindow::ThisYear.contains(Some(date!(2024 - 01 - 01)), today));
        assert!(!DateWindow::ThisYear.contains(Some(date!(2023 - 12 - 31)), today));
    }

    #[test]
    fn missing_date_passes_only_the_all_window() {
        let today = date!(2024 - 03 - 15);

        assert!(DateWindow::All.contains(None, today));
        assert!(!DateWindow::Today.contains(None, today));
        assert!(!DateWindow::Last7.contains(None, today));
        assert!(!DateWindow::ThisMonth.contains(None, today));
        assert!(!DateWindow::ThisYear.contains(None, today));
    }

    #[test]
    fn window_keywords_parse_case_insensitively() {
        assert_eq!("thisMonth".parse::<DateWindow>(), Ok(DateWindow::ThisMonth));
        assert_eq!("last7".parse::<DateWindow>(), Ok(DateWindow::Last7));
        assert_eq!("all".parse::<DateWindow>(), Ok(DateWindow::All));
    }

    #[test]
    fn unknown_window_keyword_is_an_error() {
        assert_eq!(
            "fortnight".parse::<DateWindow>(),
            Err(Error::UnknownDateWindow("fortnight".to_owned()))
        );
    }
}
