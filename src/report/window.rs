use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};

/// Named date filters accepted by the list and export commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFilter {
    Today,
    Week,
    Month,
    All,
}

impl ReportFilter {
    /// Unrecognized tokens mean no filtering.
    pub fn parse(token: &str) -> ReportFilter {
        match token {
            "today" => ReportFilter::Today,
            "week" => ReportFilter::Week,
            "month" => ReportFilter::Month,
            _ => ReportFilter::All,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ReportFilter::Today => "today",
            ReportFilter::Week => "week",
            ReportFilter::Month => "month",
            ReportFilter::All => "all",
        }
    }

    /// Resolve against a reference date. The day window is bounded on both
    /// sides; week and month windows only bound the start, so they run
    /// forward without limit.
    pub fn window(self, today: NaiveDate) -> DateWindow {
        match self {
            ReportFilter::Today => DateWindow {
                start: Some(today),
                end: today.succ_opt(),
            },
            ReportFilter::Week => DateWindow {
                start: Some(
                    today - Duration::days(today.weekday().num_days_from_monday() as i64),
                ),
                end: None,
            },
            ReportFilter::Month => DateWindow {
                start: today.with_day(1),
                end: None,
            },
            ReportFilter::All => DateWindow::unbounded(),
        }
    }
}

/// A half-open date range `[start, end)`. A missing bound means unbounded on
/// that side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateWindow {
    pub fn unbounded() -> DateWindow {
        DateWindow {
            start: None,
            end: None,
        }
    }

    /// Tests the timestamp's calendar date; a record dated exactly at `end`
    /// is excluded.
    pub fn contains(&self, ts: NaiveDateTime) -> bool {
        let date = ts.date();
        self.start.map_or(true, |s| date >= s) && self.end.map_or(true, |e| date < e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        date(y, m, d).and_hms_opt(h, min, 0).unwrap()
    }

    #[test]
    fn today_window_is_bounded_on_both_sides() {
        let window = ReportFilter::Today.window(date(2026, 3, 10));
        assert_eq!(window.start, Some(date(2026, 3, 10)));
        assert_eq!(window.end, Some(date(2026, 3, 11)));

        assert!(window.contains(at(2026, 3, 10, 0, 0)));
        assert!(window.contains(at(2026, 3, 10, 23, 59)));
        assert!(!window.contains(at(2026, 3, 11, 0, 0)));
        assert!(!window.contains(at(2026, 3, 9, 23, 59)));
    }

    #[test]
    fn week_window_starts_monday_and_has_no_upper_bound() {
        // 2026-03-11 is a Wednesday; the ISO week starts 2026-03-09.
        let window = ReportFilter::Week.window(date(2026, 3, 11));
        assert_eq!(window.start, Some(date(2026, 3, 9)));
        assert_eq!(window.start.unwrap().weekday(), Weekday::Mon);
        assert_eq!(window.end, None);

        assert!(window.contains(at(2026, 3, 9, 0, 0)));
        assert!(!window.contains(at(2026, 3, 8, 23, 59)));
        // Open-ended: a record dated far past the reference still matches.
        assert!(window.contains(at(2027, 1, 1, 0, 0)));
    }

    #[test]
    fn week_window_on_a_monday_starts_that_day() {
        let window = ReportFilter::Week.window(date(2026, 3, 9));
        assert_eq!(window.start, Some(date(2026, 3, 9)));
    }

    #[test]
    fn month_window_starts_first_day_and_has_no_upper_bound() {
        let window = ReportFilter::Month.window(date(2026, 3, 15));
        assert_eq!(window.start, Some(date(2026, 3, 1)));
        assert_eq!(window.end, None);

        assert!(!window.contains(at(2026, 2, 28, 12, 0)));
        assert!(window.contains(at(2026, 4, 20, 12, 0)));
    }

    #[test]
    fn unknown_tokens_fall_back_to_all() {
        assert_eq!(ReportFilter::parse("quarterly"), ReportFilter::All);
        assert_eq!(ReportFilter::parse(""), ReportFilter::All);

        let window = ReportFilter::parse("quarterly").window(date(2026, 3, 15));
        assert_eq!(window, DateWindow::unbounded());
        assert!(window.contains(at(1999, 1, 1, 0, 0)));
    }

    #[test]
    fn known_tokens_parse() {
        assert_eq!(ReportFilter::parse("today"), ReportFilter::Today);
        assert_eq!(ReportFilter::parse("week"), ReportFilter::Week);
        assert_eq!(ReportFilter::parse("month"), ReportFilter::Month);
        assert_eq!(ReportFilter::parse("all"), ReportFilter::All);
    }
}
