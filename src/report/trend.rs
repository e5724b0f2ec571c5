use chrono::{Datelike, Months, NaiveDateTime};

use super::window::DateWindow;
use crate::config::{Expenditure, Job, JobStatus};

/// Number of calendar months covered by the trend series.
pub const TREND_MONTHS: u32 = 6;

/// One calendar-month bucket of the revenue/expenditure series.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendPoint {
    pub label: String,
    pub revenue: f64,
    pub expenditure: f64,
}

/// Build the month-over-month series: exactly [`TREND_MONTHS`] buckets,
/// oldest first, ending at the month of `now`. Each bucket covers the
/// half-open range from the first of its month to the first of the next, so
/// variable month lengths are handled by the calendar, not a day count.
pub fn monthly_trend(
    jobs: &[Job],
    expenditures: &[Expenditure],
    now: NaiveDateTime,
) -> Vec<TrendPoint> {
    let current = now.date().with_day(1).unwrap_or_else(|| now.date());

    (0..TREND_MONTHS)
        .rev()
        .map(|back| {
            let start = current
                .checked_sub_months(Months::new(back))
                .unwrap_or(current);
            let end = start.checked_add_months(Months::new(1)).unwrap_or(start);
            let window = DateWindow {
                start: Some(start),
                end: Some(end),
            };

            let revenue: f64 = jobs
                .iter()
                .filter(|j| j.status == JobStatus::Completed && window.contains(j.date_time))
                .flat_map(|j| &j.items)
                .map(|i| i.total)
                .sum();

            let expenditure: f64 = expenditures
                .iter()
                .filter(|e| window.contains(e.date_time))
                .map(|e| e.total)
                .sum();

            TrendPoint {
                label: start.format("%b %Y").to_string(),
                revenue,
                expenditure,
            }
        })
        .collect()
}
