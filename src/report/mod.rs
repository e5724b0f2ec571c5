mod rows;
mod summary;
mod trend;
mod window;

pub use rows::{
    paginate, project_expenditures, project_jobs, ExpenditureRow, ExportTarget, JobRow,
};
pub use summary::{summarize, DashboardSummary};
pub use trend::{monthly_trend, TrendPoint, TREND_MONTHS};
pub use window::{DateWindow, ReportFilter};

use chrono::NaiveDateTime;

use crate::config::{Expenditure, Job};

/// Everything the dashboard view needs for one reference instant.
#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    pub summary: DashboardSummary,
    pub trend: Vec<TrendPoint>,
}

/// Recompute the dashboard from a full record snapshot. Nothing is cached
/// between calls; the reference instant is the only clock input.
pub fn dashboard(jobs: &[Job], expenditures: &[Expenditure], now: NaiveDateTime) -> Dashboard {
    Dashboard {
        summary: summarize(jobs, expenditures, now),
        trend: monthly_trend(jobs, expenditures, now),
    }
}
