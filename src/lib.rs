pub mod config;
pub mod error;
pub mod export;
pub mod report;

pub use config::{Config, Expenditure, Job, JobItem, Store, User};
pub use error::{LedgerError, Result};
pub use report::{dashboard, Dashboard, DashboardSummary, ReportFilter, TrendPoint};
