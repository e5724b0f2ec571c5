use chrono::NaiveDateTime;

use super::window::ReportFilter;
use crate::config::{Expenditure, Job, JobStatus};

/// Dashboard figures for a single reference instant. Sums default to zero
/// when nothing matches; the net balance may be negative.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSummary {
    pub jobs_today: usize,
    pub jobs_today_completed: usize,
    pub jobs_week: usize,
    pub jobs_month: usize,
    pub incomplete_jobs: usize,
    pub expenditures_today: f64,
    pub expenditures_month: f64,
    pub revenue_month: f64,
    pub net_balance: f64,
}

/// Fold the full record snapshot into the dashboard figures. `jobs_week` and
/// `jobs_month` count completed jobs only, over the open-ended week/month
/// windows; `incomplete_jobs` is unbounded in time.
pub fn summarize(jobs: &[Job], expenditures: &[Expenditure], now: NaiveDateTime) -> DashboardSummary {
    let today = now.date();
    let day = ReportFilter::Today.window(today);
    let week = ReportFilter::Week.window(today);
    let month = ReportFilter::Month.window(today);

    let completed = |job: &&Job| job.status == JobStatus::Completed;

    let jobs_today = jobs.iter().filter(|j| day.contains(j.date_time)).count();
    let jobs_today_completed = jobs
        .iter()
        .filter(|j| day.contains(j.date_time))
        .filter(completed)
        .count();
    let jobs_week = jobs
        .iter()
        .filter(|j| week.contains(j.date_time))
        .filter(completed)
        .count();
    let jobs_month = jobs
        .iter()
        .filter(|j| month.contains(j.date_time))
        .filter(completed)
        .count();
    let incomplete_jobs = jobs
        .iter()
        .filter(|j| j.status == JobStatus::Incomplete)
        .count();

    let expenditures_today: f64 = expenditures
        .iter()
        .filter(|e| day.contains(e.date_time))
        .map(|e| e.total)
        .sum();
    let expenditures_month: f64 = expenditures
        .iter()
        .filter(|e| month.contains(e.date_time))
        .map(|e| e.total)
        .sum();

    let revenue_month: f64 = jobs
        .iter()
        .filter(|j| month.contains(j.date_time))
        .filter(completed)
        .flat_map(|j| &j.items)
        .map(|i| i.total)
        .sum();

    DashboardSummary {
        jobs_today,
        jobs_today_completed,
        jobs_week,
        jobs_month,
        incomplete_jobs,
        expenditures_today,
        expenditures_month,
        revenue_month,
        net_balance: revenue_month - expenditures_month,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{JobItem, PaymentMethod};
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    fn job(id: i64, when: NaiveDateTime, status: JobStatus, item_totals: &[f64]) -> Job {
        Job {
            id,
            customer_name: format!("Customer {id}"),
            status,
            payment_method: PaymentMethod::Cash,
            date_time: when,
            created_by: "admin".to_string(),
            items: item_totals
                .iter()
                .enumerate()
                .map(|(i, total)| JobItem {
                    id: i as i64 + 1,
                    description: "Work".to_string(),
                    quantity: 1.0,
                    price: *total,
                    total: *total,
                })
                .collect(),
        }
    }

    fn expenditure(id: i64, when: NaiveDateTime, total: f64) -> Expenditure {
        Expenditure {
            id,
            description: "Supplies".to_string(),
            quantity: 1.0,
            amount_used: total,
            total,
            date_time: when,
            created_by: "admin".to_string(),
        }
    }

    #[test]
    fn empty_records_summarize_to_zero() {
        let summary = summarize(&[], &[], at(2026, 3, 15, 12));
        assert_eq!(summary.jobs_today, 0);
        assert_eq!(summary.jobs_today_completed, 0);
        assert_eq!(summary.jobs_week, 0);
        assert_eq!(summary.jobs_month, 0);
        assert_eq!(summary.incomplete_jobs, 0);
        assert_eq!(summary.expenditures_today, 0.0);
        assert_eq!(summary.expenditures_month, 0.0);
        assert_eq!(summary.revenue_month, 0.0);
        assert_eq!(summary.net_balance, 0.0);
    }

    #[test]
    fn month_revenue_and_net_balance() {
        // One completed job this month with items totaling 150, one
        // expenditure this month totaling 40.
        let jobs = vec![job(1, at(2026, 3, 5, 10), JobStatus::Completed, &[100.0, 50.0])];
        let expenditures = vec![expenditure(1, at(2026, 3, 2, 10), 40.0)];

        let summary = summarize(&jobs, &expenditures, at(2026, 3, 15, 12));
        assert_eq!(summary.revenue_month, 150.0);
        assert_eq!(summary.expenditures_month, 40.0);
        assert_eq!(summary.net_balance, 110.0);
        assert_eq!(summary.jobs_month, 1);
        // 2026-03-05 is before the week starting Monday 2026-03-09.
        assert_eq!(summary.jobs_week, 0);
        assert_eq!(summary.jobs_today, 0);
    }

    #[test]
    fn net_balance_can_go_negative() {
        let expenditures = vec![expenditure(1, at(2026, 3, 2, 10), 75.0)];
        let summary = summarize(&[], &expenditures, at(2026, 3, 15, 12));
        assert_eq!(summary.net_balance, -75.0);
    }

    #[test]
    fn week_and_month_windows_are_open_ended() {
        // A completed job dated after "now" still counts, because the week
        // and month filters only bound the start.
        let jobs = vec![job(1, at(2026, 3, 30, 10), JobStatus::Completed, &[10.0])];
        let summary = summarize(&jobs, &[], at(2026, 3, 10, 12));
        assert_eq!(summary.jobs_week, 1);
        assert_eq!(summary.jobs_month, 1);
        assert_eq!(summary.jobs_today, 0);
    }

    #[test]
    fn week_and_month_counts_exclude_incomplete_jobs() {
        let jobs = vec![
            job(1, at(2026, 3, 10, 9), JobStatus::Completed, &[10.0]),
            job(2, at(2026, 3, 10, 10), JobStatus::Incomplete, &[20.0]),
        ];
        let summary = summarize(&jobs, &[], at(2026, 3, 10, 12));
        assert_eq!(summary.jobs_today, 2);
        assert_eq!(summary.jobs_today_completed, 1);
        assert_eq!(summary.jobs_week, 1);
        assert_eq!(summary.jobs_month, 1);
        // Incomplete revenue never counts.
        assert_eq!(summary.revenue_month, 10.0);
    }

    #[test]
    fn incomplete_count_ignores_time_windows() {
        let jobs = vec![
            job(1, at(2020, 1, 1, 9), JobStatus::Incomplete, &[]),
            job(2, at(2026, 3, 10, 9), JobStatus::Incomplete, &[]),
        ];
        let summary = summarize(&jobs, &[], at(2026, 3, 10, 12));
        assert_eq!(summary.incomplete_jobs, 2);
    }
}
