use std::collections::HashMap;

use serde::Serialize;

use crate::config::{Expenditure, Job, User};

/// Output format a projection is destined for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportTarget {
    Sheet,
    Pdf,
}

// Column limits for the fixed-width target.
const PDF_CUSTOMER_WIDTH: usize = 15;
const PDF_JOB_DESC_WIDTH: usize = 20;
const PDF_EXP_DESC_WIDTH: usize = 25;

// Fixed-width page geometry (US letter, points). The heading block occupies
// the top of the first page; continuation pages start at the top margin and
// do not repeat it.
const PAGE_HEIGHT: f64 = 792.0;
const HEADING_DROP: f64 = 100.0;
const TABLE_GAP: f64 = 20.0;
const ROW_STEP: f64 = 15.0;
const BOTTOM_MARGIN: f64 = 50.0;
const CONTINUATION_TOP: f64 = PAGE_HEIGHT - 50.0;

const UNKNOWN_CREATOR: &str = "Unknown";

/// One flattened (job, line item) export row. A job with N items produces N
/// rows; a job with none produces none.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobRow {
    pub job_id: i64,
    pub customer: String,
    pub description: String,
    pub quantity: String,
    pub price: String,
    pub total: String,
    pub status: String,
    pub date: String,
    pub created_by: String,
}

/// One expenditure export row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpenditureRow {
    pub id: i64,
    pub description: String,
    pub quantity: String,
    pub amount_used: String,
    pub total: String,
    pub date: String,
    pub created_by: String,
}

/// Flatten a pre-filtered, pre-sorted job set into export rows. The sheet
/// target passes fields through untouched apart from the date rendering; the
/// fixed-width target truncates text columns and formats money with the
/// currency symbol.
pub fn project_jobs(
    jobs: &[&Job],
    target: ExportTarget,
    users: &HashMap<String, User>,
    currency_symbol: &str,
) -> Vec<JobRow> {
    let mut rows = Vec::new();

    for job in jobs {
        for item in &job.items {
            rows.push(match target {
                ExportTarget::Sheet => JobRow {
                    job_id: job.id,
                    customer: job.customer_name.clone(),
                    description: item.description.clone(),
                    quantity: item.quantity.to_string(),
                    price: item.price.to_string(),
                    total: item.total.to_string(),
                    status: job.status.to_string(),
                    date: job.date_time.format("%Y-%m-%d %I:%M %p").to_string(),
                    created_by: creator_name(users, &job.created_by),
                },
                ExportTarget::Pdf => JobRow {
                    job_id: job.id,
                    customer: truncate(&job.customer_name, PDF_CUSTOMER_WIDTH),
                    description: truncate(&item.description, PDF_JOB_DESC_WIDTH),
                    quantity: item.quantity.to_string(),
                    price: format!("{currency_symbol}{:.2}", item.price),
                    total: format!("{currency_symbol}{:.2}", item.total),
                    status: job.status.to_string(),
                    date: job.date_time.format("%m/%d/%Y").to_string(),
                    created_by: creator_name(users, &job.created_by),
                },
            });
        }
    }

    rows
}

/// Map a pre-filtered, pre-sorted expenditure set to export rows.
pub fn project_expenditures(
    expenditures: &[&Expenditure],
    target: ExportTarget,
    users: &HashMap<String, User>,
    currency_symbol: &str,
) -> Vec<ExpenditureRow> {
    expenditures
        .iter()
        .map(|exp| match target {
            ExportTarget::Sheet => ExpenditureRow {
                id: exp.id,
                description: exp.description.clone(),
                quantity: exp.quantity.to_string(),
                amount_used: exp.amount_used.to_string(),
                total: exp.total.to_string(),
                date: exp.date_time.format("%Y-%m-%d %I:%M %p").to_string(),
                created_by: creator_name(users, &exp.created_by),
            },
            ExportTarget::Pdf => ExpenditureRow {
                id: exp.id,
                description: truncate(&exp.description, PDF_EXP_DESC_WIDTH),
                quantity: exp.quantity.to_string(),
                amount_used: format!("{currency_symbol}{:.2}", exp.amount_used),
                total: format!("{currency_symbol}{:.2}", exp.total),
                date: exp.date_time.format("%m/%d/%Y").to_string(),
                created_by: creator_name(users, &exp.created_by),
            },
        })
        .collect()
}

/// Split rows into fixed-width pages by walking the vertical cursor: a page
/// break is emitted before any row that would land below the bottom margin,
/// and the cursor resets to the page top.
pub fn paginate<T: Clone>(rows: &[T]) -> Vec<Vec<T>> {
    let mut pages = Vec::new();
    let mut page = Vec::new();
    let mut y = PAGE_HEIGHT - HEADING_DROP - TABLE_GAP;

    for row in rows {
        if y < BOTTOM_MARGIN {
            pages.push(std::mem::take(&mut page));
            y = CONTINUATION_TOP;
        }
        page.push(row.clone());
        y -= ROW_STEP;
    }

    if !page.is_empty() {
        pages.push(page);
    }

    pages
}

/// A dangling creator reference degrades to "Unknown"; exports never fail on
/// a missing user.
fn creator_name(users: &HashMap<String, User>, key: &str) -> String {
    users
        .get(key)
        .map(|u| u.name.clone())
        .unwrap_or_else(|| UNKNOWN_CREATOR.to_string())
}

fn truncate(s: &str, max_chars: usize) -> String {
    s.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{JobItem, JobStatus, PaymentMethod, Role};
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(14, 30, 0)
            .unwrap()
    }

    fn users() -> HashMap<String, User> {
        let mut map = HashMap::new();
        map.insert(
            "admin".to_string(),
            User {
                name: "Administrator".to_string(),
                role: Role::Admin,
            },
        );
        map
    }

    fn job_with_items(customer: &str, created_by: &str, n: usize) -> Job {
        Job {
            id: 1,
            customer_name: customer.to_string(),
            status: JobStatus::Completed,
            payment_method: PaymentMethod::Cash,
            date_time: at(2026, 3, 10),
            created_by: created_by.to_string(),
            items: (0..n)
                .map(|i| JobItem {
                    id: i as i64 + 1,
                    description: format!("Item {i}"),
                    quantity: 2.0,
                    price: 1500.0,
                    total: 3000.0,
                })
                .collect(),
        }
    }

    #[test]
    fn one_row_per_item_and_none_for_empty_jobs() {
        let empty = job_with_items("Acme", "admin", 0);
        let three = job_with_items("Acme", "admin", 3);
        let jobs = [&empty, &three];

        let rows = project_jobs(&jobs, ExportTarget::Sheet, &users(), "₦");
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|r| r.customer == "Acme"));
        assert!(rows.iter().all(|r| r.status == "Completed"));
        assert!(rows.iter().all(|r| r.date == "2026-03-10 02:30 PM"));
    }

    #[test]
    fn pdf_target_truncates_sheet_does_not() {
        let long_name = "A".repeat(30);
        let job = job_with_items(&long_name, "admin", 1);
        let jobs = [&job];

        let pdf = project_jobs(&jobs, ExportTarget::Pdf, &users(), "₦");
        assert_eq!(pdf[0].customer.chars().count(), 15);

        let sheet = project_jobs(&jobs, ExportTarget::Sheet, &users(), "₦");
        assert_eq!(sheet[0].customer, long_name);
    }

    #[test]
    fn pdf_target_formats_money_and_dates() {
        let job = job_with_items("Acme", "admin", 1);
        let jobs = [&job];

        let rows = project_jobs(&jobs, ExportTarget::Pdf, &users(), "₦");
        assert_eq!(rows[0].price, "₦1500.00");
        assert_eq!(rows[0].total, "₦3000.00");
        assert_eq!(rows[0].date, "03/10/2026");

        let sheet = project_jobs(&jobs, ExportTarget::Sheet, &users(), "₦");
        assert_eq!(sheet[0].price, "1500");
        assert_eq!(sheet[0].total, "3000");
    }

    #[test]
    fn missing_creator_renders_unknown() {
        let job = job_with_items("Acme", "ghost", 1);
        let jobs = [&job];
        let rows = project_jobs(&jobs, ExportTarget::Sheet, &users(), "₦");
        assert_eq!(rows[0].created_by, "Unknown");
    }

    #[test]
    fn expenditure_description_truncates_at_25() {
        let exp = Expenditure {
            id: 1,
            description: "B".repeat(40),
            quantity: 4.0,
            amount_used: 10.0,
            total: 40.0,
            date_time: at(2026, 3, 2),
            created_by: "admin".to_string(),
        };
        let set = [&exp];

        let pdf = project_expenditures(&set, ExportTarget::Pdf, &users(), "₦");
        assert_eq!(pdf[0].description.chars().count(), 25);
        assert_eq!(pdf[0].total, "₦40.00");

        let sheet = project_expenditures(&set, ExportTarget::Sheet, &users(), "₦");
        assert_eq!(sheet[0].description.chars().count(), 40);
    }

    #[test]
    fn projection_is_idempotent() {
        let job = job_with_items("Acme", "admin", 3);
        let jobs = [&job];
        let first = project_jobs(&jobs, ExportTarget::Pdf, &users(), "₦");
        let second = project_jobs(&jobs, ExportTarget::Pdf, &users(), "₦");
        assert_eq!(first, second);
    }

    #[test]
    fn pagination_breaks_at_the_bottom_margin() {
        // First page fits 42 rows under the heading block; continuation
        // pages fit 47 from the top margin.
        let rows: Vec<usize> = (0..100).collect();
        let pages = paginate(&rows);
        assert_eq!(pages.len(), 3);
        assert_eq!(pages[0].len(), 42);
        assert_eq!(pages[1].len(), 47);
        assert_eq!(pages[2].len(), 11);

        let short: Vec<usize> = (0..42).collect();
        assert_eq!(paginate(&short).len(), 1);

        let empty: Vec<usize> = Vec::new();
        assert!(paginate(&empty).is_empty());
    }
}
