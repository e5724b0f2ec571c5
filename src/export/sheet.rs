use std::path::Path;

use tracing::debug;

use crate::error::Result;
use crate::report::{ExpenditureRow, JobRow};

const JOBS_HEADER: [&str; 9] = [
    "Job ID",
    "Customer",
    "Description",
    "Quantity",
    "Price",
    "Total",
    "Status",
    "Date",
    "Created By",
];

const EXPENDITURES_HEADER: [&str; 7] = [
    "ID",
    "Description",
    "Quantity",
    "Amount Used",
    "Total",
    "Date",
    "Created By",
];

/// Write job rows as a CSV spreadsheet with a header record.
pub fn write_jobs_sheet(rows: &[JobRow], path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    wtr.write_record(JOBS_HEADER)?;

    for row in rows {
        let job_id = row.job_id.to_string();
        wtr.write_record([
            job_id.as_str(),
            row.customer.as_str(),
            row.description.as_str(),
            row.quantity.as_str(),
            row.price.as_str(),
            row.total.as_str(),
            row.status.as_str(),
            row.date.as_str(),
            row.created_by.as_str(),
        ])?;
    }

    wtr.flush()?;
    debug!(rows = rows.len(), path = %path.display(), "jobs sheet written");
    Ok(())
}

/// Write expenditure rows as a CSV spreadsheet with a header record.
pub fn write_expenditures_sheet(rows: &[ExpenditureRow], path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    wtr.write_record(EXPENDITURES_HEADER)?;

    for row in rows {
        let id = row.id.to_string();
        wtr.write_record([
            id.as_str(),
            row.description.as_str(),
            row.quantity.as_str(),
            row.amount_used.as_str(),
            row.total.as_str(),
            row.date.as_str(),
            row.created_by.as_str(),
        ])?;
    }

    wtr.flush()?;
    debug!(rows = rows.len(), path = %path.display(), "expenditures sheet written");
    Ok(())
}
