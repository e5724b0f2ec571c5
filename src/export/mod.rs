mod pdf;
mod sheet;

pub use pdf::{
    write_expenditures_pdf, write_jobs_pdf, ExpendituresReportData, JobsReportData,
};
pub use sheet::{write_expenditures_sheet, write_jobs_sheet};
