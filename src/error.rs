use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Config directory not found at {0}. Run 'jobledger init' to create it.")]
    ConfigNotFound(PathBuf),

    #[error("Config file not found: {0}")]
    ConfigFileNotFound(PathBuf),

    #[error("Failed to parse config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config directory already exists at {0}")]
    AlreadyInitialized(PathBuf),

    #[error("User '{0}' not found in users.toml")]
    UserNotFound(String),

    #[error("User '{0}' is not an admin. Editing and deleting records requires an admin user.")]
    AdminRequired(String),

    #[error("Job #{0} not found")]
    JobNotFound(i64),

    #[error("Expenditure #{0} not found")]
    ExpenditureNotFound(i64),

    #[error("Invalid payment method '{0}'. Use 'cash' or 'transfer'.")]
    InvalidPaymentMethod(String),

    #[error("Invalid job status '{0}'. Use 'completed' or 'incomplete'.")]
    InvalidStatus(String),

    #[error("Invalid item format '{0}'. Expected 'description:quantity:price' (e.g., 'Oil change:2:1500')")]
    InvalidItemFormat(String),

    #[error("Invalid {field} '{value}': {reason}")]
    InvalidNumber {
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("Invalid export format '{0}'. Use 'sheet' or 'pdf'.")]
    InvalidExportFormat(String),

    #[error("Failed to write store: {0}")]
    StoreWrite(String),

    #[error("Typst not found. Install it from https://typst.app/ or run: cargo install typst-cli")]
    TypstNotFound,

    #[error("Failed to generate PDF: {0}")]
    PdfGeneration(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, LedgerError>;
