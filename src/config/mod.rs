mod settings;
mod store;
mod user;

pub use settings::{Business, Config, ExportSettings};
pub use store::{
    Counter, Expenditure, ItemInput, Job, JobItem, JobStatus, PaymentMethod, Store,
};
pub use user::{Role, User};

use directories::ProjectDirs;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use tracing::debug;

use crate::error::{LedgerError, Result};

/// Get the config directory path (~/.jobledger/)
pub fn config_dir() -> Result<PathBuf> {
    // First try XDG-style directories
    if let Some(proj_dirs) = ProjectDirs::from("", "", "jobledger") {
        return Ok(proj_dirs.config_dir().to_path_buf());
    }

    // Fallback to ~/.jobledger/
    let home = dirs_home().ok_or_else(|| {
        LedgerError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Could not determine home directory",
        ))
    })?;

    Ok(home.join(".jobledger"))
}

fn dirs_home() -> Option<PathBuf> {
    std::env::var_os("HOME").map(PathBuf::from)
}

/// Expand ~ in paths
pub fn expand_path(path: &str) -> PathBuf {
    if path.starts_with("~/") {
        if let Some(home) = dirs_home() {
            return home.join(&path[2..]);
        }
    }
    PathBuf::from(path)
}

/// Resolve the export output directory; relative paths live under the config dir.
pub fn resolve_output_dir(configured: &str, config_dir: &PathBuf) -> PathBuf {
    let expanded = expand_path(configured);
    if expanded.is_absolute() {
        expanded
    } else {
        config_dir.join(expanded)
    }
}

/// Load the main config.toml
pub fn load_config(config_dir: &PathBuf) -> Result<Config> {
    let path = config_dir.join("config.toml");
    if !path.exists() {
        return Err(LedgerError::ConfigFileNotFound(path));
    }
    let content = fs::read_to_string(&path)?;
    toml::from_str(&content).map_err(|e| LedgerError::ConfigParse { path, source: e })
}

/// Load users.toml as a HashMap keyed by user id
pub fn load_users(config_dir: &PathBuf) -> Result<HashMap<String, User>> {
    let path = config_dir.join("users.toml");
    if !path.exists() {
        return Err(LedgerError::ConfigFileNotFound(path));
    }
    let content = fs::read_to_string(&path)?;
    toml::from_str(&content).map_err(|e| LedgerError::ConfigParse { path, source: e })
}

/// Load store.toml (creates default if missing)
pub fn load_store(config_dir: &PathBuf) -> Result<Store> {
    let path = config_dir.join("store.toml");
    if !path.exists() {
        return Ok(Store::default());
    }
    let content = fs::read_to_string(&path)?;
    let store: Store =
        toml::from_str(&content).map_err(|e| LedgerError::ConfigParse { path, source: e })?;
    debug!(
        jobs = store.jobs.len(),
        expenditures = store.expenditures.len(),
        "store loaded"
    );
    Ok(store)
}

/// Save store.toml. The document is rewritten whole and swapped in with a
/// rename, so a record and its line items land together or the old file stays.
pub fn save_store(config_dir: &PathBuf, store: &Store) -> Result<()> {
    let path = config_dir.join("store.toml");
    let content =
        toml::to_string_pretty(store).map_err(|e| LedgerError::StoreWrite(e.to_string()))?;

    let tmp = config_dir.join("store.toml.tmp");
    fs::write(&tmp, content)?;
    fs::rename(&tmp, &path)?;
    debug!(path = %path.display(), "store saved");
    Ok(())
}

/// Template content for config.toml
pub const CONFIG_TEMPLATE: &str = r#"[business]
name = "Your Business Name"
currency_symbol = "₦"

[export]
# Relative paths are resolved under the config directory.
output_dir = "output"
"#;

/// Template content for users.toml
pub const USERS_TEMPLATE: &str = r#"# Define the people allowed to record jobs and expenditures. The table name
# (e.g., [admin]) is the user id stored on each record as created_by.
#
# Roles: "admin" may edit and delete records; "normal" may only add them.

[admin]
name = "Administrator"
role = "admin"

[user]
name = "Staff User"
role = "normal"
"#;
