mod config;
mod error;
mod export;
mod report;

use std::collections::HashMap;
use std::path::PathBuf;

use chrono::Local;
use clap::{Parser, Subcommand};
use tabled::{settings::Style, Table, Tabled};
use tracing_subscriber::EnvFilter;

use crate::config::{
    config_dir, load_config, load_store, load_users, save_store, ItemInput, JobStatus,
    PaymentMethod, User, CONFIG_TEMPLATE, USERS_TEMPLATE,
};
use crate::error::{LedgerError, Result};
use crate::report::{paginate, project_expenditures, project_jobs, ExportTarget, ReportFilter};

#[derive(Parser)]
#[command(name = "jobledger")]
#[command(version, about = "Back-office job and expenditure ledger", long_about = None)]
struct Cli {
    /// Path to config directory (default: ~/.jobledger or XDG config)
    #[arg(short = 'C', long, global = true)]
    config_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize config directory with template files
    Init,

    /// Record a new job with its line items
    AddJob {
        /// Customer the job was done for
        #[arg(short, long)]
        customer: String,

        /// Job status: completed or incomplete
        #[arg(short, long, default_value = "incomplete")]
        status: String,

        /// Payment method: cash or transfer
        #[arg(short, long, default_value = "cash")]
        payment: String,

        /// Line items as "description:quantity:price" (can be repeated)
        #[arg(short, long, value_name = "DESC:QTY:PRICE")]
        item: Vec<String>,

        /// User recording the job (id from users.toml)
        #[arg(short, long, default_value = "admin")]
        user: String,
    },

    /// Replace a job's details and line items (admin only)
    EditJob {
        /// Job id
        job_id: i64,

        #[arg(short, long)]
        customer: String,

        /// Job status: completed or incomplete
        #[arg(short, long)]
        status: String,

        /// Payment method: cash or transfer
        #[arg(short, long)]
        payment: String,

        /// Replacement line items; the prior set is discarded
        #[arg(short, long, value_name = "DESC:QTY:PRICE")]
        item: Vec<String>,

        #[arg(short, long, default_value = "admin")]
        user: String,
    },

    /// Delete a job and its line items (admin only)
    DeleteJob {
        job_id: i64,

        #[arg(short, long, default_value = "admin")]
        user: String,
    },

    /// Print a job as JSON
    ShowJob { job_id: i64 },

    /// List jobs (today/week/month/all)
    Jobs {
        #[arg(short, long, default_value = "today")]
        filter: String,
    },

    /// Record a new expenditure
    AddExpenditure {
        #[arg(short, long)]
        description: String,

        #[arg(short, long)]
        quantity: f64,

        /// Amount used per unit
        #[arg(short, long)]
        amount_used: f64,

        #[arg(short, long, default_value = "admin")]
        user: String,
    },

    /// Update an expenditure (admin only)
    EditExpenditure {
        expenditure_id: i64,

        #[arg(short, long)]
        description: String,

        #[arg(short, long)]
        quantity: f64,

        #[arg(short, long)]
        amount_used: f64,

        #[arg(short, long, default_value = "admin")]
        user: String,
    },

    /// Delete an expenditure (admin only)
    DeleteExpenditure {
        expenditure_id: i64,

        #[arg(short, long, default_value = "admin")]
        user: String,
    },

    /// Print an expenditure as JSON
    ShowExpenditure { expenditure_id: i64 },

    /// List expenditures (today/week/month/all)
    Expenditures {
        #[arg(short, long, default_value = "today")]
        filter: String,
    },

    /// Show dashboard figures and the six-month trend
    Dashboard,

    /// List configured users
    Users,

    /// Export jobs as a spreadsheet (CSV) or fixed-width PDF report
    ExportJobs {
        #[arg(short, long, default_value = "all")]
        filter: String,

        /// Output format: sheet or pdf
        #[arg(short = 'F', long, default_value = "sheet")]
        format: String,

        /// Custom output file path (default: output_dir/jobs_FILTER_DATE.ext)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Export expenditures as a spreadsheet (CSV) or fixed-width PDF report
    ExportExpenditures {
        #[arg(short, long, default_value = "all")]
        filter: String,

        /// Output format: sheet or pdf
        #[arg(short = 'F', long, default_value = "sheet")]
        format: String,

        /// Custom output file path (default: output_dir/expenditures_FILTER_DATE.ext)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Determine config directory
    let cfg_dir = match cli.config_dir {
        Some(p) => p,
        None => config_dir()?,
    };

    match cli.command {
        Commands::Init => cmd_init(&cfg_dir),
        Commands::AddJob {
            customer,
            status,
            payment,
            item,
            user,
        } => cmd_add_job(&cfg_dir, &customer, &status, &payment, &item, &user),
        Commands::EditJob {
            job_id,
            customer,
            status,
            payment,
            item,
            user,
        } => cmd_edit_job(&cfg_dir, job_id, &customer, &status, &payment, &item, &user),
        Commands::DeleteJob { job_id, user } => cmd_delete_job(&cfg_dir, job_id, &user),
        Commands::ShowJob { job_id } => cmd_show_job(&cfg_dir, job_id),
        Commands::Jobs { filter } => cmd_jobs(&cfg_dir, &filter),
        Commands::AddExpenditure {
            description,
            quantity,
            amount_used,
            user,
        } => cmd_add_expenditure(&cfg_dir, &description, quantity, amount_used, &user),
        Commands::EditExpenditure {
            expenditure_id,
            description,
            quantity,
            amount_used,
            user,
        } => cmd_edit_expenditure(&cfg_dir, expenditure_id, &description, quantity, amount_used, &user),
        Commands::DeleteExpenditure {
            expenditure_id,
            user,
        } => cmd_delete_expenditure(&cfg_dir, expenditure_id, &user),
        Commands::ShowExpenditure { expenditure_id } => {
            cmd_show_expenditure(&cfg_dir, expenditure_id)
        }
        Commands::Expenditures { filter } => cmd_expenditures(&cfg_dir, &filter),
        Commands::Dashboard => cmd_dashboard(&cfg_dir),
        Commands::Users => cmd_users(&cfg_dir),
        Commands::ExportJobs {
            filter,
            format,
            output,
        } => cmd_export_jobs(&cfg_dir, &filter, &format, output),
        Commands::ExportExpenditures {
            filter,
            format,
            output,
        } => cmd_export_expenditures(&cfg_dir, &filter, &format, output),
    }
}

/// Initialize config directory with template files
fn cmd_init(cfg_dir: &PathBuf) -> Result<()> {
    use std::fs;

    if cfg_dir.exists() {
        return Err(LedgerError::AlreadyInitialized(cfg_dir.clone()));
    }

    // Create directories
    fs::create_dir_all(cfg_dir)?;
    fs::create_dir_all(cfg_dir.join("output"))?;

    // Write template files
    fs::write(cfg_dir.join("config.toml"), CONFIG_TEMPLATE)?;
    fs::write(cfg_dir.join("users.toml"), USERS_TEMPLATE)?;

    println!("Initialized jobledger config at: {}", cfg_dir.display());
    println!();
    println!("Next steps:");
    println!(
        "  1. Edit your business details:  $EDITOR {}/config.toml",
        cfg_dir.display()
    );
    println!(
        "  2. Set up your users:           $EDITOR {}/users.toml",
        cfg_dir.display()
    );
    println!();
    println!("Then record your first job:");
    println!("  jobledger add-job --customer <name> --item <description>:<quantity>:<price>");

    Ok(())
}

// Table row structs for tabled
#[derive(Tabled)]
struct JobListRow {
    #[tabled(rename = "#")]
    id: i64,
    #[tabled(rename = "CUSTOMER")]
    customer: String,
    #[tabled(rename = "ITEMS")]
    items: usize,
    #[tabled(rename = "TOTAL")]
    total: String,
    #[tabled(rename = "STATUS")]
    status: String,
    #[tabled(rename = "METHOD")]
    method: String,
    #[tabled(rename = "DATE")]
    date: String,
    #[tabled(rename = "BY")]
    by: String,
}

#[derive(Tabled)]
struct ExpenditureListRow {
    #[tabled(rename = "#")]
    id: i64,
    #[tabled(rename = "DESCRIPTION")]
    description: String,
    #[tabled(rename = "QTY")]
    quantity: f64,
    #[tabled(rename = "AMOUNT USED")]
    amount_used: String,
    #[tabled(rename = "TOTAL")]
    total: String,
    #[tabled(rename = "DATE")]
    date: String,
    #[tabled(rename = "BY")]
    by: String,
}

#[derive(Tabled)]
struct UserRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "ROLE")]
    role: String,
}

#[derive(Tabled)]
struct TrendRow {
    #[tabled(rename = "MONTH")]
    month: String,
    #[tabled(rename = "REVENUE")]
    revenue: String,
    #[tabled(rename = "EXPENDITURES")]
    expenditures: String,
}

fn format_money(value: f64, currency_symbol: &str) -> String {
    if value < 0.0 {
        format!("-{}{:.2}", currency_symbol, value.abs())
    } else {
        format!("{}{:.2}", currency_symbol, value)
    }
}

fn title_case(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Parse the repeated --item specs. Blank entries are skipped, so a job can
/// be recorded with no items at all.
fn parse_items(specs: &[String]) -> Result<Vec<ItemInput>> {
    specs
        .iter()
        .filter(|s| !s.trim().is_empty())
        .map(|s| ItemInput::parse(s))
        .collect()
}

fn parse_target(format: &str) -> Result<ExportTarget> {
    match format {
        "sheet" | "csv" => Ok(ExportTarget::Sheet),
        "pdf" => Ok(ExportTarget::Pdf),
        _ => Err(LedgerError::InvalidExportFormat(format.to_string())),
    }
}

fn require_user<'a>(users: &'a HashMap<String, User>, id: &str) -> Result<&'a User> {
    users
        .get(id)
        .ok_or_else(|| LedgerError::UserNotFound(id.to_string()))
}

/// Editing and deleting records is gated behind the admin role.
fn require_admin(users: &HashMap<String, User>, id: &str) -> Result<()> {
    let user = require_user(users, id)?;
    if !user.role.is_admin() {
        return Err(LedgerError::AdminRequired(id.to_string()));
    }
    Ok(())
}

fn ensure_config(cfg_dir: &PathBuf) -> Result<()> {
    if !cfg_dir.exists() {
        return Err(LedgerError::ConfigNotFound(cfg_dir.clone()));
    }
    Ok(())
}

/// Record a new job
fn cmd_add_job(
    cfg_dir: &PathBuf,
    customer: &str,
    status: &str,
    payment: &str,
    item_specs: &[String],
    user: &str,
) -> Result<()> {
    ensure_config(cfg_dir)?;

    // Validate everything before any mutation
    let status: JobStatus = status.parse()?;
    let payment: PaymentMethod = payment.parse()?;
    let items = parse_items(item_specs)?;

    let config = load_config(cfg_dir)?;
    let users = load_users(cfg_dir)?;
    require_user(&users, user)?;

    let mut store = load_store(cfg_dir)?;
    let id = store.add_job(
        customer,
        status,
        payment,
        items,
        user,
        Local::now().naive_local(),
    );
    save_store(cfg_dir, &store)?;

    let job = store.job(id)?;
    println!("Job #{id} added for '{customer}'");
    println!("  Items: {}", job.items.len());
    println!(
        "  Total: {}",
        format_money(job.total_amount(), &config.business.currency_symbol)
    );

    Ok(())
}

/// Replace a job's details and line items
fn cmd_edit_job(
    cfg_dir: &PathBuf,
    job_id: i64,
    customer: &str,
    status: &str,
    payment: &str,
    item_specs: &[String],
    user: &str,
) -> Result<()> {
    ensure_config(cfg_dir)?;

    let status: JobStatus = status.parse()?;
    let payment: PaymentMethod = payment.parse()?;
    let items = parse_items(item_specs)?;

    let config = load_config(cfg_dir)?;
    let users = load_users(cfg_dir)?;
    require_admin(&users, user)?;

    let mut store = load_store(cfg_dir)?;
    store.edit_job(job_id, customer, status, payment, items)?;
    save_store(cfg_dir, &store)?;

    let job = store.job(job_id)?;
    println!("Job #{job_id} updated");
    println!("  Items: {}", job.items.len());
    println!(
        "  Total: {}",
        format_money(job.total_amount(), &config.business.currency_symbol)
    );

    Ok(())
}

/// Delete a job and its line items
fn cmd_delete_job(cfg_dir: &PathBuf, job_id: i64, user: &str) -> Result<()> {
    ensure_config(cfg_dir)?;

    let users = load_users(cfg_dir)?;
    require_admin(&users, user)?;

    let mut store = load_store(cfg_dir)?;
    store.delete_job(job_id)?;
    save_store(cfg_dir, &store)?;

    println!("Job #{job_id} deleted");
    Ok(())
}

/// Print a job as JSON
fn cmd_show_job(cfg_dir: &PathBuf, job_id: i64) -> Result<()> {
    ensure_config(cfg_dir)?;

    let store = load_store(cfg_dir)?;
    let job = store.job(job_id)?;

    let payload = serde_json::json!({
        "id": job.id,
        "customer_name": job.customer_name,
        "status": job.status.to_string(),
        "payment_method": job.payment_method.to_string(),
        "items": job.items.iter().map(|item| serde_json::json!({
            "description": item.description,
            "quantity": item.quantity,
            "price": item.price,
            "total": item.total,
        })).collect::<Vec<_>>(),
    });

    println!(
        "{}",
        serde_json::to_string_pretty(&payload).map_err(|e| LedgerError::Io(
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        ))?
    );

    Ok(())
}

/// List jobs for a filter window
fn cmd_jobs(cfg_dir: &PathBuf, filter_token: &str) -> Result<()> {
    ensure_config(cfg_dir)?;

    let config = load_config(cfg_dir)?;
    let users = load_users(cfg_dir)?;
    let store = load_store(cfg_dir)?;

    let filter = ReportFilter::parse(filter_token);
    let window = filter.window(Local::now().date_naive());
    let jobs = store.jobs_in(&window);

    if jobs.is_empty() {
        println!("No jobs recorded for filter '{}'.", filter.as_str());
        return Ok(());
    }

    let symbol = &config.business.currency_symbol;
    let rows: Vec<JobListRow> = jobs
        .iter()
        .map(|job| JobListRow {
            id: job.id,
            customer: job.customer_name.clone(),
            items: job.items.len(),
            total: format_money(job.total_amount(), symbol),
            status: job.status.to_string(),
            method: job.payment_method.to_string(),
            date: job.date_time.format("%Y-%m-%d %I:%M %p").to_string(),
            by: users
                .get(&job.created_by)
                .map(|u| u.name.clone())
                .unwrap_or_else(|| "Unknown".to_string()),
        })
        .collect();

    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{table}");

    println!();
    println!("Total: {} jobs ({})", jobs.len(), filter.as_str());

    Ok(())
}

/// Record a new expenditure
fn cmd_add_expenditure(
    cfg_dir: &PathBuf,
    description: &str,
    quantity: f64,
    amount_used: f64,
    user: &str,
) -> Result<()> {
    ensure_config(cfg_dir)?;
    ensure_positive("quantity", quantity)?;

    let config = load_config(cfg_dir)?;
    let users = load_users(cfg_dir)?;
    require_user(&users, user)?;

    let mut store = load_store(cfg_dir)?;
    let id = store.add_expenditure(
        description,
        quantity,
        amount_used,
        user,
        Local::now().naive_local(),
    );
    save_store(cfg_dir, &store)?;

    let exp = store.expenditure(id)?;
    println!("Expenditure #{id} added");
    println!(
        "  Total: {}",
        format_money(exp.total, &config.business.currency_symbol)
    );

    Ok(())
}

/// Update an expenditure
fn cmd_edit_expenditure(
    cfg_dir: &PathBuf,
    expenditure_id: i64,
    description: &str,
    quantity: f64,
    amount_used: f64,
    user: &str,
) -> Result<()> {
    ensure_config(cfg_dir)?;
    ensure_positive("quantity", quantity)?;

    let config = load_config(cfg_dir)?;
    let users = load_users(cfg_dir)?;
    require_admin(&users, user)?;

    let mut store = load_store(cfg_dir)?;
    store.edit_expenditure(expenditure_id, description, quantity, amount_used)?;
    save_store(cfg_dir, &store)?;

    let exp = store.expenditure(expenditure_id)?;
    println!("Expenditure #{expenditure_id} updated");
    println!(
        "  Total: {}",
        format_money(exp.total, &config.business.currency_symbol)
    );

    Ok(())
}

/// Delete an expenditure
fn cmd_delete_expenditure(cfg_dir: &PathBuf, expenditure_id: i64, user: &str) -> Result<()> {
    ensure_config(cfg_dir)?;

    let users = load_users(cfg_dir)?;
    require_admin(&users, user)?;

    let mut store = load_store(cfg_dir)?;
    store.delete_expenditure(expenditure_id)?;
    save_store(cfg_dir, &store)?;

    println!("Expenditure #{expenditure_id} deleted");
    Ok(())
}

/// Print an expenditure as JSON
fn cmd_show_expenditure(cfg_dir: &PathBuf, expenditure_id: i64) -> Result<()> {
    ensure_config(cfg_dir)?;

    let store = load_store(cfg_dir)?;
    let exp = store.expenditure(expenditure_id)?;

    let payload = serde_json::json!({
        "id": exp.id,
        "description": exp.description,
        "quantity": exp.quantity,
        "amount_used": exp.amount_used,
        "total": exp.total,
    });

    println!(
        "{}",
        serde_json::to_string_pretty(&payload).map_err(|e| LedgerError::Io(
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        ))?
    );

    Ok(())
}

/// List expenditures for a filter window
fn cmd_expenditures(cfg_dir: &PathBuf, filter_token: &str) -> Result<()> {
    ensure_config(cfg_dir)?;

    let config = load_config(cfg_dir)?;
    let users = load_users(cfg_dir)?;
    let store = load_store(cfg_dir)?;

    let filter = ReportFilter::parse(filter_token);
    let window = filter.window(Local::now().date_naive());
    let expenditures = store.expenditures_in(&window);

    if expenditures.is_empty() {
        println!("No expenditures recorded for filter '{}'.", filter.as_str());
        return Ok(());
    }

    let symbol = &config.business.currency_symbol;
    let rows: Vec<ExpenditureListRow> = expenditures
        .iter()
        .map(|exp| ExpenditureListRow {
            id: exp.id,
            description: exp.description.clone(),
            quantity: exp.quantity,
            amount_used: format_money(exp.amount_used, symbol),
            total: format_money(exp.total, symbol),
            date: exp.date_time.format("%Y-%m-%d %I:%M %p").to_string(),
            by: users
                .get(&exp.created_by)
                .map(|u| u.name.clone())
                .unwrap_or_else(|| "Unknown".to_string()),
        })
        .collect();

    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{table}");

    println!();
    println!(
        "Total: {} expenditures ({})",
        expenditures.len(),
        filter.as_str()
    );

    Ok(())
}

/// Show dashboard figures and the monthly trend
fn cmd_dashboard(cfg_dir: &PathBuf) -> Result<()> {
    ensure_config(cfg_dir)?;

    let config = load_config(cfg_dir)?;
    let store = load_store(cfg_dir)?;

    let now = Local::now().naive_local();
    let dash = report::dashboard(&store.jobs, &store.expenditures, now);
    let summary = &dash.summary;
    let symbol = &config.business.currency_symbol;

    println!("{} - Dashboard", config.business.name);
    println!("{}", "-".repeat(50));
    println!(
        "Jobs today:              {} ({} completed)",
        summary.jobs_today, summary.jobs_today_completed
    );
    println!("Completed this week:     {}", summary.jobs_week);
    println!("Completed this month:    {}", summary.jobs_month);
    println!("Incomplete jobs:         {}", summary.incomplete_jobs);
    println!(
        "Expenditures today:      {}",
        format_money(summary.expenditures_today, symbol)
    );
    println!(
        "Expenditures this month: {}",
        format_money(summary.expenditures_month, symbol)
    );
    println!(
        "Revenue this month:      {}",
        format_money(summary.revenue_month, symbol)
    );
    println!(
        "Net balance:             {}",
        format_money(summary.net_balance, symbol)
    );

    println!();
    println!(
        "Revenue vs expenditures, last {} months:",
        report::TREND_MONTHS
    );

    let rows: Vec<TrendRow> = dash
        .trend
        .iter()
        .map(|point| TrendRow {
            month: point.label.clone(),
            revenue: format_money(point.revenue, symbol),
            expenditures: format_money(point.expenditure, symbol),
        })
        .collect();

    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{table}");

    Ok(())
}

/// List configured users
fn cmd_users(cfg_dir: &PathBuf) -> Result<()> {
    ensure_config(cfg_dir)?;

    let users = load_users(cfg_dir)?;

    if users.is_empty() {
        println!("No users configured.");
        println!("Add users to: {}/users.toml", cfg_dir.display());
        return Ok(());
    }

    let mut sorted: Vec<_> = users.iter().collect();
    sorted.sort_by_key(|(k, _)| *k);

    let rows: Vec<UserRow> = sorted
        .iter()
        .map(|(id, user)| UserRow {
            id: id.to_string(),
            name: user.name.clone(),
            role: user.role.to_string(),
        })
        .collect();

    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{table}");

    Ok(())
}

/// Export jobs to a spreadsheet or PDF
fn cmd_export_jobs(
    cfg_dir: &PathBuf,
    filter_token: &str,
    format: &str,
    output: Option<PathBuf>,
) -> Result<()> {
    ensure_config(cfg_dir)?;

    let target = parse_target(format)?;
    let config = load_config(cfg_dir)?;
    let users = load_users(cfg_dir)?;
    let store = load_store(cfg_dir)?;

    let filter = ReportFilter::parse(filter_token);
    let now = Local::now();
    let window = filter.window(now.date_naive());
    let jobs = store.jobs_in(&window);

    let rows = project_jobs(&jobs, target, &users, &config.business.currency_symbol);
    let path = export_path(cfg_dir, &config, output, "jobs", filter, target, &now)?;

    match target {
        ExportTarget::Sheet => export::write_jobs_sheet(&rows, &path)?,
        ExportTarget::Pdf => {
            let data = export::JobsReportData {
                title: format!("Jobs Report - {}", title_case(filter.as_str())),
                generated: now.format("%B %d, %Y").to_string(),
                pages: paginate(&rows),
            };
            export::write_jobs_pdf(&data, &path)?;
        }
    }

    println!("Exported {} job rows ({})", rows.len(), filter.as_str());
    println!("  Saved: {}", path.display());

    Ok(())
}

/// Export expenditures to a spreadsheet or PDF
fn cmd_export_expenditures(
    cfg_dir: &PathBuf,
    filter_token: &str,
    format: &str,
    output: Option<PathBuf>,
) -> Result<()> {
    ensure_config(cfg_dir)?;

    let target = parse_target(format)?;
    let config = load_config(cfg_dir)?;
    let users = load_users(cfg_dir)?;
    let store = load_store(cfg_dir)?;

    let filter = ReportFilter::parse(filter_token);
    let now = Local::now();
    let window = filter.window(now.date_naive());
    let expenditures = store.expenditures_in(&window);

    let rows = project_expenditures(&expenditures, target, &users, &config.business.currency_symbol);
    let path = export_path(cfg_dir, &config, output, "expenditures", filter, target, &now)?;

    match target {
        ExportTarget::Sheet => export::write_expenditures_sheet(&rows, &path)?,
        ExportTarget::Pdf => {
            let data = export::ExpendituresReportData {
                title: format!("Expenditures Report - {}", title_case(filter.as_str())),
                generated: now.format("%B %d, %Y").to_string(),
                pages: paginate(&rows),
            };
            export::write_expenditures_pdf(&data, &path)?;
        }
    }

    println!(
        "Exported {} expenditure rows ({})",
        rows.len(),
        filter.as_str()
    );
    println!("  Saved: {}", path.display());

    Ok(())
}

/// Download-style file name: {entity}_{filter}_{YYYYMMDD}.{ext}
fn export_path(
    cfg_dir: &PathBuf,
    config: &config::Config,
    output: Option<PathBuf>,
    entity: &str,
    filter: ReportFilter,
    target: ExportTarget,
    now: &chrono::DateTime<Local>,
) -> Result<PathBuf> {
    if let Some(path) = output {
        return Ok(path);
    }

    let ext = match target {
        ExportTarget::Sheet => "csv",
        ExportTarget::Pdf => "pdf",
    };

    let dir = config::resolve_output_dir(&config.export.output_dir, cfg_dir);
    std::fs::create_dir_all(&dir)?;

    Ok(dir.join(format!(
        "{entity}_{}_{}.{ext}",
        filter.as_str(),
        now.format("%Y%m%d")
    )))
}

fn ensure_positive(field: &'static str, value: f64) -> Result<()> {
    if value <= 0.0 {
        return Err(LedgerError::InvalidNumber {
            field,
            value: value.to_string(),
            reason: "must be greater than 0".to_string(),
        });
    }
    Ok(())
}
