use std::path::Path;
use std::process::Command;

use serde::Serialize;
use tracing::debug;

use crate::error::{LedgerError, Result};
use crate::report::{ExpenditureRow, JobRow};

/// Data handed to the jobs report template. Rows arrive pre-paginated; the
/// template emits an explicit page break between pages.
#[derive(Debug, Serialize)]
pub struct JobsReportData {
    pub title: String,
    pub generated: String,
    pub pages: Vec<Vec<JobRow>>,
}

#[derive(Debug, Serialize)]
pub struct ExpendituresReportData {
    pub title: String,
    pub generated: String,
    pub pages: Vec<Vec<ExpenditureRow>>,
}

/// Embedded Typst template for the jobs report
/// Uses a placeholder that gets replaced with the actual JSON file path
const JOBS_TEMPLATE: &str = r##"// Jobs Report Template
// Data is loaded from JSON file

#let data = json("DATA_JSON_PATH")

#set page(
  paper: "us-letter",
  margin: (top: 0.75in, bottom: 0.75in, left: 0.6in, right: 0.6in),
)

#set text(font: "Helvetica", size: 8pt)

#text(size: 16pt, weight: "bold")[#data.title]
#v(0.3em)
#text(size: 9pt, fill: gray)[Generated #data.generated]

#v(1em)
#line(length: 100%, stroke: 0.5pt + gray)
#v(1em)

#let jobs-table(rows, first) = table(
  columns: (auto, 1fr, auto, auto, auto, auto, auto),
  align: (left, left, right, right, right, center, center),
  stroke: (x, y) => if first and y == 0 { (bottom: 1pt + black) } else { (bottom: 0.5pt + gray) },
  inset: 4pt,
  fill: (x, y) => if first and y == 0 { luma(240) } else { none },

  ..if first {
    ([*Customer*], [*Description*], [*Qty*], [*Price*], [*Total*], [*Status*], [*Date*])
  } else {
    ()
  },

  ..rows.map(row => (
    row.customer,
    row.description,
    row.quantity,
    row.price,
    row.total,
    row.status,
    row.date,
  )).flatten()
)

#if data.pages.len() == 0 [
  _No records for this filter._
] else [
  #for (i, page) in data.pages.enumerate() [
    #if i > 0 { pagebreak() }
    #jobs-table(page, i == 0)
  ]
]
"##;

/// Embedded Typst template for the expenditures report
const EXPENDITURES_TEMPLATE: &str = r##"// Expenditures Report Template
// Data is loaded from JSON file

#let data = json("DATA_JSON_PATH")

#set page(
  paper: "us-letter",
  margin: (top: 0.75in, bottom: 0.75in, left: 0.6in, right: 0.6in),
)

#set text(font: "Helvetica", size: 8pt)

#text(size: 16pt, weight: "bold")[#data.title]
#v(0.3em)
#text(size: 9pt, fill: gray)[Generated #data.generated]

#v(1em)
#line(length: 100%, stroke: 0.5pt + gray)
#v(1em)

#let exp-table(rows, first) = table(
  columns: (1fr, auto, auto, auto, auto),
  align: (left, right, right, right, center),
  stroke: (x, y) => if first and y == 0 { (bottom: 1pt + black) } else { (bottom: 0.5pt + gray) },
  inset: 4pt,
  fill: (x, y) => if first and y == 0 { luma(240) } else { none },

  ..if first {
    ([*Description*], [*Quantity*], [*Amount Used*], [*Total*], [*Date*])
  } else {
    ()
  },

  ..rows.map(row => (
    row.description,
    row.quantity,
    row.amount_used,
    row.total,
    row.date,
  )).flatten()
)

#if data.pages.len() == 0 [
  _No records for this filter._
] else [
  #for (i, page) in data.pages.enumerate() [
    #if i > 0 { pagebreak() }
    #exp-table(page, i == 0)
  ]
]
"##;

/// Generate the jobs report PDF using the Typst CLI
pub fn write_jobs_pdf(data: &JobsReportData, output_path: &Path) -> Result<()> {
    let json_data =
        serde_json::to_string(data).map_err(|e| LedgerError::PdfGeneration(e.to_string()))?;
    compile(JOBS_TEMPLATE, "jobs_data.json", "jobs.typ", &json_data, output_path)
}

/// Generate the expenditures report PDF using the Typst CLI
pub fn write_expenditures_pdf(data: &ExpendituresReportData, output_path: &Path) -> Result<()> {
    let json_data =
        serde_json::to_string(data).map_err(|e| LedgerError::PdfGeneration(e.to_string()))?;
    compile(
        EXPENDITURES_TEMPLATE,
        "expenditures_data.json",
        "expenditures.typ",
        &json_data,
        output_path,
    )
}

fn compile(
    template: &str,
    json_name: &str,
    template_name: &str,
    json_data: &str,
    output_path: &Path,
) -> Result<()> {
    // Check if typst is available
    let typst_check = Command::new("typst").arg("--version").output();
    if typst_check.is_err() {
        return Err(LedgerError::TypstNotFound);
    }

    // Stage data and template in a temp directory
    let temp_dir = std::env::temp_dir().join("jobledger");
    std::fs::create_dir_all(&temp_dir)?;

    let json_path = temp_dir.join(json_name);
    std::fs::write(&json_path, json_data)?;

    // The template references the JSON by a path relative to the temp root
    let template_content = template.replace("DATA_JSON_PATH", json_name);
    let template_path = temp_dir.join(template_name);
    std::fs::write(&template_path, &template_content)?;

    let output = Command::new("typst")
        .args([
            "compile",
            "--root",
            temp_dir.to_str().unwrap(),
            template_path.to_str().unwrap(),
            output_path.to_str().unwrap(),
        ])
        .output()?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(LedgerError::PdfGeneration(stderr.to_string()));
    }

    // Clean up temp files
    let _ = std::fs::remove_file(&template_path);
    let _ = std::fs::remove_file(&json_path);

    debug!(path = %output_path.display(), "pdf written");
    Ok(())
}
