use std::fmt::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tally_core::Ranking;
use tally_logging::tally_info;

use crate::persist::{AtomicFileWriter, PersistError};

/// Output layout for a ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// `"<count> <label>"`, one pair per line.
    #[default]
    Plain,
    /// A JSON array of `{"label", "count"}` objects.
    Json,
}

impl ReportFormat {
    pub fn default_filename(self) -> &'static str {
        match self {
            ReportFormat::Plain => "counts.txt",
            ReportFormat::Json => "counts.json",
        }
    }
}

/// One ranked row of a JSON report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportEntry {
    pub label: String,
    pub count: i64,
}

/// Render `ranking` in its own order.
pub fn render_report(
    ranking: &Ranking,
    format: ReportFormat,
) -> Result<String, serde_json::Error> {
    match format {
        ReportFormat::Plain => {
            let mut out = String::new();
            for (label, count) in ranking.iter() {
                let _ = writeln!(out, "{count} {label}");
            }
            Ok(out)
        }
        ReportFormat::Json => {
            let entries: Vec<ReportEntry> = ranking
                .iter()
                .map(|(label, count)| ReportEntry {
                    label: label.to_string(),
                    count,
                })
                .collect();
            let mut out = serde_json::to_string_pretty(&entries)?;
            out.push('\n');
            Ok(out)
        }
    }
}

/// Write a rendered report atomically to `{dir}/{filename}`.
pub fn write_report(dir: &Path, filename: &str, content: &str) -> Result<PathBuf, PersistError> {
    let path = AtomicFileWriter::new(dir).write(filename, content.as_bytes())?;
    tally_info!("Report written to {:?}", path);
    Ok(path)
}
