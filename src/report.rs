/*!
 * QA reporting over classified segments.
 *
 * Provides the summary counters, filtered views, free-text search and the
 * JSON report written next to each translated file.
 */

use anyhow::{anyhow, Context, Result};
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::file_utils::FileManager;
use crate::validation::QaRow;

/// Counters over a classified result set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct QaSummary {
    pub segments: usize,
    pub changed: usize,
    pub unchanged: usize,
    pub flagged: usize,
}

impl QaSummary {
    pub fn from_rows(rows: &[QaRow]) -> Self {
        let changed = rows.iter().filter(|row| row.changed).count();
        Self {
            segments: rows.len(),
            changed,
            unchanged: rows.len() - changed,
            flagged: rows.iter().filter(|row| row.flagged).count(),
        }
    }
}

impl fmt::Display for QaSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} segments, {} changed, {} unchanged, {} flagged",
            self.segments, self.changed, self.unchanged, self.flagged
        )
    }
}

/// Subset of rows to look at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportView {
    #[default]
    Changed,
    Flagged,
    All,
    Unchanged,
}

impl ReportView {
    pub fn includes(&self, row: &QaRow) -> bool {
        match self {
            Self::Changed => row.changed,
            Self::Flagged => row.flagged,
            Self::All => true,
            Self::Unchanged => !row.changed,
        }
    }
}

impl fmt::Display for ReportView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Changed => "changed",
            Self::Flagged => "flagged",
            Self::All => "all",
            Self::Unchanged => "unchanged",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for ReportView {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "changed" => Ok(Self::Changed),
            "flagged" => Ok(Self::Flagged),
            "all" => Ok(Self::All),
            "unchanged" => Ok(Self::Unchanged),
            _ => Err(anyhow!("Invalid report view: {}", s)),
        }
    }
}

/// Rows in `view` whose source, target or reasons contain `query`, case-insensitively
///
/// A blank query matches every row of the view.
pub fn filter_rows<'a>(rows: &'a [QaRow], view: ReportView, query: &str) -> Vec<&'a QaRow> {
    let query = query.trim().to_lowercase();
    rows.iter()
        .filter(|row| view.includes(row))
        .filter(|row| query.is_empty() || matches_query(row, &query))
        .collect()
}

fn matches_query(row: &QaRow, query: &str) -> bool {
    [&row.source_text, &row.target_text, &row.reasons]
        .iter()
        .any(|field| field.to_lowercase().contains(query))
}

/// Rows to list after a run: a view narrowed by a search query
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewFilter {
    pub view: ReportView,
    pub query: String,
}

impl ReviewFilter {
    pub fn new(view: ReportView, query: impl Into<String>) -> Self {
        Self {
            view,
            query: query.into(),
        }
    }

    pub fn apply<'a>(&self, rows: &'a [QaRow]) -> Vec<&'a QaRow> {
        filter_rows(rows, self.view, &self.query)
    }
}

/// Up to `size` changed rows, in document order
pub fn sample_changed(rows: &[QaRow], size: usize) -> Vec<&QaRow> {
    rows.iter().filter(|row| row.changed).take(size).collect()
}

/// JSON report for one translated file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QaReport {
    pub generated_at: String,
    pub input_file: String,
    pub output_file: String,
    pub source_language: String,
    pub target_language: String,
    pub provider: String,
    /// Text runs that fell back to the source text
    pub failed_runs: usize,
    pub summary: QaSummary,
    pub rows: Vec<QaRow>,
}

impl QaReport {
    pub fn new(
        input_file: &Path,
        output_file: &Path,
        source_language: &str,
        target_language: &str,
        provider: &str,
        failed_runs: usize,
        rows: Vec<QaRow>,
    ) -> Self {
        Self {
            generated_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            input_file: input_file.display().to_string(),
            output_file: output_file.display().to_string(),
            source_language: source_language.to_string(),
            target_language: target_language.to_string(),
            provider: provider.to_string(),
            failed_runs,
            summary: QaSummary::from_rows(&rows),
            rows,
        }
    }

    /// The report as pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize QA report")
    }

    /// Write the report as pretty-printed JSON
    pub fn write_json(&self, path: &Path) -> Result<()> {
        FileManager::write_to_file(path, &self.to_json()?)
    }
}
