use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::SelectionConfig;
use crate::types::identifiers::{CatalogVersion, ProjectId};
use crate::types::selection_bundle::SelectionResult;

pub const REPORT_FILE: &str = "report.json";
pub const SELECTED_IDS_FILE: &str = "selected_ids.json";

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Output directory already exists: {0}")]
    OutputExists(PathBuf),
    #[error("selected_ids.json disagrees with report.json")]
    Inconsistent,
}

/// Everything downstream reporting needs to reproduce and cite a selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionReport {
    pub report_version: String,
    pub catalog_version: CatalogVersion,
    pub config: SelectionConfig,
    pub created_at: DateTime<Utc>, // informational only
    pub result: SelectionResult,
}

impl SelectionReport {
    pub fn new(
        catalog_version: CatalogVersion,
        config: SelectionConfig,
        result: SelectionResult,
    ) -> Self {
        Self {
            report_version: "1".into(),
            catalog_version,
            config,
            created_at: Utc::now(),
            result,
        }
    }
}

/// Writes reports as a directory, all-or-nothing.
pub struct ReportWriter;

impl ReportWriter {
    pub fn write(report: &SelectionReport, output_dir: &Path) -> Result<(), ReportError> {
        if output_dir.exists() {
            return Err(ReportError::OutputExists(output_dir.to_path_buf()));
        }

        // Temp dir name is derived from the catalog hash so concurrent reports
        // over different catalogs do not share it.
        let hash = report
            .catalog_version
            .as_str()
            .strip_prefix("sha256:")
            .unwrap_or(report.catalog_version.as_str());
        let stem: String = hash.chars().take(12).collect();
        let temp_dir = output_dir.with_extension(format!("tmp.{stem}"));

        // Clean up any stale temp dir from a crashed previous run
        if temp_dir.exists() {
            fs::remove_dir_all(&temp_dir)?;
        }
        fs::create_dir_all(&temp_dir)?;

        let f_report = fs::File::create(temp_dir.join(REPORT_FILE))?;
        serde_json::to_writer_pretty(&f_report, report)?;
        f_report.sync_all()?;

        let f_ids = fs::File::create(temp_dir.join(SELECTED_IDS_FILE))?;
        serde_json::to_writer_pretty(&f_ids, &report.result.selected_ids())?;
        f_ids.sync_all()?;

        fs::rename(&temp_dir, output_dir)?;
        Ok(())
    }

    pub fn load(dir: &Path) -> Result<SelectionReport, ReportError> {
        let f_report = fs::File::open(dir.join(REPORT_FILE))?;
        let report: SelectionReport = serde_json::from_reader(f_report)?;

        let f_ids = fs::File::open(dir.join(SELECTED_IDS_FILE))?;
        let ids: Vec<ProjectId> = serde_json::from_reader(f_ids)?;
        if ids != report.result.selected_ids() {
            return Err(ReportError::Inconsistent);
        }

        Ok(report)
    }
}
