use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

pub const REPORT_PREFIX: &str = "url-indexation-report-";

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("{0} is not a directory")]
    NotADirectory(PathBuf),
    #[error("cannot create download directory {path:?}: {source}")]
    CreateDir { path: PathBuf, source: io::Error },
    #[error("writing report failed: {0}")]
    Write(#[from] io::Error),
}

/// `url-indexation-report-<unix-ms>.csv`
pub fn report_filename(unix_ms: i64) -> String {
    format!("{REPORT_PREFIX}{unix_ms}.csv")
}

/// Download directory for CSV reports.
///
/// Reports are staged in a temp file next to the target and renamed into
/// place, so a reader never sees a partial report.
#[derive(Debug, Clone)]
pub struct ReportStore {
    dir: PathBuf,
}

impl ReportStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Creates the directory when missing.
    pub fn prepare(&self) -> Result<(), ReportError> {
        if self.dir.exists() {
            if !self.dir.is_dir() {
                return Err(ReportError::NotADirectory(self.dir.clone()));
            }
            return Ok(());
        }
        fs::create_dir_all(&self.dir).map_err(|source| ReportError::CreateDir {
            path: self.dir.clone(),
            source,
        })
    }

    /// Saves `payload` under the timestamped report name, replacing any
    /// report with the same name.
    pub fn save(&self, unix_ms: i64, payload: &[u8]) -> Result<PathBuf, ReportError> {
        self.prepare()?;
        let target = self.dir.join(report_filename(unix_ms));

        let mut staged = NamedTempFile::new_in(&self.dir)?;
        staged.write_all(payload)?;
        staged.as_file_mut().sync_all()?;
        staged.persist(&target).map_err(|err| err.error)?;
        Ok(target)
    }
}

/// Saves a downloaded report into `dir` and returns its path.
pub fn save_report(dir: &Path, unix_ms: i64, payload: &[u8]) -> Result<PathBuf, ReportError> {
    ReportStore::new(dir).save(unix_ms, payload)
}
