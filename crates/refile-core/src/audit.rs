use chrono::Local;
use csv::{QuoteStyle, WriterBuilder};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Error;

/// One completed rename, buffered in memory until the whole run succeeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameRecord {
    pub folder: String,
    pub original_filename: String,
    pub destination_filename: String,
}

const LOG_HEADER: [&str; 3] = ["folder", "original_filename", "destination_filename"];

/// Writes one `;`-separated CSV per successful run into the log directory.
/// Fields are written raw: a `;` inside a file name is not escaped.
#[derive(Debug)]
pub struct AuditLog {
    log_dir: PathBuf,
}

impl AuditLog {
    pub fn new(log_dir: impl Into<PathBuf>) -> Self {
        Self {
            log_dir: log_dir.into(),
        }
    }

    /// Create the timestamped log file and flush every record, in order.
    /// Called only once the copy pass has fully succeeded; an aborted run
    /// leaves no log behind.
    pub fn write_all(&self, records: &[RenameRecord]) -> Result<PathBuf, Error> {
        fs::create_dir_all(&self.log_dir)?;
        let path = self.next_log_path();

        let mut writer = WriterBuilder::new()
            .delimiter(b';')
            .quote_style(QuoteStyle::Never)
            .from_path(&path)?;

        writer.write_record(LOG_HEADER)?;
        for record in records {
            writer.write_record([
                record.folder.as_str(),
                record.original_filename.as_str(),
                record.destination_filename.as_str(),
            ])?;
        }
        writer.flush()?;

        Ok(path)
    }

    fn next_log_path(&self) -> PathBuf {
        let stamp = Local::now().format("%Y%m%d_%H%M%S");
        self.log_dir.join(format!("rename_log_{stamp}.csv"))
    }
}

/// File name check used by callers that need to find prior run logs.
pub fn is_run_log(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(|name| name.starts_with("rename_log_") && name.ends_with(".csv"))
        .unwrap_or(false)
}
