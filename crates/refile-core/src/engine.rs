use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, info};

use crate::audit::AuditLog;
use crate::config::AppConfig;
use crate::error::Error;
use crate::progress::{ConfirmGate, ProgressReporter};
use crate::renamer;
use crate::scanner::{self, Strategy};
use crate::validator;

/// One batch rename-and-copy invocation.
///
/// Owns the run's configuration and sequences validation, enumeration,
/// copying and audit logging; callers supply presentation through the
/// reporter and gate traits. Nothing is shared between runs except the
/// filesystem itself.
pub struct BatchEngine {
    config: AppConfig,
}

/// Summary of a completed run.
#[derive(Debug)]
pub struct RunReport {
    pub folders_processed: usize,
    pub files_processed: usize,
    pub copy_duration: Duration,
    /// Audit log location; `None` when the run found nothing to copy.
    pub log_path: Option<PathBuf>,
}

impl BatchEngine {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Run the full batch:
    /// 1. Pre-flight validation (input exists, holds ticket folders, names
    ///    conform under the flatten strategy)
    /// 2. Compressed-content confirmation gate
    /// 3. Clear and recreate the output tree
    /// 4. Copy every file under its deterministic destination name
    /// 5. Flush the audit log, success only
    ///
    /// Any failure aborts the remainder; copies already made are left in
    /// place and no log file is written.
    pub fn run(
        &self,
        reporter: &dyn ProgressReporter,
        gate: &dyn ConfirmGate,
    ) -> Result<RunReport, Error> {
        let input_root = Path::new(&self.config.input_dir);
        let output_root = Path::new(&self.config.output_dir);
        let strategy = self.config.strategy;

        if !input_root.is_dir() {
            return Err(Error::InputDirMissing(input_root.to_path_buf()));
        }
        if !validator::has_ticket_folders(input_root)? {
            return Err(Error::NoTicketFolders);
        }
        if strategy == Strategy::Flatten {
            if let Some(name) = validator::first_invalid_folder_name(input_root)? {
                return Err(Error::InvalidFolderName(name));
            }
        }

        let archives = validator::find_compressed_files(input_root)?;
        if !archives.is_empty() {
            info!(
                "{} compressed files found under {}",
                archives.len(),
                input_root.display()
            );
            if !gate.confirm_compressed(&archives) {
                return Err(Error::Cancelled);
            }
        }

        reporter.on_status(&format!(
            "Starting rename run from: {}",
            input_root.display()
        ));
        reporter.on_status(&format!(
            "Results will be written to: {}",
            output_root.display()
        ));

        let batches = scanner::enumerate(input_root, strategy)?;
        let total_files: usize = batches.iter().map(|batch| batch.files.len()).sum();
        if total_files == 0 {
            reporter.on_status("No files found to rename.");
            return Ok(RunReport {
                folders_processed: batches.len(),
                files_processed: 0,
                copy_duration: Duration::ZERO,
                log_path: None,
            });
        }
        reporter.on_status(&format!("Found {total_files} files to process."));

        // A run never inherits output from a previous one.
        if output_root.exists() {
            fs::remove_dir_all(output_root)?;
        }
        fs::create_dir_all(output_root)?;

        reporter.on_copy_start(total_files);
        let copy_start = Instant::now();
        let records =
            renamer::copy_batches(&batches, output_root, strategy, total_files, reporter)?;
        let copy_duration = copy_start.elapsed();
        debug!(
            "copy completed in {:.2}s — {} files across {} folders",
            copy_duration.as_secs_f64(),
            records.len(),
            batches.len(),
        );

        let log_path = AuditLog::new(&self.config.log_dir).write_all(&records)?;

        reporter.on_status(&format!("Done! {} files processed.", records.len()));
        reporter.on_run_complete(records.len(), copy_duration.as_secs_f64());

        Ok(RunReport {
            folders_processed: batches.len(),
            files_processed: records.len(),
            copy_duration,
            log_path: Some(log_path),
        })
    }
}
