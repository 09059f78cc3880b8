use std::path::PathBuf;

/// Sink for run status and progress events.
///
/// The CLI implements this with terminal status lines and a progress bar;
/// tests and headless callers use [`SilentReporter`]. Events arrive in
/// emission order, fire-and-forget. All methods have default no-op
/// implementations.
pub trait ProgressReporter: Send + Sync {
    fn on_status(&self, _message: &str) {}
    fn on_copy_start(&self, _total_files: usize) {}
    /// Cumulative completion, 0.0–100.0.
    fn on_progress(&self, _percent: f64) {}
    fn on_file_renamed(&self, _original: &str, _renamed: &str) {}
    fn on_run_complete(&self, _files: usize, _duration_secs: f64) {}
}

/// No-op progress reporter for silent operation.
pub struct SilentReporter;

impl ProgressReporter for SilentReporter {}

/// Decision point for the pre-flight "compressed files found" warning.
/// Consulted strictly before any mutation; answering `false` abandons the
/// run with nothing touched.
pub trait ConfirmGate: Send + Sync {
    fn confirm_compressed(&self, archives: &[PathBuf]) -> bool;
}

/// Gate that always proceeds. Used for `--yes` runs and tests.
pub struct AutoConfirm;

impl ConfirmGate for AutoConfirm {
    fn confirm_compressed(&self, _archives: &[PathBuf]) -> bool {
        true
    }
}
