use indicatif::{ProgressBar, ProgressStyle};
use refile_core::ProgressReporter;
use std::sync::Mutex;

/// CLI progress reporter: status lines on stderr plus one percent bar for
/// the copy phase. Status arriving while the bar is live is printed above
/// it so the bar never tears.
pub struct CliReporter {
    bar: Mutex<Option<ProgressBar>>,
}

impl CliReporter {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }

    fn set_bar(&self, pb: ProgressBar) {
        let mut guard = self.bar.lock().unwrap();
        if let Some(old) = guard.take() {
            old.finish_and_clear();
        }
        *guard = Some(pb);
    }

    fn finish_bar(&self) {
        let mut guard = self.bar.lock().unwrap();
        if let Some(pb) = guard.take() {
            pb.finish_and_clear();
        }
    }
}

impl ProgressReporter for CliReporter {
    fn on_status(&self, message: &str) {
        let guard = self.bar.lock().unwrap();
        match guard.as_ref() {
            Some(pb) => pb.println(message),
            None => eprintln!("{message}"),
        }
    }

    fn on_copy_start(&self, total_files: usize) {
        let pb = ProgressBar::new(100);
        pb.set_style(
            ProgressStyle::with_template(
                "  {spinner:.cyan} Copying [{bar:30.cyan/dim}] {pos}% ({msg})",
            )
            .unwrap()
            .progress_chars("━╸─")
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
        );
        pb.set_message(format!("{total_files} files"));
        pb.enable_steady_tick(std::time::Duration::from_millis(80));
        self.set_bar(pb);
    }

    fn on_progress(&self, percent: f64) {
        let guard = self.bar.lock().unwrap();
        if let Some(pb) = guard.as_ref() {
            pb.set_position(percent.round() as u64);
        }
    }

    fn on_file_renamed(&self, original: &str, renamed: &str) {
        let guard = self.bar.lock().unwrap();
        if let Some(pb) = guard.as_ref() {
            pb.println(format!("  {original} -> {renamed}"));
        }
    }

    fn on_run_complete(&self, files: usize, duration_secs: f64) {
        self.finish_bar();
        eprintln!(
            "  \x1b[32m✓\x1b[0m Copy complete: {} files in {:.2}s",
            files, duration_secs
        );
    }
}
