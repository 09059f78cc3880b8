use filetime::FileTime;
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::audit::RenameRecord;
use crate::error::Error;
use crate::progress::ProgressReporter;
use crate::scanner::{FolderBatch, Strategy};

/// Destination file name for the `seq`-th file of a ticket folder. The base
/// name is discarded; only the ticket id, counter and extension survive.
pub fn destination_name(ticket_id: &str, seq: usize, width: usize, extension: &str) -> String {
    format!("{ticket_id}{seq:0width$}{extension}")
}

/// File extension including the leading dot, case preserved; empty for
/// files without one.
pub fn file_extension(path: &Path) -> String {
    path.extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default()
}

/// Copy every batch into the output root, numbering files from 1 within
/// each batch. Returns one record per copied file, in processing order.
///
/// The first copy error aborts the pass; files already copied stay where
/// they are and no records reach the audit log.
pub fn copy_batches(
    batches: &[FolderBatch],
    output_root: &Path,
    strategy: Strategy,
    total_files: usize,
    reporter: &dyn ProgressReporter,
) -> Result<Vec<RenameRecord>, Error> {
    let width = strategy.counter_width();
    let mut records = Vec::with_capacity(total_files);
    let mut processed = 0usize;

    for batch in batches {
        let dest_dir = output_root.join(&batch.output_subdir);
        fs::create_dir_all(&dest_dir)?;
        reporter.on_status(&format!(
            "Processing directory: {}",
            batch.source_dir.display()
        ));

        for (index, source) in batch.files.iter().enumerate() {
            let original = source
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            let renamed =
                destination_name(&batch.ticket_id, index + 1, width, &file_extension(source));
            let dest = dest_dir.join(&renamed);

            fs::copy(source, &dest)?;
            let metadata = fs::metadata(source)?;
            filetime::set_file_mtime(&dest, FileTime::from_last_modification_time(&metadata))?;
            debug!("copied {} -> {}", source.display(), dest.display());

            records.push(RenameRecord {
                folder: batch.source_dir.display().to_string(),
                original_filename: original.clone(),
                destination_filename: renamed.clone(),
            });

            processed += 1;
            reporter.on_file_renamed(&original, &renamed);
            reporter.on_progress(processed as f64 / total_files as f64 * 100.0);
        }
    }

    Ok(records)
}
