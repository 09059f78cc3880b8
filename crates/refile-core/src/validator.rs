use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::Error;

/// Archive extensions that trigger the operator confirmation gate,
/// matched case-insensitively.
pub const COMPRESSED_EXTENSIONS: [&str; 9] =
    ["zip", "rar", "7z", "tar", "gz", "bz2", "xz", "cab", "iso"];

/// Two uppercase letters followed by 15 digits.
const TICKET_FOLDER_PATTERN: &str = r"^[A-Z]{2}\d{15}$";

/// First immediate child directory of `root` whose name does not match the
/// ticket folder pattern. Nested directories are not checked.
pub fn first_invalid_folder_name(root: &Path) -> Result<Option<String>, Error> {
    let pattern = Regex::new(TICKET_FOLDER_PATTERN)?;

    let mut entries = fs::read_dir(root)?.collect::<Result<Vec<_>, _>>()?;
    entries.sort_by_key(|entry| entry.file_name());

    for entry in entries {
        if !entry.file_type()?.is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if !pattern.is_match(&name) {
            return Ok(Some(name));
        }
    }

    Ok(None)
}

/// All files under `root`, at any depth, carrying a compressed-archive
/// extension.
pub fn find_compressed_files(root: &Path) -> Result<Vec<PathBuf>, Error> {
    let mut found = Vec::new();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let compressed = entry
            .path()
            .extension()
            .map(|ext| {
                let ext = ext.to_string_lossy().to_lowercase();
                COMPRESSED_EXTENSIONS.contains(&ext.as_str())
            })
            .unwrap_or(false);
        if compressed {
            found.push(entry.into_path());
        }
    }

    Ok(found)
}

/// Whether the immediate children of `root` include at least one directory.
pub fn has_ticket_folders(root: &Path) -> Result<bool, Error> {
    for entry in fs::read_dir(root)? {
        if entry?.file_type()?.is_dir() {
            return Ok(true);
        }
    }
    Ok(false)
}
