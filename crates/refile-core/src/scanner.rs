use regex::Regex;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use walkdir::WalkDir;

use crate::error::Error;

/// How the input tree maps onto the output tree.
///
/// Both historical behaviors of the tool are kept as selectable variants;
/// `Flatten` is the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// Immediate children of the input root are ticket folders; every file
    /// beneath one, at any depth, lands in a single output directory named
    /// after it. Folder names must match the ticket pattern.
    #[default]
    Flatten,
    /// Every directory under the root keeps its own files and its place in
    /// the tree; the ticket id is derived from the trailing alphanumeric run
    /// of each directory's name. Folder names are not validated.
    PreserveTree,
}

impl Strategy {
    /// Zero-padding width of the per-folder sequence counter. Flattened
    /// folders collect whole subtrees, so they get the wider counter.
    pub fn counter_width(self) -> usize {
        match self {
            Strategy::Flatten => 4,
            Strategy::PreserveTree => 3,
        }
    }
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "flatten" => Ok(Strategy::Flatten),
            "tree" | "preserve-tree" => Ok(Strategy::PreserveTree),
            other => Err(format!(
                "unknown strategy '{other}' (expected 'flatten' or 'tree')"
            )),
        }
    }
}

/// One unit of copy work: where the files come from, where they land
/// relative to the output root, and the ticket id their new names carry.
/// `files` is ordered; sequence numbers follow this order.
#[derive(Debug, Clone)]
pub struct FolderBatch {
    pub ticket_id: String,
    pub source_dir: PathBuf,
    pub output_subdir: PathBuf,
    pub files: Vec<PathBuf>,
}

/// Enumerate the batches a run will copy. Directory entries are visited in
/// name order at every level, so repeated runs over unchanged input
/// enumerate identically on any platform.
pub fn enumerate(root: &Path, strategy: Strategy) -> Result<Vec<FolderBatch>, Error> {
    match strategy {
        Strategy::Flatten => enumerate_flat(root),
        Strategy::PreserveTree => enumerate_tree(root),
    }
}

fn enumerate_flat(root: &Path) -> Result<Vec<FolderBatch>, Error> {
    let mut folders: Vec<PathBuf> = fs::read_dir(root)?
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .map(|entry| entry.path())
        .filter(|path| path.is_dir())
        .collect();
    folders.sort();

    let mut batches = Vec::with_capacity(folders.len());
    for folder in folders {
        let name = folder
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let mut files = Vec::new();
        for entry in WalkDir::new(&folder).min_depth(1).sort_by_file_name() {
            let entry = entry?;
            if entry.file_type().is_file() {
                files.push(entry.into_path());
            }
        }

        batches.push(FolderBatch {
            ticket_id: name.clone(),
            source_dir: folder,
            output_subdir: PathBuf::from(name),
            files,
        });
    }

    Ok(batches)
}

fn enumerate_tree(root: &Path) -> Result<Vec<FolderBatch>, Error> {
    let suffix = Regex::new(r"[A-Za-z0-9]+$")?;

    let mut batches = Vec::new();
    for entry in WalkDir::new(root).min_depth(1).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_dir() {
            continue;
        }
        let dir = entry.into_path();
        let name = dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let output_subdir = dir
            .strip_prefix(root)
            .map(Path::to_path_buf)
            .map_err(|_| {
                Error::Other(format!("directory {} escapes the input root", dir.display()))
            })?;

        batches.push(FolderBatch {
            ticket_id: ticket_id_for(&suffix, &name),
            files: immediate_files(&dir)?,
            source_dir: dir,
            output_subdir,
        });
    }

    Ok(batches)
}

fn immediate_files(dir: &Path) -> Result<Vec<PathBuf>, Error> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)?
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .collect();
    files.sort();
    Ok(files)
}

/// Trailing alphanumeric run of a folder name, falling back to the full
/// name for names that end in non-alphanumeric characters only.
fn ticket_id_for(suffix: &Regex, folder_name: &str) -> String {
    suffix
        .find(folder_name)
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| folder_name.to_string())
}
