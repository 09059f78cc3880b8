use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("input directory not found: {}", .0.display())]
    InputDirMissing(PathBuf),

    #[error("input directory must contain at least one ticket folder")]
    NoTicketFolders,

    #[error("invalid folder name '{0}': expected two uppercase letters followed by 15 digits")]
    InvalidFolderName(String),

    #[error("run cancelled by operator")]
    Cancelled,

    #[error("pattern error: {0}")]
    Pattern(#[from] regex::Error),

    #[error("walk error: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("{0}")]
    Other(String),
}
