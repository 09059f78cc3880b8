use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::tempdir;

use refile_core::{
    AppConfig, AutoConfirm, BatchEngine, ConfirmGate, Error, SilentReporter, Strategy,
};

fn test_config(root: &Path, strategy: Strategy) -> AppConfig {
    let config = AppConfig {
        input_dir: root.join("input").to_string_lossy().into_owned(),
        output_dir: root.join("output").to_string_lossy().into_owned(),
        log_dir: root.join("logs").to_string_lossy().into_owned(),
        strategy,
    };
    fs::create_dir_all(&config.input_dir).unwrap();
    config
}

fn run_logs(log_dir: &Path) -> Vec<PathBuf> {
    match fs::read_dir(log_dir) {
        Ok(entries) => entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| refile_core::audit::is_run_log(path))
            .collect(),
        Err(_) => Vec::new(),
    }
}

/// Gate that records what it was shown and answers a fixed way.
struct RecordingGate {
    answer: bool,
    seen: Mutex<Vec<PathBuf>>,
}

impl RecordingGate {
    fn new(answer: bool) -> Self {
        Self {
            answer,
            seen: Mutex::new(Vec::new()),
        }
    }
}

impl ConfirmGate for RecordingGate {
    fn confirm_compressed(&self, archives: &[PathBuf]) -> bool {
        self.seen.lock().unwrap().extend_from_slice(archives);
        self.answer
    }
}

#[test]
fn test_missing_input_directory_aborts() {
    let tmp = tempdir().unwrap();
    let mut config = test_config(tmp.path(), Strategy::Flatten);
    config.input_dir = tmp.path().join("does-not-exist").to_string_lossy().into_owned();

    let err = BatchEngine::new(config)
        .run(&SilentReporter, &AutoConfirm)
        .unwrap_err();
    assert!(matches!(err, Error::InputDirMissing(_)));
}

#[test]
fn test_empty_input_aborts_with_no_folders() {
    let tmp = tempdir().unwrap();
    let config = test_config(tmp.path(), Strategy::Flatten);
    // A loose file is not a ticket folder.
    fs::write(Path::new(&config.input_dir).join("loose.txt"), "x").unwrap();

    let err = BatchEngine::new(config.clone())
        .run(&SilentReporter, &AutoConfirm)
        .unwrap_err();
    assert!(matches!(err, Error::NoTicketFolders));
    assert!(run_logs(Path::new(&config.log_dir)).is_empty());
}

#[test]
fn test_invalid_folder_name_aborts_flatten_run() {
    let tmp = tempdir().unwrap();
    let config = test_config(tmp.path(), Strategy::Flatten);
    let folder = Path::new(&config.input_dir).join("xx123456789012345");
    fs::create_dir_all(&folder).unwrap();
    fs::write(folder.join("a.txt"), "a").unwrap();

    let marker = Path::new(&config.output_dir).join("untouched.txt");
    fs::create_dir_all(&config.output_dir).unwrap();
    fs::write(&marker, "still here").unwrap();

    let err = BatchEngine::new(config.clone())
        .run(&SilentReporter, &AutoConfirm)
        .unwrap_err();

    match err {
        Error::InvalidFolderName(name) => assert_eq!(name, "xx123456789012345"),
        other => panic!("expected InvalidFolderName, got {other:?}"),
    }
    assert!(marker.exists(), "pre-flight failure must not touch the output");
    assert!(run_logs(Path::new(&config.log_dir)).is_empty());
}

#[test]
fn test_folder_names_not_enforced_under_tree_strategy() {
    let tmp = tempdir().unwrap();
    let config = test_config(tmp.path(), Strategy::PreserveTree);
    let folder = Path::new(&config.input_dir).join("xx123456789012345");
    fs::create_dir_all(&folder).unwrap();
    fs::write(folder.join("a.txt"), "a").unwrap();

    let report = BatchEngine::new(config.clone())
        .run(&SilentReporter, &AutoConfirm)
        .unwrap();
    assert_eq!(report.files_processed, 1);
    assert!(Path::new(&config.output_dir)
        .join("xx123456789012345/xx123456789012345001.txt")
        .is_file());
}

#[test]
fn test_declined_compressed_gate_leaves_no_side_effects() {
    let tmp = tempdir().unwrap();
    let config = test_config(tmp.path(), Strategy::Flatten);
    let folder = Path::new(&config.input_dir).join("AB123456789012345");
    fs::create_dir_all(&folder).unwrap();
    fs::write(folder.join("a.txt"), "a").unwrap();
    fs::write(folder.join("archive.zip"), "zip").unwrap();

    let marker = Path::new(&config.output_dir).join("untouched.txt");
    fs::create_dir_all(&config.output_dir).unwrap();
    fs::write(&marker, "still here").unwrap();

    let gate = RecordingGate::new(false);
    let err = BatchEngine::new(config.clone())
        .run(&SilentReporter, &gate)
        .unwrap_err();

    assert!(matches!(err, Error::Cancelled));
    let seen = gate.seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert!(seen[0].ends_with("archive.zip"));

    assert!(marker.exists());
    assert!(run_logs(Path::new(&config.log_dir)).is_empty());
}

#[test]
fn test_accepted_compressed_gate_proceeds_normally() {
    let tmp = tempdir().unwrap();
    let config = test_config(tmp.path(), Strategy::Flatten);
    let folder = Path::new(&config.input_dir).join("AB123456789012345");
    fs::create_dir_all(&folder).unwrap();
    fs::write(folder.join("a.txt"), "a").unwrap();
    fs::write(folder.join("archive.zip"), "zip").unwrap();

    let gate = RecordingGate::new(true);
    let report = BatchEngine::new(config.clone())
        .run(&SilentReporter, &gate)
        .unwrap();

    assert_eq!(report.files_processed, 2);
    assert!(gate.seen.lock().unwrap().len() == 1);

    // The archive is copied like any other file, extension intact.
    let out_folder = Path::new(&config.output_dir).join("AB123456789012345");
    assert!(out_folder.join("AB1234567890123450001.txt").is_file());
    assert!(out_folder.join("AB1234567890123450002.zip").is_file());
    assert_eq!(run_logs(Path::new(&config.log_dir)).len(), 1);
}

#[test]
fn test_gate_not_consulted_without_archives() {
    let tmp = tempdir().unwrap();
    let config = test_config(tmp.path(), Strategy::Flatten);
    let folder = Path::new(&config.input_dir).join("AB123456789012345");
    fs::create_dir_all(&folder).unwrap();
    fs::write(folder.join("a.txt"), "a").unwrap();

    let gate = RecordingGate::new(false); // would cancel if asked
    let report = BatchEngine::new(config)
        .run(&SilentReporter, &gate)
        .unwrap();

    assert_eq!(report.files_processed, 1);
    assert!(gate.seen.lock().unwrap().is_empty());
}

#[test]
fn test_log_exists_only_after_success() {
    let tmp = tempdir().unwrap();
    let config = test_config(tmp.path(), Strategy::Flatten);
    let folder = Path::new(&config.input_dir).join("AB123456789012345");
    fs::create_dir_all(&folder).unwrap();
    fs::write(folder.join("a.txt"), "a").unwrap();

    assert!(run_logs(Path::new(&config.log_dir)).is_empty());

    let report = BatchEngine::new(config.clone())
        .run(&SilentReporter, &AutoConfirm)
        .unwrap();

    let logs = run_logs(Path::new(&config.log_dir));
    assert_eq!(logs.len(), 1);
    assert_eq!(Some(logs[0].clone()), report.log_path);
}
