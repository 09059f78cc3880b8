mod commands;
mod logging;
mod progress;

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;

use clap::{CommandFactory, Parser};
use colored::*;
use commands::{Cli, Commands};
use dotenv::dotenv;
use progress::CliReporter;
use refile_core::{config, AutoConfirm, BatchEngine, ConfirmGate, Error};
use tracing::{error, info};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();

    let _guard = logging::init_logger();

    let mut app_config = match config::load_configuration() {
        Ok(config) => config,
        Err(err) => {
            error!("Error loading configuration: {}", err);
            process::exit(1);
        }
    };

    if let Err(err) = config::ensure_directories(&app_config) {
        error!("Error creating working directories: {}", err);
        process::exit(1);
    }

    let args = Cli::parse();

    match args.command {
        Some(Commands::Run {
            input,
            strategy,
            yes,
        }) => {
            if let Some(input) = input {
                app_config.input_dir = input.to_string_lossy().into_owned();
            }
            if let Some(strategy) = strategy {
                app_config.strategy = strategy;
            }
            if let Err(err) = run_batch(app_config, yes) {
                match err {
                    Error::Cancelled => {
                        info!("Run cancelled; nothing was copied.");
                    }
                    err => {
                        error!("Error: {}", err);
                        process::exit(1);
                    }
                }
            }
        }
        Some(Commands::PrintConfig) => {
            println!("Configuration: {:?}", app_config);
        }
        Some(Commands::OpenLogs) => {
            if let Err(err) = open_path(Path::new(&app_config.log_dir)) {
                error!("Error opening log directory: {}", err);
                process::exit(1);
            }
        }
        None => {
            let _ = Cli::command().print_long_help();
        }
    }

    Ok(())
}

fn run_batch(app_config: refile_core::AppConfig, assume_yes: bool) -> Result<(), Error> {
    let engine = BatchEngine::new(app_config);
    let reporter = CliReporter::new();

    let report = if assume_yes {
        engine.run(&reporter, &AutoConfirm)?
    } else {
        engine.run(&reporter, &PromptGate)?
    };

    println!();
    info!(
        "{} folders, {} files copied in {}",
        format!("{}", report.folders_processed).green(),
        format!("{}", report.files_processed).green(),
        format!("{:.2}s", report.copy_duration.as_secs_f64()).green(),
    );
    match report.log_path {
        Some(path) => info!(
            "Rename log saved to: {}",
            format!("{}", path.display()).cyan()
        ),
        None => info!("No files were found, so no rename log was written."),
    }

    Ok(())
}

/// Interactive y/N gate for the compressed-content warning.
struct PromptGate;

impl ConfirmGate for PromptGate {
    fn confirm_compressed(&self, archives: &[PathBuf]) -> bool {
        eprintln!("Compressed files found in the input tree:");
        for path in archives {
            eprintln!("  {}", path.display());
        }
        prompt_confirm("Continue anyway?", Some(false)).unwrap_or(false)
    }
}

fn prompt_confirm(prompt: &str, default: Option<bool>) -> io::Result<bool> {
    let mut input = String::new();

    loop {
        input.clear();

        match default {
            Some(true) => print!("{} (Y/n): ", prompt),
            Some(false) | None => print!("{} (y/N): ", prompt),
        }
        io::stdout().flush()?;

        io::stdin().read_line(&mut input)?;

        match input.trim().to_uppercase().as_str() {
            "Y" => return Ok(true),
            "N" => return Ok(false),
            "" => match default {
                Some(default) => return Ok(default),
                None => continue,
            },
            _ => continue,
        }
    }
}

fn open_path(path: &Path) -> io::Result<()> {
    #[cfg(target_os = "windows")]
    let opener = "explorer";
    #[cfg(target_os = "macos")]
    let opener = "open";
    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    let opener = "xdg-open";

    process::Command::new(opener).arg(path).spawn()?;
    Ok(())
}
