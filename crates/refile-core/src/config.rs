use config::{Config, ConfigError, File as ConfigFile};
use serde::Deserialize;
use std::fs;
use std::io;

use crate::scanner::Strategy;

/// Per-invocation run context: every path and the scanner strategy a
/// [`crate::BatchEngine`] needs, with nothing process-global.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_input_dir")]
    pub input_dir: String,
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
    #[serde(default = "default_log_dir")]
    pub log_dir: String,
    #[serde(default)]
    pub strategy: Strategy,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            input_dir: default_input_dir(),
            output_dir: default_output_dir(),
            log_dir: default_log_dir(),
            strategy: Strategy::default(),
        }
    }
}

fn default_input_dir() -> String {
    "input".to_string()
}

fn default_output_dir() -> String {
    "output".to_string()
}

fn default_log_dir() -> String {
    "logs".to_string()
}

pub fn load_configuration() -> Result<AppConfig, ConfigError> {
    let builder = Config::builder()
        .add_source(ConfigFile::with_name("Config").required(false))
        .build()?;
    builder.try_deserialize::<AppConfig>()
}

/// Create the input, output and log directories if absent.
pub fn ensure_directories(config: &AppConfig) -> io::Result<()> {
    for dir in [&config.input_dir, &config.output_dir, &config.log_dir] {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}
