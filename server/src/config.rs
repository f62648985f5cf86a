//! Server configuration.

use std::path::PathBuf;

use tracing::warn;

/// Default listen port when `MURMUR_PORT` is unset.
pub const DEFAULT_PORT: u16 = 3001;

/// Environment variable selecting the listen port.
pub const PORT_ENV: &str = "MURMUR_PORT";

/// Default hub repository holding the exported model.
pub const DEFAULT_MODEL_REPO: &str = "onnx-community/csm-1b-ONNX";

/// Default model file within the repository.
pub const DEFAULT_MODEL_FILE: &str = "onnx/model.onnx";

/// Default frontend origin allowed by CORS.
pub const DEFAULT_ALLOW_ORIGIN: &str = "http://localhost:3000";

/// Runtime configuration for the daemon.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub model_repo: String,
    pub model_file: String,
    pub model_revision: Option<String>,
    pub allow_origin: String,
    /// Directory receiving generated audio files.
    pub artifact_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            model_repo: DEFAULT_MODEL_REPO.to_string(),
            model_file: DEFAULT_MODEL_FILE.to_string(),
            model_revision: None,
            allow_origin: DEFAULT_ALLOW_ORIGIN.to_string(),
            artifact_dir: std::env::temp_dir(),
        }
    }
}

impl Config {
    /// Default configuration with the port taken from `MURMUR_PORT` if set.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(raw) = std::env::var(PORT_ENV) {
            match raw.parse() {
                Ok(port) => config.port = port,
                Err(_) => warn!("ignoring invalid {}: {:?}", PORT_ENV, raw),
            }
        }
        config
    }
}
