//! Configuration for the stretchhash CLI
//!
//! A JSON file supplies defaults for every command; command-line flags
//! override individual values.

use std::fs;
use std::path::Path;
#[cfg(feature = "cli")]
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use stretchhash_core::format::validate_hex_length;
use stretchhash_core::{Algorithm, Difficulty, InvalidInput};
use thiserror::Error;

/// File name inside the per-user config directory
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Default digest length in hex characters (one full SHA-256 block)
pub const DEFAULT_HEX_LENGTH: usize = 64;

/// Fewest blocks the `mine` command accepts
pub const MIN_CHAIN_BLOCKS: u32 = 2;

/// Most blocks the `mine` command accepts
pub const MAX_CHAIN_BLOCKS: u32 = 888;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("File I/O error: {0}")]
    FileError(#[from] std::io::Error),

    #[error("Invalid config file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config value: {0}")]
    Invalid(#[from] stretchhash_core::Error),
}

/// Defaults applied to every command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Primitive hash for derivations
    pub algorithm: Algorithm,
    /// Stretching rounds when `derive` is given no `--iterations`
    pub iterations: u64,
    /// Digest length in hex characters
    pub hex_length: usize,
    /// Mining difficulty (1-10)
    pub difficulty: u8,
    /// Worker threads (default: number of CPU cores)
    pub threads: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::Sha256,
            iterations: 1,
            hex_length: DEFAULT_HEX_LENGTH,
            difficulty: 1,
            threads: None,
        }
    }
}

impl Config {
    /// Load and validate a config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load `explicit` if given, else the default file if present, else defaults
    #[cfg(feature = "cli")]
    pub fn discover(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let path = default_config_path();
        if path.exists() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Write the config as pretty JSON, creating parent directories
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Check that every value is one the engine and miner accept
    pub fn validate(&self) -> Result<(), stretchhash_core::Error> {
        if self.iterations == 0 {
            return Err(InvalidInput::ZeroIterations.into());
        }
        validate_hex_length(self.hex_length)?;
        self.difficulty()?;
        Ok(())
    }

    pub fn difficulty(&self) -> Result<Difficulty, stretchhash_core::Error> {
        Difficulty::new(self.difficulty)
    }

    /// Replace values for which an override is present
    pub fn with_overrides(mut self, overrides: &Overrides) -> Self {
        if let Some(algorithm) = overrides.algorithm {
            self.algorithm = algorithm;
        }
        if let Some(iterations) = overrides.iterations {
            self.iterations = iterations;
        }
        if let Some(hex_length) = overrides.hex_length {
            self.hex_length = hex_length;
        }
        if let Some(difficulty) = overrides.difficulty {
            self.difficulty = difficulty;
        }
        if overrides.threads.is_some() {
            self.threads = overrides.threads;
        }
        self
    }
}

/// Per-invocation overrides collected from command-line flags
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub algorithm: Option<Algorithm>,
    pub iterations: Option<u64>,
    pub hex_length: Option<usize>,
    pub difficulty: Option<u8>,
    pub threads: Option<usize>,
}

/// Get the default config file path
#[cfg(feature = "cli")]
pub fn default_config_path() -> PathBuf {
    let base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    base.join("stretchhash").join(CONFIG_FILE_NAME)
}
