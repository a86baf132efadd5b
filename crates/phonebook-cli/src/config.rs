//! Optional TOML config file and its merge with command-line flags.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Shape of the optional TOML config file.
#[derive(Debug, Deserialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
  /// Contacts file to open at startup.
  #[serde(default)]
  pub file: Option<PathBuf>,
  /// `tracing` filter directive, e.g. `info` or `phonebook=debug`.
  #[serde(default)]
  pub log:  Option<String>,
}

impl ConfigFile {
  pub fn load(path: &Path) -> Result<Self> {
    let raw = std::fs::read_to_string(path)
      .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&raw).context("parsing config file")
  }
}

/// Effective settings after applying precedence.
#[derive(Debug, PartialEq, Eq)]
pub struct Settings {
  pub file: Option<PathBuf>,
  pub log:  Option<String>,
}

impl Settings {
  /// Command-line flags (and their env fallbacks) win over the config file.
  pub fn resolve(cli_file: Option<PathBuf>, file_cfg: ConfigFile) -> Self {
    Self { file: cli_file.or(file_cfg.file), log: file_cfg.log }
  }
}
