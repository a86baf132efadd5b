//! Error types for `phonebook-core`.

use std::path::PathBuf;

use thiserror::Error;

/// The underlying cause of a failed load or save.
#[derive(Debug, Error)]
pub enum FileError {
  #[error(transparent)]
  Io(#[from] std::io::Error),

  #[error(transparent)]
  Json(#[from] serde_json::Error),
}

/// A required contact field, reported by [`Error::Validation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
  Name,
  Phone,
}

impl std::fmt::Display for Field {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Name => f.write_str("name"),
      Self::Phone => f.write_str("phone"),
    }
  }
}

#[derive(Debug, Error)]
pub enum Error {
  #[error("failed to load {}: {source}", .path.display())]
  Load {
    path:   PathBuf,
    #[source]
    source: FileError,
  },

  #[error("failed to save {}: {source}", .path.display())]
  Save {
    path:   PathBuf,
    #[source]
    source: FileError,
  },

  /// `save_file` was called without a path before any file was opened or
  /// saved.
  #[error("no file to save to")]
  NoSaveTarget,

  #[error("{0} must not be empty")]
  Validation(Field),

  #[error("contact not found: {0}")]
  NotFound(u64),

  /// The largest id in the store is already `u64::MAX`.
  #[error("no contact id left to assign")]
  IdExhausted,
}

impl Error {
  pub(crate) fn load(path: impl Into<PathBuf>, source: impl Into<FileError>) -> Self {
    Self::Load { path: path.into(), source: source.into() }
  }

  pub(crate) fn save(path: impl Into<PathBuf>, source: impl Into<FileError>) -> Self {
    Self::Save { path: path.into(), source: source.into() }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
