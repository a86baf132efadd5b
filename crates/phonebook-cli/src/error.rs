//! Error type for the interactive menu.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error(transparent)]
  Store(#[from] phonebook_core::Error),

  /// The user typed something that is not a positive integer where a
  /// contact id was expected.
  #[error("invalid id format: {0:?}")]
  InputFormat(String),

  #[error("terminal i/o error: {0}")]
  Io(#[from] std::io::Error),

  /// Standard input was closed while waiting for a line.
  #[error("end of input")]
  EndOfInput,
}

impl Error {
  /// Whether the menu loop must stop rather than report and continue.
  pub fn is_fatal(&self) -> bool {
    matches!(self, Self::Io(_) | Self::EndOfInput)
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
