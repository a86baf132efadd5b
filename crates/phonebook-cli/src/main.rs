//! `phonebook` — interactive menu for a JSON-backed contact list.
//!
//! # Usage
//!
//! ```
//! phonebook
//! phonebook --file contacts.json
//! phonebook --config ~/.config/phonebook/config.toml
//! ```

mod app;
mod config;
mod error;
mod view;

use std::{io, path::PathBuf};

use anyhow::{Context, Result};
use app::App;
use clap::Parser;
use config::{ConfigFile, Settings};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "phonebook", version, about = "Interactive JSON phonebook")]
struct Args {
  /// Path to a TOML config file (file, log).
  #[arg(short, long, value_name = "FILE")]
  config: Option<PathBuf>,

  /// Contacts file to open at startup.
  #[arg(short, long, env = "PHONEBOOK_FILE", value_name = "PATH")]
  file: Option<PathBuf>,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

fn main() -> Result<()> {
  let args = Args::parse();

  let file_cfg = match &args.config {
    Some(path) => ConfigFile::load(path)?,
    None => ConfigFile::default(),
  };
  let settings = Settings::resolve(args.file, file_cfg);

  init_tracing(settings.log.as_deref())?;

  let stdin = io::stdin();
  let mut app = App::new(stdin.lock(), io::stdout());

  if let Some(path) = &settings.file {
    app.open_startup_file(path)?;
  }

  app.run().context("terminal i/o failed")?;
  Ok(())
}

/// Log to stderr. `RUST_LOG` wins over the config file's `log` key; the
/// default is `warn` so the menu stays readable.
fn init_tracing(directive: Option<&str>) -> Result<()> {
  let filter = match (std::env::var_os(EnvFilter::DEFAULT_ENV), directive) {
    (None, Some(d)) => {
      EnvFilter::try_new(d).with_context(|| format!("invalid log directive {d:?}"))?
    }
    _ => EnvFilter::builder()
      .with_default_directive(LevelFilter::WARN.into())
      .from_env_lossy(),
  };

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(io::stderr)
    .init();
  Ok(())
}
