use constants::DIVIDER;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use crate::db::Database;
use crate::error::LogError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LogTarget {
  Stdout,
  /// Appends to the file, creating it if needed.
  File(PathBuf),
}

/// Installs the global subscriber: timestamped lines, `info` unless
/// `RUST_LOG` says otherwise.
pub fn init(target: &LogTarget) -> Result<(), LogError> {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
  let builder = tracing_subscriber::fmt().with_env_filter(filter);

  let result = match target {
    LogTarget::Stdout => builder.try_init(),
    LogTarget::File(path) => {
      let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| LogError::File {
          path: path.clone(),
          source,
        })?;
      builder
        .with_ansi(false)
        .with_writer(Arc::new(file))
        .try_init()
    }
  };
  return result.map_err(|err| LogError::Subscriber(err.to_string()));
}

pub fn banner(
  program: &str,
  version: &str,
  sqlite_version: &str,
  started: chrono::DateTime<chrono::Local>,
) -> String {
  let exe = std::env::current_exe()
    .map(|path| path.display().to_string())
    .unwrap_or_else(|_| "unknown".to_string());

  return format!(
    "\n{DIVIDER}\nSTARTING UP {program} v{version}\n  Date and Time:    {date} at {time}\n  Operating System: {os} {arch}\n  SQLite Version:   {sqlite_version}\n  Executable:       {exe}\n{DIVIDER}",
    date = started.format("%Y-%m-%d"),
    time = started.format("%I:%M %p"),
    os = std::env::consts::OS,
    arch = std::env::consts::ARCH,
  );
}

pub fn log_banner(program: &str, version: &str, db: &Database) {
  let sqlite_version = db
    .sqlite_version()
    .unwrap_or_else(|err| format!("unknown ({err})"));
  tracing::info!(
    "{}",
    banner(program, version, &sqlite_version, chrono::Local::now())
  );
}
