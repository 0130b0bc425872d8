use std::path::PathBuf;
use thiserror::Error;

/// Failure while preparing the table a run writes into.
#[derive(Error, Debug)]
pub enum SetupError {
  #[error("failed to open database {path:?}: {source}")]
  Open {
    path: PathBuf,
    source: rusqlite::Error,
  },

  #[error("failed to drop table '{table}': {source}")]
  Drop {
    table: &'static str,
    source: rusqlite::Error,
  },

  #[error("failed to create table '{table}': {source}")]
  Create {
    table: &'static str,
    source: rusqlite::Error,
  },
}

/// Final outcome of an insert that did not land.
#[derive(Error, Debug)]
pub enum InsertError {
  #[error("failed to open database connection: {0}")]
  Open(#[source] rusqlite::Error),

  #[error("storage error on attempt {attempts}: {source}")]
  Storage {
    attempts: u32,
    source: rusqlite::Error,
  },

  #[error("database stayed busy, gave up after {attempts} attempts")]
  RetriesExhausted { attempts: u32 },
}

#[derive(Error, Debug)]
pub enum SourceError {
  #[error("failed to open {path:?}: {source}")]
  Open { path: PathBuf, source: csv::Error },

  #[error("malformed row: {0}")]
  Row(#[from] csv::Error),
}

#[derive(Error, Debug)]
pub enum LogError {
  #[error("failed to open log file {path:?}: {source}")]
  File {
    path: PathBuf,
    source: std::io::Error,
  },

  #[error("failed to install log subscriber: {0}")]
  Subscriber(String),
}
