//! Concurrent inserts into a single-file SQLite database, serialized by a
//! shared write lock and retried when the engine reports contention.

pub mod config;
pub mod csv_source;
pub mod db;
pub mod error;
pub mod logging;
pub mod record;
pub mod runner;
pub mod table;
pub mod worker;

pub use config::RetryPolicy;
pub use db::Database;
pub use error::{InsertError, LogError, SetupError, SourceError};
pub use record::{Customer, Pet, Record, Schema};
pub use runner::Summary;
pub use worker::{Receipt, Worker, WriteLock};
