use constants::{BUSY_TIMEOUT, PRAGMAS};
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Location and connection settings of the shared database file.
///
/// Cheap to clone; every operation opens its own connection through
/// [`Database::open`] and hands it back through [`Database::close`].
#[derive(Clone, Debug)]
pub struct Database {
  path: PathBuf,
  busy_timeout: Duration,
}

impl Database {
  pub fn new(path: impl Into<PathBuf>) -> Self {
    return Self {
      path: path.into(),
      busy_timeout: BUSY_TIMEOUT,
    };
  }

  /// How long SQLite itself waits on a locked file before reporting
  /// `SQLITE_BUSY`. Zero surfaces contention immediately.
  pub fn with_busy_timeout(mut self, busy_timeout: Duration) -> Self {
    self.busy_timeout = busy_timeout;
    return self;
  }

  pub fn path(&self) -> &Path {
    return &self.path;
  }

  pub fn open(&self) -> rusqlite::Result<Connection> {
    let conn = Connection::open(&self.path)?;
    conn.busy_timeout(self.busy_timeout)?;
    conn.execute_batch(PRAGMAS)?;
    return Ok(conn);
  }

  pub fn close(&self, conn: Connection) {
    if let Err((_conn, err)) = conn.close() {
      tracing::warn!(path = ?self.path, %err, "failed to close connection");
    }
  }

  pub fn sqlite_version(&self) -> rusqlite::Result<String> {
    let conn = self.open()?;
    let version = conn.query_row("SELECT sqlite_version()", (), |row| row.get(0));
    self.close(conn);
    return version;
  }
}
