//! Insert-with-retry under a shared write lock.

use parking_lot::{Mutex, MutexGuard};
use rusqlite::{ffi, Connection};
use std::sync::Arc;

use crate::config::RetryPolicy;
use crate::db::Database;
use crate::error::InsertError;
use crate::record::Record;

/// Mutual exclusion shared by every worker of a run. Clones refer to the same
/// lock; holding the guard spans exactly one insert's execute, hold and commit.
#[derive(Clone, Default)]
pub struct WriteLock(Arc<Mutex<()>>);

impl WriteLock {
  pub fn new() -> Self {
    return Self::default();
  }

  pub fn acquire(&self) -> MutexGuard<'_, ()> {
    return self.0.lock();
  }
}

/// Result of an insert that landed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Receipt {
  pub row_id: i64,
  pub attempts: u32,
  /// Retry budget remaining when the commit succeeded.
  pub retries_left: u32,
}

/// Whether SQLite refused the statement because another connection holds a
/// conflicting lock.
pub fn is_contention(err: &rusqlite::Error) -> bool {
  return matches!(
    err,
    rusqlite::Error::SqliteFailure(
      ffi::Error {
        code: ffi::ErrorCode::DatabaseBusy | ffi::ErrorCode::DatabaseLocked,
        ..
      },
      _,
    )
  );
}

#[derive(Clone)]
pub struct Worker {
  name: String,
  db: Database,
  lock: WriteLock,
  policy: RetryPolicy,
}

impl Worker {
  pub fn new(name: impl Into<String>, db: Database, lock: WriteLock, policy: RetryPolicy) -> Self {
    return Self {
      name: name.into(),
      db,
      lock,
      policy,
    };
  }

  pub fn name(&self) -> &str {
    return &self.name;
  }

  /// Writes `record` on a dedicated connection, retrying busy attempts up to
  /// the policy budget. The connection is closed on every path.
  pub fn insert<R: Record>(&self, record: &R) -> Result<Receipt, InsertError> {
    tracing::info!(worker = %self.name, %record, "insert called");

    let mut conn = self.db.open().map_err(|err| {
      tracing::error!(worker = %self.name, %err, "failed to open connection");
      return InsertError::Open(err);
    })?;
    let result = self.insert_with_retry(&mut conn, record);
    self.db.close(conn);
    return result;
  }

  fn insert_with_retry<R: Record>(
    &self,
    conn: &mut Connection,
    record: &R,
  ) -> Result<Receipt, InsertError> {
    let mut retries_left = self.policy.budget;
    let mut attempts = 0;

    while retries_left > 0 {
      attempts += 1;
      match self.attempt(conn, record) {
        Ok(row_id) => {
          return Ok(Receipt {
            row_id,
            attempts,
            retries_left,
          });
        }
        Err(err) if is_contention(&err) => {
          retries_left -= 1;
          tracing::warn!(worker = %self.name, %err, retries_left, "database is locked, retrying");
          if retries_left > 0 {
            std::thread::sleep(self.policy.backoff);
          }
        }
        Err(err) => {
          tracing::error!(worker = %self.name, %record, %err, "error while inserting");
          return Err(InsertError::Storage {
            attempts,
            source: err,
          });
        }
      }
    }

    tracing::warn!(worker = %self.name, %record, attempts, "retry budget exhausted");
    return Err(InsertError::RetriesExhausted { attempts });
  }

  /// One locked execute, hold, commit cycle. Dropping an uncommitted
  /// transaction rolls it back.
  fn attempt<R: Record>(&self, conn: &mut Connection, record: &R) -> rusqlite::Result<i64> {
    let _guard = self.lock.acquire();

    let tx = conn.transaction()?;
    let row_id = record.insert(&tx)?;
    tracing::debug!(worker = %self.name, %record, "getting ready to insert");

    std::thread::sleep(self.policy.hold);

    tx.commit()?;
    tracing::debug!(worker = %self.name, %record, row_id, "added");
    return Ok(row_id);
  }
}
