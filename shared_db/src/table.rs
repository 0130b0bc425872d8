//! Table lifecycle. Every call opens its own connection and closes it before
//! returning, whatever the outcome.

use crate::db::Database;
use crate::error::SetupError;
use crate::record::Schema;

/// Drops `schema.table` if present and creates it fresh.
pub fn recreate(db: &Database, schema: &Schema) -> Result<(), SetupError> {
  tracing::info!(table = schema.table, "recreating table");
  drop_table(db, schema)?;
  return create_table(db, schema);
}

pub fn drop_table(db: &Database, schema: &Schema) -> Result<(), SetupError> {
  let result = execute_batch(db, &schema.drop_sql(), |source| SetupError::Drop {
    table: schema.table,
    source,
  });

  match &result {
    Ok(()) => tracing::info!(table = schema.table, "table dropped"),
    Err(err) => tracing::error!(table = schema.table, %err, "error while dropping table"),
  }
  return result;
}

pub fn create_table(db: &Database, schema: &Schema) -> Result<(), SetupError> {
  let result = execute_batch(db, &schema.create_sql(), |source| SetupError::Create {
    table: schema.table,
    source,
  });

  match &result {
    Ok(()) => tracing::info!(table = schema.table, "table created"),
    Err(err) => tracing::error!(table = schema.table, %err, "error while creating table"),
  }
  return result;
}

pub fn count(db: &Database, schema: &Schema) -> rusqlite::Result<i64> {
  let conn = db.open()?;
  let count = conn.query_row(&schema.count_sql(), (), |row| row.get(0));
  db.close(conn);
  return count;
}

fn execute_batch(
  db: &Database,
  sql: &str,
  wrap: impl FnOnce(rusqlite::Error) -> SetupError,
) -> Result<(), SetupError> {
  let conn = db.open().map_err(|source| SetupError::Open {
    path: db.path().to_path_buf(),
    source,
  })?;
  let result = conn.execute_batch(sql).map_err(wrap);
  db.close(conn);
  return result;
}
