use constants::*;
use rusqlite::Connection;
use serde::Deserialize;
use std::fmt;

/// Table name plus the column definitions used to create it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Schema {
  pub table: &'static str,
  pub columns: &'static str,
}

impl Schema {
  pub fn drop_sql(&self) -> String {
    return format!("DROP TABLE IF EXISTS {}", self.table);
  }

  pub fn create_sql(&self) -> String {
    return format!("CREATE TABLE {} ({})", self.table, self.columns);
  }

  pub fn count_sql(&self) -> String {
    return format!("SELECT COUNT(*) FROM {}", self.table);
  }
}

/// A row that knows which table it belongs to and how to write itself.
pub trait Record: fmt::Display {
  const SCHEMA: Schema;

  /// Executes the insert on `conn` and returns the engine-assigned row id.
  /// Called inside an open transaction; committing is up to the caller.
  fn insert(&self, conn: &Connection) -> rusqlite::Result<i64>;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pet {
  pub name: String,
  pub breed: String,
}

impl Pet {
  pub fn new(name: impl Into<String>, breed: impl Into<String>) -> Self {
    return Self {
      name: name.into(),
      breed: breed.into(),
    };
  }

  pub fn load_all(conn: &Connection) -> rusqlite::Result<Vec<Pet>> {
    let mut stmt = conn.prepare_cached(SELECT_PETS_QUERY)?;
    let rows = stmt.query_map((), |row| {
      return Ok(Pet {
        name: row.get(0)?,
        breed: row.get(1)?,
      });
    })?;
    return rows.collect();
  }
}

impl Record for Pet {
  const SCHEMA: Schema = Schema {
    table: PETS_TABLE,
    columns: PETS_COLUMNS,
  };

  fn insert(&self, conn: &Connection) -> rusqlite::Result<i64> {
    let mut stmt = conn.prepare_cached(INSERT_PET_QUERY)?;
    stmt.execute((&self.name, &self.breed))?;
    return Ok(conn.last_insert_rowid());
  }
}

impl fmt::Display for Pet {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} the {}", self.name, self.breed)
  }
}

/// A customer row, deserialized from the header names used by the sample CSV.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Customer {
  #[serde(rename = "First Name")]
  pub first_name: String,
  #[serde(rename = "Last Name")]
  pub last_name: String,
  #[serde(rename = "City")]
  pub city: String,
  #[serde(rename = "Country")]
  pub country: String,
}

impl Customer {
  pub fn load_all(conn: &Connection) -> rusqlite::Result<Vec<Customer>> {
    let mut stmt = conn.prepare_cached(SELECT_CUSTOMERS_QUERY)?;
    let rows = stmt.query_map((), |row| {
      return Ok(Customer {
        first_name: row.get(0)?,
        last_name: row.get(1)?,
        city: row.get(2)?,
        country: row.get(3)?,
      });
    })?;
    return rows.collect();
  }
}

impl Record for Customer {
  const SCHEMA: Schema = Schema {
    table: CUSTOMERS_TABLE,
    columns: CUSTOMERS_COLUMNS,
  };

  fn insert(&self, conn: &Connection) -> rusqlite::Result<i64> {
    let mut stmt = conn.prepare_cached(INSERT_CUSTOMER_QUERY)?;
    stmt.execute((
      &self.first_name,
      &self.last_name,
      &self.city,
      &self.country,
    ))?;
    return Ok(conn.last_insert_rowid());
  }
}

impl fmt::Display for Customer {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "{} {} from {}, {}",
      self.first_name, self.last_name, self.city, self.country
    )
  }
}
