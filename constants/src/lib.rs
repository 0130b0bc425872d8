use std::time::Duration;

pub const DB_NAME: &str = "shared.db";

/// How long a worker sits on the shared lock between executing its insert
/// and committing it.
pub const PETS_HOLD: Duration = Duration::from_secs(3);
pub const CUSTOMERS_HOLD: Duration = Duration::from_secs(1);

pub const RETRY_BUDGET: u32 = 3;
pub const RETRY_BACKOFF: Duration = Duration::from_millis(100);

pub const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

pub const CSV_FILE: &str = "customers-100.csv";
pub const CSV_ROW_LIMIT: usize = 12;

pub const CUSTOMERS_LOG_FILE: &str = "customers.log";

pub const PRAGMAS: &str = r#"
    PRAGMA synchronous        = NORMAL;
    PRAGMA temp_store         = MEMORY;
    PRAGMA cache_size         = -16000;
"#;

pub const PETS_TABLE: &str = "pets";
pub const PETS_COLUMNS: &str = "id INTEGER PRIMARY KEY, name TEXT, breed TEXT";
pub const INSERT_PET_QUERY: &str = "INSERT INTO pets (name, breed) VALUES ($1, $2)";
pub const SELECT_PETS_QUERY: &str = "SELECT name, breed FROM pets ORDER BY id";

pub const CUSTOMERS_TABLE: &str = "customers";
pub const CUSTOMERS_COLUMNS: &str =
  "id INTEGER PRIMARY KEY, first_name TEXT, last_name TEXT, city TEXT, country TEXT";
pub const INSERT_CUSTOMER_QUERY: &str =
  "INSERT INTO customers (first_name, last_name, city, country) VALUES ($1, $2, $3, $4)";
pub const SELECT_CUSTOMERS_QUERY: &str =
  "SELECT first_name, last_name, city, country FROM customers ORDER BY id";

pub const DIVIDER: &str =
  "======================================================================";

pub const SUCCESS_MESSAGE: &str = r#"
SUCCESS: All workers successfully completed!

Now increase the hold duration (the time a worker keeps the
database tied up during an insert).
How well do concurrent workers share a database when each
insert takes more time?
How can several workers share a resource without interfering
with each other?
"#;
