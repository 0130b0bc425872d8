use clap::Parser;
use constants::*;
use shared_db::logging::{self, LogTarget};
use shared_db::runner::{self, Summary};
use shared_db::{csv_source, table};
use shared_db::{Customer, Database, Record, RetryPolicy, Worker, WriteLock};
use std::path::PathBuf;
use std::time::{Duration, Instant};

const NAME: &str = "customers";

/// Streams the first rows of a customer CSV into a shared database through a
/// single worker.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
  /// Database file shared by all workers
  #[arg(long, default_value = DB_NAME)]
  db: PathBuf,

  /// Source file with a header row, relative to the working directory
  #[arg(long, default_value = CSV_FILE)]
  csv: PathBuf,

  /// Maximum number of source rows consumed
  #[arg(long, default_value_t = CSV_ROW_LIMIT)]
  limit: usize,

  /// Milliseconds each insert holds the write lock before committing
  #[arg(long, default_value_t = CUSTOMERS_HOLD.as_millis() as u64)]
  hold_ms: u64,

  /// Log file, appended to
  #[arg(long, default_value = CUSTOMERS_LOG_FILE)]
  log_file: PathBuf,

  /// Log to stdout instead of the log file
  #[arg(long)]
  stdout: bool,
}

fn main() -> anyhow::Result<()> {
  let args = Args::parse();

  let target = if args.stdout {
    LogTarget::Stdout
  } else {
    LogTarget::File(args.log_file.clone())
  };
  logging::init(&target)?;

  let db = Database::new(&args.db);
  logging::log_banner(NAME, env!("CARGO_PKG_VERSION"), &db);

  let policy = RetryPolicy::new(Duration::from_millis(args.hold_ms));
  let start = Instant::now();
  let summary = run(&args, &db, policy)?;
  let elapsed = Instant::now() - start;

  let count = table::count(&db, &Customer::SCHEMA)?;
  tracing::info!(?summary, "[{NAME}] Inserted {count} rows in {elapsed:?}");

  if policy.hold.is_zero() && summary.is_clean() {
    tracing::info!("{SUCCESS_MESSAGE}");
  }
  return Ok(());
}

/// Opens the source before touching the table, so a missing input leaves the
/// previous run's rows in place.
fn run(args: &Args, db: &Database, policy: RetryPolicy) -> anyhow::Result<Summary> {
  let rows = csv_source::stream::<Customer>(&args.csv, args.limit)?;

  table::recreate(db, &Customer::SCHEMA)?;

  let worker = Worker::new("CSV", db.clone(), WriteLock::new(), policy);
  let handle = runner::spawn(worker, move |w| {
    let mut summary = Summary::default();
    for (idx, row) in rows.enumerate() {
      let _span = tracing::info_span!("csv", row = idx + 1).entered();
      match row {
        Ok(customer) => summary.record(&w.insert(&customer)),
        Err(err) => tracing::error!(%err, "skipping row"),
      }
    }
    return summary;
  });
  return Ok(runner::join_all([handle]));
}
