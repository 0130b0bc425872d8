use clap::Parser;
use constants::*;
use shared_db::logging::{self, LogTarget};
use shared_db::runner;
use shared_db::{table, Database, Pet, Record, RetryPolicy, Worker, WriteLock};
use std::path::PathBuf;
use std::time::{Duration, Instant};

const NAME: &str = "pets";

/// Three workers insert two pets each into a shared database, one insert at
/// a time.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
  /// Database file shared by all workers
  #[arg(long, default_value = DB_NAME)]
  db: PathBuf,

  /// Milliseconds each insert holds the write lock before committing
  #[arg(long, default_value_t = PETS_HOLD.as_millis() as u64)]
  hold_ms: u64,

  /// Append logs to this file instead of stdout
  #[arg(long)]
  log_file: Option<PathBuf>,
}

fn plan() -> Vec<(&'static str, Vec<Pet>)> {
  return vec![
    ("P1", vec![Pet::new("Ace", "Dog"), Pet::new("Buddy", "Dog")]),
    ("P2", vec![Pet::new("Cooper", "Rabbit"), Pet::new("Dingo", "Dog")]),
    ("P3", vec![Pet::new("Emma", "Rabbit"), Pet::new("Felix", "Cat")]),
  ];
}

fn main() -> anyhow::Result<()> {
  let args = Args::parse();

  let target = match args.log_file {
    Some(path) => LogTarget::File(path),
    None => LogTarget::Stdout,
  };
  logging::init(&target)?;

  let db = Database::new(&args.db);
  logging::log_banner(NAME, env!("CARGO_PKG_VERSION"), &db);

  table::recreate(&db, &Pet::SCHEMA)?;

  let lock = WriteLock::new();
  let policy = RetryPolicy::new(Duration::from_millis(args.hold_ms));

  let start = Instant::now();
  let handles: Vec<_> = plan()
    .into_iter()
    .map(|(name, pets)| {
      let worker = Worker::new(name, db.clone(), lock.clone(), policy);
      runner::spawn(worker, move |w| runner::insert_all(w, &pets))
    })
    .collect();
  let summary = runner::join_all(handles);
  let elapsed = Instant::now() - start;

  let count = table::count(&db, &Pet::SCHEMA)?;
  tracing::info!(?summary, "[{NAME}] Inserted {count} rows in {elapsed:?}");

  if policy.hold.is_zero() && summary.is_clean() {
    tracing::info!("{SUCCESS_MESSAGE}");
  }
  return Ok(());
}
