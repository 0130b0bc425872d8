use shared_db::runner::{self, Summary};
use shared_db::{csv_source, table};
use shared_db::{Customer, Database, InsertError, Pet, Record, RetryPolicy, Worker, WriteLock};
use std::io::Write;
use std::time::{Duration, Instant};

fn scratch(name: &str) -> (tempfile::TempDir, Database) {
  let tmp_dir = tempfile::TempDir::new().unwrap();
  let db = Database::new(tmp_dir.path().join(format!("{name}.sqlite")));
  return (tmp_dir, db);
}

#[test]
fn shared_lock_serializes_workers() {
  const WORKERS: usize = 3;
  const HOLD: Duration = Duration::from_millis(60);

  let (_tmp_dir, db) = scratch("serialize");
  table::recreate(&db, &Pet::SCHEMA).unwrap();

  let lock = WriteLock::new();
  let policy = RetryPolicy::new(HOLD);

  let start = Instant::now();
  let handles: Vec<_> = (0..WORKERS)
    .map(|task| {
      let worker = Worker::new(format!("P{}", task + 1), db.clone(), lock.clone(), policy);
      runner::spawn(worker, move |w| {
        let pet = Pet::new(format!("pet-{task}"), "Dog");
        return runner::insert_all(w, [&pet]);
      })
    })
    .collect();
  let summary = runner::join_all(handles);
  let elapsed = Instant::now() - start;

  assert_eq!(
    summary,
    Summary {
      inserted: WORKERS,
      ..Summary::default()
    }
  );
  assert!(elapsed >= HOLD * WORKERS as u32, "{elapsed:?}");
  assert_eq!(table::count(&db, &Pet::SCHEMA).unwrap(), WORKERS as i64);
}

#[test]
fn outside_writer_exhausts_retry_budget() {
  let (_tmp_dir, db) = scratch("outside_writer");
  table::recreate(&db, &Pet::SCHEMA).unwrap();

  // A writer outside the shared lock holds RESERVED, so readers still get in
  // but every other write attempt is refused with SQLITE_BUSY.
  let blocker = db.open().unwrap();
  blocker.execute_batch("BEGIN IMMEDIATE").unwrap();

  let impatient = db.clone().with_busy_timeout(Duration::ZERO);
  let policy = RetryPolicy::new(Duration::ZERO).with_backoff(Duration::from_millis(5));
  let worker = Worker::new("P1", impatient, WriteLock::new(), policy);

  let err = worker.insert(&Pet::new("Ace", "Dog")).unwrap_err();
  assert!(
    matches!(err, InsertError::RetriesExhausted { attempts: 3 }),
    "{err}"
  );

  blocker.execute_batch("ROLLBACK").unwrap();
  db.close(blocker);

  let receipt = worker.insert(&Pet::new("Ace", "Dog")).unwrap();
  assert_eq!(receipt.attempts, 1);
  assert_eq!(table::count(&db, &Pet::SCHEMA).unwrap(), 1);
}

#[test]
fn csv_stream_inserts_capped_rows_in_order() {
  let (tmp_dir, db) = scratch("customers");
  table::recreate(&db, &Customer::SCHEMA).unwrap();

  let csv_path = tmp_dir.path().join("customers-100.csv");
  {
    let mut file = std::fs::File::create(&csv_path).unwrap();
    writeln!(file, "Index,Customer Id,First Name,Last Name,Company,City,Country").unwrap();
    for i in 1..=100 {
      writeln!(file, "{i},ID{i:05},First{i},Last{i},Company {i},City{i},Country{i}").unwrap();
    }
  }

  let worker = Worker::new(
    "CSV",
    db.clone(),
    WriteLock::new(),
    RetryPolicy::new(Duration::ZERO),
  );
  let mut summary = Summary::default();
  for row in csv_source::stream::<Customer>(&csv_path, 12).unwrap() {
    summary.record(&worker.insert(&row.unwrap()));
  }
  assert_eq!(summary.inserted, 12);

  let conn = db.open().unwrap();
  let stored = Customer::load_all(&conn).unwrap();
  db.close(conn);

  let first_names: Vec<_> = stored.iter().map(|c| c.first_name.clone()).collect();
  let expected: Vec<_> = (1..=12).map(|i| format!("First{i}")).collect();
  assert_eq!(first_names, expected);
  assert_eq!(stored[11].country, "Country12");
}

#[test]
fn busy_commit_rolls_back_before_retrying() {
  let (_tmp_dir, db) = scratch("busy_commit");
  table::recreate(&db, &Pet::SCHEMA).unwrap();

  // An open read transaction keeps SHARED, so the worker can execute its
  // insert under RESERVED but its commit cannot escalate to EXCLUSIVE.
  let reader = db.open().unwrap();
  reader.execute_batch("BEGIN").unwrap();
  let seen: i64 = reader
    .query_row("SELECT COUNT(*) FROM pets", (), |row| row.get(0))
    .unwrap();
  assert_eq!(seen, 0);

  let impatient = db.clone().with_busy_timeout(Duration::ZERO);
  let policy = RetryPolicy::new(Duration::ZERO).with_backoff(Duration::from_millis(5));
  let worker = Worker::new("P1", impatient, WriteLock::new(), policy);

  let err = worker.insert(&Pet::new("Ace", "Dog")).unwrap_err();
  assert!(
    matches!(err, InsertError::RetriesExhausted { attempts: 3 }),
    "{err}"
  );

  reader.execute_batch("COMMIT").unwrap();
  db.close(reader);
  assert_eq!(table::count(&db, &Pet::SCHEMA).unwrap(), 0);

  let receipt = worker.insert(&Pet::new("Ace", "Dog")).unwrap();
  assert_eq!(receipt.attempts, 1);
  assert_eq!(receipt.retries_left, 3);

  let conn = db.open().unwrap();
  let stored = Pet::load_all(&conn).unwrap();
  db.close(conn);
  assert_eq!(stored, vec![Pet::new("Ace", "Dog")]);
}
