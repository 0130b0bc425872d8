//! One OS thread per worker; the caller waits on all of them.

use std::thread::JoinHandle;

use crate::error::InsertError;
use crate::record::Record;
use crate::worker::{Receipt, Worker};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Summary {
  pub inserted: usize,
  pub exhausted: usize,
  pub failed: usize,
  pub panicked: usize,
}

impl Summary {
  pub fn record(&mut self, outcome: &Result<Receipt, InsertError>) {
    match outcome {
      Ok(_) => self.inserted += 1,
      Err(InsertError::RetriesExhausted { .. }) => self.exhausted += 1,
      Err(_) => self.failed += 1,
    }
  }

  pub fn merge(&mut self, other: Summary) {
    self.inserted += other.inserted;
    self.exhausted += other.exhausted;
    self.failed += other.failed;
    self.panicked += other.panicked;
  }

  pub fn is_clean(&self) -> bool {
    return self.exhausted == 0 && self.failed == 0 && self.panicked == 0;
  }
}

pub struct Handle {
  name: String,
  join: JoinHandle<Summary>,
}

/// Runs `job` against `worker` on a new thread.
pub fn spawn<F>(worker: Worker, job: F) -> Handle
where
  F: FnOnce(&Worker) -> Summary + Send + 'static,
{
  let name = worker.name().to_string();
  tracing::info!(worker = %name, "starting worker");
  let join = std::thread::spawn(move || job(&worker));
  return Handle { name, join };
}

/// Waits for every handle in turn. A panicked worker is logged and counted,
/// never retried.
pub fn join_all(handles: impl IntoIterator<Item = Handle>) -> Summary {
  let mut total = Summary::default();
  for handle in handles {
    match handle.join.join() {
      Ok(summary) => {
        tracing::info!(worker = %handle.name, ?summary, "worker finished");
        total.merge(summary);
      }
      Err(_) => {
        tracing::error!(worker = %handle.name, "worker panicked");
        total.panicked += 1;
      }
    }
  }
  return total;
}

/// Inserts each record in order, tallying outcomes.
pub fn insert_all<'a, R, I>(worker: &Worker, records: I) -> Summary
where
  R: Record + 'a,
  I: IntoIterator<Item = &'a R>,
{
  let mut summary = Summary::default();
  for record in records {
    summary.record(&worker.insert(record));
  }
  return summary;
}
