use std::time::Duration;

use constants::{RETRY_BACKOFF, RETRY_BUDGET};

/// How a [`crate::Worker`] paces and retries a single insert.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
  /// Maximum number of attempts, each one decremented by a busy error.
  pub budget: u32,
  /// Time spent holding the write lock between execute and commit.
  pub hold: Duration,
  /// Pause outside the lock before retrying a busy attempt.
  pub backoff: Duration,
}

impl RetryPolicy {
  pub fn new(hold: Duration) -> Self {
    return Self {
      budget: RETRY_BUDGET,
      hold,
      backoff: RETRY_BACKOFF,
    };
  }

  pub fn with_budget(mut self, budget: u32) -> Self {
    self.budget = budget;
    return self;
  }

  pub fn with_backoff(mut self, backoff: Duration) -> Self {
    self.backoff = backoff;
    return self;
  }
}

impl Default for RetryPolicy {
  fn default() -> Self {
    return Self::new(constants::PETS_HOLD);
  }
}
