use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::Instant;

use anyhow::{Error, Result};

use crate::error::ExtractError;

/// Run-wide cancellation signal that remembers the error which raised it.
///
/// Workers call [`FailFast::check`] before starting a file and before each
/// record. The first call to [`FailFast::fail`] wins; errors reported after
/// that, including the `Cancelled` errors of workers that noticed the signal,
/// are dropped.
#[derive(Debug, Default)]
pub struct FailFast {
    cancelled: AtomicBool,
    first_error: Mutex<Option<Error>>,
    deadline: Option<Instant>,
}

impl FailFast {
    pub fn new(deadline: Option<Instant>) -> Self {
        Self { deadline, ..Self::default() }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    /// Record `err` as the run's outcome unless an earlier error already is
    pub fn fail(&self, err: Error) {
        let mut slot = self.first_error.lock().unwrap_or_else(PoisonError::into_inner);
        if slot.is_none() {
            *slot = Some(err);
        }
        self.cancelled.store(true, Ordering::Release);
    }

    /// Cancel without a cause, e.g. on an external shutdown request
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    /// Suspension point: `Err` once the run is cancelled or past its deadline
    pub fn check(&self) -> Result<()> {
        if self.is_cancelled() {
            return Err(ExtractError::Cancelled.into());
        }

        if let Some(deadline) = self.deadline
            && Instant::now() >= deadline
        {
            self.fail(ExtractError::DeadlineExceeded.into());
            return Err(ExtractError::DeadlineExceeded.into());
        }

        Ok(())
    }

    /// The run's outcome: the first recorded error, `Cancelled` if the run was
    /// cancelled without one, `Ok` otherwise
    pub fn into_result(self) -> Result<()> {
        let first = self.first_error.into_inner().unwrap_or_else(PoisonError::into_inner);
        match first {
            Some(err) => Err(err),
            None if self.cancelled.into_inner() => Err(ExtractError::Cancelled.into()),
            None => Ok(()),
        }
    }
}
