//! Batch rule that closes tasks whose deadline has passed.
//!
//! The closer owns no scheduling state. An external scheduler calls
//! [`OverdueTaskCloser::run_tick`] on a fixed cadence; every call is
//! independent and safe to repeat because the repository never reselects a
//! task that already carries `closed_at`.

use crate::task::ports::{TaskRepository, TaskRepositoryResult};
use mockable::Clock;
use std::sync::Arc;
use tracing::{debug, error, info};

/// Overdue-task auto-close service.
#[derive(Clone)]
pub struct OverdueTaskCloser<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> OverdueTaskCloser<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new closer.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Closes every overdue task as of the clock's current instant.
    ///
    /// Returns the number of tasks transitioned to `done`.
    ///
    /// # Errors
    ///
    /// Returns the repository error when the batch update fails.
    pub async fn close_overdue(&self) -> TaskRepositoryResult<u64> {
        let now = self.clock.utc();
        self.repository.close_overdue(now).await
    }

    /// Runs one scheduler tick.
    ///
    /// Storage failures are logged and swallowed so the calling loop keeps
    /// running; a failed tick reports zero closed tasks.
    pub async fn run_tick(&self) -> u64 {
        match self.close_overdue().await {
            Ok(0) => {
                debug!("no overdue tasks to close");
                0
            }
            Ok(closed) => {
                info!(closed, "closed overdue tasks");
                closed
            }
            Err(err) => {
                error!(error = %err, "overdue task close failed");
                0
            }
        }
    }
}
