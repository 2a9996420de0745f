use super::ResolveTargetUseCase;
use crate::ports::TargetSource;
use resolve_domain::DomainError;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::{JoinError, JoinSet};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchSummary {
    pub dispatched: u64,
}

/// Pulls targets from a source and runs one lookup task per target, never
/// more than `max_concurrency` at once.
pub struct DispatchTargetsUseCase {
    resolve_target: Arc<ResolveTargetUseCase>,
    max_concurrency: usize,
}

impl DispatchTargetsUseCase {
    pub fn new(resolve_target: Arc<ResolveTargetUseCase>, max_concurrency: usize) -> Self {
        Self {
            resolve_target,
            max_concurrency: max_concurrency.max(1),
        }
    }

    /// Runs until the source is exhausted and every task has finished.
    ///
    /// A permit is taken before the next target is read, so a streaming
    /// source is never read further ahead than the free capacity. A source
    /// error returns immediately; dropping the join set aborts in-flight tasks.
    pub async fn execute(
        &self,
        source: &mut dyn TargetSource,
    ) -> Result<DispatchSummary, DomainError> {
        let permits = Arc::new(Semaphore::new(self.max_concurrency));
        let mut tasks = JoinSet::new();
        let mut summary = DispatchSummary::default();

        debug!(
            source = source.describe(),
            max_concurrency = self.max_concurrency,
            "Dispatching targets"
        );

        loop {
            let permit = Arc::clone(&permits)
                .acquire_owned()
                .await
                .map_err(|e| DomainError::TaskFailed(e.to_string()))?;

            let Some(target) = source.next_target().await? else {
                break;
            };

            let resolve_target = Arc::clone(&self.resolve_target);
            tasks.spawn(async move {
                resolve_target.execute(&target).await;
                drop(permit);
            });
            summary.dispatched += 1;

            while let Some(finished) = tasks.try_join_next() {
                finished.map_err(task_failed)?;
            }
        }

        while let Some(finished) = tasks.join_next().await {
            finished.map_err(task_failed)?;
        }

        info!(dispatched = summary.dispatched, "All lookups finished");
        Ok(summary)
    }
}

fn task_failed(e: JoinError) -> DomainError {
    DomainError::TaskFailed(e.to_string())
}
