use futures::StreamExt;
use tokio_util::sync::CancellationToken;

use super::ExecutionStrategy;
use super::result::QueryStepResult;
use super::runner::StepRunner;
use crate::query::QueryPlan;

/// Runs up to `max_concurrency` steps at once. Results keep plan order.
#[derive(Debug, Clone)]
pub struct ConcurrentExecutor {
    runner: StepRunner,
    max_concurrency: usize,
}

impl ConcurrentExecutor {
    pub fn new(runner: StepRunner, max_concurrency: usize) -> Self {
        Self {
            runner,
            max_concurrency: max_concurrency.max(1),
        }
    }
}

#[async_trait::async_trait]
impl ExecutionStrategy for ConcurrentExecutor {
    async fn execute(&self, plan: &QueryPlan, cancel: &CancellationToken) -> Vec<QueryStepResult> {
        // futures are created up front but only polled once `buffered` admits them
        let pending: Vec<_> = plan
            .steps()
            .iter()
            .map(|step| self.runner.run(step, cancel))
            .collect();

        futures::stream::iter(pending)
            .buffered(self.max_concurrency)
            .collect()
            .await
    }
}
