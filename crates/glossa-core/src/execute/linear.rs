use tokio_util::sync::CancellationToken;

use super::ExecutionStrategy;
use super::result::QueryStepResult;
use super::runner::StepRunner;
use crate::query::QueryPlan;

/// Runs the steps of a plan one after another
#[derive(Debug, Clone)]
pub struct LinearExecutor {
    runner: StepRunner,
}

impl LinearExecutor {
    pub fn new(runner: StepRunner) -> Self {
        Self { runner }
    }
}

#[async_trait::async_trait]
impl ExecutionStrategy for LinearExecutor {
    async fn execute(&self, plan: &QueryPlan, cancel: &CancellationToken) -> Vec<QueryStepResult> {
        let mut results = Vec::with_capacity(plan.len());
        for step in plan.steps() {
            results.push(self.runner.run(step, cancel).await);
        }
        results
    }
}
