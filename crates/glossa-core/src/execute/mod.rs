use std::sync::Arc;

use glossa_config::ExecutionKind;
use glossa_config::executor::ExecutorConfig;
use tokio_util::sync::CancellationToken;

use crate::query::QueryPlan;

pub mod cache;
pub mod concurrent;
pub mod linear;
pub mod result;
pub mod runner;

pub use cache::StepResultCache;
pub use concurrent::ConcurrentExecutor;
pub use linear::LinearExecutor;
pub use result::QueryStepResult;
pub use runner::StepRunner;

/// Runs a plan. Returns exactly one result per step, in plan order, and
/// never fails as a whole.
#[async_trait::async_trait]
pub trait ExecutionStrategy: Send + Sync {
    async fn execute(&self, plan: &QueryPlan, cancel: &CancellationToken) -> Vec<QueryStepResult>;
}

pub fn from_config(config: &ExecutorConfig, cache: Arc<StepResultCache>) -> Arc<dyn ExecutionStrategy> {
    let runner = StepRunner::new(cache, config.step_timeout());

    match config.execution {
        ExecutionKind::Linear => Arc::new(LinearExecutor::new(runner)),
        ExecutionKind::Concurrent => {
            Arc::new(ConcurrentExecutor::new(runner, config.max_concurrency))
        }
    }
}
