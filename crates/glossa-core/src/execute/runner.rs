use std::sync::Arc;
use std::time::{Duration, Instant};

use glossa_engine::EngineError;
use tokio_util::sync::CancellationToken;

use super::cache::StepResultCache;
use super::result::QueryStepResult;
use crate::query::QueryStep;

/// Executes single steps: cache lookup, engine call, failure isolation
#[derive(Debug, Clone)]
pub struct StepRunner {
    cache: Arc<StepResultCache>,
    timeout: Duration,
}

impl StepRunner {
    pub fn new(cache: Arc<StepResultCache>, timeout: Duration) -> Self {
        Self { cache, timeout }
    }

    pub fn cache(&self) -> &Arc<StepResultCache> {
        &self.cache
    }

    /// Never fails: every problem with the engine becomes a failed result
    pub async fn run(&self, step: &QueryStep, cancel: &CancellationToken) -> QueryStepResult {
        let key = step.key();

        if let Some(cached) = self.cache.get(&key) {
            tracing::debug!("Cache hit for {}", step);
            return QueryStepResult::cached(step.clone(), cached.payload, cached.execution_time);
        }
        tracing::debug!("Cache miss for {}", step);

        if cancel.is_cancelled() {
            return QueryStepResult::failure(step.clone(), "request cancelled", Duration::ZERO, None);
        }

        let started = Instant::now();
        let task_step = step.clone();
        let mut handle = tokio::spawn(async move { task_step.dispatch().await });

        let outcome = tokio::select! {
            biased;
            _ = cancel.cancelled() => None,
            joined = tokio::time::timeout(self.timeout, &mut handle) => Some(joined),
        };
        let elapsed = started.elapsed();

        let result = match outcome {
            None => {
                handle.abort();
                QueryStepResult::failure(step.clone(), "request cancelled", elapsed, None)
            }
            Some(Err(_)) => {
                handle.abort();
                let message = EngineError::Timeout(self.timeout).to_string();
                QueryStepResult::failure(step.clone(), message, elapsed, None)
            }
            Some(Ok(Err(join_error))) => {
                let message = if join_error.is_panic() {
                    "engine panicked while handling the query".to_string()
                } else {
                    format!("engine task aborted: {join_error}")
                };
                QueryStepResult::failure(step.clone(), message, elapsed, None)
            }
            Some(Ok(Ok(Err(engine_error)))) => {
                let message = engine_error.to_string();
                QueryStepResult::failure(step.clone(), message, elapsed, engine_error.into_partial())
            }
            Some(Ok(Ok(Ok(payload)))) if payload.is_empty() => {
                let message = EngineError::EmptyResult.to_string();
                QueryStepResult::failure(step.clone(), message, elapsed, None)
            }
            Some(Ok(Ok(Ok(payload)))) => {
                let payload = Arc::new(payload);
                self.cache.insert(key, payload.clone(), elapsed);
                QueryStepResult::success(step.clone(), payload, elapsed)
            }
        };

        match result.error_message() {
            Some(message) => tracing::warn!("Step {} failed after {:?}: {}", step, elapsed, message),
            None => tracing::debug!("Step {} finished in {:?}", step, elapsed),
        }
        result
    }
}
