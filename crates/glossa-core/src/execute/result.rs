use std::sync::Arc;
use std::time::Duration;

use glossa_types::EngineQueryResult;

use crate::query::QueryStep;

const UNKNOWN_FAILURE: &str = "engine failed without a message";

/// Outcome of one step execution. Created once, never changed.
#[derive(Debug, Clone)]
pub struct QueryStepResult {
    step: QueryStep,
    failed: bool,
    execution_time: Duration,
    payload: Option<Arc<EngineQueryResult>>,
    error_message: Option<String>,
    from_cache: bool,
}

impl QueryStepResult {
    pub fn success(step: QueryStep, payload: Arc<EngineQueryResult>, execution_time: Duration) -> Self {
        Self {
            step,
            failed: false,
            execution_time,
            payload: Some(payload),
            error_message: None,
            from_cache: false,
        }
    }

    /// A success served from the results cache. `execution_time` is the one
    /// measured when the payload was first fetched.
    pub fn cached(step: QueryStep, payload: Arc<EngineQueryResult>, execution_time: Duration) -> Self {
        Self {
            from_cache: true,
            ..Self::success(step, payload, execution_time)
        }
    }

    pub fn failure(
        step: QueryStep,
        message: impl Into<String>,
        execution_time: Duration,
        partial: Option<EngineQueryResult>,
    ) -> Self {
        let mut message = message.into();
        if message.trim().is_empty() {
            message = UNKNOWN_FAILURE.to_string();
        }

        Self {
            step,
            failed: true,
            execution_time,
            payload: partial.map(Arc::new),
            error_message: Some(message),
            from_cache: false,
        }
    }

    pub fn step(&self) -> &QueryStep {
        &self.step
    }

    pub fn is_failed(&self) -> bool {
        self.failed
    }

    pub fn execution_time(&self) -> Duration {
        self.execution_time
    }

    /// Always present on success; on failure only if the engine handed back
    /// something before failing
    pub fn payload(&self) -> Option<&EngineQueryResult> {
        self.payload.as_deref()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn is_from_cache(&self) -> bool {
        self.from_cache
    }

    /// Payload of a successful execution, `None` for failures
    pub fn successful_payload(&self) -> Option<&EngineQueryResult> {
        if self.failed { None } else { self.payload() }
    }
}
