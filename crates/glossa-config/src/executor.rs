use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// How the steps of one plan are dispatched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExecutionKind {
    /// One step after another, in plan order
    #[default]
    Linear,
    /// Bounded fan-out, results still reported in plan order
    Concurrent,
}

impl FromStr for ExecutionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "linear" => Ok(ExecutionKind::Linear),
            "concurrent" => Ok(ExecutionKind::Concurrent),
            other => Err(format!("unknown execution strategy: {other}")),
        }
    }
}

impl fmt::Display for ExecutionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecutionKind::Linear => f.write_str("linear"),
            ExecutionKind::Concurrent => f.write_str("concurrent"),
        }
    }
}

fn default_execution() -> ExecutionKind {
    ExecutionKind::Linear
}

fn default_max_concurrency() -> usize {
    4
}

fn default_step_timeout_ms() -> u64 {
    10_000
}

fn default_cache_capacity() -> Option<usize> {
    Some(8192)
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct ExecutorConfig {
    #[serde(default = "default_execution")]
    pub execution: ExecutionKind,
    /// Upper bound of in-flight engine calls per plan, only used by concurrent execution
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,
    #[serde(default = "default_step_timeout_ms")]
    pub step_timeout_ms: u64,
    /// `None` keeps every successful result for the lifetime of the process
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: Option<usize>,
    pub cache_ttl_seconds: Option<u64>,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            execution: default_execution(),
            max_concurrency: default_max_concurrency(),
            step_timeout_ms: default_step_timeout_ms(),
            cache_capacity: default_cache_capacity(),
            cache_ttl_seconds: None,
        }
    }
}

impl ExecutorConfig {
    pub fn new() -> Self {
        let execution = env::var("GLOSSA_EXECUTION")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_execution);

        let max_concurrency = env::var("GLOSSA_MAX_CONCURRENCY")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|v: &usize| *v > 0)
            .unwrap_or_else(default_max_concurrency);

        let step_timeout_ms = env::var("GLOSSA_STEP_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_step_timeout_ms);

        // 0 disables the bound
        let cache_capacity = env::var("GLOSSA_CACHE_CAPACITY")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .map(|v| (v > 0).then_some(v))
            .unwrap_or_else(default_cache_capacity);

        let cache_ttl_seconds = env::var("GLOSSA_CACHE_TTL_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok());

        Self {
            execution,
            max_concurrency,
            step_timeout_ms,
            cache_capacity,
            cache_ttl_seconds,
        }
    }

    pub fn step_timeout(&self) -> Duration {
        Duration::from_millis(self.step_timeout_ms)
    }

    pub fn cache_ttl(&self) -> Option<Duration> {
        self.cache_ttl_seconds.map(Duration::from_secs)
    }
}
