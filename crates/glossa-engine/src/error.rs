use std::time::Duration;

use glossa_types::EngineQueryResult;

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("Backend error: {0}")]
    Backend(String),

    #[error("Engine timed out after {0:?}")]
    Timeout(Duration),

    #[error("Engine does not support {capability}")]
    Unsupported { capability: &'static str },

    #[error("Engine returned an empty result")]
    EmptyResult,

    /// The engine failed half way but could still hand back what it had
    #[error("Partial result: {reason}")]
    Partial {
        reason: String,
        partial: Box<EngineQueryResult>,
    },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl EngineError {
    /// Whatever the engine managed to return before failing
    pub fn into_partial(self) -> Option<EngineQueryResult> {
        match self {
            EngineError::Partial { partial, .. } => Some(*partial),
            _ => None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("Engine name must not be empty")]
    EmptyName,

    #[error("An engine named {0} is already registered")]
    DuplicateEngine(String),

    #[error("Engine {engine} declares dictionary {dictionary} with identical languages")]
    InvalidDictionary { engine: String, dictionary: String },
}
