use glossa_types::{EntryType, Language};

#[derive(Debug, thiserror::Error)]
pub enum NormalizerError {
    #[error("A normalizer for {language} / {entry_type} is already registered")]
    Duplicate {
        language: Language,
        entry_type: EntryType,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum MergeError {
    #[error("A merger for {0} is already registered")]
    DuplicateMerger(&'static str),

    #[error("Merger {merger} produced {output} entries from {input}")]
    CardinalityViolation {
        merger: &'static str,
        input: usize,
        output: usize,
    },
}

/// Defects inside the pipeline. Engine failures never end up here.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Merge stage failed: {0}")]
    Merge(#[from] MergeError),

    #[error("Step executor returned {actual} results for {expected} steps")]
    ResultCountMismatch { expected: usize, actual: usize },

    #[error("No {stage} strategy registered for {kind}")]
    MissingStrategy { stage: &'static str, kind: String },
}

/// Reasons a request never reaches the planner
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RequestError {
    #[error("Query string must not be empty")]
    EmptyQuery,

    #[error(transparent)]
    Parse(#[from] glossa_types::ParseError),
}
