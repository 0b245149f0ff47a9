pub mod aggregation;
pub mod collect;
pub mod error;
pub mod execute;
pub mod normalize;
pub mod preprocess;
pub mod query;
pub mod response;
pub mod service;

pub use error::{MergeError, NormalizerError, PipelineError, RequestError};
pub use execute::{ExecutionStrategy, QueryStepResult, StepResultCache};
pub use normalize::{Normalizer, NormalizerSet};
pub use query::{QueryPlan, QueryRequest, QueryStep};
pub use response::{QueryResponse, QueryStatus};
pub use service::{Pipeline, QueryService};

#[cfg(test)]
mod tests;
