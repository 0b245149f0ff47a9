pub mod plan;
pub mod planner;
pub mod request;
pub mod step;

pub use plan::QueryPlan;
pub use planner::{QueryPlanner, SimpleQueryPlanner};
pub use request::{QueryRequest, QueryRequestBuilder};
pub use step::{QueryStep, StepKey, StepKind};
