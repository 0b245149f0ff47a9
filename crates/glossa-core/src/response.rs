use std::time::Duration;

use glossa_types::{DictionaryObject, ExternalContent, MonolingualEntry, SynonymEntry};
use serde::{Serialize, Serializer};
use uuid::Uuid;

use crate::aggregation::{ResultGroup, ScoredEntry};
use crate::collect::CollectedResults;
use crate::execute::QueryStepResult;

fn as_millis<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(duration.as_secs_f64() * 1000.0)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum QueryStatus {
    /// Also used when every engine failed; see the step statistics
    Ok,
    MalformedQuery { message: String },
    InternalError { message: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepStatistic {
    pub step: String,
    pub engine_name: String,
    #[serde(rename = "duration_ms", serialize_with = "as_millis")]
    pub duration: Duration,
    pub success: bool,
    pub from_cache: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<&QueryStepResult> for StepStatistic {
    fn from(result: &QueryStepResult) -> Self {
        Self {
            step: result.step().to_string(),
            engine_name: result.step().engine_name().to_string(),
            duration: result.execution_time(),
            success: !result.is_failed(),
            from_cache: result.is_from_cache(),
            error: result.error_message().map(str::to_string),
        }
    }
}

/// Wall time of each pipeline phase
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PerformanceStatistics {
    #[serde(rename = "planning_ms", serialize_with = "as_millis")]
    pub planning: Duration,
    #[serde(rename = "query_ms", serialize_with = "as_millis")]
    pub query: Duration,
    #[serde(rename = "collect_ms", serialize_with = "as_millis")]
    pub collect: Duration,
    #[serde(rename = "group_ms", serialize_with = "as_millis")]
    pub group: Duration,
    #[serde(rename = "merge_ms", serialize_with = "as_millis")]
    pub merge: Duration,
    #[serde(rename = "order_ms", serialize_with = "as_millis")]
    pub order: Duration,
    #[serde(rename = "total_ms", serialize_with = "as_millis")]
    pub total: Duration,
    pub steps: Vec<StepStatistic>,
}

impl PerformanceStatistics {
    pub fn failed_steps(&self) -> impl Iterator<Item = &StepStatistic> {
        self.steps.iter().filter(|s| !s.success)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryResponse {
    pub request_id: Uuid,
    pub query: String,
    #[serde(flatten)]
    pub status: QueryStatus,
    pub groups: Vec<ResultGroup<ScoredEntry>>,
    pub monolingual_entries: Vec<MonolingualEntry>,
    pub similar_recommendations: Vec<DictionaryObject>,
    pub external_contents: Vec<ExternalContent>,
    pub synonym_entries: Vec<SynonymEntry>,
    pub notices: Vec<String>,
    pub statistics: PerformanceStatistics,
}

impl QueryResponse {
    fn empty(query: impl Into<String>, status: QueryStatus) -> Self {
        Self {
            request_id: Uuid::new_v4(),
            query: query.into(),
            status,
            groups: Vec::new(),
            monolingual_entries: Vec::new(),
            similar_recommendations: Vec::new(),
            external_contents: Vec::new(),
            synonym_entries: Vec::new(),
            notices: Vec::new(),
            statistics: PerformanceStatistics::default(),
        }
    }

    /// The request was rejected before planning
    pub fn malformed(query: impl Into<String>, message: impl Into<String>) -> Self {
        Self::empty(
            query,
            QueryStatus::MalformedQuery {
                message: message.into(),
            },
        )
    }

    /// A pipeline stage broke its contract
    pub fn internal_error(query: impl Into<String>, message: impl Into<String>) -> Self {
        Self::empty(
            query,
            QueryStatus::InternalError {
                message: message.into(),
            },
        )
    }

    pub fn is_ok(&self) -> bool {
        self.status == QueryStatus::Ok
    }
}

/// Builds the final response from the outputs of every stage
#[derive(Debug, Default, Clone, Copy)]
pub struct ResponseAssembler;

impl ResponseAssembler {
    pub fn assemble(
        &self,
        query: &str,
        groups: Vec<ResultGroup<ScoredEntry>>,
        collected: CollectedResults,
        unmatched: &[String],
        results: &[QueryStepResult],
        mut statistics: PerformanceStatistics,
    ) -> QueryResponse {
        statistics.steps = results.iter().map(StepStatistic::from).collect();

        let notices = unmatched
            .iter()
            .map(|requested| format!("no matching engines for {requested}"))
            .collect();

        QueryResponse {
            groups,
            monolingual_entries: collected.monolingual_entries,
            similar_recommendations: collected.similar_recommendations,
            external_contents: collected.external_contents,
            synonym_entries: collected.synonym_entries,
            notices,
            statistics,
            ..QueryResponse::empty(query, QueryStatus::Ok)
        }
    }
}
