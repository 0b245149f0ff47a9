use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use glossa_config::Config;
use glossa_config::aggregation::AggregationConfig;
use glossa_config::{GroupingKind, OrderingKind};
use glossa_engine::EngineRegistry;
use glossa_types::{BilingualEntry, DictionaryObject, MonolingualEntry};
use tokio_util::sync::CancellationToken;

use crate::aggregation::order::order_monolingual;
use crate::aggregation::{
    ConsolidatedGrouping, DictionaryGrouping, EntryTypeGrouping, GroupingStrategy, MergeService,
    OrderStrategy, PassThroughOrder, RelevanceOrder, RelevanceScorer, ResultGroup,
};
use crate::collect::CollectedResults;
use crate::error::PipelineError;
use crate::execute::{self, ExecutionStrategy, StepResultCache};
use crate::normalize::NormalizerSet;
use crate::query::{QueryPlanner, QueryRequest, QueryRequestBuilder, SimpleQueryPlanner};
use crate::response::{PerformanceStatistics, QueryResponse, ResponseAssembler};

/// Every strategy the service may use, resolved once at startup
#[derive(Clone)]
pub struct Pipeline {
    planner: Arc<dyn QueryPlanner>,
    executor: Arc<dyn ExecutionStrategy>,
    groupings: HashMap<GroupingKind, Arc<dyn GroupingStrategy>>,
    orderings: HashMap<OrderingKind, Arc<dyn OrderStrategy>>,
    merger: MergeService,
    scorer: RelevanceScorer,
    assembler: ResponseAssembler,
}

impl Pipeline {
    pub fn from_config(
        config: &Config,
        normalizers: Arc<NormalizerSet>,
        cache: Arc<StepResultCache>,
    ) -> Self {
        let scorer = RelevanceScorer::new(normalizers.clone());

        let mut groupings: HashMap<GroupingKind, Arc<dyn GroupingStrategy>> = HashMap::new();
        groupings.insert(GroupingKind::ByDictionary, Arc::new(DictionaryGrouping));
        groupings.insert(GroupingKind::Consolidated, Arc::new(ConsolidatedGrouping));
        groupings.insert(GroupingKind::EntryType, Arc::new(EntryTypeGrouping));

        let mut orderings: HashMap<OrderingKind, Arc<dyn OrderStrategy>> = HashMap::new();
        orderings.insert(
            OrderingKind::Relevance,
            Arc::new(RelevanceOrder::new(scorer.clone())),
        );
        orderings.insert(
            OrderingKind::PassThrough,
            Arc::new(PassThroughOrder::new(scorer.clone())),
        );

        tracing::info!(
            "Pipeline uses {} execution (timeout {:?}, cache capacity {:?})",
            config.executor.execution,
            config.executor.step_timeout(),
            config.executor.cache_capacity
        );

        Self {
            planner: Arc::new(SimpleQueryPlanner),
            executor: execute::from_config(&config.executor, cache),
            groupings,
            orderings,
            merger: MergeService::with_defaults(normalizers),
            scorer,
            assembler: ResponseAssembler,
        }
    }

    pub fn with_executor(mut self, executor: Arc<dyn ExecutionStrategy>) -> Self {
        self.executor = executor;
        self
    }

    pub fn with_planner(mut self, planner: Arc<dyn QueryPlanner>) -> Self {
        self.planner = planner;
        self
    }

    pub fn with_merge_service(mut self, merger: MergeService) -> Self {
        self.merger = merger;
        self
    }

    fn grouping(&self, kind: GroupingKind) -> Result<&dyn GroupingStrategy, PipelineError> {
        self.groupings
            .get(&kind)
            .map(|g| g.as_ref())
            .ok_or_else(|| PipelineError::MissingStrategy {
                stage: "grouping",
                kind: kind.to_string(),
            })
    }

    fn ordering(&self, kind: OrderingKind) -> Result<&dyn OrderStrategy, PipelineError> {
        self.orderings
            .get(&kind)
            .map(|o| o.as_ref())
            .ok_or_else(|| PipelineError::MissingStrategy {
                stage: "ordering",
                kind: kind.to_string(),
            })
    }
}

/// Entry point of the aggregation pipeline
pub struct QueryService {
    registry: Arc<EngineRegistry>,
    pipeline: Pipeline,
    defaults: AggregationConfig,
}

impl QueryService {
    pub fn new(registry: Arc<EngineRegistry>, pipeline: Pipeline, defaults: AggregationConfig) -> Self {
        Self {
            registry,
            pipeline,
            defaults,
        }
    }

    /// Builder with grouping and ordering taken from configuration
    pub fn request(&self, query: impl Into<String>) -> QueryRequestBuilder {
        QueryRequest::builder(query).defaults(&self.defaults)
    }

    pub fn registry(&self) -> &Arc<EngineRegistry> {
        &self.registry
    }

    pub async fn plan_and_execute(&self, request: &QueryRequest) -> Result<QueryResponse, PipelineError> {
        self.plan_and_execute_with_cancel(request, &CancellationToken::new())
            .await
    }

    /// Engine calls still in flight when `cancel` fires are aborted and
    /// reported as failed steps
    pub async fn plan_and_execute_with_cancel(
        &self,
        request: &QueryRequest,
        cancel: &CancellationToken,
    ) -> Result<QueryResponse, PipelineError> {
        let started = Instant::now();
        let mut statistics = PerformanceStatistics::default();
        let pipeline = &self.pipeline;

        tracing::info!(
            "Query '{}' for dictionaries [{}] and languages [{}]",
            request.query(),
            join(request.dictionaries()),
            join(request.languages())
        );

        let (plan, elapsed) = timed(|| pipeline.planner.plan(request, &self.registry));
        statistics.planning = elapsed;

        let phase = Instant::now();
        let results = pipeline.executor.execute(&plan, cancel).await;
        statistics.query = phase.elapsed();
        if results.len() != plan.len() {
            return Err(PipelineError::ResultCountMismatch {
                expected: plan.len(),
                actual: results.len(),
            });
        }

        let (collected, elapsed) = timed(|| CollectedResults::collect(&results));
        statistics.collect = elapsed;

        let grouping = pipeline.grouping(request.grouping())?;
        let (groups, elapsed) = timed(|| grouping.group(request, &results));
        statistics.group = elapsed;

        let phase = Instant::now();
        let groups = groups
            .into_iter()
            .map(|group| -> Result<ResultGroup<BilingualEntry>, PipelineError> {
                let ResultGroup {
                    key,
                    title,
                    entries,
                } = group;
                let entries = pipeline.merger.merge::<BilingualEntry>(entries)?;
                Ok(ResultGroup::new(key, title).with_entries(entries))
            })
            .collect::<Result<Vec<_>, PipelineError>>()?;
        let collected = CollectedResults {
            monolingual_entries: pipeline
                .merger
                .merge::<MonolingualEntry>(collected.monolingual_entries)?,
            similar_recommendations: pipeline
                .merger
                .merge::<DictionaryObject>(collected.similar_recommendations)?,
            ..collected
        };
        statistics.merge = phase.elapsed();

        let ordering = pipeline.ordering(request.ordering())?;
        let phase = Instant::now();
        let groups = ordering.order(request.query(), groups);
        let collected = match request.ordering() {
            OrderingKind::PassThrough => collected,
            OrderingKind::Relevance => CollectedResults {
                monolingual_entries: order_monolingual(
                    &pipeline.scorer,
                    request.query(),
                    collected.monolingual_entries,
                ),
                ..collected
            },
        };
        statistics.order = phase.elapsed();

        statistics.total = started.elapsed();
        let response = pipeline.assembler.assemble(
            request.query(),
            groups,
            collected,
            plan.unmatched(),
            &results,
            statistics,
        );

        let failed = response.statistics.failed_steps().count();
        tracing::info!(
            "Query '{}' answered in {:?}: {} steps, {} failed",
            request.query(),
            response.statistics.total,
            results.len(),
            failed
        );
        Ok(response)
    }

    /// Never fails: pipeline defects become an internal-error response
    pub async fn respond(&self, request: &QueryRequest) -> QueryResponse {
        self.respond_with_cancel(request, &CancellationToken::new())
            .await
    }

    pub async fn respond_with_cancel(
        &self,
        request: &QueryRequest,
        cancel: &CancellationToken,
    ) -> QueryResponse {
        match self.plan_and_execute_with_cancel(request, cancel).await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!("Query '{}' failed: {}", request.query(), e);
                QueryResponse::internal_error(request.query(), e.to_string())
            }
        }
    }

    /// Parse raw request parameters; malformed input yields a
    /// malformed-query response without running the pipeline
    pub async fn respond_raw(&self, query: &str, dictionaries: &str, languages: &str) -> QueryResponse {
        self.respond_raw_with_cancel(query, dictionaries, languages, &CancellationToken::new())
            .await
    }

    pub async fn respond_raw_with_cancel(
        &self,
        query: &str,
        dictionaries: &str,
        languages: &str,
        cancel: &CancellationToken,
    ) -> QueryResponse {
        match QueryRequest::parse(query, dictionaries, languages, &self.defaults) {
            Ok(request) => self.respond_with_cancel(&request, cancel).await,
            Err(e) => {
                tracing::warn!("Rejected malformed query '{}': {}", query, e);
                QueryResponse::malformed(query.trim(), e.to_string())
            }
        }
    }
}

fn timed<T>(f: impl FnOnce() -> T) -> (T, Duration) {
    let started = Instant::now();
    let value = f();
    (value, started.elapsed())
}

fn join<T: ToString>(items: &[T]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
