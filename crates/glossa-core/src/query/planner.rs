use glossa_engine::EngineRegistry;

use super::plan::QueryPlan;
use super::request::QueryRequest;
use super::step::QueryStep;

/// Turns a request into the steps that have to be dispatched
pub trait QueryPlanner: Send + Sync {
    /// Must not perform I/O or touch the registry beyond lookups
    fn plan(&self, request: &QueryRequest, registry: &EngineRegistry) -> QueryPlan;
}

/// One step per (requested dictionary or language, supporting engine)
#[derive(Debug, Default, Clone, Copy)]
pub struct SimpleQueryPlanner;

impl QueryPlanner for SimpleQueryPlanner {
    fn plan(&self, request: &QueryRequest, registry: &EngineRegistry) -> QueryPlan {
        let mut plan = QueryPlan::new();

        for dictionary in request.dictionaries() {
            let engines = registry.engines_for_dictionary(dictionary);
            if engines.is_empty() {
                plan.add_unmatched(dictionary.to_string());
                continue;
            }
            for engine in engines {
                plan.add_step(QueryStep::bilingual(
                    request.query(),
                    dictionary.source().clone(),
                    dictionary.target().clone(),
                    dictionary.is_bidirectional(),
                    engine,
                ));
            }
        }

        for language in request.languages() {
            let engines = registry.engines_for_language(language);
            if engines.is_empty() {
                plan.add_unmatched(language.to_string());
                continue;
            }
            for engine in engines {
                plan.add_step(QueryStep::monolingual(
                    request.query(),
                    language.clone(),
                    engine,
                ));
            }
        }

        tracing::debug!(
            "Planned {} steps for '{}' ({} unmatched)",
            plan.len(),
            request.query(),
            plan.unmatched().len()
        );
        plan
    }
}
