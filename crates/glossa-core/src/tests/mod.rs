//! Scenario tests for the pipeline, driven by scripted engines

mod pipeline_tests;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use glossa_config::Config;
use glossa_engine::{EngineDescription, EngineError, EngineRegistry, FeatureSet, SearchEngine};
use glossa_types::{
    BilingualDictionary, BilingualEntry, DictionaryObject, EngineQueryResult, EntryType, Language,
};

use crate::execute::StepResultCache;
use crate::normalize::NormalizerSet;
use crate::service::{Pipeline, QueryService};

#[derive(Clone)]
pub enum Behavior {
    Answer(EngineQueryResult),
    Fail(String),
    Empty,
    Panic,
    Sleep(Duration, EngineQueryResult),
    /// Fails on the first call, answers afterwards
    FailOnce(EngineQueryResult),
    Partial(String, EngineQueryResult),
}

pub struct ScriptedEngine {
    name: String,
    features: FeatureSet,
    behavior: Behavior,
    calls: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl ScriptedEngine {
    pub fn new(name: &str, dictionaries: &[&str], behavior: Behavior) -> Arc<Self> {
        let features = dictionaries.iter().fold(FeatureSet::new(), |f, d| {
            f.with_dictionary(BilingualDictionary::parse(d).unwrap())
        });
        Self::with_features(name, features, behavior)
    }

    pub fn with_features(name: &str, features: FeatureSet, behavior: Behavior) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            features,
            behavior,
            calls: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    async fn respond(&self) -> Result<EngineQueryResult, EngineError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        let result = match &self.behavior {
            Behavior::Answer(result) => Ok(result.clone()),
            Behavior::Fail(message) => Err(EngineError::Backend(message.clone())),
            Behavior::Empty => Ok(EngineQueryResult::new()),
            Behavior::Panic => panic!("scripted engine panic"),
            Behavior::Sleep(delay, result) => {
                tokio::time::sleep(*delay).await;
                Ok(result.clone())
            }
            Behavior::FailOnce(result) => {
                if call == 0 {
                    Err(EngineError::Backend("temporarily unavailable".to_string()))
                } else {
                    Ok(result.clone())
                }
            }
            Behavior::Partial(reason, partial) => Err(EngineError::Partial {
                reason: reason.clone(),
                partial: Box::new(partial.clone()),
            }),
        };

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }
}

#[async_trait::async_trait]
impl SearchEngine for ScriptedEngine {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> EngineDescription {
        EngineDescription {
            engine_name: self.name.clone(),
            backend_name: "Scripted".to_string(),
            ..Default::default()
        }
    }

    fn features(&self) -> FeatureSet {
        self.features.clone()
    }

    async fn query_bilingual(
        &self,
        _text: &str,
        _input: &Language,
        _output: &Language,
        _allow_both_way: bool,
    ) -> Result<EngineQueryResult, EngineError> {
        self.respond().await
    }

    async fn query_monolingual(
        &self,
        _text: &str,
        _language: &Language,
    ) -> Result<EngineQueryResult, EngineError> {
        self.respond().await
    }
}

pub fn lang(id: &str) -> Language {
    Language::parse(id).unwrap()
}

pub fn bilingual(source: &str, target: &str, entry_type: EntryType) -> BilingualEntry {
    BilingualEntry::new(
        DictionaryObject::new(lang("en"), source),
        DictionaryObject::new(lang("de"), target),
        entry_type,
    )
}

pub fn answer(entries: Vec<BilingualEntry>) -> EngineQueryResult {
    entries
        .into_iter()
        .fold(EngineQueryResult::new(), EngineQueryResult::with_bilingual_entry)
}

pub fn registry(engines: &[Arc<ScriptedEngine>]) -> Arc<EngineRegistry> {
    let mut registry = EngineRegistry::new();
    for engine in engines {
        registry
            .register(engine.clone() as Arc<dyn SearchEngine>)
            .unwrap();
    }
    Arc::new(registry)
}

pub fn test_config() -> Config {
    let mut config = Config::default();
    config.executor.step_timeout_ms = 500;
    config
}

pub fn service_with(engines: &[Arc<ScriptedEngine>], config: &Config) -> QueryService {
    let pipeline = Pipeline::from_config(
        config,
        Arc::new(NormalizerSet::new()),
        Arc::new(StepResultCache::unbounded()),
    );
    QueryService::new(registry(engines), pipeline, config.aggregation.clone())
}

pub fn service(engines: &[Arc<ScriptedEngine>]) -> QueryService {
    service_with(engines, &test_config())
}
