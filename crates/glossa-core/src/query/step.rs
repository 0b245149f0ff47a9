use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use glossa_engine::{EngineError, SearchEngine};
use glossa_types::{EngineQueryResult, Language};

use crate::preprocess::{ComparisonPreprocessor, Preprocessor};

/// Direction of a single dispatch
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StepKind {
    Bilingual {
        input: Language,
        output: Language,
        allow_both_way: bool,
    },
    Monolingual {
        language: Language,
    },
}

/// Everything that makes two steps interchangeable.
///
/// Used for plan deduplication and as the results cache key. The query is
/// held in comparison form, so `Eat` and `eat` share an entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StepKey {
    pub query: String,
    pub input: Language,
    pub output: Option<Language>,
    pub allow_both_way: bool,
    pub engine_name: String,
}

/// One (query, language direction, engine) dispatch unit
#[derive(Clone)]
pub struct QueryStep {
    query: String,
    kind: StepKind,
    engine_name: String,
    engine: Arc<dyn SearchEngine>,
}

impl QueryStep {
    pub fn bilingual(
        query: impl Into<String>,
        input: Language,
        output: Language,
        allow_both_way: bool,
        engine: Arc<dyn SearchEngine>,
    ) -> Self {
        Self {
            query: query.into(),
            kind: StepKind::Bilingual {
                input,
                output,
                allow_both_way,
            },
            engine_name: engine.name().to_string(),
            engine,
        }
    }

    pub fn monolingual(
        query: impl Into<String>,
        language: Language,
        engine: Arc<dyn SearchEngine>,
    ) -> Self {
        Self {
            query: query.into(),
            kind: StepKind::Monolingual { language },
            engine_name: engine.name().to_string(),
            engine,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn kind(&self) -> &StepKind {
        &self.kind
    }

    pub fn engine_name(&self) -> &str {
        &self.engine_name
    }

    pub fn engine(&self) -> &Arc<dyn SearchEngine> {
        &self.engine
    }

    pub fn is_bilingual(&self) -> bool {
        matches!(self.kind, StepKind::Bilingual { .. })
    }

    pub fn key(&self) -> StepKey {
        let (input, output, allow_both_way) = match &self.kind {
            StepKind::Bilingual {
                input,
                output,
                allow_both_way,
            } => (input.clone(), Some(output.clone()), *allow_both_way),
            StepKind::Monolingual { language } => (language.clone(), None, false),
        };

        StepKey {
            query: ComparisonPreprocessor.process(&self.query),
            input,
            output,
            allow_both_way,
            engine_name: self.engine_name.clone(),
        }
    }

    /// Call the engine this step names
    pub async fn dispatch(&self) -> Result<EngineQueryResult, EngineError> {
        match &self.kind {
            StepKind::Bilingual {
                input,
                output,
                allow_both_way,
            } => {
                self.engine
                    .query_bilingual(&self.query, input, output, *allow_both_way)
                    .await
            }
            StepKind::Monolingual { language } => {
                self.engine.query_monolingual(&self.query, language).await
            }
        }
    }
}

impl PartialEq for QueryStep {
    fn eq(&self, other: &Self) -> bool {
        self.query == other.query
            && self.kind == other.kind
            && self.engine_name == other.engine_name
    }
}

impl Eq for QueryStep {}

impl Hash for QueryStep {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl fmt::Debug for QueryStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryStep")
            .field("query", &self.query)
            .field("kind", &self.kind)
            .field("engine_name", &self.engine_name)
            .finish()
    }
}

/// `leo: eat [en-de]`, used in logs and statistics
impl fmt::Display for QueryStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            StepKind::Bilingual {
                input,
                output,
                allow_both_way,
            } => {
                let flag = if *allow_both_way { "<>" } else { "-" };
                write!(
                    f,
                    "{}: {} [{}{}{}]",
                    self.engine_name, self.query, input, flag, output
                )
            }
            StepKind::Monolingual { language } => {
                write!(f, "{}: {} [{}]", self.engine_name, self.query, language)
            }
        }
    }
}
