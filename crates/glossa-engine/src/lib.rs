use glossa_types::{EngineQueryResult, Language};

pub mod dummy;
pub mod error;
pub mod feature;
pub mod registry;

pub use dummy::DummyEngine;
pub use error::{EngineError, RegistryError};
pub use feature::FeatureSet;
pub use registry::EngineRegistry;

/// Search engine interface.
///
/// Every backend implements the capabilities it declares in its
/// [`FeatureSet`]; the query methods it does not support keep the default
/// implementation, which fails with [`EngineError::Unsupported`].
#[async_trait::async_trait]
pub trait SearchEngine: Send + Sync {
    /// Unique name used for registration and step identity
    fn name(&self) -> &str;

    fn description(&self) -> EngineDescription;

    fn features(&self) -> FeatureSet;

    /// Look up `text` translated from `input` to `output`.
    ///
    /// With `allow_both_way` the engine may also return entries for the
    /// reverse direction.
    async fn query_bilingual(
        &self,
        text: &str,
        input: &Language,
        output: &Language,
        allow_both_way: bool,
    ) -> Result<EngineQueryResult, EngineError> {
        let _ = (text, input, output, allow_both_way);
        Err(EngineError::Unsupported {
            capability: "bilingual query",
        })
    }

    async fn query_monolingual(
        &self,
        text: &str,
        language: &Language,
    ) -> Result<EngineQueryResult, EngineError> {
        let _ = (text, language);
        Err(EngineError::Unsupported {
            capability: "monolingual query",
        })
    }
}

/// Engine metadata
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct EngineDescription {
    pub engine_name: String,
    pub backend_name: String,
    pub backend_url: Option<String>,
    pub copyright: Option<String>,
}
