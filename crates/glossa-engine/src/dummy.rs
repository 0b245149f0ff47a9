use glossa_types::{
    BilingualDictionary, BilingualEntry, DictionaryObject, EngineQueryResult, EntryType, Language,
};

use crate::{EngineDescription, EngineError, FeatureSet, SearchEngine};

/// Offline engine answering every `en<>de` lookup with `foo -> bar`
#[derive(Debug, Default)]
pub struct DummyEngine;

impl DummyEngine {
    pub const NAME: &'static str = "dummy";

    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl SearchEngine for DummyEngine {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn description(&self) -> EngineDescription {
        EngineDescription {
            engine_name: Self::NAME.to_string(),
            backend_name: "Dummy".to_string(),
            backend_url: None,
            copyright: None,
        }
    }

    fn features(&self) -> FeatureSet {
        BilingualDictionary::parse("en<>de")
            .map(|dictionary| FeatureSet::new().with_dictionary(dictionary))
            .unwrap_or_default()
    }

    async fn query_bilingual(
        &self,
        _text: &str,
        input: &Language,
        output: &Language,
        _allow_both_way: bool,
    ) -> Result<EngineQueryResult, EngineError> {
        tracing::debug!("Dummy engine queried for {}-{}", input, output);

        Ok(EngineQueryResult::new().with_bilingual_entry(BilingualEntry::new(
            DictionaryObject::new(input.clone(), "foo"),
            DictionaryObject::new(output.clone(), "bar"),
            EntryType::Unknown,
        )))
    }
}
