use glossa_types::{DictionaryObject, ExternalContent, MonolingualEntry, SynonymEntry};

use crate::execute::QueryStepResult;

/// Non-bilingual parts of the successful step payloads, in step order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollectedResults {
    pub monolingual_entries: Vec<MonolingualEntry>,
    pub similar_recommendations: Vec<DictionaryObject>,
    pub external_contents: Vec<ExternalContent>,
    pub synonym_entries: Vec<SynonymEntry>,
}

impl CollectedResults {
    pub fn collect(results: &[QueryStepResult]) -> Self {
        let mut collected = Self::default();

        for payload in results.iter().filter_map(QueryStepResult::successful_payload) {
            collected
                .monolingual_entries
                .extend_from_slice(&payload.monolingual_entries);
            collected
                .similar_recommendations
                .extend_from_slice(&payload.similar_recommendations);
            collected
                .synonym_entries
                .extend_from_slice(&payload.synonym_entries);

            // the same thread is often found by several engines
            for content in &payload.external_contents {
                if !collected.external_contents.contains(content) {
                    collected.external_contents.push(content.clone());
                }
            }
        }

        collected
    }
}
