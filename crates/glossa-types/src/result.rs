use serde::{Deserialize, Serialize};

use crate::entry::{BilingualEntry, DictionaryObject, MonolingualEntry, SynonymEntry};

/// A snippet an engine found outside its dictionary, e.g. a forum thread
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalContent {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub link: String,
}

/// Everything one engine returned for one step
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineQueryResult {
    #[serde(default)]
    pub bilingual_entries: Vec<BilingualEntry>,
    #[serde(default)]
    pub monolingual_entries: Vec<MonolingualEntry>,
    #[serde(default)]
    pub external_contents: Vec<ExternalContent>,
    #[serde(default)]
    pub similar_recommendations: Vec<DictionaryObject>,
    #[serde(default)]
    pub synonym_entries: Vec<SynonymEntry>,
}

impl EngineQueryResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bilingual_entry(mut self, entry: BilingualEntry) -> Self {
        self.bilingual_entries.push(entry);
        self
    }

    pub fn with_monolingual_entry(mut self, entry: MonolingualEntry) -> Self {
        self.monolingual_entries.push(entry);
        self
    }

    pub fn with_external_content(mut self, content: ExternalContent) -> Self {
        self.external_contents.push(content);
        self
    }

    pub fn with_similar_recommendation(mut self, object: DictionaryObject) -> Self {
        self.similar_recommendations.push(object);
        self
    }

    pub fn with_synonym_entry(mut self, entry: SynonymEntry) -> Self {
        self.synonym_entries.push(entry);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.bilingual_entries.is_empty()
            && self.monolingual_entries.is_empty()
            && self.external_contents.is_empty()
            && self.similar_recommendations.is_empty()
            && self.synonym_entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EntryType, Language};

    #[test]
    fn empty_until_anything_is_added() {
        assert!(EngineQueryResult::new().is_empty());

        let similar = EngineQueryResult::new().with_similar_recommendation(DictionaryObject::new(
            Language::parse("en").unwrap(),
            "eaten",
        ));
        assert!(!similar.is_empty());

        let bilingual = EngineQueryResult::new().with_bilingual_entry(BilingualEntry::new(
            DictionaryObject::new(Language::parse("en").unwrap(), "eat"),
            DictionaryObject::new(Language::parse("de").unwrap(), "essen"),
            EntryType::Verb,
        ));
        assert!(!bilingual.is_empty());
    }
}
