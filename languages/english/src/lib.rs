use std::sync::Arc;

use glossa_core::Normalizer;
use glossa_types::{EntryType, Language};

const INFINITIVE_MARKER: &str = "to ";

/// English verbs compare in their `to ...` infinitive form, so `eat` and
/// `to eat` are the same entry
#[derive(Debug, Default, Clone, Copy)]
pub struct EnglishVerbNormalizer;

impl Normalizer for EnglishVerbNormalizer {
    fn language(&self) -> Language {
        Language::new("en")
    }

    fn entry_type(&self) -> EntryType {
        EntryType::Verb
    }

    fn normalize(&self, text: &str) -> String {
        if text.is_empty() || text.starts_with(INFINITIVE_MARKER) {
            text.to_string()
        } else {
            format!("{INFINITIVE_MARKER}{text}")
        }
    }
}

/// Every normalizer this crate provides
pub fn normalizers() -> Vec<Arc<dyn Normalizer>> {
    vec![Arc::new(EnglishVerbNormalizer)]
}
