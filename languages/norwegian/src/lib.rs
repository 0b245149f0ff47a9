use std::sync::Arc;

use glossa_core::Normalizer;
use glossa_types::{EntryType, Language};

const INFINITIVE_MARKER: &str = "å ";

/// Norwegian verbs compare with the `å` infinitive marker. Registered for
/// plain `no`, so Bokmål and Nynorsk entries fall back to it.
#[derive(Debug, Default, Clone, Copy)]
pub struct NorwegianVerbNormalizer;

impl Normalizer for NorwegianVerbNormalizer {
    fn language(&self) -> Language {
        Language::new("no")
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

pub fn normalizers() -> Vec<Arc<dyn Normalizer>> {
    vec![Arc::new(NorwegianVerbNormalizer)]
}

#[cfg(test)]
mod tests {
    use glossa_core::NormalizerSet;

    use super::*;

    #[test]
    fn adds_the_infinitive_marker_once() {
        let normalizer = NorwegianVerbNormalizer;

        assert_eq!(normalizer.normalize("spise"), "å spise");
        assert_eq!(normalizer.normalize("å spise"), "å spise");
    }

    #[test]
    fn dialects_use_the_base_language_normalizer() {
        let mut set = NormalizerSet::new();
        set.register_all(normalizers()).unwrap();
        let nynorsk = Language::parse("no_ny").unwrap();

        assert_eq!(set.comparison_text("Ete", &nynorsk, EntryType::Verb), "å ete");
        assert_eq!(set.comparison_text("Å  ete", &nynorsk, EntryType::Verb), "å ete");
        assert_eq!(set.comparison_text("mat", &nynorsk, EntryType::Noun), "mat");
    }
}
