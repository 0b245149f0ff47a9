use std::collections::HashMap;
use std::sync::Arc;

use glossa_types::{DictionaryObject, EntryType, Language};

use crate::error::NormalizerError;
use crate::preprocess::{ComparisonPreprocessor, Preprocessor};

/// Canonicalizes the comparison form of one language / entry type.
///
/// Input is already trimmed and lower-cased; `normalize` must be total and
/// must not depend on anything but its argument.
pub trait Normalizer: Send + Sync {
    fn language(&self) -> Language;

    fn entry_type(&self) -> EntryType;

    fn normalize(&self, text: &str) -> String;
}

/// Registered normalizers keyed by (language, entry type)
#[derive(Default, Clone)]
pub struct NormalizerSet {
    normalizers: HashMap<(Language, EntryType), Arc<dyn Normalizer>>,
}

impl NormalizerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, normalizer: Arc<dyn Normalizer>) -> Result<(), NormalizerError> {
        let key = (normalizer.language(), normalizer.entry_type());
        if self.normalizers.contains_key(&key) {
            let (language, entry_type) = key;
            return Err(NormalizerError::Duplicate {
                language,
                entry_type,
            });
        }

        tracing::debug!("Registered normalizer for {} / {}", key.0, key.1);
        self.normalizers.insert(key, normalizer);
        Ok(())
    }

    pub fn register_all(
        &mut self,
        normalizers: impl IntoIterator<Item = Arc<dyn Normalizer>>,
    ) -> Result<(), NormalizerError> {
        for normalizer in normalizers {
            self.register(normalizer)?;
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.normalizers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.normalizers.is_empty()
    }

    /// Exact match first, then the language without its dialect
    pub fn find(&self, language: &Language, entry_type: EntryType) -> Option<&dyn Normalizer> {
        self.normalizers
            .get(&(language.clone(), entry_type))
            .or_else(|| {
                language
                    .is_dialect()
                    .then(|| self.normalizers.get(&(language.without_dialect(), entry_type)))
                    .flatten()
            })
            .map(|n| n.as_ref())
    }

    /// Preprocessed `text` passed through the matching normalizer, if any
    pub fn comparison_text(&self, text: &str, language: &Language, entry_type: EntryType) -> String {
        let processed = ComparisonPreprocessor.process(text);
        match self.find(language, entry_type) {
            Some(normalizer) => normalizer.normalize(&processed),
            None => processed,
        }
    }

    /// Form used when comparing `object` with other objects or the query.
    /// Never shown to the user.
    pub fn comparison_form(&self, object: &DictionaryObject, entry_type: EntryType) -> String {
        self.comparison_text(&object.general_form, &object.language, entry_type)
    }
}
