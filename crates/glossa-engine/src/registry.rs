use std::collections::HashMap;
use std::sync::Arc;

use glossa_types::{BilingualDictionary, Language};

use crate::SearchEngine;
use crate::error::RegistryError;

/// Engines known to the process, indexed by the dictionaries and languages
/// they support.
///
/// Filled once at startup, then shared read-only behind an `Arc`.
#[derive(Default)]
pub struct EngineRegistry {
    /// Registration order
    engines: Vec<Arc<dyn SearchEngine>>,
    by_name: HashMap<String, usize>,
    by_dictionary: HashMap<BilingualDictionary, Vec<usize>>,
    by_language: HashMap<Language, Vec<usize>>,
}

impl EngineRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, engine: Arc<dyn SearchEngine>) -> Result<(), RegistryError> {
        let name = engine.name().to_string();
        if name.trim().is_empty() {
            return Err(RegistryError::EmptyName);
        }
        if self.by_name.contains_key(&name) {
            return Err(RegistryError::DuplicateEngine(name));
        }

        let features = engine.features();
        if let Some(invalid) = features
            .bilingual_dictionaries
            .iter()
            .find(|d| d.source() == d.target())
        {
            return Err(RegistryError::InvalidDictionary {
                engine: name,
                dictionary: invalid.to_string(),
            });
        }

        let index = self.engines.len();
        for dictionary in features.expanded_dictionaries() {
            self.by_dictionary.entry(dictionary).or_default().push(index);
        }
        for language in &features.monolingual_languages {
            let slots = self.by_language.entry(language.clone()).or_default();
            if !slots.contains(&index) {
                slots.push(index);
            }
        }

        tracing::info!(
            "Registered engine {} ({} dictionaries, {} languages)",
            name,
            features.bilingual_dictionaries.len(),
            features.monolingual_languages.len()
        );

        self.by_name.insert(name, index);
        self.engines.push(engine);
        Ok(())
    }

    /// Engines answering `dictionary`, in registration order
    pub fn engines_for_dictionary(
        &self,
        dictionary: &BilingualDictionary,
    ) -> Vec<Arc<dyn SearchEngine>> {
        self.resolve(self.by_dictionary.get(dictionary))
    }

    /// Engines with a monolingual lookup for `language`, in registration order
    pub fn engines_for_language(&self, language: &Language) -> Vec<Arc<dyn SearchEngine>> {
        self.resolve(self.by_language.get(language))
    }

    pub fn engine(&self, name: &str) -> Option<Arc<dyn SearchEngine>> {
        self.by_name.get(name).map(|&i| self.engines[i].clone())
    }

    pub fn engine_names(&self) -> Vec<String> {
        self.engines.iter().map(|e| e.name().to_string()).collect()
    }

    pub fn len(&self) -> usize {
        self.engines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.engines.is_empty()
    }

    /// Declared dictionaries of all engines, deduplicated and sorted by
    /// language display names.
    ///
    /// A bidirectional dictionary is flipped when its target language is the
    /// more common one: next to `en-de` and `en-es`, `fr<>en` is listed as `en<>fr`.
    pub fn supported_dictionaries(&self) -> Vec<BilingualDictionary> {
        let mut declared: Vec<BilingualDictionary> = Vec::new();
        for engine in &self.engines {
            for dictionary in engine.features().bilingual_dictionaries {
                let already_known = declared.iter().any(|known| {
                    *known == dictionary
                        || (dictionary.is_bidirectional() && *known == dictionary.inverse())
                });
                if !already_known {
                    declared.push(dictionary);
                }
            }
        }

        let mut usage: HashMap<Language, usize> = HashMap::new();
        for dictionary in &declared {
            *usage.entry(dictionary.source().clone()).or_default() += 1;
            *usage.entry(dictionary.target().clone()).or_default() += 1;
        }

        let mut dictionaries: Vec<BilingualDictionary> = declared
            .into_iter()
            .map(|d| {
                let source_usage = usage.get(d.source()).copied().unwrap_or(0);
                let target_usage = usage.get(d.target()).copied().unwrap_or(0);
                if d.is_bidirectional() && target_usage > source_usage {
                    d.inverse()
                } else {
                    d
                }
            })
            .collect();

        dictionaries.sort_by(|a, b| {
            a.source()
                .display_name()
                .cmp(&b.source().display_name())
                .then_with(|| a.target().display_name().cmp(&b.target().display_name()))
        });
        dictionaries
    }

    fn resolve(&self, indexes: Option<&Vec<usize>>) -> Vec<Arc<dyn SearchEngine>> {
        indexes
            .map(|indexes| indexes.iter().map(|&i| self.engines[i].clone()).collect())
            .unwrap_or_default()
    }
}
