use glossa_types::{BilingualDictionary, Language};

/// Capabilities an engine declares at registration time
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeatureSet {
    pub bilingual_dictionaries: Vec<BilingualDictionary>,
    pub monolingual_languages: Vec<Language>,
    pub provides_external_content: bool,
    pub provides_similar_recommendations: bool,
    pub supports_fuzzy_search: bool,
}

impl FeatureSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dictionary(mut self, dictionary: BilingualDictionary) -> Self {
        self.bilingual_dictionaries.push(dictionary);
        self
    }

    pub fn with_language(mut self, language: Language) -> Self {
        self.monolingual_languages.push(language);
        self
    }

    pub fn with_external_content(mut self) -> Self {
        self.provides_external_content = true;
        self
    }

    pub fn with_similar_recommendations(mut self) -> Self {
        self.provides_similar_recommendations = true;
        self
    }

    pub fn with_fuzzy_search(mut self) -> Self {
        self.supports_fuzzy_search = true;
        self
    }

    /// Every query-string form the declared dictionaries answer to.
    ///
    /// `a<>b` expands to `a<>b`, `b<>a`, `a-b` and `b-a`.
    pub fn expanded_dictionaries(&self) -> Vec<BilingualDictionary> {
        let mut expanded = Vec::new();
        for dictionary in &self.bilingual_dictionaries {
            let mut forms = vec![dictionary.clone()];
            if dictionary.is_bidirectional() {
                let unidirectional = dictionary.unidirectional();
                forms.push(dictionary.inverse());
                forms.push(unidirectional.inverse());
                forms.push(unidirectional);
            }
            for form in forms {
                if !expanded.contains(&form) {
                    expanded.push(form);
                }
            }
        }
        expanded
    }
}
