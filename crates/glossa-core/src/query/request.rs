use glossa_config::aggregation::AggregationConfig;
use glossa_config::{GroupingKind, OrderingKind};
use glossa_types::{BilingualDictionary, Language};

use crate::error::RequestError;

/// One incoming lookup. Read-only once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryRequest {
    query: String,
    dictionaries: Vec<BilingualDictionary>,
    languages: Vec<Language>,
    grouping: GroupingKind,
    ordering: OrderingKind,
}

impl QueryRequest {
    pub fn builder(query: impl Into<String>) -> QueryRequestBuilder {
        QueryRequestBuilder {
            query: query.into(),
            dictionaries: Vec::new(),
            languages: Vec::new(),
            grouping: GroupingKind::default(),
            ordering: OrderingKind::default(),
        }
    }

    /// Build a request from raw query-string parameters like
    /// `dictionaries=en-de,de<>fr` and `languages=en,no_ny`
    pub fn parse(
        query: &str,
        dictionaries: &str,
        languages: &str,
        defaults: &AggregationConfig,
    ) -> Result<Self, RequestError> {
        let dictionaries = BilingualDictionary::parse_list(dictionaries)?;
        let languages = languages
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(Language::parse)
            .collect::<Result<Vec<_>, _>>()?;

        Self::builder(query)
            .defaults(defaults)
            .dictionaries(dictionaries)
            .languages(languages)
            .build()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn dictionaries(&self) -> &[BilingualDictionary] {
        &self.dictionaries
    }

    pub fn languages(&self) -> &[Language] {
        &self.languages
    }

    pub fn grouping(&self) -> GroupingKind {
        self.grouping
    }

    pub fn ordering(&self) -> OrderingKind {
        self.ordering
    }
}

pub struct QueryRequestBuilder {
    query: String,
    dictionaries: Vec<BilingualDictionary>,
    languages: Vec<Language>,
    grouping: GroupingKind,
    ordering: OrderingKind,
}

impl QueryRequestBuilder {
    /// Take grouping and ordering from configuration
    pub fn defaults(mut self, config: &AggregationConfig) -> Self {
        self.grouping = config.grouping;
        self.ordering = config.ordering;
        self
    }

    pub fn dictionary(mut self, dictionary: BilingualDictionary) -> Self {
        if !self.dictionaries.contains(&dictionary) {
            self.dictionaries.push(dictionary);
        }
        self
    }

    pub fn dictionaries(self, dictionaries: impl IntoIterator<Item = BilingualDictionary>) -> Self {
        dictionaries.into_iter().fold(self, Self::dictionary)
    }

    pub fn language(mut self, language: Language) -> Self {
        if !self.languages.contains(&language) {
            self.languages.push(language);
        }
        self
    }

    pub fn languages(self, languages: impl IntoIterator<Item = Language>) -> Self {
        languages.into_iter().fold(self, Self::language)
    }

    pub fn grouping(mut self, grouping: GroupingKind) -> Self {
        self.grouping = grouping;
        self
    }

    pub fn ordering(mut self, ordering: OrderingKind) -> Self {
        self.ordering = ordering;
        self
    }

    pub fn build(self) -> Result<QueryRequest, RequestError> {
        let query = self.query.trim().to_string();
        if query.is_empty() {
            return Err(RequestError::EmptyQuery);
        }

        Ok(QueryRequest {
            query,
            dictionaries: self.dictionaries,
            languages: self.languages,
            grouping: self.grouping,
            ordering: self.ordering,
        })
    }
}
