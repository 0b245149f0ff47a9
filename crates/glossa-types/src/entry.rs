use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::language::Language;

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum EntryType {
    OtherWord,
    #[default]
    Unknown,
    Phrase,
    Example,
    Noun,
    Verb,
    Adjective,
    Adverb,
    Preposition,
    Pronoun,
    Interjection,
    Conjunction,
}

impl EntryType {
    pub fn display_name(&self) -> &'static str {
        match self {
            EntryType::OtherWord => "Other word",
            EntryType::Unknown => "Unknown",
            EntryType::Phrase => "Phrase",
            EntryType::Example => "Example",
            EntryType::Noun => "Noun",
            EntryType::Verb => "Verb",
            EntryType::Adjective => "Adjective",
            EntryType::Adverb => "Adverb",
            EntryType::Preposition => "Preposition",
            EntryType::Pronoun => "Pronoun",
            EntryType::Interjection => "Interjection",
            EntryType::Conjunction => "Conjunction",
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, EntryType::Unknown)
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GrammaticalGender {
    Masculine,
    Feminine,
    Neuter,
    None,
    Unknown,
}

impl GrammaticalGender {
    /// Whether the gender carries information worth keeping over another value
    pub fn is_known(&self) -> bool {
        !matches!(self, GrammaticalGender::None | GrammaticalGender::Unknown)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GrammaticalCategory {
    Number,
    Tense,
    ComparisonDegree,
    Case,
}

/// Inflected form keys, grouped by [`GrammaticalCategory`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GrammaticalForm {
    Singular,
    Plural,

    Present,
    Past,
    PastPerfect,
    PerfectParticiple,

    Positive,
    Comparative,
    Superlative,

    Nominative,
    Genitive,
    Dative,
    Accusative,
    DefiniteForm,
}

impl GrammaticalForm {
    pub fn category(&self) -> GrammaticalCategory {
        use GrammaticalForm::*;

        match self {
            Singular | Plural => GrammaticalCategory::Number,
            Present | Past | PastPerfect | PerfectParticiple => GrammaticalCategory::Tense,
            Positive | Comparative | Superlative => GrammaticalCategory::ComparisonDegree,
            Nominative | Genitive | Dative | Accusative | DefiniteForm => GrammaticalCategory::Case,
        }
    }
}

/// A single-language lexical item as returned by an engine.
///
/// Values are built once with the `with_*` methods and then only read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictionaryObject {
    pub language: Language,
    pub general_form: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abbreviation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pronunciation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<GrammaticalGender>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub meanings: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alternate_forms: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub syllabification: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub additional_forms: BTreeMap<GrammaticalForm, String>,
}

impl DictionaryObject {
    pub fn new(language: Language, general_form: impl Into<String>) -> Self {
        Self {
            language,
            general_form: general_form.into(),
            abbreviation: None,
            description: None,
            domain: None,
            pronunciation: None,
            gender: None,
            meanings: Vec::new(),
            alternate_forms: Vec::new(),
            syllabification: Vec::new(),
            additional_forms: BTreeMap::new(),
        }
    }

    pub fn with_abbreviation(mut self, abbreviation: impl Into<String>) -> Self {
        self.abbreviation = Some(abbreviation.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    pub fn with_pronunciation(mut self, pronunciation: impl Into<String>) -> Self {
        self.pronunciation = Some(pronunciation.into());
        self
    }

    pub fn with_gender(mut self, gender: GrammaticalGender) -> Self {
        self.gender = Some(gender);
        self
    }

    pub fn with_meaning(mut self, meaning: impl Into<String>) -> Self {
        self.meanings.push(meaning.into());
        self
    }

    pub fn with_alternate_form(mut self, form: impl Into<String>) -> Self {
        self.alternate_forms.push(form.into());
        self
    }

    pub fn with_syllabification(mut self, syllables: Vec<String>) -> Self {
        self.syllabification = syllables;
        self
    }

    pub fn with_additional_form(mut self, form: GrammaticalForm, value: impl Into<String>) -> Self {
        self.additional_forms.insert(form, value.into());
        self
    }
}

/// A translation pair. Either side may be the query language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BilingualEntry {
    pub source: DictionaryObject,
    pub target: DictionaryObject,
    pub entry_type: EntryType,
}

impl BilingualEntry {
    pub fn new(source: DictionaryObject, target: DictionaryObject, entry_type: EntryType) -> Self {
        Self {
            source,
            target,
            entry_type,
        }
    }

    pub fn inverted(&self) -> Self {
        Self {
            source: self.target.clone(),
            target: self.source.clone(),
            entry_type: self.entry_type,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonolingualEntry {
    pub content: DictionaryObject,
    pub entry_type: EntryType,
}

impl MonolingualEntry {
    pub fn new(content: DictionaryObject, entry_type: EntryType) -> Self {
        Self {
            content,
            entry_type,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynonymGroup {
    pub base_meaning: DictionaryObject,
    pub synonyms: Vec<DictionaryObject>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynonymEntry {
    pub base_object: DictionaryObject,
    pub groups: Vec<SynonymGroup>,
}
