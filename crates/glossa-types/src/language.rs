use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

const DIALECT_FLAG: char = '_';

/// Display names for the languages the bundled engines know about.
const KNOWN_LANGUAGES: &[(&str, &str)] = &[
    ("en", "English"),
    ("de", "German"),
    ("fr", "French"),
    ("es", "Spanish"),
    ("it", "Italian"),
    ("cn", "Chinese"),
    ("ru", "Russian"),
    ("no", "Norwegian"),
    ("sv", "Swedish"),
    ("fi", "Finnish"),
    ("tr", "Turkish"),
    ("nl", "Dutch"),
    ("pt", "Portuguese"),
    ("pl", "Polish"),
];

const KNOWN_DIALECTS: &[(&str, &str, &str)] = &[("no", "bo", "Bokmål"), ("no", "ny", "Nynorsk")];

/// A language, optionally narrowed down to a dialect (`no_ny`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Language {
    identifier: String,
    dialect: Option<String>,
}

impl Language {
    /// Language without dialect from a known-good identifier. Use
    /// [`Language::parse`] for anything user supplied.
    pub fn new(identifier: &str) -> Self {
        Self {
            identifier: identifier.to_lowercase(),
            dialect: None,
        }
    }

    /// Parse `id` or `id_dialect`
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let input = input.trim();
        let (identifier, dialect) = match input.split_once(DIALECT_FLAG) {
            Some((id, dialect)) => (id, Some(dialect)),
            None => (input, None),
        };

        if !is_valid_identifier(identifier) || !dialect.is_none_or(is_valid_identifier) {
            return Err(ParseError::InvalidLanguage(input.to_string()));
        }

        Ok(Self {
            identifier: identifier.to_lowercase(),
            dialect: dialect.map(str::to_lowercase),
        })
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn dialect(&self) -> Option<&str> {
        self.dialect.as_deref()
    }

    pub fn is_dialect(&self) -> bool {
        self.dialect.is_some()
    }

    pub fn without_dialect(&self) -> Self {
        Self {
            identifier: self.identifier.clone(),
            dialect: None,
        }
    }

    /// Human readable name, falls back to the raw identifier for unknown languages
    pub fn display_name(&self) -> String {
        let base = KNOWN_LANGUAGES
            .iter()
            .find(|(id, _)| *id == self.identifier)
            .map(|(_, name)| name.to_string())
            .unwrap_or_else(|| self.identifier.clone());

        match &self.dialect {
            Some(dialect) => {
                let dialect_name = KNOWN_DIALECTS
                    .iter()
                    .find(|(id, d, _)| *id == self.identifier && d == dialect)
                    .map(|(_, _, name)| name.to_string())
                    .unwrap_or_else(|| dialect.clone());
                format!("{base} ({dialect_name})")
            }
            None => base,
        }
    }
}

fn is_valid_identifier(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|c| c.is_ascii_alphabetic())
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.dialect {
            Some(dialect) => write!(f, "{}{}{}", self.identifier, DIALECT_FLAG, dialect),
            None => f.write_str(&self.identifier),
        }
    }
}

impl FromStr for Language {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Language {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Language> for String {
    fn from(value: Language) -> Self {
        value.to_string()
    }
}
