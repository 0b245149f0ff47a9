use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;
use crate::language::Language;

pub const BIDIRECTIONAL_FLAG: &str = "<>";
pub const UNIDIRECTIONAL_FLAG: &str = "-";

/// A language pair an engine can translate between.
///
/// The query-string form is `src-tgt` for one direction and `src<>tgt` when
/// the engine answers in both directions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BilingualDictionary {
    source: Language,
    target: Language,
    bidirectional: bool,
}

impl BilingualDictionary {
    pub fn new(source: Language, target: Language, bidirectional: bool) -> Self {
        Self {
            source,
            target,
            bidirectional,
        }
    }

    /// Parse a single dictionary query like `en-de`, `de<>fr` or `no_ny-de`
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let input = input.trim();
        let invalid = || ParseError::InvalidDictionary(input.to_string());

        let (source, target, bidirectional) =
            if let Some((source, target)) = input.split_once(BIDIRECTIONAL_FLAG) {
                (source, target, true)
            } else if let Some((source, target)) = input.split_once(UNIDIRECTIONAL_FLAG) {
                (source, target, false)
            } else {
                return Err(invalid());
            };

        let source = Language::parse(source).map_err(|_| invalid())?;
        let target = Language::parse(target).map_err(|_| invalid())?;

        if source == target {
            return Err(ParseError::SameLanguage(input.to_string()));
        }

        Ok(Self::new(source, target, bidirectional))
    }

    /// Parse a comma separated list of dictionaries, failing on the first malformed one
    pub fn parse_list(input: &str) -> Result<Vec<Self>, ParseError> {
        input
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(Self::parse)
            .collect()
    }

    pub fn source(&self) -> &Language {
        &self.source
    }

    pub fn target(&self) -> &Language {
        &self.target
    }

    pub fn is_bidirectional(&self) -> bool {
        self.bidirectional
    }

    /// Same dictionary with source and target swapped
    pub fn inverse(&self) -> Self {
        Self::new(self.target.clone(), self.source.clone(), self.bidirectional)
    }

    pub fn unidirectional(&self) -> Self {
        Self::new(self.source.clone(), self.target.clone(), false)
    }

    /// `English -> German` or `English <-> German`
    pub fn display_name(&self) -> String {
        let arrow = if self.bidirectional { "<->" } else { "->" };
        format!(
            "{} {} {}",
            self.source.display_name(),
            arrow,
            self.target.display_name()
        )
    }
}

impl fmt::Display for BilingualDictionary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let flag = if self.bidirectional {
            BIDIRECTIONAL_FLAG
        } else {
            UNIDIRECTIONAL_FLAG
        };
        write!(f, "{}{}{}", self.source, flag, self.target)
    }
}

impl FromStr for BilingualDictionary {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for BilingualDictionary {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<BilingualDictionary> for String {
    fn from(value: BilingualDictionary) -> Self {
        value.to_string()
    }
}
