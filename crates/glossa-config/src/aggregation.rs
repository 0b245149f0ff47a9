use std::env;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GroupingKind {
    /// One group per requested dictionary
    #[default]
    ByDictionary,
    /// Every bilingual entry in a single group
    Consolidated,
    /// One group per entry type
    EntryType,
}

impl FromStr for GroupingKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "by-dictionary" => Ok(GroupingKind::ByDictionary),
            "consolidated" => Ok(GroupingKind::Consolidated),
            "entry-type" => Ok(GroupingKind::EntryType),
            other => Err(format!("unknown grouping strategy: {other}")),
        }
    }
}

impl fmt::Display for GroupingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GroupingKind::ByDictionary => "by-dictionary",
            GroupingKind::Consolidated => "consolidated",
            GroupingKind::EntryType => "entry-type",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderingKind {
    #[default]
    Relevance,
    PassThrough,
}

impl FromStr for OrderingKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "relevance" => Ok(OrderingKind::Relevance),
            "pass-through" => Ok(OrderingKind::PassThrough),
            other => Err(format!("unknown ordering strategy: {other}")),
        }
    }
}

impl fmt::Display for OrderingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderingKind::Relevance => f.write_str("relevance"),
            OrderingKind::PassThrough => f.write_str("pass-through"),
        }
    }
}

fn default_grouping() -> GroupingKind {
    GroupingKind::ByDictionary
}

fn default_ordering() -> OrderingKind {
    OrderingKind::Relevance
}

/// Default post-processing of a request when the caller does not pick one
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct AggregationConfig {
    #[serde(default = "default_grouping")]
    pub grouping: GroupingKind,
    #[serde(default = "default_ordering")]
    pub ordering: OrderingKind,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            grouping: default_grouping(),
            ordering: default_ordering(),
        }
    }
}

impl AggregationConfig {
    pub fn new() -> Self {
        let grouping = env::var("GLOSSA_GROUPING")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_grouping);

        let ordering = env::var("GLOSSA_ORDERING")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_ordering);

        Self { grouping, ordering }
    }
}
