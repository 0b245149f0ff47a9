use glossa_types::{BilingualDictionary, BilingualEntry, EntryType};
use serde::Serialize;

use crate::execute::QueryStepResult;
use crate::query::{QueryRequest, StepKind};

pub const CONSOLIDATED_GROUP: &str = "All bilingual entries";

/// A named bucket of entries
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultGroup<T> {
    pub key: String,
    pub title: String,
    pub entries: Vec<T>,
}

impl<T> ResultGroup<T> {
    pub fn new(key: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
            entries: Vec::new(),
        }
    }

    pub fn with_entries(self, entries: Vec<T>) -> Self {
        Self { entries, ..self }
    }

    /// Same key and title, different entries
    pub fn map_entries<U>(self, f: impl FnOnce(Vec<T>) -> Vec<U>) -> ResultGroup<U> {
        ResultGroup {
            key: self.key,
            title: self.title,
            entries: f(self.entries),
        }
    }
}

/// Partitions the bilingual entries of successful steps.
///
/// Failed steps never contribute. Groups come out in first-seen key order.
pub trait GroupingStrategy: Send + Sync {
    fn group(
        &self,
        request: &QueryRequest,
        results: &[QueryStepResult],
    ) -> Vec<ResultGroup<BilingualEntry>>;
}

/// Successful bilingual results with the dictionary their step asked for
fn bilingual_results(
    results: &[QueryStepResult],
) -> impl Iterator<Item = (BilingualDictionary, &[BilingualEntry])> {
    results.iter().filter_map(|result| {
        let payload = result.successful_payload()?;
        match result.step().kind() {
            StepKind::Bilingual {
                input,
                output,
                allow_both_way,
            } => Some((
                BilingualDictionary::new(input.clone(), output.clone(), *allow_both_way),
                payload.bilingual_entries.as_slice(),
            )),
            StepKind::Monolingual { .. } => None,
        }
    })
}

/// One group per requested dictionary, even if nothing answered for it
#[derive(Debug, Default, Clone, Copy)]
pub struct DictionaryGrouping;

impl GroupingStrategy for DictionaryGrouping {
    fn group(
        &self,
        request: &QueryRequest,
        results: &[QueryStepResult],
    ) -> Vec<ResultGroup<BilingualEntry>> {
        let mut groups: Vec<ResultGroup<BilingualEntry>> = request
            .dictionaries()
            .iter()
            .map(|d| ResultGroup::new(d.to_string(), d.display_name()))
            .collect();

        for (dictionary, entries) in bilingual_results(results) {
            let key = dictionary.to_string();
            let index = match groups.iter().position(|g| g.key == key) {
                Some(index) => index,
                None => {
                    groups.push(ResultGroup::new(key, dictionary.display_name()));
                    groups.len() - 1
                }
            };
            groups[index].entries.extend_from_slice(entries);
        }

        groups
    }
}

/// Everything in one group
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsolidatedGrouping;

impl GroupingStrategy for ConsolidatedGrouping {
    fn group(
        &self,
        request: &QueryRequest,
        results: &[QueryStepResult],
    ) -> Vec<ResultGroup<BilingualEntry>> {
        let entries: Vec<BilingualEntry> = bilingual_results(results)
            .flat_map(|(_, entries)| entries.iter().cloned())
            .collect();

        if entries.is_empty() && request.dictionaries().is_empty() {
            return Vec::new();
        }

        vec![ResultGroup::new(CONSOLIDATED_GROUP, CONSOLIDATED_GROUP).with_entries(entries)]
    }
}

/// One group per entry type: "Nouns", "Verbs", ..., "Unknown"
#[derive(Debug, Default, Clone, Copy)]
pub struct EntryTypeGrouping;

impl EntryTypeGrouping {
    fn title(entry_type: EntryType) -> String {
        match entry_type {
            EntryType::Unknown => "Unknown".to_string(),
            other => format!("{}s", other.display_name()),
        }
    }
}

impl GroupingStrategy for EntryTypeGrouping {
    fn group(
        &self,
        _request: &QueryRequest,
        results: &[QueryStepResult],
    ) -> Vec<ResultGroup<BilingualEntry>> {
        let mut groups: Vec<(EntryType, ResultGroup<BilingualEntry>)> = Vec::new();

        for entry in bilingual_results(results).flat_map(|(_, entries)| entries.iter()) {
            let index = match groups.iter().position(|(t, _)| *t == entry.entry_type) {
                Some(index) => index,
                None => {
                    let title = Self::title(entry.entry_type);
                    groups.push((
                        entry.entry_type,
                        ResultGroup::new(title.to_lowercase(), title),
                    ));
                    groups.len() - 1
                }
            };
            groups[index].1.entries.push(entry.clone());
        }

        groups.into_iter().map(|(_, group)| group).collect()
    }
}
