use glossa_types::{BilingualEntry, MonolingualEntry};
use serde::Serialize;

use super::group::ResultGroup;
use super::relevance::RelevanceScorer;

/// An entry with its relevance to the query, in `[0.0, 1.0]`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredEntry {
    pub entry: BilingualEntry,
    pub score: f64,
}

/// Ranks the entries inside every group. Groups keep their order and
/// membership.
pub trait OrderStrategy: Send + Sync {
    fn order(
        &self,
        query: &str,
        groups: Vec<ResultGroup<BilingualEntry>>,
    ) -> Vec<ResultGroup<ScoredEntry>>;
}

fn score_group(
    scorer: &RelevanceScorer,
    query: &str,
    group: ResultGroup<BilingualEntry>,
) -> ResultGroup<ScoredEntry> {
    group.map_entries(|entries| {
        entries
            .into_iter()
            .map(|entry| ScoredEntry {
                score: scorer.score(query, &entry),
                entry,
            })
            .collect()
    })
}

/// Highest score first, ties keep their input order
pub struct RelevanceOrder {
    scorer: RelevanceScorer,
}

impl RelevanceOrder {
    pub fn new(scorer: RelevanceScorer) -> Self {
        Self { scorer }
    }
}

impl OrderStrategy for RelevanceOrder {
    fn order(
        &self,
        query: &str,
        groups: Vec<ResultGroup<BilingualEntry>>,
    ) -> Vec<ResultGroup<ScoredEntry>> {
        groups
            .into_iter()
            .map(|group| {
                let mut scored = score_group(&self.scorer, query, group);
                // sort_by is stable
                scored
                    .entries
                    .sort_by(|a, b| b.score.total_cmp(&a.score));
                scored
            })
            .collect()
    }
}

/// Scores entries but leaves them where they are
pub struct PassThroughOrder {
    scorer: RelevanceScorer,
}

impl PassThroughOrder {
    pub fn new(scorer: RelevanceScorer) -> Self {
        Self { scorer }
    }
}

impl OrderStrategy for PassThroughOrder {
    fn order(
        &self,
        query: &str,
        groups: Vec<ResultGroup<BilingualEntry>>,
    ) -> Vec<ResultGroup<ScoredEntry>> {
        groups
            .into_iter()
            .map(|group| score_group(&self.scorer, query, group))
            .collect()
    }
}

/// Closest monolingual entries first
pub fn order_monolingual(
    scorer: &RelevanceScorer,
    query: &str,
    entries: Vec<MonolingualEntry>,
) -> Vec<MonolingualEntry> {
    let mut keyed: Vec<(usize, MonolingualEntry)> = entries
        .into_iter()
        .map(|entry| {
            (
                scorer.object_distance(query, &entry.content, entry.entry_type),
                entry,
            )
        })
        .collect();
    keyed.sort_by_key(|(distance, _)| *distance);
    keyed.into_iter().map(|(_, entry)| entry).collect()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use glossa_types::{DictionaryObject, EntryType, Language};

    use super::*;
    use crate::normalize::NormalizerSet;

    fn scorer() -> RelevanceScorer {
        RelevanceScorer::new(Arc::new(NormalizerSet::new()))
    }

    fn entry(source: &str, target: &str) -> BilingualEntry {
        BilingualEntry::new(
            DictionaryObject::new(Language::parse("de").unwrap(), source),
            DictionaryObject::new(Language::parse("en").unwrap(), target),
            EntryType::Noun,
        )
    }

    fn group(entries: Vec<BilingualEntry>) -> Vec<ResultGroup<BilingualEntry>> {
        vec![ResultGroup::new("de-en", "German -> English").with_entries(entries)]
    }

    fn sources(groups: &[ResultGroup<ScoredEntry>]) -> Vec<&str> {
        groups[0]
            .entries
            .iter()
            .map(|e| e.entry.source.general_form.as_str())
            .collect()
    }

    #[test]
    fn relevance_sorts_descending_and_stable() {
        let input = group(vec![
            entry("hus", "home"),
            entry("huse", "hause"),
            entry("Hase", "hare"),
            entry("hose", "trousers"),
        ]);

        let ordered = RelevanceOrder::new(scorer()).order("hase", input);

        assert_eq!(sources(&ordered), ["Hase", "huse", "hose", "hus"]);
        assert_eq!(ordered[0].entries[0].score, 1.0);
        assert_eq!(ordered[0].key, "de-en");
    }

    #[test]
    fn pass_through_keeps_order() {
        let input = group(vec![entry("hus", "home"), entry("hase", "hare")]);

        let ordered = PassThroughOrder::new(scorer()).order("hase", input);

        assert_eq!(sources(&ordered), ["hus", "hase"]);
        assert_eq!(ordered[0].entries[1].score, 1.0);
    }

    #[test]
    fn order_is_a_permutation() {
        let entries = vec![
            entry("a", "b"),
            entry("hase", "hare"),
            entry("a", "b"),
            entry("haus", "house"),
        ];

        let ordered = RelevanceOrder::new(scorer()).order("haus", group(entries.clone()));

        let mut before: Vec<_> = entries.iter().map(|e| e.source.general_form.clone()).collect();
        let mut after: Vec<_> = ordered[0]
            .entries
            .iter()
            .map(|e| e.entry.source.general_form.clone())
            .collect();
        before.sort();
        after.sort();
        assert_eq!(before, after);
    }

    #[test]
    fn monolingual_entries_by_distance() {
        let en = Language::parse("en").unwrap();
        let entries = vec![
            MonolingualEntry::new(DictionaryObject::new(en.clone(), "eating"), EntryType::Verb),
            MonolingualEntry::new(DictionaryObject::new(en.clone(), "eat"), EntryType::Verb),
            MonolingualEntry::new(DictionaryObject::new(en, "meat"), EntryType::Noun),
        ];

        let ordered = order_monolingual(&scorer(), "eat", entries);

        let forms: Vec<_> = ordered.iter().map(|e| e.content.general_form.as_str()).collect();
        assert_eq!(forms, ["eat", "meat", "eating"]);
    }
}
