use std::sync::Arc;

use glossa_types::{BilingualEntry, DictionaryObject, EntryType};

use crate::normalize::NormalizerSet;

/// Edit distance over unicode scalar values
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut previous: Vec<usize> = (0..=b.len()).collect();
    let mut current = vec![0; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        current[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let substitution = previous[j] + usize::from(ca != cb);
            current[j + 1] = substitution
                .min(previous[j + 1] + 1)
                .min(current[j] + 1);
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[b.len()]
}

/// `1 - d / (1 + d)`: 1.0 for an exact match, approaching 0.0 as `d` grows
pub fn score_from_distance(distance: usize) -> f64 {
    let d = distance as f64;
    1.0 - d / (1.0 + d)
}

/// Scores entries against the query they were looked up with
#[derive(Clone)]
pub struct RelevanceScorer {
    normalizers: Arc<NormalizerSet>,
}

impl RelevanceScorer {
    pub fn new(normalizers: Arc<NormalizerSet>) -> Self {
        Self { normalizers }
    }

    /// Distance between the query and one side, both compared in that
    /// side's language and the entry's type
    fn side_distance(&self, query: &str, side: &DictionaryObject, entry_type: EntryType) -> usize {
        let query = self
            .normalizers
            .comparison_text(query, &side.language, entry_type);
        let form = self.normalizers.comparison_form(side, entry_type);
        levenshtein(&query, &form)
    }

    /// Smaller of the source and target distances; an entry matching in
    /// either direction is close
    pub fn distance(&self, query: &str, entry: &BilingualEntry) -> usize {
        let source = self.side_distance(query, &entry.source, entry.entry_type);
        if entry.target.general_form.trim().is_empty() {
            return source;
        }
        source.min(self.side_distance(query, &entry.target, entry.entry_type))
    }

    pub fn score(&self, query: &str, entry: &BilingualEntry) -> f64 {
        score_from_distance(self.distance(query, entry))
    }

    pub fn object_distance(&self, query: &str, object: &DictionaryObject, entry_type: EntryType) -> usize {
        self.side_distance(query, object, entry_type)
    }
}
