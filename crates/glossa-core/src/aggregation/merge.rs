use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use glossa_types::{
    BilingualEntry, DictionaryObject, EntryType, GrammaticalGender, Language, MonolingualEntry,
};

use crate::error::MergeError;
use crate::normalize::NormalizerSet;
use crate::preprocess::{ComparisonPreprocessor, Preprocessor};

const JOINED_ATTRIBUTES_SEPARATOR: &str = ", ";

/// Collapses near-duplicates of one element type.
///
/// Implementations keep the first occurrence of every duplicate in place and
/// only remove later ones, so the output is never longer than the input and
/// merging twice changes nothing.
pub trait SimilarElementsMerger<T>: Send + Sync {
    fn name(&self) -> &'static str;

    fn merge(&self, elements: Vec<T>) -> Result<Vec<T>, MergeError>;
}

/// Fallback for types without a dedicated merger
#[derive(Debug, Default, Clone, Copy)]
pub struct IdentityMerger;

impl<T> SimilarElementsMerger<T> for IdentityMerger {
    fn name(&self) -> &'static str {
        "identity"
    }

    fn merge(&self, elements: Vec<T>) -> Result<Vec<T>, MergeError> {
        Ok(elements)
    }
}

type MergerSlot<T> = Option<Arc<dyn SimilarElementsMerger<T>>>;

/// Element types with a slot in the [`MergeService`] table
pub trait Mergeable: Sized + Send + Sync + 'static {
    const TYPE_NAME: &'static str;

    fn slot(service: &MergeService) -> &MergerSlot<Self>;

    fn slot_mut(service: &mut MergeService) -> &mut MergerSlot<Self>;
}

/// One registered merger per element type
#[derive(Default, Clone)]
pub struct MergeService {
    bilingual: MergerSlot<BilingualEntry>,
    monolingual: MergerSlot<MonolingualEntry>,
    objects: MergerSlot<DictionaryObject>,
}

impl Mergeable for BilingualEntry {
    const TYPE_NAME: &'static str = "bilingual entries";

    fn slot(service: &MergeService) -> &MergerSlot<Self> {
        &service.bilingual
    }

    fn slot_mut(service: &mut MergeService) -> &mut MergerSlot<Self> {
        &mut service.bilingual
    }
}

impl Mergeable for MonolingualEntry {
    const TYPE_NAME: &'static str = "monolingual entries";

    fn slot(service: &MergeService) -> &MergerSlot<Self> {
        &service.monolingual
    }

    fn slot_mut(service: &mut MergeService) -> &mut MergerSlot<Self> {
        &mut service.monolingual
    }
}

impl Mergeable for DictionaryObject {
    const TYPE_NAME: &'static str = "dictionary objects";

    fn slot(service: &MergeService) -> &MergerSlot<Self> {
        &service.objects
    }

    fn slot_mut(service: &mut MergeService) -> &mut MergerSlot<Self> {
        &mut service.objects
    }
}

impl MergeService {
    pub fn new() -> Self {
        Self::default()
    }

    /// All built-in mergers, comparing through `normalizers`
    pub fn with_defaults(normalizers: Arc<NormalizerSet>) -> Self {
        Self {
            bilingual: Some(Arc::new(BilingualEntryMerger::new(normalizers.clone()))),
            monolingual: Some(Arc::new(MonolingualEntryMerger::new(normalizers.clone()))),
            objects: Some(Arc::new(DictionaryObjectMerger::new(normalizers))),
        }
    }

    pub fn register<T: Mergeable>(
        &mut self,
        merger: Arc<dyn SimilarElementsMerger<T>>,
    ) -> Result<(), MergeError> {
        let slot = T::slot_mut(self);
        if slot.is_some() {
            return Err(MergeError::DuplicateMerger(T::TYPE_NAME));
        }

        tracing::debug!("Registered {} as merger for {}", merger.name(), T::TYPE_NAME);
        *slot = Some(merger);
        Ok(())
    }

    /// Dispatch to the merger registered for `T`, or leave `elements` as they are
    pub fn merge<T: Mergeable>(&self, elements: Vec<T>) -> Result<Vec<T>, MergeError> {
        let input = elements.len();
        let (name, merged) = match T::slot(self) {
            Some(merger) => (merger.name(), merger.merge(elements)?),
            None => (
                <IdentityMerger as SimilarElementsMerger<T>>::name(&IdentityMerger),
                <IdentityMerger as SimilarElementsMerger<T>>::merge(&IdentityMerger, elements)?,
            ),
        };

        if merged.len() > input {
            return Err(MergeError::CardinalityViolation {
                merger: name,
                input,
                output: merged.len(),
            });
        }
        Ok(merged)
    }
}

fn simple_normalize(value: &str) -> String {
    value.trim().to_lowercase()
}

fn merge_attribute(kept: &mut Option<String>, other: Option<&String>) {
    let Some(other) = other.filter(|o| !o.trim().is_empty()) else {
        return;
    };

    match kept {
        Some(current) => {
            let known: HashSet<String> = current
                .split(JOINED_ATTRIBUTES_SEPARATOR)
                .map(simple_normalize)
                .collect();
            if !known.contains(&simple_normalize(other)) {
                current.push_str(JOINED_ATTRIBUTES_SEPARATOR);
                current.push_str(other);
            }
        }
        None => *kept = Some(other.clone()),
    }
}

fn merge_collection(kept: &mut Vec<String>, other: &[String]) {
    let mut known: HashSet<String> = kept.iter().map(|v| simple_normalize(v)).collect();
    for value in other {
        if known.insert(simple_normalize(value)) {
            kept.push(value.clone());
        }
    }
    kept.sort();
}

/// Fold the attributes of a duplicate into the object that is kept.
/// Language and general form of `kept` stay as they are.
fn fold_object(kept: &mut DictionaryObject, other: &DictionaryObject) {
    merge_attribute(&mut kept.description, other.description.as_ref());
    merge_attribute(&mut kept.domain, other.domain.as_ref());
    merge_attribute(&mut kept.abbreviation, other.abbreviation.as_ref());
    merge_attribute(&mut kept.pronunciation, other.pronunciation.as_ref());
    merge_collection(&mut kept.meanings, &other.meanings);
    merge_collection(&mut kept.alternate_forms, &other.alternate_forms);

    if !kept.gender.is_some_and(|g| g.is_known()) {
        if let Some(gender) = other.gender.filter(GrammaticalGender::is_known) {
            kept.gender = Some(gender);
        } else if kept.gender.is_none() {
            kept.gender = other.gender;
        }
    }
    if kept.syllabification.is_empty() {
        kept.syllabification = other.syllabification.clone();
    }
    for (form, value) in &other.additional_forms {
        kept.additional_forms
            .entry(*form)
            .or_insert_with(|| value.clone());
    }
}

/// Duplicates share the language pair, the entry type and the comparison
/// forms of both sides. Entries of the same pair listed in opposite
/// directions are compared in the direction seen first.
pub struct BilingualEntryMerger {
    normalizers: Arc<NormalizerSet>,
}

type BilingualKey = (Language, Language, EntryType, String, String);

impl BilingualEntryMerger {
    pub fn new(normalizers: Arc<NormalizerSet>) -> Self {
        Self { normalizers }
    }

    fn key(&self, entry: &BilingualEntry) -> BilingualKey {
        (
            entry.source.language.clone(),
            entry.target.language.clone(),
            entry.entry_type,
            self.normalizers.comparison_form(&entry.source, entry.entry_type),
            self.normalizers.comparison_form(&entry.target, entry.entry_type),
        )
    }
}

impl SimilarElementsMerger<BilingualEntry> for BilingualEntryMerger {
    fn name(&self) -> &'static str {
        "bilingual-entry"
    }

    fn merge(&self, elements: Vec<BilingualEntry>) -> Result<Vec<BilingualEntry>, MergeError> {
        // unordered language pair -> source language seen first
        let mut orientation: HashMap<(Language, Language), Language> = HashMap::new();
        let mut positions: HashMap<BilingualKey, usize> = HashMap::new();
        // whether the kept entry had to be inverted to get its key
        let mut kept_inverted: Vec<bool> = Vec::new();
        let mut merged: Vec<BilingualEntry> = Vec::with_capacity(elements.len());

        for entry in elements {
            let source = entry.source.language.clone();
            let target = entry.target.language.clone();
            let pair = if source <= target {
                (source.clone(), target)
            } else {
                (target, source.clone())
            };
            let expected_source = orientation.entry(pair).or_insert_with(|| source.clone());
            let inverted = *expected_source != source;

            let oriented = if inverted { entry.inverted() } else { entry.clone() };
            let key = self.key(&oriented);

            match positions.get(&key) {
                Some(&index) => {
                    let duplicate = if kept_inverted[index] {
                        oriented.inverted()
                    } else {
                        oriented
                    };
                    let kept = &mut merged[index];
                    fold_object(&mut kept.source, &duplicate.source);
                    fold_object(&mut kept.target, &duplicate.target);
                }
                None => {
                    positions.insert(key, merged.len());
                    kept_inverted.push(inverted);
                    merged.push(entry);
                }
            }
        }

        Ok(merged)
    }
}

/// Duplicates share language, entry type and comparison form. An entry of
/// unknown type joins the entries of the same form if they all share one
/// known type.
pub struct MonolingualEntryMerger {
    normalizers: Arc<NormalizerSet>,
}

impl MonolingualEntryMerger {
    pub fn new(normalizers: Arc<NormalizerSet>) -> Self {
        Self { normalizers }
    }

    fn form(&self, entry: &MonolingualEntry) -> (Language, String) {
        (
            entry.content.language.without_dialect(),
            ComparisonPreprocessor.process(&entry.content.general_form),
        )
    }
}

impl SimilarElementsMerger<MonolingualEntry> for MonolingualEntryMerger {
    fn name(&self) -> &'static str {
        "monolingual-entry"
    }

    fn merge(&self, elements: Vec<MonolingualEntry>) -> Result<Vec<MonolingualEntry>, MergeError> {
        let mut known_types: HashMap<(Language, String), HashSet<EntryType>> = HashMap::new();
        for entry in elements.iter().filter(|e| !e.entry_type.is_unknown()) {
            known_types
                .entry(self.form(entry))
                .or_default()
                .insert(entry.entry_type);
        }

        let mut positions: HashMap<(Language, EntryType, String), usize> = HashMap::new();
        let mut merged: Vec<MonolingualEntry> = Vec::with_capacity(elements.len());

        for mut entry in elements {
            let form = self.form(&entry);
            if entry.entry_type.is_unknown() {
                if let Some(types) = known_types.get(&form).filter(|t| t.len() == 1) {
                    if let Some(&single) = types.iter().next() {
                        entry.entry_type = single;
                    }
                }
            }

            let comparison = self.normalizers.comparison_form(&entry.content, entry.entry_type);
            let key = (form.0, entry.entry_type, comparison);

            match positions.get(&key) {
                Some(&index) => fold_object(&mut merged[index].content, &entry.content),
                None => {
                    positions.insert(key, merged.len());
                    merged.push(entry);
                }
            }
        }

        Ok(merged)
    }
}

/// Duplicates share comparison form and language. Used for similar-term
/// recommendations.
pub struct DictionaryObjectMerger {
    normalizers: Arc<NormalizerSet>,
}

impl DictionaryObjectMerger {
    pub fn new(normalizers: Arc<NormalizerSet>) -> Self {
        Self { normalizers }
    }
}

impl SimilarElementsMerger<DictionaryObject> for DictionaryObjectMerger {
    fn name(&self) -> &'static str {
        "dictionary-object"
    }

    fn merge(&self, elements: Vec<DictionaryObject>) -> Result<Vec<DictionaryObject>, MergeError> {
        let mut positions: HashMap<(String, Language), usize> = HashMap::new();
        let mut merged: Vec<DictionaryObject> = Vec::with_capacity(elements.len());

        for object in elements {
            let key = (
                self.normalizers.comparison_form(&object, EntryType::Unknown),
                object.language.clone(),
            );
            match positions.get(&key) {
                Some(&index) => fold_object(&mut merged[index], &object),
                None => {
                    positions.insert(key, merged.len());
                    merged.push(object);
                }
            }
        }

        Ok(merged)
    }
}
