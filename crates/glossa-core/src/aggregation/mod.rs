pub mod group;
pub mod merge;
pub mod order;
pub mod relevance;

pub use group::{
    ConsolidatedGrouping, DictionaryGrouping, EntryTypeGrouping, GroupingStrategy, ResultGroup,
};
pub use merge::{
    BilingualEntryMerger, DictionaryObjectMerger, IdentityMerger, MergeService, Mergeable,
    MonolingualEntryMerger, SimilarElementsMerger,
};
pub use order::{OrderStrategy, PassThroughOrder, RelevanceOrder, ScoredEntry};
pub use relevance::RelevanceScorer;
