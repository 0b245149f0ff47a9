pub mod dictionary;
pub mod entry;
pub mod error;
pub mod language;
pub mod result;

pub use dictionary::BilingualDictionary;
pub use entry::{
    BilingualEntry, DictionaryObject, EntryType, GrammaticalCategory, GrammaticalForm,
    GrammaticalGender, MonolingualEntry, SynonymEntry, SynonymGroup,
};
pub use error::ParseError;
pub use language::Language;
pub use result::{EngineQueryResult, ExternalContent};
