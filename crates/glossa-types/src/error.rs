#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("Invalid language identifier: {0}")]
    InvalidLanguage(String),

    #[error("Invalid dictionary query: {0}")]
    InvalidDictionary(String),

    #[error("Dictionary must translate between two different languages: {0}")]
    SameLanguage(String),
}
