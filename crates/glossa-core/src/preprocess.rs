use unicode_normalization::UnicodeNormalization;

/// Turns displayed text into the form used for comparisons
pub trait Preprocessor {
    fn process(&self, text: &str) -> String {
        let text = text.trim();

        if text.is_empty() {
            return String::new();
        }

        // Unicode normalization (NFKC)
        let text: String = text.nfkc().collect();

        // Collapse runs of whitespace, including newlines
        text.split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase()
    }
}

pub struct ComparisonPreprocessor;
impl Preprocessor for ComparisonPreprocessor {}
