use serde::Serialize;

/// Surface features extracted from free text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextFeatures {
    pub length: usize,
    pub word_count: usize,
    pub avg_word_length: f64,
    pub uppercase_ratio: f64,
}

impl TextFeatures {
    pub fn from_text(text: &str) -> Self {
        let words: Vec<&str> = text.split_whitespace().collect();
        let avg_word_length = if words.is_empty() {
            0.0
        } else {
            words.iter().map(|word| word.len()).sum::<usize>() as f64 / words.len() as f64
        };
        let uppercase_ratio = if text.is_empty() {
            0.0
        } else {
            text.chars().filter(|c| c.is_uppercase()).count() as f64 / text.chars().count() as f64
        };

        Self {
            length: text.len(),
            word_count: words.len(),
            avg_word_length,
            uppercase_ratio,
        }
    }
}
