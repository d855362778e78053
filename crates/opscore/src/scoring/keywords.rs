/// First-match-wins keyword classifier over free text.
///
/// Categories are checked in declaration order; a category matches when any of
/// its keywords appears as a case-insensitive substring. Order is part of the
/// contract: text containing keywords from two categories resolves to
/// whichever is declared first.
pub struct KeywordClassifier<T: Copy> {
    categories: Vec<(T, &'static [&'static str])>,
    fallback: T,
}

impl<T: Copy> KeywordClassifier<T> {
    pub fn new(categories: Vec<(T, &'static [&'static str])>, fallback: T) -> Self {
        Self {
            categories,
            fallback,
        }
    }

    pub fn classify(&self, text: &str) -> T {
        let lowered = text.to_lowercase();
        for (label, keywords) in &self.categories {
            if keywords.iter().any(|keyword| lowered.contains(keyword)) {
                return *label;
            }
        }
        self.fallback
    }
}
