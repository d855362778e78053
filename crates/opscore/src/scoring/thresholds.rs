/// Maps a continuous score to a discrete label via ordered cutoffs.
///
/// Bands are evaluated in the order given, highest bound first: the label of
/// the first bound the score meets or exceeds wins, otherwise the fallback.
pub struct ThresholdClassifier<T: Copy> {
    bands: Vec<(f64, T)>,
    fallback: T,
}

impl<T: Copy> ThresholdClassifier<T> {
    pub fn new(bands: Vec<(f64, T)>, fallback: T) -> Self {
        Self { bands, fallback }
    }

    pub fn classify(&self, score: f64) -> T {
        for (bound, label) in &self.bands {
            if score >= *bound {
                return *label;
            }
        }
        self.fallback
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn severity() -> ThresholdClassifier<&'static str> {
        ThresholdClassifier::new(
            vec![(0.8, "critical"), (0.5, "high"), (0.3, "medium")],
            "low",
        )
    }

    #[test]
    fn first_met_bound_wins() {
        let classifier = severity();
        assert_eq!(classifier.classify(0.9), "critical");
        assert_eq!(classifier.classify(0.8), "critical");
        assert_eq!(classifier.classify(0.5), "high");
        assert_eq!(classifier.classify(0.31), "medium");
        assert_eq!(classifier.classify(0.0), "low");
    }

    #[test]
    fn classification_is_monotonic_in_score() {
        let classifier = severity();
        let rank = |label: &str| match label {
            "low" => 0,
            "medium" => 1,
            "high" => 2,
            _ => 3,
        };

        let mut previous = rank(classifier.classify(0.0));
        for step in 1..=100 {
            let current = rank(classifier.classify(step as f64 / 100.0));
            assert!(current >= previous, "severity regressed at step {step}");
            previous = current;
        }
    }
}
