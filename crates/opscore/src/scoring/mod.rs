//! Generic scoring primitives shared by every department engine.
//!
//! The whole services layer repeats one design: sum weighted condition
//! increments over a flat record, clamp the total to a documented bound, then
//! bucket the score through ordered thresholds. These modules capture that
//! pattern once so each department only declares its rule table.

mod keywords;
mod record;
mod rules;
mod text;
mod thresholds;

pub use keywords::KeywordClassifier;
pub use record::{FieldValue, Record};
pub use rules::{Rule, RuleHit, RuleTable, ScoreCard};
pub use text::TextFeatures;
pub use thresholds::ThresholdClassifier;

/// Round to two decimals, matching the precision every scoring report uses.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::round2;

    #[test]
    fn round2_truncates_to_cents() {
        assert_eq!(round2(0.125), 0.13);
        assert_eq!(round2(0.1234), 0.12);
        assert_eq!(round2(99.999), 100.0);
    }
}
