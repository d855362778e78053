//! Deterministic rule-scoring engines for the department operations backend.
//!
//! Each department (HR, Finance, Support, Marketing, Sales, Security) wraps the
//! same pattern: a weighted rule table accumulates a bounded score from a flat
//! record of fields, threshold cutoffs turn the score into a categorical label,
//! and keyword tables classify free text. The engines are pure functions over
//! their inputs; persistence and transport live in the callers.

pub mod config;
pub mod departments;
pub mod error;
pub mod registry;
pub mod scoring;
pub mod telemetry;
