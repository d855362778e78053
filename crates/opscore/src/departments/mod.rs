//! Department engines wrapping the shared rule-scoring pattern.
//!
//! Every engine is stateless and side-effect free: construct once, call from
//! any number of tasks. The weights and cutoffs are the canonical rule tables
//! each department runs in production.

pub mod finance;
pub mod hr;
pub mod marketing;
pub mod sales;
pub mod security;
pub mod support;

use serde::{Deserialize, Serialize};

/// Three-step risk bucket used by retention and churn assessments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

/// Four-step severity used by security threats and ticket priorities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

/// How much weight to put on a rule-derived verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

/// Bundle of every department engine, built once at startup and shared.
#[derive(Default)]
pub struct DepartmentSuite {
    pub finance: finance::FinanceEngine,
    pub hr: hr::HrEngine,
    pub support: support::SupportEngine,
    pub marketing: marketing::MarketingEngine,
    pub sales: sales::SalesEngine,
    pub security: security::SecurityEngine,
}
