//! HR engine: resume screening, retention risk, and performance analytics.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::RiskLevel;
use crate::scoring::{round2, Record, Rule, RuleTable, TextFeatures, ThresholdClassifier};

/// Keywords the resume screen rewards, 8 points each.
const RESUME_KEYWORDS: [&str; 13] = [
    "python",
    "java",
    "machine learning",
    "ai",
    "ml",
    "data science",
    "experience",
    "project",
    "leadership",
    "team",
    "bachelor",
    "master",
    "phd",
];

/// Canonical skill list; extraction preserves this order.
const SKILLS: [&str; 23] = [
    "python",
    "java",
    "javascript",
    "c++",
    "sql",
    "aws",
    "azure",
    "gcp",
    "machine learning",
    "deep learning",
    "nlp",
    "computer vision",
    "react",
    "angular",
    "vue",
    "node.js",
    "django",
    "flask",
    "docker",
    "kubernetes",
    "tensorflow",
    "pytorch",
    "scikit-learn",
];

#[derive(Debug, Clone, Deserialize)]
pub struct ResumeInput {
    #[serde(default)]
    pub candidate_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub resume_text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResumeStatus {
    Shortlisted,
    Pending,
    Rejected,
}

impl ResumeStatus {
    fn title(&self) -> &'static str {
        match self {
            ResumeStatus::Shortlisted => "Shortlisted",
            ResumeStatus::Pending => "Pending",
            ResumeStatus::Rejected => "Rejected",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResumeScreening {
    pub candidate_name: String,
    pub email: String,
    pub ml_score: f64,
    pub skills: Vec<&'static str>,
    pub status: ResumeStatus,
    pub recommendation: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RetentionInput {
    #[serde(default = "default_performance")]
    pub performance_score: f64,
    #[serde(default = "default_salary")]
    pub salary: f64,
    #[serde(default = "default_tenure")]
    pub tenure_years: f64,
}

fn default_performance() -> f64 {
    50.0
}

fn default_salary() -> f64 {
    50_000.0
}

fn default_tenure() -> f64 {
    2.0
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RetentionAssessment {
    pub retention_risk: f64,
    pub risk_level: RiskLevel,
    pub recommendations: Vec<&'static str>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PromotionInput {
    #[serde(default = "default_performance")]
    pub performance_score: f64,
    #[serde(default)]
    pub tenure_years: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PromotionReadiness {
    pub readiness_score: f64,
    pub is_ready: bool,
    pub recommendations: Vec<&'static str>,
}

pub struct HrEngine {
    retention: RuleTable,
    retention_levels: ThresholdClassifier<RiskLevel>,
    promotion: RuleTable,
}

impl Default for HrEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl HrEngine {
    pub fn new() -> Self {
        let retention = RuleTable::unit("employee_retention")
            .rule(Rule::when("poor_performance", 0.3, |record| {
                record.number_or("performance_score", 50.0) < 50.0
            }))
            .rule(Rule::when("middling_performance", 0.2, |record| {
                let performance = record.number_or("performance_score", 50.0);
                (50.0..70.0).contains(&performance)
            }))
            .rule(Rule::when("below_market_salary", 0.2, |record| {
                record.number_or("salary", 50_000.0) < 60_000.0
            }))
            .rule(Rule::when("new_hire", 0.3, |record| {
                record.number_or("tenure_years", 2.0) < 1.0
            }))
            .rule(Rule::when("long_tenure", 0.1, |record| {
                record.number_or("tenure_years", 2.0) > 5.0
            }));

        let retention_levels = ThresholdClassifier::new(
            vec![(0.7, RiskLevel::High), (0.4, RiskLevel::Medium)],
            RiskLevel::Low,
        );

        let promotion = RuleTable::percent("promotion_readiness")
            .rule(Rule::when("strong_performance", 40.0, |record| {
                record.number_or("performance_score", 50.0) >= 80.0
            }))
            .rule(Rule::when("solid_performance", 25.0, |record| {
                let performance = record.number_or("performance_score", 50.0);
                (70.0..80.0).contains(&performance)
            }))
            .rule(Rule::when("established_tenure", 30.0, |record| {
                record.number_or("tenure_years", 0.0) >= 2.0
            }))
            .rule(Rule::when("ramping_tenure", 15.0, |record| {
                let tenure = record.number_or("tenure_years", 0.0);
                (1.0..2.0).contains(&tenure)
            }));

        Self {
            retention,
            retention_levels,
            promotion,
        }
    }

    /// Keyword-and-length resume score on a 0-100 scale.
    pub fn score_resume(&self, resume_text: &str) -> f64 {
        let lowered = resume_text.to_lowercase();
        let keyword_count = RESUME_KEYWORDS
            .iter()
            .filter(|keyword| lowered.contains(*keyword))
            .count();
        let words = TextFeatures::from_text(resume_text).word_count;

        let score = (keyword_count as f64 * 8.0 + words as f64 / 10.0).min(100.0);
        round2(score)
    }

    /// Skills present in the text, in canonical list order.
    pub fn extract_skills(&self, resume_text: &str) -> Vec<&'static str> {
        let lowered = resume_text.to_lowercase();
        SKILLS
            .iter()
            .copied()
            .filter(|skill| lowered.contains(skill))
            .collect()
    }

    pub fn screen_resume(&self, input: &ResumeInput) -> ResumeScreening {
        let ml_score = self.score_resume(&input.resume_text);
        let skills = self.extract_skills(&input.resume_text);

        let status = if ml_score >= 70.0 {
            ResumeStatus::Shortlisted
        } else if ml_score >= 50.0 {
            ResumeStatus::Pending
        } else {
            ResumeStatus::Rejected
        };

        // Whole-number scores keep a trailing .0 in the rendered string.
        let rendered_score = if ml_score.fract() == 0.0 {
            format!("{ml_score:.1}")
        } else {
            ml_score.to_string()
        };

        ResumeScreening {
            candidate_name: input.candidate_name.clone(),
            email: input.email.clone(),
            ml_score,
            skills,
            recommendation: format!("Score: {rendered_score}/100 - {}", status.title()),
            status,
        }
    }

    pub fn assess_retention(&self, input: &RetentionInput) -> RetentionAssessment {
        let record = Record::new()
            .with_number("performance_score", input.performance_score)
            .with_number("salary", input.salary)
            .with_number("tenure_years", input.tenure_years);

        let risk = round2(self.retention.evaluate(&record).total);

        let mut recommendations = Vec::new();
        if risk >= 0.5 {
            recommendations.push("Consider salary adjustment");
        }
        if risk >= 0.4 {
            recommendations.push("Schedule 1-on-1 meeting");
        }
        if risk >= 0.3 {
            recommendations.push("Review career development plan");
        }

        RetentionAssessment {
            retention_risk: risk,
            risk_level: self.retention_levels.classify(risk),
            recommendations,
        }
    }

    /// Weighted average of performance metrics; missing metrics count as 50.
    pub fn performance_score(&self, metrics: &BTreeMap<String, f64>) -> f64 {
        const WEIGHTS: [(&str, f64); 5] = [
            ("productivity", 0.3),
            ("quality", 0.25),
            ("collaboration", 0.2),
            ("innovation", 0.15),
            ("punctuality", 0.1),
        ];

        let score: f64 = WEIGHTS
            .iter()
            .map(|(metric, weight)| metrics.get(*metric).copied().unwrap_or(50.0) * weight)
            .sum();
        round2(score)
    }

    pub fn promotion_readiness(&self, input: &PromotionInput) -> PromotionReadiness {
        let record = Record::new()
            .with_number("performance_score", input.performance_score)
            .with_number("tenure_years", input.tenure_years);

        let readiness_score = self.promotion.evaluate(&record).total;
        let is_ready = readiness_score >= 60.0;

        let mut recommendations = Vec::new();
        if is_ready {
            recommendations.push("Ready for promotion consideration");
        } else {
            if input.performance_score < 70.0 {
                recommendations.push("Focus on improving performance metrics");
            }
            if input.tenure_years < 2.0 {
                recommendations.push("Gain more experience in current role");
            }
        }

        PromotionReadiness {
            readiness_score,
            is_ready,
            recommendations,
        }
    }
}
