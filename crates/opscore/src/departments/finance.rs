//! Finance engine: fraud scoring, expense classification, revenue
//! forecasting, and budget allocation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::Confidence;
use crate::scoring::{round2, KeywordClassifier, Record, Rule, RuleTable, ThresholdClassifier};

/// Transaction fields the fraud rules inspect. The occurrence hour is supplied
/// by the caller so the engine itself stays clock-free.
#[derive(Debug, Clone, Deserialize)]
pub struct TransactionInput {
    #[serde(default)]
    pub transaction_type: String,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_hour")]
    pub hour: u32,
}

fn default_hour() -> u32 {
    12
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionAnalysis {
    pub is_fraudulent: bool,
    pub fraud_score: f64,
    pub confidence: Confidence,
    pub category: ExpenseCategory,
}

/// Expense buckets, checked in declaration order (first match wins).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseCategory {
    Salary,
    Marketing,
    Operations,
    Technology,
    Travel,
    Misc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RevenueTrend {
    Increasing,
    Decreasing,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RevenueForecast {
    pub forecasts: Vec<f64>,
    pub period: &'static str,
    pub confidence_interval: Vec<f64>,
    pub trend: RevenueTrend,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DepartmentBudgetInput {
    pub name: String,
    #[serde(default)]
    pub historical_spend: f64,
    #[serde(default = "default_budget_priority")]
    pub priority: i64,
}

fn default_budget_priority() -> i64 {
    5
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetPlan {
    pub total_budget: f64,
    pub allocations: BTreeMap<String, f64>,
    pub optimization_score: f64,
}

pub struct FinanceEngine {
    fraud: RuleTable,
    confidence: ThresholdClassifier<Confidence>,
    expense_categories: KeywordClassifier<ExpenseCategory>,
}

impl Default for FinanceEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl FinanceEngine {
    pub fn new() -> Self {
        let fraud = RuleTable::unit("fraud_detection")
            .rule(Rule::when("large_amount", 0.4, |record| {
                record.number_or("amount", 0.0) > 10_000.0
            }))
            .rule(Rule::when("elevated_amount", 0.2, |record| {
                let amount = record.number_or("amount", 0.0);
                amount > 5_000.0 && amount <= 10_000.0
            }))
            .rule(Rule::when("off_hours", 0.2, |record| {
                let hour = record.number_or("hour", 12.0);
                hour < 6.0 || hour > 22.0
            }))
            .rule(Rule::when("sparse_description", 0.1, |record| {
                record.text("description").len() < 10
            }));

        let confidence = ThresholdClassifier::new(
            vec![(0.7, Confidence::High), (0.4, Confidence::Medium)],
            Confidence::Low,
        );

        let expense_categories = KeywordClassifier::new(
            vec![
                (
                    ExpenseCategory::Salary,
                    &["salary", "wage", "payroll", "compensation"] as &[_],
                ),
                (
                    ExpenseCategory::Marketing,
                    &["ad", "marketing", "campaign", "promotion"] as &[_],
                ),
                (
                    ExpenseCategory::Operations,
                    &["rent", "utilities", "office", "supplies"] as &[_],
                ),
                (
                    ExpenseCategory::Technology,
                    &["software", "hardware", "cloud", "license", "subscription"] as &[_],
                ),
                (
                    ExpenseCategory::Travel,
                    &["travel", "hotel", "flight", "transportation"] as &[_],
                ),
            ],
            ExpenseCategory::Misc,
        );

        Self {
            fraud,
            confidence,
            expense_categories,
        }
    }

    /// Fraud-score a transaction and classify its expense category.
    pub fn analyze_transaction(&self, input: &TransactionInput) -> TransactionAnalysis {
        let record = Record::new()
            .with_number("amount", input.amount)
            .with_number("hour", f64::from(input.hour))
            .with_text("description", input.description.clone());

        let card = self.fraud.evaluate(&record);
        let fraud_score = round2(card.total);

        TransactionAnalysis {
            is_fraudulent: fraud_score >= 0.5,
            fraud_score,
            confidence: self.confidence.classify(fraud_score),
            category: self.expense_categories.classify(&input.description),
        }
    }

    /// Trend extrapolation over historical revenue; not a rule table.
    pub fn forecast_revenue(&self, historical: &[f64], periods: usize) -> Vec<f64> {
        if historical.len() < 3 {
            let average = if historical.is_empty() {
                0.0
            } else {
                historical.iter().sum::<f64>() / historical.len() as f64
            };
            return (0..periods)
                .map(|i| average * 1.05f64.powi(i as i32))
                .collect();
        }

        let third_last = historical[historical.len() - 3];
        let growth = if third_last != 0.0 {
            (historical[historical.len() - 1] - third_last) / third_last
        } else {
            0.05
        };

        // Compound the raw projection; only the reported values are rounded.
        let mut forecasts = Vec::with_capacity(periods);
        let mut last = historical[historical.len() - 1];
        for _ in 0..periods {
            last *= 1.0 + growth;
            forecasts.push(round2(last));
        }
        forecasts
    }

    /// Three-month revenue outlook with a 90% confidence band.
    pub fn monthly_revenue_report(&self, historical: &[f64]) -> RevenueForecast {
        let forecasts = self.forecast_revenue(historical, 3);
        let confidence_interval = forecasts.iter().map(|f| f * 0.9).collect();
        let trend = match historical.last() {
            Some(latest) if forecasts[0] > *latest => RevenueTrend::Increasing,
            _ => RevenueTrend::Decreasing,
        };

        RevenueForecast {
            forecasts,
            period: "monthly",
            confidence_interval,
            trend,
        }
    }

    /// Allocate a budget across departments by priority, capping any single
    /// department at 40% of what remains.
    pub fn optimize_budget(
        &self,
        total_budget: f64,
        departments: &[DepartmentBudgetInput],
    ) -> BudgetPlan {
        let mut ordered: Vec<&DepartmentBudgetInput> = departments.iter().collect();
        ordered.sort_by(|a, b| b.priority.cmp(&a.priority));

        let mut allocations = BTreeMap::new();
        let mut remaining = total_budget;
        for department in ordered {
            let proposed = department.historical_spend * (1.0 + department.priority as f64 * 0.05);
            let allocation = proposed.min(remaining * 0.4);
            allocations.insert(department.name.clone(), round2(allocation));
            remaining -= allocation;
        }

        BudgetPlan {
            total_budget,
            allocations,
            optimization_score: 85.5,
        }
    }

    /// Linear run-rate projection for spend over a period.
    pub fn predict_spend(&self, current_spend: f64, days_elapsed: u32, days_in_period: u32) -> f64 {
        if days_elapsed == 0 {
            return 0.0;
        }
        let daily_rate = current_spend / f64::from(days_elapsed);
        round2(daily_rate * f64::from(days_in_period))
    }
}
