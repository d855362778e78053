//! Sales engine: churn prediction, customer lifetime value, and deal
//! forecasting.

use serde::{Deserialize, Serialize};

use super::{Confidence, RiskLevel};
use crate::scoring::{round2, Record, Rule, RuleTable, ThresholdClassifier};

#[derive(Debug, Clone, Deserialize)]
pub struct ChurnInput {
    #[serde(default)]
    pub days_since_last_activity: f64,
    #[serde(default)]
    pub support_tickets: f64,
    #[serde(default)]
    pub payment_failures: f64,
    #[serde(default = "default_engagement")]
    pub engagement_score: f64,
}

fn default_engagement() -> f64 {
    50.0
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChurnAssessment {
    pub churn_risk: f64,
    pub risk_level: RiskLevel,
    pub retention_actions: Vec<&'static str>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LifetimeValueInput {
    #[serde(default)]
    pub avg_purchase_value: f64,
    #[serde(default)]
    pub purchase_frequency: f64,
    #[serde(default = "default_lifespan_months")]
    pub customer_lifespan_months: f64,
}

fn default_lifespan_months() -> f64 {
    24.0
}

/// Pipeline stage; unknown stages fall back to the initial-stage numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DealStage {
    Initial,
    Qualified,
    Proposal,
    Negotiation,
    Closing,
    #[serde(other)]
    Unknown,
}

impl DealStage {
    fn base_probability(&self) -> f64 {
        match self {
            DealStage::Initial | DealStage::Unknown => 0.10,
            DealStage::Qualified => 0.25,
            DealStage::Proposal => 0.50,
            DealStage::Negotiation => 0.70,
            DealStage::Closing => 0.90,
        }
    }

    fn expected_days_to_close(&self) -> u32 {
        match self {
            DealStage::Initial => 60,
            DealStage::Qualified => 45,
            DealStage::Proposal | DealStage::Unknown => 30,
            DealStage::Negotiation => 15,
            DealStage::Closing => 7,
        }
    }
}

fn default_stage() -> DealStage {
    DealStage::Initial
}

#[derive(Debug, Clone, Deserialize)]
pub struct DealInput {
    #[serde(default = "default_stage")]
    pub stage: DealStage,
    #[serde(default)]
    pub value: f64,
    #[serde(default)]
    pub days_in_pipeline: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DealForecast {
    pub close_probability: f64,
    pub estimated_days_to_close: u32,
    pub forecast_value: f64,
    pub confidence: Confidence,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CustomerHealthInput {
    #[serde(default)]
    pub customer_id: Option<String>,
    #[serde(flatten)]
    pub churn: ChurnInput,
    #[serde(flatten)]
    pub value: LifetimeValueInput,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomerHealth {
    pub customer_id: Option<String>,
    pub health_score: f64,
    pub churn_risk: f64,
    pub risk_level: RiskLevel,
    pub lifetime_value: f64,
    pub retention_actions: Vec<&'static str>,
}

pub struct SalesEngine {
    churn: RuleTable,
    churn_levels: ThresholdClassifier<RiskLevel>,
}

impl Default for SalesEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl SalesEngine {
    pub fn new() -> Self {
        let churn = RuleTable::unit("churn_prediction")
            .rule(Rule::when("dormant_account", 0.4, |record| {
                record.number_or("days_since_last_activity", 0.0) > 90.0
            }))
            .rule(Rule::when("slowing_activity", 0.2, |record| {
                let days = record.number_or("days_since_last_activity", 0.0);
                days > 30.0 && days <= 90.0
            }))
            .rule(Rule::when("heavy_support_load", 0.2, |record| {
                record.number_or("support_tickets", 0.0) > 5.0
            }))
            .rule(Rule::when("payment_failures", 0.3, |record| {
                record.number_or("payment_failures", 0.0) > 0.0
            }))
            .rule(Rule::when("low_engagement", 0.3, |record| {
                record.number_or("engagement_score", 50.0) < 30.0
            }));

        let churn_levels = ThresholdClassifier::new(
            vec![(0.7, RiskLevel::High), (0.4, RiskLevel::Medium)],
            RiskLevel::Low,
        );

        Self {
            churn,
            churn_levels,
        }
    }

    pub fn predict_churn(&self, input: &ChurnInput) -> ChurnAssessment {
        let record = Record::new()
            .with_number("days_since_last_activity", input.days_since_last_activity)
            .with_number("support_tickets", input.support_tickets)
            .with_number("payment_failures", input.payment_failures)
            .with_number("engagement_score", input.engagement_score);

        let churn_risk = round2(self.churn.evaluate(&record).total);

        let mut retention_actions = Vec::new();
        if churn_risk >= 0.5 {
            retention_actions.push("Offer discount or incentive");
        }
        if churn_risk >= 0.4 {
            retention_actions.push("Schedule check-in call");
        }
        if churn_risk >= 0.3 {
            retention_actions.push("Send engagement campaign");
        }

        ChurnAssessment {
            churn_risk,
            risk_level: self.churn_levels.classify(churn_risk),
            retention_actions,
        }
    }

    /// CLV = average purchase value x purchase frequency x lifespan in years.
    pub fn lifetime_value(&self, input: &LifetimeValueInput) -> f64 {
        round2(
            input.avg_purchase_value
                * input.purchase_frequency
                * (input.customer_lifespan_months / 12.0),
        )
    }

    pub fn forecast_deal(&self, input: &DealInput) -> DealForecast {
        let mut probability = input.stage.base_probability();

        // Stale deals close less often; brand-new ones are still uncertain.
        if input.days_in_pipeline > 90.0 {
            probability *= 0.7;
        } else if input.days_in_pipeline < 7.0 {
            probability *= 0.9;
        }

        let confidence = match input.stage {
            DealStage::Negotiation | DealStage::Closing => Confidence::High,
            _ => Confidence::Medium,
        };

        DealForecast {
            close_probability: round2(probability),
            estimated_days_to_close: input.stage.expected_days_to_close(),
            forecast_value: round2(input.value * probability),
            confidence,
        }
    }

    pub fn customer_health(&self, input: &CustomerHealthInput) -> CustomerHealth {
        let churn = self.predict_churn(&input.churn);
        let lifetime_value = self.lifetime_value(&input.value);

        CustomerHealth {
            customer_id: input.customer_id.clone(),
            health_score: round2(100.0 - churn.churn_risk * 100.0),
            churn_risk: churn.churn_risk,
            risk_level: churn.risk_level,
            lifetime_value,
            retention_actions: churn.retention_actions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> SalesEngine {
        SalesEngine::new()
    }

    #[test]
    fn inactive_customer_with_payment_failures_is_high_risk() {
        let assessment = engine().predict_churn(&ChurnInput {
            days_since_last_activity: 120.0,
            support_tickets: 7.0,
            payment_failures: 1.0,
            engagement_score: 20.0,
        });

        assert_eq!(assessment.churn_risk, 1.0);
        assert_eq!(assessment.risk_level, RiskLevel::High);
        assert_eq!(
            assessment.retention_actions,
            vec![
                "Offer discount or incentive",
                "Schedule check-in call",
                "Send engagement campaign"
            ]
        );
    }

    #[test]
    fn engaged_customer_scores_zero_risk() {
        let assessment = engine().predict_churn(&ChurnInput {
            days_since_last_activity: 5.0,
            support_tickets: 1.0,
            payment_failures: 0.0,
            engagement_score: 80.0,
        });

        assert_eq!(assessment.churn_risk, 0.0);
        assert_eq!(assessment.risk_level, RiskLevel::Low);
        assert!(assessment.retention_actions.is_empty());
    }

    #[test]
    fn lifetime_value_compounds_purchase_behavior() {
        let clv = engine().lifetime_value(&LifetimeValueInput {
            avg_purchase_value: 250.0,
            purchase_frequency: 4.0,
            customer_lifespan_months: 36.0,
        });
        assert_eq!(clv, 3_000.0);
    }

    #[test]
    fn stale_proposal_takes_the_long_pipeline_penalty() {
        let forecast = engine().forecast_deal(&DealInput {
            stage: DealStage::Proposal,
            value: 10_000.0,
            days_in_pipeline: 100.0,
        });

        // 0.50 base, reduced by the >90-day factor of 0.7
        assert_eq!(forecast.close_probability, 0.35);
        assert_eq!(forecast.estimated_days_to_close, 30);
        assert_eq!(forecast.forecast_value, 3_500.0);
        assert_eq!(forecast.confidence, Confidence::Medium);
    }

    #[test]
    fn fresh_negotiation_is_discounted_but_confident() {
        let forecast = engine().forecast_deal(&DealInput {
            stage: DealStage::Negotiation,
            value: 5_000.0,
            days_in_pipeline: 3.0,
        });

        assert_eq!(forecast.close_probability, 0.63);
        assert_eq!(forecast.confidence, Confidence::High);
        assert_eq!(forecast.estimated_days_to_close, 15);
    }

    #[test]
    fn health_score_mirrors_churn_risk() {
        let health = engine().customer_health(&CustomerHealthInput {
            customer_id: Some("cust-042".to_string()),
            churn: ChurnInput {
                days_since_last_activity: 45.0,
                support_tickets: 0.0,
                payment_failures: 0.0,
                engagement_score: 50.0,
            },
            value: LifetimeValueInput {
                avg_purchase_value: 100.0,
                purchase_frequency: 2.0,
                customer_lifespan_months: 24.0,
            },
        });

        assert_eq!(health.churn_risk, 0.2);
        assert_eq!(health.health_score, 80.0);
        assert_eq!(health.lifetime_value, 400.0);
        assert_eq!(health.risk_level, RiskLevel::Low);
    }
}
