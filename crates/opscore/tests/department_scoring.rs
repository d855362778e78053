//! Cross-department behavior checks exercising the engines through their
//! public API, the same way the HTTP handlers call them.

use opscore::departments::finance::{FinanceEngine, TransactionInput};
use opscore::departments::hr::{HrEngine, ResumeInput};
use opscore::departments::marketing::{LeadInput, MarketingEngine};
use opscore::departments::sales::{ChurnInput, DealInput, DealStage, SalesEngine};
use opscore::departments::security::{SecurityEngine, TrafficInput};
use opscore::departments::support::{SupportEngine, TicketCategory, TicketInput};
use opscore::departments::{Confidence, DepartmentSuite, RiskLevel};

#[test]
fn large_terse_transaction_is_flagged() {
    let analysis = FinanceEngine::new().analyze_transaction(&TransactionInput {
        transaction_type: "wire".to_string(),
        amount: 15_000.0,
        description: "x".to_string(),
        hour: 14,
    });

    assert!(analysis.is_fraudulent);
    assert_eq!(analysis.fraud_score, 0.5);
    assert_eq!(analysis.confidence, Confidence::Medium);
}

#[test]
fn fraud_score_rises_monotonically_with_signals() {
    let engine = FinanceEngine::new();
    let mild = engine.analyze_transaction(&TransactionInput {
        transaction_type: "purchase".to_string(),
        amount: 200.0,
        description: "quarterly license renewal".to_string(),
        hour: 11,
    });
    let worse = engine.analyze_transaction(&TransactionInput {
        transaction_type: "purchase".to_string(),
        amount: 200.0,
        description: "quarterly license renewal".to_string(),
        hour: 2,
    });
    let worst = engine.analyze_transaction(&TransactionInput {
        transaction_type: "purchase".to_string(),
        amount: 20_000.0,
        description: "pay".to_string(),
        hour: 2,
    });

    assert!(mild.fraud_score <= worse.fraud_score);
    assert!(worse.fraud_score <= worst.fraud_score);
    assert_eq!(worst.fraud_score, 0.7);
}

#[test]
fn extracted_skills_keep_canonical_order() {
    let screening = HrEngine::new().screen_resume(&ResumeInput {
        candidate_name: "Sam Doe".to_string(),
        email: "sam@example.com".to_string(),
        resume_text: "Built AWS pipelines in Python with machine learning models".to_string(),
    });

    assert_eq!(screening.skills, vec!["python", "aws", "machine learning"]);
}

#[test]
fn stale_proposal_probability_matches_stage_and_age() {
    let forecast = SalesEngine::new().forecast_deal(&DealInput {
        stage: DealStage::Proposal,
        value: 20_000.0,
        days_in_pipeline: 100.0,
    });

    assert_eq!(forecast.close_probability, 0.35);
    assert_eq!(forecast.forecast_value, 7_000.0);
}

#[test]
fn churn_risk_never_leaves_the_unit_interval() {
    let engine = SalesEngine::new();
    for days in [0.0, 31.0, 91.0, 400.0] {
        for failures in [0.0, 3.0] {
            let assessment = engine.predict_churn(&ChurnInput {
                days_since_last_activity: days,
                support_tickets: 9.0,
                payment_failures: failures,
                engagement_score: 10.0,
            });
            assert!(assessment.churn_risk >= 0.0 && assessment.churn_risk <= 1.0);
        }
    }
}

#[test]
fn ticket_categories_resolve_first_match() {
    let engine = SupportEngine::new();
    // "crash" (technical) and "charge" (billing) both appear; technical is
    // checked first.
    let analysis = engine.analyze_ticket(&TicketInput {
        subject: "Double charge after update".to_string(),
        description: "App also crashes on launch".to_string(),
        customer_email: "buyer@example.com".to_string(),
    });
    assert_eq!(analysis.category, TicketCategory::Technical);
}

#[test]
fn referral_leads_outscore_cold_paid_traffic() {
    let engine = MarketingEngine::new();
    let referral = engine.score_lead(&LeadInput {
        name: "Jordan".to_string(),
        company: "Acme Corp".to_string(),
        email: "ops@acme.io".to_string(),
        source: "referral".to_string(),
        engagement_level: 7.0,
    });
    let cold = engine.score_lead(&LeadInput {
        name: String::new(),
        company: String::new(),
        email: "someone@gmail.com".to_string(),
        source: "paid".to_string(),
        engagement_level: 0.0,
    });

    assert!(referral.lead_score > cold.lead_score);
    assert_eq!(referral.lead_score, 100.0);
    assert_eq!(cold.lead_score, 20.0);
}

#[test]
fn internal_traffic_never_scores_the_external_penalty() {
    let engine = SecurityEngine::new();
    let internal = engine.analyze_traffic(&TrafficInput {
        source_ip: "10.0.0.5".to_string(),
        bytes: 2_000_000.0,
        port: 445,
        hour: 23,
    });
    let external = engine.analyze_traffic(&TrafficInput {
        source_ip: "203.0.113.4".to_string(),
        bytes: 2_000_000.0,
        port: 445,
        hour: 23,
    });

    assert_eq!(internal.threat_score, 0.65);
    assert_eq!(external.threat_score, 0.85);
    assert!(external.is_threat);
}

#[test]
fn suite_builds_every_engine_with_defaults() {
    let suite = DepartmentSuite::default();

    let retention = suite.sales.predict_churn(&ChurnInput {
        days_since_last_activity: 10.0,
        support_tickets: 0.0,
        payment_failures: 0.0,
        engagement_score: 50.0,
    });
    assert_eq!(retention.risk_level, RiskLevel::Low);
}
