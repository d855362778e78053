use chrono::{Local, Timelike};
use clap::Args;
use std::collections::BTreeMap;

use opscore::departments::finance::{DepartmentBudgetInput, TransactionInput};
use opscore::departments::hr::{PromotionInput, ResumeInput, RetentionInput};
use opscore::departments::marketing::{CampaignInput, LeadInput, SeoContentInput};
use opscore::departments::sales::{ChurnInput, DealInput, DealStage, LifetimeValueInput};
use opscore::departments::security::{AnomalyInput, SystemConfigInput, TrafficInput};
use opscore::departments::support::TicketInput;
use opscore::departments::DepartmentSuite;
use opscore::error::AppError;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Override the occurrence hour for time-sensitive rules (defaults to now)
    #[arg(long)]
    pub(crate) hour: Option<u32>,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let hour = args.hour.unwrap_or_else(|| Local::now().hour());
    let suite = DepartmentSuite::default();

    println!("Department scoring demo (hour {hour})");

    println!("\nFinance");
    let transaction = suite.finance.analyze_transaction(&TransactionInput {
        transaction_type: "expense".to_string(),
        amount: 12_500.0,
        description: "wire".to_string(),
        hour,
    });
    println!(
        "- Transaction: fraud score {} ({:?} confidence), category {:?}, flagged {}",
        transaction.fraud_score,
        transaction.confidence,
        transaction.category,
        transaction.is_fraudulent
    );

    let forecast = suite
        .finance
        .monthly_revenue_report(&[98_000.0, 102_500.0, 110_300.0]);
    println!(
        "- Revenue outlook ({:?}): {:?}",
        forecast.trend, forecast.forecasts
    );

    let budget = suite.finance.optimize_budget(
        500_000.0,
        &[
            DepartmentBudgetInput {
                name: "engineering".to_string(),
                historical_spend: 180_000.0,
                priority: 9,
            },
            DepartmentBudgetInput {
                name: "marketing".to_string(),
                historical_spend: 90_000.0,
                priority: 6,
            },
        ],
    );
    println!("- Budget allocations: {:?}", budget.allocations);

    println!("\nHR");
    let screening = suite.hr.screen_resume(&ResumeInput {
        candidate_name: "Alex Rivera".to_string(),
        email: "alex@example.com".to_string(),
        resume_text: "Senior Python developer, machine learning pipelines on AWS, led a team \
                      of five through agile delivery and CI/CD automation"
            .to_string(),
    });
    println!(
        "- Resume: score {} -> {:?}, skills {:?}",
        screening.ml_score, screening.status, screening.skills
    );

    let retention = suite.hr.assess_retention(&RetentionInput {
        performance_score: 45.0,
        salary: 52_000.0,
        tenure_years: 0.5,
    });
    println!(
        "- Retention: risk {} ({:?}), recommendations {:?}",
        retention.retention_risk, retention.risk_level, retention.recommendations
    );

    let performance = suite.hr.performance_score(&BTreeMap::from([
        ("productivity".to_string(), 82.0),
        ("quality".to_string(), 75.0),
        ("teamwork".to_string(), 90.0),
    ]));
    let promotion = suite.hr.promotion_readiness(&PromotionInput {
        performance_score: performance,
        tenure_years: 3.0,
    });
    println!(
        "- Promotion: performance {performance}, readiness {} (ready: {})",
        promotion.readiness_score, promotion.is_ready
    );

    println!("\nSupport");
    let ticket = suite.support.analyze_ticket(&TicketInput {
        subject: "Payment failed and the app keeps crashing".to_string(),
        description: "This is terrible, I am very frustrated and angry".to_string(),
        customer_email: "customer@example.com".to_string(),
    });
    println!(
        "- Ticket: category {:?}, priority {:?}, sentiment {:?} ({})",
        ticket.category, ticket.priority, ticket.sentiment, ticket.sentiment_score
    );
    let reply = suite.support.chatbot_reply("hello, I have a billing question");
    println!("- Chatbot: {}", reply.bot_response);

    println!("\nMarketing");
    let lead = suite.marketing.score_lead(&LeadInput {
        name: "Jordan Lee".to_string(),
        email: "jordan@initech.com".to_string(),
        company: "Initech".to_string(),
        source: "referral".to_string(),
        engagement_level: 6.0,
    });
    println!(
        "- Lead: score {} ({:?}), conversion probability {}",
        lead.lead_score, lead.status, lead.conversion_probability
    );

    let campaign = suite.marketing.optimize_campaign(&CampaignInput {
        channel: "email".to_string(),
        budget: 10_000.0,
        roi: 1.4,
    });
    println!(
        "- Campaign: score {}, recommended budget {}, suggestions {:?}",
        campaign.optimization_score, campaign.recommended_budget, campaign.suggestions
    );

    let seo = suite.marketing.predict_seo_ranking(&SeoContentInput {
        word_count: 1_850.0,
        keyword_density: 0.02,
        backlinks: 12.0,
        has_meta_description: true,
        has_title_tag: true,
    });
    println!(
        "- SEO: content score {}, predicted ranking {}",
        seo.seo_score, seo.ranking_prediction
    );

    println!("\nSales");
    let churn = suite.sales.predict_churn(&ChurnInput {
        days_since_last_activity: 95.0,
        support_tickets: 2.0,
        payment_failures: 1.0,
        engagement_score: 25.0,
    });
    println!(
        "- Churn: risk {} ({:?}), actions {:?}",
        churn.churn_risk, churn.risk_level, churn.retention_actions
    );
    let clv = suite.sales.lifetime_value(&LifetimeValueInput {
        avg_purchase_value: 320.0,
        purchase_frequency: 6.0,
        customer_lifespan_months: 30.0,
    });
    println!("- Lifetime value: {clv}");
    let deal = suite.sales.forecast_deal(&DealInput {
        stage: DealStage::Negotiation,
        value: 48_000.0,
        days_in_pipeline: 40.0,
    });
    println!(
        "- Deal: close probability {}, forecast value {}, est. {} days to close",
        deal.close_probability, deal.forecast_value, deal.estimated_days_to_close
    );

    println!("\nSecurity");
    let threat = suite.security.analyze_traffic(&TrafficInput {
        source_ip: "203.0.113.24".to_string(),
        bytes: 3_200_000.0,
        port: 3389,
        hour,
    });
    println!(
        "- Traffic: threat score {} ({:?}), findings {:?}",
        threat.threat_score, threat.severity, threat.detected_threats
    );

    let anomalies = suite.security.detect_anomalies(&AnomalyInput {
        metrics: BTreeMap::from([
            ("cpu".to_string(), 96.0),
            ("requests_per_min".to_string(), 180.0),
        ]),
        baseline: BTreeMap::from([
            ("cpu".to_string(), 30.0),
            ("requests_per_min".to_string(), 150.0),
        ]),
    });
    println!(
        "- Anomalies: score {}, {} -> {:?}",
        anomalies.anomaly_score, anomalies.recommendation, anomalies.detected_anomalies
    );

    let compliance = suite.security.check_compliance(&SystemConfigInput {
        password_min_length: 10,
        mfa_enabled: true,
        encryption_at_rest: true,
        days_since_access_review: 45,
    });
    println!(
        "- Compliance: score {} ({}), violations {:?}",
        compliance.compliance_score, compliance.priority, compliance.violations
    );

    Ok(())
}
