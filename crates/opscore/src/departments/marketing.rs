//! Marketing engine: lead scoring, campaign optimization, and SEO ranking
//! prediction.

use serde::{Deserialize, Serialize};

use super::RiskLevel;
use crate::scoring::{round2, Record, Rule, RuleTable, ThresholdClassifier};

const FREE_MAIL_DOMAINS: [&str; 3] = ["gmail.com", "yahoo.com", "hotmail.com"];

#[derive(Debug, Clone, Deserialize)]
pub struct LeadInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub engagement_level: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeadStatus {
    Hot,
    Warm,
    Cold,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeadScore {
    pub lead_score: f64,
    pub conversion_probability: f64,
    pub status: LeadStatus,
    pub priority: RiskLevel,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CampaignInput {
    #[serde(default)]
    pub channel: String,
    #[serde(default)]
    pub budget: f64,
    #[serde(default)]
    pub roi: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CampaignPlan {
    pub suggestions: Vec<&'static str>,
    pub predicted_conversions: f64,
    pub optimization_score: f64,
    pub recommended_budget: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeoContentInput {
    #[serde(default)]
    pub word_count: f64,
    #[serde(default)]
    pub keyword_density: f64,
    #[serde(default)]
    pub backlinks: f64,
    #[serde(default)]
    pub has_meta_description: bool,
    #[serde(default)]
    pub has_title_tag: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeoPrediction {
    pub seo_score: f64,
    pub ranking_prediction: &'static str,
    pub recommendations: Vec<&'static str>,
}

pub struct MarketingEngine {
    lead_rules: RuleTable,
    lead_status: ThresholdClassifier<LeadStatus>,
    lead_priority: ThresholdClassifier<RiskLevel>,
    seo_rules: RuleTable,
    seo_ranking: ThresholdClassifier<&'static str>,
}

impl Default for MarketingEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl MarketingEngine {
    pub fn new() -> Self {
        let lead_rules = RuleTable::percent("lead_scoring")
            .rule(Rule::when("named_company", 15.0, |record| {
                !record.text("company").is_empty()
            }))
            .rule(Rule::when("business_email", 20.0, |record| {
                record
                    .text("email")
                    .split_once('@')
                    .map(|(_, domain)| !FREE_MAIL_DOMAINS.contains(&domain))
                    .unwrap_or(false)
            }))
            .rule(Rule::scaled("source_quality", |record| {
                match record.text("source") {
                    "referral" => 30.0,
                    "organic" => 25.0,
                    "paid" => 20.0,
                    "social" => 15.0,
                    _ => 10.0,
                }
            }))
            .rule(Rule::scaled("engagement", |record| {
                (record.number_or("engagement_level", 0.0) * 5.0).min(35.0)
            }));

        let lead_status = ThresholdClassifier::new(
            vec![(70.0, LeadStatus::Hot), (50.0, LeadStatus::Warm)],
            LeadStatus::Cold,
        );
        let lead_priority = ThresholdClassifier::new(
            vec![(70.0, RiskLevel::High), (50.0, RiskLevel::Medium)],
            RiskLevel::Low,
        );

        let seo_rules = RuleTable::percent("seo_ranking")
            .rule(Rule::scaled("content_length", |record| {
                let word_count = record.number_or("word_count", 0.0);
                if word_count >= 2_000.0 {
                    30.0
                } else if word_count >= 1_000.0 {
                    20.0
                } else if word_count >= 500.0 {
                    10.0
                } else {
                    0.0
                }
            }))
            .rule(Rule::when("keyword_density", 25.0, |record| {
                let density = record.number_or("keyword_density", 0.0);
                (0.01..=0.03).contains(&density)
            }))
            .rule(Rule::scaled("backlinks", |record| {
                (record.number_or("backlinks", 0.0) * 2.0).min(30.0)
            }))
            .rule(Rule::when("meta_description", 10.0, |record| {
                record.flag("has_meta_description")
            }))
            .rule(Rule::when("title_tag", 5.0, |record| {
                record.flag("has_title_tag")
            }));

        let seo_ranking =
            ThresholdClassifier::new(vec![(75.0, "Top 10"), (50.0, "Top 20")], "Top 50");

        Self {
            lead_rules,
            lead_status,
            lead_priority,
            seo_rules,
            seo_ranking,
        }
    }

    pub fn score_lead(&self, input: &LeadInput) -> LeadScore {
        let record = Record::new()
            .with_text("email", input.email.clone())
            .with_text("company", input.company.clone())
            .with_text("source", input.source.clone())
            .with_number("engagement_level", input.engagement_level);

        let lead_score = self.lead_rules.evaluate(&record).total;
        let conversion_probability = round2(lead_score / 100.0 * 0.8);

        LeadScore {
            lead_score,
            conversion_probability,
            status: self.lead_status.classify(lead_score),
            priority: self.lead_priority.classify(lead_score),
        }
    }

    pub fn optimize_campaign(&self, input: &CampaignInput) -> CampaignPlan {
        let mut suggestions = Vec::new();
        let mut predicted_conversions = 0.0;

        match input.channel.as_str() {
            "email" => {
                suggestions.push("A/B test subject lines for higher open rates");
                suggestions.push("Personalize content based on user segments");
                predicted_conversions = input.budget * 0.05;
            }
            "social" => {
                suggestions.push("Focus on high-engagement time slots");
                suggestions.push("Use video content for better reach");
                predicted_conversions = input.budget * 0.03;
            }
            "ppc" => {
                suggestions.push("Optimize bidding strategy for high-intent keywords");
                suggestions.push("Improve landing page conversion rate");
                predicted_conversions = input.budget * 0.04;
            }
            _ => {}
        }

        if input.roi < 2.0 {
            suggestions.push("Consider reallocating budget to better-performing channels");
        }

        let optimization_score =
            (input.roi * 20.0 + suggestions.len() as f64 * 10.0).min(100.0);
        let recommended_budget = if input.roi > 3.0 {
            input.budget * 1.1
        } else {
            input.budget * 0.9
        };

        CampaignPlan {
            suggestions,
            predicted_conversions: round2(predicted_conversions),
            optimization_score: round2(optimization_score),
            recommended_budget,
        }
    }

    pub fn predict_seo_ranking(&self, input: &SeoContentInput) -> SeoPrediction {
        let record = Record::new()
            .with_number("word_count", input.word_count)
            .with_number("keyword_density", input.keyword_density)
            .with_number("backlinks", input.backlinks)
            .with_flag("has_meta_description", input.has_meta_description)
            .with_flag("has_title_tag", input.has_title_tag);

        let seo_score = self.seo_rules.evaluate(&record).total;

        let mut recommendations = Vec::new();
        if input.backlinks < 10.0 {
            recommendations.push("Add more quality backlinks");
        }
        if input.keyword_density < 0.01 || input.keyword_density > 0.03 {
            recommendations.push("Optimize keyword density");
        }
        if input.word_count < 1_500.0 {
            recommendations.push("Increase content length to 1500+ words");
        }

        SeoPrediction {
            seo_score,
            ranking_prediction: self.seo_ranking.classify(seo_score),
            recommendations,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> MarketingEngine {
        MarketingEngine::new()
    }

    fn lead(email: &str, company: &str, source: &str, engagement: f64) -> LeadInput {
        LeadInput {
            name: "Lead".to_string(),
            email: email.to_string(),
            company: company.to_string(),
            source: source.to_string(),
            engagement_level: engagement,
        }
    }

    #[test]
    fn referral_lead_with_business_email_runs_hot() {
        let score = engine().score_lead(&lead("cto@acme.io", "Acme", "referral", 8.0));

        // 15 company + 20 business email + 30 referral + 35 engagement cap
        assert_eq!(score.lead_score, 100.0);
        assert_eq!(score.conversion_probability, 0.8);
        assert_eq!(score.status, LeadStatus::Hot);
        assert_eq!(score.priority, RiskLevel::High);
    }

    #[test]
    fn free_mail_domain_earns_no_email_points() {
        let business = engine().score_lead(&lead("a@acme.io", "", "other", 0.0));
        let free = engine().score_lead(&lead("a@gmail.com", "", "other", 0.0));

        assert_eq!(business.lead_score - free.lead_score, 20.0);
    }

    #[test]
    fn unknown_source_earns_baseline_points() {
        let score = engine().score_lead(&lead("", "", "", 0.0));
        assert_eq!(score.lead_score, 10.0);
        assert_eq!(score.status, LeadStatus::Cold);
        assert_eq!(score.priority, RiskLevel::Low);
    }

    #[test]
    fn email_campaign_gets_channel_suggestions() {
        let plan = engine().optimize_campaign(&CampaignInput {
            channel: "email".to_string(),
            budget: 1_000.0,
            roi: 1.5,
        });

        assert_eq!(plan.suggestions.len(), 3);
        assert_eq!(plan.predicted_conversions, 50.0);
        assert_eq!(plan.optimization_score, 60.0);
        assert_eq!(plan.recommended_budget, 900.0);
    }

    #[test]
    fn high_roi_campaign_gets_a_budget_raise() {
        let plan = engine().optimize_campaign(&CampaignInput {
            channel: "ppc".to_string(),
            budget: 1_000.0,
            roi: 4.0,
        });

        assert_eq!(plan.recommended_budget, 1_000.0 * 1.1);
        assert_eq!(plan.optimization_score, 100.0);
    }

    #[test]
    fn seo_score_is_bounded_and_ranked() {
        let prediction = engine().predict_seo_ranking(&SeoContentInput {
            word_count: 2_500.0,
            keyword_density: 0.02,
            backlinks: 40.0,
            has_meta_description: true,
            has_title_tag: true,
        });

        assert_eq!(prediction.seo_score, 100.0);
        assert_eq!(prediction.ranking_prediction, "Top 10");
        assert!(prediction.recommendations.is_empty());
    }

    #[test]
    fn thin_content_gets_recommendations() {
        let prediction = engine().predict_seo_ranking(&SeoContentInput {
            word_count: 300.0,
            keyword_density: 0.002,
            backlinks: 2.0,
            has_meta_description: false,
            has_title_tag: false,
        });

        assert_eq!(prediction.seo_score, 4.0);
        assert_eq!(prediction.ranking_prediction, "Top 50");
        assert_eq!(
            prediction.recommendations,
            vec![
                "Add more quality backlinks",
                "Optimize keyword density",
                "Increase content length to 1500+ words"
            ]
        );
    }
}
