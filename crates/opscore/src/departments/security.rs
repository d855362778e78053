//! Security engine: intrusion detection, anomaly detection, compliance
//! checks, and alert triage.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::Severity;
use crate::scoring::{round2, Record, Rule, RuleTable, ThresholdClassifier};

/// Network traffic fields the intrusion rules inspect. The observation hour
/// is supplied by the caller so the engine itself stays clock-free.
#[derive(Debug, Clone, Deserialize)]
pub struct TrafficInput {
    #[serde(default)]
    pub source_ip: String,
    #[serde(default)]
    pub bytes: f64,
    #[serde(default = "default_port")]
    pub port: u32,
    #[serde(default = "default_hour")]
    pub hour: u32,
}

fn default_port() -> u32 {
    80
}

fn default_hour() -> u32 {
    12
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThreatAssessment {
    pub is_threat: bool,
    pub threat_score: f64,
    pub severity: Severity,
    pub detected_threats: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnomalyInput {
    #[serde(default)]
    pub metrics: BTreeMap<String, f64>,
    #[serde(default)]
    pub baseline: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnomalyReport {
    pub is_anomalous: bool,
    pub anomaly_score: f64,
    pub detected_anomalies: Vec<String>,
    pub recommendation: &'static str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SystemConfigInput {
    #[serde(default)]
    pub password_min_length: u32,
    #[serde(default)]
    pub mfa_enabled: bool,
    #[serde(default)]
    pub encryption_at_rest: bool,
    #[serde(default)]
    pub days_since_access_review: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComplianceReport {
    pub is_compliant: bool,
    pub compliance_score: f64,
    pub violations: Vec<String>,
    pub priority: &'static str,
}

/// Raw alert payload; network alerts get the full traffic analysis, anything
/// else is triaged from the reported severity alone.
#[derive(Debug, Clone, Deserialize)]
pub struct AlertInput {
    #[serde(default)]
    pub alert_type: String,
    #[serde(default)]
    pub severity: Option<Severity>,
    #[serde(flatten)]
    pub traffic: TrafficInput,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AlertTriage {
    Network(ThreatAssessment),
    Generic {
        is_threat: bool,
        threat_score: f64,
        severity: Severity,
    },
}

pub struct SecurityEngine {
    traffic: RuleTable,
    threat_severity: ThresholdClassifier<Severity>,
}

impl Default for SecurityEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl SecurityEngine {
    pub fn new() -> Self {
        let traffic = RuleTable::unit("intrusion_detection")
            .rule(Rule::when("external_source", 0.2, |record| {
                let ip = record.text("source_ip");
                !(ip.starts_with("192.168.") || ip.starts_with("10."))
            }))
            .rule(Rule::when_noted(
                "large_transfer",
                0.3,
                |record| record.number_or("bytes", 0.0) > 1_000_000.0,
                |_| "Large data transfer detected".to_string(),
            ))
            .rule(Rule::when_noted(
                "sensitive_port",
                0.2,
                |record| {
                    matches!(record.number_or("port", 80.0) as u32, 22 | 23 | 3389 | 445)
                },
                |record| {
                    format!(
                        "Access to sensitive port {}",
                        record.number_or("port", 80.0) as u32
                    )
                },
            ))
            .rule(Rule::when_noted(
                "off_hours",
                0.15,
                |record| {
                    let hour = record.number_or("hour", 12.0);
                    hour < 6.0 || hour > 22.0
                },
                |_| "Off-hours activity".to_string(),
            ));

        let threat_severity = ThresholdClassifier::new(
            vec![
                (0.8, Severity::Critical),
                (0.5, Severity::High),
                (0.3, Severity::Medium),
            ],
            Severity::Low,
        );

        Self {
            traffic,
            threat_severity,
        }
    }

    pub fn analyze_traffic(&self, input: &TrafficInput) -> ThreatAssessment {
        let record = Record::new()
            .with_text("source_ip", &input.source_ip)
            .with_number("bytes", input.bytes)
            .with_number("port", f64::from(input.port))
            .with_number("hour", f64::from(input.hour));

        let card = self.traffic.evaluate(&record);
        let threat_score = round2(card.total);

        ThreatAssessment {
            is_threat: threat_score >= 0.5,
            threat_score,
            severity: self.threat_severity.classify(threat_score),
            detected_threats: card.notes(),
        }
    }

    /// Compare live metrics against a historical baseline. Metrics with a
    /// zero or missing baseline are skipped.
    pub fn detect_anomalies(&self, input: &AnomalyInput) -> AnomalyReport {
        let mut anomalies = Vec::new();
        let mut score: f64 = 0.0;

        for (metric, value) in &input.metrics {
            let baseline = input.baseline.get(metric).copied().unwrap_or(*value);
            if baseline == 0.0 {
                continue;
            }

            let deviation = (value - baseline).abs() / baseline;
            if deviation > 2.0 {
                anomalies.push(format!("{metric}: {value} (baseline: {baseline})"));
                score += 0.3;
            } else if deviation > 0.5 {
                score += 0.1;
            }
        }

        let anomaly_score = round2(score.min(1.0));

        let recommendation = if anomaly_score >= 0.7 {
            "Investigate immediately"
        } else if anomaly_score >= 0.4 {
            "Monitor closely"
        } else {
            "Normal operation"
        };

        AnomalyReport {
            is_anomalous: anomaly_score >= 0.4,
            anomaly_score,
            detected_anomalies: anomalies,
            recommendation,
        }
    }

    pub fn check_compliance(&self, input: &SystemConfigInput) -> ComplianceReport {
        let mut violations = Vec::new();
        let mut score: f64 = 100.0;

        if input.password_min_length < 12 {
            violations.push("Password minimum length below policy".to_string());
            score -= 15.0;
        }
        if !input.mfa_enabled {
            violations.push("Multi-factor authentication not enabled".to_string());
            score -= 25.0;
        }
        if !input.encryption_at_rest {
            violations.push("Data encryption at rest not enabled".to_string());
            score -= 20.0;
        }
        if input.days_since_access_review > 90 {
            violations.push(format!(
                "Access review overdue by {} days",
                input.days_since_access_review - 90
            ));
            score -= 10.0;
        }

        let compliance_score = score.max(0.0);

        let priority = if compliance_score < 60.0 {
            "critical"
        } else if compliance_score < 80.0 {
            "high"
        } else {
            "normal"
        };

        ComplianceReport {
            is_compliant: violations.is_empty(),
            compliance_score,
            violations,
            priority,
        }
    }

    pub fn triage_alert(&self, input: &AlertInput) -> AlertTriage {
        if input.alert_type == "network" {
            return AlertTriage::Network(self.analyze_traffic(&input.traffic));
        }

        let severity = input.severity.unwrap_or(Severity::Medium);
        let threat_score = match severity {
            Severity::Critical => 0.9,
            Severity::High => 0.7,
            Severity::Medium => 0.5,
            Severity::Low => 0.3,
        };

        AlertTriage::Generic {
            is_threat: threat_score >= 0.5,
            threat_score,
            severity,
        }
    }
}
