use crate::infra::{AppState, DashboardSnapshot, ServiceState};
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json};
use chrono::{Local, Timelike};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use opscore::departments::finance::{RevenueForecast, TransactionAnalysis, TransactionInput};
use opscore::departments::hr::{ResumeInput, ResumeScreening, RetentionAssessment, RetentionInput};
use opscore::departments::marketing::{CampaignInput, CampaignPlan, LeadInput, LeadScore};
use opscore::departments::sales::{CustomerHealth, CustomerHealthInput, DealForecast, DealInput};
use opscore::departments::security::{AlertInput, AlertTriage, TrafficInput};
use opscore::departments::support::{ChatReply, TicketAnalysis, TicketInput};
use opscore::departments::Severity;
use opscore::error::AppError;
use opscore::registry::{ModelEntry, ModelMetadata};

pub(crate) fn router(service: Arc<ServiceState>) -> axum::Router {
    axum::Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/hr/resume/screen", post(screen_resume_endpoint))
        .route(
            "/api/v1/hr/employee/retention-risk",
            post(retention_risk_endpoint),
        )
        .route(
            "/api/v1/finance/transaction/analyze",
            post(analyze_transaction_endpoint),
        )
        .route(
            "/api/v1/finance/revenue/forecast",
            post(revenue_forecast_endpoint),
        )
        .route(
            "/api/v1/support/ticket/analyze",
            post(analyze_ticket_endpoint),
        )
        .route("/api/v1/support/chatbot", post(chatbot_endpoint))
        .route("/api/v1/marketing/lead/score", post(score_lead_endpoint))
        .route(
            "/api/v1/marketing/campaign/optimize",
            post(optimize_campaign_endpoint),
        )
        .route(
            "/api/v1/sales/customer/health",
            post(customer_health_endpoint),
        )
        .route("/api/v1/sales/deal/forecast", post(deal_forecast_endpoint))
        .route(
            "/api/v1/security/alert/analyze",
            post(analyze_alert_endpoint),
        )
        .route(
            "/api/v1/dashboard/metrics",
            get(dashboard_metrics_endpoint),
        )
        .route(
            "/api/v1/models",
            get(list_models_endpoint).post(register_model_endpoint),
        )
        .with_state(service)
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

fn current_hour() -> u32 {
    Local::now().hour()
}

pub(crate) async fn screen_resume_endpoint(
    State(service): State<Arc<ServiceState>>,
    Json(input): Json<ResumeInput>,
) -> Json<ResumeScreening> {
    service.ledger.record_analysis("hr");
    Json(service.suite.hr.screen_resume(&input))
}

pub(crate) async fn retention_risk_endpoint(
    State(service): State<Arc<ServiceState>>,
    Json(input): Json<RetentionInput>,
) -> Json<RetentionAssessment> {
    service.ledger.record_analysis("hr");
    Json(service.suite.hr.assess_retention(&input))
}

/// Transaction payload; the occurrence hour defaults to the server's local
/// clock when the caller leaves it out.
#[derive(Debug, Deserialize)]
pub(crate) struct TransactionRequest {
    #[serde(default)]
    pub(crate) transaction_type: String,
    #[serde(default)]
    pub(crate) amount: f64,
    #[serde(default)]
    pub(crate) description: String,
    #[serde(default)]
    pub(crate) hour: Option<u32>,
}

pub(crate) async fn analyze_transaction_endpoint(
    State(service): State<Arc<ServiceState>>,
    Json(request): Json<TransactionRequest>,
) -> Json<TransactionAnalysis> {
    let input = TransactionInput {
        transaction_type: request.transaction_type,
        amount: request.amount,
        description: request.description,
        hour: request.hour.unwrap_or_else(current_hour),
    };

    service.ledger.record_analysis("finance");
    if input.transaction_type == "income" {
        service.ledger.record_income(input.amount);
    }

    Json(service.suite.finance.analyze_transaction(&input))
}

#[derive(Debug, Deserialize)]
pub(crate) struct RevenueForecastRequest {
    #[serde(default)]
    pub(crate) historical_revenue: Vec<f64>,
}

pub(crate) async fn revenue_forecast_endpoint(
    State(service): State<Arc<ServiceState>>,
    Json(request): Json<RevenueForecastRequest>,
) -> Json<RevenueForecast> {
    service.ledger.record_analysis("finance");
    Json(
        service
            .suite
            .finance
            .monthly_revenue_report(&request.historical_revenue),
    )
}

pub(crate) async fn analyze_ticket_endpoint(
    State(service): State<Arc<ServiceState>>,
    Json(input): Json<TicketInput>,
) -> Json<TicketAnalysis> {
    service.ledger.record_analysis("support");
    Json(service.suite.support.analyze_ticket(&input))
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatRequest {
    #[serde(default)]
    pub(crate) message: String,
}

pub(crate) async fn chatbot_endpoint(
    State(service): State<Arc<ServiceState>>,
    Json(request): Json<ChatRequest>,
) -> Json<ChatReply> {
    service.ledger.record_analysis("support");
    Json(service.suite.support.chatbot_reply(&request.message))
}

pub(crate) async fn score_lead_endpoint(
    State(service): State<Arc<ServiceState>>,
    Json(input): Json<LeadInput>,
) -> Json<LeadScore> {
    service.ledger.record_analysis("marketing");
    Json(service.suite.marketing.score_lead(&input))
}

pub(crate) async fn optimize_campaign_endpoint(
    State(service): State<Arc<ServiceState>>,
    Json(input): Json<CampaignInput>,
) -> Json<CampaignPlan> {
    service.ledger.record_analysis("marketing");
    Json(service.suite.marketing.optimize_campaign(&input))
}

pub(crate) async fn customer_health_endpoint(
    State(service): State<Arc<ServiceState>>,
    Json(input): Json<CustomerHealthInput>,
) -> Json<CustomerHealth> {
    service.ledger.record_analysis("sales");
    Json(service.suite.sales.customer_health(&input))
}

pub(crate) async fn deal_forecast_endpoint(
    State(service): State<Arc<ServiceState>>,
    Json(input): Json<DealInput>,
) -> Json<DealForecast> {
    service.ledger.record_analysis("sales");
    Json(service.suite.sales.forecast_deal(&input))
}

/// Alert payload; network alerts carry traffic fields, everything else is
/// triaged from the reported severity.
#[derive(Debug, Deserialize)]
pub(crate) struct AlertRequest {
    #[serde(default)]
    pub(crate) alert_type: String,
    #[serde(default)]
    pub(crate) severity: Option<Severity>,
    #[serde(default)]
    pub(crate) source_ip: String,
    #[serde(default)]
    pub(crate) bytes: f64,
    #[serde(default)]
    pub(crate) port: Option<u32>,
    #[serde(default)]
    pub(crate) hour: Option<u32>,
}

pub(crate) async fn analyze_alert_endpoint(
    State(service): State<Arc<ServiceState>>,
    Json(request): Json<AlertRequest>,
) -> Json<AlertTriage> {
    let input = AlertInput {
        alert_type: request.alert_type,
        severity: request.severity,
        traffic: TrafficInput {
            source_ip: request.source_ip,
            bytes: request.bytes,
            port: request.port.unwrap_or(80),
            hour: request.hour.unwrap_or_else(current_hour),
        },
    };

    service.ledger.record_analysis("security");
    Json(service.suite.security.triage_alert(&input))
}

pub(crate) async fn dashboard_metrics_endpoint(
    State(service): State<Arc<ServiceState>>,
) -> Json<DashboardSnapshot> {
    let registered = service
        .registry
        .lock()
        .expect("registry mutex poisoned")
        .list()
        .len();
    Json(service.ledger.snapshot(registered))
}

pub(crate) async fn list_models_endpoint(
    State(service): State<Arc<ServiceState>>,
) -> Json<Vec<ModelEntry>> {
    let registry = service.registry.lock().expect("registry mutex poisoned");
    Json(registry.list().into_iter().cloned().collect())
}

#[derive(Debug, Deserialize)]
pub(crate) struct RegisterModelRequest {
    pub(crate) name: String,
    #[serde(default = "default_model_version")]
    pub(crate) version: String,
    #[serde(flatten)]
    pub(crate) metadata: ModelMetadata,
}

fn default_model_version() -> String {
    "1.0.0".to_string()
}

pub(crate) async fn register_model_endpoint(
    State(service): State<Arc<ServiceState>>,
    Json(request): Json<RegisterModelRequest>,
) -> Result<(StatusCode, Json<ModelEntry>), AppError> {
    let mut registry = service.registry.lock().expect("registry mutex poisoned");
    let entry = registry.register(&request.name, &request.version, request.metadata)?;
    Ok((StatusCode::CREATED, Json(entry)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use opscore::departments::DepartmentSuite;
    use opscore::registry::ModelRegistry;
    use std::sync::Mutex;
    use tower::ServiceExt;

    fn test_state(tag: &str) -> Arc<ServiceState> {
        let path = std::env::temp_dir().join(format!(
            "opscore-api-{tag}-{}.json",
            std::process::id()
        ));
        let _ = std::fs::remove_file(&path);
        Arc::new(ServiceState {
            suite: DepartmentSuite::default(),
            ledger: Default::default(),
            registry: Mutex::new(ModelRegistry::open(path).expect("registry opens")),
        })
    }

    #[tokio::test]
    async fn router_serves_health_and_scoring_paths() {
        let app = router(test_state("router"));

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/sales/deal/forecast")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(
                        r#"{"stage":"proposal","value":10000,"days_in_pipeline":100}"#,
                    ))
                    .expect("request builds"),
            )
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), 1024)
            .await
            .expect("body reads");
        let payload: serde_json::Value =
            serde_json::from_slice(&bytes).expect("valid json body");
        assert_eq!(payload["close_probability"], 0.35);
        assert_eq!(payload["confidence"], "medium");
    }

    #[tokio::test]
    async fn transaction_endpoint_flags_large_terse_payments() {
        let state = test_state("txn");
        let request = TransactionRequest {
            transaction_type: "expense".to_string(),
            amount: 15_000.0,
            description: "x".to_string(),
            hour: Some(14),
        };

        let Json(analysis) =
            analyze_transaction_endpoint(State(state.clone()), Json(request)).await;

        assert!(analysis.is_fraudulent);
        assert_eq!(analysis.fraud_score, 0.5);
    }

    #[tokio::test]
    async fn income_transactions_feed_the_dashboard_revenue() {
        let state = test_state("dashboard");
        let request = TransactionRequest {
            transaction_type: "income".to_string(),
            amount: 2_400.0,
            description: "subscription renewal batch".to_string(),
            hour: Some(10),
        };

        let _ = analyze_transaction_endpoint(State(state.clone()), Json(request)).await;
        let Json(snapshot) = dashboard_metrics_endpoint(State(state)).await;

        assert_eq!(snapshot.total_analyses, 1);
        assert_eq!(snapshot.analyzed_revenue, 2_400.0);
        assert_eq!(snapshot.registered_models, 0);
    }

    #[tokio::test]
    async fn model_registration_shows_up_in_the_listing() {
        let state = test_state("models");
        let request = RegisterModelRequest {
            name: "lead_scorer".to_string(),
            version: "2.1".to_string(),
            metadata: ModelMetadata {
                department: Some("marketing".to_string()),
                ..ModelMetadata::default()
            },
        };

        let (status, Json(entry)) = register_model_endpoint(State(state.clone()), Json(request))
            .await
            .expect("registration succeeds");
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(entry.version, "2.1");

        let Json(models) = list_models_endpoint(State(state)).await;
        assert_eq!(models.len(), 1);
        assert_eq!(models[0].name, "lead_scorer");
    }

    #[tokio::test]
    async fn chatbot_endpoint_answers_greetings() {
        let state = test_state("chat");
        let Json(reply) = chatbot_endpoint(
            State(state),
            Json(ChatRequest {
                message: "hello there".to_string(),
            }),
        )
        .await;

        assert_eq!(reply.bot_response, "Hello! How can I help you today?");
    }

    #[tokio::test]
    async fn alert_endpoint_routes_network_payloads() {
        let state = test_state("alert");
        let request = AlertRequest {
            alert_type: "network".to_string(),
            severity: None,
            source_ip: "203.0.113.4".to_string(),
            bytes: 2_000_000.0,
            port: Some(22),
            hour: Some(12),
        };

        let Json(triage) = analyze_alert_endpoint(State(state), Json(request)).await;
        match triage {
            AlertTriage::Network(assessment) => assert!(assessment.is_threat),
            AlertTriage::Generic { .. } => panic!("expected network triage"),
        }
    }
}
