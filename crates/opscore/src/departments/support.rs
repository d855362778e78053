//! Support engine: sentiment analysis, ticket triage, and the canned-response
//! chatbot.

use serde::{Deserialize, Serialize};

use super::{Confidence, Severity};
use crate::scoring::{round2, KeywordClassifier};

const POSITIVE_WORDS: [&str; 9] = [
    "great",
    "excellent",
    "amazing",
    "thank",
    "happy",
    "satisfied",
    "good",
    "love",
    "wonderful",
];

const NEGATIVE_WORDS: [&str; 9] = [
    "bad",
    "terrible",
    "awful",
    "hate",
    "angry",
    "frustrated",
    "disappointed",
    "worst",
    "horrible",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentimentAnalysis {
    pub sentiment: Sentiment,
    pub score: f64,
    pub confidence: Confidence,
}

/// Ticket buckets, checked in declaration order (first match wins).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketCategory {
    Technical,
    Billing,
    Account,
    FeatureRequest,
    General,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TicketInput {
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub customer_email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TicketAnalysis {
    pub category: TicketCategory,
    pub priority: Severity,
    pub sentiment: Sentiment,
    pub sentiment_score: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ChatIntent {
    Greeting,
    Billing,
    Technical,
    Goodbye,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatReply {
    pub user_message: String,
    pub bot_response: &'static str,
}

pub struct SupportEngine {
    ticket_categories: KeywordClassifier<TicketCategory>,
    chat_intents: KeywordClassifier<ChatIntent>,
}

impl Default for SupportEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl SupportEngine {
    pub fn new() -> Self {
        let ticket_categories = KeywordClassifier::new(
            vec![
                (
                    TicketCategory::Technical,
                    &[
                        "error",
                        "bug",
                        "crash",
                        "not working",
                        "broken",
                        "issue",
                        "problem",
                    ] as &[_],
                ),
                (
                    TicketCategory::Billing,
                    &[
                        "invoice",
                        "payment",
                        "charge",
                        "refund",
                        "billing",
                        "subscription",
                    ] as &[_],
                ),
                (
                    TicketCategory::Account,
                    &["login", "password", "account", "access", "authentication"] as &[_],
                ),
                (
                    TicketCategory::FeatureRequest,
                    &["feature", "request", "add", "enhancement", "improve"] as &[_],
                ),
            ],
            TicketCategory::General,
        );

        let chat_intents = KeywordClassifier::new(
            vec![
                (ChatIntent::Greeting, &["hello", "hi", "hey"] as &[_]),
                (
                    ChatIntent::Billing,
                    &["billing", "invoice", "payment"] as &[_],
                ),
                (
                    ChatIntent::Technical,
                    &["error", "bug", "not working"] as &[_],
                ),
                (ChatIntent::Goodbye, &["bye", "goodbye", "thanks"] as &[_]),
            ],
            ChatIntent::Fallback,
        );

        Self {
            ticket_categories,
            chat_intents,
        }
    }

    /// Word-list sentiment with a neutral midpoint at 0.5.
    pub fn analyze_sentiment(&self, text: &str) -> SentimentAnalysis {
        let lowered = text.to_lowercase();
        let positive = POSITIVE_WORDS
            .iter()
            .filter(|word| lowered.contains(*word))
            .count();
        let negative = NEGATIVE_WORDS
            .iter()
            .filter(|word| lowered.contains(*word))
            .count();

        let (sentiment, score) = if positive > negative {
            (
                Sentiment::Positive,
                0.6 + positive.min(5) as f64 * 0.08,
            )
        } else if negative > positive {
            (
                Sentiment::Negative,
                0.4 - negative.min(5) as f64 * 0.08,
            )
        } else {
            (Sentiment::Neutral, 0.5)
        };

        let confidence = if positive.abs_diff(negative) >= 2 {
            Confidence::High
        } else {
            Confidence::Medium
        };

        SentimentAnalysis {
            sentiment,
            score: round2(score),
            confidence,
        }
    }

    pub fn classify_ticket(&self, subject: &str, description: &str) -> TicketCategory {
        self.ticket_categories
            .classify(&format!("{subject} {description}"))
    }

    /// Priority from sentiment and category: unhappy customers escalate.
    pub fn determine_priority(&self, category: TicketCategory, sentiment_score: f64) -> Severity {
        if sentiment_score < 0.3 {
            Severity::Critical
        } else if sentiment_score < 0.5
            && matches!(category, TicketCategory::Technical | TicketCategory::Billing)
        {
            Severity::High
        } else if category == TicketCategory::Technical {
            Severity::Medium
        } else {
            Severity::Low
        }
    }

    pub fn analyze_ticket(&self, input: &TicketInput) -> TicketAnalysis {
        let sentiment =
            self.analyze_sentiment(&format!("{} {}", input.subject, input.description));
        let category = self.classify_ticket(&input.subject, &input.description);

        TicketAnalysis {
            category,
            priority: self.determine_priority(category, sentiment.score),
            sentiment: sentiment.sentiment,
            sentiment_score: sentiment.score,
        }
    }

    pub fn chatbot_reply(&self, message: &str) -> ChatReply {
        let bot_response = match self.chat_intents.classify(message) {
            ChatIntent::Greeting => "Hello! How can I help you today?",
            ChatIntent::Billing => {
                "For billing questions, please provide your account number and I'll assist you."
            }
            ChatIntent::Technical => {
                "I can help with technical issues. Please describe the problem you're experiencing."
            }
            ChatIntent::Goodbye => "Thank you for contacting us. Have a great day!",
            ChatIntent::Fallback => {
                "I understand your concern. Let me connect you with the right team member."
            }
        };

        ChatReply {
            user_message: message.to_string(),
            bot_response,
        }
    }
}
