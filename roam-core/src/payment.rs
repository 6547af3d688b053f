use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Required prefix for every payment token handed to the mock provider.
pub const TOKEN_PREFIX: &str = "tok_";

/// Maximum charge in the reference deployment, in IDR.
pub const DEFAULT_MAX_PAYMENT_IDR: i64 = 50_000_000;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PaymentErrorKind {
    InvalidTokenFormat,
    InvalidAmount,
    AmountExceedsLimit,
    PaymentDeclined,
    InvalidToken,
}

impl PaymentErrorKind {
    pub fn code(&self) -> &'static str {
        match self {
            PaymentErrorKind::InvalidTokenFormat => "invalid_token_format",
            PaymentErrorKind::InvalidAmount => "invalid_amount",
            PaymentErrorKind::AmountExceedsLimit => "amount_exceeds_limit",
            PaymentErrorKind::PaymentDeclined => "payment_declined",
            PaymentErrorKind::InvalidToken => "invalid_token",
        }
    }
}

/// Outcome of one charge attempt. Produced once per confirmation and passed
/// by value into every booking call made within that confirmation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentResult {
    pub success: bool,
    pub transaction_id: Option<String>,
    pub amount_idr: Option<i64>,
    pub error: Option<PaymentErrorKind>,
    pub message: String,
    pub completed_at: Option<DateTime<Utc>>,
}

impl PaymentResult {
    pub fn succeeded(transaction_id: String, amount_idr: i64) -> Self {
        Self {
            success: true,
            transaction_id: Some(transaction_id),
            amount_idr: Some(amount_idr),
            error: None,
            message: "Payment processed successfully".to_string(),
            completed_at: Some(Utc::now()),
        }
    }

    pub fn failed(error: PaymentErrorKind, message: impl Into<String>) -> Self {
        Self {
            success: false,
            transaction_id: None,
            amount_idr: None,
            error: Some(error),
            message: message.into(),
            completed_at: None,
        }
    }
}

/// Where a mock token lands. Decided purely by the token's textual prefix,
/// independent of amount or time, so outcomes are assertable from literal
/// token strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenClass {
    Valid,
    Declined,
    Unknown,
    Malformed,
}

pub fn classify_token(token: &str) -> TokenClass {
    if token.is_empty() || !token.starts_with(TOKEN_PREFIX) {
        TokenClass::Malformed
    } else if token.starts_with("tok_valid") {
        TokenClass::Valid
    } else if token.starts_with("tok_fail") {
        TokenClass::Declined
    } else {
        TokenClass::Unknown
    }
}

#[async_trait]
pub trait PaymentProcessor: Send + Sync {
    async fn process_payment(
        &self,
        amount_idr: i64,
        token: &str,
        description: &str,
    ) -> PaymentResult;
}
