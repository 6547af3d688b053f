use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::booking::BookingType;
use crate::payment::PaymentResult;

/// Provider-side confirmation for one booked resource.
#[derive(Debug, Clone, Serialize)]
pub struct BookingConfirmation {
    pub provider_ref: String,
    pub resource_type: BookingType,
    pub resource_id: String,
    pub user_id: String,
    pub period_start: String,
    pub period_end: String,
    pub participants: u32,
    /// Echoed from the payment for traceability.
    pub transaction_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum BookingError {
    #[error("cannot book {0} without a successful payment")]
    PaymentRequired(BookingType),
}

/// Books one resource of any type. Invariant: no provider reference is ever
/// minted unless the payment result passed in is a success.
#[async_trait]
pub trait BookingExecutor: Send + Sync {
    async fn book(
        &self,
        resource_type: BookingType,
        resource_id: &str,
        user_id: &str,
        period_start: &str,
        period_end: &str,
        participants: u32,
        payment: &PaymentResult,
    ) -> Result<BookingConfirmation, BookingError>;
}
