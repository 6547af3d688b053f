use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BookingType {
    Hotel,
    Flight,
    Activity,
}

impl BookingType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingType::Hotel => "hotel",
            BookingType::Flight => "flight",
            BookingType::Activity => "activity",
        }
    }

    /// Three-letter code used in provider references (`HTL-9F0C2A1B`).
    pub fn type_code(&self) -> &'static str {
        match self {
            BookingType::Hotel => "HTL",
            BookingType::Flight => "FLT",
            BookingType::Activity => "ACT",
        }
    }
}

impl fmt::Display for BookingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
    Failed,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
            BookingStatus::Failed => "failed",
        }
    }
}

/// Record of one committed reservation. Created only as a side effect of a
/// successful confirmation; never deleted, cancellation is a status flip.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: String,
    pub plan_id: String,
    pub user_id: String,
    pub booking_type: BookingType,
    pub provider_ref: String,
    pub status: BookingStatus,
    pub amount_idr: i64,
    pub created_at: DateTime<Utc>,
}

impl Booking {
    pub fn confirmed(
        plan_id: &str,
        user_id: &str,
        booking_type: BookingType,
        provider_ref: String,
        amount_idr: i64,
    ) -> Self {
        Self {
            id: roam_shared::ids::prefixed_id("bkg"),
            plan_id: plan_id.to_string(),
            user_id: user_id.to_string(),
            booking_type,
            provider_ref,
            status: BookingStatus::Confirmed,
            amount_idr,
            created_at: Utc::now(),
        }
    }
}
