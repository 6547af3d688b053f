use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::itinerary::Itinerary;

/// Plan lifecycle. Draft plans may become confirmed (exactly once, via a
/// successful confirmation run) or cancelled; confirmed is terminal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PlanStatus {
    Draft,
    Confirmed,
    Cancelled,
}

impl PlanStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanStatus::Draft => "draft",
            PlanStatus::Confirmed => "confirmed",
            PlanStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for PlanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A planning request's persisted result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plan {
    pub id: String,
    pub user_id: String,
    pub destination: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub budget_idr: i64,
    pub status: PlanStatus,
    pub itinerary: Option<Itinerary>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Plan {
    pub fn new(
        user_id: String,
        destination: String,
        start_date: NaiveDate,
        end_date: NaiveDate,
        budget_idr: i64,
        itinerary: Option<Itinerary>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: roam_shared::ids::prefixed_id("plan"),
            user_id,
            destination,
            start_date,
            end_date,
            budget_idr,
            status: PlanStatus::Draft,
            itinerary,
            created_at: now,
            updated_at: now,
        }
    }
}
