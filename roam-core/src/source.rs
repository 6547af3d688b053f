use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::itinerary::Itinerary;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TravelType {
    Beach,
    City,
    Adventure,
    #[default]
    Culture,
    Nature,
}

impl TravelType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TravelType::Beach => "beach",
            TravelType::City => "city",
            TravelType::Adventure => "adventure",
            TravelType::Culture => "culture",
            TravelType::Nature => "nature",
        }
    }
}

/// Input for itinerary generation.
#[derive(Debug, Clone)]
pub struct ItineraryRequest {
    pub user_id: String,
    pub destination: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub budget_idr: i64,
    pub travel_type: TravelType,
    pub travelers: u32,
    pub preferences: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum PlannerError {
    #[error("itinerary source unavailable: {0}")]
    SourceUnavailable(String),
    #[error("itinerary output could not be parsed: {0}")]
    MalformedOutput(String),
}

/// Produces a structured itinerary. Implementations may be generative; the
/// output is treated as untrusted either way and is re-validated before any
/// money moves.
#[async_trait]
pub trait ItinerarySource: Send + Sync {
    async fn generate(&self, request: &ItineraryRequest) -> Result<Itinerary, PlannerError>;

    /// Stable name recorded in the audit trail.
    fn name(&self) -> &'static str;
}
