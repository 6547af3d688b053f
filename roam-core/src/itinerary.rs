use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Day-by-day trip document. May originate from a generative source, so
/// every reported total in here is untrusted until reconciled against the
/// line items.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Itinerary {
    pub trip_name: String,
    pub destination: String,
    pub start_date: String,
    pub end_date: String,
    pub days: Vec<DayPlan>,
    /// Reported grand total. Not authoritative.
    pub total_estimated_cost: i64,
    #[serde(default)]
    pub recommended_hotels: Vec<HotelOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Itinerary {
    /// Nights between the itinerary dates, used for hotel pricing.
    /// Unparseable or inverted date pairs fall back to a single night.
    pub fn night_count(&self) -> i64 {
        let start = NaiveDate::parse_from_str(&self.start_date, "%Y-%m-%d");
        let end = NaiveDate::parse_from_str(&self.end_date, "%Y-%m-%d");
        match (start, end) {
            (Ok(start), Ok(end)) => {
                let nights = (end - start).num_days();
                if nights < 0 {
                    1
                } else {
                    nights
                }
            }
            _ => 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayPlan {
    pub date: String,
    pub activities: Vec<Activity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lodging: Option<Lodging>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transport: Option<Transport>,
    /// Reported per-day total. Not authoritative.
    pub daily_cost: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Activity {
    pub time: String,
    pub name: String,
    pub description: String,
    pub estimated_cost: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lodging {
    pub name: String,
    pub price: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transport {
    #[serde(rename = "type")]
    pub kind: String,
    pub estimated_cost: i64,
}

/// Candidate lodging record. The first entry of an itinerary's
/// `recommended_hotels` is the one booked at confirmation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HotelOption {
    pub id: String,
    pub name: String,
    pub price_per_night: i64,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub hotel_type: String,
    #[serde(default)]
    pub amenities: Vec<String>,
}
