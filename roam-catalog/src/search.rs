//! Mock search data for hotels, flights and activities. Deterministic
//! placeholder data standing in for real supplier integrations.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HotelListing {
    pub id: String,
    pub name: String,
    pub hotel_type: String,
    pub price_per_night: i64,
    pub rating: f64,
    pub amenities: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityListing {
    pub id: String,
    pub name: String,
    pub duration: String,
    pub price: i64,
    pub category: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlightListing {
    pub id: String,
    pub airline: String,
    pub departure: String,
    pub arrival: String,
    pub price: i64,
    pub cabin_class: String,
    pub available_seats: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetBands {
    pub budget: i64,
    pub mid: i64,
    pub luxury: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DestinationInfo {
    pub name: String,
    pub country: String,
    pub timezone: Option<String>,
    pub currency: String,
    pub best_time: Option<String>,
    pub highlights: Vec<String>,
    pub avg_daily_budget: Option<BudgetBands>,
}

fn hotel(id: &str, name: &str, hotel_type: &str, price: i64, rating: f64, amenities: &[&str]) -> HotelListing {
    HotelListing {
        id: id.to_string(),
        name: name.to_string(),
        hotel_type: hotel_type.to_string(),
        price_per_night: price,
        rating,
        amenities: amenities.iter().map(|a| a.to_string()).collect(),
    }
}

fn activity(id: &str, name: &str, duration: &str, price: i64, category: &str, description: &str) -> ActivityListing {
    ActivityListing {
        id: id.to_string(),
        name: name.to_string(),
        duration: duration.to_string(),
        price,
        category: category.to_string(),
        description: description.to_string(),
    }
}

fn flight(id: &str, airline: &str, departure: &str, arrival: &str, price: i64, seats: u32) -> FlightListing {
    FlightListing {
        id: id.to_string(),
        airline: airline.to_string(),
        departure: departure.to_string(),
        arrival: arrival.to_string(),
        price,
        cabin_class: "economy".to_string(),
        available_seats: seats,
    }
}

fn hotels_for(destination: &str) -> Vec<HotelListing> {
    match destination.to_lowercase().as_str() {
        "yogyakarta" => vec![
            hotel("htl_001", "The Phoenix Hotel Yogyakarta", "hotel", 850_000, 4.7, &["wifi", "pool", "breakfast"]),
            hotel("htl_002", "Greenhost Boutique Hotel", "hotel", 650_000, 4.5, &["wifi", "eco-friendly", "restaurant"]),
            hotel("htl_003", "Rumah Palagan Homestay", "homestay", 350_000, 4.8, &["wifi", "local breakfast", "garden"]),
            hotel("htl_004", "Omah Pakem Guesthouse", "homestay", 280_000, 4.6, &["wifi", "mountain view", "parking"]),
            hotel("htl_005", "RedDoorz near Malioboro", "budget", 200_000, 4.0, &["wifi", "ac"]),
        ],
        "bali" => vec![
            hotel("htl_101", "Alila Seminyak", "resort", 2_500_000, 4.9, &["wifi", "pool", "spa", "beach"]),
            hotel("htl_102", "Kuta Paradiso Hotel", "hotel", 900_000, 4.4, &["wifi", "pool", "breakfast"]),
            hotel("htl_103", "Ubud Village Homestay", "homestay", 400_000, 4.7, &["wifi", "rice field view", "yoga"]),
        ],
        _ => vec![hotel("htl_999", "Standard City Hotel", "hotel", 500_000, 4.0, &["wifi", "ac"])],
    }
}

fn activities_for(destination: &str) -> Vec<ActivityListing> {
    match destination.to_lowercase().as_str() {
        "yogyakarta" => vec![
            activity("act_001", "Sunrise at Borobudur Temple", "4 hours", 450_000, "culture", "Watch sunrise at the world's largest Buddhist temple"),
            activity("act_002", "Prambanan Temple Visit", "3 hours", 350_000, "culture", "Explore the magnificent Hindu temple complex"),
            activity("act_003", "Malioboro Street Walking Tour", "2 hours", 0, "culture", "Free walking tour of the famous shopping street"),
            activity("act_004", "Batik Workshop", "3 hours", 200_000, "culture", "Learn traditional Javanese batik making"),
            activity("act_005", "Jomblang Cave Adventure", "5 hours", 500_000, "adventure", "Rappelling into a cave with a heavenly light beam"),
            activity("act_006", "Sultan Palace (Kraton) Tour", "2 hours", 25_000, "culture", "Visit the living palace of the Yogyakarta Sultan"),
            activity("act_007", "Traditional Ramayana Ballet", "2 hours", 150_000, "culture", "Watch the epic dance performance at Prambanan"),
            activity("act_008", "Mount Merapi Jeep Tour", "4 hours", 450_000, "adventure", "4x4 jeep tour around the active volcano"),
        ],
        "bali" => vec![
            activity("act_101", "Tegallalang Rice Terrace", "2 hours", 50_000, "nature", "Walk through the iconic rice terraces"),
            activity("act_102", "Uluwatu Temple Sunset", "3 hours", 100_000, "culture", "Watch the sunset and Kecak dance"),
            activity("act_103", "Snorkeling at Nusa Penida", "full day", 800_000, "beach", "Swim with manta rays"),
        ],
        _ => vec![activity("act_999", "City Walking Tour", "2 hours", 100_000, "culture", "Explore local highlights")],
    }
}

fn flights_for(destination: &str) -> Vec<FlightListing> {
    match destination.to_lowercase().as_str() {
        "yogyakarta" => vec![
            flight("flt_001", "Garuda Indonesia", "06:00", "07:10", 850_000, 24),
            flight("flt_002", "Lion Air", "08:30", "09:40", 550_000, 40),
            flight("flt_003", "Citilink", "14:00", "15:10", 480_000, 12),
        ],
        "bali" => vec![
            flight("flt_101", "Garuda Indonesia", "07:00", "08:45", 1_200_000, 18),
            flight("flt_102", "AirAsia", "10:00", "11:50", 650_000, 32),
        ],
        _ => vec![flight("flt_999", "Generic Air", "10:00", "12:00", 750_000, 20)],
    }
}

/// Search hotels by destination, with optional preference and price filters.
/// A "homestay" preference narrows to homestays and guesthouses, a "budget"
/// preference returns the three cheapest options. Filters that would empty
/// the result fall back rather than return nothing.
pub fn search_hotels(
    destination: &str,
    preferences: Option<&str>,
    max_price: Option<i64>,
) -> Vec<HotelListing> {
    let mut hotels = hotels_for(destination);

    if let Some(preferences) = preferences {
        let preferences = preferences.to_lowercase();
        if preferences.contains("homestay") {
            let homestays: Vec<HotelListing> = hotels
                .iter()
                .filter(|h| h.hotel_type == "homestay" || h.hotel_type == "guesthouse")
                .cloned()
                .collect();
            if !homestays.is_empty() {
                hotels = homestays;
            }
        } else if preferences.contains("budget") {
            hotels.sort_by_key(|h| h.price_per_night);
            hotels.truncate(3);
        }
    }

    if let Some(max_price) = max_price {
        let affordable: Vec<HotelListing> = hotels
            .iter()
            .filter(|h| h.price_per_night <= max_price)
            .cloned()
            .collect();
        if affordable.is_empty() {
            hotels.truncate(2);
        } else {
            hotels = affordable;
        }
    }

    hotels
}

/// Search flights to a destination on a given date.
pub fn search_flights(destination: &str, _origin: &str, _departure_date: &str) -> Vec<FlightListing> {
    flights_for(destination)
}

/// Search activities, listing the requested travel type first. Other
/// categories stay available as secondary suggestions.
pub fn search_activities(destination: &str, travel_type: Option<&str>) -> Vec<ActivityListing> {
    let activities = activities_for(destination);

    if let Some(travel_type) = travel_type {
        let travel_type = travel_type.to_lowercase();
        let (mut matching, other): (Vec<_>, Vec<_>) = activities
            .into_iter()
            .partition(|a| a.category == travel_type);
        if matching.is_empty() {
            return other;
        }
        matching.extend(other.into_iter().take(2));
        return matching;
    }

    activities
}

pub fn destination_info(destination: &str) -> DestinationInfo {
    match destination.to_lowercase().as_str() {
        "yogyakarta" => DestinationInfo {
            name: "Yogyakarta".to_string(),
            country: "Indonesia".to_string(),
            timezone: Some("WIB (UTC+7)".to_string()),
            currency: "IDR".to_string(),
            best_time: Some("April - October".to_string()),
            highlights: ["Borobudur", "Prambanan", "Malioboro", "Kraton", "Mount Merapi"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            avg_daily_budget: Some(BudgetBands {
                budget: 300_000,
                mid: 600_000,
                luxury: 1_500_000,
            }),
        },
        "bali" => DestinationInfo {
            name: "Bali".to_string(),
            country: "Indonesia".to_string(),
            timezone: Some("WITA (UTC+8)".to_string()),
            currency: "IDR".to_string(),
            best_time: Some("April - October".to_string()),
            highlights: ["Ubud", "Seminyak", "Uluwatu", "Nusa Penida", "Mount Batur"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            avg_daily_budget: Some(BudgetBands {
                budget: 500_000,
                mid: 1_000_000,
                luxury: 3_000_000,
            }),
        },
        _ => DestinationInfo {
            name: destination.to_string(),
            country: "Indonesia".to_string(),
            timezone: None,
            currency: "IDR".to_string(),
            best_time: None,
            highlights: vec![],
            avg_daily_budget: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hotels_found_for_known_destination() {
        let hotels = search_hotels("Yogyakarta", None, None);
        assert_eq!(hotels.len(), 5);
        assert!(hotels.iter().all(|h| h.price_per_night > 0));
    }

    #[test]
    fn homestay_preference_narrows_results() {
        let hotels = search_hotels("Yogyakarta", Some("prefer homestay, local food"), None);
        assert!(!hotels.is_empty());
        assert!(hotels.iter().all(|h| h.hotel_type == "homestay"));
    }

    #[test]
    fn budget_preference_returns_cheapest_three() {
        let hotels = search_hotels("Yogyakarta", Some("budget"), None);
        assert_eq!(hotels.len(), 3);
        assert!(hotels.windows(2).all(|w| w[0].price_per_night <= w[1].price_per_night));
    }

    #[test]
    fn max_price_filters_but_never_empties() {
        let affordable = search_hotels("Yogyakarta", None, Some(400_000));
        assert!(affordable.iter().all(|h| h.price_per_night <= 400_000));

        let fallback = search_hotels("Bali", None, Some(100_000));
        assert_eq!(fallback.len(), 2);
    }

    #[test]
    fn unknown_destination_gets_default_inventory() {
        assert!(!search_hotels("Atlantis", None, None).is_empty());
        assert!(!search_activities("Atlantis", None).is_empty());
        assert!(!search_flights("Atlantis", "Jakarta", "2025-12-20").is_empty());
    }

    #[test]
    fn activity_search_lists_requested_category_first() {
        let activities = search_activities("Yogyakarta", Some("adventure"));
        assert_eq!(activities[0].category, "adventure");
        assert_eq!(activities[1].category, "adventure");
        // Two secondary suggestions from other categories are kept.
        assert_eq!(activities.len(), 4);
    }

    #[test]
    fn destination_info_for_known_city() {
        let info = destination_info("Yogyakarta");
        assert_eq!(info.name, "Yogyakarta");
        assert!(info.highlights.contains(&"Borobudur".to_string()));
        assert!(info.avg_daily_budget.is_some());
    }
}
