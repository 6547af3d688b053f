//! Rule-based itinerary generator. Used when no generative source is
//! configured or the configured one fails.

use async_trait::async_trait;
use chrono::Duration;

use roam_catalog::search::{search_activities, search_hotels, HotelListing};
use roam_core::itinerary::{Activity, DayPlan, HotelOption, Itinerary, Lodging, Transport};
use roam_core::source::{ItineraryRequest, ItinerarySource, PlannerError};

const LOCAL_TRANSPORT_PER_TRAVELER_IDR: i64 = 50_000;

pub struct FallbackPlanner;

#[async_trait]
impl ItinerarySource for FallbackPlanner {
    async fn generate(&self, request: &ItineraryRequest) -> Result<Itinerary, PlannerError> {
        Ok(build_itinerary(request))
    }

    fn name(&self) -> &'static str {
        "fallback_generator"
    }
}

fn hotel_option(listing: &HotelListing) -> HotelOption {
    HotelOption {
        id: listing.id.clone(),
        name: listing.name.clone(),
        price_per_night: listing.price_per_night,
        rating: listing.rating,
        hotel_type: listing.hotel_type.clone(),
        amenities: listing.amenities.clone(),
    }
}

/// Deterministic day-by-day plan: the cheapest suitable hotel for every
/// night but the last, up to two activities per day inside the daily
/// activity budget, and a local-transport line per traveler per day. The
/// document's reported totals are computed from the same line items, so
/// generated output always reconciles.
pub fn build_itinerary(request: &ItineraryRequest) -> Itinerary {
    let num_days = ((request.end_date - request.start_date).num_days() + 1).max(1);
    let per_day_budget = request.budget_idr / num_days;

    let hotels = search_hotels(
        &request.destination,
        request.preferences.as_deref(),
        Some((per_day_budget / 2).max(1)),
    );
    let selected_hotel = hotels.first().cloned().unwrap_or(HotelListing {
        id: "htl_default".to_string(),
        name: "Local Guesthouse".to_string(),
        hotel_type: "guesthouse".to_string(),
        price_per_night: 300_000,
        rating: 4.2,
        amenities: vec![],
    });

    let hotel_total = selected_hotel.price_per_night * (num_days - 1);
    let daily_activity_budget = ((request.budget_idr - hotel_total) / num_days).max(0);

    let activities = search_activities(&request.destination, Some(request.travel_type.as_str()));

    let mut days = Vec::with_capacity(num_days as usize);
    let mut activity_idx = 0;
    let mut running_cost = 0;

    for offset in 0..num_days {
        let current_date = request.start_date + Duration::days(offset);
        let mut day_activities = Vec::new();
        let mut day_cost = 0;

        if let Some(morning) = activities.get(activity_idx) {
            day_activities.push(Activity {
                time: "09:00".to_string(),
                name: morning.name.clone(),
                description: morning.description.clone(),
                estimated_cost: morning.price,
            });
            day_cost += morning.price;
            activity_idx += 1;
        }

        if day_cost < daily_activity_budget {
            if let Some(afternoon) = activities.get(activity_idx) {
                day_activities.push(Activity {
                    time: "14:00".to_string(),
                    name: afternoon.name.clone(),
                    description: afternoon.description.clone(),
                    estimated_cost: afternoon.price,
                });
                day_cost += afternoon.price;
                activity_idx += 1;
            }
        }

        // No lodging entry for the departure day.
        let lodging = if offset < num_days - 1 {
            day_cost += selected_hotel.price_per_night;
            Some(Lodging {
                name: selected_hotel.name.clone(),
                price: selected_hotel.price_per_night,
            })
        } else {
            None
        };

        let transport_cost = LOCAL_TRANSPORT_PER_TRAVELER_IDR * i64::from(request.travelers);
        day_cost += transport_cost;

        running_cost += day_cost;
        days.push(DayPlan {
            date: current_date.format("%Y-%m-%d").to_string(),
            activities: day_activities,
            lodging,
            transport: Some(Transport {
                kind: "Local transport".to_string(),
                estimated_cost: transport_cost,
            }),
            daily_cost: day_cost,
        });
    }

    let mut trip_type = request.travel_type.as_str().to_string();
    if let Some(first) = trip_type.get_mut(0..1) {
        first.make_ascii_uppercase();
    }

    Itinerary {
        trip_name: format!("{} Trip to {}", trip_type, request.destination),
        destination: request.destination.clone(),
        start_date: request.start_date.format("%Y-%m-%d").to_string(),
        end_date: request.end_date.format("%Y-%m-%d").to_string(),
        days,
        total_estimated_cost: running_cost,
        recommended_hotels: hotels.iter().take(3).map(hotel_option).collect(),
        notes: Some(format!(
            "Generated by the rule-based planner. Budget remaining: {} IDR",
            request.budget_idr - running_cost
        )),
    }
}
