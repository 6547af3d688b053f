//! Cost reconciliation for itinerary documents.
//!
//! An itinerary's `total_estimated_cost` may come from a generative process
//! that is not guaranteed to do arithmetic correctly. Before any money
//! moves, the true total is recomputed from the line items and the reported
//! total must land within tolerance of it.

use crate::itinerary::Itinerary;

/// Allowed relative deviation between reported and recalculated totals.
pub const DEFAULT_COST_TOLERANCE: f64 = 0.05;

/// Recompute the itinerary's true total from its line items: every
/// activity's cost, plus each day's transport cost, plus each day's lodging
/// price. Lodging is taken once per day entry that carries a lodging block
/// (the structure emits one block per night), so it is not multiplied here.
///
/// Pure function; calling it twice on the same document yields the same
/// integer.
pub fn recalculate_total(itinerary: &Itinerary) -> i64 {
    let mut total = 0;
    for day in &itinerary.days {
        for activity in &day.activities {
            total += activity.estimated_cost;
        }
        if let Some(transport) = &day.transport {
            total += transport.estimated_cost;
        }
        if let Some(lodging) = &day.lodging {
            total += lodging.price;
        }
    }
    total
}

/// `|reported - recalculated| <= recalculated * tolerance`. A recalculated
/// total of zero only matches a reported total of zero.
pub fn within_tolerance(reported: i64, recalculated: i64, tolerance: f64) -> bool {
    if recalculated == 0 {
        return reported == 0;
    }
    let difference = (reported - recalculated).abs();
    (difference as f64) <= (recalculated as f64) * tolerance
}
