use std::collections::BTreeMap;

use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use roam_core::booking::{Booking, BookingStatus};
use roam_core::repository::BookingFilter;

use crate::error::ApiError;
use crate::state::AppState;

const DEFAULT_LIST_LIMIT: usize = 50;
const MAX_LIST_LIMIT: usize = 100;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/v1/bookings", get(list_bookings))
        .route("/api/v1/bookings/{booking_id}", get(get_booking))
        .route("/api/v1/bookings/{booking_id}/cancel", post(cancel_booking))
        .route("/api/v1/bookings/user/{user_id}/summary", get(user_summary))
}

#[derive(Debug, Deserialize)]
pub struct BookingListQuery {
    pub user_id: Option<String>,
    pub status: Option<BookingStatus>,
    pub limit: Option<usize>,
}

async fn list_bookings(
    State(state): State<AppState>,
    Query(query): Query<BookingListQuery>,
) -> Result<Json<Vec<Booking>>, ApiError> {
    let limit = query.limit.unwrap_or(DEFAULT_LIST_LIMIT).min(MAX_LIST_LIMIT);
    let bookings = state
        .store
        .list_bookings(BookingFilter {
            user_id: query.user_id,
            status: query.status,
            limit: Some(limit),
        })
        .await?;
    Ok(Json(bookings))
}

async fn get_booking(
    State(state): State<AppState>,
    Path(booking_id): Path<String>,
) -> Result<Json<Booking>, ApiError> {
    let booking = state
        .store
        .get_booking(&booking_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Booking not found".to_string()))?;
    Ok(Json(booking))
}

#[derive(Debug, Deserialize)]
pub struct CancelBookingQuery {
    pub reason: Option<String>,
}

async fn cancel_booking(
    State(state): State<AppState>,
    Path(booking_id): Path<String>,
    Query(query): Query<CancelBookingQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let reason = query
        .reason
        .unwrap_or_else(|| "User requested cancellation".to_string());
    let booking = state.store.cancel_booking(&booking_id).await?;
    state
        .audit
        .booking_cancelled(&booking.user_id, &booking.id, &booking.provider_ref, &reason);
    Ok(Json(json!({
        "success": true,
        "booking_id": booking.id,
        "status": "cancelled",
        "refund_status": "processing",
        "message": "Booking cancelled. Refund will be processed within 3-5 business days.",
    })))
}

#[derive(Debug, Default, Serialize)]
struct SummaryBucket {
    count: usize,
    total_amount: i64,
}

#[derive(Debug, Serialize)]
struct UserBookingSummary {
    user_id: String,
    total_bookings: usize,
    total_spent_idr: i64,
    by_status: BTreeMap<&'static str, SummaryBucket>,
    by_type: BTreeMap<&'static str, SummaryBucket>,
}

async fn user_summary(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<UserBookingSummary>, ApiError> {
    let bookings = state
        .store
        .list_bookings(BookingFilter {
            user_id: Some(user_id.clone()),
            status: None,
            limit: None,
        })
        .await?;

    let total_spent_idr = bookings
        .iter()
        .filter(|b| b.status == BookingStatus::Confirmed)
        .map(|b| b.amount_idr)
        .sum();

    let mut by_status: BTreeMap<&'static str, SummaryBucket> = BTreeMap::new();
    let mut by_type: BTreeMap<&'static str, SummaryBucket> = BTreeMap::new();
    for booking in &bookings {
        let status_bucket = by_status.entry(booking.status.as_str()).or_default();
        status_bucket.count += 1;
        status_bucket.total_amount += booking.amount_idr;

        let type_bucket = by_type.entry(booking.booking_type.as_str()).or_default();
        type_bucket.count += 1;
        type_bucket.total_amount += booking.amount_idr;
    }

    Ok(Json(UserBookingSummary {
        user_id,
        total_bookings: bookings.len(),
        total_spent_idr,
        by_status,
        by_type,
    }))
}
