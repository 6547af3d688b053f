//! Integration tests driving the HTTP surface against the in-memory store.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use roam_api::{app, AppState};
use roam_core::itinerary::{Activity, DayPlan, HotelOption, Itinerary, Lodging};
use roam_core::plan::Plan;
use roam_core::repository::PlanStore;
use roam_shared::audit::MemoryAuditSink;
use roam_store::app_config::{BusinessRules, PlannerConfig};
use roam_store::MemoryStore;

fn setup() -> (Router, Arc<MemoryStore>, Arc<MemoryAuditSink>) {
    let (state, store, sink) =
        AppState::in_memory(BusinessRules::default(), PlannerConfig::default());
    (app(state), store, sink)
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let request = match body {
        Some(body) => Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

/// Five-day trip whose line items sum to exactly 1,800,000: four nights of
/// lodging at 350k plus 400k of activities.
fn seed_itinerary() -> Itinerary {
    let lodging = || {
        Some(Lodging {
            name: "Rumah Palagan Homestay".to_string(),
            price: 350_000,
        })
    };
    let activity = |name: &str, cost: i64| Activity {
        time: "09:00".to_string(),
        name: name.to_string(),
        description: "Guided visit".to_string(),
        estimated_cost: cost,
    };
    let day = |date: &str, activities: Vec<Activity>, lodging: Option<Lodging>| DayPlan {
        daily_cost: activities.iter().map(|a| a.estimated_cost).sum::<i64>()
            + lodging.as_ref().map(|l| l.price).unwrap_or(0),
        date: date.to_string(),
        activities,
        lodging,
        transport: None,
    };

    Itinerary {
        trip_name: "Culture Trip to Yogyakarta".to_string(),
        destination: "Yogyakarta".to_string(),
        start_date: "2025-12-20".to_string(),
        end_date: "2025-12-24".to_string(),
        days: vec![
            day("2025-12-20", vec![activity("Borobudur Sunrise", 250_000)], lodging()),
            day("2025-12-21", vec![activity("Batik Workshop", 150_000)], lodging()),
            day("2025-12-22", vec![], lodging()),
            day("2025-12-23", vec![], lodging()),
            day("2025-12-24", vec![], None),
        ],
        total_estimated_cost: 1_800_000,
        recommended_hotels: vec![HotelOption {
            id: "htl_003".to_string(),
            name: "Rumah Palagan Homestay".to_string(),
            price_per_night: 350_000,
            rating: 4.8,
            hotel_type: "homestay".to_string(),
            amenities: vec![],
        }],
        notes: None,
    }
}

async fn seed_plan(store: &MemoryStore, itinerary: Option<Itinerary>) -> String {
    let plan = Plan::new(
        "user_1".to_string(),
        "Yogyakarta".to_string(),
        "2025-12-20".parse().unwrap(),
        "2025-12-24".parse().unwrap(),
        5_000_000,
        itinerary,
    );
    let plan_id = plan.id.clone();
    store.insert_plan(plan).await.unwrap();
    plan_id
}

fn confirm_body(token: &str) -> Value {
    json!({
        "user_id": "user_1",
        "payment_token": token,
        "confirmed": true,
    })
}

#[tokio::test]
async fn health_and_root() {
    let (app, _, _) = setup();

    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    let (status, body) = send(&app, "GET", "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "running");
}

#[tokio::test]
async fn create_plan_returns_draft_with_itinerary() {
    let (app, _, sink) = setup();

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/plan",
        Some(json!({
            "user_id": "user_1",
            "destination": "Yogyakarta",
            "start_date": "2025-12-20",
            "end_date": "2025-12-24",
            "budget_idr": 5_000_000,
            "travel_type": "culture",
            "travelers": 2,
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "draft");
    assert!(body["plan_id"].as_str().unwrap().starts_with("plan_"));
    assert_eq!(body["itinerary"]["days"].as_array().unwrap().len(), 5);
    assert_eq!(sink.entries_for_action("PLAN_CREATED").len(), 1);
}

#[tokio::test]
async fn create_plan_rejects_out_of_bounds_budget() {
    let (app, _, _) = setup();

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/plan",
        Some(json!({
            "destination": "Yogyakarta",
            "start_date": "2025-12-20",
            "end_date": "2025-12-24",
            "budget_idr": 100_000,
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_failed");
}

#[tokio::test]
async fn missing_plan_is_404() {
    let (app, _, _) = setup();
    let (status, body) = send(&app, "GET", "/api/v1/plan/plan_missing", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
}

#[tokio::test]
async fn confirm_end_to_end_books_the_hotel() {
    let (app, store, _) = setup();
    let plan_id = seed_plan(&store, Some(seed_itinerary())).await;

    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/v1/plan/{}/confirm", plan_id),
        Some(confirm_body("tok_valid_test")),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["total_charged"], 1_800_000);
    let bookings = body["bookings"].as_array().unwrap();
    assert_eq!(bookings.len(), 1);
    assert_eq!(bookings[0]["booking_type"], "hotel");
    assert_eq!(bookings[0]["amount_idr"], 1_400_000);
    assert!(bookings[0]["provider_ref"].as_str().unwrap().starts_with("HTL-"));
    assert!(body["message"].as_str().unwrap().contains("Transaction ID"));

    let (status, plan) = send(&app, "GET", &format!("/api/v1/plan/{}", plan_id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(plan["status"], "confirmed");

    let (status, plan_bookings) = send(
        &app,
        "GET",
        &format!("/api/v1/plan/{}/bookings", plan_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(plan_bookings.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn confirm_with_declined_token_is_402() {
    let (app, store, _) = setup();
    let plan_id = seed_plan(&store, Some(seed_itinerary())).await;

    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/v1/plan/{}/confirm", plan_id),
        Some(confirm_body("tok_fail_card")),
    )
    .await;

    assert_eq!(status, StatusCode::PAYMENT_REQUIRED);
    assert_eq!(body["error"], "payment_failed");
    assert_eq!(body["code"], "payment_declined");

    let (_, plan) = send(&app, "GET", &format!("/api/v1/plan/{}", plan_id), None).await;
    assert_eq!(plan["status"], "draft");
}

#[tokio::test]
async fn confirm_without_token_fails_validation() {
    let (app, store, _) = setup();
    let plan_id = seed_plan(&store, Some(seed_itinerary())).await;

    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/v1/plan/{}/confirm", plan_id),
        Some(json!({"user_id": "user_1", "confirmed": true})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_failed");
    assert!(body["message"].as_str().unwrap().contains("payment_token"));
}

#[tokio::test]
async fn confirm_unknown_plan_is_404() {
    let (app, _, _) = setup();
    let (status, _) = send(
        &app,
        "POST",
        "/api/v1/plan/plan_missing/confirm",
        Some(confirm_body("tok_valid_x")),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn confirm_plan_without_itinerary_is_400() {
    let (app, store, _) = setup();
    let plan_id = seed_plan(&store, None).await;

    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/v1/plan/{}/confirm", plan_id),
        Some(confirm_body("tok_valid_x")),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "no_itinerary");
}

#[tokio::test]
async fn inflated_total_is_rejected_as_cost_mismatch() {
    let (app, store, sink) = setup();
    let mut itinerary = seed_itinerary();
    itinerary.total_estimated_cost = 3_000_000;
    let plan_id = seed_plan(&store, Some(itinerary)).await;

    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/v1/plan/{}/confirm", plan_id),
        Some(confirm_body("tok_valid_x")),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "cost_mismatch");
    let failures = sink.entries_for_action("BOOKING_FAILED");
    assert_eq!(failures[0].details["booking_type"], "halucination_risk");
}

#[tokio::test]
async fn second_confirmation_is_rejected() {
    let (app, store, _) = setup();
    let plan_id = seed_plan(&store, Some(seed_itinerary())).await;
    let uri = format!("/api/v1/plan/{}/confirm", plan_id);

    let (status, _) = send(&app, "POST", &uri, Some(confirm_body("tok_valid_x"))).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, "POST", &uri, Some(confirm_body("tok_valid_x"))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "already_confirmed");
}

#[tokio::test]
async fn cancelled_plan_cannot_be_confirmed() {
    let (app, store, _) = setup();
    let plan_id = seed_plan(&store, Some(seed_itinerary())).await;

    let (status, body) = send(&app, "DELETE", &format!("/api/v1/plan/{}", plan_id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Plan cancelled");

    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/v1/plan/{}/confirm", plan_id),
        Some(confirm_body("tok_valid_x")),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "plan_cancelled");
}

#[tokio::test]
async fn booking_listing_filtering_and_summary() {
    let (app, store, _) = setup();
    let plan_id = seed_plan(&store, Some(seed_itinerary())).await;
    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/v1/plan/{}/confirm", plan_id),
        Some(confirm_body("tok_valid_x")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let booking_id = body["bookings"][0]["id"].as_str().unwrap().to_string();

    let (status, listed) = send(
        &app,
        "GET",
        "/api/v1/bookings?user_id=user_1&status=confirmed",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().unwrap().len(), 1);

    let (status, fetched) = send(&app, "GET", &format!("/api/v1/bookings/{}", booking_id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["plan_id"], plan_id.as_str());

    let (status, summary) = send(&app, "GET", "/api/v1/bookings/user/user_1/summary", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["total_bookings"], 1);
    assert_eq!(summary["total_spent_idr"], 1_400_000);
    assert_eq!(summary["by_type"]["hotel"]["count"], 1);

    let cancel_uri = format!("/api/v1/bookings/{}/cancel", booking_id);
    let (status, cancelled) = send(&app, "POST", &cancel_uri, Some(json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cancelled["status"], "cancelled");

    let (status, body) = send(&app, "POST", &cancel_uri, Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "already_cancelled");

    let (_, summary) = send(&app, "GET", "/api/v1/bookings/user/user_1/summary", None).await;
    assert_eq!(summary["total_spent_idr"], 0);
    assert_eq!(summary["by_status"]["cancelled"]["count"], 1);
}

#[tokio::test]
async fn concurrent_confirms_via_http_have_one_winner() {
    let (app, store, _) = setup();
    let plan_id = seed_plan(&store, Some(seed_itinerary())).await;
    let uri = format!("/api/v1/plan/{}/confirm", plan_id);

    let (first, second) = tokio::join!(
        send(&app, "POST", &uri, Some(confirm_body("tok_valid_a"))),
        send(&app, "POST", &uri, Some(confirm_body("tok_valid_b"))),
    );

    let statuses = [first.0, second.0];
    assert_eq!(
        statuses.iter().filter(|s| **s == StatusCode::OK).count(),
        1,
        "exactly one winner, got {:?}",
        statuses
    );
    assert_eq!(
        statuses
            .iter()
            .filter(|s| **s == StatusCode::BAD_REQUEST)
            .count(),
        1
    );
    assert_eq!(store.booking_count().await, 1);
}
