use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use roam_booking::{ConfirmOutcome, ConfirmRequest};
use roam_core::booking::Booking;
use roam_core::itinerary::Itinerary;
use roam_core::plan::{Plan, PlanStatus};
use roam_core::source::{ItineraryRequest, TravelType};
use roam_shared::pii::Secret;
use roam_store::app_config::BusinessRules;

use crate::error::ApiError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/v1/plan", post(create_plan))
        .route("/api/v1/plan/{plan_id}", get(get_plan).delete(cancel_plan))
        .route("/api/v1/plan/{plan_id}/confirm", post(confirm_plan))
        .route("/api/v1/plan/{plan_id}/bookings", get(plan_bookings))
}

fn default_user_id() -> String {
    "user_1".to_string()
}

#[derive(Debug, Deserialize)]
pub struct CreatePlanRequest {
    #[serde(default = "default_user_id")]
    pub user_id: String,
    pub destination: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub budget_idr: i64,
    #[serde(default)]
    pub travel_type: TravelType,
    #[serde(default = "default_travelers")]
    pub travelers: u32,
    #[serde(default)]
    pub preferences: Option<String>,
}

fn default_travelers() -> u32 {
    1
}

#[derive(Debug, Serialize)]
pub struct PlanResponse {
    pub plan_id: String,
    pub status: PlanStatus,
    pub user_id: String,
    pub destination: String,
    pub created_at: DateTime<Utc>,
    pub itinerary: Option<Itinerary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl PlanResponse {
    fn from_plan(plan: Plan, message: Option<String>) -> Self {
        Self {
            plan_id: plan.id,
            status: plan.status,
            user_id: plan.user_id,
            destination: plan.destination,
            created_at: plan.created_at,
            itinerary: plan.itinerary,
            message,
        }
    }
}

async fn create_plan(
    State(state): State<AppState>,
    Json(req): Json<CreatePlanRequest>,
) -> Result<Json<PlanResponse>, ApiError> {
    validate_plan_request(&req, &state.rules)?;

    let request = ItineraryRequest {
        user_id: req.user_id.clone(),
        destination: req.destination.clone(),
        start_date: req.start_date,
        end_date: req.end_date,
        budget_idr: req.budget_idr,
        travel_type: req.travel_type,
        travelers: req.travelers,
        preferences: req.preferences.clone(),
    };
    let itinerary = state.planner.generate(&request).await;

    let plan = Plan::new(
        req.user_id,
        req.destination,
        req.start_date,
        req.end_date,
        req.budget_idr,
        Some(itinerary),
    );
    state.store.insert_plan(plan.clone()).await?;
    state
        .audit
        .plan_created(&plan.user_id, &plan.id, &plan.destination, plan.budget_idr);
    tracing::info!(plan_id = %plan.id, user_id = %plan.user_id, "plan created");

    Ok(Json(PlanResponse::from_plan(
        plan,
        Some("Itinerary generated successfully".to_string()),
    )))
}

fn validate_plan_request(req: &CreatePlanRequest, rules: &BusinessRules) -> Result<(), ApiError> {
    let mut problems = Vec::new();
    if req.destination.trim().is_empty() {
        problems.push("destination is required".to_string());
    }
    if req.end_date < req.start_date {
        problems.push("end_date must not be before start_date".to_string());
    }
    if req.budget_idr < rules.min_budget_idr || req.budget_idr > rules.max_budget_idr {
        problems.push(format!(
            "budget_idr must be between {} and {}",
            rules.min_budget_idr, rules.max_budget_idr
        ));
    }
    if req.travelers < 1 || req.travelers > rules.max_travelers {
        problems.push(format!("travelers must be between 1 and {}", rules.max_travelers));
    }
    if problems.is_empty() {
        Ok(())
    } else {
        Err(ApiError::validation(problems.join("; ")))
    }
}

async fn get_plan(
    State(state): State<AppState>,
    Path(plan_id): Path<String>,
) -> Result<Json<PlanResponse>, ApiError> {
    let plan = state
        .store
        .get_plan(&plan_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Plan not found".to_string()))?;
    Ok(Json(PlanResponse::from_plan(plan, None)))
}

#[derive(Debug, Deserialize)]
pub struct ConfirmPlanRequest {
    #[serde(default = "default_user_id")]
    pub user_id: String,
    #[serde(default)]
    pub payment_token: Secret<String>,
    #[serde(default = "default_confirmed")]
    pub confirmed: bool,
}

fn default_confirmed() -> bool {
    true
}

async fn confirm_plan(
    State(state): State<AppState>,
    Path(plan_id): Path<String>,
    Json(req): Json<ConfirmPlanRequest>,
) -> Result<Json<ConfirmOutcome>, ApiError> {
    let request = ConfirmRequest {
        plan_id,
        user_id: req.user_id,
        payment_token: req.payment_token,
        confirmed: req.confirmed,
    };
    let outcome = state.guardrail.confirm(&request).await?;
    Ok(Json(outcome))
}

async fn plan_bookings(
    State(state): State<AppState>,
    Path(plan_id): Path<String>,
) -> Result<Json<Vec<Booking>>, ApiError> {
    let bookings = state.store.bookings_for_plan(&plan_id).await?;
    Ok(Json(bookings))
}

async fn cancel_plan(
    State(state): State<AppState>,
    Path(plan_id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let plan = state.store.cancel_plan(&plan_id).await?;
    tracing::info!(plan_id = %plan.id, "plan cancelled");
    Ok(Json(json!({
        "message": "Plan cancelled",
        "plan_id": plan.id,
    })))
}
