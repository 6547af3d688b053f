//! Confirm-and-book pipeline.
//!
//! A confirmation runs validation, plan lookup, cost reconciliation,
//! payment and booking in strict order. The itinerary is untrusted input:
//! nothing is charged until its reported total reconciles against the line
//! items, and nothing is persisted except through the store's conditional
//! commit, so an abort at any stage leaves no partial state behind.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use roam_core::booking::{Booking, BookingType};
use roam_core::executor::BookingExecutor;
use roam_core::payment::{PaymentErrorKind, PaymentProcessor};
use roam_core::plan::PlanStatus;
use roam_core::reconcile;
use roam_core::repository::{PlanStore, StoreError};
use roam_shared::audit::AuditTrail;
use roam_shared::pii::Secret;

#[derive(Debug, Clone, Deserialize)]
pub struct ConfirmRequest {
    pub plan_id: String,
    pub user_id: String,
    pub payment_token: Secret<String>,
    pub confirmed: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConfirmOutcome {
    pub success: bool,
    pub plan_id: String,
    pub bookings: Vec<Booking>,
    pub total_charged: i64,
    pub message: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfirmError {
    #[error("validation failed: {}", missing.join("; "))]
    ValidationFailed { missing: Vec<String> },
    #[error("plan not found: {0}")]
    NotFound(String),
    #[error("plan already confirmed")]
    AlreadyConfirmed,
    #[error("plan has been cancelled")]
    PlanCancelled,
    #[error("plan has no itinerary")]
    NoItinerary,
    #[error("reported cost {reported} does not match recalculated cost {recalculated}")]
    CostMismatch { reported: i64, recalculated: i64 },
    #[error("payment failed: {message}")]
    PaymentFailed {
        code: PaymentErrorKind,
        message: String,
    },
    #[error("no booking could be completed")]
    BookingFailed,
    #[error(transparent)]
    Store(StoreError),
}

impl ConfirmError {
    /// Stable machine-readable code surfaced to callers.
    pub fn code(&self) -> &'static str {
        match self {
            ConfirmError::ValidationFailed { .. } => "validation_failed",
            ConfirmError::NotFound(_) => "not_found",
            ConfirmError::AlreadyConfirmed => "already_confirmed",
            ConfirmError::PlanCancelled => "plan_cancelled",
            ConfirmError::NoItinerary => "no_itinerary",
            ConfirmError::CostMismatch { .. } => "cost_mismatch",
            ConfirmError::PaymentFailed { .. } => "payment_failed",
            ConfirmError::BookingFailed => "booking_failed",
            ConfirmError::Store(_) => "store_error",
        }
    }
}

pub struct ConfirmationGuardrail {
    store: Arc<dyn PlanStore>,
    payments: Arc<dyn PaymentProcessor>,
    executor: Arc<dyn BookingExecutor>,
    audit: AuditTrail,
    cost_tolerance: f64,
}

impl ConfirmationGuardrail {
    pub fn new(
        store: Arc<dyn PlanStore>,
        payments: Arc<dyn PaymentProcessor>,
        executor: Arc<dyn BookingExecutor>,
        audit: AuditTrail,
    ) -> Self {
        Self {
            store,
            payments,
            executor,
            audit,
            cost_tolerance: reconcile::DEFAULT_COST_TOLERANCE,
        }
    }

    pub fn with_cost_tolerance(mut self, tolerance: f64) -> Self {
        self.cost_tolerance = tolerance;
        self
    }

    pub async fn confirm(&self, request: &ConfirmRequest) -> Result<ConfirmOutcome, ConfirmError> {
        let missing = validate(request);
        if !missing.is_empty() {
            return Err(ConfirmError::ValidationFailed { missing });
        }
        tracing::debug!(plan_id = %request.plan_id, "confirmation request validated");

        let plan = self
            .store
            .get_plan(&request.plan_id)
            .await
            .map_err(ConfirmError::Store)?
            .ok_or_else(|| ConfirmError::NotFound(request.plan_id.clone()))?;

        match plan.status {
            PlanStatus::Confirmed => return Err(ConfirmError::AlreadyConfirmed),
            PlanStatus::Cancelled => return Err(ConfirmError::PlanCancelled),
            PlanStatus::Draft => {}
        }

        let itinerary = plan.itinerary.as_ref().ok_or(ConfirmError::NoItinerary)?;

        let reported = itinerary.total_estimated_cost;
        let recalculated = reconcile::recalculate_total(itinerary);
        if !reconcile::within_tolerance(reported, recalculated, self.cost_tolerance) {
            // Security-relevant rejection, distinct from ordinary validation
            // failures: the itinerary claims a total its own line items
            // cannot support.
            self.audit.booking_failed(
                &request.user_id,
                &plan.id,
                "halucination_risk",
                &format!("reported {} but recalculated cost is {}", reported, recalculated),
            );
            return Err(ConfirmError::CostMismatch {
                reported,
                recalculated,
            });
        }
        tracing::debug!(plan_id = %plan.id, recalculated, "cost check passed");

        // Charge the recalculated total, never the reported one.
        let total_charged = recalculated;
        let description = format!("Vacation booking: {}", plan.destination);

        self.audit
            .booking_attempt(&request.user_id, &plan.id, "full_trip", total_charged);
        self.audit
            .payment_attempt(&request.user_id, total_charged, &description);

        let payment = self
            .payments
            .process_payment(total_charged, request.payment_token.expose(), &description)
            .await;

        if !payment.success {
            let code = payment.error.unwrap_or(PaymentErrorKind::InvalidToken);
            self.audit
                .booking_failed(&request.user_id, &plan.id, "payment", code.code());
            return Err(ConfirmError::PaymentFailed {
                code,
                message: payment.message,
            });
        }
        tracing::debug!(plan_id = %plan.id, "payment completed");

        let mut bookings = Vec::new();
        if let Some(hotel) = itinerary.recommended_hotels.first() {
            let nights = itinerary.night_count();
            let amount = hotel.price_per_night * nights;

            match self
                .executor
                .book(
                    BookingType::Hotel,
                    &hotel.id,
                    &request.user_id,
                    &itinerary.start_date,
                    &itinerary.end_date,
                    1,
                    &payment,
                )
                .await
            {
                Ok(confirmation) => {
                    self.audit.booking_success(
                        &request.user_id,
                        &confirmation.provider_ref,
                        BookingType::Hotel.as_str(),
                        amount,
                        payment.transaction_id.as_deref().unwrap_or_default(),
                    );
                    bookings.push(Booking::confirmed(
                        &plan.id,
                        &request.user_id,
                        BookingType::Hotel,
                        confirmation.provider_ref,
                        amount,
                    ));
                }
                Err(err) => {
                    tracing::warn!(error = %err, hotel_id = %hotel.id, "hotel booking refused");
                    self.audit.booking_failed(
                        &request.user_id,
                        &plan.id,
                        BookingType::Hotel.as_str(),
                        &err.to_string(),
                    );
                }
            }

            // The itinerary offered a bookable resource and none committed.
            if bookings.is_empty() {
                return Err(ConfirmError::BookingFailed);
            }
        }

        let confirmed_plan = self
            .store
            .confirm_plan(&plan.id, bookings.clone())
            .await
            .map_err(|err| match err {
                StoreError::PlanStatusConflict {
                    actual: PlanStatus::Confirmed,
                    ..
                } => ConfirmError::AlreadyConfirmed,
                StoreError::PlanStatusConflict {
                    actual: PlanStatus::Cancelled,
                    ..
                } => ConfirmError::PlanCancelled,
                other => ConfirmError::Store(other),
            })?;

        let transaction_id = payment.transaction_id.unwrap_or_default();
        tracing::info!(
            plan_id = %confirmed_plan.id,
            %transaction_id,
            total_charged,
            bookings = bookings.len(),
            "plan confirmed"
        );

        Ok(ConfirmOutcome {
            success: true,
            plan_id: confirmed_plan.id,
            bookings,
            total_charged,
            message: format!("Booking confirmed! Transaction ID: {}", transaction_id),
        })
    }
}

fn validate(request: &ConfirmRequest) -> Vec<String> {
    let mut missing = Vec::new();
    if request.user_id.trim().is_empty() {
        missing.push("user_id is required".to_string());
    }
    if request.payment_token.expose().is_empty() {
        missing.push("payment_token is required".to_string());
    }
    if !request.confirmed {
        missing.push("explicit confirmation (confirmed=true) is required".to_string());
    }
    missing
}
