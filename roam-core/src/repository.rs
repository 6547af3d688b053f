use async_trait::async_trait;

use crate::booking::{Booking, BookingStatus};
use crate::plan::{Plan, PlanStatus};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("plan not found: {0}")]
    PlanNotFound(String),
    #[error("booking not found: {0}")]
    BookingNotFound(String),
    #[error("plan {id} is {actual}, expected {expected}")]
    PlanStatusConflict {
        id: String,
        expected: PlanStatus,
        actual: PlanStatus,
    },
    #[error("booking {0} is already cancelled")]
    BookingAlreadyCancelled(String),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Filter for booking listings.
#[derive(Debug, Clone, Default)]
pub struct BookingFilter {
    pub user_id: Option<String>,
    pub status: Option<BookingStatus>,
    pub limit: Option<usize>,
}

/// Persistence contract for plans and their bookings.
#[async_trait]
pub trait PlanStore: Send + Sync {
    async fn insert_plan(&self, plan: Plan) -> Result<(), StoreError>;

    async fn get_plan(&self, plan_id: &str) -> Result<Option<Plan>, StoreError>;

    /// Flip a draft plan to cancelled. Non-draft plans are refused.
    async fn cancel_plan(&self, plan_id: &str) -> Result<Plan, StoreError>;

    /// Transactional confirm commit: re-checks that the plan is still draft,
    /// then inserts every booking and flips the status in one step, all of
    /// it or none of it. A concurrent confirmation of the same plan loses
    /// with [`StoreError::PlanStatusConflict`].
    async fn confirm_plan(&self, plan_id: &str, bookings: Vec<Booking>)
        -> Result<Plan, StoreError>;

    async fn get_booking(&self, booking_id: &str) -> Result<Option<Booking>, StoreError>;

    async fn list_bookings(&self, filter: BookingFilter) -> Result<Vec<Booking>, StoreError>;

    async fn bookings_for_plan(&self, plan_id: &str) -> Result<Vec<Booking>, StoreError>;

    /// Flip a booking to cancelled. Bookings are never deleted.
    async fn cancel_booking(&self, booking_id: &str) -> Result<Booking, StoreError>;
}
