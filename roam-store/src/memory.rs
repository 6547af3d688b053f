//! In-memory plan/booking store. Stands in for the reference deployment's
//! database while keeping its one hard guarantee: the confirm commit is a
//! conditional update, so two racing confirmations of the same plan can
//! never both win.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use roam_core::booking::Booking;
use roam_core::plan::{Plan, PlanStatus};
use roam_core::repository::{BookingFilter, PlanStore, StoreError};

#[derive(Default)]
struct Inner {
    plans: HashMap<String, Plan>,
    bookings: HashMap<String, Booking>,
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Inner>>,
    fail_next_commit: Arc<AtomicBool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next confirm commit fail after its checks pass but before
    /// anything mutates. Lets tests prove the commit is all-or-nothing.
    pub fn fail_next_commit(&self) {
        self.fail_next_commit.store(true, Ordering::SeqCst);
    }

    pub async fn plan_count(&self) -> usize {
        self.inner.read().await.plans.len()
    }

    pub async fn booking_count(&self) -> usize {
        self.inner.read().await.bookings.len()
    }
}

#[async_trait]
impl PlanStore for MemoryStore {
    async fn insert_plan(&self, plan: Plan) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        inner.plans.insert(plan.id.clone(), plan);
        Ok(())
    }

    async fn get_plan(&self, plan_id: &str) -> Result<Option<Plan>, StoreError> {
        Ok(self.inner.read().await.plans.get(plan_id).cloned())
    }

    async fn cancel_plan(&self, plan_id: &str) -> Result<Plan, StoreError> {
        let mut inner = self.inner.write().await;
        let plan = inner
            .plans
            .get_mut(plan_id)
            .ok_or_else(|| StoreError::PlanNotFound(plan_id.to_string()))?;
        if plan.status != PlanStatus::Draft {
            return Err(StoreError::PlanStatusConflict {
                id: plan_id.to_string(),
                expected: PlanStatus::Draft,
                actual: plan.status,
            });
        }
        plan.status = PlanStatus::Cancelled;
        plan.updated_at = Utc::now();
        Ok(plan.clone())
    }

    async fn confirm_plan(
        &self,
        plan_id: &str,
        bookings: Vec<Booking>,
    ) -> Result<Plan, StoreError> {
        let mut inner = self.inner.write().await;
        let plan = inner
            .plans
            .get_mut(plan_id)
            .ok_or_else(|| StoreError::PlanNotFound(plan_id.to_string()))?;
        // Re-check under the write lock: only one caller can observe draft.
        if plan.status != PlanStatus::Draft {
            return Err(StoreError::PlanStatusConflict {
                id: plan_id.to_string(),
                expected: PlanStatus::Draft,
                actual: plan.status,
            });
        }
        if self.fail_next_commit.swap(false, Ordering::SeqCst) {
            return Err(StoreError::Unavailable("commit failure injected".to_string()));
        }
        plan.status = PlanStatus::Confirmed;
        plan.updated_at = Utc::now();
        let confirmed = plan.clone();
        for booking in bookings {
            inner.bookings.insert(booking.id.clone(), booking);
        }
        Ok(confirmed)
    }

    async fn get_booking(&self, booking_id: &str) -> Result<Option<Booking>, StoreError> {
        Ok(self.inner.read().await.bookings.get(booking_id).cloned())
    }

    async fn list_bookings(&self, filter: BookingFilter) -> Result<Vec<Booking>, StoreError> {
        let inner = self.inner.read().await;
        let mut bookings: Vec<Booking> = inner
            .bookings
            .values()
            .filter(|b| {
                filter
                    .user_id
                    .as_ref()
                    .map(|user_id| &b.user_id == user_id)
                    .unwrap_or(true)
                    && filter.status.map(|status| b.status == status).unwrap_or(true)
            })
            .cloned()
            .collect();
        bookings.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        if let Some(limit) = filter.limit {
            bookings.truncate(limit);
        }
        Ok(bookings)
    }

    async fn bookings_for_plan(&self, plan_id: &str) -> Result<Vec<Booking>, StoreError> {
        let inner = self.inner.read().await;
        let mut bookings: Vec<Booking> = inner
            .bookings
            .values()
            .filter(|b| b.plan_id == plan_id)
            .cloned()
            .collect();
        bookings.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(bookings)
    }

    async fn cancel_booking(&self, booking_id: &str) -> Result<Booking, StoreError> {
        use roam_core::booking::BookingStatus;

        let mut inner = self.inner.write().await;
        let booking = inner
            .bookings
            .get_mut(booking_id)
            .ok_or_else(|| StoreError::BookingNotFound(booking_id.to_string()))?;
        if booking.status == BookingStatus::Cancelled {
            return Err(StoreError::BookingAlreadyCancelled(booking_id.to_string()));
        }
        booking.status = BookingStatus::Cancelled;
        Ok(booking.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use roam_core::booking::{BookingStatus, BookingType};

    fn draft_plan() -> Plan {
        Plan::new(
            "user_1".to_string(),
            "Yogyakarta".to_string(),
            NaiveDate::from_ymd_opt(2025, 12, 20).unwrap(),
            NaiveDate::from_ymd_opt(2025, 12, 24).unwrap(),
            5_000_000,
            None,
        )
    }

    fn booking_for(plan_id: &str) -> Booking {
        Booking::confirmed(
            plan_id,
            "user_1",
            BookingType::Hotel,
            "HTL-AAAA1111".to_string(),
            1_400_000,
        )
    }

    #[tokio::test]
    async fn insert_and_get_roundtrip() {
        let store = MemoryStore::new();
        let plan = draft_plan();
        let plan_id = plan.id.clone();
        store.insert_plan(plan).await.unwrap();

        let fetched = store.get_plan(&plan_id).await.unwrap().unwrap();
        assert_eq!(fetched.status, PlanStatus::Draft);
        assert!(store.get_plan("plan_missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn confirm_flips_status_and_stores_bookings_together() {
        let store = MemoryStore::new();
        let plan = draft_plan();
        let plan_id = plan.id.clone();
        store.insert_plan(plan).await.unwrap();

        let confirmed = store
            .confirm_plan(&plan_id, vec![booking_for(&plan_id)])
            .await
            .unwrap();

        assert_eq!(confirmed.status, PlanStatus::Confirmed);
        assert_eq!(store.booking_count().await, 1);
        assert_eq!(store.bookings_for_plan(&plan_id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn confirm_refuses_non_draft_plans() {
        let store = MemoryStore::new();
        let plan = draft_plan();
        let plan_id = plan.id.clone();
        store.insert_plan(plan).await.unwrap();
        store.confirm_plan(&plan_id, vec![]).await.unwrap();

        let second = store.confirm_plan(&plan_id, vec![booking_for(&plan_id)]).await;
        assert!(matches!(
            second,
            Err(StoreError::PlanStatusConflict {
                actual: PlanStatus::Confirmed,
                ..
            })
        ));
        assert_eq!(store.booking_count().await, 0);
    }

    #[tokio::test]
    async fn injected_commit_failure_leaves_no_partial_state() {
        let store = MemoryStore::new();
        let plan = draft_plan();
        let plan_id = plan.id.clone();
        store.insert_plan(plan).await.unwrap();

        store.fail_next_commit();
        let result = store.confirm_plan(&plan_id, vec![booking_for(&plan_id)]).await;
        assert!(matches!(result, Err(StoreError::Unavailable(_))));

        let plan = store.get_plan(&plan_id).await.unwrap().unwrap();
        assert_eq!(plan.status, PlanStatus::Draft);
        assert_eq!(store.booking_count().await, 0);

        // The hook is one-shot; the retry commits cleanly.
        store
            .confirm_plan(&plan_id, vec![booking_for(&plan_id)])
            .await
            .unwrap();
        assert_eq!(store.booking_count().await, 1);
    }

    #[tokio::test]
    async fn concurrent_confirms_have_exactly_one_winner() {
        let store = MemoryStore::new();
        let plan = draft_plan();
        let plan_id = plan.id.clone();
        store.insert_plan(plan).await.unwrap();

        let (a, b) = tokio::join!(
            store.confirm_plan(&plan_id, vec![booking_for(&plan_id)]),
            store.confirm_plan(&plan_id, vec![booking_for(&plan_id)]),
        );

        assert_eq!(a.is_ok() as u8 + b.is_ok() as u8, 1);
        assert_eq!(store.booking_count().await, 1);
    }

    #[tokio::test]
    async fn cancel_plan_requires_draft() {
        let store = MemoryStore::new();
        let plan = draft_plan();
        let plan_id = plan.id.clone();
        store.insert_plan(plan).await.unwrap();
        store.confirm_plan(&plan_id, vec![]).await.unwrap();

        assert!(matches!(
            store.cancel_plan(&plan_id).await,
            Err(StoreError::PlanStatusConflict { .. })
        ));
    }

    #[tokio::test]
    async fn booking_cancellation_is_a_status_flip() {
        let store = MemoryStore::new();
        let plan = draft_plan();
        let plan_id = plan.id.clone();
        store.insert_plan(plan).await.unwrap();
        let booking = booking_for(&plan_id);
        let booking_id = booking.id.clone();
        store.confirm_plan(&plan_id, vec![booking]).await.unwrap();

        let cancelled = store.cancel_booking(&booking_id).await.unwrap();
        assert_eq!(cancelled.status, BookingStatus::Cancelled);
        // Never deleted.
        assert_eq!(store.booking_count().await, 1);

        assert!(matches!(
            store.cancel_booking(&booking_id).await,
            Err(StoreError::BookingAlreadyCancelled(_))
        ));
    }

    #[tokio::test]
    async fn listing_filters_by_user_and_status() {
        let store = MemoryStore::new();
        let plan = draft_plan();
        let plan_id = plan.id.clone();
        store.insert_plan(plan).await.unwrap();
        let kept = booking_for(&plan_id);
        let cancelled = booking_for(&plan_id);
        let cancelled_id = cancelled.id.clone();
        store
            .confirm_plan(&plan_id, vec![kept, cancelled])
            .await
            .unwrap();
        store.cancel_booking(&cancelled_id).await.unwrap();

        let confirmed = store
            .list_bookings(BookingFilter {
                user_id: Some("user_1".to_string()),
                status: Some(BookingStatus::Confirmed),
                limit: None,
            })
            .await
            .unwrap();
        assert_eq!(confirmed.len(), 1);

        let none = store
            .list_bookings(BookingFilter {
                user_id: Some("user_2".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert!(none.is_empty());
    }
}
