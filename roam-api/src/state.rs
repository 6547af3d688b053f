use std::sync::Arc;
use std::time::Duration;

use roam_booking::{ConfirmationGuardrail, MockBookingExecutor, MockPaymentProcessor};
use roam_core::repository::PlanStore;
use roam_planner::{PlannerService, RetryPolicy};
use roam_shared::audit::{AuditTrail, MemoryAuditSink};
use roam_store::app_config::{BusinessRules, PlannerConfig};
use roam_store::MemoryStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn PlanStore>,
    pub planner: Arc<PlannerService>,
    pub guardrail: Arc<ConfirmationGuardrail>,
    pub audit: AuditTrail,
    pub rules: BusinessRules,
}

impl AppState {
    /// State wired against the in-memory store and mock providers. The
    /// returned store and sink handles allow seeding and inspection in
    /// tests.
    pub fn in_memory(
        rules: BusinessRules,
        planner_config: PlannerConfig,
    ) -> (Self, Arc<MemoryStore>, Arc<MemoryAuditSink>) {
        let store = Arc::new(MemoryStore::new());
        let sink = Arc::new(MemoryAuditSink::new());
        let audit = AuditTrail::new(sink.clone());

        let retry = RetryPolicy::new(
            planner_config.max_attempts,
            Duration::from_millis(planner_config.base_delay_ms),
            Duration::from_millis(planner_config.min_interval_ms),
        );
        let planner = Arc::new(PlannerService::new(None, retry, audit.clone()));

        let guardrail = Arc::new(
            ConfirmationGuardrail::new(
                store.clone(),
                Arc::new(MockPaymentProcessor::new(rules.max_payment_idr)),
                Arc::new(MockBookingExecutor),
                audit.clone(),
            )
            .with_cost_tolerance(rules.cost_tolerance),
        );

        let state = Self {
            store: store.clone(),
            planner,
            guardrail,
            audit,
            rules,
        };
        (state, store, sink)
    }
}
