use std::sync::Arc;

use roam_core::itinerary::Itinerary;
use roam_core::source::{ItineraryRequest, ItinerarySource};
use roam_shared::audit::AuditTrail;

use crate::generator::build_itinerary;
use crate::retry::RetryPolicy;

/// Fronts itinerary generation: an optional primary source (typically a
/// generative agent) is tried under the retry policy; any failure falls
/// back to the rule-based generator, so plan creation never fails outright.
pub struct PlannerService {
    primary: Option<Arc<dyn ItinerarySource>>,
    retry: RetryPolicy,
    audit: AuditTrail,
}

impl PlannerService {
    pub fn new(
        primary: Option<Arc<dyn ItinerarySource>>,
        retry: RetryPolicy,
        audit: AuditTrail,
    ) -> Self {
        Self {
            primary,
            retry,
            audit,
        }
    }

    /// Planner with no generative source configured.
    pub fn fallback_only(audit: AuditTrail) -> Self {
        Self::new(None, RetryPolicy::default(), audit)
    }

    pub async fn generate(&self, request: &ItineraryRequest) -> Itinerary {
        if let Some(source) = &self.primary {
            match self.retry.run(|| source.generate(request)).await {
                Ok(itinerary) => {
                    self.audit.agent_action(
                        &request.user_id,
                        "generate_itinerary",
                        &[source.name().to_string()],
                        &format!(
                            "{} | {} to {} | {} IDR",
                            request.destination,
                            request.start_date,
                            request.end_date,
                            request.budget_idr
                        ),
                    );
                    return itinerary;
                }
                Err(err) => {
                    tracing::warn!(error = %err, source = source.name(), "itinerary source failed, using fallback");
                }
            }
        }
        build_itinerary(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use roam_core::source::{PlannerError, TravelType};
    use roam_shared::audit::MemoryAuditSink;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    struct FlakySource {
        failures_before_success: u32,
        calls: AtomicU32,
    }

    #[async_trait]
    impl ItinerarySource for FlakySource {
        async fn generate(&self, request: &ItineraryRequest) -> Result<Itinerary, PlannerError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            if n < self.failures_before_success {
                return Err(PlannerError::SourceUnavailable("429 quota".to_string()));
            }
            let mut itinerary = build_itinerary(request);
            itinerary.trip_name = "Agent Trip".to_string();
            Ok(itinerary)
        }

        fn name(&self) -> &'static str {
            "mock_agent"
        }
    }

    fn request() -> ItineraryRequest {
        ItineraryRequest {
            user_id: "user_1".to_string(),
            destination: "Yogyakarta".to_string(),
            start_date: NaiveDate::from_ymd_opt(2025, 12, 20).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 12, 24).unwrap(),
            budget_idr: 5_000_000,
            travel_type: TravelType::Culture,
            travelers: 1,
            preferences: None,
        }
    }

    fn fast_retry() -> RetryPolicy {
        RetryPolicy::new(3, Duration::from_millis(1), Duration::ZERO)
    }

    fn audit() -> (AuditTrail, Arc<MemoryAuditSink>) {
        let sink = Arc::new(MemoryAuditSink::new());
        (AuditTrail::new(sink.clone()), sink)
    }

    #[tokio::test]
    async fn uses_primary_source_and_records_agent_action() {
        let (trail, sink) = audit();
        let source = Arc::new(FlakySource {
            failures_before_success: 1,
            calls: AtomicU32::new(0),
        });
        let service = PlannerService::new(Some(source), fast_retry(), trail);

        let itinerary = service.generate(&request()).await;

        assert_eq!(itinerary.trip_name, "Agent Trip");
        let agent_entries = sink.entries_for_action("AGENT_ACTION");
        assert_eq!(agent_entries.len(), 1);
        assert_eq!(agent_entries[0].details["tools_called"][0], "mock_agent");
    }

    #[tokio::test]
    async fn falls_back_when_primary_keeps_failing() {
        let (trail, sink) = audit();
        let source = Arc::new(FlakySource {
            failures_before_success: u32::MAX,
            calls: AtomicU32::new(0),
        });
        let service = PlannerService::new(Some(source), fast_retry(), trail);

        let itinerary = service.generate(&request()).await;

        assert!(itinerary.trip_name.contains("Culture Trip"));
        assert!(sink.entries_for_action("AGENT_ACTION").is_empty());
    }

    #[tokio::test]
    async fn fallback_only_never_touches_audit() {
        let (trail, sink) = audit();
        let service = PlannerService::fallback_only(trail);

        let itinerary = service.generate(&request()).await;

        assert_eq!(itinerary.days.len(), 5);
        assert!(sink.is_empty());
    }
}
