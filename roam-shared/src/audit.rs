//! Append-only audit trail for state-changing actions.
//!
//! Every booking and payment action goes through [`AuditTrail::log`], which
//! redacts sensitive keys before the entry reaches any sink. Callers never
//! pre-sanitize and cannot bypass the redaction.

use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Sentinel written in place of redacted values.
pub const REDACTED: &str = "[REDACTED]";

/// Keys whose values must never be stored. Matched case-insensitively as
/// substrings of the key name.
const SENSITIVE_KEYS: [&str; 5] = ["payment_token", "card_number", "cvv", "password", "token"];

const AGENT_SUMMARY_MAX_CHARS: usize = 200;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    pub timestamp: DateTime<Utc>,
    pub user_id: String,
    pub action: String,
    pub status: String,
    pub details: Value,
}

/// Append-only writer for audit entries. Implementations must preserve
/// append order; entries are immutable once written.
pub trait AuditSink: Send + Sync {
    fn append(&self, entry: AuditEntry);
}

/// In-memory sink used by the development deployment and the test suites.
#[derive(Default)]
pub struct MemoryAuditSink {
    entries: RwLock<Vec<AuditEntry>>,
}

impl MemoryAuditSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<AuditEntry> {
        self.entries.read().unwrap().clone()
    }

    pub fn entries_for_action(&self, action: &str) -> Vec<AuditEntry> {
        self.entries
            .read()
            .unwrap()
            .iter()
            .filter(|e| e.action == action)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl AuditSink for MemoryAuditSink {
    fn append(&self, entry: AuditEntry) {
        self.entries.write().unwrap().push(entry);
    }
}

/// Recursively redact sensitive keys in a detail mapping. Objects nested in
/// arrays are walked as well.
pub fn redact(details: &Value) -> Value {
    match details {
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, value)| {
                    let lowered = key.to_lowercase();
                    if SENSITIVE_KEYS.iter().any(|s| lowered.contains(s)) {
                        (key.clone(), Value::String(REDACTED.to_string()))
                    } else {
                        (key.clone(), redact(value))
                    }
                })
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(redact).collect()),
        other => other.clone(),
    }
}

/// Handle for recording auditable actions. Cheap to clone; all clones share
/// the same sink.
#[derive(Clone)]
pub struct AuditTrail {
    sink: Arc<dyn AuditSink>,
}

impl AuditTrail {
    pub fn new(sink: Arc<dyn AuditSink>) -> Self {
        Self { sink }
    }

    pub fn log(&self, user_id: &str, action: &str, details: Value) -> AuditEntry {
        self.log_with_status(user_id, action, details, "success")
    }

    pub fn log_with_status(
        &self,
        user_id: &str,
        action: &str,
        details: Value,
        status: &str,
    ) -> AuditEntry {
        let entry = AuditEntry {
            timestamp: Utc::now(),
            user_id: user_id.to_string(),
            action: action.to_string(),
            status: status.to_string(),
            details: redact(&details),
        };
        tracing::info!(
            target: "audit",
            "{}",
            serde_json::to_string(&entry).unwrap_or_default()
        );
        self.sink.append(entry.clone());
        entry
    }

    pub fn plan_created(
        &self,
        user_id: &str,
        plan_id: &str,
        destination: &str,
        budget_idr: i64,
    ) -> AuditEntry {
        self.log(
            user_id,
            "PLAN_CREATED",
            json!({
                "plan_id": plan_id,
                "destination": destination,
                "budget_idr": budget_idr,
            }),
        )
    }

    pub fn booking_attempt(
        &self,
        user_id: &str,
        plan_id: &str,
        booking_type: &str,
        amount_idr: i64,
    ) -> AuditEntry {
        self.log(
            user_id,
            "BOOKING_ATTEMPT",
            json!({
                "plan_id": plan_id,
                "booking_type": booking_type,
                "amount_idr": amount_idr,
            }),
        )
    }

    pub fn booking_success(
        &self,
        user_id: &str,
        booking_ref: &str,
        booking_type: &str,
        amount_idr: i64,
        transaction_id: &str,
    ) -> AuditEntry {
        self.log(
            user_id,
            "BOOKING_SUCCESS",
            json!({
                "booking_ref": booking_ref,
                "booking_type": booking_type,
                "amount_idr": amount_idr,
                "transaction_id": transaction_id,
            }),
        )
    }

    pub fn booking_failed(
        &self,
        user_id: &str,
        plan_id: &str,
        booking_type: &str,
        error: &str,
    ) -> AuditEntry {
        self.log_with_status(
            user_id,
            "BOOKING_FAILED",
            json!({
                "plan_id": plan_id,
                "booking_type": booking_type,
                "error": error,
            }),
            "failed",
        )
    }

    pub fn booking_cancelled(
        &self,
        user_id: &str,
        booking_id: &str,
        provider_ref: &str,
        reason: &str,
    ) -> AuditEntry {
        self.log(
            user_id,
            "BOOKING_CANCELLED",
            json!({
                "booking_id": booking_id,
                "provider_ref": provider_ref,
                "reason": reason,
            }),
        )
    }

    /// Payment attempts record amount and description only. The token is
    /// not part of the detail shape at all.
    pub fn payment_attempt(&self, user_id: &str, amount_idr: i64, description: &str) -> AuditEntry {
        self.log(
            user_id,
            "PAYMENT_ATTEMPT",
            json!({
                "amount_idr": amount_idr,
                "description": description,
            }),
        )
    }

    pub fn agent_action(
        &self,
        user_id: &str,
        agent_action: &str,
        tools_called: &[String],
        input_summary: &str,
    ) -> AuditEntry {
        let summary: String = input_summary.chars().take(AGENT_SUMMARY_MAX_CHARS).collect();
        self.log(
            user_id,
            "AGENT_ACTION",
            json!({
                "agent_action": agent_action,
                "tools_called": tools_called,
                "input_summary": summary,
            }),
        )
    }
}
