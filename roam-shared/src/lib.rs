pub mod audit;
pub mod ids;
pub mod pii;

pub use audit::{AuditEntry, AuditSink, AuditTrail, MemoryAuditSink};
pub use pii::Secret;
