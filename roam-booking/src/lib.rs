pub mod executor;
pub mod guardrail;
pub mod payment;

pub use executor::MockBookingExecutor;
pub use guardrail::{ConfirmError, ConfirmOutcome, ConfirmRequest, ConfirmationGuardrail};
pub use payment::MockPaymentProcessor;
