//! Mock payment provider. Token prefixes encode the outcome so tests can
//! assert behavior from literal token strings: `tok_valid*` charges
//! succeed, `tok_fail*` are declined, any other `tok_*` is unrecognized.

use async_trait::async_trait;

use roam_core::payment::{
    classify_token, PaymentErrorKind, PaymentProcessor, PaymentResult, TokenClass,
    DEFAULT_MAX_PAYMENT_IDR, TOKEN_PREFIX,
};
use roam_shared::ids::prefixed_id;

pub struct MockPaymentProcessor {
    max_amount_idr: i64,
}

impl MockPaymentProcessor {
    pub fn new(max_amount_idr: i64) -> Self {
        Self { max_amount_idr }
    }
}

impl Default for MockPaymentProcessor {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_PAYMENT_IDR)
    }
}

#[async_trait]
impl PaymentProcessor for MockPaymentProcessor {
    async fn process_payment(
        &self,
        amount_idr: i64,
        token: &str,
        description: &str,
    ) -> PaymentResult {
        // Log lines here never include the token value.
        let class = classify_token(token);

        if class == TokenClass::Malformed {
            tracing::warn!(amount_idr, description, "payment token has invalid format");
            return PaymentResult::failed(
                PaymentErrorKind::InvalidTokenFormat,
                format!("Payment token must start with '{}'", TOKEN_PREFIX),
            );
        }

        if amount_idr <= 0 {
            return PaymentResult::failed(PaymentErrorKind::InvalidAmount, "Amount must be positive");
        }

        if amount_idr > self.max_amount_idr {
            return PaymentResult::failed(
                PaymentErrorKind::AmountExceedsLimit,
                format!("Amount exceeds maximum limit of {} IDR", self.max_amount_idr),
            );
        }

        match class {
            TokenClass::Valid => {
                let transaction_id = prefixed_id("txn");
                tracing::info!(%transaction_id, amount_idr, description, "payment succeeded");
                PaymentResult::succeeded(transaction_id, amount_idr)
            }
            TokenClass::Declined => {
                tracing::warn!(amount_idr, description, "payment declined by provider");
                PaymentResult::failed(
                    PaymentErrorKind::PaymentDeclined,
                    "Payment was declined by the provider",
                )
            }
            TokenClass::Unknown => {
                tracing::warn!(amount_idr, description, "payment token not recognized");
                PaymentResult::failed(
                    PaymentErrorKind::InvalidToken,
                    "Payment token is not recognized",
                )
            }
            TokenClass::Malformed => unreachable!("handled above"),
        }
    }
}
