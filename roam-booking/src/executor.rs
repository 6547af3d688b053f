//! Mock booking provider. Mints provider references once payment has been
//! verified; refuses to do anything at all without a successful payment.

use async_trait::async_trait;
use chrono::Utc;

use roam_core::booking::BookingType;
use roam_core::executor::{BookingConfirmation, BookingError, BookingExecutor};
use roam_core::payment::PaymentResult;
use roam_shared::ids::provider_ref;

pub struct MockBookingExecutor;

#[async_trait]
impl BookingExecutor for MockBookingExecutor {
    async fn book(
        &self,
        resource_type: BookingType,
        resource_id: &str,
        user_id: &str,
        period_start: &str,
        period_end: &str,
        participants: u32,
        payment: &PaymentResult,
    ) -> Result<BookingConfirmation, BookingError> {
        if !payment.success {
            return Err(BookingError::PaymentRequired(resource_type));
        }

        let reference = provider_ref(resource_type.type_code());
        tracing::info!(
            provider_ref = %reference,
            resource_type = %resource_type,
            %resource_id,
            %user_id,
            "resource booked"
        );

        Ok(BookingConfirmation {
            provider_ref: reference,
            resource_type,
            resource_id: resource_id.to_string(),
            user_id: user_id.to_string(),
            period_start: period_start.to_string(),
            period_end: period_end.to_string(),
            participants,
            transaction_id: payment.transaction_id.clone(),
            created_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roam_core::payment::PaymentErrorKind;

    fn successful_payment() -> PaymentResult {
        PaymentResult::succeeded("txn_abc123def456".to_string(), 1_400_000)
    }

    #[tokio::test]
    async fn refuses_to_book_without_successful_payment() {
        let failed = PaymentResult::failed(PaymentErrorKind::PaymentDeclined, "declined");
        let result = MockBookingExecutor
            .book(
                BookingType::Hotel,
                "htl_001",
                "user_1",
                "2025-12-20",
                "2025-12-24",
                1,
                &failed,
            )
            .await;
        assert_eq!(result.unwrap_err(), BookingError::PaymentRequired(BookingType::Hotel));
    }

    #[tokio::test]
    async fn hotel_booking_mints_typed_reference() {
        let confirmation = MockBookingExecutor
            .book(
                BookingType::Hotel,
                "htl_001",
                "user_1",
                "2025-12-20",
                "2025-12-24",
                1,
                &successful_payment(),
            )
            .await
            .unwrap();
        assert!(confirmation.provider_ref.starts_with("HTL-"));
        assert_eq!(confirmation.transaction_id.as_deref(), Some("txn_abc123def456"));
    }

    #[tokio::test]
    async fn references_carry_the_resource_type_code() {
        for (resource_type, prefix) in [
            (BookingType::Flight, "FLT-"),
            (BookingType::Activity, "ACT-"),
        ] {
            let confirmation = MockBookingExecutor
                .book(
                    resource_type,
                    "res_001",
                    "user_1",
                    "2025-12-20",
                    "2025-12-20",
                    2,
                    &successful_payment(),
                )
                .await
                .unwrap();
            assert!(confirmation.provider_ref.starts_with(prefix));
        }
    }
}
