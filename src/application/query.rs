use crate::domain::fee::FeePolicy;
use crate::domain::payment::{Payment, PaymentType};
use crate::domain::pipeline::{SortOrder, apply_fees, sort_payments};
use crate::domain::ports::{PaymentRepository, PaymentRepositoryBox};
use crate::error::Result;

/// Runs the payment query pipeline.
///
/// `PaymentQueryService` is the only place that sequences the stages:
/// fetch from the repository, sort, then apply fees. It holds no state
/// between calls, so every query is an independent read. Repository failures
/// are returned unchanged to the caller.
pub struct PaymentQueryService {
    repository: PaymentRepositoryBox,
    fee_policy: FeePolicy,
}

impl PaymentQueryService {
    /// Creates a new `PaymentQueryService`.
    ///
    /// # Arguments
    ///
    /// * `repository` - The record store payments are fetched from.
    /// * `fee_policy` - The per-type fee table applied to every result.
    pub fn new(repository: PaymentRepositoryBox, fee_policy: FeePolicy) -> Self {
        Self {
            repository,
            fee_policy,
        }
    }

    /// Fetches payments, optionally narrowed to one type, sorted by `order`
    /// and carrying their computed fee.
    ///
    /// Dropping the returned future abandons the query; no partial result is
    /// ever produced.
    pub async fn get_payments(
        &self,
        filter_type: Option<PaymentType>,
        order: SortOrder,
    ) -> Result<Vec<Payment>> {
        let snapshot = match filter_type {
            Some(payment_type) => self.repository.fetch_by_type(payment_type).await?,
            None => self.repository.fetch_all().await?,
        };
        tracing::debug!(
            filter = ?filter_type,
            %order,
            fetched = snapshot.len(),
            "payments fetched"
        );

        let sorted = sort_payments(&snapshot, order);
        Ok(apply_fees(&sorted, &self.fee_policy))
    }

    /// Looks up a single payment with its fee applied.
    pub async fn get_payment(&self, id: &str) -> Result<Option<Payment>> {
        let payment = self.repository.fetch_by_id(id).await?;
        Ok(payment.map(|p| p.with_fee(self.fee_policy.compute_fee(&p))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PaymentError;
    use crate::infrastructure::in_memory::InMemoryPaymentRepository;
    use async_trait::async_trait;

    struct FailingRepository;

    #[async_trait]
    impl PaymentRepository for FailingRepository {
        async fn fetch_all(&self) -> Result<Vec<Payment>> {
            Err(PaymentError::TransportError("connection reset".to_string()))
        }

        async fn fetch_by_type(&self, _payment_type: PaymentType) -> Result<Vec<Payment>> {
            Err(PaymentError::TransportError("connection reset".to_string()))
        }

        async fn fetch_by_id(&self, _id: &str) -> Result<Option<Payment>> {
            Err(PaymentError::TransportError("connection reset".to_string()))
        }
    }

    fn service(payments: Vec<Payment>) -> PaymentQueryService {
        PaymentQueryService::new(
            Box::new(InMemoryPaymentRepository::with_payments(payments)),
            FeePolicy::standard(),
        )
    }

    fn sample() -> Vec<Payment> {
        vec![
            Payment::new("1", "Coffee", 5500, 1_000, PaymentType::Card, "Food"),
            Payment::new("2", "Taxi", 3200, 3_000, PaymentType::Cash, "Transport"),
            Payment::new("3", "Voucher", 50000, 2_000, PaymentType::Gift, "Gift"),
            Payment::new("4", "Rent", 700_000, 4_000, PaymentType::Bank, "Home"),
        ]
    }

    #[tokio::test]
    async fn test_get_payments_defaults() {
        let service = service(sample());
        let payments = service.get_payments(None, SortOrder::default()).await.unwrap();

        let ids: Vec<_> = payments.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["4", "2", "3", "1"]);
        let fees: Vec<_> = payments.iter().map(|p| p.fee).collect();
        assert_eq!(fees, vec![500, 0, 2500, 165]);
    }

    #[tokio::test]
    async fn test_get_payments_filtered() {
        let service = service(sample());
        let payments = service
            .get_payments(Some(PaymentType::Gift), SortOrder::AmountAsc)
            .await
            .unwrap();

        assert_eq!(payments.len(), 1);
        assert_eq!(payments[0].id, "3");
        assert_eq!(payments[0].fee, 2500);
    }

    #[tokio::test]
    async fn test_get_payment_applies_fee() {
        let service = service(sample());
        let payment = service.get_payment("1").await.unwrap().unwrap();
        assert_eq!(payment.fee, 165);
        assert!(service.get_payment("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_transport_failure_propagates() {
        let service = PaymentQueryService::new(Box::new(FailingRepository), FeePolicy::standard());

        assert!(matches!(
            service.get_payments(None, SortOrder::DateDesc).await,
            Err(PaymentError::TransportError(_))
        ));
        assert!(matches!(
            service.get_payments(Some(PaymentType::Card), SortOrder::DateDesc).await,
            Err(PaymentError::TransportError(_))
        ));
        assert!(matches!(
            service.get_payment("1").await,
            Err(PaymentError::TransportError(_))
        ));
    }
}
