use super::payment::{Payment, PaymentType};
use crate::error::Result;
use async_trait::async_trait;

/// The Record Store: a source of payment snapshots.
///
/// Every call may suspend on I/O and may fail. Callers must not rely on the
/// order of the returned payments.
#[async_trait]
pub trait PaymentRepository: Send + Sync {
    async fn fetch_all(&self) -> Result<Vec<Payment>>;
    async fn fetch_by_type(&self, payment_type: PaymentType) -> Result<Vec<Payment>>;
    async fn fetch_by_id(&self, id: &str) -> Result<Option<Payment>>;
}

pub type PaymentRepositoryBox = Box<dyn PaymentRepository>;
pub type PaymentRepositoryFactory = Box<dyn Fn() -> PaymentRepositoryBox + Send + Sync>;

#[async_trait]
impl<R: PaymentRepository + ?Sized> PaymentRepository for Box<R> {
    async fn fetch_all(&self) -> Result<Vec<Payment>> {
        (**self).fetch_all().await
    }

    async fn fetch_by_type(&self, payment_type: PaymentType) -> Result<Vec<Payment>> {
        (**self).fetch_by_type(payment_type).await
    }

    async fn fetch_by_id(&self, id: &str) -> Result<Option<Payment>> {
        (**self).fetch_by_id(id).await
    }
}
