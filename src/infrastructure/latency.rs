use crate::domain::payment::{Payment, PaymentType};
use crate::domain::ports::PaymentRepository;
use crate::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Wraps a repository and delays every call, standing in for network latency.
///
/// The delay is a `tokio` sleep, so a cancelled caller abandons the call
/// before the inner repository is ever reached.
pub struct DelayedRepository<R> {
    inner: R,
    delay: Duration,
}

impl<R: PaymentRepository> DelayedRepository<R> {
    pub fn new(inner: R, delay: Duration) -> Self {
        Self { inner, delay }
    }

    async fn wait(&self) {
        tracing::debug!(delay = ?self.delay, "simulating latency");
        tokio::time::sleep(self.delay).await;
    }
}

#[async_trait]
impl<R: PaymentRepository> PaymentRepository for DelayedRepository<R> {
    async fn fetch_all(&self) -> Result<Vec<Payment>> {
        self.wait().await;
        self.inner.fetch_all().await
    }

    async fn fetch_by_type(&self, payment_type: PaymentType) -> Result<Vec<Payment>> {
        self.wait().await;
        self.inner.fetch_by_type(payment_type).await
    }

    async fn fetch_by_id(&self, id: &str) -> Result<Option<Payment>> {
        self.wait().await;
        self.inner.fetch_by_id(id).await
    }
}
