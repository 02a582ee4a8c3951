use crate::domain::payment::{Payment, PaymentType};
use crate::domain::pipeline::filter_by_type;
use crate::domain::ports::PaymentRepository;
use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory payment store.
///
/// Uses `Arc<RwLock<HashMap<String, Payment>>>` so clones share the same data.
/// Snapshots are returned in no particular order, like a remote source would.
#[derive(Default, Clone)]
pub struct InMemoryPaymentRepository {
    payments: Arc<RwLock<HashMap<String, Payment>>>,
}

impl InMemoryPaymentRepository {
    /// Creates a new, empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store seeded with `payments`; a later duplicate id wins.
    pub fn with_payments(payments: impl IntoIterator<Item = Payment>) -> Self {
        let payments = payments.into_iter().map(|p| (p.id.clone(), p)).collect();
        Self {
            payments: Arc::new(RwLock::new(payments)),
        }
    }

    /// A small fixed dataset covering every payment type.
    pub fn fixture() -> Self {
        Self::with_payments([
            Payment::new("pay-001", "Morning coffee", 5500, 1_704_103_200_000, PaymentType::Card, "Food"),
            Payment::new("pay-002", "Taxi home", 3200, 1_704_189_600_000, PaymentType::Cash, "Transport"),
            Payment::new("pay-003", "Birthday voucher", 50000, 1_704_276_000_000, PaymentType::Gift, "Gift"),
            Payment::new("pay-004", "Monthly rent", 650_000, 1_704_362_400_000, PaymentType::Bank, "Housing"),
            Payment::new("pay-005", "Groceries", 42_300, 1_704_448_800_000, PaymentType::Card, "Food"),
            Payment::new("pay-006", "Bookstore", 18_900, 1_704_535_200_000, PaymentType::Gift, "Shopping"),
        ])
    }

    pub async fn insert(&self, payment: Payment) {
        let mut payments = self.payments.write().await;
        payments.insert(payment.id.clone(), payment);
    }
}

#[async_trait]
impl PaymentRepository for InMemoryPaymentRepository {
    async fn fetch_all(&self) -> Result<Vec<Payment>> {
        let payments = self.payments.read().await;
        Ok(payments.values().cloned().collect())
    }

    async fn fetch_by_type(&self, payment_type: PaymentType) -> Result<Vec<Payment>> {
        let snapshot = self.fetch_all().await?;
        Ok(filter_by_type(&snapshot, Some(payment_type)))
    }

    async fn fetch_by_id(&self, id: &str) -> Result<Option<Payment>> {
        let payments = self.payments.read().await;
        Ok(payments.get(id).cloned())
    }
}
