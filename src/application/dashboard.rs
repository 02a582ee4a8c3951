use super::query::PaymentQueryService;
use crate::domain::payment::{Payment, PaymentType};
use crate::domain::pipeline::SortOrder;
use crate::domain::statistics::{PaymentStatistics, aggregate};
use tokio::sync::RwLock;

/// A query result paired with its statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentOverview {
    pub payments: Vec<Payment>,
    pub statistics: PaymentStatistics,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DashboardState {
    Ready(PaymentOverview),
    /// The latest query failed; the last successful overview is shown instead.
    Stale {
        overview: PaymentOverview,
        error: String,
    },
    /// The latest query failed and nothing was loaded before.
    Failed(String),
}

/// Presentation-facing composition of the query service and the statistics
/// aggregator.
///
/// Remembers the last successful overview and serves it when a later query
/// fails. This fallback belongs here, in the caller, not in the pipeline.
pub struct PaymentDashboard {
    service: PaymentQueryService,
    last_overview: RwLock<Option<PaymentOverview>>,
}

impl PaymentDashboard {
    pub fn new(service: PaymentQueryService) -> Self {
        Self {
            service,
            last_overview: RwLock::new(None),
        }
    }

    pub async fn load(&self, filter_type: Option<PaymentType>, order: SortOrder) -> DashboardState {
        match self.service.get_payments(filter_type, order).await {
            Ok(payments) => {
                let overview = PaymentOverview {
                    statistics: aggregate(&payments),
                    payments,
                };
                *self.last_overview.write().await = Some(overview.clone());
                DashboardState::Ready(overview)
            }
            Err(e) => {
                let error = e.to_string();
                match self.last_overview.read().await.clone() {
                    Some(overview) => {
                        tracing::warn!(%error, "query failed, serving last snapshot");
                        DashboardState::Stale { overview, error }
                    }
                    None => {
                        tracing::error!(%error, "query failed");
                        DashboardState::Failed(error)
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::fee::FeePolicy;
    use crate::domain::ports::PaymentRepository;
    use crate::error::{PaymentError, Result};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    /// Serves a fixed list until switched offline.
    struct FlakyRepository {
        online: Arc<AtomicBool>,
        payments: Vec<Payment>,
    }

    impl FlakyRepository {
        fn check(&self) -> Result<()> {
            if self.online.load(Ordering::SeqCst) {
                Ok(())
            } else {
                Err(PaymentError::TransportError("offline".to_string()))
            }
        }
    }

    #[async_trait]
    impl PaymentRepository for FlakyRepository {
        async fn fetch_all(&self) -> Result<Vec<Payment>> {
            self.check()?;
            Ok(self.payments.clone())
        }

        async fn fetch_by_type(&self, payment_type: PaymentType) -> Result<Vec<Payment>> {
            self.check()?;
            Ok(self
                .payments
                .iter()
                .filter(|p| p.r#type == payment_type)
                .cloned()
                .collect())
        }

        async fn fetch_by_id(&self, id: &str) -> Result<Option<Payment>> {
            self.check()?;
            Ok(self.payments.iter().find(|p| p.id == id).cloned())
        }
    }

    fn dashboard(online: Arc<AtomicBool>) -> PaymentDashboard {
        let repository = FlakyRepository {
            online,
            payments: vec![
                Payment::new("1", "Coffee", 5500, 1, PaymentType::Card, "Food"),
                Payment::new("2", "Taxi", 3200, 2, PaymentType::Cash, "Transport"),
                Payment::new("3", "Voucher", 50000, 3, PaymentType::Gift, "Gift"),
            ],
        };
        PaymentDashboard::new(PaymentQueryService::new(
            Box::new(repository),
            FeePolicy::standard(),
        ))
    }

    #[tokio::test]
    async fn test_ready_state_carries_statistics() {
        let dashboard = dashboard(Arc::new(AtomicBool::new(true)));

        let DashboardState::Ready(overview) = dashboard.load(None, SortOrder::DateDesc).await else {
            panic!("expected ready state");
        };
        assert_eq!(overview.payments.len(), 3);
        assert_eq!(overview.statistics.total_amount, 58700);
        assert_eq!(overview.statistics.total_fee, 2665);
        assert_eq!(overview.statistics.average_amount, 19566);
    }

    #[tokio::test]
    async fn test_empty_filter_gives_zero_statistics() {
        let dashboard = dashboard(Arc::new(AtomicBool::new(true)));

        let state = dashboard.load(Some(PaymentType::Bank), SortOrder::DateDesc).await;
        assert_eq!(
            state,
            DashboardState::Ready(PaymentOverview {
                payments: vec![],
                statistics: PaymentStatistics::default(),
            })
        );
    }

    #[tokio::test]
    async fn test_failure_without_snapshot() {
        let dashboard = dashboard(Arc::new(AtomicBool::new(false)));

        let state = dashboard.load(None, SortOrder::DateDesc).await;
        assert!(matches!(state, DashboardState::Failed(e) if e.contains("offline")));
    }

    #[tokio::test]
    async fn test_failure_serves_last_snapshot() {
        let online = Arc::new(AtomicBool::new(true));
        let dashboard = dashboard(online.clone());

        let DashboardState::Ready(first) = dashboard.load(None, SortOrder::AmountAsc).await else {
            panic!("expected ready state");
        };

        online.store(false, Ordering::SeqCst);
        match dashboard.load(None, SortOrder::AmountAsc).await {
            DashboardState::Stale { overview, error } => {
                assert_eq!(overview, first);
                assert!(error.contains("offline"));
            }
            other => panic!("expected stale state, got {other:?}"),
        }
    }
}
