use super::payment::{Payment, PaymentType};
use crate::error::{PaymentError, Result};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// A per-type fee computation.
///
/// Implementations must be pure and return the fee for a single payment amount.
pub trait FeeStrategy: Send + Sync {
    fn fee_for(&self, amount: u64) -> u64;
}

impl<F> FeeStrategy for F
where
    F: Fn(u64) -> u64 + Send + Sync,
{
    fn fee_for(&self, amount: u64) -> u64 {
        self(amount)
    }
}

/// The built-in fee rules, also the shape accepted from configuration.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone, Copy)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum FeeRule {
    /// `floor(amount * rate)`.
    Percentage { rate: Decimal },
    Fixed { amount: u64 },
    Free,
}

impl FeeRule {
    pub fn percentage(rate: Decimal) -> Result<Self> {
        FeeRule::Percentage { rate }.validated()
    }

    /// Rejects percentage rates outside `0..=1`, so a fee never exceeds the
    /// amount it is charged on.
    pub fn validated(self) -> Result<Self> {
        match self {
            FeeRule::Percentage { rate } if rate < Decimal::ZERO || rate > Decimal::ONE => {
                Err(PaymentError::ValidationError(format!(
                    "Fee rate must be between 0 and 1: {rate}"
                )))
            }
            rule => Ok(rule),
        }
    }
}

impl FeeStrategy for FeeRule {
    fn fee_for(&self, amount: u64) -> u64 {
        match self {
            // Unvalidated rates saturate: below zero charges nothing, too
            // large charges u64::MAX.
            FeeRule::Percentage { rate } => Decimal::from(amount)
                .checked_mul((*rate).max(Decimal::ZERO))
                .and_then(|fee| fee.floor().to_u64())
                .unwrap_or(u64::MAX),
            FeeRule::Fixed { amount } => *amount,
            FeeRule::Free => 0,
        }
    }
}

/// Maps every [`PaymentType`] to the strategy that prices it.
///
/// One slot per variant keeps the table exhaustive: a new payment type does
/// not compile until it is given a strategy here.
#[derive(Clone)]
pub struct FeePolicy {
    card: Arc<dyn FeeStrategy>,
    bank: Arc<dyn FeeStrategy>,
    cash: Arc<dyn FeeStrategy>,
    gift: Arc<dyn FeeStrategy>,
}

impl FeePolicy {
    /// CARD 3%, BANK fixed 500, CASH free, GIFT 5%.
    pub fn standard() -> Self {
        Self {
            card: Arc::new(FeeRule::Percentage { rate: dec!(0.03) }),
            bank: Arc::new(FeeRule::Fixed { amount: 500 }),
            cash: Arc::new(FeeRule::Free),
            gift: Arc::new(FeeRule::Percentage { rate: dec!(0.05) }),
        }
    }

    /// Replaces the strategy registered for `payment_type`.
    pub fn with_strategy(
        mut self,
        payment_type: PaymentType,
        strategy: impl FeeStrategy + 'static,
    ) -> Self {
        let strategy: Arc<dyn FeeStrategy> = Arc::new(strategy);
        match payment_type {
            PaymentType::Card => self.card = strategy,
            PaymentType::Bank => self.bank = strategy,
            PaymentType::Cash => self.cash = strategy,
            PaymentType::Gift => self.gift = strategy,
        }
        self
    }

    pub fn strategy(&self, payment_type: PaymentType) -> &dyn FeeStrategy {
        match payment_type {
            PaymentType::Card => self.card.as_ref(),
            PaymentType::Bank => self.bank.as_ref(),
            PaymentType::Cash => self.cash.as_ref(),
            PaymentType::Gift => self.gift.as_ref(),
        }
    }

    pub fn compute_fee(&self, payment: &Payment) -> u64 {
        self.strategy(payment.r#type).fee_for(payment.amount)
    }
}

impl Default for FeePolicy {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Debug for FeePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FeePolicy").finish_non_exhaustive()
    }
}
