//! Pure transformations over payment snapshots.
//!
//! Every stage takes its input by reference and returns a freshly allocated
//! collection, so stages can be called concurrently without coordination.

use super::fee::FeePolicy;
use super::payment::{Payment, PaymentType};
use crate::error::PaymentError;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    #[default]
    DateDesc,
    DateAsc,
    AmountDesc,
    AmountAsc,
}

impl SortOrder {
    pub const ALL: [SortOrder; 4] = [
        SortOrder::DateDesc,
        SortOrder::DateAsc,
        SortOrder::AmountDesc,
        SortOrder::AmountAsc,
    ];
}

impl FromStr for SortOrder {
    type Err = PaymentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "date-desc" => Ok(SortOrder::DateDesc),
            "date-asc" => Ok(SortOrder::DateAsc),
            "amount-desc" => Ok(SortOrder::AmountDesc),
            "amount-asc" => Ok(SortOrder::AmountAsc),
            _ => Err(PaymentError::ValidationError(format!(
                "Unknown sort order: {s}"
            ))),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SortOrder::DateDesc => "date-desc",
            SortOrder::DateAsc => "date-asc",
            SortOrder::AmountDesc => "amount-desc",
            SortOrder::AmountAsc => "amount-asc",
        };
        f.write_str(name)
    }
}

/// Keeps the payments of `payment_type`, or everything when no type is given.
/// Relative order is preserved either way.
pub fn filter_by_type(payments: &[Payment], payment_type: Option<PaymentType>) -> Vec<Payment> {
    match payment_type {
        None => payments.to_vec(),
        Some(t) => payments.iter().filter(|p| p.r#type == t).cloned().collect(),
    }
}

/// Stable sort: payments with equal keys keep their input order.
pub fn sort_payments(payments: &[Payment], order: SortOrder) -> Vec<Payment> {
    let mut sorted = payments.to_vec();
    match order {
        SortOrder::DateDesc => sorted.sort_by_key(|p| Reverse(p.timestamp)),
        SortOrder::DateAsc => sorted.sort_by_key(|p| p.timestamp),
        SortOrder::AmountDesc => sorted.sort_by_key(|p| Reverse(p.amount)),
        SortOrder::AmountAsc => sorted.sort_by_key(|p| p.amount),
    }
    sorted
}

/// Attaches the fee computed by `policy` to every payment.
pub fn apply_fees(payments: &[Payment], policy: &FeePolicy) -> Vec<Payment> {
    payments
        .iter()
        .map(|p| p.with_fee(policy.compute_fee(p)))
        .collect()
}
