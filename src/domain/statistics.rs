use super::payment::Payment;
use serde::{Deserialize, Serialize};

/// Summary totals over a collection of fee-applied payments.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Default)]
pub struct PaymentStatistics {
    /// Totals are widened so that any number of `u64` amounts sums exactly.
    pub total_amount: u128,
    pub total_fee: u128,
    /// Truncated mean, 0 for an empty collection.
    pub average_amount: u64,
    pub count: usize,
}

pub fn aggregate(payments: &[Payment]) -> PaymentStatistics {
    let count = payments.len();
    let total_amount = payments.iter().map(|p| u128::from(p.amount)).sum::<u128>();
    let total_fee = payments.iter().map(|p| u128::from(p.fee)).sum::<u128>();
    let average_amount = if count > 0 {
        // the mean never exceeds the largest amount
        u64::try_from(total_amount / count as u128).unwrap_or(u64::MAX)
    } else {
        0
    };

    PaymentStatistics {
        total_amount,
        total_fee,
        average_amount,
        count,
    }
}
