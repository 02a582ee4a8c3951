use crate::error::{PaymentError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The closed set of payment methods.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Clone, Copy, PartialOrd, Ord)]
#[serde(rename_all = "UPPERCASE")]
pub enum PaymentType {
    Card,
    Bank,
    Cash,
    Gift,
}

impl PaymentType {
    pub const ALL: [PaymentType; 4] = [
        PaymentType::Card,
        PaymentType::Bank,
        PaymentType::Cash,
        PaymentType::Gift,
    ];

    /// Human-readable label shown next to a payment.
    pub fn label(&self) -> &'static str {
        match self {
            PaymentType::Card => "Card",
            PaymentType::Bank => "Bank Transfer",
            PaymentType::Cash => "Cash",
            PaymentType::Gift => "Gift Card",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentType::Card => "CARD",
            PaymentType::Bank => "BANK",
            PaymentType::Cash => "CASH",
            PaymentType::Gift => "GIFT",
        }
    }
}

impl FromStr for PaymentType {
    type Err = PaymentError;

    /// Strict, case-insensitive parsing. Unknown strings are an error here;
    /// lenient mapping goes through [`UnknownTypePolicy`].
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_uppercase().as_str() {
            "CARD" => Ok(PaymentType::Card),
            "BANK" => Ok(PaymentType::Bank),
            "CASH" => Ok(PaymentType::Cash),
            "GIFT" => Ok(PaymentType::Gift),
            _ => Err(PaymentError::UnknownPaymentType(s.to_string())),
        }
    }
}

impl fmt::Display for PaymentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a type string outside the closed set is resolved at the wire boundary.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(tag = "policy", rename_all = "lowercase")]
pub enum UnknownTypePolicy {
    /// Silently map to the given member.
    Fallback {
        #[serde(default = "default_fallback")]
        fallback: PaymentType,
    },
    /// Fail the record with [`PaymentError::UnknownPaymentType`].
    Reject,
}

fn default_fallback() -> PaymentType {
    PaymentType::Card
}

impl Default for UnknownTypePolicy {
    fn default() -> Self {
        UnknownTypePolicy::Fallback {
            fallback: default_fallback(),
        }
    }
}

impl UnknownTypePolicy {
    pub fn resolve(&self, raw: &str) -> Result<PaymentType> {
        match (raw.parse::<PaymentType>(), self) {
            (Ok(payment_type), _) => Ok(payment_type),
            (Err(_), UnknownTypePolicy::Fallback { fallback }) => {
                tracing::warn!(raw, fallback = %fallback, "unrecognized payment type, using fallback");
                Ok(*fallback)
            }
            (Err(e), UnknownTypePolicy::Reject) => Err(e),
        }
    }
}

/// A single monetary transaction.
///
/// Values are never mutated in place: the fee is attached by deriving a new
/// value through [`Payment::with_fee`].
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct Payment {
    pub id: String,
    pub title: String,
    pub amount: u64,
    /// Epoch milliseconds.
    pub timestamp: i64,
    pub r#type: PaymentType,
    pub category: String,
    #[serde(default)]
    pub fee: u64,
}

impl Payment {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        amount: u64,
        timestamp: i64,
        r#type: PaymentType,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            amount,
            timestamp,
            r#type,
            category: category.into(),
            fee: 0,
        }
    }

    /// Returns a copy carrying `fee`, every other field unchanged.
    pub fn with_fee(&self, fee: u64) -> Self {
        Self {
            fee,
            ..self.clone()
        }
    }
}
