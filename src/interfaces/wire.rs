use crate::domain::payment::{Payment, UnknownTypePolicy};
use crate::error::{PaymentError, Result};
use serde::{Deserialize, Serialize};

/// A payment as delivered by an external source.
///
/// The type is kept as a raw string and the amount as a signed integer; both
/// are checked when the record is mapped into a [`Payment`]. No fee is ever
/// transmitted.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct PaymentRecord {
    pub id: String,
    pub title: String,
    pub amount: i64,
    pub timestamp: i64,
    pub r#type: String,
    pub category: String,
}

impl PaymentRecord {
    pub fn into_payment(self, policy: &UnknownTypePolicy) -> Result<Payment> {
        let amount = u64::try_from(self.amount).map_err(|_| {
            PaymentError::DataIntegrityError(format!(
                "Payment {} has a negative amount: {}",
                self.id, self.amount
            ))
        })?;
        let r#type = policy.resolve(&self.r#type)?;

        Ok(Payment::new(
            self.id,
            self.title,
            amount,
            self.timestamp,
            r#type,
            self.category,
        ))
    }
}

impl TryFrom<&Payment> for PaymentRecord {
    type Error = PaymentError;

    /// Fails for amounts the signed wire field cannot carry.
    fn try_from(payment: &Payment) -> Result<Self> {
        let amount = i64::try_from(payment.amount).map_err(|_| {
            PaymentError::DataIntegrityError(format!(
                "Payment {} amount {} does not fit the wire format",
                payment.id, payment.amount
            ))
        })?;

        Ok(Self {
            id: payment.id.clone(),
            title: payment.title.clone(),
            amount,
            timestamp: payment.timestamp,
            r#type: payment.r#type.as_str().to_string(),
            category: payment.category.clone(),
        })
    }
}

/// Maps a batch of records, failing on the first invalid one.
pub fn into_payments(
    records: impl IntoIterator<Item = PaymentRecord>,
    policy: &UnknownTypePolicy,
) -> Result<Vec<Payment>> {
    records
        .into_iter()
        .map(|record| record.into_payment(policy))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::payment::PaymentType;

    fn record(r#type: &str, amount: i64) -> PaymentRecord {
        PaymentRecord {
            id: "p1".to_string(),
            title: "Points purchase".to_string(),
            amount,
            timestamp: 1_704_103_200_000,
            r#type: r#type.to_string(),
            category: "Shopping".to_string(),
        }
    }

    #[test]
    fn test_unknown_type_maps_to_card() {
        let payment = record("POINT", 1000)
            .into_payment(&UnknownTypePolicy::default())
            .unwrap();
        assert_eq!(payment.r#type, PaymentType::Card);
        assert_eq!(payment.fee, 0);
    }

    #[test]
    fn test_unknown_type_rejected() {
        let result = record("POINT", 1000).into_payment(&UnknownTypePolicy::Reject);
        assert!(matches!(result, Err(PaymentError::UnknownPaymentType(_))));
    }

    #[test]
    fn test_negative_amount_rejected() {
        let result = record("CASH", -1).into_payment(&UnknownTypePolicy::default());
        assert!(matches!(result, Err(PaymentError::DataIntegrityError(_))));
    }

    #[test]
    fn test_json_record_shape() {
        let json = r#"{"id":"p9","title":"Lunch","amount":8900,"timestamp":1704103200000,"type":"gift","category":"Food"}"#;
        let record: PaymentRecord = serde_json::from_str(json).unwrap();
        let payment = record.into_payment(&UnknownTypePolicy::Reject).unwrap();

        assert_eq!(payment.r#type, PaymentType::Gift);
        assert_eq!(payment.amount, 8900);
    }

    #[test]
    fn test_record_from_payment() {
        let payment = Payment::new("p1", "Rent", 650_000, 7, PaymentType::Bank, "Housing").with_fee(500);
        let record = PaymentRecord::try_from(&payment).unwrap();
        assert_eq!(record.r#type, "BANK");
        assert_eq!(
            record.into_payment(&UnknownTypePolicy::Reject).unwrap(),
            payment.with_fee(0)
        );
    }

    #[test]
    fn test_record_rejects_amount_beyond_wire_range() {
        let payment = Payment::new("p1", "Huge", u64::MAX, 0, PaymentType::Card, "Invest");
        assert!(matches!(
            PaymentRecord::try_from(&payment),
            Err(PaymentError::DataIntegrityError(_))
        ));
    }

    #[test]
    fn test_batch_fails_on_first_invalid() {
        let records = vec![record("CARD", 10), record("BANK", -5), record("CASH", 3)];
        assert!(into_payments(records, &UnknownTypePolicy::default()).is_err());
    }
}
