use paystats::domain::payment::{Payment, PaymentType};
use paystats::error::Result;
use paystats::interfaces::wire::PaymentRecord;
use rand::Rng;
use std::fs::File;
use std::path::Path;

/// Random payments with deliberately few distinct amounts and timestamps so
/// that sort keys collide often.
pub fn random_payments(count: usize) -> Vec<Payment> {
    let mut rng = rand::thread_rng();
    (0..count)
        .map(|i| {
            let r#type = PaymentType::ALL[rng.gen_range(0..PaymentType::ALL.len())];
            Payment::new(
                format!("pay-{i:04}"),
                format!("Payment {i}"),
                rng.gen_range(0..5u64) * 1000,
                rng.gen_range(0..5i64) * 86_400_000,
                r#type,
                "Generated",
            )
        })
        .collect()
}

pub fn write_csv(path: &Path, payments: &[Payment]) -> Result<()> {
    let file = File::create(path)?;
    let mut wtr = csv::WriterBuilder::new().from_writer(file);

    for payment in payments {
        wtr.serialize(PaymentRecord::try_from(payment)?)?;
    }

    wtr.flush()?;
    Ok(())
}
