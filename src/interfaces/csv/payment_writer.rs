use crate::domain::payment::Payment;
use crate::domain::statistics::PaymentStatistics;
use crate::error::Result;
use std::io::Write;

/// Writes query results as CSV.
pub struct PaymentWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> PaymentWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    /// One row per payment: `id,title,amount,timestamp,type,category,fee`.
    pub fn write_payments(&mut self, payments: &[Payment]) -> Result<()> {
        for payment in payments {
            self.writer.serialize(payment)?;
        }
        self.writer.flush()?;
        Ok(())
    }

    /// A single row: `total_amount,total_fee,average_amount,count`.
    pub fn write_statistics(&mut self, statistics: &PaymentStatistics) -> Result<()> {
        self.writer.serialize(statistics)?;
        self.writer.flush()?;
        Ok(())
    }
}
