use crate::error::{PaymentError, Result};
use crate::interfaces::wire::PaymentRecord;
use std::io::Read;

/// Reads payment records from a CSV source.
///
/// Expects the header `id,title,amount,timestamp,type,category`. Whitespace
/// around fields is trimmed.
pub struct PaymentReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> PaymentReader<R> {
    /// Creates a new `PaymentReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily reads and deserializes records.
    pub fn records(self) -> impl Iterator<Item = Result<PaymentRecord>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(PaymentError::from))
    }
}
