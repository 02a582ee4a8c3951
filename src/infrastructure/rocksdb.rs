use crate::domain::payment::{Payment, PaymentType};
use crate::domain::pipeline::filter_by_type;
use crate::domain::ports::PaymentRepository;
use crate::error::{PaymentError, Result};
use async_trait::async_trait;
use rocksdb::{ColumnFamily, ColumnFamilyDescriptor, DB, IteratorMode, Options};
use std::path::Path;
use std::sync::Arc;

/// Column Family for storing payments.
pub const CF_PAYMENTS: &str = "payments";

/// A persistent payment store using RocksDB.
///
/// Payments are stored as JSON keyed by their id. Fees are never persisted;
/// they are computed again by every query.
///
/// This struct is thread-safe (`Clone` shares the underlying `Arc<DB>`).
#[derive(Clone)]
pub struct RocksDBPaymentRepository {
    db: Arc<DB>,
}

impl RocksDBPaymentRepository {
    /// Opens or creates a RocksDB instance at the specified path.
    ///
    /// # Arguments
    ///
    /// * `path` - The filesystem path where the database will be stored.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_payments = ColumnFamilyDescriptor::new(CF_PAYMENTS, Options::default());
        let db = DB::open_cf_descriptors(&opts, path, vec![cf_payments])?;

        Ok(Self { db: Arc::new(db) })
    }

    fn payments_cf(&self) -> Result<&ColumnFamily> {
        self.db.cf_handle(CF_PAYMENTS).ok_or_else(|| {
            PaymentError::IoError(std::io::Error::other("Payments column family not found"))
        })
    }

    /// Inserts or replaces a payment.
    pub fn put(&self, payment: &Payment) -> Result<()> {
        let cf = self.payments_cf()?;
        let value = serde_json::to_vec(&payment.with_fee(0))?;
        self.db.put_cf(cf, payment.id.as_bytes(), value)?;
        Ok(())
    }

    pub fn import<'a>(&self, payments: impl IntoIterator<Item = &'a Payment>) -> Result<usize> {
        let mut count = 0;
        for payment in payments {
            self.put(payment)?;
            count += 1;
        }
        tracing::info!(count, "payments imported");
        Ok(count)
    }

    fn scan(&self) -> Result<Vec<Payment>> {
        let cf = self.payments_cf()?;
        let mut payments = Vec::new();
        for item in self.db.iterator_cf(cf, IteratorMode::Start) {
            let (_key, value) = item?;
            payments.push(serde_json::from_slice(&value)?);
        }
        Ok(payments)
    }
}

#[async_trait]
impl PaymentRepository for RocksDBPaymentRepository {
    async fn fetch_all(&self) -> Result<Vec<Payment>> {
        self.scan()
    }

    async fn fetch_by_type(&self, payment_type: PaymentType) -> Result<Vec<Payment>> {
        Ok(filter_by_type(&self.scan()?, Some(payment_type)))
    }

    async fn fetch_by_id(&self, id: &str) -> Result<Option<Payment>> {
        let cf = self.payments_cf()?;
        match self.db.get_cf(cf, id.as_bytes())? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }
}
