use crate::domain::payment::{Payment, PaymentType, UnknownTypePolicy};
use crate::domain::pipeline::filter_by_type;
use crate::domain::ports::PaymentRepository;
use crate::error::Result;
use crate::interfaces::csv::payment_reader::PaymentReader;
use crate::interfaces::wire::{PaymentRecord, into_payments};
use async_trait::async_trait;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordFormat {
    Csv,
    Json,
}

impl RecordFormat {
    /// `.json` files are JSON arrays of records; anything else is read as CSV.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => RecordFormat::Json,
            _ => RecordFormat::Csv,
        }
    }
}

/// A record store backed by a file of wire records.
///
/// The file is re-read on every fetch, so each query sees a fresh snapshot.
/// Unreadable files and malformed records fail the whole fetch.
#[derive(Debug, Clone)]
pub struct FileRepository {
    path: PathBuf,
    format: RecordFormat,
    policy: UnknownTypePolicy,
}

impl FileRepository {
    pub fn new(path: impl Into<PathBuf>, policy: UnknownTypePolicy) -> Self {
        let path = path.into();
        let format = RecordFormat::from_path(&path);
        Self {
            path,
            format,
            policy,
        }
    }

    async fn load(&self) -> Result<Vec<Payment>> {
        let bytes = tokio::fs::read(&self.path).await?;
        let records: Vec<PaymentRecord> = match self.format {
            RecordFormat::Json => serde_json::from_slice(&bytes)?,
            RecordFormat::Csv => PaymentReader::new(bytes.as_slice())
                .records()
                .collect::<Result<_>>()?,
        };
        tracing::debug!(path = %self.path.display(), records = records.len(), "records loaded");
        into_payments(records, &self.policy)
    }
}

#[async_trait]
impl PaymentRepository for FileRepository {
    async fn fetch_all(&self) -> Result<Vec<Payment>> {
        self.load().await
    }

    async fn fetch_by_type(&self, payment_type: PaymentType) -> Result<Vec<Payment>> {
        let payments = self.load().await?;
        Ok(filter_by_type(&payments, Some(payment_type)))
    }

    async fn fetch_by_id(&self, id: &str) -> Result<Option<Payment>> {
        Ok(self.load().await?.into_iter().find(|p| p.id == id))
    }
}
