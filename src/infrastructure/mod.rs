//! Record store adapters implementing `PaymentRepository`.

pub mod file;
pub mod in_memory;
pub mod latency;
#[cfg(feature = "storage-rocksdb")]
pub mod rocksdb;
