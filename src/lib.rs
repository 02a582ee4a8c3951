//! Payment query pipeline.
//!
//! Payments are fetched from a record store, sorted, priced with a per-type
//! fee policy and summarized into statistics.
//!
//! - [`domain`] - the payment model, fee policy, pipeline stages and the repository port
//! - [`application`] - the query orchestrator and the dashboard built on top of it
//! - [`infrastructure`] - in-memory, file, simulated-latency and RocksDB record stores
//! - [`interfaces`] - wire records, CSV I/O and display formatting
//! - [`config`] - TOML configuration

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod interfaces;
