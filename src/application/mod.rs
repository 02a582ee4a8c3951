//! Application layer: orchestration on top of the domain.
//!
//! `PaymentQueryService` sequences the fetch, sort and fee stages for a single
//! query. `PaymentDashboard` pairs each result with its statistics and keeps
//! the last good overview for when the record store is unavailable.

pub mod dashboard;
pub mod query;
