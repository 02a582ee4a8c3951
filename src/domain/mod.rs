//! Domain layer: the payment model, the fee policy, the pure pipeline stages
//! and the port through which payments are fetched.

pub mod fee;
pub mod payment;
pub mod pipeline;
pub mod ports;
pub mod statistics;
