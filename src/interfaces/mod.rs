//! Boundary adapters: the wire record shape, CSV reading and writing, and
//! presentation formatting.

pub mod csv;
pub mod format;
pub mod wire;
