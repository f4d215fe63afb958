//! Platform-facing abstractions (Discord today).

pub mod port;
pub mod types;
