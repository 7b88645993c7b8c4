//! Shared types for the KundaPay transfer quote service.
//!
//! Enable the `client` feature for a typed HTTP client.

pub mod format;
pub mod objects;

#[cfg(feature = "client")]
pub mod client;
