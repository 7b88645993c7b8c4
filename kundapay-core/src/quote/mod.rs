//! The transfer quote pipeline.

pub mod amount;
mod calculator;
pub mod discount;
mod error;
pub mod limits;

pub use calculator::QuoteCalculator;
pub use error::QuoteError;
pub use limits::{LimitPolicy, LimitRule, LimitScope};
