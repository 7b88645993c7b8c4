//! Long-running processors built on the quote calculator.
//!
//! - `QuoteSession`: numbers calculations and publishes only the latest result
//! - `QuoteDebouncer`: receives `QuoteRequest`s, forwards the last of each burst

pub mod quote_session;

pub use quote_session::{DEFAULT_DEBOUNCE, QuoteDebouncer, QuoteSession, QuoteState};
