//! Application state shared across all request handlers.

use kundapay_core::quote::{LimitPolicy, QuoteCalculator};
use std::time::Duration;

/// Application state that is shared across all request handlers.
///
/// This is cloneable and cheap to pass around (everything is behind Arc).
#[derive(Clone)]
pub struct AppState {
    /// Quote calculator; its limit policy can be reloaded via SIGHUP.
    pub calculator: QuoteCalculator,
    /// Debounce window for streamed quote requests.
    pub debounce: Duration,
}

impl AppState {
    pub fn new(calculator: QuoteCalculator, debounce: Duration) -> Self {
        Self {
            calculator,
            debounce,
        }
    }

    /// Update the limit policy (used during SIGHUP reload).
    pub async fn update_limits(&self, limits: LimitPolicy) {
        self.calculator.replace_limits(limits).await;
    }
}
