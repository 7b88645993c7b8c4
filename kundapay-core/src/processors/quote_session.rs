//! Interactive quoting.
//!
//! A form recalculates on every keystroke. [`QuoteSession`] numbers each
//! calculation and only publishes the result of the most recent one, so a
//! slow early request can never overwrite a fresh quote. [`QuoteDebouncer`]
//! sits in front of a session and only forwards the last request of a burst.

use crate::quote::QuoteCalculator;
use kundapay_sdk::objects::{QuoteRequest, TransferQuote};
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::time::Instant;
use tracing::{debug, info};

/// Debounce window applied when none is configured.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// Latest published outcome of a session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum QuoteState {
    #[default]
    Idle,
    Ready {
        request_id: u64,
        quote: TransferQuote,
    },
    Failed {
        request_id: u64,
        kind: &'static str,
        message: String,
    },
}

impl QuoteState {
    pub fn request_id(&self) -> u64 {
        match self {
            QuoteState::Idle => 0,
            QuoteState::Ready { request_id, .. } | QuoteState::Failed { request_id, .. } => {
                *request_id
            }
        }
    }
}

/// Tags calculations with increasing ids and discards superseded results.
#[derive(Clone)]
pub struct QuoteSession {
    calculator: QuoteCalculator,
    latest: Arc<AtomicU64>,
    state_tx: Arc<watch::Sender<QuoteState>>,
}

impl QuoteSession {
    pub fn new(calculator: QuoteCalculator) -> Self {
        let (state_tx, _) = watch::channel(QuoteState::Idle);
        Self {
            calculator,
            latest: Arc::new(AtomicU64::new(0)),
            state_tx: Arc::new(state_tx),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<QuoteState> {
        self.state_tx.subscribe()
    }

    pub fn state(&self) -> QuoteState {
        self.state_tx.borrow().clone()
    }

    /// Start a calculation.
    ///
    /// The request id is taken when this is called, not when the returned
    /// future is first polled. The future resolves to `true` if its result
    /// was published and `false` if a newer request superseded it.
    pub fn submit(&self, request: QuoteRequest) -> impl Future<Output = bool> + Send + 'static {
        let request_id = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        let session = self.clone();
        async move { session.complete(request_id, request).await }
    }

    async fn complete(self, request_id: u64, request: QuoteRequest) -> bool {
        let result = self.calculator.calculate_transfer_details(&request).await;

        let next = match result {
            Ok(quote) => QuoteState::Ready { request_id, quote },
            Err(e) => QuoteState::Failed {
                request_id,
                kind: e.kind(),
                message: e.to_string(),
            },
        };
        // Staleness is decided under the watch lock, in the same step as the publish.
        let published = self.state_tx.send_if_modified(|state| {
            if self.latest.load(Ordering::SeqCst) != request_id || state.request_id() >= request_id {
                return false;
            }
            *state = next;
            true
        });
        if !published {
            debug!(request_id, "discarding stale quote result");
        }
        published
    }
}

/// Forwards only the last request of each burst to a [`QuoteSession`].
pub struct QuoteDebouncer {
    session: QuoteSession,
    window: Duration,
    request_rx: mpsc::Receiver<QuoteRequest>,
    shutdown_rx: watch::Receiver<bool>,
}

impl QuoteDebouncer {
    pub fn new(
        session: QuoteSession,
        window: Duration,
        request_rx: mpsc::Receiver<QuoteRequest>,
        shutdown_rx: watch::Receiver<bool>,
    ) -> Self {
        Self {
            session,
            window,
            request_rx,
            shutdown_rx,
        }
    }

    /// Run until shutdown or until every request sender is dropped.
    ///
    /// A request still waiting for its window when the channel closes is
    /// calculated before returning.
    pub async fn run(mut self) {
        info!(window_ms = self.window.as_millis() as u64, "QuoteDebouncer started");

        let mut pending: Option<QuoteRequest> = None;
        let deadline = tokio::time::sleep(self.window);
        tokio::pin!(deadline);

        loop {
            tokio::select! {
                biased;

                changed = self.shutdown_rx.changed() => {
                    if changed.is_err() || *self.shutdown_rx.borrow() {
                        info!("QuoteDebouncer received shutdown signal");
                        break;
                    }
                }

                received = self.request_rx.recv() => match received {
                    Some(request) => {
                        pending = Some(request);
                        deadline.as_mut().reset(Instant::now() + self.window);
                    }
                    None => {
                        if let Some(request) = pending.take() {
                            self.session.submit(request).await;
                        }
                        info!("QuoteDebouncer input closed");
                        break;
                    }
                },

                _ = &mut deadline, if pending.is_some() => {
                    if let Some(request) = pending.take() {
                        tokio::spawn(self.session.submit(request));
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quote::LimitPolicy;
    use crate::repository::{FeeKey, FixtureQuoteRepository, PromoCodeValidation, QuoteRepository, StoreError};
    use kundapay_sdk::objects::{Currency, PaymentMethod, ReceivingMethod};
    use rust_decimal::Decimal;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Fixtures whose fee lookups wait for queued delays.
    struct DelayedRepository {
        inner: FixtureQuoteRepository,
        delays: Mutex<VecDeque<Duration>>,
    }

    #[async_trait::async_trait]
    impl QuoteRepository for DelayedRepository {
        async fn exchange_rates(&self, from: Currency, to: Currency) -> Result<Vec<Decimal>, StoreError> {
            self.inner.exchange_rates(from, to).await
        }

        async fn fee_rules(&self, key: FeeKey) -> Result<Vec<Decimal>, StoreError> {
            let delay = self.delays.lock().unwrap().pop_front().unwrap_or_default();
            tokio::time::sleep(delay).await;
            self.inner.fee_rules(key).await
        }

        async fn validate_promo_code(
            &self,
            code: &str,
            direction: &str,
        ) -> Result<PromoCodeValidation, StoreError> {
            self.inner.validate_promo_code(code, direction).await
        }
    }

    fn request(amount: i64) -> QuoteRequest {
        QuoteRequest {
            amount: Decimal::from(amount),
            direction: "FRANCE_TO_GABON".to_owned(),
            payment_method: PaymentMethod::BankTransfer,
            receiving_method: ReceivingMethod::AirtelMoney,
            is_receive_amount: false,
            promo_code: None,
        }
    }

    fn sent(state: &QuoteState) -> Decimal {
        match state {
            QuoteState::Ready { quote, .. } => quote.amount_sent,
            other => panic!("unexpected state {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_stale_result_is_discarded() {
        let repository = DelayedRepository {
            inner: FixtureQuoteRepository::seeded(),
            delays: Mutex::new(VecDeque::from([
                Duration::from_secs(2),
                Duration::from_millis(10),
            ])),
        };
        let calculator = QuoteCalculator::new(Arc::new(repository), LimitPolicy::unlimited());
        let session = QuoteSession::new(calculator);

        let first = session.submit(request(100));
        let second = session.submit(request(200));
        let (first, second) = tokio::join!(first, second);

        assert!(!first);
        assert!(second);
        let state = session.state();
        assert_eq!(state.request_id(), 2);
        assert_eq!(sent(&state), Decimal::from(200));
    }

    #[tokio::test]
    async fn test_superseded_result_is_never_published() {
        let calculator = QuoteCalculator::new(
            Arc::new(FixtureQuoteRepository::seeded()),
            LimitPolicy::unlimited(),
        );
        let session = QuoteSession::new(calculator);

        let first = session.submit(request(100));
        // Issued but not yet run: the first result is already stale.
        let second = session.submit(request(200));
        assert!(!first.await);
        assert!(matches!(session.state(), QuoteState::Idle));

        assert!(second.await);
        assert_eq!(sent(&session.state()), Decimal::from(200));
    }

    #[tokio::test]
    async fn test_failures_are_published() {
        let calculator = QuoteCalculator::new(
            Arc::new(FixtureQuoteRepository::seeded()),
            LimitPolicy::kundapay_defaults(),
        );
        let session = QuoteSession::new(calculator);
        let mut bad = request(100);
        bad.direction = "MARS_TO_GABON".to_owned();

        assert!(session.submit(bad).await);
        match session.state() {
            QuoteState::Failed {
                request_id, kind, ..
            } => {
                assert_eq!(request_id, 1);
                assert_eq!(kind, "invalid_direction");
            }
            other => panic!("unexpected state {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_debouncer_only_quotes_last_of_burst() {
        let repository = Arc::new(FixtureQuoteRepository::seeded());
        let calculator = QuoteCalculator::new(repository.clone(), LimitPolicy::unlimited());
        let session = QuoteSession::new(calculator);
        let mut state_rx = session.subscribe();

        let (request_tx, request_rx) = mpsc::channel(8);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let debouncer = QuoteDebouncer::new(session.clone(), DEFAULT_DEBOUNCE, request_rx, shutdown_rx);
        let handle = tokio::spawn(debouncer.run());

        for amount in [100, 150, 300] {
            request_tx.send(request(amount)).await.unwrap();
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        assert_eq!(repository.lookups(), 0);

        state_rx.changed().await.unwrap();
        assert_eq!(sent(&state_rx.borrow()), Decimal::from(300));
        // One calculation: fee + rate.
        assert_eq!(repository.lookups(), 2);

        shutdown_tx.send(true).unwrap();
        handle.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_debouncer_flushes_on_close() {
        let calculator = QuoteCalculator::new(
            Arc::new(FixtureQuoteRepository::seeded()),
            LimitPolicy::unlimited(),
        );
        let session = QuoteSession::new(calculator);

        let (request_tx, request_rx) = mpsc::channel(8);
        let (_shutdown_tx, shutdown_rx) = watch::channel(false);
        let handle = tokio::spawn(
            QuoteDebouncer::new(session.clone(), DEFAULT_DEBOUNCE, request_rx, shutdown_rx).run(),
        );

        request_tx.send(request(42)).await.unwrap();
        drop(request_tx);
        handle.await.unwrap();

        assert_eq!(sent(&session.state()), Decimal::from(42));
    }
}
