use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use kundapay_core::processors::{QuoteDebouncer, QuoteSession, QuoteState};
use kundapay_sdk::objects::{QuoteRequest, QuoteStreamMessage};
use tokio::sync::{mpsc, watch};

use crate::state::AppState;

/// `GET /quotes/ws`: live quote stream.
///
/// Upgrades the HTTP connection to a WebSocket. Each text frame from the
/// client is a [`QuoteRequest`]; after the input has been quiet for the
/// configured debounce window the latest request is quoted and pushed back
/// as a [`QuoteStreamMessage`].
pub(super) async fn quote_stream_ws(
    state: State<AppState>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    let app_state = state.0.clone();
    ws.on_upgrade(move |socket| handle_quote_ws(socket, app_state))
}

/// Map a published session state to the frame sent to the client.
fn to_frame(state: &QuoteState) -> Option<QuoteStreamMessage> {
    match state {
        QuoteState::Idle => None,
        QuoteState::Ready { request_id, quote } => Some(QuoteStreamMessage::Quote {
            request_id: *request_id,
            quote: quote.clone(),
        }),
        QuoteState::Failed {
            request_id,
            kind,
            message,
        } => Some(QuoteStreamMessage::Error {
            request_id: *request_id,
            kind: (*kind).to_owned(),
            message: message.clone(),
        }),
    }
}

/// Background task that drives a single WebSocket connection.
///
/// Each connection owns its own session and debouncer; both stop when the
/// client disconnects.
async fn handle_quote_ws(mut socket: WebSocket, state: AppState) {
    let session = QuoteSession::new(state.calculator.clone());
    let mut state_rx = session.subscribe();
    let (request_tx, request_rx) = mpsc::channel(16);
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let debouncer = tokio::spawn(
        QuoteDebouncer::new(session, state.debounce, request_rx, shutdown_rx).run(),
    );

    loop {
        tokio::select! {
            changed = state_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let frame = to_frame(&state_rx.borrow_and_update());
                if let Some(frame) = frame
                    && send_json(&mut socket, &frame).await.is_err()
                {
                    break;
                }
            }

            msg = socket.recv() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        match serde_json::from_str::<QuoteRequest>(text.as_str()) {
                            Ok(request) => {
                                if request_tx.send(request).await.is_err() {
                                    break;
                                }
                            }
                            Err(e) => {
                                let frame = QuoteStreamMessage::Malformed {
                                    reason: e.to_string(),
                                };
                                if send_json(&mut socket, &frame).await.is_err() {
                                    break;
                                }
                            }
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        tracing::debug!(error = %e, "WS: quote stream receive failed");
                        break;
                    }
                }
            }
        }
    }

    let _ = shutdown_tx.send(true);
    if let Err(e) = debouncer.await {
        tracing::warn!(error = %e, "WS: quote debouncer task failed");
    }
}

/// Serialize `value` as JSON and send it as a text WebSocket frame.
///
/// Returns `Err(())` if the send fails (client disconnected).
async fn send_json<T: serde::Serialize>(socket: &mut WebSocket, value: &T) -> Result<(), ()> {
    let json = serde_json::to_string(value).map_err(|_| ())?;
    socket
        .send(Message::Text(json.into()))
        .await
        .map_err(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::build_router;
    use futures_util::{SinkExt, StreamExt};
    use kundapay_core::quote::{LimitPolicy, QuoteCalculator};
    use kundapay_core::repository::FixtureQuoteRepository;
    use rust_decimal::Decimal;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::net::{TcpListener, TcpStream};
    use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite};

    type Client = WebSocketStream<MaybeTlsStream<TcpStream>>;

    async fn connect() -> Client {
        let calculator = QuoteCalculator::new(
            Arc::new(FixtureQuoteRepository::seeded()),
            LimitPolicy::kundapay_defaults(),
        );
        let router = build_router(AppState::new(calculator, Duration::from_millis(200)));
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, router).await.unwrap() });

        let (client, _) = connect_async(format!("ws://{addr}/api/v1/quotes/ws"))
            .await
            .unwrap();
        client
    }

    async fn send_text(client: &mut Client, text: String) {
        client.send(tungstenite::Message::Text(text)).await.unwrap();
    }

    async fn next_frame(client: &mut Client) -> QuoteStreamMessage {
        loop {
            let msg = tokio::time::timeout(Duration::from_secs(5), client.next())
                .await
                .expect("no frame within 5s")
                .expect("stream closed")
                .unwrap();
            if let tungstenite::Message::Text(text) = msg {
                return serde_json::from_str(&text).unwrap();
            }
        }
    }

    fn request_json(amount: u32, direction: &str) -> String {
        serde_json::json!({
            "amount": amount,
            "direction": direction,
            "payment_method": "BANK_TRANSFER",
            "receiving_method": "AIRTEL_MONEY",
        })
        .to_string()
    }

    #[tokio::test]
    async fn test_malformed_frame_is_answered() {
        let mut client = connect().await;
        send_text(&mut client, "{\"amount\": ".to_owned()).await;
        assert!(matches!(
            next_frame(&mut client).await,
            QuoteStreamMessage::Malformed { .. }
        ));
    }

    #[tokio::test]
    async fn test_burst_yields_one_quote_for_last_request() {
        let mut client = connect().await;
        for amount in [10, 50, 100] {
            send_text(&mut client, request_json(amount, "FRANCE_TO_GABON")).await;
        }
        match next_frame(&mut client).await {
            QuoteStreamMessage::Quote { request_id, quote } => {
                assert_eq!(request_id, 1);
                assert_eq!(quote.amount_sent, Decimal::from(100));
                assert_eq!(quote.amount_received, Decimal::from(65_265));
            }
            other => panic!("unexpected frame {other:?}"),
        }

        send_text(&mut client, request_json(100, "MARS_TO_GABON")).await;
        match next_frame(&mut client).await {
            QuoteStreamMessage::Error {
                request_id, kind, ..
            } => {
                assert_eq!(request_id, 2);
                assert_eq!(kind, "invalid_direction");
            }
            other => panic!("unexpected frame {other:?}"),
        }
    }

    #[test]
    fn test_idle_sends_nothing() {
        assert_eq!(to_frame(&QuoteState::Idle), None);
    }

    #[test]
    fn test_failed_state_frame() {
        let frame = to_frame(&QuoteState::Failed {
            request_id: 3,
            kind: "transfer_limit_exceeded",
            message: "transfers from Gabon are limited to 196 788 FCFA (300 EUR)".to_owned(),
        });
        assert_eq!(
            frame,
            Some(QuoteStreamMessage::Error {
                request_id: 3,
                kind: "transfer_limit_exceeded".to_owned(),
                message: "transfers from Gabon are limited to 196 788 FCFA (300 EUR)".to_owned(),
            })
        );
    }
}
