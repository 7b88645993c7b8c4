//! WebSocket message types for the live quote stream.
//!
//! The `GET /api/v1/quotes/ws` endpoint upgrades to a WebSocket. The client
//! sends a [`QuoteRequest`](super::QuoteRequest) JSON text frame every time
//! the form changes; the server waits for the input to settle and pushes
//! [`QuoteStreamMessage`] frames.
//!
//! # Protocol
//!
//! 1. Requests arriving within the debounce window of each other are
//!    collapsed; only the last one is quoted.
//! 2. Every pushed frame carries the `request_id` of the calculation it
//!    belongs to. Ids increase, and a frame is never followed by one with
//!    a lower id.
//! 3. A frame that cannot be parsed as a request is answered with
//!    [`QuoteStreamMessage::Malformed`]; the connection stays open.

use serde::{Deserialize, Serialize};

use super::quote::TransferQuote;

/// Server-to-client WebSocket message.
///
/// ```json
/// {"type":"quote","request_id":3,"quote":{ ... }}
/// {"type":"error","request_id":4,"kind":"invalid_direction","message":"..."}
/// {"type":"malformed","reason":"..."}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QuoteStreamMessage {
    Quote {
        request_id: u64,
        quote: TransferQuote,
    },
    /// The calculation failed; `kind` matches the REST error kinds.
    Error {
        request_id: u64,
        kind: String,
        message: String,
    },
    Malformed {
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_frame_shape() {
        let frame = QuoteStreamMessage::Error {
            request_id: 4,
            kind: "invalid_direction".to_owned(),
            message: "invalid transfer direction: MARS_TO_GABON".to_owned(),
        };
        let json = serde_json::to_value(&frame).unwrap();
        assert_eq!(json["type"], "error");
        assert_eq!(json["request_id"], 4);
        assert_eq!(json["kind"], "invalid_direction");
    }
}
