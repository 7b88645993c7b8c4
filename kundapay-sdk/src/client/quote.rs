//! Quote API client (frontend or partner backend → KundaPay server).

use reqwest::Client;
use url::Url;

use super::ClientError;
use crate::objects::{ApiErrorBody, CorridorInfo, QuoteRequest, TransferQuote};

/// Typed HTTP client for the KundaPay **Quote API**.
#[derive(Debug, Clone)]
pub struct QuoteClient {
    http: Client,
    base_url: Url,
}

impl QuoteClient {
    /// Create a new `QuoteClient`.
    ///
    /// * `base_url` – root URL of the KundaPay server (e.g. `https://api.kundapay.com`).
    pub fn new(base_url: Url) -> Self {
        Self {
            http: Client::new(),
            base_url,
        }
    }

    /// Replace the default `reqwest::Client` with a custom one (e.g. to
    /// configure timeouts or a proxy).
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.http = client;
        self
    }

    /// `GET /api/v1/corridors` – list supported corridors and their methods.
    pub async fn corridors(&self) -> Result<Vec<CorridorInfo>, ClientError> {
        let url = self.base_url.join("/api/v1/corridors")?;
        let resp = self.http.get(url).send().await?;
        parse_response(resp).await
    }

    /// `POST /api/v1/quotes` – calculate a transfer quote.
    pub async fn calculate(&self, request: &QuoteRequest) -> Result<TransferQuote, ClientError> {
        let url = self.base_url.join("/api/v1/quotes")?;
        let resp = self.http.post(url).json(request).send().await?;
        parse_response(resp).await
    }
}

async fn parse_response<T: serde::de::DeserializeOwned>(
    resp: reqwest::Response,
) -> Result<T, ClientError> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(match serde_json::from_str::<ApiErrorBody>(&body) {
            Ok(body) => ClientError::Rejected { status, body },
            Err(_) => ClientError::Api { status, body },
        });
    }
    let bytes = resp.bytes().await?;
    serde_json::from_slice(&bytes).map_err(ClientError::Json)
}
