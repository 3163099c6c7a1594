use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use super::error::VisionError;
use super::interface::{ChatTransport, TransportReply};
use super::types::GROQ_API_URL;

/// Production transport: a reqwest client POSTing to the Groq chat
/// completion endpoint. No retry and no explicit timeout; every call is a
/// fresh round trip bounded only by the client's defaults.
pub struct HttpTransport {
    client: Client,
    url: String,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            url: GROQ_API_URL.to_string(),
        }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatTransport for HttpTransport {
    async fn send(&self, body: Vec<u8>, api_key: &str) -> Result<TransportReply, VisionError> {
        let response = self
            .client
            .post(&self.url)
            .header("Content-Type", "application/json")
            .bearer_auth(api_key)
            .body(body)
            .send()
            .await
            .map_err(VisionError::Transport)?;

        let status = response.status().as_u16();
        debug!("Groq responded with status {}", status);

        let body = response
            .bytes()
            .await
            .map_err(VisionError::Transport)?
            .to_vec();

        Ok(TransportReply { status, body })
    }
}
