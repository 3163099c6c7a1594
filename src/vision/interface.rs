use async_trait::async_trait;

use super::error::VisionError;

/// Raw reply from the outbound transport: the HTTP status and the
/// undecoded body bytes.
#[derive(Debug, Clone)]
pub struct TransportReply {
    pub status: u16,
    pub body: Vec<u8>,
}

/// Outbound transport seam for the vision client.
///
/// A single send-and-receive capability: the serialized chat completion
/// body goes out with the given credential, the raw reply comes back.
/// Tests substitute this to simulate the remote deterministically.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn send(&self, body: Vec<u8>, api_key: &str) -> Result<TransportReply, VisionError>;
}
