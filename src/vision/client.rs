use std::sync::Arc;

use tracing::debug;

use super::error::VisionError;
use super::interface::ChatTransport;
use super::types::{ChatCompletionRequest, ChatCompletionResponse};

/// Translates a base64 image into a text description via the vision API.
///
/// Holds the credential and the outbound transport; both are injected at
/// construction so tests can substitute them. Stateless across calls.
pub struct VisionClient {
    api_key: Option<String>,
    transport: Arc<dyn ChatTransport>,
}

impl VisionClient {
    pub fn new(api_key: Option<String>, transport: Arc<dyn ChatTransport>) -> Self {
        Self { api_key, transport }
    }

    /// Sends the image to the vision endpoint and returns the first choice's
    /// message content verbatim.
    ///
    /// `origin` and `name` label the request for auditing only; they do not
    /// influence the outbound call.
    pub async fn describe(
        &self,
        origin: &str,
        name: &str,
        base64_image: &str,
    ) -> Result<String, VisionError> {
        let api_key = self.api_key.as_deref().ok_or(VisionError::MissingApiKey)?;

        debug!("Describing image: origin={}, name={}", origin, name);

        let request = ChatCompletionRequest::for_image(base64_image);
        let body = serde_json::to_vec(&request).map_err(VisionError::Serialize)?;

        let reply = self.transport.send(body, api_key).await?;

        // Decode before looking at the status: a non-JSON body is a decode
        // error even on a remote failure status.
        let decoded: ChatCompletionResponse =
            serde_json::from_slice(&reply.body).map_err(VisionError::Decode)?;

        if reply.status >= 300 {
            return Err(VisionError::Remote(decoded.error.unwrap_or_default()));
        }

        match decoded.choices.first() {
            Some(choice) if !choice.message.content.is_empty() => {
                Ok(choice.message.content.clone())
            }
            _ => Err(VisionError::NoContent),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use serde_json::Value;

    use super::*;
    use crate::vision::interface::TransportReply;
    use crate::vision::types::VISION_MODEL;

    /// Transport substitute: returns a canned reply and counts calls.
    struct MockTransport {
        status: u16,
        body: Vec<u8>,
        calls: AtomicUsize,
    }

    impl MockTransport {
        fn new(status: u16, body: &str) -> Self {
            Self {
                status,
                body: body.as_bytes().to_vec(),
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ChatTransport for MockTransport {
        async fn send(&self, _body: Vec<u8>, _api_key: &str) -> Result<TransportReply, VisionError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(TransportReply {
                status: self.status,
                body: self.body.clone(),
            })
        }
    }

    /// Transport substitute that records the outbound body for inspection.
    struct CapturingTransport {
        seen: std::sync::Mutex<Option<Vec<u8>>>,
    }

    #[async_trait]
    impl ChatTransport for CapturingTransport {
        async fn send(&self, body: Vec<u8>, _api_key: &str) -> Result<TransportReply, VisionError> {
            *self.seen.lock().unwrap() = Some(body);
            Ok(TransportReply {
                status: 200,
                body: br#"{"choices":[{"message":{"content":"ok"}}]}"#.to_vec(),
            })
        }
    }

    fn client_with(transport: Arc<dyn ChatTransport>) -> VisionClient {
        VisionClient::new(Some("test-key".to_string()), transport)
    }

    #[tokio::test]
    async fn missing_key_fails_without_network_call() {
        let transport = Arc::new(MockTransport::new(200, "{}"));
        let client = VisionClient::new(None, transport.clone());

        let err = client.describe("cam", "frame.jpg", "AAAA").await.unwrap_err();
        assert!(matches!(err, VisionError::MissingApiKey));
        assert_eq!(transport.calls(), 0);
    }

    #[tokio::test]
    async fn returns_first_choice_content() {
        let transport = Arc::new(MockTransport::new(
            200,
            r#"{"choices":[{"message":{"content":"a cat"}}]}"#,
        ));
        let client = client_with(transport.clone());

        let description = client.describe("cam", "frame.jpg", "AAAA").await.unwrap();
        assert_eq!(description, "a cat");
        assert_eq!(transport.calls(), 1);
    }

    #[tokio::test]
    async fn remote_error_status_carries_remote_text() {
        let transport = Arc::new(MockTransport::new(429, r#"{"error":"rate limited"}"#));
        let client = client_with(transport);

        let err = client.describe("cam", "frame.jpg", "AAAA").await.unwrap_err();
        assert!(matches!(&err, VisionError::Remote(msg) if msg == "rate limited"));
        assert!(err.to_string().contains("rate limited"));
    }

    #[tokio::test]
    async fn remote_error_without_text_is_empty() {
        let transport = Arc::new(MockTransport::new(500, "{}"));
        let client = client_with(transport);

        let err = client.describe("cam", "frame.jpg", "AAAA").await.unwrap_err();
        assert!(matches!(&err, VisionError::Remote(msg) if msg.is_empty()));
    }

    #[tokio::test]
    async fn empty_choices_is_no_content() {
        let transport = Arc::new(MockTransport::new(200, r#"{"choices":[]}"#));
        let client = client_with(transport);

        let err = client.describe("cam", "frame.jpg", "AAAA").await.unwrap_err();
        assert!(matches!(err, VisionError::NoContent));
    }

    #[tokio::test]
    async fn empty_content_is_no_content() {
        let transport = Arc::new(MockTransport::new(
            200,
            r#"{"choices":[{"message":{"content":""}}]}"#,
        ));
        let client = client_with(transport);

        let err = client.describe("cam", "frame.jpg", "AAAA").await.unwrap_err();
        assert!(matches!(err, VisionError::NoContent));
    }

    #[tokio::test]
    async fn non_json_reply_is_decode_error() {
        let transport = Arc::new(MockTransport::new(200, "not json at all"));
        let client = client_with(transport);

        let err = client.describe("cam", "frame.jpg", "AAAA").await.unwrap_err();
        assert!(matches!(err, VisionError::Decode(_)));
    }

    #[tokio::test]
    async fn outbound_body_has_data_url_and_model() {
        let transport = Arc::new(CapturingTransport {
            seen: std::sync::Mutex::new(None),
        });
        let client = client_with(transport.clone());

        client.describe("cam", "frame.jpg", "ABC123").await.unwrap();

        let body = transport.seen.lock().unwrap().take().unwrap();
        let value: Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(value["model"], VISION_MODEL);
        assert_eq!(
            value["messages"][0]["content"][1]["image_url"]["url"],
            "data:image/jpeg;base64,ABC123"
        );
        assert_eq!(
            value["messages"][0]["content"][0]["text"],
            "Describe the contents of this image."
        );
        assert_eq!(value["temperature"], 0.7);
        assert_eq!(value["top_p"], 1.0);
        assert_eq!(value["max_completion_tokens"], 1024);
        assert_eq!(value["stream"], false);
    }
}
