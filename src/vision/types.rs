use serde::{Deserialize, Serialize};

pub const GROQ_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
pub const VISION_MODEL: &str = "llama-3.2-90b-vision-preview";
pub const VISION_PROMPT: &str = "Describe the contents of this image.";

/// Outbound chat completion request. The shape is fixed; only the image
/// data URL varies between calls.
#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_completion_tokens: u32,
    pub top_p: f32,
    pub stream: bool,
}

#[derive(Debug, Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: Vec<ContentPart>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Serialize)]
pub struct ImageUrl {
    pub url: String,
}

impl ChatCompletionRequest {
    /// Builds the single-message vision request for a base64 image payload.
    /// The payload is prefixed into a data URL uninspected; malformed base64
    /// surfaces only as a remote failure.
    pub fn for_image(base64_image: &str) -> Self {
        Self {
            model: VISION_MODEL.to_string(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: vec![
                    ContentPart::Text {
                        text: VISION_PROMPT.to_string(),
                    },
                    ContentPart::ImageUrl {
                        image_url: ImageUrl {
                            url: format!("data:image/jpeg;base64,{}", base64_image),
                        },
                    },
                ],
            }],
            temperature: 0.7,
            max_completion_tokens: 1024,
            top_p: 1.0,
            stream: false,
        }
    }
}

/// Inbound reply from the chat completion endpoint. Only the first choice
/// and the optional error text are consulted; everything else is ignored.
#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    pub message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
pub struct ChoiceMessage {
    #[serde(default)]
    pub content: String,
}
