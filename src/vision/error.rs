use thiserror::Error;

/// Everything that can go wrong between accepting an image and returning
/// its description. Kinds stay distinguishable here; flattening to a string
/// happens only at the HTTP boundary.
#[derive(Debug, Error)]
pub enum VisionError {
    #[error("GROQ_API_KEY environment variable is not set")]
    MissingApiKey,

    #[error("failed to marshal payload: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("failed to send request: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("failed to decode response: {0}")]
    Decode(#[source] serde_json::Error),

    /// The remote answered with status >= 300. Carries the remote's own
    /// error text, which may be empty.
    #[error("image-to-text failed: {0}")]
    Remote(String),

    #[error("no content returned from Groq API")]
    NoContent,
}
