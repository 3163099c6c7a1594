use anyhow::{Context, Result};

/// Process configuration, read from the environment once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// Groq API credential. May be absent; the vision client reports the
    /// absence per-request rather than failing at boot.
    pub groq_api_key: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let port = std::env::var("PORT")
            .context("PORT environment variable is not set")?
            .parse::<u16>()
            .context("PORT is not a valid TCP port")?;

        let groq_api_key = std::env::var("GROQ_API_KEY").ok().filter(|k| !k.is_empty());

        Ok(Self { port, groq_api_key })
    }
}
