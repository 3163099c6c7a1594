use std::sync::Arc;

use crate::config::Config;
use crate::vision::{ChatTransport, HttpTransport, VisionClient};

#[derive(Clone)]
pub struct AppState {
    pub vision: Arc<VisionClient>,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self::with_transport(config, Arc::new(HttpTransport::new()))
    }

    /// Builds state around an arbitrary transport; tests use this to
    /// substitute the remote.
    pub fn with_transport(config: &Config, transport: Arc<dyn ChatTransport>) -> Self {
        Self {
            vision: Arc::new(VisionClient::new(config.groq_api_key.clone(), transport)),
        }
    }
}
