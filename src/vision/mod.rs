pub mod client;
pub mod error;
pub mod http;
pub mod interface;
pub mod types;

pub use client::VisionClient;
pub use error::VisionError;
pub use http::HttpTransport;
pub use interface::{ChatTransport, TransportReply};
