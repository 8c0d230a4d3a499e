//! Browser bindings for the planchat client.
//!
//! The page builds one [`HttpClient`] through [`http_client`] at start-up and
//! hands it to whatever needs to talk to the backend.

use planchat_shared::ClientConfig;

#[cfg(target_arch = "wasm32")]
mod fetch;

#[cfg(target_arch = "wasm32")]
pub use fetch::{FetchError, FetchTransport};
pub use planchat_shared::{ChatService, FileService, HttpClient};

/// Backend location baked in at build time from `PLANCHAT_API_URL`.
pub fn api_config() -> ClientConfig {
    ClientConfig::from_env_value(option_env!("PLANCHAT_API_URL"))
}

#[cfg(target_arch = "wasm32")]
pub fn http_client() -> HttpClient<FetchTransport> {
    let config = api_config();
    tracing::debug!(base_url = config.base_url(), "creating fetch client");
    HttpClient::new(config, FetchTransport)
}
