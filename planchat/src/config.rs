use miette::{Context, IntoDiagnostic, Result};
use planchat_shared::{config::API_URL_ENV, ClientConfig, HttpClient};

use crate::{transport::ReqwestTransport, APP_USER_AGENT};

#[derive(Debug, Clone)]
pub struct Config {
    client: ClientConfig,
}

impl Config {
    /// Reads `PLANCHAT_API_URL`, after loading a `.env` file if one exists.
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();

        let api_url = std::env::var(API_URL_ENV).ok();

        Self {
            client: ClientConfig::from_env_value(api_url.as_deref()),
        }
    }

    pub fn with_api_url(api_url: &str) -> Self {
        Self {
            client: ClientConfig::new(api_url),
        }
    }

    pub fn base_url(&self) -> &str {
        self.client.base_url()
    }

    /// Build the shared client. The cookie store keeps the backend's session
    /// cookie and sends it back on every later request.
    pub fn client(&self) -> Result<HttpClient<ReqwestTransport>> {
        let client = reqwest::Client::builder()
            .user_agent(APP_USER_AGENT)
            .cookie_store(true)
            .build()
            .into_diagnostic()
            .wrap_err("Could not build reqwest client")?;

        Ok(HttpClient::new(
            self.client.clone(),
            ReqwestTransport(client),
        ))
    }
}
