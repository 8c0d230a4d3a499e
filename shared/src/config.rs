use http::{
    header::{HeaderName, HeaderValue, CONTENT_TYPE},
    HeaderMap,
};

/// Environment variable holding the backend base URL.
pub const API_URL_ENV: &str = "PLANCHAT_API_URL";

/// Base URL used when [`API_URL_ENV`] is not set.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Configuration shared by every call made through one [`crate::HttpClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    base_url: String,
    default_headers: HeaderMap,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        let base_url = base_url.trim_end_matches('/').to_string();

        let mut default_headers = HeaderMap::new();
        default_headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));

        Self {
            base_url,
            default_headers,
        }
    }

    /// Resolve the base URL from an optional environment value, falling back to
    /// the local development server when it is missing or blank.
    pub fn from_env_value(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(url) if !url.is_empty() => Self::new(url),
            _ => Self::new(DEFAULT_API_URL),
        }
    }

    pub fn with_default_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.default_headers.insert(name, value);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn default_headers(&self) -> &HeaderMap {
        &self.default_headers
    }

    /// `path` is appended verbatim and must start with `/`.
    pub fn url_for(&self, path: &str) -> String {
        debug_assert!(
            path.starts_with('/'),
            "request path `{path}` must start with `/`"
        );
        format!("{}{}", self.base_url, path)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}
