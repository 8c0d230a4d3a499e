use http::{HeaderMap, Method, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, error};

use crate::{
    chat::ChatService,
    config::ClientConfig,
    error::{ClientError, ClientResult},
    files::FileService,
};

/// Credentials policy attached to every request. Cookies are always sent;
/// there is no opt-out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Credentials {
    #[default]
    Include,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormPart {
    Text {
        name: String,
        value: String,
    },
    File {
        name: String,
        filename: String,
        content_type: Option<String>,
        data: Vec<u8>,
    },
}

/// A multipart payload. Transports encode it themselves so that they can pick
/// the boundary and the matching `Content-Type`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultipartForm {
    parts: Vec<FormPart>,
}

impl MultipartForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parts.push(FormPart::Text {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    pub fn file(
        mut self,
        name: impl Into<String>,
        filename: impl Into<String>,
        content_type: Option<String>,
        data: Vec<u8>,
    ) -> Self {
        self.parts.push(FormPart::File {
            name: name.into(),
            filename: filename.into(),
            content_type,
            data,
        });
        self
    }

    pub fn parts(&self) -> &[FormPart] {
        &self.parts
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestBody {
    /// Already serialized JSON text.
    Json(String),
    Multipart(MultipartForm),
}

/// Everything a transport needs to issue one request.
#[derive(Debug, Clone)]
pub struct RequestConfig {
    pub method: Method,
    pub path: String,
    pub body: Option<RequestBody>,
    pub headers: HeaderMap,
    pub credentials: Credentials,
}

impl RequestConfig {
    /// Start from `default_headers` and overlay `extra_headers`, which replace
    /// every default value of a name they also set, including `Content-Type`.
    pub fn build(
        method: Method,
        path: impl Into<String>,
        body: Option<RequestBody>,
        default_headers: &HeaderMap,
        extra_headers: Option<&HeaderMap>,
    ) -> Self {
        let mut headers = default_headers.clone();
        if let Some(extra) = extra_headers {
            headers.extend(extra.clone());
        }

        Self {
            method,
            path: path.into(),
            body,
            headers,
            credentials: Credentials::Include,
        }
    }

    /// A multipart POST. No `Content-Type` is set so the transport can supply
    /// the boundary-delimited value.
    pub fn upload(path: impl Into<String>, form: MultipartForm) -> Self {
        Self {
            method: Method::POST,
            path: path.into(),
            body: Some(RequestBody::Multipart(form)),
            headers: HeaderMap::new(),
            credentials: Credentials::Include,
        }
    }

    pub fn is_upload(&self) -> bool {
        matches!(self.body, Some(RequestBody::Multipart(_)))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: StatusCode,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

/// Seam between the client and the platform network primitive.
#[cfg(not(target_arch = "wasm32"))]
#[async_trait::async_trait]
pub trait ClientTransport: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    async fn send(&self, url: &str, request: &RequestConfig) -> Result<RawResponse, Self::Error>;
}

/// Seam between the client and the platform network primitive. Browser
/// futures are not `Send`.
#[cfg(target_arch = "wasm32")]
#[async_trait::async_trait(?Send)]
pub trait ClientTransport {
    type Error: std::error::Error + 'static;

    async fn send(&self, url: &str, request: &RequestConfig) -> Result<RawResponse, Self::Error>;
}

/// Client for the planner backend.
///
/// Every `path` is appended verbatim to the configured base URL, so it must
/// start with `/`.
#[derive(Debug, Clone)]
pub struct HttpClient<T> {
    config: ClientConfig,
    transport: T,
}

impl<T> HttpClient<T>
where
    T: ClientTransport,
{
    pub fn new(config: ClientConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn chat(&self) -> ChatService<'_, T> {
        ChatService::new(self)
    }

    pub fn files(&self) -> FileService<'_, T> {
        FileService::new(self)
    }

    pub async fn get<R>(
        &self,
        path: &str,
        extra_headers: Option<&HeaderMap>,
    ) -> ClientResult<R, T::Error>
    where
        R: DeserializeOwned,
    {
        let request = self.request_config(Method::GET, path, None, extra_headers);
        self.request(request).await
    }

    pub async fn post<R, B>(
        &self,
        path: &str,
        body: Option<&B>,
        extra_headers: Option<&HeaderMap>,
    ) -> ClientResult<R, T::Error>
    where
        R: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send_json(Method::POST, path, body, extra_headers).await
    }

    pub async fn put<R, B>(
        &self,
        path: &str,
        body: Option<&B>,
        extra_headers: Option<&HeaderMap>,
    ) -> ClientResult<R, T::Error>
    where
        R: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send_json(Method::PUT, path, body, extra_headers).await
    }

    pub async fn patch<R, B>(
        &self,
        path: &str,
        body: Option<&B>,
        extra_headers: Option<&HeaderMap>,
    ) -> ClientResult<R, T::Error>
    where
        R: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send_json(Method::PATCH, path, body, extra_headers).await
    }

    pub async fn delete<R>(
        &self,
        path: &str,
        extra_headers: Option<&HeaderMap>,
    ) -> ClientResult<R, T::Error>
    where
        R: DeserializeOwned,
    {
        let request = self.request_config(Method::DELETE, path, None, extra_headers);
        self.request(request).await
    }

    pub async fn upload_file<R>(&self, path: &str, form: MultipartForm) -> ClientResult<R, T::Error>
    where
        R: DeserializeOwned,
    {
        self.request(RequestConfig::upload(path, form)).await
    }

    pub fn request_config(
        &self,
        method: Method,
        path: &str,
        body: Option<RequestBody>,
        extra_headers: Option<&HeaderMap>,
    ) -> RequestConfig {
        RequestConfig::build(
            method,
            path,
            body,
            self.config.default_headers(),
            extra_headers,
        )
    }

    /// Issue `request` and decode the body. Failures are reported to the
    /// diagnostic sink before being returned.
    pub async fn request<R>(&self, request: RequestConfig) -> ClientResult<R, T::Error>
    where
        R: DeserializeOwned,
    {
        match self.execute(&request).await {
            Ok(value) => Ok(value),
            Err(err) => {
                report_failure(&request, &err);
                Err(err)
            }
        }
    }

    async fn send_json<R, B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        extra_headers: Option<&HeaderMap>,
    ) -> ClientResult<R, T::Error>
    where
        R: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = match body.map(serde_json::to_string).transpose() {
            Ok(body) => body.map(RequestBody::Json),
            Err(err) => {
                let request = self.request_config(method, path, None, extra_headers);
                let err = ClientError::Serialization(err);
                report_failure(&request, &err);
                return Err(err);
            }
        };

        let request = self.request_config(method, path, body, extra_headers);
        self.request(request).await
    }

    async fn execute<R>(&self, request: &RequestConfig) -> ClientResult<R, T::Error>
    where
        R: DeserializeOwned,
    {
        let url = self.config.url_for(&request.path);
        debug!(method = %request.method, %url, "sending request");

        let response = self
            .transport
            .send(&url, request)
            .await
            .map_err(ClientError::Transport)?;

        if !response.is_success() {
            return Err(ClientError::Status(response.status));
        }

        serde_json::from_str(&response.body).map_err(ClientError::Deserialization)
    }
}

fn report_failure<E>(request: &RequestConfig, err: &ClientError<E>)
where
    E: std::fmt::Debug + std::error::Error + 'static,
{
    if request.is_upload() {
        error!(path = %request.path, error = %err, "File upload failed");
    } else {
        error!(
            method = %request.method,
            path = %request.path,
            error = %err,
            "HTTP Request failed"
        );
    }
}
