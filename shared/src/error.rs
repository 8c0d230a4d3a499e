use http::StatusCode;
use miette::Diagnostic;
use thiserror::Error;

/// Failure of a single request/response exchange.
///
/// `Transport` wraps whatever the underlying transport raised (DNS, refused
/// connection, browser fetch rejection). `Status` is any non-2xx response; the
/// body is never inspected for an error payload. `Deserialization` is a 2xx
/// body that did not decode into the expected type.
#[derive(Error, Diagnostic, Debug)]
pub enum ClientError<TransportError>
where
    TransportError: std::fmt::Debug + std::error::Error + 'static,
{
    #[error(transparent)]
    Transport(TransportError),
    #[error("HTTP error! status: {}", .0.as_u16())]
    #[diagnostic(code(planchat::http::status))]
    Status(StatusCode),
    #[error(transparent)]
    Deserialization(serde_json::Error),
    #[error(transparent)]
    Serialization(serde_json::Error),
}

impl<TransportError> ClientError<TransportError>
where
    TransportError: std::fmt::Debug + std::error::Error + 'static,
{
    /// The HTTP status code, when the failure was a non-success response.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Status(code) => Some(*code),
            _ => None,
        }
    }
}

pub type ClientResult<T, TransportError> = Result<T, ClientError<TransportError>>;
