pub use crate::config::Config;
pub use crate::transport::ReqwestTransport;
pub use planchat_shared as shared;

use planchat_shared::{HeaderName, HeaderValue};

mod config;
pub mod render;
mod transport;

static APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);

/// Best-effort content type for an uploaded file, from its extension.
pub fn content_type_for(filename: &str) -> Option<&'static str> {
    let extension = filename.rsplit_once('.')?.1.to_ascii_lowercase();

    let content_type = match extension.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "pdf" => "application/pdf",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "txt" | "md" => "text/plain",
        "json" => "application/json",
        _ => return None,
    };

    Some(content_type)
}

/// Parse a `NAME=VALUE` command line header. Names and values are validated
/// here so a bad header never reaches the transport.
pub fn parse_header(raw: &str) -> Result<(HeaderName, HeaderValue), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got `{raw}`"))?;

    let name = HeaderName::from_bytes(name.trim().as_bytes())
        .map_err(|err| format!("invalid header name in `{raw}`: {err}"))?;
    let value = HeaderValue::from_str(value.trim())
        .map_err(|err| format!("invalid header value in `{raw}`: {err}"))?;

    Ok((name, value))
}
