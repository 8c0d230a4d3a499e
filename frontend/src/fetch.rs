use gloo_net::http::RequestBuilder;
use http::{header::ToStrError, status::InvalidStatusCode, StatusCode};
use planchat_shared::{
    ClientTransport, Credentials, FormPart, MultipartForm, RawResponse, RequestBody,
    RequestConfig,
};
use thiserror::Error;
use wasm_bindgen::JsValue;
use web_sys::{Blob, BlobPropertyBag, FormData, RequestCredentials};

#[derive(Error, Debug)]
pub enum FetchError {
    #[error(transparent)]
    Net(#[from] gloo_net::Error),
    #[error("{0}")]
    Js(String),
    #[error("header value is not visible ASCII")]
    Header(#[from] ToStrError),
    #[error(transparent)]
    Status(#[from] InvalidStatusCode),
}

impl From<JsValue> for FetchError {
    fn from(err: JsValue) -> Self {
        let message = err
            .as_string()
            .or_else(|| {
                js_sys::Reflect::get(&err, &"message".into())
                    .ok()
                    .and_then(|v| v.as_string())
            })
            .unwrap_or_else(|| format!("{:?}", err));
        FetchError::Js(message)
    }
}

/// Transport over the browser's `fetch()`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchTransport;

#[async_trait::async_trait(?Send)]
impl ClientTransport for FetchTransport {
    type Error = FetchError;

    async fn send(&self, url: &str, request: &RequestConfig) -> Result<RawResponse, Self::Error> {
        let credentials = match request.credentials {
            Credentials::Include => RequestCredentials::Include,
        };

        let mut builder = RequestBuilder::new(url)
            .method(request.method.clone())
            .credentials(credentials);

        for (name, value) in request.headers.iter() {
            builder = builder.header(name.as_str(), value.to_str()?);
        }

        let req = match &request.body {
            None => builder.build()?,
            Some(RequestBody::Json(json)) => builder.body(json.as_str())?,
            Some(RequestBody::Multipart(form)) => builder.body(form_data(form)?)?,
        };

        let resp = req.send().await?;
        let status = StatusCode::from_u16(resp.status())?;
        let body = resp.text().await?;

        Ok(RawResponse::new(status, body))
    }
}

fn form_data(form: &MultipartForm) -> Result<FormData, FetchError> {
    let data = FormData::new()?;

    for part in form.parts() {
        match part {
            FormPart::Text { name, value } => data.append_with_str(name, value)?,
            FormPart::File {
                name,
                filename,
                content_type,
                data: bytes,
            } => {
                let blob = blob(bytes, content_type.as_deref())?;
                data.append_with_blob_and_filename(name, &blob, filename)?;
            }
        }
    }

    Ok(data)
}

#[allow(deprecated)]
fn blob(bytes: &[u8], content_type: Option<&str>) -> Result<Blob, FetchError> {
    let parts = js_sys::Array::of1(&js_sys::Uint8Array::from(bytes));

    let mut options = BlobPropertyBag::new();
    if let Some(content_type) = content_type {
        options.type_(content_type);
    }

    Ok(Blob::new_with_u8_array_sequence_and_options(
        &parts, &options,
    )?)
}

#[cfg(test)]
mod tests {
    use wasm_bindgen::JsCast;
    use wasm_bindgen_test::wasm_bindgen_test;

    use super::*;

    #[wasm_bindgen_test]
    fn form_data_carries_text_and_file_parts() {
        let form = MultipartForm::new().text("note", "hello").file(
            "file",
            "diagram.png",
            Some("image/png".to_string()),
            vec![1, 2, 3],
        );

        let data = form_data(&form).unwrap();

        assert_eq!(data.get("note").as_string().as_deref(), Some("hello"));

        let file = data.get("file").dyn_into::<Blob>().unwrap();
        assert_eq!(file.size(), 3.0);
        assert_eq!(file.type_(), "image/png");
    }
}
