use planchat_shared::{
    ClientTransport, Credentials, FormPart, MultipartForm, RawResponse, RequestBody,
    RequestConfig,
};
use reqwest::multipart::{Form, Part};

/// Native transport. Credentials are carried by the wrapped client's cookie
/// store, see [`crate::Config::client`].
#[derive(Debug, Clone)]
pub struct ReqwestTransport(pub reqwest::Client);

#[async_trait::async_trait]
impl ClientTransport for ReqwestTransport {
    type Error = reqwest::Error;

    async fn send(&self, url: &str, request: &RequestConfig) -> Result<RawResponse, Self::Error> {
        let Credentials::Include = request.credentials;

        let req = self
            .0
            .request(request.method.clone(), url)
            .headers(request.headers.clone());

        let req = match &request.body {
            None => req,
            Some(RequestBody::Json(json)) => req.body(json.clone()),
            Some(RequestBody::Multipart(form)) => req.multipart(multipart_form(form)?),
        };

        let response = req.send().await?;
        let status = response.status();
        let body = response.text().await?;

        Ok(RawResponse::new(status, body))
    }
}

fn multipart_form(form: &MultipartForm) -> Result<Form, reqwest::Error> {
    form.parts()
        .iter()
        .try_fold(Form::new(), |multipart, part| match part {
            FormPart::Text { name, value } => Ok(multipart.text(name.clone(), value.clone())),
            FormPart::File {
                name,
                filename,
                content_type,
                data,
            } => {
                let file = Part::bytes(data.clone()).file_name(filename.clone());
                let file = match content_type {
                    Some(content_type) => file.mime_str(content_type)?,
                    None => file,
                };
                Ok(multipart.part(name.clone(), file))
            }
        })
}
