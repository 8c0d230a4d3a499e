use crate::{
    client::{ClientTransport, HttpClient, MultipartForm},
    error::ClientResult,
    FileUpload, MessageResponse,
};

pub const UPLOAD_PATH: &str = "/api/files/upload";
const FILES_PATH: &str = "/api/files";

#[derive(Debug)]
pub struct FileService<'a, T> {
    http: &'a HttpClient<T>,
}

impl<'a, T> FileService<'a, T>
where
    T: ClientTransport,
{
    pub fn new(http: &'a HttpClient<T>) -> Self {
        Self { http }
    }

    /// The backend expects the file under the `file` form field.
    pub async fn upload(&self, form: MultipartForm) -> ClientResult<FileUpload, T::Error> {
        self.http.upload_file(UPLOAD_PATH, form).await
    }

    pub async fn get_file(&self, file_id: &str) -> ClientResult<FileUpload, T::Error> {
        self.http.get(&format!("{FILES_PATH}/{file_id}"), None).await
    }

    pub async fn delete_file(&self, file_id: &str) -> ClientResult<MessageResponse, T::Error> {
        self.http
            .delete(&format!("{FILES_PATH}/{file_id}"), None)
            .await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::{
        client::{FormPart, RequestBody},
        testing::FakeTransport,
        ClientConfig, FileType, Method, StatusCode,
    };

    fn upload_json() -> String {
        json!({
            "id": "f-1",
            "path": "/uploads/f-1/diagram.png",
            "type": "image",
            "filename": "diagram.png",
            "size": 3
        })
        .to_string()
    }

    #[tokio::test]
    async fn upload_posts_form_without_content_type() {
        let transport = FakeTransport::replying(StatusCode::OK, upload_json());
        let http = HttpClient::new(ClientConfig::default(), transport.clone());

        let form = MultipartForm::new().file(
            "file",
            "diagram.png",
            Some("image/png".to_string()),
            vec![1, 2, 3],
        );
        let uploaded = http.files().upload(form).await.unwrap();

        assert_eq!(uploaded.file_type, FileType::Image);

        let (url, sent) = transport.last_request().unwrap();
        assert_eq!(url, "http://localhost:8000/api/files/upload");
        assert_eq!(sent.method, Method::POST);
        assert!(sent.headers.is_empty());
        match sent.body {
            Some(RequestBody::Multipart(form)) => {
                assert!(matches!(
                    &form.parts()[0],
                    FormPart::File { name, filename, .. } if name == "file" && filename == "diagram.png"
                ));
            }
            other => panic!("expected multipart body, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn get_and_delete_address_file_by_id() {
        let transport = FakeTransport::new(|_, request| {
            let body = if request.method == Method::DELETE {
                r#"{"message":"File deleted successfully"}"#.to_string()
            } else {
                upload_json()
            };
            Ok(crate::RawResponse::new(StatusCode::OK, body))
        });
        let http = HttpClient::new(ClientConfig::default(), transport.clone());

        let file = http.files().get_file("f-1").await.unwrap();
        assert_eq!(file.filename, "diagram.png");

        let ack = http.files().delete_file("f-1").await.unwrap();
        assert_eq!(ack.message, "File deleted successfully");

        let requests = transport.requests();
        assert_eq!(requests[0].0, "http://localhost:8000/api/files/f-1");
        assert_eq!(requests[1].1.method, Method::DELETE);
    }

    #[tokio::test]
    async fn upload_failure_carries_status() {
        let http = HttpClient::new(
            ClientConfig::default(),
            FakeTransport::replying(
                StatusCode::BAD_REQUEST,
                r#"{"detail":"No filename provided"}"#,
            ),
        );

        let err = http.files().upload(MultipartForm::new()).await.unwrap_err();
        assert_eq!(err.status(), Some(StatusCode::BAD_REQUEST));
    }
}
