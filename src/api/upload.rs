//! Multipart attachment upload.
//!
//! Justification attachments and profile images go to a dedicated upload
//! endpoint that stores the bytes in an external blob store and answers with
//! a public object URL. The URL is what gets recorded on the owning record.

use reqwest::multipart::{Form, Part};
use serde::Deserialize;

use super::{ApiClient, ApiError};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UploadResponse {
    image_url: String,
}

impl ApiClient {
    /// Upload one file; returns the public object URL.
    pub async fn upload_attachment(
        &self,
        file_name: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, ApiError> {
        let part = Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(content_type)?;
        let form = Form::new().part("file", part);

        let url = self.url_for("api/upload")?;
        let response = self.execute(self.http().post(url).multipart(form)).await?;
        let body = response.text().await?;
        let upload: UploadResponse = serde_json::from_str(&body)?;
        Ok(upload.image_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upload_response_parses() {
        let json = r#"{ "imageUrl": "https://blob.example.com/lms/abc-form.pdf" }"#;
        let upload: UploadResponse = serde_json::from_str(json).unwrap();
        assert_eq!(upload.image_url, "https://blob.example.com/lms/abc-form.pdf");
    }
}
