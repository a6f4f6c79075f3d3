//! Upload gateway: multipart asset uploads

use crate::client::ApiClient;
use crate::error::Result;
use crate::types::{MediaType, Message};
use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};

// ==================== Types ====================

/// File payload for a multipart upload
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub file_name: String,
    /// MIME type; the server rejects kinds it does not allow
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    fn into_form(self) -> Result<Form> {
        let part = Part::bytes(self.bytes)
            .file_name(self.file_name)
            .mime_str(&self.content_type)?;
        Ok(Form::new().part("file", part))
    }
}

/// Response from image uploads
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResponse {
    /// Public URL to embed
    pub url: String,
    /// Storage path, used for later deletion
    pub path: String,
}

/// Response from portfolio media uploads
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaUploadResponse {
    pub url: String,
    pub path: String,
    /// Kind the server classified the upload as
    pub media_type: MediaType,
}

// ==================== Operations ====================

impl ApiClient {
    /// Upload a blog image into `folder`, "covers" when not given
    pub async fn upload_blog_image(
        &self,
        file: UploadFile,
        folder: Option<&str>,
    ) -> Result<UploadResponse> {
        let folder = folder.unwrap_or("covers");
        let url = format!(
            "{}/upload/blog-image?folder={}",
            self.config.base_url,
            urlencoding::encode(folder)
        );

        let response = self
            .authorize(self.client.post(&url))
            .multipart(file.into_form()?)
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Upload a portfolio photo or video
    pub async fn upload_portfolio_media(&self, file: UploadFile) -> Result<MediaUploadResponse> {
        let url = format!("{}/upload/portfolio-media", self.config.base_url);

        let response = self
            .authorize(self.client.post(&url))
            .multipart(file.into_form()?)
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Upload a work header or timeline image
    pub async fn upload_work_image(&self, file: UploadFile) -> Result<UploadResponse> {
        let url = format!("{}/upload/work-image", self.config.base_url);

        let response = self
            .authorize(self.client.post(&url))
            .multipart(file.into_form()?)
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Delete an uploaded file from one of the allowed buckets
    pub async fn delete_file(&self, bucket: &str, path: &str) -> Result<Message> {
        let url = format!(
            "{}/upload/file?bucket={}&path={}",
            self.config.base_url,
            urlencoding::encode(bucket),
            urlencoding::encode(path)
        );

        let response = self.authorize(self.client.delete(&url)).send().await?;
        self.handle_response(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_form_rejects_malformed_mime() {
        let file = UploadFile {
            file_name: "cover.jpg".to_string(),
            content_type: "not a mime".to_string(),
            bytes: vec![1, 2, 3],
        };
        assert!(file.into_form().is_err());
    }

    #[test]
    fn test_media_upload_response_parses_kind() {
        let body = r#"{"url": "https://cdn.example.test/v.mp4", "path": "portfolio/v.mp4", "media_type": "video"}"#;
        let parsed: MediaUploadResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.media_type, MediaType::Video);
    }
}
