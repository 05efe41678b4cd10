use std::path::Path;

use base64::{Engine, engine::general_purpose::STANDARD};
use reqwest::Client;

use crate::{
    config::API_KEY_ENV,
    error::OcrError,
    messages::{ChatMessage, ChatRequest, ChatResponse, ContentPart, ImageUrl},
    model::{ImageSource, OcrModel, OcrRequest, OcrResponse},
};

/// Instruction sent alongside every image.
pub const MARKDOWN_PROMPT: &str = "Convert the provided image into Markdown format. \
Ensure that all content from the page is included, such as headers, footers, subtexts, \
images (with alt text if possible), tables, and any other elements.

Requirements:

- Output Only Markdown: Return solely the Markdown content without any additional explanations or comments.
- No Delimiters: Do not use code fences or delimiters like ```markdown.
- Complete Content: Do not omit any part of the page, including headers, footers, and subtext.";

/// OCR backed by the Together AI chat completions endpoint.
pub struct TogetherOcr {
    client: Client,
    base_url: String,
}

impl TogetherOcr {
    /// Creates a client talking to `base_url` (e.g. `https://api.together.xyz/v1`).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Base URL requests are sent to, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl OcrModel for TogetherOcr {
    type Error = OcrError;

    async fn extract_text(&self, request: OcrRequest) -> Result<OcrResponse, Self::Error> {
        let api_key = request
            .api_key
            .filter(|key| !key.is_empty())
            .ok_or(OcrError::MissingApiKey(API_KEY_ENV))?;

        let image_url = match &request.image {
            ImageSource::Remote(url) => url.clone(),
            ImageSource::Local(path) => encode_local_image(path).await?,
        };

        let body = ChatRequest {
            model: request.model.as_str().to_string(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: vec![
                    ContentPart::Text {
                        text: MARKDOWN_PROMPT.to_string(),
                    },
                    ContentPart::ImageUrl {
                        image_url: ImageUrl { url: image_url },
                    },
                ],
            }],
        };

        log::debug!(
            "Sending {} to {} with model {}",
            request.image,
            self.base_url,
            body.model
        );

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            log::debug!("OCR service rejected the request with {}", status);
            return Err(OcrError::Api { status, body: text });
        }

        let chat: ChatResponse = serde_json::from_str(&text)?;
        let markdown = chat.into_text().ok_or(OcrError::EmptyResponse)?;

        Ok(OcrResponse { markdown })
    }
}

/// Reads a local image and wraps it into a base64 `data:` URL.
async fn encode_local_image(path: &Path) -> Result<String, OcrError> {
    let read_error = |source: std::io::Error| OcrError::ReadImage {
        path: path.to_path_buf(),
        source,
    };

    let metadata = tokio::fs::metadata(path).await.map_err(read_error)?;
    if !metadata.is_file() {
        return Err(read_error(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "not a regular file",
        )));
    }

    let bytes = tokio::fs::read(path).await.map_err(read_error)?;
    log::debug!("Read {} bytes from {}", bytes.len(), path.display());

    Ok(format!(
        "data:{};base64,{}",
        mime_type_for(path),
        STANDARD.encode(bytes)
    ))
}

/// Guesses the image MIME type from the file extension, defaulting to JPEG.
fn mime_type_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    match extension.as_deref() {
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("bmp") => "image/bmp",
        _ => "image/jpeg",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::VisionModel;
    use std::io::Write;

    fn request(image: ImageSource, api_key: Option<&str>) -> OcrRequest {
        OcrRequest {
            image,
            api_key: api_key.map(str::to_string),
            model: VisionModel::default(),
        }
    }

    #[test]
    fn test_mime_type_from_extension() {
        assert_eq!(mime_type_for(Path::new("a.PNG")), "image/png");
        assert_eq!(mime_type_for(Path::new("a.jpg")), "image/jpeg");
        assert_eq!(mime_type_for(Path::new("a.webp")), "image/webp");
        assert_eq!(mime_type_for(Path::new("mur")), "image/jpeg");
    }

    #[tokio::test]
    async fn test_local_image_becomes_data_url() {
        let mut file = tempfile::Builder::new().suffix(".png").tempfile().unwrap();
        file.write_all(b"abc").unwrap();

        let url = encode_local_image(file.path()).await.unwrap();
        assert_eq!(url, "data:image/png;base64,YWJj");
    }

    #[tokio::test]
    async fn test_directory_is_not_an_image() {
        let dir = tempfile::tempdir().unwrap();
        let err = encode_local_image(dir.path()).await.unwrap_err();
        assert!(matches!(err, OcrError::ReadImage { .. }));
    }

    // Unroutable base URL: these must fail before any request is sent.
    #[tokio::test]
    async fn test_missing_key_fails_without_network() {
        let ocr = TogetherOcr::new("http://127.0.0.1:9");
        let err = ocr
            .extract_text(request(ImageSource::Remote("https://x/y.png".into()), None))
            .await
            .unwrap_err();
        assert!(matches!(err, OcrError::MissingApiKey(API_KEY_ENV)));

        let err = ocr
            .extract_text(request(ImageSource::Remote("https://x/y.png".into()), Some("")))
            .await
            .unwrap_err();
        assert!(matches!(err, OcrError::MissingApiKey(_)));
    }

    #[tokio::test]
    async fn test_nonexistent_file_fails_without_network() {
        let ocr = TogetherOcr::new("http://127.0.0.1:9");
        let err = ocr
            .extract_text(request(
                ImageSource::Local("does/not/exist.png".into()),
                Some("key"),
            ))
            .await
            .unwrap_err();
        assert!(matches!(err, OcrError::ReadImage { .. }));
    }

    #[test]
    fn test_base_url_is_trimmed() {
        assert_eq!(
            TogetherOcr::new("http://localhost:3000/v1/").base_url(),
            "http://localhost:3000/v1"
        );
    }
}
