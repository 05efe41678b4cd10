use std::{fmt, future::Future, path::PathBuf, str::FromStr};

/// Where the image to recognize lives.
#[derive(Clone, Debug, PartialEq)]
pub enum ImageSource {
    /// A file on the local filesystem, sent inline as a data URL.
    Local(PathBuf),
    /// A publicly reachable URL, forwarded as-is.
    Remote(String),
}

impl ImageSource {
    /// Classifies a command-line argument. Anything that is not an http(s) URL is a path.
    pub fn from_arg(arg: &str) -> Self {
        let has_scheme = |scheme: &str| {
            arg.get(..scheme.len())
                .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
        };
        if has_scheme("http://") || has_scheme("https://") {
            ImageSource::Remote(arg.to_string())
        } else {
            ImageSource::Local(PathBuf::from(arg))
        }
    }
}

impl fmt::Display for ImageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageSource::Local(path) => write!(f, "{}", path.display()),
            ImageSource::Remote(url) => f.write_str(url),
        }
    }
}

/// Vision models the hosted API can run the extraction with.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum VisionModel {
    #[default]
    Llama90B,
    Llama11B,
    Free,
}

impl VisionModel {
    /// Model identifier as expected by the hosted API.
    pub fn as_str(&self) -> &'static str {
        match self {
            VisionModel::Llama90B => "meta-llama/Llama-3.2-90B-Vision-Instruct-Turbo",
            VisionModel::Llama11B => "meta-llama/Llama-3.2-11B-Vision-Instruct-Turbo",
            VisionModel::Free => "meta-llama/Llama-Vision-Free",
        }
    }
}

impl FromStr for VisionModel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "90b" | "Llama-3.2-90B-Vision" => Ok(VisionModel::Llama90B),
            "11b" | "Llama-3.2-11B-Vision" => Ok(VisionModel::Llama11B),
            "free" => Ok(VisionModel::Free),
            other => Err(format!(
                "unknown model `{other}`, expected one of: 90b, 11b, free"
            )),
        }
    }
}

/// A single extraction request.
#[derive(Clone, Debug)]
pub struct OcrRequest {
    pub image: ImageSource,
    /// Credential for the hosted service. `None` is passed through and left to the
    /// model to reject.
    pub api_key: Option<String>,
    pub model: VisionModel,
}

/// Text returned by a successful extraction.
#[derive(Clone, Debug, PartialEq)]
pub struct OcrResponse {
    pub markdown: String,
}

/// Trait for implementing OCR backends that can be driven by the [`crate::OcrRunner`].
///
/// Implementors perform exactly one attempt per call and surface every failure
/// through their error type.
pub trait OcrModel {
    /// The error type that can be returned during extraction.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Extracts markdown text from the image described by `request`.
    fn extract_text(
        &self,
        request: OcrRequest,
    ) -> impl Future<Output = Result<OcrResponse, Self::Error>> + Send;
}
