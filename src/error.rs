use std::{error::Error, path::PathBuf};

use reqwest::StatusCode;

/// Failures of the Together AI backend.
#[derive(Debug, thiserror::Error)]
pub enum OcrError {
    #[error("missing API key; set the {0} environment variable")]
    MissingApiKey(&'static str),

    #[error("failed to read image `{path}`")]
    ReadImage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("request to the OCR service failed")]
    Transport(#[from] reqwest::Error),

    #[error("OCR service returned {status}: {body}")]
    Api { status: StatusCode, body: String },

    #[error("OCR service returned a malformed response")]
    MalformedResponse(#[from] serde_json::Error),

    #[error("OCR service returned no text")]
    EmptyResponse,
}

/// Failures of a whole invocation, generic over the backend's error type.
#[derive(Debug, thiserror::Error)]
pub enum RunError<E: Error + 'static> {
    #[error("no image path provided; usage: together-ocr <image-path>")]
    Usage,

    #[error("OCR extraction failed")]
    Model(#[source] E),
}
