//! Extracts markdown text from images through a hosted vision model.
//!
//! The [`OcrModel`] trait is the seam to the external service; [`TogetherOcr`] implements
//! it against the Together AI API and [`OcrRunner`] drives a single extraction per
//! invocation.

pub mod config;
pub mod error;
pub mod messages;
pub mod model;
pub mod runner;
pub mod together;

pub use error::{OcrError, RunError};
pub use model::{ImageSource, OcrModel, OcrRequest, OcrResponse, VisionModel};
pub use runner::{EXIT_FAILURE, EXIT_SUCCESS, OcrRunResponse, OcrRunner};
pub use together::TogetherOcr;
