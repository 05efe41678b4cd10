use std::{
    io::Write,
    time::{Duration, Instant},
};

use crate::{
    config,
    error::RunError,
    model::{ImageSource, OcrModel, OcrRequest, OcrResponse, VisionModel},
};

/// Exit code of a successful invocation.
pub const EXIT_SUCCESS: i32 = 0;
/// Exit code of any failed invocation, usage errors included.
pub const EXIT_FAILURE: i32 = 1;

/// Outcome of a successful run together with its timing.
pub struct OcrRunResponse {
    /// The image the text was extracted from.
    pub image: ImageSource,
    /// Total time spent waiting on the model.
    pub duration: Duration,
    /// The model's response.
    pub response: OcrResponse,
}

/// Drives exactly one extraction per invocation against an [`OcrModel`].
pub struct OcrRunner<M: OcrModel> {
    model: M,
    vision_model: VisionModel,
}

impl<M: OcrModel> OcrRunner<M> {
    /// Creates a runner using the default vision model.
    pub fn new(model: M) -> Self {
        Self {
            model,
            vision_model: VisionModel::default(),
        }
    }

    /// Selects the vision model used for every extraction.
    pub fn with_vision_model(mut self, vision_model: VisionModel) -> Self {
        self.vision_model = vision_model;
        self
    }

    /// Validates the image argument and runs a single extraction.
    ///
    /// A missing or empty argument fails with [`RunError::Usage`] before any request
    /// is built. The credential is read from the environment on every call.
    pub async fn run(
        &self,
        image_path: Option<&str>,
    ) -> Result<OcrRunResponse, RunError<M::Error>> {
        let image_path = image_path
            .filter(|path| !path.is_empty())
            .ok_or(RunError::Usage)?;

        let image = ImageSource::from_arg(image_path);
        let request = OcrRequest {
            image: image.clone(),
            api_key: config::api_key_from_env(),
            model: self.vision_model,
        };

        log::debug!("Running OCR on {}", image);
        let start_time = Instant::now();

        let response = self
            .model
            .extract_text(request)
            .await
            .map_err(RunError::Model)?;

        let duration = start_time.elapsed();
        log::info!("OCR on {} completed in {:?}", image, duration);

        Ok(OcrRunResponse {
            image,
            duration,
            response,
        })
    }

    /// Runs and reports the outcome: text to `out` on success, a diagnostic to `err`
    /// on failure. Returns the process exit code.
    pub async fn run_to(
        &self,
        image_path: Option<&str>,
        out: &mut impl Write,
        err: &mut impl Write,
    ) -> i32 {
        match self.run(image_path).await {
            Ok(result) => {
                let written =
                    writeln!(out, "{}", result.response.markdown).and_then(|_| out.flush());
                match written {
                    Ok(()) => EXIT_SUCCESS,
                    Err(e) => {
                        let _ = writeln!(err, "Error: failed to write output: {}", e);
                        EXIT_FAILURE
                    }
                }
            }
            Err(e) => {
                let e = anyhow::Error::from(e);
                log::debug!("Invocation failed: {:?}", e);
                let _ = writeln!(err, "Error: {:#}", e);
                EXIT_FAILURE
            }
        }
    }
}
