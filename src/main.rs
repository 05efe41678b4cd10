use argh::FromArgs;
use together_ocr::{OcrRunner, TogetherOcr, VisionModel, config};

#[derive(FromArgs)]
/// Extract markdown text from an image with a hosted vision model.
///
/// The API key is read from the TOGETHER_API_KEY environment variable.
struct OcrArgs {
    /// vision model to use: "90b", "11b" or "free"
    #[argh(option, short = 'm', default = "VisionModel::default()")]
    model: VisionModel,

    /// base URL of the API, defaults to TOGETHER_BASE_URL or the public endpoint
    #[argh(option)]
    base_url: Option<String>,

    /// path or http(s) URL of the image
    #[argh(positional)]
    image_path: Option<String>,
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args: OcrArgs = argh::from_env();

    let runner = OcrRunner::new(TogetherOcr::new(config::resolve_base_url(args.base_url)))
        .with_vision_model(args.model);

    let code = runner
        .run_to(
            args.image_path.as_deref(),
            &mut std::io::stdout(),
            &mut std::io::stderr(),
        )
        .await;

    std::process::exit(code);
}
