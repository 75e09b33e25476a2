use std::path::PathBuf;

use crate::{
    config::resolve_credential,
    error::{BlogImageError, FaultHint, Result},
    inference::TextToImage,
    logger,
    models::{GenerationReport, GenerationRequest},
    output::{self, OutputLayout},
    prompt::build_prompt,
};

/// Progress of one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Start,
    InputsResolved,
    PromptBuilt,
    RequestSent,
    ResultReceived,
    Fault,
    WrittenAndVerified,
    Fatal,
}

impl Stage {
    fn enter(self) -> Self {
        log::debug!("stage -> {:?}", self);
        self
    }
}

/// Raw caller input before validation.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub title: String,
    pub content: String,
    pub output: String,
    /// `--api-key`, checked first.
    pub api_key: Option<String>,
    /// Environment value, used only when `api_key` is absent.
    pub fallback_api_key: Option<String>,
    pub model_id: Option<String>,
}

impl RunOptions {
    pub fn into_request(self) -> Result<GenerationRequest> {
        let api_key = resolve_credential(self.api_key, self.fallback_api_key)?;
        GenerationRequest::new(
            self.title,
            self.content,
            &self.output,
            api_key,
            self.model_id,
        )
    }
}

/// Runs the whole pipeline and returns the process exit code.
pub async fn execute(
    options: RunOptions,
    layout: &OutputLayout,
    backend: &dyn TextToImage,
) -> i32 {
    match run(options, layout, backend).await {
        (_, Ok(report)) => {
            report_success(&report);
            0
        }
        (_, Err(e)) => {
            report_failure(&e);
            1
        }
    }
}

/// Drives one run to a terminal stage: `WrittenAndVerified` or `Fatal`.
pub async fn run(
    options: RunOptions,
    layout: &OutputLayout,
    backend: &dyn TextToImage,
) -> (Stage, Result<GenerationReport>) {
    let mut stage = Stage::Start.enter();

    let result = match options.into_request() {
        Ok(request) => {
            stage = Stage::InputsResolved.enter();
            generate_featured_image(&request, layout, backend, &mut stage).await
        }
        Err(e) => Err(e),
    };

    if result.is_err() {
        log::debug!("failed in {:?}", stage);
        stage = Stage::Fatal.enter();
    }
    (stage, result)
}

pub async fn generate_featured_image(
    request: &GenerationRequest,
    layout: &OutputLayout,
    backend: &dyn TextToImage,
    stage: &mut Stage,
) -> Result<GenerationReport> {
    let output_path = layout.resolve(&request.output_filename)?;

    log::info!("🖼️  Generating image for: {}", request.title);
    log::info!("📁 Output file: {}", output_path.display());

    let prompt = build_prompt(&request.title, &request.content);
    *stage = Stage::PromptBuilt.enter();

    log::info!("📝 Generating image with prompt:");
    log::info!("----------------------------------------");
    for line in prompt.lines() {
        log::info!("{}", line);
    }
    log::info!("----------------------------------------");

    log::info!(
        "🔄 Calling HuggingFace Inference API with model: {}",
        request.model_id
    );
    *stage = Stage::RequestSent.enter();

    let bytes = match request_png_bytes(request, &prompt, backend).await {
        Ok(bytes) => {
            *stage = Stage::ResultReceived.enter();
            bytes
        }
        Err(e) => {
            *stage = Stage::Fault.enter();
            return Err(e);
        }
    };

    let report = write_result(output_path, &bytes)?;
    *stage = Stage::WrittenAndVerified.enter();
    Ok(report)
}

async fn request_png_bytes(
    request: &GenerationRequest,
    prompt: &str,
    backend: &dyn TextToImage,
) -> Result<Vec<u8>> {
    let _timer = logger::timer("text-to-image request");
    let payload = backend
        .text_to_image(prompt, &request.model_id, &request.api_key)
        .await?;
    payload.into_png_bytes()
}

fn write_result(output_path: PathBuf, bytes: &[u8]) -> Result<GenerationReport> {
    let report = output::write_and_verify(&output_path, bytes)?;

    log::info!("✅ Image generated successfully!");
    log::info!("   Saved to: {}", report.output_path.display());
    log::info!("   Size: {:.2} KB", report.size_kb());
    log::info!("   File verified: {} bytes", report.size_on_disk);

    if !report.png_signature_valid {
        log::warn!("Generated file may not be a valid PNG image");
    }

    Ok(report)
}

fn report_success(report: &GenerationReport) {
    log::debug!(
        "report: {}",
        serde_json::to_string(report).unwrap_or_default()
    );
    log::info!("🎉 Image generation complete!");
}

/// Logs a fatal error; remote faults also get a hint when their message
/// matches a known category.
pub fn report_failure(err: &BlogImageError) -> Option<FaultHint> {
    if !err.is_remote_fault() {
        log::error!("{}", err);
        return None;
    }

    let message = err.to_string();
    log::error!("Failed to generate image: {}", message);

    let hint = FaultHint::classify(&message)?;
    log::warn!("HuggingFace API Error: {}", hint.title());
    for line in hint.advice() {
        log::warn!("   {}", line);
    }
    Some(hint)
}
