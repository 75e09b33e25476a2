use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::process;

use blog_image::{
    config::DEFAULT_MODEL_ID,
    logger::{self, LogLevel, LoggerConfig},
    pipeline, Config, HuggingFaceClient, OutputLayout, RunOptions,
};
use clap::Parser;

const EXAMPLES: &str = "\
Examples:
  blog-image \\
    --title \"Understanding SOLID Principles\" \\
    --content \"Software design principles for maintainable code\" \\
    --output \"solid-principles.png\"

  blog-image \\
    --title \"Composition Over Inheritance\" \\
    --content \"Software design pattern emphasizing flexible composition\" \\
    --output \"composition-over-inheritance.png\" \\
    --model \"stabilityai/stable-diffusion-xl-base-1.0\"";

#[derive(Debug, Parser)]
#[command(
    name = "blog-image",
    version,
    about = "Generate a blog post featured image using HuggingFace Inference API",
    after_help = EXAMPLES
)]
struct Cli {
    /// The title of the blog post
    #[arg(long)]
    title: String,
    /// A summary or key themes from the blog post content
    #[arg(long)]
    content: String,
    /// The filename for the generated image (e.g. "my-post-slug.png")
    #[arg(long)]
    output: String,
    /// HuggingFace API token (defaults to HUGGINGFACE_API_KEY env var)
    #[arg(long)]
    api_key: Option<String>,
    /// HuggingFace model ID to use for image generation
    #[arg(long, default_value = DEFAULT_MODEL_ID)]
    model: String,
    /// Directory whose posts/images/ receives the image (defaults to the
    /// parent of the directory holding this executable)
    #[arg(long)]
    repo_root: Option<PathBuf>,
    /// Log debug output
    #[arg(long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose { LogLevel::Debug } else { LogLevel::Info };
    if let Err(e) = logger::init_with_config(
        LoggerConfig::cli()
            .with_level(level)
            .with_colors(io::stdout().is_terminal()),
    ) {
        eprintln!("{}", e);
    }

    match dotenv::dotenv() {
        Ok(path) => log::debug!("✅ Loaded {}", path.display()),
        Err(_) => log::debug!("No .env file found, using system environment variables"),
    }

    let mut config = Config::from_env();
    if let Some(root) = cli.repo_root.clone() {
        config = config.with_repo_root(root);
    }
    config.huggingface = config.huggingface.with_model(cli.model.clone());
    logger::log_config_info(&config);

    let layout = match &config.repo_root {
        Some(root) => OutputLayout::new(root),
        None => match OutputLayout::from_current_exe() {
            Ok(layout) => layout,
            Err(e) => {
                log::error!("{}", e);
                process::exit(1);
            }
        },
    };

    let options = RunOptions {
        title: cli.title,
        content: cli.content,
        output: cli.output,
        api_key: cli.api_key,
        fallback_api_key: config.huggingface.api_key.clone(),
        model_id: Some(cli.model),
    };

    let client = HuggingFaceClient::new(&config.huggingface);
    let code = pipeline::execute(options, &layout, &client).await;
    process::exit(code);
}

#[cfg(test)]
mod tests {
    use super::*;

    const REQUIRED: [&str; 7] = [
        "blog-image",
        "--title",
        "Understanding SOLID Principles",
        "--content",
        "Software design principles for maintainable code",
        "--output",
        "solid-principles",
    ];

    #[test]
    fn test_required_flags_and_defaults() {
        let cli = Cli::try_parse_from(REQUIRED).unwrap();
        assert_eq!(cli.title, "Understanding SOLID Principles");
        assert_eq!(cli.output, "solid-principles");
        assert_eq!(cli.model, "black-forest-labs/FLUX.1-schnell");
        assert_eq!(cli.api_key, None);
        assert_eq!(cli.repo_root, None);
        assert!(!cli.verbose);
    }

    #[test]
    fn test_missing_output_is_rejected() {
        let err = Cli::try_parse_from(REQUIRED[..5].iter().copied()).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_optional_flags() {
        let mut args = REQUIRED.to_vec();
        args.extend([
            "--api-key",
            "",
            "--model",
            "stabilityai/stable-diffusion-xl-base-1.0",
            "--repo-root",
            "/srv/blog",
            "--verbose",
        ]);
        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(cli.api_key.as_deref(), Some(""));
        assert_eq!(cli.model, "stabilityai/stable-diffusion-xl-base-1.0");
        assert_eq!(cli.repo_root, Some(PathBuf::from("/srv/blog")));
        assert!(cli.verbose);
    }
}
