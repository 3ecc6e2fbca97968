use anyhow::Result;
use clap::Parser;
use monochrome_core::Config;
use monochrome_handler::{ImageTransformHandler, TriggerNotification};

use monochrome_cli::render_response;

#[derive(Parser, Debug)]
#[command(name = "process_object")]
#[command(about = "Run the image transform for one object, as if S3 had sent a notification")]
struct Args {
    /// Source bucket
    #[arg(long)]
    bucket: String,

    /// Object key, form-encoded as in an S3 notification ("my+photo.jpg")
    #[arg(long)]
    key: String,

    /// Override OUTPUT_BUCKET
    #[arg(long)]
    output_bucket: Option<String>,

    /// Override MAX_WIDTH
    #[arg(long)]
    max_width: Option<u32>,

    /// List the source bucket before processing
    #[arg(long)]
    list_source: bool,

    /// Print the response exactly as returned to the runtime
    #[arg(long)]
    raw: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let mut config = Config::from_env()?;
    if let Some(output_bucket) = args.output_bucket {
        config.output_bucket = output_bucket;
    }
    if let Some(max_width) = args.max_width {
        config.max_width = max_width;
    }
    config.list_source_objects |= args.list_source;
    config.validate()?;

    let handler = ImageTransformHandler::from_config(&config).await?;
    let response = handler
        .process(&TriggerNotification::new(args.bucket, args.key))
        .await?;

    println!("{}", render_response(&response, args.raw)?);
    Ok(())
}
