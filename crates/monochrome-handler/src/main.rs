use lambda_runtime::{run, service_fn, Error};
use monochrome_core::Config;
use monochrome_handler::{function_handler, telemetry, ImageTransformHandler};

#[tokio::main]
async fn main() -> Result<(), Error> {
    let config = Config::from_env()?;
    telemetry::init_tracing(config.log_format);

    // Backends are built once per container and reused across invocations
    let handler = ImageTransformHandler::from_config(&config).await?;

    run(service_fn(|event| function_handler(event, &handler))).await
}
