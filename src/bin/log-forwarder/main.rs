#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(unused_extern_crates)]
#![deny(unused_allocation)]
#![deny(unused_assignments)]
#![deny(unused_comparisons)]
#![deny(unreachable_pub)]
#![deny(missing_copy_implementations)]
#![deny(missing_debug_implementations)]

use lambda_runtime::{Error, LambdaEvent, run, service_fn};
use log_forwarder::{
    config::{self, Config},
    handler,
    lifecycle::invocation_context::InvocationContext,
    logger,
    s3_client::S3ObjectStore,
};
use serde_json::Value;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Error> {
    let config = config::get_config()?;
    enable_logging_subsystem(&config)?;

    let store = S3ObjectStore::from_config(&config).await;

    run(service_fn(|event: LambdaEvent<Value>| {
        function_handler(event, &config, &store)
    }))
    .await
}

async fn function_handler(
    event: LambdaEvent<Value>,
    config: &Config,
    store: &S3ObjectStore,
) -> Result<(), Error> {
    let context = InvocationContext::from(&event.context);
    handler::handle(&event.payload, &context, config, store).await?;
    Ok(())
}

fn enable_logging_subsystem(config: &Config) -> Result<(), Error> {
    let env_filter = format!(
        "h2=off,hyper=off,rustls=off,aws_smithy_runtime=off,{}",
        config.log_level.as_filter_directive()
    );
    let subscriber = tracing_subscriber::fmt::Subscriber::builder()
        .with_env_filter(EnvFilter::try_new(env_filter)?)
        .with_level(true)
        .with_thread_names(false)
        .with_thread_ids(false)
        .with_line_number(false)
        .with_file(false)
        .with_target(false)
        .without_time()
        .event_format(logger::Formatter)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    debug!("Logging subsystem enabled");
    Ok(())
}
