use ably_datadog_shipper::config;
use ably_datadog_shipper::events::AppStatsEvent;
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Error> {
    ably_datadog_shipper::set_up_logging();

    info!(
        "Initializing {} version {}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    );

    let config = config::Config::load_from_env()?;
    let exporter = ably_datadog_shipper::set_up_datadog_exporter(&config)?;

    run(service_fn(|request: LambdaEvent<AppStatsEvent>| {
        ably_datadog_shipper::function_handler(exporter.clone(), request)
    }))
    .await
}
