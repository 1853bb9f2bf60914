use lambda_runtime::{Error, LambdaEvent};
use std::sync::Arc;
use std::time::Duration;
use tracing::level_filters::LevelFilter;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::datadog::{DynMetricsExporter, RestMetricsExporter};
use crate::events::AppStatsEvent;

pub mod config;
pub mod datadog;
pub mod events;
pub mod process;

pub fn set_up_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .from_env_lossy(),
        )
        .init();
}

pub fn set_up_datadog_exporter(config: &Config) -> Result<DynMetricsExporter, Error> {
    let http = reqwest::Client::builder()
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .timeout(Duration::from_secs(30))
        .build()?;

    let exporter = Arc::new(RestMetricsExporter::new(
        http,
        &config.base_url(),
        config.api_key.clone(),
    ));

    Ok(exporter)
}

// lambda handler
pub async fn function_handler(
    exporter: DynMetricsExporter,
    evt: LambdaEvent<AppStatsEvent>,
) -> Result<(), Error> {
    let event = evt.payload;
    info!(
        app_id = %event.app_id,
        rule_id = %event.rule_id,
        messages = event.messages.len(),
        "handling app-stats event"
    );

    process::forward_stats(exporter, &event).await
}
