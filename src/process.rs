use crate::datadog::{DynMetricsExporter, Series};
use crate::events::{AppStatsEvent, StatsData, StatsMessage};
use chrono::NaiveDateTime;
use lambda_runtime::Error;
use tracing::info;

// METRIC_NAMES is the subset of app-stats metrics forwarded to Datadog.
//
// Each of these is posted as a counter prefixed with 'ably.' (e.g.
// 'ably.connections.all.peak' or 'ably.channels.peak'). Names outside
// this list are dropped; names missing from a message's entries are
// forwarded as 0.
pub const METRIC_NAMES: [&str; 9] = [
    "messages.all.all.count",
    "connections.all.peak",
    "channels.peak",
    "apiRequests.all.succeeded",
    "apiRequests.all.failed",
    "apiRequests.all.refused",
    "apiRequests.tokenRequests.succeeded",
    "apiRequests.tokenRequests.failed",
    "apiRequests.tokenRequests.refused",
];

/// Forwards every message in the batch to Datadog, one submission per
/// message. Submissions run concurrently and are joined fail-fast: the
/// first failed submission fails the whole invocation.
pub async fn forward_stats(
    exporter: DynMetricsExporter,
    event: &AppStatsEvent,
) -> Result<(), Error> {
    futures::future::try_join_all(event.messages.iter().map(|message| {
        let exporter = exporter.clone();
        async move {
            let series = build_series(message, &event.app_id, &event.rule_id)?;
            info!("Sending {} metrics", series.len());
            exporter.submit(series).await
        }
    }))
    .await?;

    Ok(())
}

/// Projects one app-stats message onto the metric whitelist, in whitelist
/// order, tagged with the emitting appId and ruleId.
fn build_series(message: &StatsMessage, app_id: &str, rule_id: &str) -> Result<Vec<Series>, Error> {
    let data: StatsData = serde_json::from_str(&message.data)?;
    let timestamp = interval_timestamp(&data.interval_id)?;
    let tags = vec![
        format!("ably.appId:{}", app_id),
        format!("ably.ruleId:{}", rule_id),
    ];

    Ok(METRIC_NAMES
        .iter()
        .map(|name| {
            let value = data
                .entries
                .get(*name)
                .and_then(|v| v.as_f64())
                .unwrap_or(0.0);
            Series {
                metric: format!("ably.{}", name),
                metric_type: "count".to_string(),
                points: vec![(timestamp, value)],
                tags: tags.clone(),
            }
        })
        .collect())
}

/// Converts an app-stats intervalId ("YYYY-MM-DD:HH:mm", UTC, seconds
/// truncated to zero) to UNIX epoch seconds.
fn interval_timestamp(interval_id: &str) -> Result<i64, Error> {
    let datetime = NaiveDateTime::parse_from_str(interval_id, "%Y-%m-%d:%H:%M")
        .map_err(|e| format!("invalid intervalId {:?} - {}", interval_id, e))?;
    Ok(datetime.and_utc().timestamp())
}
