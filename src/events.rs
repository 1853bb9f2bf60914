use serde::Deserialize;
use serde_json::{Map, Value};

/// The event payload delivered to the lambda: one batch of app-stats
/// messages emitted by the Ably stats metachannel, tagged with the app
/// and forwarding rule that produced it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppStatsEvent {
    pub app_id: String,
    pub rule_id: String,
    pub messages: Vec<StatsMessage>,
}

/// A single raw app-stats message. `data` carries a JSON-encoded
/// [`StatsData`] object.
#[derive(Debug, Clone, Deserialize)]
pub struct StatsMessage {
    pub data: String,
}

/// The decoded contents of a [`StatsMessage`].
///
/// `entries` maps dotted metric names to counts for the collection
/// interval. For the full list of available fields, see the app-stats
/// JSON schema:
///
/// https://schemas.ably.com/json/app-stats-0.0.1.json
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsData {
    /// Minute-granularity UTC timestamp of the form "YYYY-MM-DD:HH:mm"
    /// identifying the statistics collection window.
    pub interval_id: String,
    // Kept as a raw JSON map so a missing field or a non-numeric entry
    // never fails deserialization; readers default those to zero.
    #[serde(default)]
    pub entries: Map<String, Value>,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_deserialize_event() {
        let payload = r#"{
            "appId": "app1",
            "ruleId": "rule1",
            "messages": [
                {"data": "{\"intervalId\":\"2023-06-01:14:30\",\"entries\":{\"channels.peak\":3}}"}
            ]
        }"#;
        let event: AppStatsEvent = serde_json::from_str(payload).unwrap();
        assert_eq!(event.app_id, "app1");
        assert_eq!(event.rule_id, "rule1");
        assert_eq!(event.messages.len(), 1);
    }

    #[test]
    fn test_stats_data_missing_entries_defaults_to_empty() {
        let data: StatsData =
            serde_json::from_str(r#"{"intervalId":"2023-06-01:14:30"}"#).unwrap();
        assert_eq!(data.interval_id, "2023-06-01:14:30");
        assert!(data.entries.is_empty());
    }
}
