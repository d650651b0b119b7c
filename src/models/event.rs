use chrono::Local;
use serde::Serialize;

/// Fire-and-forget wipe notification pushed onto the alert queue.
///
/// Serialized to JSON at the notify boundary; consumers match on
/// `"type": "wipe_alert"`.
#[derive(Debug, Clone, Serialize)]
pub struct WipeEvent {
    #[serde(rename = "type")]
    pub event_type: &'static str,
    pub server_name: String,
    /// ISO-8601 local timestamp at second precision.
    pub wipe_datetime: String,
}

impl WipeEvent {
    /// Build a wipe alert for the given server, stamped with the current time.
    pub fn now(server_name: impl Into<String>) -> Self {
        Self {
            event_type: "wipe_alert",
            server_name: server_name.into(),
            wipe_datetime: Local::now().format("%Y-%m-%dT%H:%M:%S").to_string(),
        }
    }
}
