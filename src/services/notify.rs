//! Wipe alert publishing.
//!
//! Pushes the JSON-encoded [`WipeEvent`] onto a Redis list. The alert is
//! fire-and-forget: by the time it is sent the wipe has already committed, so
//! the orchestrator logs a publish failure instead of failing the run.

use anyhow::{Context, Result};
use redis::AsyncCommands;

use crate::models::{NotifySettings, WipeEvent};

/// Push a wipe alert onto the configured Redis list.
pub async fn publish_wipe_event(settings: &NotifySettings, event: &WipeEvent) -> Result<()> {
    let url = connection_url(settings);

    let client = redis::Client::open(url.as_str())
        .with_context(|| format!("Invalid Redis settings for {}:{}", settings.host, settings.port))?;
    let mut conn = client
        .get_multiplexed_async_connection()
        .await
        .with_context(|| format!("Failed to connect to Redis at {}:{}", settings.host, settings.port))?;

    let payload = serde_json::to_string(event).context("Failed to serialize wipe event")?;
    conn.lpush::<_, _, ()>(&settings.list_name, &payload)
        .await
        .with_context(|| format!("Failed to push wipe alert onto list {}", settings.list_name))?;

    tracing::info!(
        "Published wipe alert for {} onto {}",
        event.server_name,
        settings.list_name
    );
    Ok(())
}

fn connection_url(settings: &NotifySettings) -> String {
    match settings.password.as_deref() {
        Some(password) => format!("redis://:{password}@{}:{}/", settings.host, settings.port),
        None => format!("redis://{}:{}/", settings.host, settings.port),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_url_without_password() {
        let settings = NotifySettings::default();
        assert_eq!(connection_url(&settings), "redis://localhost:6379/");
    }

    #[test]
    fn test_connection_url_with_password() {
        let settings = NotifySettings {
            password: Some("hunter2".to_string()),
            ..NotifySettings::default()
        };
        assert_eq!(connection_url(&settings), "redis://:hunter2@localhost:6379/");
    }
}
