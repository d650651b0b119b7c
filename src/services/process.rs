//! Server process control via the LGSM management executable.
//!
//! Two verbs exist: `stop` and `start`. A stop against a server that is not
//! running exits with a distinguished code and is downgraded to a warning;
//! any other failure is fatal. Neither verb carries a timeout, so a hang in
//! the managed server propagates to the caller.

use anyhow::{Context, Result};
use camino::Utf8Path;
use std::process::ExitStatus;
use tokio::process::Command;

use crate::error::WipeError;

/// Exit code LGSM uses when asked to stop a server that is not running.
const EXIT_NOT_RUNNING: i32 = 2;

/// Stop the managed server.
///
/// The "not running" exit is tolerated so a crashed or never-started server
/// can still be wiped. Any other nonzero exit aborts before any destructive
/// step runs.
pub async fn stop_server(executable: &Utf8Path) -> Result<()> {
    let status = run_verb(executable, "stop").await?;

    if status.success() {
        return Ok(());
    }
    if status.code() == Some(EXIT_NOT_RUNNING) {
        tracing::warn!(
            "Stop server failed; the server may not have been running. \
             Continuing, but take caution if this is unexpected"
        );
        return Ok(());
    }

    Err(WipeError::ExternalProcess {
        verb: "stop",
        code: status.code(),
    }
    .into())
}

/// Start the managed server. Any failure here is fatal; there is no retry.
pub async fn start_server(executable: &Utf8Path) -> Result<()> {
    let status = run_verb(executable, "start").await?;

    if status.success() {
        Ok(())
    } else {
        Err(WipeError::ExternalProcess {
            verb: "start",
            code: status.code(),
        }
        .into())
    }
}

async fn run_verb(executable: &Utf8Path, verb: &'static str) -> Result<ExitStatus> {
    tracing::info!("Executing: {executable} {verb}");
    Command::new(executable.as_std_path())
        .arg(verb)
        .status()
        .await
        .with_context(|| format!("Failed to spawn {executable} {verb}"))
}
