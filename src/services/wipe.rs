//! Wipe orchestration.
//!
//! Sequences one run: stop → plugin-data sweep → serverfiles sweep → config
//! write → seed persist → start → alert. The exceptional-date veto and the
//! cadence decision gate the whole sequence; either exits early with no
//! mutation. There is no rollback: once the stop has committed, a mid-sequence
//! failure leaves a partially-wiped installation and the operator re-runs the
//! tool to completion.

use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use chrono::NaiveDateTime;
use std::fs;

use crate::error::WipeError;
use crate::models::{WipeEvent, WipeRequest};
use crate::services::sweep::{NoopPluginConfigurator, PluginConfigurator};
use crate::services::{notify, process, schedule, server_cfg, sweep};

/// Result of one orchestrator run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WipeOutcome {
    /// Today is an exceptional date; nothing was touched.
    Vetoed,
    /// The weekday or cadence did not match; nothing was touched.
    NotScheduled,
    /// The full wipe sequence ran (or was fully reported under dry-run).
    Completed,
}

/// Phases of the wipe sequence, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Stopping,
    Sweeping,
    Configuring,
    SeedPersisting,
    Starting,
    Notifying,
}

fn enter(phase: Phase) {
    tracing::debug!(?phase, "entering wipe phase");
}

/// Filesystem layout of one LGSM-managed server installation, derived from
/// the install root and the server instance identifier.
#[derive(Debug, Clone)]
pub struct ServerLayout {
    /// The LGSM management executable, `<root>/<server>`.
    pub executable: Utf8PathBuf,
    /// Data files of the current world: `serverfiles/server/<server>/`.
    pub serverfiles: Utf8PathBuf,
    /// Generated configuration: `serverfiles/server/<server>/cfg/server.cfg`.
    pub server_cfg_file: Utf8PathBuf,
    /// Oxide install root; plugin handling is skipped when absent.
    pub oxide_root: Utf8PathBuf,
    pub oxide_data: Utf8PathBuf,
    pub oxide_config: Utf8PathBuf,
    /// Seed persistence consumed by LGSM: `lgsm/data/<server>-seed.txt`.
    pub seed_file: Utf8PathBuf,
}

impl ServerLayout {
    pub fn new(root: &Utf8Path, server: &str) -> Self {
        let serverfiles = root.join("serverfiles").join("server").join(server);
        let oxide_root = root.join("serverfiles").join("oxide");
        Self {
            executable: root.join(server),
            server_cfg_file: serverfiles.join("cfg").join("server.cfg"),
            serverfiles,
            oxide_data: oxide_root.join("data"),
            oxide_config: oxide_root.join("config"),
            oxide_root,
            seed_file: root
                .join("lgsm")
                .join("data")
                .join(format!("{server}-seed.txt")),
        }
    }
}

/// Run one wipe decision and, if due, the full wipe sequence.
pub async fn run(request: &WipeRequest, now: NaiveDateTime) -> Result<WipeOutcome> {
    if schedule::is_exceptional_date(now.date(), request.exceptional_date_list.as_deref()) {
        tracing::info!(
            "Noted that {} is an exceptional date, refusing to wipe",
            now.date()
        );
        return Ok(WipeOutcome::Vetoed);
    }

    if !schedule::should_wipe_today(now, request) {
        tracing::info!("...not wiping.");
        return Ok(WipeOutcome::NotScheduled);
    }

    execute(request).await?;
    Ok(WipeOutcome::Completed)
}

/// Execute the committed wipe sequence.
async fn execute(request: &WipeRequest) -> Result<()> {
    let layout = ServerLayout::new(&request.server_root, &request.server);

    tracing::info!("Wiping server {}", request.server);
    tracing::info!("Serverfiles path: {}", layout.serverfiles);

    enter(Phase::Stopping);
    if request.dry_run {
        tracing::info!("[dry-run] not stopping the server");
    } else {
        process::stop_server(&layout.executable).await?;
    }

    enter(Phase::Sweeping);
    if layout.oxide_root.exists() {
        sweep::sweep_plugin_data(&layout.oxide_data, request.dry_run)?;
        NoopPluginConfigurator.configure(&layout.oxide_config, request.dry_run)?;
    } else {
        tracing::info!(
            "No oxide install at {}, skipping plugin data sweep",
            layout.oxide_root
        );
    }
    sweep::sweep_serverfiles(&layout.serverfiles, request.retain_blueprints, request.dry_run)?;

    enter(Phase::Configuring);
    let composed = server_cfg::compose(request)?;
    if request.dry_run {
        tracing::info!(
            "[dry-run] would have written server config:\n{}",
            composed.document
        );
    } else {
        fs::write(&layout.server_cfg_file, &composed.document)
            .with_context(|| format!("Failed to write server config: {}", layout.server_cfg_file))?;
        tracing::info!("Wrote server config to {}", layout.server_cfg_file);
    }

    enter(Phase::SeedPersisting);
    persist_seed(request, &layout.seed_file)?;

    enter(Phase::Starting);
    if request.dry_run {
        tracing::info!("[dry-run] not starting the server");
    } else {
        process::start_server(&layout.executable).await?;
    }

    enter(Phase::Notifying);
    if request.notify.enabled {
        let event = WipeEvent::now(composed.display_name.clone());
        if let Err(e) = notify::publish_wipe_event(&request.notify, &event).await {
            // The wipe has already committed; the alert is best-effort.
            tracing::warn!("Wipe completed but alert publish failed: {e:#}");
        }
    }

    Ok(())
}

/// Persist the request-level seed for the server-management layer.
///
/// The seed is resolved at invocation start, so an absent seed here is a bug
/// in request construction, not bad user input.
fn persist_seed(request: &WipeRequest, seed_file: &Utf8Path) -> Result<()> {
    let seed = request.seed.ok_or_else(|| {
        WipeError::Invariant("seed unexpectedly absent at persistence time".to_string())
    })?;

    if request.dry_run {
        tracing::info!("[dry-run] seed not actually persisted");
        return Ok(());
    }

    fs::write(seed_file, seed.to_string())
        .with_context(|| format!("Failed to write seed file: {seed_file}"))?;
    tracing::info!("Persisted seed {seed} to {seed_file}");
    Ok(())
}
