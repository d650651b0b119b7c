//! File sweeping: removal of stale world, save, and plugin data files.
//!
//! Two sweep surfaces exist:
//! - the serverfiles data root, where every `*.db`, `*.sav`, and `*.map` file
//!   belongs to the previous wipe (blueprint databases optionally retained)
//! - the oxide plugin data directory, where only an explicit allow-list of
//!   known per-wipe filenames may be touched, so unrelated plugin state
//!   survives
//!
//! Every function takes `dry_run` explicitly. Under dry-run nothing on disk
//! changes; each candidate file is reported with the action that would have
//! been taken.

use anyhow::{anyhow, Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use indexmap::IndexSet;
use std::fs;

/// Plugin data files that are safe to delete on wipe. Everything else under
/// oxide/data belongs to plugins whose state must survive a map wipe.
fn plugin_data_allow_list() -> IndexSet<&'static str> {
    IndexSet::from([
        "Kits_Data.json",
        "LoyaltyData.json",
        "NTeleportationAdmin.json",
        "NTeleportationBandit.json",
        "NTeleportationDisabledCommands.json",
        "NTeleportationHome.json",
        "NTeleportationOutpost.json",
        "NTeleportationTown.json",
        "NTeleportationTPR.json",
        "NTeleportationTPT.json",
    ])
}

/// Outcome of one sweep pass.
///
/// `removed` holds the files deleted, or reported removable under dry-run;
/// `skipped` holds blueprint files kept by the retention flag.
#[derive(Debug, Default)]
pub struct SweepReport {
    pub removed: Vec<Utf8PathBuf>,
    pub skipped: Vec<Utf8PathBuf>,
}

/// Extension point for rewriting plugin configuration after a wipe.
///
/// No plugin config rewriting is implemented today; orchestration calls this
/// seam so a future implementation only has to swap the configurator in.
pub trait PluginConfigurator {
    fn configure(&self, oxide_config_path: &Utf8Path, dry_run: bool) -> Result<()>;
}

/// Default configurator: leaves plugin configs untouched.
#[derive(Debug, Default)]
pub struct NoopPluginConfigurator;

impl PluginConfigurator for NoopPluginConfigurator {
    fn configure(&self, oxide_config_path: &Utf8Path, dry_run: bool) -> Result<()> {
        if dry_run {
            tracing::info!("[dry-run] not setting plugin config");
            return Ok(());
        }
        tracing::info!("Plugin config rewrite not implemented, leaving {oxide_config_path} untouched");
        Ok(())
    }
}

/// Remove the previous wipe's data files under the serverfiles root.
///
/// Deletes every `*.db`, `*.sav`, and `*.map` file directly under `root`.
/// A `.db` file whose name contains "blueprints" is kept when
/// `retain_blueprints` is set. Already-absent files simply do not match, so a
/// second pass over the same directory succeeds with zero matches.
pub fn sweep_serverfiles(
    root: &Utf8Path,
    retain_blueprints: bool,
    dry_run: bool,
) -> Result<SweepReport> {
    let mut report = SweepReport::default();

    for ext in ["db", "sav", "map"] {
        for path in matching_files(root, ext)? {
            let is_blueprint = path
                .file_name()
                .is_some_and(|name| name.contains("blueprints"));
            if ext == "db" && is_blueprint && retain_blueprints {
                tracing::info!("Skipping {path} because it is a blueprint file");
                report.skipped.push(path);
                continue;
            }
            remove_candidate(&path, dry_run)?;
            report.removed.push(path);
        }
    }

    Ok(report)
}

/// Remove allow-listed plugin data files under the oxide data directory.
///
/// Only exact base-name matches against the allow-list are touched; this is
/// deliberately not a wildcard wipe.
pub fn sweep_plugin_data(oxide_data_path: &Utf8Path, dry_run: bool) -> Result<SweepReport> {
    let mut report = SweepReport::default();

    if !oxide_data_path.exists() {
        tracing::debug!("No plugin data directory at {oxide_data_path}");
        return Ok(report);
    }

    let allow_list = plugin_data_allow_list();

    let mut entries: Vec<Utf8PathBuf> = Vec::new();
    for entry in oxide_data_path
        .read_dir_utf8()
        .with_context(|| format!("Failed to read plugin data directory: {oxide_data_path}"))?
    {
        let entry = entry
            .with_context(|| format!("Failed to read entry under {oxide_data_path}"))?;
        entries.push(entry.path().to_path_buf());
    }
    entries.sort();

    tracing::info!(
        "Inspecting plugin data files: {}",
        entries
            .iter()
            .map(|path| path.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );

    for path in entries {
        let Some(name) = path.file_name() else {
            continue;
        };
        if allow_list.contains(name) {
            remove_candidate(&path, dry_run)?;
            report.removed.push(path);
        }
    }

    Ok(report)
}

/// Collect files matching `<root>/*.<ext>`, sorted for deterministic handling.
fn matching_files(root: &Utf8Path, ext: &str) -> Result<Vec<Utf8PathBuf>> {
    let pattern = format!("{root}/*.{ext}");
    let mut files = Vec::new();

    for entry in
        glob::glob(&pattern).with_context(|| format!("Invalid sweep pattern: {pattern}"))?
    {
        let path = entry.context("Failed to read directory entry during sweep")?;
        let path = Utf8PathBuf::from_path_buf(path)
            .map_err(|p| anyhow!("Non-UTF-8 path under {root}: {}", p.display()))?;
        files.push(path);
    }

    files.sort();
    Ok(files)
}

/// Delete one file, or report the deletion under dry-run. Removal failures
/// propagate; partial sweeps are not rolled back.
fn remove_candidate(path: &Utf8Path, dry_run: bool) -> Result<()> {
    if dry_run {
        tracing::info!("[dry-run] would have removed: {path}");
        return Ok(());
    }
    fs::remove_file(path).with_context(|| format!("Failed to remove {path}"))?;
    tracing::info!("Removed {path}");
    Ok(())
}
