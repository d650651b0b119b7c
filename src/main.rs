//! rustwipe - scheduled wipe automation for LGSM-managed Rust game servers
//!
//! Designed to run unattended from a scheduler (cron). Each invocation
//! decides whether today is a wipe day and, if so, runs the full sequence:
//! stop the server, sweep stale world/save/plugin data, regenerate
//! `server.cfg` with a fresh seed, persist the seed for LGSM, restart, and
//! optionally push a wipe alert onto a Redis list.
//!
//! # Exit behavior
//!
//! - Configuration errors (cadence count, weekday name) abort non-zero before
//!   any mutation.
//! - A vetoed or not-scheduled day exits zero having touched nothing.
//! - Mid-sequence failures after the stop has committed exit non-zero and
//!   leave a partially-wiped install; re-run the tool to completion.
//!
//! # Concurrency
//!
//! Strictly sequential, one invocation at a time; the scheduler is
//! responsible for not overlapping runs.

use anyhow::Result;
use camino::Utf8Path;
use clap::Parser;

use rustwipe::cli::WipeArgs;
use rustwipe::services::wipe::{self, WipeOutcome};
use rustwipe::{APP_NAME, VERSION};

fn main() -> Result<()> {
    let args = WipeArgs::parse();

    // Setup logging with both file and console output
    let _guard = rustwipe::logging::setup_logging(Utf8Path::new("logs"), "rustwipe", args.debug)?;

    tracing::info!("Starting {} v{}", APP_NAME, VERSION);

    // Validate and freeze the invocation; configuration errors abort here,
    // before any file or process operation.
    let request = args.resolve()?;

    // Single-threaded by design: the sequence is strictly sequential and the
    // only async work is subprocess and Redis I/O.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let now = chrono::Local::now().naive_local();
    let outcome = runtime.block_on(wipe::run(&request, now))?;

    match outcome {
        WipeOutcome::Completed => tracing::info!("Wipe sequence complete"),
        WipeOutcome::Vetoed | WipeOutcome::NotScheduled => {
            tracing::info!("No wipe performed")
        }
    }

    Ok(())
}
