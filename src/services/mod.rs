//! Services module - the wipe decision and mutation logic.
//!
//! Everything here is framework-agnostic: no CLI types leak in, all inputs
//! are explicit parameters (including `dry_run`), and each piece is testable
//! on its own.
//!
//! # Components
//!
//! - [`schedule`]: the wipe-day decision (cadence + target weekday) and the
//!   exceptional-date veto list
//! - [`sweep`]: removal of stale world/save/plugin data, with blueprint
//!   retention, an allow-listed plugin-data sweep, and dry-run reporting
//! - [`server_cfg`]: composition of the full `server.cfg` document, including
//!   the config-side seed draw
//! - [`process`]: `stop`/`start` against the LGSM management executable, with
//!   the "not running" exit downgraded to a warning
//! - [`notify`]: best-effort Redis wipe alert
//! - [`wipe`]: the orchestrator sequencing all of the above for one run
//!
//! # Control flow
//!
//! [`wipe::run`] gates on [`schedule::is_exceptional_date`] and
//! [`schedule::should_wipe_today`]; only when both allow it does the
//! destructive sequence execute: stop → sweep → configure → persist seed →
//! start → notify.

pub mod notify;
pub mod process;
pub mod schedule;
pub mod server_cfg;
pub mod sweep;
pub mod wipe;

pub use schedule::{is_exceptional_date, should_wipe_today};
pub use server_cfg::{compose, ComposedConfig};
pub use sweep::{NoopPluginConfigurator, PluginConfigurator, SweepReport};
pub use wipe::{ServerLayout, WipeOutcome};
