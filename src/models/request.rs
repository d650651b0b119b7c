use camino::Utf8PathBuf;
use chrono::Weekday;

use crate::error::WipeError;

/// Recurrence policy governing how often scheduled wipes occur.
///
/// Exactly one cadence must be selected per invocation; anything else is a
/// configuration error raised before any decision logic runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WipeCadence {
    Weekly,
    /// Fires only when the day of the month falls in week 1 or 3,
    /// where week-of-month = ceil(day / 7).
    BiWeekly,
    /// Fires only during the first seven days of the month.
    Monthly,
}

impl WipeCadence {
    /// Resolve the three mutually exclusive cadence flags into one cadence.
    pub fn from_flags(weekly: bool, bi_weekly: bool, monthly: bool) -> Result<Self, WipeError> {
        match (weekly, bi_weekly, monthly) {
            (true, false, false) => Ok(Self::Weekly),
            (false, true, false) => Ok(Self::BiWeekly),
            (false, false, true) => Ok(Self::Monthly),
            _ => Err(WipeError::Configuration(
                "must have exactly one of the following options: --weekly, --bi-weekly, --monthly"
                    .to_string(),
            )),
        }
    }

    /// The server browser tag advertised for this cadence.
    pub fn as_tag(&self) -> &'static str {
        match self {
            WipeCadence::Weekly => "weekly",
            WipeCadence::BiWeekly => "biweekly",
            WipeCadence::Monthly => "monthly",
        }
    }
}

/// Parse a target weekday name, case-insensitively.
///
/// Only full English weekday names are recognized; anything else is a
/// pre-flight configuration error.
pub fn parse_target_weekday(name: &str) -> Result<Weekday, WipeError> {
    match name.to_ascii_lowercase().as_str() {
        "monday" => Ok(Weekday::Mon),
        "tuesday" => Ok(Weekday::Tue),
        "wednesday" => Ok(Weekday::Wed),
        "thursday" => Ok(Weekday::Thu),
        "friday" => Ok(Weekday::Fri),
        "saturday" => Ok(Weekday::Sat),
        "sunday" => Ok(Weekday::Sun),
        _ => Err(WipeError::Configuration(format!(
            "--on-day must be one of Monday, Tuesday, Wednesday, Thursday, Friday, \
             Saturday, Sunday (got \"{name}\")"
        ))),
    }
}

/// Cosmetic server browser tags. None of these affect wipe behavior; they are
/// appended to the generated config in this declaration order.
#[derive(Debug, Clone, Copy, Default)]
pub struct CosmeticTags {
    pub vanilla: bool,
    pub pve: bool,
    pub roleplay: bool,
    pub creative: bool,
    pub softcore: bool,
    pub minigame: bool,
    pub training: bool,
    pub battlefield: bool,
    pub broyale: bool,
    pub build: bool,
}

/// Settings for the optional Redis wipe alert.
#[derive(Debug, Clone)]
pub struct NotifySettings {
    pub enabled: bool,
    pub host: String,
    pub port: u16,
    pub list_name: String,
    pub password: Option<String>,
}

impl Default for NotifySettings {
    fn default() -> Self {
        Self {
            enabled: false,
            host: "localhost".to_string(),
            port: 6379,
            list_name: "rust_alerts".to_string(),
            password: None,
        }
    }
}

/// The full set of resolved options for one wipe attempt.
///
/// Constructed once per invocation (see [`crate::cli::WipeArgs::resolve`]) and
/// immutable thereafter. `seed` is always `Some` after resolution; a `None`
/// reaching seed persistence is an invariant violation.
#[derive(Debug, Clone)]
pub struct WipeRequest {
    /// LGSM server instance identifier, e.g. "rustserver".
    pub server: String,
    /// Root directory of the LGSM install.
    pub server_root: Utf8PathBuf,
    /// Wipe immediately, bypassing all weekday/cadence checks.
    pub wipe_now: bool,
    pub cadence: WipeCadence,
    /// Weekday on which scheduled wipes may fire.
    pub target_weekday: Weekday,
    /// Keep player blueprint database files across the wipe.
    pub retain_blueprints: bool,
    /// World seed, defaulted from a uniform draw over [0, 2^32 - 1] when the
    /// user supplied none.
    pub seed: Option<u32>,
    /// Force a fresh random seed inside the generated config regardless of
    /// the request-level seed.
    pub random_seed: bool,
    pub description: Option<String>,
    pub description_file: Option<Utf8PathBuf>,
    /// World size in meters.
    pub world_size: u32,
    pub max_players: u32,
    pub server_name: String,
    pub flavor: Option<String>,
    pub location: Option<String>,
    pub official: bool,
    pub image_url: String,
    pub server_url: String,
    pub tags: CosmeticTags,
    /// Report intended mutations without performing them.
    pub dry_run: bool,
    /// Plain-text list of YYYY-MM-DD dates that veto an otherwise-due wipe.
    pub exceptional_date_list: Option<Utf8PathBuf>,
    pub notify: NotifySettings,
}
