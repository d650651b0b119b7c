//! Command-line surface.
//!
//! [`WipeArgs`] is the raw clap-parsed flag set; [`WipeArgs::resolve`]
//! validates it (cadence count, weekday name) and freezes it into the
//! immutable [`WipeRequest`] used everywhere downstream. Configuration errors
//! surface from `resolve`, before any file or process operation.

use camino::Utf8PathBuf;
use clap::Parser;
use rand::Rng;

use crate::error::WipeError;
use crate::models::{
    parse_target_weekday, CosmeticTags, NotifySettings, WipeCadence, WipeRequest,
};

/// A Rust server wipe tool.
#[derive(Debug, Parser)]
#[command(name = "rustwipe", version, about = "A Rust server wipe tool")]
pub struct WipeArgs {
    /// Wipe the server now, without consideration of the schedule
    #[arg(long)]
    pub now: bool,

    /// Wipe server weekly
    #[arg(long)]
    pub weekly: bool,

    /// Wipe server bi-weekly; only fires in the first and third week of the month
    #[arg(long)]
    pub bi_weekly: bool,

    /// Wipe server monthly; only fires in the first seven days of the month
    #[arg(long)]
    pub monthly: bool,

    /// The day of the week to wipe
    #[arg(long, default_value = "Thursday")]
    pub on_day: String,

    /// Wipe player blueprints as well
    #[arg(long)]
    pub bps: bool,

    /// The new world seed; randomized when omitted
    #[arg(long)]
    pub seed: Option<u32>,

    /// Draw a fresh random seed for the generated config regardless of --seed
    #[arg(long)]
    pub random_seed: bool,

    /// Server description, overrides the description file
    #[arg(long)]
    pub description: Option<String>,

    /// Server description file, one line per physical line, inferior to --description
    #[arg(long)]
    pub description_file: Option<Utf8PathBuf>,

    /// World size in meters
    #[arg(long, default_value_t = 3000)]
    pub size: u32,

    /// LGSM server instance identifier
    #[arg(long, default_value = "rustserver")]
    pub server: String,

    /// Server location, shown in the hostname
    #[arg(long)]
    pub location: Option<String>,

    /// Mark as an official server; should not be used on anything other than
    /// a true vanilla server
    #[arg(long)]
    pub official: bool,

    /// Server name
    #[arg(long, default_value = "Rust Server")]
    pub server_name: String,

    /// Max players in the server-level configuration
    #[arg(long, default_value_t = 100)]
    pub max_players: u32,

    /// Root directory of the LGSM install, typically ~/rustserver
    #[arg(long)]
    pub server_root: Utf8PathBuf,

    /// Report intended mutations without performing them
    #[arg(long, visible_alias = "dry")]
    pub dry_run: bool,

    /// The flavor of the server, "vanilla" or another flavor, shown in the hostname
    #[arg(long)]
    pub flavor: Option<String>,

    /// Path to the exceptional wipe date list (one YYYY-MM-DD per line)
    #[arg(long)]
    pub exceptional_wipe_date_list: Option<Utf8PathBuf>,

    /// Image URL for the banner (512px x 256px)
    #[arg(long, default_value = "https://i.imgur.com/D3kxEmx.png")]
    pub image_url: String,

    /// URL for the server webpage
    #[arg(long, default_value = "")]
    pub server_url: String,

    /// Send a wipe alert via Redis after a completed wipe
    #[arg(long)]
    pub wipe_alert: bool,

    /// Redis hostname (for wipe alerts)
    #[arg(long, default_value = "localhost")]
    pub redis_host: String,

    /// Redis port (for wipe alerts)
    #[arg(long, default_value_t = 6379)]
    pub redis_port: u16,

    /// Redis list to push wipe alerts onto
    #[arg(long, default_value = "rust_alerts")]
    pub redis_list_name: String,

    /// Optional password for the Redis server
    #[arg(long)]
    pub redis_password: Option<String>,

    /// Log at debug level
    #[arg(long)]
    pub debug: bool,

    // Cosmetic server tags; none of these affect wipe behavior.
    /// Add the vanilla server tag
    #[arg(long)]
    pub vanilla: bool,

    /// Add the PvE server tag
    #[arg(long)]
    pub pve: bool,

    /// Add the roleplay tag
    #[arg(long)]
    pub roleplay: bool,

    /// Add the creative tag
    #[arg(long)]
    pub creative: bool,

    /// Add the softcore tag
    #[arg(long)]
    pub softcore: bool,

    /// Add the minigame tag
    #[arg(long)]
    pub minigame: bool,

    /// Add the training tag
    #[arg(long)]
    pub training: bool,

    /// Add the battlefield tag
    #[arg(long)]
    pub battlefield: bool,

    /// Add the broyale tag
    #[arg(long)]
    pub broyale: bool,

    /// Add the build tag
    #[arg(long)]
    pub build: bool,
}

impl WipeArgs {
    /// Validate the flag set and freeze it into an immutable [`WipeRequest`].
    ///
    /// The default seed is drawn here, uniformly over [0, 2^32 - 1], whether
    /// or not a wipe ends up happening this invocation.
    pub fn resolve(self) -> Result<WipeRequest, WipeError> {
        let cadence = WipeCadence::from_flags(self.weekly, self.bi_weekly, self.monthly)?;
        let target_weekday = parse_target_weekday(&self.on_day)?;

        let seed = match self.seed {
            Some(seed) => seed,
            None => {
                let seed = rand::thread_rng().gen::<u32>();
                tracing::info!(
                    "Saw no user-supplied seed, assuming randomized seed was desired ({seed})"
                );
                seed
            }
        };

        Ok(WipeRequest {
            server: self.server,
            server_root: self.server_root,
            wipe_now: self.now,
            cadence,
            target_weekday,
            retain_blueprints: !self.bps,
            seed: Some(seed),
            random_seed: self.random_seed,
            description: self.description,
            description_file: self.description_file,
            world_size: self.size,
            max_players: self.max_players,
            server_name: self.server_name,
            flavor: self.flavor,
            location: self.location,
            official: self.official,
            image_url: self.image_url,
            server_url: self.server_url,
            tags: CosmeticTags {
                vanilla: self.vanilla,
                pve: self.pve,
                roleplay: self.roleplay,
                creative: self.creative,
                softcore: self.softcore,
                minigame: self.minigame,
                training: self.training,
                battlefield: self.battlefield,
                broyale: self.broyale,
                build: self.build,
            },
            dry_run: self.dry_run,
            exceptional_date_list: self.exceptional_wipe_date_list,
            notify: NotifySettings {
                enabled: self.wipe_alert,
                host: self.redis_host,
                port: self.redis_port,
                list_name: self.redis_list_name,
                password: self.redis_password,
            },
        })
    }
}
