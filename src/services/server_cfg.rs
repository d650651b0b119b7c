//! Server configuration generation.
//!
//! Composes the full `server.cfg` document from the wipe request: display
//! name, browser tags, description, world size, and the `server.seed` line.
//! The static tail of the document (save interval, radiation, decay, chat and
//! helicopter settings) is a content-fidelity contract with the server and is
//! reproduced as literal defaults.

use anyhow::{Context, Result};
use rand::Rng;
use std::fs;

use crate::models::WipeRequest;

/// Upper bound of the composer-side random seed draw, inclusive.
const MAX_CONFIG_SEED: u32 = (1 << 31) + 1;

/// A fully composed server configuration.
#[derive(Debug, Clone)]
pub struct ComposedConfig {
    /// Display name shown in the server browser; also used for wipe alerts.
    pub display_name: String,
    /// Complete `server.cfg` text, written whole over the previous file.
    pub document: String,
    /// Seed interpolated into the `server.seed` line.
    pub seed: u32,
}

/// Compose the server configuration document for this wipe.
///
/// The caller decides whether to write the document or, under dry-run, to
/// report it in full instead.
pub fn compose(request: &WipeRequest) -> Result<ComposedConfig> {
    let seed = resolve_config_seed(request);
    let display_name = compose_display_name(request);
    let tags = collect_tags(request).join(",");
    let description = resolve_description(request)?;
    let document = render_document(request, &display_name, &description, &tags, seed);

    Ok(ComposedConfig {
        display_name,
        document,
        seed,
    })
}

/// Seed used inside the generated config.
///
/// Drawn fresh from [1, 2^31 + 1] when the random-seed override is set or no
/// seed was supplied. This draw site and its range are independent of the
/// invocation-level default draw over [0, 2^32 - 1].
fn resolve_config_seed(request: &WipeRequest) -> u32 {
    match request.seed {
        Some(seed) if !request.random_seed => seed,
        _ => {
            let seed = rand::thread_rng().gen_range(1..=MAX_CONFIG_SEED);
            tracing::info!("Using random seed: {seed}");
            seed
        }
    }
}

/// Server display name: {server_name, flavor, location}, non-empty fields
/// joined with `" | "`.
fn compose_display_name(request: &WipeRequest) -> String {
    let mut fields = Vec::new();
    if !request.server_name.is_empty() {
        fields.push(request.server_name.as_str());
    }
    if let Some(flavor) = request.flavor.as_deref() {
        if !flavor.is_empty() {
            fields.push(flavor);
        }
    }
    if let Some(location) = request.location.as_deref() {
        if !location.is_empty() {
            fields.push(location);
        }
    }
    fields.join(" | ")
}

/// Browser tags in fixed declaration order: the cadence tag first, then each
/// enabled cosmetic tag.
fn collect_tags(request: &WipeRequest) -> Vec<&'static str> {
    let mut tags = vec![request.cadence.as_tag()];

    let t = &request.tags;
    for (enabled, tag) in [
        (t.vanilla, "vanilla"),
        (t.pve, "pve"),
        (t.roleplay, "roleplay"),
        (t.creative, "creative"),
        (t.softcore, "softcore"),
        (t.minigame, "minigame"),
        (t.training, "training"),
        (t.battlefield, "battlefield"),
        (t.broyale, "broyale"),
        (t.build, "build"),
    ] {
        if enabled {
            tags.push(tag);
        }
    }

    tags
}

/// Server description: an explicit description wins; otherwise the description
/// file is read, its lines stripped and joined with the literal two-character
/// escape `\n`, which the server renders as a line break. An empty file path
/// counts as no file.
fn resolve_description(request: &WipeRequest) -> Result<String> {
    if let Some(description) = request.description.as_deref() {
        if !description.is_empty() {
            return Ok(description.to_string());
        }
    }

    if let Some(path) = request
        .description_file
        .as_deref()
        .filter(|path| !path.as_str().is_empty())
    {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read description file: {path}"))?;
        return Ok(contents
            .lines()
            .map(str::trim)
            .collect::<Vec<_>>()
            .join("\\n"));
    }

    Ok(String::new())
}

fn render_document(
    request: &WipeRequest,
    display_name: &str,
    description: &str,
    tags: &str,
    seed: u32,
) -> String {
    let max_players = request.max_players;
    let image_url = &request.image_url;
    let server_url = &request.server_url;
    let world_size = request.world_size;
    let official = if request.official { "True" } else { "False" };

    format!(
        "\n\
# Rust server settings
server.hostname \"{display_name}\"
server.maxplayers {max_players}
server.headerimage \"{image_url}\"
server.url \"{server_url}\"
server.description \"{description}\"
server.tags \"{tags}\"
server.official {official}

# Server map variables
server.level \"Procedural Map\"
server.worldsize {world_size}
server.seed {seed}

# Server intervals
server.saveinterval 300

# Server environment settings
server.radiation True
decay.scale 1

# Probably obsolete settings
server.secure True # VAC
antihack.enabled True # EAC

# Chat settings
server.globalchat True
chat.enabled True
server.stability True

# Server
server.pve False
server.eac 1

# Heli settings
heli.guns 1 # 0 for rockets only
heli.bulletdamagescale 1 # default 1
heli.bulletaccuracy 2 # default 2
"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CosmeticTags, NotifySettings, WipeCadence, WipeRequest};
    use camino::Utf8PathBuf;
    use chrono::Weekday;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn request() -> WipeRequest {
        WipeRequest {
            server: "rustserver".to_string(),
            server_root: Utf8PathBuf::from("/tmp/rustserver"),
            wipe_now: false,
            cadence: WipeCadence::Weekly,
            target_weekday: Weekday::Thu,
            retain_blueprints: true,
            seed: Some(12345),
            random_seed: false,
            description: None,
            description_file: None,
            world_size: 3000,
            max_players: 100,
            server_name: "Alpha".to_string(),
            flavor: None,
            location: None,
            official: false,
            image_url: "https://example.com/banner.png".to_string(),
            server_url: "https://example.com".to_string(),
            tags: CosmeticTags::default(),
            dry_run: true,
            exceptional_date_list: None,
            notify: NotifySettings::default(),
        }
    }

    #[test]
    fn test_display_name_skips_empty_fields() {
        let mut req = request();
        req.flavor = Some(String::new());
        req.location = Some("US-East".to_string());
        assert_eq!(compose_display_name(&req), "Alpha | US-East");
    }

    #[test]
    fn test_display_name_joins_all_fields() {
        let mut req = request();
        req.flavor = Some("vanilla".to_string());
        req.location = Some("US-East".to_string());
        assert_eq!(compose_display_name(&req), "Alpha | vanilla | US-East");
    }

    #[test]
    fn test_display_name_bare() {
        assert_eq!(compose_display_name(&request()), "Alpha");
    }

    #[test]
    fn test_display_name_skips_empty_server_name() {
        let mut req = request();
        req.server_name = String::new();
        req.location = Some("US-East".to_string());
        assert_eq!(compose_display_name(&req), "US-East");
    }

    #[test]
    fn test_tags_fixed_order() {
        let mut req = request();
        req.cadence = WipeCadence::BiWeekly;
        req.tags.pve = true;
        req.tags.vanilla = true;
        req.tags.build = true;
        assert_eq!(
            collect_tags(&req),
            vec!["biweekly", "vanilla", "pve", "build"]
        );
    }

    #[test]
    fn test_explicit_description_wins_over_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "from the file").unwrap();
        file.flush().unwrap();

        let mut req = request();
        req.description = Some("explicit".to_string());
        req.description_file =
            Some(Utf8PathBuf::from_path_buf(file.path().to_path_buf()).unwrap());
        assert_eq!(resolve_description(&req).unwrap(), "explicit");
    }

    #[test]
    fn test_description_file_joined_with_literal_escape() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "  line one  ").unwrap();
        writeln!(file, "line two").unwrap();
        file.flush().unwrap();

        let mut req = request();
        req.description_file =
            Some(Utf8PathBuf::from_path_buf(file.path().to_path_buf()).unwrap());

        // Two characters, backslash + n, not an actual newline.
        assert_eq!(resolve_description(&req).unwrap(), "line one\\nline two");
    }

    #[test]
    fn test_empty_description_file_path_means_no_file() {
        let mut req = request();
        req.description_file = Some(Utf8PathBuf::new());
        assert_eq!(resolve_description(&req).unwrap(), "");
    }

    #[test]
    fn test_supplied_seed_used_verbatim() {
        let composed = compose(&request()).unwrap();
        assert_eq!(composed.seed, 12345);
        assert!(composed.document.contains("server.seed 12345"));
    }

    #[test]
    fn test_random_seed_override_draws_in_range() {
        let mut req = request();
        req.random_seed = true;
        for _ in 0..32 {
            let composed = compose(&req).unwrap();
            assert!(composed.seed >= 1);
            assert!(composed.seed <= MAX_CONFIG_SEED);
            assert_ne!(composed.seed, 0);
        }
    }

    #[test]
    fn test_document_interpolates_request_fields() {
        let mut req = request();
        req.location = Some("US-East".to_string());
        req.tags.vanilla = true;
        req.official = true;

        let composed = compose(&req).unwrap();
        let doc = &composed.document;
        assert!(doc.contains("server.hostname \"Alpha | US-East\""));
        assert!(doc.contains("server.maxplayers 100"));
        assert!(doc.contains("server.headerimage \"https://example.com/banner.png\""));
        assert!(doc.contains("server.url \"https://example.com\""));
        assert!(doc.contains("server.tags \"weekly,vanilla\""));
        assert!(doc.contains("server.official True"));
        assert!(doc.contains("server.worldsize 3000"));
        assert!(doc.contains("server.level \"Procedural Map\""));
    }

    #[test]
    fn test_document_static_defaults_present() {
        let composed = compose(&request()).unwrap();
        let doc = &composed.document;
        assert!(doc.contains("server.saveinterval 300"));
        assert!(doc.contains("server.radiation True"));
        assert!(doc.contains("decay.scale 1"));
        assert!(doc.contains("server.secure True"));
        assert!(doc.contains("antihack.enabled True"));
        assert!(doc.contains("server.globalchat True"));
        assert!(doc.contains("server.stability True"));
        assert!(doc.contains("server.pve False"));
        assert!(doc.contains("server.eac 1"));
        assert!(doc.contains("heli.guns 1"));
        assert!(doc.contains("heli.bulletdamagescale 1"));
        assert!(doc.contains("heli.bulletaccuracy 2"));
        assert!(doc.contains("server.official False"));
    }
}
