use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable that overrides the configured ephemeris path.
pub const EPHEMERIS_PATH_ENV: &str = "SWISS_EPHEMERIS_PATH";
pub const DEFAULT_EPHEMERIS_PATH: &str = "/usr/local/share/swisseph";
pub const DEFAULT_HOUSE_SYSTEM: &str = "placidus";

/// Relative locations tried when no explicit config path is given.
const CANDIDATE_PATHS: [&str; 2] = ["configs/astrosoul.toml", "../../configs/astrosoul.toml"];

#[derive(Debug, Clone, PartialEq)]
pub struct AstroSoulSettings {
    pub ephemeris_path: PathBuf,
    /// House system name, e.g. `placidus` or `whole_sign`
    pub house_system: String,
    pub include_minor_bodies: bool,
}

impl Default for AstroSoulSettings {
    fn default() -> Self {
        Self {
            ephemeris_path: PathBuf::from(DEFAULT_EPHEMERIS_PATH),
            house_system: DEFAULT_HOUSE_SYSTEM.to_string(),
            include_minor_bodies: false,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
struct EphemerisToml {
    #[serde(default)]
    path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct RootConfigToml {
    #[serde(default)]
    ephemeris: EphemerisToml,
    #[serde(default)]
    house_system: Option<String>,
    #[serde(default)]
    include_minor_bodies: Option<bool>,
}

/// Read the first config file that exists. `None` when there is none.
pub fn read_config_toml_text(explicit: Option<&Path>) -> anyhow::Result<Option<(PathBuf, String)>> {
    if let Some(path) = explicit {
        let text = fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Could not read config {}: {e}", path.display()))?;
        return Ok(Some((path.to_path_buf(), text)));
    }
    for p in &CANDIDATE_PATHS {
        if let Ok(text) = fs::read_to_string(p) {
            return Ok(Some((PathBuf::from(p), text)));
        }
    }
    Ok(None)
}

/// Parse settings from TOML text, filling unset keys with defaults.
pub fn parse_settings(text: &str) -> anyhow::Result<AstroSoulSettings> {
    let root: RootConfigToml = toml::from_str(text)
        .map_err(|e| anyhow::anyhow!("Failed to parse astrosoul config: {e}"))?;
    let defaults = AstroSoulSettings::default();
    let house_system = root.house_system.unwrap_or(defaults.house_system);
    if house_system.trim().is_empty() {
        anyhow::bail!("house_system must not be empty");
    }
    Ok(AstroSoulSettings {
        ephemeris_path: root.ephemeris.path.unwrap_or(defaults.ephemeris_path),
        house_system,
        include_minor_bodies: root.include_minor_bodies.unwrap_or(defaults.include_minor_bodies),
    })
}

/// Apply an ephemeris path override (the env var value, if set).
pub fn apply_env_override(settings: &mut AstroSoulSettings, value: Option<String>) {
    if let Some(path) = value.filter(|v| !v.trim().is_empty()) {
        log::debug!("{} overrides ephemeris path: {}", EPHEMERIS_PATH_ENV, path);
        settings.ephemeris_path = PathBuf::from(path);
    }
}

/// Load settings once at startup: file (explicit or candidate paths), then
/// the `SWISS_EPHEMERIS_PATH` override. A missing file means defaults.
pub fn load_settings(explicit: Option<&Path>) -> anyhow::Result<AstroSoulSettings> {
    let mut settings = match read_config_toml_text(explicit)? {
        Some((path, text)) => {
            log::info!("Loaded config from {}", path.display());
            parse_settings(&text)?
        }
        None => {
            log::info!("No config file found in {:?}; using defaults", CANDIDATE_PATHS);
            AstroSoulSettings::default()
        }
    };
    apply_env_override(&mut settings, std::env::var(EPHEMERIS_PATH_ENV).ok());
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_full_config() {
        let settings = parse_settings(
            r#"
house_system = "whole_sign"
include_minor_bodies = true

[ephemeris]
path = "/data/ephe"
"#,
        )
        .unwrap();
        assert_eq!(settings.ephemeris_path, PathBuf::from("/data/ephe"));
        assert_eq!(settings.house_system, "whole_sign");
        assert!(settings.include_minor_bodies);
    }

    #[test]
    fn test_empty_config_is_defaults() {
        assert_eq!(parse_settings("").unwrap(), AstroSoulSettings::default());
    }

    #[test]
    fn test_bad_config_is_error() {
        assert!(parse_settings("include_minor_bodies = \"yes\"").is_err());
        assert!(parse_settings("house_system = \"  \"").is_err());
    }

    #[test]
    fn test_env_override_wins() {
        let mut settings = parse_settings("[ephemeris]\npath = \"/from/file\"").unwrap();
        apply_env_override(&mut settings, None);
        assert_eq!(settings.ephemeris_path, PathBuf::from("/from/file"));
        apply_env_override(&mut settings, Some(String::new()));
        assert_eq!(settings.ephemeris_path, PathBuf::from("/from/file"));
        apply_env_override(&mut settings, Some("/from/env".to_string()));
        assert_eq!(settings.ephemeris_path, PathBuf::from("/from/env"));
    }

    #[test]
    fn test_explicit_path_is_read() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "house_system = \"koch\"").unwrap();
        let (path, text) = read_config_toml_text(Some(file.path())).unwrap().unwrap();
        assert_eq!(path, file.path());
        assert_eq!(parse_settings(&text).unwrap().house_system, "koch");
    }

    #[test]
    fn test_missing_explicit_path_is_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_config_toml_text(Some(&dir.path().join("nope.toml"))).is_err());
    }
}
