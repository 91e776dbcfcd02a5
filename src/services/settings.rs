use crate::domain::constants::DEFAULT_REGISTRY_SOURCE;
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Default)]
pub struct SettingsFile {
    #[serde(default)]
    pub general: SettingsGeneral,
}

#[derive(Debug, Deserialize, Default)]
pub struct SettingsGeneral {
    #[serde(default)]
    pub registry: Option<String>,
    #[serde(default)]
    pub feed: Option<String>,
    #[serde(default)]
    pub lockfile: Option<String>,
    #[serde(default)]
    pub enabled_config: Option<String>,
}

pub fn load_settings() -> anyhow::Result<SettingsFile> {
    let home = std::env::var("HOME")?;
    let path = PathBuf::from(home).join(".config/modaudit/config.toml");
    if !path.exists() {
        return Ok(SettingsFile::default());
    }
    let raw = std::fs::read_to_string(path)?;
    Ok(toml::from_str(&raw)?)
}

/// Flag beats settings file beats built-in default.
pub fn resolve_registry_source(flag: Option<&str>, settings: &SettingsFile) -> String {
    flag.map(str::to_string)
        .or_else(|| settings.general.registry.clone())
        .unwrap_or_else(|| DEFAULT_REGISTRY_SOURCE.to_string())
}

pub fn resolve_optional<'a>(flag: Option<&'a str>, from_settings: Option<&'a str>) -> Option<&'a str> {
    flag.or(from_settings)
}
