use crate::domain::models::ReviewEntry;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(thiserror::Error, Debug)]
pub enum RegistryError {
    #[error("registry request failed: {0}")]
    Unavailable(String),
    #[error("module not reviewed: {0}")]
    EntryNotFound(String),
}

fn is_remote(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

fn cache_path(source: &str) -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")?;
    let mut hasher = Sha256::new();
    hasher.update(source.as_bytes());
    let id = hex::encode(hasher.finalize());
    Ok(PathBuf::from(home)
        .join(".cache")
        .join("modaudit")
        .join("registries")
        .join(format!("{}.json", id)))
}

fn fetch_registry_text(source: &str, timeout_ms: u64) -> anyhow::Result<String> {
    let client = reqwest::blocking::Client::builder()
        .timeout(Duration::from_millis(timeout_ms))
        .build()?;
    let mut req = client.get(source);
    // Registries hosted on raw.githubusercontent.com may need a token.
    if let Ok(token) = std::env::var("GITHUB_API_TOKEN") {
        if !token.is_empty() {
            req = req.header("Authorization", format!("token {}", token));
        }
    }
    let resp = req
        .send()
        .map_err(|e| RegistryError::Unavailable(e.to_string()))?;
    if !resp.status().is_success() {
        return Err(RegistryError::Unavailable(format!(
            "status {} from {}",
            resp.status().as_u16(),
            source
        ))
        .into());
    }
    Ok(resp.text()?)
}

/// Re-fetches a remote source into the cache. Local-file sources have no
/// cache to refresh; returns `false` for those.
pub fn refresh_registry(source: &str) -> anyhow::Result<bool> {
    if !is_remote(source) {
        return Ok(false);
    }
    let body = fetch_registry_text(source, 3000)?;
    let cache = cache_path(source)?;
    if let Some(parent) = cache.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(cache, body)?;
    Ok(true)
}

/// Loads the review registry. Remote sources are cached; a failed fetch
/// falls back to the last cached body so a flaky registry does not block a
/// check run.
pub fn load_registry(source: &str) -> anyhow::Result<Vec<ReviewEntry>> {
    if is_remote(source) {
        let cache = cache_path(source)?;
        match fetch_registry_text(source, 2500) {
            Ok(body) => {
                if let Some(parent) = cache.parent() {
                    std::fs::create_dir_all(parent)?;
                }
                std::fs::write(&cache, &body)?;
                return parse_registry(&body);
            }
            Err(_) if cache.exists() => {
                let raw = std::fs::read_to_string(cache)?;
                return parse_registry(&raw);
            }
            Err(e) => return Err(e),
        }
    }

    let raw = std::fs::read_to_string(Path::new(source))?;
    parse_registry(&raw)
}

fn parse_registry(raw: &str) -> anyhow::Result<Vec<ReviewEntry>> {
    Ok(serde_json::from_str(raw)?)
}

pub fn list_entries<'a>(entries: &'a [ReviewEntry], query: Option<&str>) -> Vec<&'a ReviewEntry> {
    match query {
        None => entries.iter().collect(),
        Some(q) => {
            let q = q.to_ascii_lowercase();
            entries
                .iter()
                .filter(|e| e.name.to_ascii_lowercase().contains(&q))
                .collect()
        }
    }
}

pub fn show_entry<'a>(entries: &'a [ReviewEntry], name: &str) -> anyhow::Result<&'a ReviewEntry> {
    entries
        .iter()
        .find(|e| e.name == name)
        .ok_or_else(|| RegistryError::EntryNotFound(name.to_string()).into())
}

#[cfg(test)]
mod tests {
    use super::{list_entries, parse_registry, refresh_registry, show_entry};

    #[test]
    fn refresh_is_a_no_op_for_local_sources() {
        let refreshed = refresh_registry("registry.json").expect("local refresh");
        assert!(!refreshed);
    }

    #[test]
    fn parses_legacy_restricted_us_key() {
        let raw = r#"[{"name":"token","restricted_us":"0","version":"1.10"}]"#;
        let entries = parse_registry(raw).expect("parse legacy registry");
        assert_eq!(entries[0].restricted_use, "0");
        assert_eq!(entries[0].version, "1.10");
    }

    #[test]
    fn missing_minimum_version_defaults_to_empty() {
        let raw = r#"[{"name":"token","restricted_use":"0"}]"#;
        let entries = parse_registry(raw).expect("parse registry");
        assert_eq!(entries[0].version, "");
    }

    #[test]
    fn list_filters_by_query_and_show_finds_by_name() {
        let raw = r#"[
            {"name":"token","restricted_use":"0","version":"1.10"},
            {"name":"webform","restricted_use":"12,7","version":"6.2"}
        ]"#;
        let entries = parse_registry(raw).expect("parse registry");
        assert_eq!(list_entries(&entries, Some("web")).len(), 1);
        assert_eq!(list_entries(&entries, None).len(), 2);
        assert!(show_entry(&entries, "token").is_ok());
        assert!(show_entry(&entries, "ctools").is_err());
    }
}
