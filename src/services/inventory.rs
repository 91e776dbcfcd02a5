//! Module discovery.
//!
//! Walks the install root for `<id>.info.yml` manifests and builds the
//! installed-module snapshot. Discovery is deliberately forgiving: a
//! manifest that fails to parse or lacks fields produces a module with the
//! fields absent, and the evaluator's guards skip it.

use crate::domain::constants::{CONTRIB_PATH_MARKER, MODULES_PATH_MARKER, OBSOLETE_MODULES};
use crate::domain::models::InstalledModule;
use serde::Deserialize;
use std::path::Path;
use walkdir::WalkDir;

#[derive(Debug, Deserialize, Default)]
struct ModuleInfo {
    #[serde(rename = "type")]
    kind: Option<String>,
    version: Option<String>,
    project: Option<String>,
}

const MANIFEST_SUFFIX: &str = ".info.yml";

/// True for paths under the third-party module location; the evaluator only
/// applies registry checks to these.
pub fn is_contrib_path(path: &str) -> bool {
    path.contains(CONTRIB_PATH_MARKER)
}

pub fn scan_modules(root: &Path) -> anyhow::Result<Vec<InstalledModule>> {
    let mut modules = Vec::new();

    for entry in WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
    {
        if !entry.file_type().is_file() {
            continue;
        }
        let Some(file_name) = entry.file_name().to_str() else {
            continue;
        };
        let Some(id) = file_name.strip_suffix(MANIFEST_SUFFIX) else {
            continue;
        };
        if OBSOLETE_MODULES.contains(&id) {
            continue;
        }

        let rel_path = entry
            .path()
            .parent()
            .and_then(|p| p.strip_prefix(root).ok())
            .map(|p| p.to_string_lossy().replace('\\', "/"))
            .unwrap_or_default();
        if !rel_path.contains(MODULES_PATH_MARKER) {
            continue;
        }

        let info: ModuleInfo = std::fs::read_to_string(entry.path())
            .ok()
            .and_then(|raw| serde_yaml::from_str(&raw).ok())
            .unwrap_or_default();
        // Themes and profiles also ship info.yml manifests.
        if info.kind.as_deref().map_or(false, |k| k != "module") {
            continue;
        }

        modules.push(InstalledModule {
            id: id.to_string(),
            path: rel_path,
            version: info.version,
            project: info.project,
        });
    }

    Ok(modules)
}

#[derive(Debug, Deserialize, Default)]
struct EnabledConfig {
    #[serde(default)]
    module: std::collections::BTreeMap<String, i64>,
}

/// Module ids enabled on the site, read from the exported extension config
/// (`core.extension.yml`). A missing file yields an empty set; the unused
/// check warns and treats every discovered module as disabled.
pub fn enabled_module_ids(path: &Path) -> anyhow::Result<std::collections::HashSet<String>> {
    if !path.exists() {
        return Ok(Default::default());
    }
    let raw = std::fs::read_to_string(path)?;
    let config: EnabledConfig = serde_yaml::from_str(&raw)?;
    Ok(config.module.into_keys().collect())
}
