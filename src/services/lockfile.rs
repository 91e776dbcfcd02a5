//! Composer-style lockfile parsing.
//!
//! Two package groups matter: `packages-dev` supplies the dev-dependency
//! exemption set, `packages` supplies the "in code" set for the unused
//! check. Only `drupal-module` packages count; the module id is the package
//! name after the vendor prefix.

use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

#[derive(Debug, Deserialize, Default)]
struct ComposerLock {
    #[serde(default)]
    packages: Vec<ComposerPackage>,
    #[serde(default, rename = "packages-dev")]
    packages_dev: Vec<ComposerPackage>,
}

#[derive(Debug, Deserialize)]
struct ComposerPackage {
    name: String,
    #[serde(default, rename = "type")]
    kind: String,
}

const MODULE_PACKAGE_TYPE: &str = "drupal-module";

fn module_id(package_name: &str) -> &str {
    match package_name.find('/') {
        Some(pos) => &package_name[pos + 1..],
        None => package_name,
    }
}

fn module_ids(packages: &[ComposerPackage]) -> HashSet<String> {
    packages
        .iter()
        .filter(|p| p.kind == MODULE_PACKAGE_TYPE)
        .map(|p| module_id(&p.name).to_string())
        .collect()
}

fn load(path: &Path) -> anyhow::Result<ComposerLock> {
    if !path.exists() {
        return Ok(ComposerLock::default());
    }
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

/// Module ids declared development-only. Missing lockfile yields an empty
/// set; dev exemption simply does not apply then.
pub fn dev_module_ids(path: &Path) -> anyhow::Result<HashSet<String>> {
    Ok(module_ids(&load(path)?.packages_dev))
}

/// Module ids in the production package group.
pub fn locked_module_ids(path: &Path) -> anyhow::Result<HashSet<String>> {
    Ok(module_ids(&load(path)?.packages))
}

#[cfg(test)]
mod tests {
    use super::{dev_module_ids, locked_module_ids};
    use std::fs;
    use tempfile::TempDir;

    const LOCK: &str = r#"{
        "packages": [
            {"name": "drupal/token", "type": "drupal-module"},
            {"name": "drupal/core", "type": "drupal-core"},
            {"name": "acme/helper", "type": "library"}
        ],
        "packages-dev": [
            {"name": "drupal/devel", "type": "drupal-module"},
            {"name": "phpunit/phpunit", "type": "library"}
        ]
    }"#;

    #[test]
    fn only_module_packages_count_and_vendor_prefix_is_stripped() {
        let tmp = TempDir::new().expect("temp dir");
        let path = tmp.path().join("composer.lock");
        fs::write(&path, LOCK).expect("write lockfile");

        let dev = dev_module_ids(&path).expect("dev ids");
        assert_eq!(dev.len(), 1);
        assert!(dev.contains("devel"));

        let locked = locked_module_ids(&path).expect("locked ids");
        assert_eq!(locked.len(), 1);
        assert!(locked.contains("token"));
    }

    #[test]
    fn missing_lockfile_yields_empty_sets() {
        let tmp = TempDir::new().expect("temp dir");
        let path = tmp.path().join("nope.lock");
        assert!(dev_module_ids(&path).expect("dev ids").is_empty());
        assert!(locked_module_ids(&path).expect("locked ids").is_empty());
    }
}
