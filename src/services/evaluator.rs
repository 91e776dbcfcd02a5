//! Module compliance evaluator.
//!
//! Pure functions over immutable inputs: installed-module snapshot, review
//! registry, dev-dependency set and project context in; classification out.
//! No I/O happens here and nothing errors — empty or partial inputs degrade
//! to empty results, so "unknown" never turns into "violation".

use crate::domain::models::{
    ClassificationResult, InstalledModule, MinimumVersionFinding, ProjectContext, ReviewEntry,
    SecurityUpdateInfo, UpdateInfo,
};
use crate::services::version::version_cmp;
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

/// Names authorized for the current project plus the registry rows that
/// contributed them, in registry order. The rows are kept (duplicates
/// included) because the minimum-version lookup is first-match-wins over
/// exactly this sequence.
pub struct AuthorizedSet {
    pub names: HashSet<String>,
    pub entries: Vec<ReviewEntry>,
}

pub fn build_authorized_set(entries: &[ReviewEntry], ctx: &ProjectContext) -> AuthorizedSet {
    let mut names = HashSet::new();
    let mut contributing = Vec::new();

    for entry in entries {
        if entry.restricted_use == "0" {
            names.insert(entry.name.clone());
            contributing.push(entry.clone());
            continue;
        }
        if entry.restricted_use == "1" {
            // Blanket-restricted, no project list.
            continue;
        }
        if let Some(project_id) = &ctx.project_id {
            // Literal split, verbatim match. Scopes are written without
            // whitespace; a padded segment is a registry defect, not ours.
            if entry.restricted_use.split(',').any(|p| p == project_id) {
                names.insert(entry.name.clone());
                contributing.push(entry.clone());
            }
        }
    }

    AuthorizedSet {
        names,
        entries: contributing,
    }
}

/// Shared guard: only contrib-path modules with a declared version, whose
/// declared project is the module itself, and which are not dev-only
/// dependencies take part in compliance checks. A module failing any guard
/// is silently skipped, not reported either way.
fn passes_guard(
    module: &InstalledModule,
    dev_dependencies: &HashSet<String>,
    is_external_path: &dyn Fn(&str) -> bool,
) -> bool {
    if !is_external_path(&module.path) {
        return false;
    }
    let version_ok = module.version.as_deref().map_or(false, |v| !v.is_empty());
    if !version_ok {
        return false;
    }
    if module.project.as_deref() != Some(module.id.as_str()) {
        return false;
    }
    !dev_dependencies.contains(&module.id)
}

pub fn classify_authorization(
    modules: &[InstalledModule],
    authorized: &AuthorizedSet,
    dev_dependencies: &HashSet<String>,
    is_external_path: &dyn Fn(&str) -> bool,
) -> Vec<String> {
    modules
        .iter()
        .filter(|m| passes_guard(m, dev_dependencies, is_external_path))
        .filter(|m| !authorized.names.contains(&m.id))
        .map(|m| m.id.clone())
        .collect()
}

pub fn check_security_updates(
    modules: &[InstalledModule],
    dev_dependencies: &HashSet<String>,
    is_external_path: &dyn Fn(&str) -> bool,
    feed: &HashMap<String, UpdateInfo>,
) -> Vec<SecurityUpdateInfo> {
    let mut findings = Vec::new();
    for module in modules {
        if !passes_guard(module, dev_dependencies, is_external_path) {
            continue;
        }
        // A feed miss means "no update", not an error.
        let Some(info) = feed.get(&module.id) else {
            continue;
        };
        if info.security_updates.is_empty() {
            continue;
        }
        findings.push(SecurityUpdateInfo {
            module: module.id.clone(),
            existing_version: info.existing_version.clone(),
            recommended: info.recommended.clone(),
        });
    }
    findings
}

/// Minimum accepted version for a project name: first contributing entry
/// wins, in registry order. Changing this rule silently changes which
/// minimum applies when a module is listed under several scopes.
fn minimum_version_for<'a>(project: &str, entries: &'a [ReviewEntry]) -> Option<&'a str> {
    entries
        .iter()
        .find(|e| e.name == project)
        .map(|e| e.version.as_str())
}

pub fn check_minimum_version(
    modules: &[InstalledModule],
    authorized: &AuthorizedSet,
    dev_dependencies: &HashSet<String>,
    is_external_path: &dyn Fn(&str) -> bool,
) -> Vec<MinimumVersionFinding> {
    let mut findings = Vec::new();
    for module in modules {
        if !passes_guard(module, dev_dependencies, is_external_path) {
            continue;
        }
        // project == id holds past the guard.
        let Some(minimum) = minimum_version_for(&module.id, &authorized.entries) else {
            continue;
        };
        if minimum.is_empty() {
            // Unknown minimum: no real version precedes the empty string.
            continue;
        }
        let current = module.version.as_deref().unwrap_or_default();
        if version_cmp(current, minimum) == Ordering::Less {
            findings.push(MinimumVersionFinding {
                module: module.id.clone(),
                current: current.to_string(),
                minimum: minimum.to_string(),
            });
        }
    }
    findings
}

/// Full classification over one snapshot of inputs.
pub fn evaluate(
    modules: &[InstalledModule],
    registry: &[ReviewEntry],
    ctx: &ProjectContext,
    dev_dependencies: &HashSet<String>,
    feed: &HashMap<String, UpdateInfo>,
    is_external_path: &dyn Fn(&str) -> bool,
) -> ClassificationResult {
    let authorized = build_authorized_set(registry, ctx);
    ClassificationResult {
        unauthorized: classify_authorization(modules, &authorized, dev_dependencies, is_external_path),
        security_updates_needed: check_security_updates(
            modules,
            dev_dependencies,
            is_external_path,
            feed,
        ),
        below_minimum_version: check_minimum_version(
            modules,
            &authorized,
            dev_dependencies,
            is_external_path,
        ),
    }
}
