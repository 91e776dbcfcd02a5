use crate::cli::{CheckCommands, Cli, Commands};
use crate::domain::models::{
    AuthorizedCheckReport, FullCheckReport, MinVersionCheckReport, ProjectContext,
    UnusedCheckReport, UnusedModuleFinding,
};
use crate::registry;
use crate::services::evaluator::{
    build_authorized_set, check_minimum_version, check_security_updates, classify_authorization,
    evaluate,
};
use crate::services::inventory::{enabled_module_ids, is_contrib_path, scan_modules};
use crate::services::lockfile::{dev_module_ids, locked_module_ids};
use crate::services::output::print_one;
use crate::services::settings::{resolve_optional, resolve_registry_source, SettingsFile};
use crate::services::storage::{audit, load_state};
use crate::services::updates::load_update_feed_lenient;
use std::path::{Path, PathBuf};

pub fn handle_check_commands(cli: &Cli, settings: &SettingsFile) -> anyhow::Result<()> {
    let Commands::Check { command } = &cli.command else {
        unreachable!("handled by the admin dispatchers");
    };
    let root = PathBuf::from(&cli.root);

    match command {
        CheckCommands::Authorized {
            project_id,
            lockfile,
            feed,
        } => {
            let ctx = resolve_context(project_id.as_deref())?;
            let modules = scan_modules(&root)?;
            let entries = load_registry_for_check(cli, settings)?;
            let dev = dev_module_ids(&lockfile_path(&root, lockfile.as_deref(), settings))?;
            let feed_source = resolve_optional(feed.as_deref(), settings.general.feed.as_deref());
            let feed = load_update_feed_lenient(feed_source);

            let authorized = build_authorized_set(&entries, &ctx);
            let report = AuthorizedCheckReport {
                project_id: ctx.project_id.clone(),
                unauthorized: classify_authorization(&modules, &authorized, &dev, &is_external),
                security_updates_needed: check_security_updates(
                    &modules,
                    &dev,
                    &is_external,
                    &feed,
                ),
            };
            audit(
                "check_authorized",
                serde_json::json!({
                    "project_id": report.project_id,
                    "unauthorized": report.unauthorized.len(),
                    "security": report.security_updates_needed.len()
                }),
            );
            print_one(cli.json, &report, |r| {
                let mut lines = Vec::new();
                for module in &r.unauthorized {
                    lines.push(format!("module {} is not authorised", module));
                }
                for s in &r.security_updates_needed {
                    lines.push(format!(
                        "module {} at {} has a security update, update to {}",
                        s.module, s.existing_version, s.recommended
                    ));
                }
                if lines.is_empty() {
                    "no findings".to_string()
                } else {
                    lines.join("\n")
                }
            })?;
        }
        CheckCommands::MinVersion {
            project_id,
            lockfile,
        } => {
            let ctx = resolve_context(project_id.as_deref())?;
            let modules = scan_modules(&root)?;
            let entries = load_registry_for_check(cli, settings)?;
            let dev = dev_module_ids(&lockfile_path(&root, lockfile.as_deref(), settings))?;

            let authorized = build_authorized_set(&entries, &ctx);
            let report = MinVersionCheckReport {
                project_id: ctx.project_id.clone(),
                below_minimum_version: check_minimum_version(
                    &modules,
                    &authorized,
                    &dev,
                    &is_external,
                ),
            };
            audit(
                "check_min_version",
                serde_json::json!({
                    "project_id": report.project_id,
                    "findings": report.below_minimum_version.len()
                }),
            );
            print_one(cli.json, &report, |r| {
                if r.below_minimum_version.is_empty() {
                    return "no findings".to_string();
                }
                r.below_minimum_version
                    .iter()
                    .map(|f| {
                        format!(
                            "module {} needs to be updated from {} to {}",
                            f.module, f.current, f.minimum
                        )
                    })
                    .collect::<Vec<_>>()
                    .join("\n")
            })?;
        }
        CheckCommands::Unused {
            path,
            lockfile,
            enabled_config,
        } => {
            let report = check_unused(
                settings,
                &root,
                path,
                lockfile.as_deref(),
                enabled_config.as_deref(),
            )?;
            audit(
                "check_unused",
                serde_json::json!({"path": report.path, "findings": report.unused.len()}),
            );
            print_one(cli.json, &report, |r| {
                if r.unused.is_empty() {
                    return "no findings".to_string();
                }
                r.unused
                    .iter()
                    .map(|f| format!("module {} is not enabled", f.module))
                    .collect::<Vec<_>>()
                    .join("\n")
            })?;
        }
        CheckCommands::All {
            project_id,
            lockfile,
            feed,
        } => {
            let ctx = resolve_context(project_id.as_deref())?;
            let modules = scan_modules(&root)?;
            let entries = load_registry_for_check(cli, settings)?;
            let dev = dev_module_ids(&lockfile_path(&root, lockfile.as_deref(), settings))?;
            let feed_source = resolve_optional(feed.as_deref(), settings.general.feed.as_deref());
            let feed = load_update_feed_lenient(feed_source);

            let result = evaluate(&modules, &entries, &ctx, &dev, &feed, &is_external);
            let report = FullCheckReport {
                project_id: ctx.project_id.clone(),
                modules_scanned: modules.len(),
                result,
            };
            audit(
                "check_all",
                serde_json::json!({
                    "project_id": report.project_id,
                    "modules_scanned": report.modules_scanned,
                    "unauthorized": report.result.unauthorized.len(),
                    "security": report.result.security_updates_needed.len(),
                    "below_minimum": report.result.below_minimum_version.len()
                }),
            );
            print_one(cli.json, &report, |r| {
                format!(
                    "scanned {} modules: {} unauthorised, {} security updates, {} below minimum",
                    r.modules_scanned,
                    r.result.unauthorized.len(),
                    r.result.security_updates_needed.len(),
                    r.result.below_minimum_version.len()
                )
            })?;
        }
    }

    Ok(())
}

fn is_external(path: &str) -> bool {
    is_contrib_path(path)
}

/// `--project-id` overrides for this run without persisting; otherwise the
/// stored project record applies.
fn resolve_context(flag: Option<&str>) -> anyhow::Result<ProjectContext> {
    if let Some(id) = flag {
        return Ok(ProjectContext {
            project_id: Some(id.to_string()),
        });
    }
    let state = load_state()?;
    Ok(ProjectContext {
        project_id: state.project_id,
    })
}

/// Registry fetch for check runs degrades to an empty list with a warning:
/// an unreachable registry must not turn into violation reports.
fn load_registry_for_check(
    cli: &Cli,
    settings: &SettingsFile,
) -> anyhow::Result<Vec<crate::domain::models::ReviewEntry>> {
    let source = resolve_registry_source(cli.registry.as_deref(), settings);
    match registry::load_registry(&source) {
        Ok(entries) => Ok(entries),
        Err(e) => {
            eprintln!("warning: registry unavailable, no authorization data: {}", e);
            Ok(Vec::new())
        }
    }
}

fn lockfile_path(root: &Path, flag: Option<&str>, settings: &SettingsFile) -> PathBuf {
    match resolve_optional(flag, settings.general.lockfile.as_deref()) {
        Some(p) => PathBuf::from(p),
        None => root.join("composer.lock"),
    }
}

fn check_unused(
    settings: &SettingsFile,
    root: &Path,
    path_filter: &str,
    lockfile: Option<&str>,
    enabled_config: Option<&str>,
) -> anyhow::Result<UnusedCheckReport> {
    let lock_path = lockfile_path(root, lockfile, settings);
    let lockfile_present = lock_path.exists();
    if !lockfile_present {
        eprintln!(
            "warning: lockfile {} does not exist, showing all disabled modules under {}",
            lock_path.display(),
            path_filter
        );
    }
    let locked = locked_module_ids(&lock_path)?;

    let enabled_path =
        match resolve_optional(enabled_config, settings.general.enabled_config.as_deref()) {
            Some(p) => PathBuf::from(p),
            None => root.join("config/sync/core.extension.yml"),
        };
    if !enabled_path.exists() {
        eprintln!(
            "warning: enabled-modules config {} does not exist, treating all modules as disabled",
            enabled_path.display()
        );
    }
    let enabled = enabled_module_ids(&enabled_path)?;

    let mut unused = Vec::new();
    for module in scan_modules(root)? {
        if !module.path.contains(path_filter) {
            continue;
        }
        if enabled.contains(&module.id) {
            continue;
        }
        // With a lockfile, only cross-referenced modules are reported.
        if !locked.is_empty() && !locked.contains(&module.id) {
            continue;
        }
        unused.push(UnusedModuleFinding {
            module: module.id,
            path: module.path,
        });
    }

    Ok(UnusedCheckReport {
        path: path_filter.to_string(),
        lockfile_present,
        unused,
    })
}
