use crate::cli::{Cli, Commands, ProjectCommands, RegistryCommands};
use crate::registry;
use crate::services::output::{print_one, print_out};
use crate::services::settings::{resolve_registry_source, SettingsFile};
use crate::services::storage::{audit, load_state, save_state};

pub fn handle_project_commands(cli: &Cli) -> anyhow::Result<bool> {
    let Commands::Project { command } = &cli.command else {
        return Ok(false);
    };

    match command {
        ProjectCommands::Set { id } => {
            let mut state = load_state()?;
            state.project_id = Some(id.clone());
            save_state(&state)?;
            audit("project_set", serde_json::json!({"project_id": id}));
            print_one(cli.json, &state, |s| {
                format!(
                    "project id set to {}",
                    s.project_id.as_deref().unwrap_or_default()
                )
            })?;
        }
        ProjectCommands::Show => {
            let state = load_state()?;
            print_one(cli.json, &state, |s| match &s.project_id {
                Some(id) => format!("project id: {}", id),
                None => "no project id set".to_string(),
            })?;
        }
        ProjectCommands::Clear => {
            let mut state = load_state()?;
            let had = state.project_id.take();
            save_state(&state)?;
            audit("project_clear", serde_json::json!({"previous": had}));
            print_one(cli.json, &state, |_| "project id cleared".to_string())?;
        }
    }

    Ok(true)
}

pub fn handle_registry_commands(cli: &Cli, settings: &SettingsFile) -> anyhow::Result<bool> {
    let Commands::Registry { command } = &cli.command else {
        return Ok(false);
    };
    let source = resolve_registry_source(cli.registry.as_deref(), settings);

    match command {
        RegistryCommands::List { query } => {
            let entries = registry::load_registry(&source)?;
            let rows = registry::list_entries(&entries, query.as_deref());
            print_out(cli.json, &rows, |e| {
                format!("{}\t{}\t{}", e.name, e.restricted_use, e.version)
            })?;
        }
        RegistryCommands::Show { module } => {
            let entries = registry::load_registry(&source)?;
            let entry = registry::show_entry(&entries, module)?;
            print_one(cli.json, entry, |e| {
                format!(
                    "name: {}\nrestricted_use: {}\nminimum_version: {}",
                    e.name, e.restricted_use, e.version
                )
            })?;
        }
        RegistryCommands::Refresh => {
            if registry::refresh_registry(&source)? {
                audit("registry_refresh", serde_json::json!({"source": source}));
                print_one(cli.json, "refreshed", |_| {
                    "registry cache refreshed".to_string()
                })?;
            } else {
                print_one(cli.json, "local", |_| {
                    "local registry source, nothing to refresh".to_string()
                })?;
            }
        }
    }

    Ok(true)
}
