use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "modaudit", version, about = "Site module compliance auditor")]
pub struct Cli {
    #[arg(long, global = true, help = "Output machine-readable JSON")]
    pub json: bool,
    #[arg(
        long,
        global = true,
        default_value = ".",
        help = "Site install root to scan for module manifests"
    )]
    pub root: String,
    #[arg(
        long,
        global = true,
        help = "Module-review registry source (url or local json file)"
    )]
    pub registry: Option<String>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Check {
        #[command(subcommand)]
        command: CheckCommands,
    },
    Registry {
        #[command(subcommand)]
        command: RegistryCommands,
    },
    Project {
        #[command(subcommand)]
        command: ProjectCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum CheckCommands {
    /// Report modules not authorized by the review registry, plus pending
    /// security updates.
    Authorized {
        #[arg(long)]
        project_id: Option<String>,
        #[arg(long)]
        lockfile: Option<String>,
        #[arg(long, help = "Security-update feed source (url or local json file)")]
        feed: Option<String>,
    },
    /// Report modules below the registry's minimum accepted version.
    MinVersion {
        #[arg(long)]
        project_id: Option<String>,
        #[arg(long)]
        lockfile: Option<String>,
    },
    /// Report modules present in code but not enabled on the site.
    Unused {
        #[arg(long, default_value = "modules/contrib")]
        path: String,
        #[arg(long)]
        lockfile: Option<String>,
        #[arg(long, help = "Enabled-modules config (core.extension.yml)")]
        enabled_config: Option<String>,
    },
    /// Run every classification and emit the combined report.
    All {
        #[arg(long)]
        project_id: Option<String>,
        #[arg(long)]
        lockfile: Option<String>,
        #[arg(long)]
        feed: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum RegistryCommands {
    List {
        #[arg(long)]
        query: Option<String>,
    },
    Show {
        module: String,
    },
    Refresh,
}

#[derive(Subcommand, Debug)]
pub enum ProjectCommands {
    Set { id: String },
    Show,
    Clear,
}
