use clap::Parser;

mod cli;
mod commands;
mod domain;
mod registry;
mod services;

use cli::Cli;

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        services::output::print_err(cli.json, &e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let settings = services::settings::load_settings()?;

    if commands::handle_project_commands(cli)? {
        return Ok(());
    }
    if commands::handle_registry_commands(cli, &settings)? {
        return Ok(());
    }
    commands::handle_check_commands(cli, &settings)
}
