use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use std::sync::Arc;

mod cli;

use cli::Cli;
use console_menu::config::Config;
use console_menu::console::TerminalConsole;
use console_menu::menu::{MenuController, MenuRegistry, ServiceCollection};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Log to a file (truncated on each run) so log lines never mix with the menus
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&cli.log_file)
        .with_context(|| format!("Failed to open log file: {:?}", cli.log_file))?;
    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .init();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let config = Arc::new(config);
    info!("Starting console-menu with menu '{}'", cli.menu);

    let mut services = ServiceCollection::new();
    cli::items::register_services(&mut services, config.clone());

    let mut registry = MenuRegistry::new();
    cli::items::register_menus(&mut registry)?;
    info!("Registered menus: {:?}", registry.menu_names());

    let controller = MenuController::new(
        Arc::new(registry),
        Arc::new(services.build()),
        Arc::new(TerminalConsole::new()),
    )
    .with_settings(config.menu.clone());

    controller
        .display_menu(&cli.menu, &cli.title, cli.breadcrumb)
        .await?;

    println!("Done!");
    Ok(())
}
