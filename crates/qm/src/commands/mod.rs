//! CLI command dispatch and execution

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use quartermaster_core::config::{self, Config, ConfigOverrides};
use quartermaster_core::container::Container;
use quartermaster_core::home::get_home_dir;
use quartermaster_core::services;
use std::path::PathBuf;

mod catalog;
mod info;
mod load;
mod send;

/// qm - a container for dynamically loaded services
#[derive(Parser, Debug)]
#[command(
    name = "qm",
    version,
    about = "A container for dynamically loaded services",
    long_about = "Loads named services (built-ins or dynamic libraries under the services \
                  root) into a registry and drives them from the command line"
)]
pub struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Flags shared by every subcommand
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Use this config file instead of the discovered ones
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Directory holding external service libraries
    #[arg(long, global = true, value_name = "PATH")]
    services_root: Option<PathBuf>,

    /// Narrate each load ("Loading <name>... ok")
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Abort on the first load failure instead of continuing
    #[arg(long, global = true)]
    no_keep_alive: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Load services into the container and list what is bound
    Load(load::LoadArgs),

    /// List the services available to load
    Catalog(catalog::CatalogArgs),

    /// Show a service's identity, requirements, and operations
    Info(info::InfoArgs),

    /// Send an email through the mail service
    Send(send::SendArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        match self.command {
            Commands::Load(args) => load::execute(&self.global, args),
            Commands::Catalog(args) => catalog::execute(&self.global, args),
            Commands::Info(args) => info::execute(&self.global, args),
            Commands::Send(args) => send::execute(&self.global, args),
        }
    }
}

/// Everything a command needs: resolved config, its home dir, a container
pub struct CommandContext {
    pub config: Config,
    pub home_dir: PathBuf,
    pub container: Container,
}

/// Resolve configuration and build the container for it
pub fn setup(global: &GlobalArgs) -> Result<CommandContext> {
    let home_dir = get_home_dir()?;
    let current_dir = std::env::current_dir()?;

    let overrides = ConfigOverrides {
        verbose: global.verbose.then_some(true),
        keep_alive: global.no_keep_alive.then_some(false),
        services_root: global.services_root.clone(),
        config_path: global.config.clone(),
    };

    let config = config::resolve_config(&overrides, &current_dir, &home_dir)?;

    let services_root = config::effective_services_root(&config, &home_dir);
    let catalog = services::catalog_with_builtins(Some(services_root));

    let mut container = Container::new(catalog);
    container.set_verbose(config.container.verbose);
    container.set_keep_alive(config.container.keep_alive);

    Ok(CommandContext {
        config,
        home_dir,
        container,
    })
}
