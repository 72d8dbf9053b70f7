//! qm - a container for dynamically loaded services
//!
//! A thin CLI over quartermaster-core: load services into the container,
//! inspect what is available, and drive the built-in mail service.

use clap::Parser;
use quartermaster_core::container::LoadError;

mod commands;

use commands::Cli;

fn main() {
    let cli = Cli::parse();
    quartermaster_core::logging::init();

    if let Err(e) = cli.execute() {
        // Load failures already narrated through the container; just map
        // them to their exit status (1 duplicate, 2 not found)
        if let Some(load_err) = e.downcast_ref::<LoadError>() {
            std::process::exit(load_err.exit_code());
        }
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
