//! Load command implementation

use super::GlobalArgs;
use anyhow::Result;
use clap::Args;

/// Load services into the container and list what is bound
#[derive(Args, Debug)]
pub struct LoadArgs {
    /// Services to load (default: the configured autoload list)
    names: Vec<String>,
}

/// Execute the load command
pub fn execute(global: &GlobalArgs, args: LoadArgs) -> Result<()> {
    let mut ctx = super::setup(global)?;

    let names = if args.names.is_empty() {
        ctx.config.container.autoload.clone()
    } else {
        args.names
    };

    if names.is_empty() {
        println!("Nothing to load (no names given and no autoload configured)");
        return Ok(());
    }

    // A load failure carries its own exit status; main maps it
    ctx.container.start(&names)?;
    ctx.container.list();
    Ok(())
}
