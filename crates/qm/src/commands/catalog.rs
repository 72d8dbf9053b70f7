//! Catalog command implementation

use super::GlobalArgs;
use anyhow::Result;
use clap::Args;

/// List the services available to load
#[derive(Args, Debug)]
pub struct CatalogArgs {}

/// Execute the catalog command
pub fn execute(global: &GlobalArgs, _args: CatalogArgs) -> Result<()> {
    let mut ctx = super::setup(global)?;

    // Pull in everything under the services root so discovered libraries
    // show up next to the built-ins
    ctx.container.catalog_mut().load_all_external()?;

    let catalog = ctx.container.catalog();
    if catalog.is_empty() {
        println!("No services available");
        return Ok(());
    }

    for name in catalog.names() {
        match catalog.get(name) {
            Some(factory) => println!("- {name}: {}", factory.description),
            None => println!("- {name}"),
        }
    }
    Ok(())
}
