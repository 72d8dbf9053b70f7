//! Info command implementation

use super::GlobalArgs;
use anyhow::Result;
use clap::Args;

/// Show a service's identity, requirements, and operations
#[derive(Args, Debug)]
pub struct InfoArgs {
    /// Service to describe
    service: String,

    /// Help topic to show instead of the overview (e.g. "scope")
    topic: Option<String>,
}

/// Execute the info command
pub fn execute(global: &GlobalArgs, args: InfoArgs) -> Result<()> {
    let mut ctx = super::setup(global)?;

    // Resolution failure here carries the same exit status as a failed
    // load; report it ourselves since no load narration ran
    let factory = ctx
        .container
        .catalog_mut()
        .resolve(&args.service)
        .inspect_err(|e| eprintln!("{e}"))?;
    let service = (factory.construct)();

    if let Some(topic) = &args.topic {
        match service.help(topic) {
            Some(text) => print!("{text}"),
            None => println!("No help available for topic '{topic}'"),
        }
        return Ok(());
    }

    let info = service.info();
    println!("{} {} - {}", info.name, info.version, info.description);

    let requirements = service.requirements();
    if !requirements.is_empty() {
        println!();
        println!("Requirements:");
        for (i, requirement) in requirements.iter().enumerate() {
            println!("  {}. {requirement}", i + 1);
        }
    }

    let operations = service.operations();
    if !operations.is_empty() {
        println!();
        println!("Operations:");
        for op in operations {
            println!("  {}", op.signature());
            if !op.doc.is_empty() {
                println!("      {}", op.doc);
            }
        }
    }

    Ok(())
}
