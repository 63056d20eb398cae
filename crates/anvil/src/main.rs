//! # Anvil
//!
//! Runs a crafting session from the command line.
//!
//! ```bash
//! # Craft a sword, then a shield
//! anvil data/session.toml Sword Shield
//!
//! # With resolver logging
//! RUST_LOG=anvil_crafting=debug anvil data/session.toml Sword
//! ```
//!
//! Prints one outcome line per craft, then the inventory left over.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anvil_crafting::{CraftResult, SessionConfig};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const USAGE: &str = "usage: anvil <session.toml> <recipe>...";

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let mut args = std::env::args().skip(1);
    let Some(config_path) = args.next().map(PathBuf::from) else {
        eprintln!("{USAGE}");
        return ExitCode::from(2);
    };
    let recipes: Vec<String> = args.collect();

    match run(&config_path, &recipes) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(config_path: &Path, recipes: &[String]) -> CraftResult<()> {
    let mut crafter = SessionConfig::from_file(config_path)?.build()?;
    info!(config = %config_path.display(), crafts = recipes.len(), "session started");

    if recipes.is_empty() {
        println!("Recipes:");
        for recipe in crafter.catalog().sorted_by_name() {
            println!(
                "  {} ({:.0}% success)",
                recipe.name(),
                recipe.success_rate() * 100.0
            );
        }
    }

    for name in recipes {
        println!("{}", crafter.craft(name));
    }

    println!("Inventory:");
    for stack in crafter.inventory().stacks() {
        println!("  {} x{}", stack.material, stack.quantity);
    }

    Ok(())
}
