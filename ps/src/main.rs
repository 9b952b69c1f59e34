use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::info;

use prefstore::PreferenceStore;
use prefstore::cli::{Cli, Command, parse_value};
use prefstore::config::Config;

fn setup_logging() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    setup_logging().context("Failed to setup logging")?;

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    let store_path = cli.store.unwrap_or(config.store_path);

    info!("prefstore using {}", store_path.display());
    let mut store = PreferenceStore::open(&store_path);

    match cli.command {
        Command::Show => {
            if store.is_empty() {
                println!("No preferences stored");
            } else {
                println!("{}", serde_json::to_string_pretty(&store.all())?);
            }
        }
        Command::Get { key } => match store.get(&key) {
            Some(value) => println!("{}", value),
            None => println!("{} {} is not set", "✗".red(), key.yellow()),
        },
        Command::Set { key, value } => {
            store.set(&key, parse_value(&value)).context("Failed to save preferences")?;
            println!("{} Set {}", "✓".green(), key.cyan());
        }
        Command::Clear => {
            store.clear().context("Failed to save preferences")?;
            println!("{} Cleared {}", "✓".green(), store_path.display());
        }
    }

    Ok(())
}
