//! CLI argument parsing for prefstore

use clap::{Parser, Subcommand};
use serde_json::Value;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "prefstore")]
#[command(author, version, about = "Inspect and edit stored LifeNav preferences", long_about = None)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Preference document to operate on (overrides config)
    #[arg(short, long)]
    pub store: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print every stored preference as JSON
    Show,

    /// Print a single preference
    Get {
        /// Preference key
        #[arg(required = true)]
        key: String,
    },

    /// Set a preference (value parsed as JSON, falling back to a plain string)
    Set {
        /// Preference key
        #[arg(required = true)]
        key: String,

        /// Preference value
        #[arg(required = true)]
        value: String,
    },

    /// Remove every stored preference
    Clear,
}

/// Parse a `set` value as JSON, falling back to a plain string
pub fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_values_keep_their_type() {
        assert_eq!(parse_value("42"), json!(42));
        assert_eq!(parse_value("true"), json!(true));
        assert_eq!(parse_value(r#"["oats", "milk"]"#), json!(["oats", "milk"]));
        assert_eq!(parse_value(r#""quoted""#), json!("quoted"));
    }

    #[test]
    fn test_non_json_falls_back_to_string() {
        assert_eq!(parse_value("06:30"), json!("06:30"));
        assert_eq!(parse_value("hello world"), json!("hello world"));
        assert_eq!(parse_value(""), json!(""));
    }

    #[test]
    fn test_set_command_parses() {
        let cli = Cli::try_parse_from(["prefstore", "set", "wake_time", "06:30"]).unwrap();
        match cli.command {
            Command::Set { key, value } => {
                assert_eq!(key, "wake_time");
                assert_eq!(parse_value(&value), json!("06:30"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
