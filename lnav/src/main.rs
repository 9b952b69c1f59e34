//! LifeNav - personalized daily plan generator
//!
//! CLI entry point.

use std::fs;
use std::path::PathBuf;

use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use tracing::info;

use lifenav::calendar::{CalendarMerger, CalendarSource, FileCalendar, SampleCalendar};
use lifenav::cli::{Cli, Command, PlanArgs, get_log_path};
use lifenav::config::{Config, Mode};
use lifenav::domain::{BehavioralProfile, Profile, sample_tasks};
use lifenav::generators::DelegatedGenerator;
use lifenav::input;
use lifenav::llm::create_client;
use lifenav::orchestrator::{Engine, Orchestrator};
use lifenav::prompts::PromptLoader;
use prefstore::PreferenceStore;

fn setup_logging(level: &str) -> Result<()> {
    let log_path = get_log_path();
    if let Some(log_dir) = log_path.parent() {
        fs::create_dir_all(log_dir).context("Failed to create log directory")?;
    }

    // Write to the log file, not stdout/stderr
    let log_file = fs::File::create(&log_path).context("Failed to create log file")?;
    let directive = level
        .parse::<tracing_subscriber::filter::Directive>()
        .context(format!("Invalid log level: {}", level))?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(directive))
        .init();

    info!("Logging initialized (level: {})", level);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    let level = cli
        .log_level
        .clone()
        .or_else(|| config.log_level.clone())
        .unwrap_or_else(|| "info".to_string());
    setup_logging(&level).context("Failed to setup logging")?;

    info!(mode = %config.mode, provider = %config.llm.provider, "LifeNav loaded config");

    match cli.command {
        Command::Plan(args) => cmd_plan(config, args).await,
        Command::Profile { profile } => cmd_profile(profile),
        Command::Config => cmd_config(&config),
    }
}

/// Run the pipeline and report where the plan went
async fn cmd_plan(mut config: Config, args: PlanArgs) -> Result<()> {
    if let Some(mode) = args.mode {
        config.mode = mode;
    }
    config.validate()?;

    let store_path = args.store.unwrap_or_else(|| config.storage.preferences_path.clone());
    let store = PreferenceStore::open(&store_path);

    let profile = if let Some(path) = &args.profile {
        input::load_profile(path)
    } else if args.interactive {
        input::interactive_profile()?
    } else if args.from_store {
        input::profile_from_store(&store.all())
    } else {
        info!("No profile source given, using sample profile");
        Profile::sample()
    };

    let tasks = match &args.tasks {
        Some(path) => input::load_tasks(path)?,
        None => sample_tasks(),
    };

    let calendar_source = args.calendar.unwrap_or_else(|| config.calendar.source.clone());
    let calendar = CalendarMerger::new(calendar_from(&calendar_source));

    let engine = match config.mode {
        Mode::Rules => Engine::RuleBased,
        Mode::Delegated => {
            let resolved = config.llm.resolve()?;
            let client = create_client(&resolved)?;
            let cwd = std::env::current_dir().context("Failed to read current directory")?;
            Engine::Delegated(DelegatedGenerator::new(client, PromptLoader::new(cwd), resolved.max_tokens))
        }
    };

    let output = args.output.unwrap_or_else(|| config.output.path.clone());
    let mut orchestrator = Orchestrator::new(store, calendar, engine);
    let outcome = orchestrator.run(profile, tasks, &output).await?;

    println!(
        "{} Plan saved to: {}",
        "✓".green(),
        outcome.saved_path.display().to_string().cyan()
    );
    Ok(())
}

fn calendar_from(source: &str) -> Box<dyn CalendarSource> {
    if source.eq_ignore_ascii_case("sample") {
        Box::new(SampleCalendar)
    } else {
        Box::new(FileCalendar::new(PathBuf::from(source)))
    }
}

/// Print the behavioral tags for a profile
fn cmd_profile(path: Option<PathBuf>) -> Result<()> {
    let profile = match path {
        Some(path) => input::load_profile(&path),
        None => Profile::sample(),
    };
    let behavioral = BehavioralProfile::derive(&profile);

    println!("{}", format!("Behavioral profile for {}", profile.name).bold());
    for (key, value) in behavioral.tags() {
        println!("  {:<20} {}", key.cyan(), value);
    }
    Ok(())
}

fn cmd_config(config: &Config) -> Result<()> {
    let yaml = serde_yaml::to_string(config).context("Failed to serialize configuration")?;
    print!("{}", yaml);
    Ok(())
}
