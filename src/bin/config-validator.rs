//! # Food Footprint Configuration Validator
//!
//! Command-line tool for validating configuration directories across
//! environments before starting the server.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

use food_footprint::config::{ConfigManager, MessagingProviderKind, ResolutionStrategyKind};

#[derive(Parser)]
#[command(name = "config-validator")]
#[command(about = "Validate Food Footprint configuration files")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// Environment to validate (development, test, production, ...)
    #[arg(short, long, default_value = "development")]
    environment: String,

    /// Configuration directory path (default: config)
    #[arg(short, long)]
    config_dir: Option<PathBuf>,

    /// Verbose output level (use multiple times for more verbosity)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Output format for `show` (table, json)
    #[arg(long, default_value = "table")]
    format: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load and validate the configuration
    Validate,

    /// Print the effective configuration with secrets masked
    Show,

    /// List environments that have an override file
    Environments,
}

fn main() {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let _subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .try_init();

    let result = match &cli.command {
        Some(Commands::Validate) | None => validate(&cli),
        Some(Commands::Show) => show(&cli),
        Some(Commands::Environments) => list_environments(&cli),
    };

    match result {
        Ok(()) => {
            info!("Configuration validation completed successfully");
            process::exit(0);
        }
        Err(e) => {
            error!("Configuration validation failed: {}", e);
            eprintln!("Configuration validation failed: {e}");
            process::exit(1);
        }
    }
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    println!("Validating Food Footprint configuration");
    println!("Environment: {}", cli.environment);

    let manager =
        ConfigManager::load_from_directory_with_env(cli.config_dir.clone(), &cli.environment)?;
    let config = manager.config();

    println!("Config Directory: {}", manager.config_directory().display());
    println!();
    println!("  web.bind_address        {}", config.web.bind_address);
    println!("  engine.base_url         {}", config.engine.base_url);
    println!("  engine.impact_method    {}", config.engine.impact_method);
    match config.catalog.strategy {
        ResolutionStrategyKind::Index => println!(
            "  catalog.strategy        index ({})",
            config.catalog.index_url.as_deref().unwrap_or("-")
        ),
        ResolutionStrategyKind::Fuzzy => println!(
            "  catalog.strategy        fuzzy (threshold {})",
            config.catalog.match_threshold
        ),
    }
    match config.messaging.provider {
        MessagingProviderKind::InMemory => println!("  messaging.provider      in_memory"),
        MessagingProviderKind::Pgmq => println!("  messaging.provider      pgmq"),
    }
    println!(
        "  messaging.queues        {} / {}",
        config.messaging.result_queue, config.messaging.dead_letter_queue
    );

    println!();
    println!("All configuration validation checks passed");
    Ok(())
}

fn show(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let manager =
        ConfigManager::load_from_directory_with_env(cli.config_dir.clone(), &cli.environment)?;
    let effective = manager.debug_config();

    match cli.format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&effective)?),
        _ => print_table("", &effective),
    }
    Ok(())
}

fn print_table(prefix: &str, value: &serde_json::Value) {
    match value {
        serde_json::Value::Object(map) => {
            for (key, nested) in map {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                print_table(&path, nested);
            }
        }
        other => println!("{prefix:<40} {other}"),
    }
}

fn list_environments(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let dir = cli
        .config_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from("config"));

    println!("Available environments in {}:", dir.display());
    for env in environment_overrides(&dir)? {
        println!("  - {env}");
    }
    Ok(())
}

fn environment_overrides(dir: &Path) -> std::io::Result<Vec<String>> {
    let mut environments = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let name = entry?.file_name().to_string_lossy().into_owned();
        if let Some(env) = name
            .strip_prefix("food-footprint.")
            .and_then(|rest| rest.strip_suffix(".toml"))
        {
            environments.push(env.to_string());
        }
    }
    environments.sort();
    Ok(environments)
}
