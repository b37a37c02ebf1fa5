//! Glide CLI
//!
//! Replay slider scenarios and validate host attribute sets.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use glide_core::SliderConfig;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod scenario;

use scenario::Scenario;

#[derive(Parser)]
#[command(name = "glide")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Glide slide navigator CLI", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a scenario file and print every emitted event
    Simulate {
        /// Scenario file (TOML)
        scenario: PathBuf,

        /// Print events as JSON lines
        #[arg(long)]
        json: bool,
    },

    /// Resolve host attributes (`data-per-view=2 ...`) into a configuration
    Check {
        /// Attributes as key=value pairs
        #[arg(required = true)]
        attributes: Vec<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    match cli.command {
        Commands::Simulate { scenario, json } => cmd_simulate(&scenario, json),
        Commands::Check { attributes } => cmd_check(&attributes),
    }
}

fn cmd_simulate(path: &Path, json: bool) -> Result<()> {
    let scenario = Scenario::load(path)?;
    info!(
        "Simulating '{}' ({} slides, {} steps)",
        scenario.id,
        scenario.slides,
        scenario.steps.len()
    );

    for recorded in scenario.run()? {
        let at_ms = recorded.at.as_millis();
        if json {
            let line = serde_json::json!({ "atMs": at_ms, "event": recorded.event });
            println!("{}", serde_json::to_string(&line)?);
        } else {
            println!("[{:>7}ms] {}", at_ms, recorded.event);
        }
    }

    Ok(())
}

fn cmd_check(pairs: &[String]) -> Result<()> {
    let mut attributes = HashMap::new();
    for pair in pairs {
        let (key, value) = pair
            .split_once('=')
            .with_context(|| format!("Expected key=value, got '{}'", pair))?;
        attributes.insert(key.trim().to_string(), value.trim().to_string());
    }
    let lookup = |name: &str| attributes.get(name).map(String::as_str);

    let (config, mut diagnostics) = SliderConfig::from_attributes(lookup);
    let (config, normalized) = config.normalized();
    diagnostics.extend(normalized);

    print!("{}", toml::to_string_pretty(&config)?);
    for diagnostic in &diagnostics {
        println!("warning: {}", diagnostic);
    }

    SliderConfig::parse_attributes(lookup).context("Invalid slider attributes")?;
    Ok(())
}
