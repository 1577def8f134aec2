use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Local;
use clap::{Args, Parser, Subcommand};
use pulsemap_core::{mobility, vitals, AnalysisConfig, ConfigOverrides, OutputDir};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Exploratory analysis of vitals and ride pickups", long_about = None)]
struct Cli {
    #[command(flatten)]
    options: GlobalArgs,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate, analyze and chart the blood pressure sample
    Vitals,
    /// Generate, cluster and map synthetic ride pickups
    Mobility,
    /// Run both pipelines
    All,
}

#[derive(Args, Debug, Default)]
struct GlobalArgs {
    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Directory the artifacts are written to
    #[arg(long, global = true)]
    output_dir: Option<PathBuf>,
    /// Seed for pickup generation and cluster initialization
    #[arg(long, global = true)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli.options)?;
    let output = OutputDir::create(&config.output_dir).with_context(|| {
        format!(
            "failed to prepare output directory {}",
            config.output_dir.display()
        )
    })?;

    match cli.command {
        Command::Vitals => run_vitals(&config, &output),
        Command::Mobility => run_mobility(&config, &output),
        Command::All => {
            run_vitals(&config, &output)?;
            run_mobility(&config, &output)
        }
    }
}

fn load_config(args: &GlobalArgs) -> Result<AnalysisConfig> {
    let overrides = ConfigOverrides {
        output_dir: args.output_dir.clone(),
        seed: args.seed,
    };

    AnalysisConfig::resolve(
        args.config.as_deref(),
        |key| std::env::var(key).ok(),
        &overrides,
    )
    .with_context(|| match &args.config {
        Some(path) => format!("failed to load configuration from {}", path.display()),
        None => "invalid configuration".to_string(),
    })
}

fn run_vitals(config: &AnalysisConfig, output: &OutputDir) -> Result<()> {
    let report = vitals::run(&config.vitals, output).context("vitals pipeline failed")?;
    println!("{}", report.summary);
    info!(files = report.artifacts.files.len(), "vitals pipeline finished");
    Ok(())
}

fn run_mobility(config: &AnalysisConfig, output: &OutputDir) -> Result<()> {
    let now = Local::now().naive_local();
    let report =
        mobility::run(&config.mobility, output, now).context("mobility pipeline failed")?;

    println!("Cluster Centers (Hotspots):");
    for center in &report.model.centers {
        println!("  [{:.6}, {:.6}]", center[0], center[1]);
    }
    info!(files = report.artifacts.files.len(), "mobility pipeline finished");
    Ok(())
}
