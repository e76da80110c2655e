//! # skillcast
//!
//! Command-line interface for the skill demand forecasting pipeline.

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use pipeline_facade::prelude::*;
use pipeline_facade::{Dashboard, DashboardRow, RecordCounts};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "skillcast")]
#[command(about = "Forecast daily demand for skills mentioned in job postings", long_about = None)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct GlobalArgs {
    /// TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Seed for predictive sampling
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Days to forecast past the last observation
    #[arg(long, global = true)]
    horizon: Option<usize>,

    /// Worker threads for extraction and forecasting
    #[arg(long, global = true)]
    workers: Option<usize>,

    /// Clip negative estimates and bounds to zero
    #[arg(long, global = true)]
    clip_negative: bool,

    /// Print reports as JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract skills from the postings corpus
    Preprocess,

    /// Build per-skill daily series from extracted records
    Series,

    /// Forecast every series in the series directory
    Train,

    /// Run all stages end to end
    Run,

    /// Show the forecast table for a skill, or list available skills
    Show {
        /// Skill to display
        skill: Option<String>,
    },
}

fn init_tracing(verbose: u8) {
    let fallback = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| fallback.into()),
        )
        .init();
}

/// Load the configuration file, if any, and apply command-line overrides
fn load_config(args: &GlobalArgs) -> anyhow::Result<PipelineConfig> {
    let mut config = match &args.config {
        Some(path) => PipelineConfig::from_toml_file(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => PipelineConfig::default(),
    };

    if let Some(seed) = args.seed {
        config.forecast.seed = seed;
    }
    if let Some(horizon) = args.horizon {
        config.horizon_days = horizon;
    }
    if let Some(workers) = args.workers {
        config.workers = Some(workers);
    }
    if args.clip_negative {
        config.forecast.clip_negative = true;
    }

    config.validate().context("invalid configuration")?;
    Ok(config)
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_counts(counts: &RecordCounts) {
    println!("Records read:        {}", counts.read);
    println!("  missing text:      {}", counts.dropped_missing);
    println!("  bad date:          {}", counts.dropped_bad_date);
    println!("  duplicate:         {}", counts.dropped_duplicate);
    println!("  no known skill:    {}", counts.dropped_no_skill);
    println!("Records kept:        {}", counts.kept);
}

fn print_outcomes(outcomes: &[SkillOutcome]) {
    for outcome in outcomes {
        match outcome {
            SkillOutcome::Forecasted { skill, rows, path } => {
                println!("{:<24} {:<10} {} rows -> {}", skill, outcome.state().as_str(), rows, path.display())
            }
            SkillOutcome::Skipped { skill, reason } => {
                println!("{:<24} {:<10} {}", skill, outcome.state().as_str(), reason)
            }
            SkillOutcome::Failed { skill, error } => {
                println!("{:<24} {:<10} {}", skill, outcome.state().as_str(), error)
            }
        }
    }
}

fn print_table(skill: &str, rows: &[DashboardRow]) {
    println!("Skill: {skill}");
    println!(
        "{:<12} {:>8} {:>12} {:>12} {:>12}",
        "date", "actual", "estimate", "lower", "upper"
    );
    for row in rows {
        let actual = row.actual.map(|a| a.to_string()).unwrap_or_default();
        println!(
            "{:<12} {:>8} {:>12.3} {:>12.3} {:>12.3}",
            row.date.to_string(),
            actual,
            row.estimate,
            row.lower_bound,
            row.upper_bound
        );
    }
}

fn run_preprocess(orchestrator: &Orchestrator, json: bool) -> anyhow::Result<()> {
    let (records, counts) = orchestrator.preprocess()?;
    orchestrator.write_records(&records)?;
    if json {
        return print_json(&counts);
    }
    print_counts(&counts);
    println!(
        "Records written to {}",
        orchestrator.config().records_path.display()
    );
    Ok(())
}

fn run_series(orchestrator: &Orchestrator, json: bool) -> anyhow::Result<()> {
    let records = orchestrator.read_records()?;
    let (series, failed) = orchestrator.build_series(&records);
    if json {
        let summary: Vec<_> = series
            .values()
            .map(|s| {
                serde_json::json!({
                    "skill": s.skill(),
                    "days": s.len(),
                    "mentions": s.total(),
                })
            })
            .collect();
        return print_json(&serde_json::json!({ "series": summary, "failed": failed }));
    }
    for s in series.values() {
        println!("{:<24} {:>6} days {:>8} mentions", s.skill(), s.len(), s.total());
    }
    print_outcomes(&failed);
    println!(
        "{} series written to {}",
        series.len(),
        orchestrator.config().series_dir.display()
    );
    Ok(())
}

fn run_train(orchestrator: &Orchestrator, json: bool) -> anyhow::Result<()> {
    let outcomes = orchestrator.forecast_directory()?;
    if json {
        return print_json(&outcomes);
    }
    print_outcomes(&outcomes);
    Ok(())
}

fn run_all(orchestrator: &Orchestrator, json: bool) -> anyhow::Result<()> {
    let report = orchestrator.run()?;
    if json {
        return print_json(&report);
    }
    print_counts(&report.records);
    println!();
    print_outcomes(&report.outcomes);
    println!(
        "\n{} forecasted, {} skipped, {} failed",
        report.forecasted(),
        report.skipped(),
        report.failed()
    );
    Ok(())
}

fn run_show(config: &PipelineConfig, skill: Option<String>, json: bool) -> anyhow::Result<()> {
    let mut dashboard = Dashboard::new(CsvArtifactStore::from_config(config));

    let Some(skill) = skill else {
        let skills = dashboard.skills()?;
        if json {
            return print_json(&skills);
        }
        if skills.is_empty() {
            println!("No forecasts in {}", config.forecast_dir.display());
        }
        for skill in skills {
            println!("{skill}");
        }
        return Ok(());
    };

    let Some(rows) = dashboard.view(&skill)? else {
        bail!(
            "no forecast for '{}' in {}",
            skill,
            config.forecast_dir.display()
        );
    };
    if json {
        return print_json(&rows);
    }
    print_table(&skill, &rows);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.global.verbose);

    let config = load_config(&cli.global)?;
    let json = cli.global.json;
    info!(
        corpus = %config.corpus_path.display(),
        forecast_dir = %config.forecast_dir.display(),
        "configuration loaded"
    );

    match cli.command {
        Commands::Preprocess => run_preprocess(&Orchestrator::new(config), json),
        Commands::Series => run_series(&Orchestrator::new(config), json),
        Commands::Train => run_train(&Orchestrator::new(config), json),
        Commands::Run => run_all(&Orchestrator::new(config), json),
        Commands::Show { skill } => run_show(&config, skill, json),
    }
}
