//! kora-cli — Score verified fan engagement histories from the command line.
//!
//! Reads a JSON action history, computes the conviction score, and prints
//! either the score record or the downstream export payload as JSON. The
//! clock is read here, once per invocation; the libraries stay pure.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use tracing::{info, warn};

use kora_core::action::ConvictionAction;
use kora_core::traits::ConvictionCalculator;
use kora_engine::{ConvictionEngine, ScoringParams};
use kora_export::{EXPORT_FORMAT, export_record};

mod config;
use config::Config;

/// Conviction scoring for verified fan engagement.
#[derive(Parser)]
#[command(name = "kora-cli")]
#[command(version, about = "Conviction scoring for verified fan engagement.")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute a conviction score from an action history.
    Score(ScoreArgs),
    /// Compute a score and format it as the downstream export payload.
    Export(ExportArgs),
}

#[derive(Args)]
struct ScoreArgs {
    /// Path to a JSON file containing an array of actions.
    #[arg(short, long)]
    input: PathBuf,

    /// Weekly decay fraction (default: KORA_DECAY_RATE or 0.10).
    #[arg(long)]
    decay_rate: Option<f64>,

    /// Lookback window in days (default: KORA_LOOKBACK_DAYS or 90).
    #[arg(long)]
    lookback_days: Option<u32>,

    /// Scoring instant, RFC 3339 (default: current UTC time).
    #[arg(long)]
    now: Option<DateTime<Utc>>,
}

#[derive(Args)]
struct ExportArgs {
    #[command(flatten)]
    score: ScoreArgs,

    /// Subject identifier stamped on the export record.
    #[arg(short, long)]
    subject: String,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::from_env().context("Failed to load configuration")?;

    match cli.command {
        Commands::Score(args) => run_score(&config, args),
        Commands::Export(args) => run_export(&config, args),
    }
}

fn run_score(config: &Config, args: ScoreArgs) -> Result<()> {
    let (record, _) = compute(config, &args)?;
    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}

fn run_export(config: &Config, args: ExportArgs) -> Result<()> {
    let (record, now) = compute(config, &args.score)?;
    let payload = export_record(&args.subject, &record, now);
    let wrapped = serde_json::json!({
        "export_format": EXPORT_FORMAT,
        "data": payload,
    });
    println!("{}", serde_json::to_string_pretty(&wrapped)?);
    Ok(())
}

fn compute(
    config: &Config,
    args: &ScoreArgs,
) -> Result<(kora_core::score::ConvictionScore, DateTime<Utc>)> {
    let now = args.now.unwrap_or_else(Utc::now);
    let actions = load_actions(&args.input)?;

    let params = ScoringParams {
        decay_rate: args.decay_rate.unwrap_or(config.decay_rate),
        lookback_days: args.lookback_days.unwrap_or(config.lookback_days),
    };
    let engine = ConvictionEngine::new(params).context("Invalid scoring parameters")?;

    let record = engine
        .score(&actions, now)
        .context("Failed to score action history")?;

    info!(
        actions = actions.len(),
        included = record.action_count,
        score = record.score,
        tier = %record.tier,
        streak_days = record.streak_days,
        "Scored action history"
    );
    if record.score > 0.0 && record.score < config.min_threshold {
        warn!(
            score = record.score,
            threshold = config.min_threshold,
            "Score is below the meaningful-engagement threshold"
        );
    }

    Ok((record, now))
}

fn load_actions(path: &Path) -> Result<Vec<ConvictionAction>> {
    let data = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read action history at {}", path.display()))?;
    serde_json::from_str(&data)
        .with_context(|| format!("Invalid action history JSON in {}", path.display()))
}
