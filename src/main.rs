//! dicecalc - dice probability calculator

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use dicecalc::dice::{histogram, RollSummary};
use dicecalc::{parse_dice, report, DiceEngine, EngineConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Exploding dice probability calculator
#[derive(Parser, Debug)]
#[command(
    name = "dicecalc",
    version,
    about = "Probabilities and sample rolls for exploding dice notation"
)]
struct Args {
    /// TOML configuration file (defaults to ./dicecalc.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show averages, miss chance and the distribution of a roll
    Stats {
        /// Dice notation, e.g. 3d6v+2, 1d8a, d66
        notation: String,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Roll the dice once
    Roll {
        /// Dice notation, e.g. 3d6v+2, 1d8a, d66
        notation: String,

        /// Seed for a reproducible roll
        #[arg(long)]
        seed: Option<u64>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    // Initialize tracing on stderr so results stay on stdout
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dicecalc=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    if let Some(path) = &args.config {
        if !path.exists() {
            bail!("Config file not found: {}", path.display());
        }
    }
    let config = EngineConfig::load(args.config.as_deref())?;
    let engine = DiceEngine::new(&config);

    match args.command {
        Command::Stats { notation, json } => {
            let roll = parse_dice(&notation)?;
            engine.check_cost(&roll)?;

            let dist = engine.distribution(&roll);
            let summary = RollSummary::from_distribution(notation.trim(), &dist);
            let bars = histogram(&dist, config.display_threshold);
            debug!(bars = bars.len(), "rendering distribution");

            if json {
                let body = serde_json::json!({
                    "roll": roll,
                    "summary": summary,
                    "distribution": dist,
                    "histogram": bars,
                });
                println!("{}", serde_json::to_string_pretty(&body)?);
            } else {
                print!("{}", report::render_summary(&summary));
                println!();
                print!("{}", report::render_histogram(&bars));
            }
        }
        Command::Roll {
            notation,
            seed,
            json,
        } => {
            let roll = parse_dice(&notation)?;
            let result = match seed {
                Some(seed) => engine.try_simulate(&roll, &mut StdRng::seed_from_u64(seed))?,
                None => engine.try_simulate(&roll, &mut rand::rng())?,
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!("{}", roll);
                print!("{}", report::render_roll(&result));
            }
        }
    }

    Ok(())
}
