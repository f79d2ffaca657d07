mod distance;
mod recovery;
mod stats;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use stab_common::{DecodingModel, ErrorModel, SolverConfig};
use std::time::Duration;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "stab_host", about = "Integer-program decoding of stabilizer codes")]
struct Cli {
    /// Raise the default log level to debug and show solver summaries
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Monte-Carlo logical failure rate for each error weight
    Recovery {
        #[arg(short, long)]
        stabilizers: String,
        #[arg(short, long)]
        logicals: String,
        #[arg(short, long)]
        isf: String,
        /// Stabilizer rows hold only one Pauli type
        #[arg(long)]
        css: bool,
        #[arg(long, default_value = "xz")]
        error_model: ErrorModel,
        #[arg(long, default_value = "xz")]
        decoding_model: DecodingModel,
        /// Logical rows checked after each decode
        #[arg(long, value_delimiter = ',', default_value = "0")]
        test_logicals: Vec<usize>,
        #[arg(long, default_value_t = 100)]
        samples: usize,
        #[arg(long, default_value_t = 6)]
        max_weight: usize,
        #[arg(long, default_value_t = 1)]
        threads: usize,
        /// Per-decode time limit in seconds
        #[arg(long)]
        time_limit: Option<f64>,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        /// Append result lines to this file as well as stdout
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Bit and word distance of each logical operator
    Distance {
        #[arg(short, long)]
        stabilizers: String,
        #[arg(short, long)]
        logicals: String,
        /// Logical rows to analyse (all when omitted)
        #[arg(long, value_delimiter = ',')]
        which: Vec<usize>,
        #[arg(long, default_value_t = 1)]
        threads: usize,
        /// Per-decode time limit in seconds
        #[arg(long)]
        time_limit: Option<f64>,
    },
}

fn solver_config(threads: usize, verbose: bool, time_limit: Option<f64>) -> Result<SolverConfig> {
    let time_limit = time_limit
        .map(Duration::try_from_secs_f64)
        .transpose()
        .context("Invalid time limit")?;
    Ok(SolverConfig {
        threads,
        verbose,
        time_limit,
    })
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    match cli.command {
        Commands::Recovery {
            stabilizers,
            logicals,
            isf,
            css,
            error_model,
            decoding_model,
            test_logicals,
            samples,
            max_weight,
            threads,
            time_limit,
            seed,
            output,
        } => {
            let run = recovery::RecoveryRun {
                stabilizers,
                logicals,
                isf,
                css,
                error_model,
                decoding_model,
                test_logicals,
                samples,
                max_weight,
                seed,
                output,
                solver: solver_config(threads, cli.verbose, time_limit)?,
            };
            recovery::run_recovery(&run)?;
        }
        Commands::Distance {
            stabilizers,
            logicals,
            which,
            threads,
            time_limit,
        } => {
            let config = solver_config(threads, cli.verbose, time_limit)?;
            distance::run_distance(&stabilizers, &logicals, &which, &config)?;
        }
    }
    Ok(())
}
