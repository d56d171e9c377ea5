//! Command-line arguments.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use ising_sim::InitMode;

/// Metropolis Monte Carlo for the 2D Ising model (periodic N×N lattice, zero field).
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// TOML file with default parameters; flags given here override it
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Raise log verbosity (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log warnings and hide the progress bar
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Print the result as JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run one chain and print its sampled time series
    Run(RunArgs),
    /// Run one independent chain per temperature of a linear ladder
    Sweep(SweepArgs),
}

/// Parameters shared by every chain.
#[derive(clap::Args, Debug, Default)]
pub struct ChainArgs {
    /// Lattice edge length N
    #[arg(short = 'n', long)]
    pub size: Option<usize>,

    /// Number of Metropolis steps (single-spin proposals)
    #[arg(short = 'i', long)]
    pub n_iter: Option<usize>,

    /// Record a sample every this many steps
    #[arg(short = 'd', long)]
    pub sample_interval: Option<usize>,

    /// Seed of the random source
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Starting lattice: random, up, or down
    #[arg(long, value_parser = parse_init)]
    pub init: Option<InitMode>,

    /// Track sample autocorrelation up to this lag
    #[arg(long)]
    pub autocorrelation_max_lag: Option<usize>,
}

#[derive(clap::Args, Debug)]
pub struct RunArgs {
    #[command(flatten)]
    pub chain: ChainArgs,

    /// Temperature in units of J/k_B
    #[arg(short, long)]
    pub temperature: Option<f64>,
}

#[derive(clap::Args, Debug)]
pub struct SweepArgs {
    #[command(flatten)]
    pub chain: ChainArgs,

    /// First temperature of the ladder
    #[arg(long)]
    pub t_start: Option<f64>,

    /// Last temperature of the ladder
    #[arg(long)]
    pub t_stop: Option<f64>,

    /// Number of temperatures
    #[arg(long)]
    pub n_temps: Option<usize>,

    /// Run the chains one after another instead of in parallel
    #[arg(long)]
    pub sequential: bool,
}

fn parse_init(s: &str) -> Result<InitMode, String> {
    InitMode::try_from(s)
}
