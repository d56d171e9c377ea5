//! Command-line driver for the 2D Ising Metropolis engine.

use std::io::{self, Write};

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use indicatif::{ProgressBar, ProgressStyle};
use ising_sim::{run_temperature_sweep, temperature_ladder, Simulation};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod args;
mod config;
mod output;

use args::{Args, Command, RunArgs, SweepArgs};
use config::FileConfig;

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    init_tracing(args.verbose, args.quiet);

    let file = match &args.config {
        Some(path) => {
            info!("Reading configuration from: {}", path.display());
            FileConfig::load(path)?
        }
        None => FileConfig::default(),
    };

    let show_progress = !(args.quiet || args.json);
    match &args.command {
        Command::Run(run) => run_single(&file, run, args.json, show_progress),
        Command::Sweep(sweep) => run_sweep(&file, sweep, args.json, show_progress),
    }
}

fn init_tracing(verbose: u8, quiet: bool) {
    let default = match (quiet, verbose) {
        (true, _) => "warn",
        (false, 0) => "info",
        (false, 1) => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn progress_bar(len: usize, msg: &'static str, show: bool) -> Result<ProgressBar> {
    if !show {
        return Ok(ProgressBar::hidden());
    }
    let pb = ProgressBar::new(len as u64);
    pb.set_style(
        ProgressStyle::with_template(
            "{msg} [{bar:40}] {pos}/{len} [{elapsed_precise} < {eta_precise}, {per_sec}]",
        )?
        .progress_chars("=> "),
    );
    pb.set_message(msg);
    Ok(pb)
}

fn run_single(file: &FileConfig, run: &RunArgs, json: bool, show_progress: bool) -> Result<()> {
    let config = file.chain_config(&run.chain, run.temperature);
    info!(
        "Running {}x{} lattice at T = {} for {} steps",
        config.size, config.size, config.temperature, config.n_iter
    );
    let n_samples = config.n_samples();
    let sim = Simulation::new(config).wrap_err("Invalid simulation parameters")?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if !json {
        writeln!(out, "Initial magnetism: {}", sim.magnetization())?;
    }

    let pb = progress_bar(n_samples, "samples", show_progress)?;
    let mut samples = Vec::with_capacity(n_samples);
    let mut write_err = None;
    let result = sim.run_with(|sample| {
        pb.inc(1);
        if json {
            samples.push(*sample);
        } else if write_err.is_none() {
            if let Err(e) = pb.suspend(|| writeln!(out, "{}", output::sample_line(sample))) {
                write_err = Some(e);
            }
        }
    });
    pb.finish_and_clear();
    if let Some(e) = write_err {
        return Err(e).wrap_err("Failed to write samples");
    }

    if json {
        let doc = serde_json::json!({ "samples": samples, "result": result });
        writeln!(out, "{}", serde_json::to_string_pretty(&doc)?)?;
    } else {
        output::write_summary(&mut out, &result)?;
    }
    Ok(())
}

fn run_sweep(file: &FileConfig, sweep: &SweepArgs, json: bool, show_progress: bool) -> Result<()> {
    let base = file.chain_config(&sweep.chain, None);
    let plan = file.sweep_plan(sweep);
    let temps = temperature_ladder(plan.t_start, plan.t_stop, plan.n_temps);
    info!(
        "Sweeping {} temperatures from {} to {} ({}x{} lattice, {} steps each)",
        temps.len(),
        plan.t_start,
        plan.t_stop,
        base.size,
        base.size,
        base.n_iter
    );

    let pb = progress_bar(temps.len(), "temperatures", show_progress)?;
    let points = run_temperature_sweep(&base, &temps, plan.sequential, &|| pb.inc(1))
        .wrap_err("Invalid simulation parameters")?;
    pb.finish_and_clear();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&points)?)?;
    } else {
        output::write_sweep(&mut out, &points)?;
    }
    Ok(())
}
