//! Parameter file and merging with command-line flags.
//!
//! Precedence: command-line flag, then the TOML file, then the built-in
//! defaults (N = 10, 10000 steps, T = 10, a sample every 100 steps).

use std::fs;
use std::path::Path;

use color_eyre::eyre::{Result, WrapErr};
use ising_sim::{InitMode, SimConfig};
use serde::Deserialize;

use crate::args::{ChainArgs, SweepArgs};

/// Contents of the optional `--config` TOML file. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub size: Option<usize>,
    pub n_iter: Option<usize>,
    pub temperature: Option<f64>,
    pub sample_interval: Option<usize>,
    pub seed: Option<u64>,
    pub init: Option<InitMode>,
    pub autocorrelation_max_lag: Option<usize>,
    pub sweep: Option<SweepFileConfig>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SweepFileConfig {
    pub t_start: Option<f64>,
    pub t_stop: Option<f64>,
    pub n_temps: Option<usize>,
    pub sequential: Option<bool>,
}

/// Resolved temperature ladder of a sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepPlan {
    pub t_start: f64,
    pub t_stop: f64,
    pub n_temps: usize,
    pub sequential: bool,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .wrap_err_with(|| format!("Unable to read configuration file: {}", path.display()))?;
        Self::parse(&content)
            .wrap_err_with(|| format!("Failed to parse configuration file: {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Chain parameters with flags over file over defaults. Validation is left
    /// to the engine.
    pub fn chain_config(&self, cli: &ChainArgs, temperature: Option<f64>) -> SimConfig {
        let defaults = SimConfig::default();
        SimConfig {
            size: cli.size.or(self.size).unwrap_or(defaults.size),
            n_iter: cli.n_iter.or(self.n_iter).unwrap_or(defaults.n_iter),
            temperature: temperature
                .or(self.temperature)
                .unwrap_or(defaults.temperature),
            sample_interval: cli
                .sample_interval
                .or(self.sample_interval)
                .unwrap_or(defaults.sample_interval),
            seed: cli.seed.or(self.seed).unwrap_or(defaults.seed),
            init: cli.init.or(self.init).unwrap_or(defaults.init),
            autocorrelation_max_lag: cli
                .autocorrelation_max_lag
                .or(self.autocorrelation_max_lag)
                .or(defaults.autocorrelation_max_lag),
        }
    }

    /// Ladder from flags over the `[sweep]` table; defaults to 100 temperatures
    /// cooling from 4.0 to 0.5.
    pub fn sweep_plan(&self, cli: &SweepArgs) -> SweepPlan {
        let file = self.sweep.as_ref();
        SweepPlan {
            t_start: cli
                .t_start
                .or(file.and_then(|s| s.t_start))
                .unwrap_or(4.0),
            t_stop: cli.t_stop.or(file.and_then(|s| s.t_stop)).unwrap_or(0.5),
            n_temps: cli
                .n_temps
                .or(file.and_then(|s| s.n_temps))
                .unwrap_or(100),
            sequential: cli.sequential || file.and_then(|s| s.sequential).unwrap_or(false),
        }
    }
}
