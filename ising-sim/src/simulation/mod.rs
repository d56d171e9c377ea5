pub mod sweep;

pub use sweep::{run_temperature_sweep, temperature_ladder};

use std::iter::FusedIterator;

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;
use tracing::{debug, info, trace};
use validator::Validate;

use crate::config::{InitMode, SimConfig};
use crate::error::SimError;
use crate::geometry::Lattice;
use crate::mcmc::{metropolis_step, StepOutcome};
use crate::spins::total_energy;
use crate::statistics::{sokal_tau, AutocorrAccum, RunResult, Sample, Statistics};

/// What one iteration of the driver produced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IterationRecord {
    pub outcome: StepOutcome,
    /// Present when this iteration was a sampling point.
    pub sample: Option<Sample>,
}

/// A single Metropolis chain: the lattice, its tracked energy and
/// magnetization, the random source, and the sample accumulators.
///
/// The loop runs iterations `0..n_iter`. Iteration `itt` first performs one
/// Metropolis step, then records a sample iff `itt % sample_interval == 0`,
/// so iteration 0 is always sampled and a full run yields
/// `⌈n_iter / sample_interval⌉` samples.
pub struct Simulation<R = Xoshiro256StarStar> {
    config: SimConfig,
    lattice: Lattice,
    energy: f64,
    magnetization: i64,
    rng: R,
    iteration: usize,
    n_accepted: usize,
    energy_stat: Statistics,
    energy2_stat: Statistics,
    mag_stat: Statistics,
    mag2_stat: Statistics,
    abs_mag_stat: Statistics,
    energy_ac: Option<AutocorrAccum>,
    mag_ac: Option<AutocorrAccum>,
}

impl Simulation<Xoshiro256StarStar> {
    /// Validate `config` and build a chain seeded from `config.seed`.
    pub fn new(config: SimConfig) -> Result<Self, SimError> {
        let rng = Xoshiro256StarStar::seed_from_u64(config.seed);
        Self::with_rng(config, rng)
    }
}

impl<R: Rng> Simulation<R> {
    /// Validate `config` and build a chain drawing from `rng`.
    ///
    /// A random start consumes N² draws before the first step.
    pub fn with_rng(config: SimConfig, mut rng: R) -> Result<Self, SimError> {
        config.validate()?;
        let lattice = match config.init {
            InitMode::Random => Lattice::random(config.size, &mut rng),
            InitMode::Up => Lattice::uniform(config.size, 1)?,
            InitMode::Down => Lattice::uniform(config.size, -1)?,
        };
        Ok(Self::from_parts(config, lattice, rng))
    }

    /// Start a chain from an explicit configuration; `config.init` is ignored.
    pub fn from_lattice(config: SimConfig, lattice: Lattice, rng: R) -> Result<Self, SimError> {
        config.validate()?;
        if lattice.size() != config.size {
            return Err(SimError::InvalidParameter(format!(
                "lattice size {} does not match configured size {}",
                lattice.size(),
                config.size
            )));
        }
        Ok(Self::from_parts(config, lattice, rng))
    }

    fn from_parts(config: SimConfig, lattice: Lattice, rng: R) -> Self {
        let energy = total_energy(&lattice);
        let magnetization = lattice.magnetization();
        debug!(
            size = config.size,
            temperature = config.temperature,
            energy,
            magnetization,
            "initialized lattice"
        );

        let max_lag = config.autocorrelation_max_lag;
        Self {
            lattice,
            energy,
            magnetization,
            rng,
            iteration: 0,
            n_accepted: 0,
            energy_stat: Statistics::new(1),
            energy2_stat: Statistics::new(2),
            mag_stat: Statistics::new(1),
            mag2_stat: Statistics::new(2),
            abs_mag_stat: Statistics::new(1),
            energy_ac: max_lag.map(AutocorrAccum::new),
            mag_ac: max_lag.map(AutocorrAccum::new),
            config,
        }
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    /// Incrementally tracked total energy.
    pub fn energy(&self) -> f64 {
        self.energy
    }

    /// Incrementally tracked total magnetization.
    pub fn magnetization(&self) -> i64 {
        self.magnetization
    }

    /// Total energy recomputed from the lattice; must agree with [`Self::energy`].
    pub fn recomputed_energy(&self) -> f64 {
        total_energy(&self.lattice)
    }

    /// Number of iterations executed so far.
    pub fn iteration(&self) -> usize {
        self.iteration
    }

    pub fn n_accepted(&self) -> usize {
        self.n_accepted
    }

    pub fn is_finished(&self) -> bool {
        self.iteration >= self.config.n_iter
    }

    /// Execute the next iteration, or return `None` once `n_iter` is reached.
    pub fn advance(&mut self) -> Option<IterationRecord> {
        if self.is_finished() {
            return None;
        }
        let itt = self.iteration;
        let outcome = metropolis_step(
            &mut self.lattice,
            &mut self.energy,
            &mut self.magnetization,
            self.config.temperature,
            &mut self.rng,
        );
        self.n_accepted += outcome.accepted as usize;
        self.iteration += 1;

        let sample = (itt % self.config.sample_interval == 0).then(|| self.record_sample(itt));
        Some(IterationRecord { outcome, sample })
    }

    fn record_sample(&mut self, itt: usize) -> Sample {
        let e = self.energy;
        let m = self.magnetization as f64;

        self.energy_stat.update(e);
        self.energy2_stat.update(e);
        self.mag_stat.update(m);
        self.mag2_stat.update(m);
        self.abs_mag_stat.update(m.abs());
        if let Some(ref mut acc) = self.energy_ac {
            acc.push(e);
        }
        if let Some(ref mut acc) = self.mag_ac {
            acc.push(m);
        }

        let sample = Sample {
            iteration: itt,
            avg_energy: self.energy_stat.average().unwrap_or(e),
            avg_magnetization: self.mag_stat.average().unwrap_or(m),
        };
        trace!(
            iteration = itt,
            avg_energy = sample.avg_energy,
            avg_magnetization = sample.avg_magnetization,
            "sample"
        );
        sample
    }

    /// Lazy sequence of the remaining samples. Dropping it early stops the chain
    /// after the last completed step; a fresh call resumes where it left off.
    pub fn samples(&mut self) -> Samples<'_, R> {
        Samples { sim: self }
    }

    /// Run to completion, handing each sample to `on_sample`.
    pub fn run_with(mut self, mut on_sample: impl FnMut(&Sample)) -> RunResult {
        for sample in self.samples() {
            on_sample(&sample);
        }
        self.finish()
    }

    /// Run to completion and return the final averages.
    pub fn run(self) -> RunResult {
        self.run_with(|_| {})
    }

    /// Finalize the accumulators over the iterations executed so far.
    pub fn finish(self) -> RunResult {
        let t = self.config.temperature;
        let n_sites = self.config.n_sites() as f64;
        let e = self.energy;
        let m = self.magnetization as f64;

        let avg_energy = self.energy_stat.average().unwrap_or(e);
        let avg_energy2 = self.energy2_stat.average().unwrap_or(e * e);
        let avg_magnetization = self.mag_stat.average().unwrap_or(m);
        let avg_magnetization2 = self.mag2_stat.average().unwrap_or(m * m);
        let avg_abs_magnetization = self.abs_mag_stat.average().unwrap_or(m.abs());

        let heat_capacity = ((avg_energy2 - avg_energy * avg_energy) / (t * t * n_sites)).max(0.0);
        let susceptibility =
            ((avg_magnetization2 - avg_magnetization * avg_magnetization) / (t * n_sites)).max(0.0);

        let acceptance_rate = if self.iteration > 0 {
            self.n_accepted as f64 / self.iteration as f64
        } else {
            0.0
        };

        let result = RunResult {
            temperature: t,
            size: self.config.size,
            n_iter: self.iteration,
            n_samples: self.energy_stat.count,
            avg_energy,
            avg_magnetization,
            avg_energy2,
            avg_magnetization2,
            avg_abs_magnetization,
            energy_per_site: avg_energy / n_sites,
            magnetization_per_site: avg_magnetization / n_sites,
            heat_capacity,
            susceptibility,
            acceptance_rate,
            final_energy: e,
            final_magnetization: self.magnetization,
            energy_tau: series_tau(self.energy_ac.as_ref()),
            magnetization_tau: series_tau(self.mag_ac.as_ref()),
        };
        info!(
            temperature = t,
            n_samples = result.n_samples,
            avg_energy,
            avg_magnetization,
            acceptance_rate,
            "run finished"
        );
        result
    }
}

/// Sokal τ of a tracked series; `None` when tracking is off or nothing was sampled.
fn series_tau(acc: Option<&AutocorrAccum>) -> Option<f64> {
    acc.filter(|acc| acc.n_recorded() > 0)
        .map(|acc| sokal_tau(&acc.finish()))
}

/// Iterator over the samples a [`Simulation`] still has to produce.
pub struct Samples<'a, R> {
    sim: &'a mut Simulation<R>,
}

impl<R: Rng> Iterator for Samples<'_, R> {
    type Item = Sample;

    fn next(&mut self) -> Option<Sample> {
        while let Some(record) = self.sim.advance() {
            if record.sample.is_some() {
                return record.sample;
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let cfg = &self.sim.config;
        let remaining = cfg.n_samples() - self.sim.energy_stat.count;
        (remaining, Some(remaining))
    }
}

impl<R: Rng> FusedIterator for Samples<'_, R> {}
