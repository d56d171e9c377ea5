use tracing::info;
use validator::Validate;

use super::Simulation;
use crate::config::SimConfig;
use crate::error::SimError;
use crate::parallel::par_over_chains;
use crate::statistics::SweepPoint;

/// `n` evenly spaced temperatures from `start` to `stop`, both inclusive.
///
/// The ladder may run downward (`start > stop`), e.g. a cooling schedule.
pub fn temperature_ladder(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => vec![],
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n - 1) as f64;
            (0..n)
                .map(|k| if k == n - 1 { stop } else { start + step * k as f64 })
                .collect()
        }
    }
}

/// Run one independent chain per temperature.
///
/// Every chain copies `base` with its own temperature and seed
/// `base.seed + k` for ladder index `k`. Chains share nothing and are not
/// averaged together; results come back in ladder order. All configurations
/// are validated before any chain starts. `on_done` is called once per
/// finished chain (useful for progress bars).
pub fn run_temperature_sweep(
    base: &SimConfig,
    temperatures: &[f64],
    sequential: bool,
    on_done: &(dyn Fn() + Sync),
) -> Result<Vec<SweepPoint>, SimError> {
    let configs: Vec<SimConfig> = temperatures
        .iter()
        .enumerate()
        .map(|(k, &temperature)| SimConfig {
            temperature,
            seed: base.seed.wrapping_add(k as u64),
            ..base.clone()
        })
        .collect();

    for cfg in &configs {
        cfg.validate()?;
    }

    let points = par_over_chains(
        &configs,
        sequential,
        |cfg| -> Result<SweepPoint, SimError> {
            let result = Simulation::new(cfg.clone())?.run();
            on_done();
            Ok(SweepPoint {
                temperature: cfg.temperature,
                seed: cfg.seed,
                result,
            })
        },
    );

    let points = points.into_iter().collect::<Result<Vec<_>, _>>()?;
    info!(
        n_temps = points.len(),
        size = base.size,
        n_iter = base.n_iter,
        "temperature sweep finished"
    );
    Ok(points)
}
