use std::time::Instant;

use ising_sim::{run_temperature_sweep, temperature_ladder, SimConfig, Simulation};

const L: usize = 128;
const N_TEMPS: usize = 16;
const N_SWEEPS: usize = 50;

fn main() {
    let n_sites = L * L;
    let config = SimConfig {
        size: L,
        n_iter: N_SWEEPS * n_sites,
        temperature: 2.269,
        sample_interval: n_sites,
        seed: 42,
        ..SimConfig::default()
    };

    println!(
        "Lattice: {}x{}  |  Temps: {}  |  Sweeps: {}  |  Steps/chain: {}",
        L, L, N_TEMPS, N_SWEEPS, config.n_iter
    );
    println!("{}", "-".repeat(70));

    let t0 = Instant::now();
    let result = Simulation::new(config.clone()).unwrap().run();
    let elapsed = t0.elapsed().as_secs_f64();
    println!(
        "Single chain: {:.3} s  |  {:.1} ns/step  |  acceptance {:.3}",
        elapsed,
        elapsed / config.n_iter as f64 * 1e9,
        result.acceptance_rate
    );

    let temps = temperature_ladder(0.5, 4.0, N_TEMPS);
    let t0 = Instant::now();
    run_temperature_sweep(&config, &temps, false, &|| {}).unwrap();
    let elapsed = t0.elapsed().as_secs_f64();
    let per_sweep = elapsed / N_SWEEPS as f64 * 1000.0;
    println!("Sweep: {:.3} s  |  {:.3} ms/sweep", elapsed, per_sweep);
}
