//! Text rendering of samples and results on stdout.

use std::io::{self, Write};

use ising_sim::reference::{spontaneous_magnetization, MEAN_FIELD_TC, ONSAGER_TC};
use ising_sim::{RunResult, Sample, SweepPoint};

/// `iteration  avg_energy  avg_magnetization`, one sample per line.
pub fn sample_line(sample: &Sample) -> String {
    format!(
        "{} {} {}",
        sample.iteration, sample.avg_energy, sample.avg_magnetization
    )
}

pub fn write_summary(out: &mut impl Write, result: &RunResult) -> io::Result<()> {
    let n = result.size;
    writeln!(out, "# lattice {n}x{n}, T = {}", result.temperature)?;
    writeln!(
        out,
        "# steps {}, samples {}, acceptance {:.4}",
        result.n_iter, result.n_samples, result.acceptance_rate
    )?;
    writeln!(out, "# <E> = {}", result.avg_energy)?;
    writeln!(out, "# <M> = {}", result.avg_magnetization)?;
    writeln!(
        out,
        "# <E>/N^2 = {:.6}  <M>/N^2 = {:.6}  <|M|>/N^2 = {:.6}",
        result.energy_per_site,
        result.magnetization_per_site,
        result.avg_abs_magnetization / (n * n) as f64
    )?;
    writeln!(
        out,
        "# C = {:.6}  chi = {:.6}",
        result.heat_capacity, result.susceptibility
    )?;
    if let (Some(te), Some(tm)) = (result.energy_tau, result.magnetization_tau) {
        writeln!(out, "# tau_E = {te:.3}  tau_M = {tm:.3} (samples)")?;
    }
    write_reference(out, result.temperature)
}

fn write_reference(out: &mut impl Write, temperature: f64) -> io::Result<()> {
    writeln!(
        out,
        "# Onsager Tc = {ONSAGER_TC:.4}, mean-field Tc = {MEAN_FIELD_TC:.1}, Onsager |m|(T) = {:.6}",
        spontaneous_magnetization(temperature)
    )
}

pub fn write_sweep(out: &mut impl Write, points: &[SweepPoint]) -> io::Result<()> {
    writeln!(
        out,
        "# {:>8} {:>12} {:>12} {:>12} {:>12} {:>12} {:>10}",
        "T", "E/N^2", "|M|/N^2", "C", "chi", "m_onsager", "accept"
    )?;
    for p in points {
        let r = &p.result;
        let n2 = (r.size * r.size) as f64;
        writeln!(
            out,
            "  {:>8.4} {:>12.6} {:>12.6} {:>12.6} {:>12.6} {:>12.6} {:>10.4}",
            p.temperature,
            r.energy_per_site,
            r.avg_abs_magnetization / n2,
            r.heat_capacity,
            r.susceptibility,
            spontaneous_magnetization(p.temperature),
            r.acceptance_rate
        )?;
    }
    writeln!(
        out,
        "# Onsager Tc = {ONSAGER_TC:.4}, mean-field Tc = {MEAN_FIELD_TC:.1}"
    )
}
