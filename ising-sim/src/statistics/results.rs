use serde::{Deserialize, Serialize};

/// One entry of the sampled time series.
///
/// The averages are running averages over every sample taken so far,
/// including this one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Index of the Metropolis step after which the sample was taken.
    pub iteration: usize,
    pub avg_energy: f64,
    pub avg_magnetization: f64,
}

/// Observables of a finished chain.
///
/// Totals are for the whole lattice; the `_per_site` fields divide by N².
/// When the run recorded no samples (`n_iter == 0`) the averages fall back to
/// the instantaneous state and the fluctuation quantities are zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunResult {
    pub temperature: f64,
    pub size: usize,
    pub n_iter: usize,
    pub n_samples: usize,
    /// ⟨E⟩ over all samples.
    pub avg_energy: f64,
    /// ⟨M⟩ over all samples.
    pub avg_magnetization: f64,
    /// ⟨E²⟩.
    pub avg_energy2: f64,
    /// ⟨M²⟩.
    pub avg_magnetization2: f64,
    /// ⟨|M|⟩.
    pub avg_abs_magnetization: f64,
    pub energy_per_site: f64,
    pub magnetization_per_site: f64,
    /// (⟨E²⟩ − ⟨E⟩²) / (T² N²).
    pub heat_capacity: f64,
    /// (⟨M²⟩ − ⟨M⟩²) / (T N²).
    pub susceptibility: f64,
    /// Accepted flips / proposed flips.
    pub acceptance_rate: f64,
    /// Energy of the last state.
    pub final_energy: f64,
    /// Magnetization of the last state.
    pub final_magnetization: i64,
    /// Integrated autocorrelation time of the energy samples, in samples.
    pub energy_tau: Option<f64>,
    /// Integrated autocorrelation time of the magnetization samples, in samples.
    pub magnetization_tau: Option<f64>,
}

/// Result of one chain in a temperature sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepPoint {
    pub temperature: f64,
    pub seed: u64,
    pub result: RunResult,
}
