use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Starting configuration of the lattice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InitMode {
    /// Independent ±1 per site, one uniform draw each.
    #[default]
    Random,
    /// All spins +1.
    Up,
    /// All spins −1.
    Down,
}

impl TryFrom<&str> for InitMode {
    type Error = String;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "random" => Ok(Self::Random),
            "up" => Ok(Self::Up),
            "down" => Ok(Self::Down),
            _ => Err(format!(
                "unknown init mode '{s}', expected 'random', 'up', or 'down'"
            )),
        }
    }
}

fn validate_sim_config(cfg: &SimConfig) -> Result<(), ValidationError> {
    if cfg.size < 1 {
        return Err(ValidationError::new("size must be >= 1"));
    }
    // NaN fails both checks
    if !(cfg.temperature.is_finite() && cfg.temperature > 0.0) {
        return Err(ValidationError::new(
            "temperature must be positive and finite",
        ));
    }
    if cfg.sample_interval < 1 {
        return Err(ValidationError::new("sample_interval must be >= 1"));
    }
    if let Some(lag) = cfg.autocorrelation_max_lag {
        if lag < 1 {
            return Err(ValidationError::new(
                "autocorrelation_max_lag must be >= 1",
            ));
        }
        // a run with no samples still allows lag 1
        if lag > cfg.n_samples().max(1) {
            return Err(ValidationError::new(
                "autocorrelation_max_lag must not exceed the number of samples",
            ));
        }
    }
    Ok(())
}

/// Parameters of a single Metropolis chain.
#[derive(Debug, Clone, PartialEq, Validate, Serialize, Deserialize)]
#[validate(schema(function = "validate_sim_config"))]
pub struct SimConfig {
    /// Lattice edge length N; the lattice holds N×N spins.
    pub size: usize,
    /// Number of Metropolis steps (single proposed flips, not sweeps).
    pub n_iter: usize,
    /// Temperature in units of J/k_B.
    pub temperature: f64,
    /// A sample is recorded after every step whose index is a multiple of this.
    pub sample_interval: usize,
    pub seed: u64,
    #[serde(default)]
    pub init: InitMode,
    /// Largest lag tracked for the sample-series autocorrelation. `None` disables it.
    #[serde(default)]
    pub autocorrelation_max_lag: Option<usize>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            size: 10,
            n_iter: 10_000,
            temperature: 10.0,
            sample_interval: 100,
            seed: 42,
            init: InitMode::Random,
            autocorrelation_max_lag: None,
        }
    }
}

impl SimConfig {
    /// Total number of lattice sites, N².
    pub fn n_sites(&self) -> usize {
        self.size * self.size
    }

    /// Number of samples a full run records: ⌈n_iter / sample_interval⌉.
    pub fn n_samples(&self) -> usize {
        self.n_iter.div_ceil(self.sample_interval)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(SimConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_temperature() {
        for t in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let cfg = SimConfig {
                temperature: t,
                ..SimConfig::default()
            };
            assert!(cfg.validate().is_err(), "temperature {t} accepted");
        }
    }

    #[test]
    fn test_rejects_zero_size_and_interval() {
        let cfg = SimConfig {
            size: 0,
            ..SimConfig::default()
        };
        assert!(cfg.validate().is_err());

        let cfg = SimConfig {
            sample_interval: 0,
            ..SimConfig::default()
        };
        assert!(cfg.validate().is_err());

        let cfg = SimConfig {
            autocorrelation_max_lag: Some(0),
            ..SimConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_rejects_lag_beyond_sample_count() {
        let mut cfg = SimConfig {
            size: 4,
            n_iter: 10,
            sample_interval: 1,
            autocorrelation_max_lag: Some(usize::MAX),
            ..SimConfig::default()
        };
        assert!(cfg.validate().is_err());

        cfg.autocorrelation_max_lag = Some(11);
        assert!(cfg.validate().is_err());

        cfg.autocorrelation_max_lag = Some(10);
        assert!(cfg.validate().is_ok());

        cfg.n_iter = 0;
        cfg.autocorrelation_max_lag = Some(1);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_zero_iterations_is_valid() {
        let cfg = SimConfig {
            n_iter: 0,
            ..SimConfig::default()
        };
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.n_samples(), 0);
    }

    #[test]
    fn test_n_samples() {
        let cfg = SimConfig {
            n_iter: 1000,
            sample_interval: 100,
            ..SimConfig::default()
        };
        assert_eq!(cfg.n_samples(), 10);

        let cfg = SimConfig {
            n_iter: 1001,
            sample_interval: 100,
            ..SimConfig::default()
        };
        assert_eq!(cfg.n_samples(), 11);
    }

    #[test]
    fn test_init_mode_parse() {
        assert_eq!(InitMode::try_from("up"), Ok(InitMode::Up));
        assert_eq!(InitMode::try_from("random"), Ok(InitMode::Random));
        assert!(InitMode::try_from("sideways").is_err());
    }
}
