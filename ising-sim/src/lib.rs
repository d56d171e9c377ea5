pub mod config;
pub mod error;
pub mod geometry;
pub mod mcmc;
pub mod reference;
pub mod simulation;
pub mod spins;
pub mod statistics;

mod parallel;

pub use config::{InitMode, SimConfig};
pub use error::SimError;
pub use geometry::Lattice;
pub use simulation::{run_temperature_sweep, temperature_ladder, Samples, Simulation};
pub use statistics::{RunResult, Sample, SweepPoint};
