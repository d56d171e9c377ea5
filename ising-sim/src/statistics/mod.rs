pub mod autocorrelation;
pub mod results;
mod stats;

pub use autocorrelation::{sokal_tau, AutocorrAccum};
pub use results::{RunResult, Sample, SweepPoint};
pub use stats::Statistics;
