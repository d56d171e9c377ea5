pub mod metropolis;

pub use metropolis::{metropolis_accept, metropolis_step, StepOutcome};
