pub mod energy;

pub use energy::total_energy;
