use crate::geometry::Lattice;

/// Total energy of the configuration, recomputed from scratch (J = 1, h = 0).
///
/// Each site contributes `-S * WF` where `WF` is its periodic neighbor sum;
/// every bond is seen from both endpoints, so the sum is halved.
pub fn total_energy(lattice: &Lattice) -> f64 {
    let n = lattice.size();
    let mut total = 0i64;
    for i in 0..n {
        for j in 0..n {
            let s = lattice.spin(i, j) as i64;
            total -= s * lattice.neighbor_sum(i, j) as i64;
        }
    }
    total as f64 / 2.0
}
