use rand::Rng;

use crate::error::SimError;

/// Square N×N spin lattice with periodic boundary conditions.
///
/// Spins are stored row-major: site `(i, j)` lives at flat index `i * size + j`.
/// Every entry is `+1` or `-1` at all times.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lattice {
    size: usize,
    spins: Vec<i8>,
}

impl Lattice {
    /// Random ±1 configuration.
    ///
    /// Consumes exactly `size * size` uniform draws, one per site in row-major
    /// order. A draw below 0.5 gives `-1`, anything else `+1`.
    pub fn random<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Self {
        let n_sites = size * size;
        let mut spins = vec![0i8; n_sites];
        for s in spins.iter_mut() {
            *s = if rng.gen::<f64>() < 0.5 { -1 } else { 1 };
        }
        Self { size, spins }
    }

    /// Every site set to `spin`, which must be ±1.
    pub fn uniform(size: usize, spin: i8) -> Result<Self, SimError> {
        if spin != 1 && spin != -1 {
            return Err(SimError::InvalidParameter(format!(
                "uniform spin is {spin}, expected +1 or -1"
            )));
        }
        Self::from_spins(size, vec![spin; size * size])
    }

    /// Build from an explicit row-major spin vector.
    pub fn from_spins(size: usize, spins: Vec<i8>) -> Result<Self, SimError> {
        if size == 0 {
            return Err(SimError::InvalidParameter(
                "lattice size must be >= 1".to_string(),
            ));
        }
        if spins.len() != size * size {
            return Err(SimError::InvalidParameter(format!(
                "expected {} spins for a {size}x{size} lattice, got {}",
                size * size,
                spins.len()
            )));
        }
        if let Some(pos) = spins.iter().position(|&s| s != 1 && s != -1) {
            return Err(SimError::InvalidParameter(format!(
                "spin at index {pos} is {}, expected +1 or -1",
                spins[pos]
            )));
        }
        Ok(Self { size, spins })
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn n_sites(&self) -> usize {
        self.spins.len()
    }

    #[inline]
    pub fn spins(&self) -> &[i8] {
        &self.spins
    }

    #[inline]
    pub fn index(&self, i: usize, j: usize) -> usize {
        i * self.size + j
    }

    #[inline]
    pub fn spin(&self, i: usize, j: usize) -> i8 {
        self.spins[self.index(i, j)]
    }

    /// Coordinates of the neighbor of `(i, j)` along `dim` (0 = rows, 1 = columns).
    /// `forward = true` means +1 direction, `forward = false` means -1 direction.
    #[inline]
    pub fn neighbor(&self, i: usize, j: usize, dim: usize, forward: bool) -> (usize, usize) {
        let n = self.size;
        let step = |c: usize| {
            if forward {
                if c + 1 == n {
                    0
                } else {
                    c + 1
                }
            } else if c == 0 {
                n - 1
            } else {
                c - 1
            }
        };
        match dim {
            0 => (step(i), j),
            1 => (i, step(j)),
            _ => panic!("square lattice has dims 0 and 1, got {dim}"),
        }
    }

    /// Sum of the four periodic neighbors of `(i, j)`, in `[-4, 4]`.
    ///
    /// For `size <= 2` the wraparound makes a direction's forward and backward
    /// neighbor the same site (or the site itself); it is counted every time.
    #[inline]
    pub fn neighbor_sum(&self, i: usize, j: usize) -> i32 {
        let mut wf = 0i32;
        for dim in 0..2 {
            for forward in [true, false] {
                let (ni, nj) = self.neighbor(i, j, dim, forward);
                wf += self.spin(ni, nj) as i32;
            }
        }
        wf
    }

    /// Sum of all spins, in `[-N², N²]`.
    pub fn magnetization(&self) -> i64 {
        self.spins.iter().map(|&s| s as i64).sum()
    }

    /// Reverse the spin at `(i, j)`.
    #[inline]
    pub(crate) fn flip(&mut self, i: usize, j: usize) {
        let idx = self.index(i, j);
        self.spins[idx] = -self.spins[idx];
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256StarStar;

    #[test]
    fn test_neighbors_wrap() {
        let lat = Lattice::uniform(3, 1).unwrap();

        assert_eq!(lat.neighbor(0, 0, 0, true), (1, 0));
        assert_eq!(lat.neighbor(0, 0, 1, true), (0, 1));

        // (0,0) backward wraps to the last row / column
        assert_eq!(lat.neighbor(0, 0, 0, false), (2, 0));
        assert_eq!(lat.neighbor(0, 0, 1, false), (0, 2));

        // (2,2) forward wraps to the first row / column
        assert_eq!(lat.neighbor(2, 2, 0, true), (0, 2));
        assert_eq!(lat.neighbor(2, 2, 1, true), (2, 0));
    }

    #[test]
    fn test_neighbor_sum_checkerboard() {
        let spins: Vec<i8> = (0..16)
            .map(|k| if (k / 4 + k % 4) % 2 == 0 { 1 } else { -1 })
            .collect();
        let lat = Lattice::from_spins(4, spins).unwrap();
        for i in 0..4 {
            for j in 0..4 {
                assert_eq!(lat.neighbor_sum(i, j), -4 * lat.spin(i, j) as i32);
            }
        }
        assert_eq!(lat.magnetization(), 0);
    }

    #[test]
    fn test_small_lattices_count_duplicates() {
        // N=1: all four neighbors are the site itself
        let lat = Lattice::uniform(1, -1).unwrap();
        assert_eq!(lat.neighbor_sum(0, 0), -4);

        // N=2: forward and backward neighbors coincide
        let lat = Lattice::from_spins(2, vec![1, -1, -1, -1]).unwrap();
        // (0,0): neighbors (1,0) twice and (0,1) twice
        assert_eq!(lat.neighbor_sum(0, 0), -4);
        // (1,1): neighbors (0,1) twice and (1,0) twice
        assert_eq!(lat.neighbor_sum(1, 1), -4);
        // (0,1): neighbors (1,1) twice and (0,0) twice
        assert_eq!(lat.neighbor_sum(0, 1), 0);
    }

    #[test]
    fn test_random_domain_and_magnetization() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(7);
        let lat = Lattice::random(12, &mut rng);
        assert_eq!(lat.n_sites(), 144);
        assert!(lat.spins().iter().all(|&s| s == 1 || s == -1));

        let n_up = lat.spins().iter().filter(|&&s| s == 1).count() as i64;
        assert_eq!(lat.magnetization(), 2 * n_up - 144);
    }

    #[test]
    fn test_random_is_seed_deterministic() {
        let a = Lattice::random(8, &mut Xoshiro256StarStar::seed_from_u64(3));
        let b = Lattice::random(8, &mut Xoshiro256StarStar::seed_from_u64(3));
        assert_eq!(a, b);
    }

    #[test]
    fn test_from_spins_rejects_bad_input() {
        assert!(Lattice::from_spins(2, vec![1, 1, 1]).is_err());
        assert!(Lattice::from_spins(2, vec![1, 0, 1, 1]).is_err());
        assert!(Lattice::from_spins(0, vec![]).is_err());
    }

    #[test]
    fn test_uniform_rejects_bad_input() {
        assert!(matches!(
            Lattice::uniform(2, 0),
            Err(SimError::InvalidParameter(_))
        ));
        assert!(Lattice::uniform(2, 3).is_err());
        assert!(Lattice::uniform(0, 1).is_err());

        let lat = Lattice::uniform(2, -1).unwrap();
        assert_eq!(lat.magnetization(), -4);
    }

    #[test]
    fn test_flip() {
        let mut lat = Lattice::uniform(3, 1).unwrap();
        lat.flip(1, 2);
        assert_eq!(lat.spin(1, 2), -1);
        assert_eq!(lat.magnetization(), 7);
        lat.flip(1, 2);
        assert_eq!(lat.magnetization(), 9);
    }
}
