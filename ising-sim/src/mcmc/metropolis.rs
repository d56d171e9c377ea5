use crate::geometry::Lattice;
use rand::Rng;

/// What a single Metropolis proposal did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepOutcome {
    /// Proposed site `(i, j)`.
    pub site: (usize, usize),
    /// Energy change the flip would cause (or caused, if accepted).
    pub delta_e: i32,
    pub accepted: bool,
}

/// Energy change from flipping a spin `s` whose neighbor sum is `wf`.
#[inline]
pub fn flip_delta(s: i8, wf: i32) -> i32 {
    2 * s as i32 * wf
}

/// Metropolis criterion: always accept downhill moves, otherwise accept iff
/// `exp(-ΔE / T)` exceeds the uniform draw `r`.
#[inline]
pub fn metropolis_accept(delta_e: i32, temperature: f64, r: f64) -> bool {
    delta_e < 0 || (-(delta_e as f64) / temperature).exp() > r
}

/// Map a uniform draw `u ∈ [0, 1)` to a site.
///
/// `t = ⌊N² u⌋`, then `i = t mod N`, `j = ⌊t / N⌋`.
#[inline]
pub fn site_from_uniform(size: usize, u: f64) -> (usize, usize) {
    let n_sites = size * size;
    // rounding can push N² u up to N² when u is just below 1
    let t = ((n_sites as f64 * u) as usize).min(n_sites - 1);
    (t % size, t / size)
}

/// Propose and accept or reject one single-spin flip.
///
/// Draw order is fixed: one uniform for the site, then one uniform for the
/// acceptance test. Both are consumed on every call, including downhill moves,
/// so a seeded run is reproducible draw-for-draw.
///
/// On acceptance the spin is reversed, `energy` gains `ΔE` and
/// `magnetization` loses twice the pre-flip spin. On rejection nothing changes.
pub fn metropolis_step<R: Rng + ?Sized>(
    lattice: &mut Lattice,
    energy: &mut f64,
    magnetization: &mut i64,
    temperature: f64,
    rng: &mut R,
) -> StepOutcome {
    let (i, j) = site_from_uniform(lattice.size(), rng.gen::<f64>());
    let s = lattice.spin(i, j);
    let delta_e = flip_delta(s, lattice.neighbor_sum(i, j));
    let r = rng.gen::<f64>();

    let accepted = metropolis_accept(delta_e, temperature, r);
    if accepted {
        lattice.flip(i, j);
        *energy += delta_e as f64;
        *magnetization -= 2 * s as i64;
    }

    StepOutcome {
        site: (i, j),
        delta_e,
        accepted,
    }
}
