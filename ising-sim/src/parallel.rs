use rayon::prelude::*;

/// Map a closure over independent chains, optionally in parallel.
///
/// Output order matches `chains`. When `sequential` is true the chains run on
/// the current thread (no rayon overhead, best when the caller already
/// saturates all physical cores).
pub fn par_over_chains<C, T>(
    chains: &[C],
    sequential: bool,
    body: impl Fn(&C) -> T + Send + Sync,
) -> Vec<T>
where
    C: Sync,
    T: Send,
{
    if sequential {
        chains.iter().map(body).collect()
    } else {
        chains.par_iter().map(body).collect()
    }
}
