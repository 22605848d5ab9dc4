//! Evaluation of independent wavefront cells
//!
//! The cells of one anti-diagonal sweep of the Cholesky factor only read
//! earlier sweeps, so a sweep can be computed as a map over its cells. With
//! the `rayon` feature the map runs on the rayon pool; without it the cells
//! are visited in order. Either way the values come back in cell order.

/// Whether sweeps are spread over threads in this build
#[cfg(feature = "rayon")]
pub fn is_parallel_available() -> bool {
    true
}

/// Whether sweeps are spread over threads in this build
#[cfg(not(feature = "rayon"))]
pub fn is_parallel_available() -> bool {
    false
}

/// Map `f` over the cells of a sweep, keeping their order
#[cfg(feature = "rayon")]
pub fn parallel_map<T, U, F>(cells: &[T], f: F) -> Vec<U>
where
    T: Sync,
    U: Send,
    F: Fn(&T) -> U + Sync + Send,
{
    use rayon::prelude::*;
    cells.par_iter().map(f).collect()
}

/// Map `f` over the cells of a sweep, one after the other
#[cfg(not(feature = "rayon"))]
pub fn parallel_map<T, U, F>(cells: &[T], f: F) -> Vec<U>
where
    F: Fn(&T) -> U,
{
    cells.iter().map(f).collect()
}
