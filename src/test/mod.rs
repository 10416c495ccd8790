//! Shared helpers for randomized tests.


use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::point::{Distance, KdPoint};

/// `n` uniformly random points in `[-extent, extent)` on every axis.
pub(crate) fn random_points<const D: usize>(seed: u64, n: usize, extent: f64) -> Vec<[f64; D]> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            let mut p = [0.0; D];
            for c in p.iter_mut() {
                *c = rng.gen_range(-extent..extent);
            }
            p
        })
        .collect()
}

/// `n` random points on a small integer grid, so that many coordinates and distances tie.
pub(crate) fn random_grid_points(seed: u64, n: usize, side: i32) -> Vec<[i32; 2]> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| [rng.gen_range(0..side), rng.gen_range(0..side)])
        .collect()
}

/// Comparable distances from `query` to every point, ascending.
pub(crate) fn brute_force_distances<P: KdPoint>(points: &[P], query: &P) -> Vec<Distance<P>> {
    let mut dists: Vec<Distance<P>> = points
        .iter()
        .map(|p| query.comparable_distance(p))
        .collect();
    dists.sort_by(|a, b| a.partial_cmp(b).unwrap());
    dists
}
