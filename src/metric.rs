/*
 * Metric Module
 *
 * Mean pairwise distance of the swarm and its mapping to a loudness in
 * [0, 1]. Both are O(n^2) over positions and run on the simulation side,
 * once per step, never in the audio callback.
 */

use nannou::prelude::Vec3;
use rayon::prelude::*;

use crate::error::{Result, SwarmError};

/// Arithmetic mean of the Euclidean distances over all unordered pairs
pub fn mean_pairwise_distance(positions: &[Vec3]) -> Result<f32> {
    let n = positions.len();
    if n < 2 {
        return Err(SwarmError::InsufficientBodies { count: n });
    }

    let mut total = 0.0f32;
    for i in 0..n {
        for j in (i + 1)..n {
            total += positions[i].distance(positions[j]);
        }
    }

    Ok(total / pair_count(n))
}

/// Same as [`mean_pairwise_distance`], rows summed on the rayon pool
pub fn mean_pairwise_distance_parallel(positions: &[Vec3]) -> Result<f32> {
    let n = positions.len();
    if n < 2 {
        return Err(SwarmError::InsufficientBodies { count: n });
    }

    let total: f32 = (0..n)
        .into_par_iter()
        .map(|i| {
            positions[i + 1..]
                .iter()
                .map(|other| positions[i].distance(*other))
                .sum::<f32>()
        })
        .sum();

    Ok(total / pair_count(n))
}

// C(n, 2)
#[inline]
fn pair_count(n: usize) -> f32 {
    (n * (n - 1) / 2) as f32
}

/// Inverse-distance falloff: `clamp(1 / (1 + d), 0, 1)`.
///
/// Equals 1 at `d = 0` and decreases strictly with `d`. NaN maps to silence.
pub fn amplitude_for_distance(mean_distance: f32) -> f32 {
    let amplitude = 1.0 / (1.0 + mean_distance);
    if amplitude.is_nan() {
        return 0.0;
    }
    amplitude.clamp(0.0, 1.0)
}

/// Mean pairwise distance on the sequential or the rayon path
pub fn mean_distance(positions: &[Vec3], parallel: bool) -> Result<f32> {
    if parallel {
        mean_pairwise_distance_parallel(positions)
    } else {
        mean_pairwise_distance(positions)
    }
}

/// Amplitude for a set of positions; fewer than two bodies is silence
pub fn amplitude_from_positions(positions: &[Vec3], parallel: bool) -> f32 {
    mean_distance(positions, parallel).map_or(0.0, amplitude_for_distance)
}
