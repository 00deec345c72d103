use crate::analysis::knee::find_knee;
use crate::analysis::neighbors::kth_neighbor_distances;

/// Radius used whenever knee estimation cannot produce one. A reasonable
/// order-of-magnitude default for standardized features.
pub const FALLBACK_RADIUS: f64 = 0.5;

/// Outcome of radius estimation, including the k-distance curve so callers
/// can hand it to diagnostics.
#[derive(Debug, Clone)]
pub struct RadiusEstimate {
    pub radius: f64,
    pub knee_index: Option<usize>,
    pub distance_curve: Vec<f64>,
}

/// Estimate a clustering radius from the k-distance curve of the scaled
/// matrix.
///
/// Every failure mode is recovered here, never propagated: too few samples
/// for the requested neighborhood, a numerically unstable distance curve, or
/// a curve without a knee all fall back to [`FALLBACK_RADIUS`].
pub fn choose_radius(scaled: &[Vec<f64>], neighborhood: usize) -> RadiusEstimate {
    if neighborhood == 0 || neighborhood > scaled.len() {
        // Not enough samples to rank a k-th neighbor.
        return RadiusEstimate {
            radius: FALLBACK_RADIUS,
            knee_index: None,
            distance_curve: Vec::new(),
        };
    }

    let curve = kth_neighbor_distances(scaled, neighborhood);
    if curve.iter().any(|distance| !distance.is_finite()) {
        // Numerically unstable curve.
        return RadiusEstimate {
            radius: FALLBACK_RADIUS,
            knee_index: None,
            distance_curve: curve,
        };
    }

    match find_knee(&curve) {
        Some(index) => RadiusEstimate {
            radius: curve[index],
            knee_index: Some(index),
            distance_curve: curve,
        },
        // Degenerate curve, no knee.
        None => RadiusEstimate {
            radius: FALLBACK_RADIUS,
            knee_index: None,
            distance_curve: curve,
        },
    }
}

/// Minimum neighborhood size as a function of sample count alone.
pub fn choose_min_neighbors(sample_count: usize) -> usize {
    if sample_count < 100 {
        2
    } else if sample_count < 1000 {
        3
    } else {
        4
    }
}
