use std::collections::VecDeque;

use crate::analysis::neighbors::euclidean;
use crate::data::OUTLIER_LABEL;

// Rows start unvisited; the sweep resolves every one of them to a cluster id
// or to the outlier label.
const UNVISITED: i64 = -2;

/// Density clustering over a scaled feature matrix.
///
/// A row is a core point when at least `min_neighbors` rows (counting
/// itself) lie within `radius`. Clusters are grown from core points by
/// absorbing everything within `radius`, expanding further only through rows
/// that are themselves core. Rows reached by no cluster are labeled
/// [`OUTLIER_LABEL`]. The sweep order is fixed, so identical input always
/// produces the identical partition.
pub fn cluster(rows: &[Vec<f64>], radius: f64, min_neighbors: usize) -> Vec<i64> {
    let mut labels = vec![UNVISITED; rows.len()];
    let mut next_cluster: i64 = 0;

    for index in 0..rows.len() {
        if labels[index] != UNVISITED {
            continue;
        }

        let neighbors = region_query(rows, index, radius);
        if neighbors.len() < min_neighbors {
            // Possibly promoted to a border point by a later expansion.
            labels[index] = OUTLIER_LABEL;
            continue;
        }

        expand_cluster(rows, neighbors, radius, min_neighbors, next_cluster, &mut labels);
        next_cluster += 1;
    }

    labels
}

/// Indices of every row within `radius` of the query row, the query row
/// itself included.
fn region_query(rows: &[Vec<f64>], index: usize, radius: f64) -> Vec<usize> {
    let row = &rows[index];
    rows.iter()
        .enumerate()
        .filter(|(_, other)| euclidean(row, other) <= radius)
        .map(|(other_index, _)| other_index)
        .collect()
}

fn expand_cluster(
    rows: &[Vec<f64>],
    seed_neighbors: Vec<usize>,
    radius: f64,
    min_neighbors: usize,
    cluster_id: i64,
    labels: &mut [i64],
) {
    let mut queue: VecDeque<usize> = seed_neighbors.into();

    while let Some(index) = queue.pop_front() {
        let previous = labels[index];
        if previous != UNVISITED && previous != OUTLIER_LABEL {
            continue;
        }
        labels[index] = cluster_id;

        // A row that already failed the core test joins as a border point
        // and the expansion stops there.
        if previous == OUTLIER_LABEL {
            continue;
        }

        let neighbors = region_query(rows, index, radius);
        if neighbors.len() >= min_neighbors {
            for neighbor in neighbors {
                if labels[neighbor] == UNVISITED || labels[neighbor] == OUTLIER_LABEL {
                    queue.push_back(neighbor);
                }
            }
        }
    }
}
