use std::collections::BTreeMap;

use serde::Serialize;

/// Label assigned to rows that belong to no cluster.
pub const OUTLIER_LABEL: i64 = -1;

/// Single entity row: source key plus one numeric value per feature column.
#[derive(Debug, Clone, Serialize)]
pub struct EntityRecord {
    pub id: String,
    pub features: Vec<f64>,
}

/// Feature matrix for one entity type, one record per row.
///
/// Missing values are already substituted with zero by the loader; the
/// analysis stages assume the matrix is complete.
#[derive(Debug, Clone, Serialize)]
pub struct FeatureTable {
    pub feature_names: Vec<String>,
    pub records: Vec<EntityRecord>,
}

impl FeatureTable {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Entity row with its assigned cluster label.
#[derive(Debug, Clone, Serialize)]
pub struct LabeledRecord {
    pub id: String,
    pub features: Vec<f64>,
    pub label: i64,
}

impl LabeledRecord {
    pub fn is_outlier(&self) -> bool {
        self.label == OUTLIER_LABEL
    }
}

/// The (radius, min_neighbors) pair a clustering run actually used.
///
/// Either supplied by the caller or derived once from the dataset; fixed for
/// the remainder of the run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClusterParams {
    pub radius: f64,
    pub min_neighbors: usize,
}

/// Mean and sample standard deviation of one feature within one cluster.
///
/// `std_dev` is NaN for a single-member cluster (N-1 denominator).
#[derive(Debug, Clone, Copy, Serialize)]
pub struct FeatureStats {
    pub mean: f64,
    pub std_dev: f64,
}

/// Per-cluster, per-feature statistics, including the outlier pseudo-cluster.
pub type ClusterStatistics = BTreeMap<i64, BTreeMap<String, FeatureStats>>;

/// Everything one analysis run produces. Owned by the caller; no state is
/// shared with later runs.
#[derive(Debug, Clone, Serialize)]
pub struct SegmentationResult {
    pub entity: String,
    pub feature_names: Vec<String>,
    pub records: Vec<LabeledRecord>,
    pub outliers: Vec<LabeledRecord>,
    pub cluster_stats: ClusterStatistics,
    pub params: ClusterParams,
}

impl SegmentationResult {
    /// Number of discovered clusters, not counting the outlier set.
    pub fn cluster_count(&self) -> usize {
        self.cluster_stats
            .keys()
            .filter(|&&label| label != OUTLIER_LABEL)
            .count()
    }
}
