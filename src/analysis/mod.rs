pub mod dbscan;
pub mod engine;
pub mod knee;
pub mod neighbors;
pub mod scaling;
pub mod stats;
pub mod tuning;

pub use dbscan::cluster;
pub use engine::{AnalysisError, SegmentAnalyzer};
pub use knee::find_knee;
pub use neighbors::kth_neighbor_distances;
pub use scaling::standardize;
pub use stats::cluster_feature_stats;
pub use tuning::{choose_min_neighbors, choose_radius, RadiusEstimate, FALLBACK_RADIUS};
