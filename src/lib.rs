//! Density-based segmentation of tabular business data.
//!
//! One generic pipeline segments customers, products, suppliers, or
//! countries into clusters plus an outlier set: standardize the feature
//! matrix, auto-tune the clustering radius from the knee of the k-distance
//! curve (and the minimum neighborhood size from the sample count), run
//! density clustering, and aggregate per-cluster feature statistics. Only
//! the feature layout differs between entity types.

pub mod analysis;
pub mod config;
pub mod data;
pub mod diagnostics;
pub mod loader;
pub mod output;
pub mod profile;

pub use analysis::{AnalysisError, SegmentAnalyzer};
pub use data::{
    ClusterParams, ClusterStatistics, EntityRecord, FeatureStats, FeatureTable, LabeledRecord,
    SegmentationResult, OUTLIER_LABEL,
};
pub use diagnostics::{CsvDiagnostics, DiagnosticsSink, KneeDiagnostics, NullDiagnostics};
pub use loader::{load_feature_table, LoaderError};
pub use profile::{EntityKind, SegmentProfile};
