use std::path::PathBuf;

use clap::Parser;

use crate::profile::EntityKind;

/// Command-line configuration for the segmentation tool.
#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct AppConfig {
    /// Input CSV file with the exported feature table for the chosen entity.
    #[arg(short = 'i', long = "input", value_name = "FILE")]
    pub input_path: String,

    /// Entity type to segment; selects the expected feature columns.
    #[arg(short = 'e', long = "entity", value_enum)]
    pub entity: EntityKind,

    /// Clustering radius override; skips knee-based estimation.
    #[arg(long, value_name = "RADIUS")]
    pub radius: Option<f64>,

    /// Minimum neighborhood size override; skips the sample-count heuristic.
    #[arg(long, value_name = "COUNT")]
    pub min_neighbors: Option<usize>,

    /// Directory receiving the k-distance diagnostic CSV.
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub diagnostics_dir: PathBuf,

    /// Maximum number of outlier rows listed in the report.
    #[arg(long, default_value_t = 20)]
    pub max_outliers: usize,
}
