use std::path::PathBuf;

use anyhow::{Context, Result};

/// Data behind a k-distance diagnostic: the ascending distance curve, the
/// detected knee (if any), and the parameters the run settled on.
#[derive(Debug, Clone)]
pub struct KneeDiagnostics<'a> {
    pub distances: &'a [f64],
    pub knee_index: Option<usize>,
    pub radius: f64,
    pub min_neighbors: usize,
}

/// Consumer of k-distance diagnostics, e.g. a file writer feeding an
/// external charting step. The pipeline calls it whenever a curve was
/// estimated, and drops any error it returns; diagnostics never change the
/// analysis result.
pub trait DiagnosticsSink {
    fn record_k_distance(&mut self, entity: &str, diagnostics: &KneeDiagnostics<'_>) -> Result<()>;
}

/// Sink that discards every diagnostic.
#[derive(Debug, Default)]
pub struct NullDiagnostics;

impl DiagnosticsSink for NullDiagnostics {
    fn record_k_distance(&mut self, _entity: &str, _diagnostics: &KneeDiagnostics<'_>) -> Result<()> {
        Ok(())
    }
}

/// Writes each curve to `<entity>_k_distance.csv` in the configured
/// directory so it can be charted externally.
#[derive(Debug, Clone)]
pub struct CsvDiagnostics {
    directory: PathBuf,
}

impl CsvDiagnostics {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }
}

impl DiagnosticsSink for CsvDiagnostics {
    fn record_k_distance(&mut self, entity: &str, diagnostics: &KneeDiagnostics<'_>) -> Result<()> {
        let path = self.directory.join(format!("{entity}_k_distance.csv"));
        let mut writer = csv::Writer::from_path(&path)
            .with_context(|| format!("failed to create {:?}", path))?;

        let distance_header = format!("{}-neighbor distance", diagnostics.min_neighbors);
        writer.write_record(["rank", distance_header.as_str(), "marker"])?;
        for (index, distance) in diagnostics.distances.iter().enumerate() {
            let marker = if diagnostics.knee_index == Some(index) {
                format!("knee radius={:.4}", diagnostics.radius)
            } else {
                String::new()
            };
            writer.write_record([(index + 1).to_string(), format!("{distance:.6}"), marker])?;
        }
        writer.flush()?;
        Ok(())
    }
}
