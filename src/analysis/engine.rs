use thiserror::Error;

use crate::analysis::{dbscan, scaling, stats, tuning};
use crate::data::{ClusterParams, FeatureTable, LabeledRecord, SegmentationResult};
use crate::diagnostics::{DiagnosticsSink, KneeDiagnostics};
use crate::profile::SegmentProfile;

/// Failures the pipeline surfaces to its caller. Everything else (a knee
/// estimate falling through, a failing diagnostics sink) is recovered
/// internally with documented fallbacks.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("no rows to cluster")]
    EmptyInput,

    #[error("invalid parameter {name}: {message}")]
    InvalidParameter {
        name: &'static str,
        message: &'static str,
    },
}

/// The generic segmentation pipeline, parameterized by an entity profile.
///
/// One instance serves any number of independent runs; every run fits its
/// own scaler, derives its own parameters, and returns a fresh result, so
/// concurrent callers only need their own input tables.
#[derive(Debug, Clone)]
pub struct SegmentAnalyzer {
    profile: SegmentProfile,
}

impl SegmentAnalyzer {
    pub fn new(profile: SegmentProfile) -> Self {
        Self { profile }
    }

    pub fn entity(&self) -> &str {
        self.profile.name
    }

    /// Run the full pipeline: standardize, resolve parameters, cluster,
    /// aggregate.
    ///
    /// Caller-supplied overrides are used verbatim and skip the matching
    /// estimation step entirely; with both present no estimation runs at
    /// all and the sink receives nothing.
    pub fn analyze(
        &self,
        table: &FeatureTable,
        radius_override: Option<f64>,
        min_neighbors_override: Option<usize>,
        sink: &mut dyn DiagnosticsSink,
    ) -> Result<SegmentationResult, AnalysisError> {
        if table.is_empty() {
            return Err(AnalysisError::EmptyInput);
        }
        if let Some(radius) = radius_override {
            if !radius.is_finite() || radius <= 0.0 {
                return Err(AnalysisError::InvalidParameter {
                    name: "radius",
                    message: "must be a positive, finite number",
                });
            }
        }
        if min_neighbors_override == Some(0) {
            return Err(AnalysisError::InvalidParameter {
                name: "min_neighbors",
                message: "must be at least 1",
            });
        }

        let matrix: Vec<Vec<f64>> = table
            .records
            .iter()
            .map(|record| record.features.clone())
            .collect();
        let scaled = scaling::standardize(&matrix);

        let estimate = match radius_override {
            Some(_) => None,
            None => {
                // The estimation neighborhood is the caller's override when
                // present; otherwise 2, independent of the sample-count
                // selection below.
                let neighborhood = min_neighbors_override.unwrap_or(2);
                Some(tuning::choose_radius(&scaled, neighborhood))
            }
        };
        let radius = match (&estimate, radius_override) {
            (_, Some(radius)) => radius,
            (Some(estimate), None) => estimate.radius,
            (None, None) => unreachable!(),
        };
        let min_neighbors =
            min_neighbors_override.unwrap_or_else(|| tuning::choose_min_neighbors(table.len()));

        if let Some(estimate) = &estimate {
            let diagnostics = KneeDiagnostics {
                distances: &estimate.distance_curve,
                knee_index: estimate.knee_index,
                radius,
                min_neighbors,
            };
            // Best effort only; a failing sink must not disturb the run.
            let _ = sink.record_k_distance(self.profile.name, &diagnostics);
        }

        let labels = dbscan::cluster(&scaled, radius, min_neighbors);
        let records: Vec<LabeledRecord> = table
            .records
            .iter()
            .zip(&labels)
            .map(|(record, &label)| LabeledRecord {
                id: record.id.clone(),
                features: record.features.clone(),
                label,
            })
            .collect();
        let outliers: Vec<LabeledRecord> = records
            .iter()
            .filter(|record| record.is_outlier())
            .cloned()
            .collect();
        let cluster_stats = stats::cluster_feature_stats(&records, &table.feature_names);

        Ok(SegmentationResult {
            entity: self.profile.name.to_string(),
            feature_names: table.feature_names.clone(),
            records,
            outliers,
            cluster_stats,
            params: ClusterParams {
                radius,
                min_neighbors,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use anyhow::anyhow;

    use super::*;
    use crate::data::{EntityRecord, OUTLIER_LABEL};
    use crate::diagnostics::NullDiagnostics;
    use crate::profile::EntityKind;

    /// Sink that remembers whether estimation diagnostics ever reached it.
    #[derive(Default)]
    struct ProbeSink {
        calls: usize,
        curve_len: usize,
    }

    impl DiagnosticsSink for ProbeSink {
        fn record_k_distance(
            &mut self,
            _entity: &str,
            diagnostics: &KneeDiagnostics<'_>,
        ) -> anyhow::Result<()> {
            self.calls += 1;
            self.curve_len = diagnostics.distances.len();
            Ok(())
        }
    }

    struct FailingSink;

    impl DiagnosticsSink for FailingSink {
        fn record_k_distance(
            &mut self,
            _entity: &str,
            _diagnostics: &KneeDiagnostics<'_>,
        ) -> anyhow::Result<()> {
            Err(anyhow!("sink exploded"))
        }
    }

    fn table(points: &[(f64, f64)]) -> FeatureTable {
        FeatureTable {
            feature_names: vec!["order_count".to_string(), "total_quantity".to_string()],
            records: points
                .iter()
                .enumerate()
                .map(|(index, &(x, y))| EntityRecord {
                    id: format!("row-{index}"),
                    features: vec![x, y],
                })
                .collect(),
        }
    }

    fn analyzer() -> SegmentAnalyzer {
        SegmentAnalyzer::new(EntityKind::Customer.profile())
    }

    #[test]
    fn empty_table_is_rejected() {
        let empty = FeatureTable {
            feature_names: vec!["order_count".to_string()],
            records: Vec::new(),
        };

        let err = analyzer()
            .analyze(&empty, None, None, &mut NullDiagnostics)
            .unwrap_err();
        assert!(matches!(err, AnalysisError::EmptyInput));
    }

    #[test]
    fn non_positive_overrides_are_rejected() {
        let table = table(&[(0.0, 0.0), (1.0, 1.0)]);

        for radius in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let err = analyzer()
                .analyze(&table, Some(radius), None, &mut NullDiagnostics)
                .unwrap_err();
            assert!(matches!(
                err,
                AnalysisError::InvalidParameter { name: "radius", .. }
            ));
        }

        let err = analyzer()
            .analyze(&table, None, Some(0), &mut NullDiagnostics)
            .unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::InvalidParameter {
                name: "min_neighbors",
                ..
            }
        ));
    }

    #[test]
    fn both_overrides_bypass_estimation_entirely() {
        let table = table(&[(0.0, 0.0), (0.0, 1.0), (10.0, 0.0), (10.0, 1.0)]);
        let mut probe = ProbeSink::default();

        let result = analyzer()
            .analyze(&table, Some(0.2), Some(2), &mut probe)
            .unwrap();
        assert_eq!(probe.calls, 0);
        assert_eq!(result.params, ClusterParams { radius: 0.2, min_neighbors: 2 });
    }

    #[test]
    fn estimated_run_reports_the_curve_once() {
        let table = table(&[(0.0, 0.0), (0.0, 1.0), (10.0, 0.0), (10.0, 1.0), (50.0, 50.0)]);
        let mut probe = ProbeSink::default();

        analyzer().analyze(&table, None, None, &mut probe).unwrap();
        assert_eq!(probe.calls, 1);
        assert_eq!(probe.curve_len, table.len());
    }

    #[test]
    fn failing_sink_does_not_disturb_the_result() {
        let points = [(0.0, 0.0), (0.0, 1.0), (10.0, 0.0), (10.0, 1.0), (50.0, 50.0)];
        let table = table(&points);

        let with_failing = analyzer()
            .analyze(&table, None, None, &mut FailingSink)
            .unwrap();
        let with_null = analyzer()
            .analyze(&table, None, None, &mut NullDiagnostics)
            .unwrap();

        let failing_labels: Vec<i64> = with_failing.records.iter().map(|r| r.label).collect();
        let null_labels: Vec<i64> = with_null.records.iter().map(|r| r.label).collect();
        assert_eq!(failing_labels, null_labels);
        assert_eq!(with_failing.params, with_null.params);
    }

    #[test]
    fn every_record_is_labeled_and_outliers_match() {
        let table = table(&[(0.0, 0.0), (0.0, 1.0), (10.0, 0.0), (10.0, 1.0), (50.0, 50.0)]);

        let result = analyzer()
            .analyze(&table, Some(0.2), Some(2), &mut NullDiagnostics)
            .unwrap();
        assert_eq!(result.records.len(), table.len());
        let outlier_ids: Vec<&str> = result
            .records
            .iter()
            .filter(|record| record.label == OUTLIER_LABEL)
            .map(|record| record.id.as_str())
            .collect();
        let reported: Vec<&str> = result.outliers.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(outlier_ids, reported);
        assert_eq!(
            result.cluster_stats.values().next().unwrap().len(),
            table.feature_names.len()
        );
    }
}
