use std::collections::BTreeMap;

use itertools::Itertools;
use statrs::statistics::Statistics;

use crate::data::{ClusterStatistics, FeatureStats, LabeledRecord};

/// Per-cluster, per-feature mean and sample standard deviation over the
/// original (unscaled) feature values.
///
/// Every label present in the input appears in the output, the outlier
/// pseudo-cluster included. Standard deviation uses the N-1 denominator, so
/// a single-member cluster reports NaN rather than hiding it.
pub fn cluster_feature_stats(
    records: &[LabeledRecord],
    feature_names: &[String],
) -> ClusterStatistics {
    let groups: BTreeMap<i64, Vec<&LabeledRecord>> = records
        .iter()
        .map(|record| (record.label, record))
        .into_group_map()
        .into_iter()
        .collect();

    groups
        .into_iter()
        .map(|(label, members)| {
            let feature_stats: BTreeMap<String, FeatureStats> = feature_names
                .iter()
                .enumerate()
                .map(|(index, name)| {
                    let values: Vec<f64> =
                        members.iter().map(|record| record.features[index]).collect();
                    let stats = FeatureStats {
                        mean: values.iter().mean(),
                        std_dev: values.iter().std_dev(),
                    };
                    (name.clone(), stats)
                })
                .collect();
            (label, feature_stats)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::OUTLIER_LABEL;

    fn record(id: &str, features: Vec<f64>, label: i64) -> LabeledRecord {
        LabeledRecord {
            id: id.to_string(),
            features,
            label,
        }
    }

    fn names(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn every_label_appears_including_outliers() {
        let records = vec![
            record("a", vec![1.0], 0),
            record("b", vec![3.0], 0),
            record("c", vec![10.0], 1),
            record("d", vec![99.0], OUTLIER_LABEL),
        ];

        let stats = cluster_feature_stats(&records, &names(&["volume"]));
        assert_eq!(
            stats.keys().copied().collect::<Vec<_>>(),
            vec![OUTLIER_LABEL, 0, 1]
        );
    }

    #[test]
    fn mean_and_sample_std_match_hand_computation() {
        let records = vec![
            record("a", vec![2.0, 10.0], 0),
            record("b", vec![4.0, 20.0], 0),
            record("c", vec![6.0, 30.0], 0),
        ];

        let stats = cluster_feature_stats(&records, &names(&["qty", "price"]));
        let qty = &stats[&0]["qty"];
        assert!((qty.mean - 4.0).abs() < 1e-12);
        assert!((qty.std_dev - 2.0).abs() < 1e-12);
        let price = &stats[&0]["price"];
        assert!((price.mean - 20.0).abs() < 1e-12);
        assert!((price.std_dev - 10.0).abs() < 1e-12);
    }

    #[test]
    fn single_member_cluster_reports_nan_std() {
        let records = vec![record("only", vec![7.5], 3)];

        let stats = cluster_feature_stats(&records, &names(&["qty"]));
        let qty = &stats[&3]["qty"];
        assert_eq!(qty.mean, 7.5);
        assert!(qty.std_dev.is_nan());
    }

    #[test]
    fn empty_input_yields_empty_statistics() {
        let stats = cluster_feature_stats(&[], &names(&["qty"]));
        assert!(stats.is_empty());
    }
}
