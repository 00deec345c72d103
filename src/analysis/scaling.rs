use statrs::statistics::Statistics;

/// Transform each column to zero mean and unit variance over this dataset.
///
/// Constant columns (zero variance) map to all-zero output instead of
/// dividing by zero. The fitted mean and deviation are local to this call;
/// nothing is retained for later datasets.
pub fn standardize(rows: &[Vec<f64>]) -> Vec<Vec<f64>> {
    if rows.is_empty() {
        return Vec::new();
    }

    let feature_count = rows[0].len();
    let mut scaled = vec![vec![0.0; feature_count]; rows.len()];
    for feature in 0..feature_count {
        let column: Vec<f64> = rows.iter().map(|row| row[feature]).collect();
        let mean = column.iter().mean();
        let std_dev = column.iter().population_std_dev();
        if std_dev > 0.0 {
            for (row, value) in column.iter().enumerate() {
                scaled[row][feature] = (value - mean) / std_dev;
            }
        }
    }
    scaled
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(rows: &[Vec<f64>], feature: usize) -> Vec<f64> {
        rows.iter().map(|row| row[feature]).collect()
    }

    #[test]
    fn columns_scale_to_zero_mean_unit_variance() {
        let rows = vec![
            vec![1.0, 100.0],
            vec![2.0, 200.0],
            vec![3.0, 300.0],
            vec![4.0, 400.0],
        ];

        let scaled = standardize(&rows);
        for feature in 0..2 {
            let values = column(&scaled, feature);
            let mean: f64 = values.iter().sum::<f64>() / values.len() as f64;
            let variance: f64 =
                values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
            assert!(mean.abs() < 1e-12);
            assert!((variance.sqrt() - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn constant_column_maps_to_zero() {
        let rows = vec![vec![7.0, 1.0], vec![7.0, 2.0], vec![7.0, 3.0]];

        let scaled = standardize(&rows);
        assert!(column(&scaled, 0).iter().all(|&v| v == 0.0));
        assert!(column(&scaled, 1).iter().any(|&v| v != 0.0));
    }

    #[test]
    fn single_row_maps_to_zero() {
        let scaled = standardize(&[vec![5.0, -3.0]]);
        assert_eq!(scaled, vec![vec![0.0, 0.0]]);
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(standardize(&[]).is_empty());
    }
}
