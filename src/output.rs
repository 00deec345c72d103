use chrono::Local;
use itertools::Itertools;
use tabled::{settings::Style, Table, Tabled};

use crate::data::{LabeledRecord, SegmentationResult, OUTLIER_LABEL};

#[derive(Tabled)]
struct SummaryRow {
    #[tabled(rename = "Cluster")]
    cluster: String,
    #[tabled(rename = "Rows")]
    rows: String,
    #[tabled(rename = "Share")]
    share: String,
}

#[derive(Tabled)]
struct StatRow {
    #[tabled(rename = "Cluster")]
    cluster: String,
    #[tabled(rename = "Feature")]
    feature: String,
    #[tabled(rename = "Mean")]
    mean: String,
    #[tabled(rename = "Std Dev")]
    std_dev: String,
}

#[derive(Tabled)]
struct OutlierRow {
    #[tabled(rename = "Id")]
    id: String,
    #[tabled(rename = "Features")]
    features: String,
}

fn cluster_name(label: i64) -> String {
    if label == OUTLIER_LABEL {
        "outliers".to_string()
    } else {
        label.to_string()
    }
}

pub fn print_report(result: &SegmentationResult, max_outliers: usize) {
    println!("\n=== {} Segmentation Report ===\n", capitalize(&result.entity));
    println!("Generated: {}", Local::now().format("%Y-%m-%d %H:%M"));
    println!(
        "Parameters: radius = {:.4}, min neighbors = {}",
        result.params.radius, result.params.min_neighbors
    );
    println!(
        "Rows: {} | Clusters: {} | Outliers: {}",
        result.records.len(),
        result.cluster_count(),
        result.outliers.len()
    );

    let total = result.records.len().max(1);
    let summary: Vec<SummaryRow> = result
        .cluster_stats
        .iter()
        .map(|(&label, _)| {
            let size = result
                .records
                .iter()
                .filter(|record| record.label == label)
                .count();
            SummaryRow {
                cluster: cluster_name(label),
                rows: size.to_string(),
                share: format!("{:.1}%", 100.0 * size as f64 / total as f64),
            }
        })
        .collect();
    let mut summary_table = Table::new(summary);
    summary_table.with(Style::rounded());
    println!("\n{summary_table}");

    let stats: Vec<StatRow> = result
        .cluster_stats
        .iter()
        .flat_map(|(&label, features)| {
            features.iter().map(move |(name, stats)| StatRow {
                cluster: cluster_name(label),
                feature: name.clone(),
                mean: format!("{:.2}", stats.mean),
                std_dev: if stats.std_dev.is_nan() {
                    "-".to_string()
                } else {
                    format!("{:.2}", stats.std_dev)
                },
            })
        })
        .collect();
    let mut stats_table = Table::new(stats);
    stats_table.with(Style::rounded());
    println!("\n{stats_table}");

    if result.outliers.is_empty() {
        println!("\nNo outliers detected.");
        return;
    }

    let listed: Vec<OutlierRow> = result
        .outliers
        .iter()
        .take(max_outliers)
        .map(|record| OutlierRow {
            id: record.id.clone(),
            features: feature_summary(record, &result.feature_names),
        })
        .collect();
    let mut outlier_table = Table::new(listed);
    outlier_table.with(Style::rounded());
    println!("\n{outlier_table}");
    if result.outliers.len() > max_outliers {
        println!(
            "({} more outliers not shown)",
            result.outliers.len() - max_outliers
        );
    }
}

fn feature_summary(record: &LabeledRecord, feature_names: &[String]) -> String {
    record
        .features
        .iter()
        .zip(feature_names)
        .map(|(value, name)| format!("{name}={value:.2}"))
        .join(", ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
