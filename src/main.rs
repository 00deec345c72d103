use std::path::Path;

use anyhow::{bail, Context, Result};
use clap::Parser;

use sales_segmentation::config::AppConfig;
use sales_segmentation::diagnostics::CsvDiagnostics;
use sales_segmentation::loader::load_feature_table;
use sales_segmentation::output::print_report;
use sales_segmentation::SegmentAnalyzer;

fn main() -> Result<()> {
    let config = AppConfig::parse();
    run(&config)
}

fn run(config: &AppConfig) -> Result<()> {
    let input_path = &config.input_path;
    if !Path::new(input_path).exists() {
        bail!("input file {:?} does not exist", input_path);
    }

    let profile = config.entity.profile();
    let table = load_feature_table(input_path, &profile)
        .with_context(|| format!("failed to load input data from {:?}", input_path))?;
    println!(
        "Loaded {} {} rows with {} feature columns",
        table.len(),
        profile.name,
        table.feature_names.len()
    );

    let analyzer = SegmentAnalyzer::new(profile);
    let mut diagnostics = CsvDiagnostics::new(&config.diagnostics_dir);
    let result = analyzer.analyze(&table, config.radius, config.min_neighbors, &mut diagnostics)?;
    println!(
        "Formed {} clusters (radius = {:.4}, min neighbors = {}); {} outliers",
        result.cluster_count(),
        result.params.radius,
        result.params.min_neighbors,
        result.outliers.len()
    );

    print_report(&result, config.max_outliers);

    Ok(())
}
