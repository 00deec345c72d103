use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use thiserror::Error;

use crate::data::{EntityRecord, FeatureTable};
use crate::profile::SegmentProfile;

#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("input file contains no data rows")]
    Empty,

    #[error("input file is missing required column '{0}'")]
    MissingColumn(String),

    #[error("failed to parse numeric field '{field}' from value '{value}'")]
    ParseNumber { field: String, value: String },
}

/// Load the feature table for one entity type from an exported CSV.
///
/// Columns are addressed by header name. Empty cells are substituted with
/// zero, the same lossy missing-value policy the extraction applies, so the
/// clustering stages never see a hole in the matrix.
pub fn load_feature_table<P: AsRef<Path>>(path: P, profile: &SegmentProfile) -> Result<FeatureTable> {
    let path_ref = path.as_ref();
    let file = File::open(path_ref).with_context(|| format!("failed to open {:?}", path_ref))?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(file);

    let headers = reader.headers()?.clone();
    let id_index = column_index(&headers, profile.id_column)?;
    let feature_indices: Vec<usize> = profile
        .feature_columns
        .iter()
        .map(|column| column_index(&headers, column))
        .collect::<Result<_>>()?;

    let mut records = Vec::new();
    for record in reader.records() {
        let record = record?;
        if record.iter().all(|field| field.is_empty()) {
            continue;
        }

        let id = record.get(id_index).unwrap_or_default().to_string();
        let mut features = Vec::with_capacity(feature_indices.len());
        for (&index, &column) in feature_indices.iter().zip(profile.feature_columns) {
            features.push(parse_cell(record.get(index), column)?);
        }
        records.push(EntityRecord { id, features });
    }

    if records.is_empty() {
        return Err(LoaderError::Empty.into());
    }

    Ok(FeatureTable {
        feature_names: profile
            .feature_columns
            .iter()
            .map(|column| column.to_string())
            .collect(),
        records,
    })
}

fn column_index(headers: &csv::StringRecord, column: &str) -> Result<usize> {
    headers
        .iter()
        .position(|header| header.eq_ignore_ascii_case(column))
        .ok_or_else(|| LoaderError::MissingColumn(column.to_string()).into())
}

fn parse_cell(value: Option<&str>, field: &str) -> Result<f64> {
    let value = value.unwrap_or_default();
    // Absent and empty cells both fall under the fill-with-zero policy.
    if value.is_empty() {
        return Ok(0.0);
    }
    value
        .replace(',', "")
        .parse::<f64>()
        .map_err(|_| LoaderError::ParseNumber {
            field: field.to_string(),
            value: value.to_string(),
        })
        .map_err(anyhow::Error::from)
}
