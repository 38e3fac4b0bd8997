//! Export of model input rows
//!
//! Writes the exact feature row sent to the wellness model, as CSV
//! (header plus one row) or as a JSON object, so it can be inspected or
//! replayed against an offline copy of the model.

use crate::features::FeatureVector;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

pub mod csv;
pub mod json;

/// Export format types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn from_str(s: &str) -> Result<Self, ExportError> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            _ => Err(ExportError::UnsupportedFormat(s.to_string())),
        }
    }

    /// Format implied by a file extension
    pub fn from_path(path: &Path) -> Result<Self, ExportError> {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| ExportError::UnsupportedFormat(path.display().to_string()))?;
        Self::from_str(ext)
    }
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<ExportError> for crate::error::HealthError {
    fn from(error: ExportError) -> Self {
        match error {
            ExportError::IoError(e) => crate::error::HealthError::Io(e),
            other => crate::error::HealthError::Export(other.to_string()),
        }
    }
}

/// Write a feature row to `output_path` in the given format
pub fn export_features<P: AsRef<Path>>(
    features: &FeatureVector,
    output_path: P,
    format: ExportFormat,
) -> Result<(), ExportError> {
    match format {
        ExportFormat::Csv => csv::export_feature_row(features, output_path),
        ExportFormat::Json => json::export_json(features, output_path),
    }
}
