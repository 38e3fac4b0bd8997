use super::ExportError;
use crate::features::FeatureVector;
use std::io::Write;
use std::path::Path;

/// Export a feature row as a two-line CSV: column names, then values
pub fn export_feature_row<P: AsRef<Path>>(
    features: &FeatureVector,
    output_path: P,
) -> Result<(), ExportError> {
    let file = std::fs::File::create(output_path)?;
    write_feature_row(features, file)
}

/// Write a feature row as CSV to any writer
pub fn write_feature_row<W: Write>(features: &FeatureVector, writer: W) -> Result<(), ExportError> {
    let mut writer = ::csv::Writer::from_writer(writer);

    let (names, values): (Vec<&str>, Vec<String>) = features
        .iter()
        .map(|(name, value)| (name, value.to_string()))
        .unzip();

    writer.write_record(&names).map_err(csv_error)?;
    writer.write_record(&values).map_err(csv_error)?;
    writer.flush()?;

    Ok(())
}

fn csv_error(error: ::csv::Error) -> ExportError {
    ExportError::SerializationError(error.to_string())
}
