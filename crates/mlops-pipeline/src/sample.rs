//! Smoke-test payload: a fixed sample of the iris dataset, label column removed.

use crate::error::PipelineError;
use std::io::Read;

/// Rows 40..50 of each 50-row class block, minus the very last row (29 rows).
pub fn sample_indices() -> Vec<usize> {
    let mut indices: Vec<usize> = [0usize, 50, 100]
        .iter()
        .flat_map(|block| (40..50).map(move |offset| block + offset))
        .collect();
    indices.pop();
    indices
}

/// Read a headerless CSV (label first) and render the sampled rows without the
/// label, one record per line, no header.
pub fn sample_payload<R: Read>(reader: R) -> Result<String, PipelineError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_reader(reader);
    let records = rdr
        .records()
        .collect::<Result<Vec<csv::StringRecord>, csv::Error>>()?;

    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    for idx in sample_indices() {
        let record = records.get(idx).ok_or_else(|| {
            PipelineError::Payload(format!(
                "dataset has {} rows, row {} is required",
                records.len(),
                idx
            ))
        })?;
        wtr.write_record(record.iter().skip(1))?;
    }
    let bytes = wtr
        .into_inner()
        .map_err(|e| PipelineError::Payload(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| PipelineError::Payload(e.to_string()))
}
