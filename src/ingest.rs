//! Ingestion boundary: CSV text in, fully materialized `Dataset` out.
//!
//! Numeric-looking fields are coerced to numbers here, so the core only ever
//! re-validates types, it never re-parses raw text.

use crate::data::{Dataset, Value};
use anyhow::{anyhow, Context, Result};
use std::io::{self, Read};

/// Coerce one raw CSV field. Empty fields become Null, fields that parse as
/// a finite float become Number, everything else stays Text.
pub fn coerce_field(raw: &str) -> Value {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Value::Null;
    }
    match trimmed.parse::<f64>() {
        Ok(n) if n.is_finite() => Value::Number(n),
        _ => Value::Text(raw.to_string()),
    }
}

/// Read a CSV document with a header row into a Dataset.
pub fn read_csv<R: Read>(reader: R) -> Result<Dataset> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader
        .headers()
        .context("Failed to read CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect::<Vec<_>>();

    if headers.is_empty() {
        return Err(anyhow!("CSV input has no header row"));
    }

    let mut rows = Vec::new();
    for (i, record) in csv_reader.records().enumerate() {
        let record = record.with_context(|| format!("Failed to parse CSV row {}", i + 2))?;
        let row: Vec<Value> = record.iter().map(coerce_field).collect();
        if row.len() != headers.len() {
            return Err(anyhow!(
                "CSV row {} has {} fields, expected {}",
                i + 2,
                row.len(),
                headers.len()
            ));
        }
        rows.push(row);
    }

    if rows.is_empty() {
        return Err(anyhow!("CSV input must contain at least one data row"));
    }

    Ok(Dataset::new(headers, rows))
}

/// Read a CSV document from stdin.
pub fn read_csv_from_stdin() -> Result<Dataset> {
    read_csv(io::stdin().lock())
}
