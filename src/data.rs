use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// A single cell value after ingestion-time coercion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Number(f64),
    Text(String),
}

impl Value {
    /// Numeric view of the value, if it has one. Text that parses as a
    /// finite float counts; the ingestion boundary normally coerces such
    /// text already, so this is a re-validation, not a re-parse of raw CSV.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) if n.is_finite() => Some(*n),
            Value::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
            _ => None,
        }
    }

    /// Numeric value with the aggregation coercion rule: non-numeric is 0.
    pub fn coerce(&self) -> f64 {
        self.as_number().unwrap_or(0.0)
    }

    /// Display form used for category domains, legends and tooltips.
    pub fn display(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Number(n) => format!("{}", n),
            Value::Text(s) => s.clone(),
        }
    }
}

/// An ordered tabular dataset. The column set is fixed for all rows; it is
/// derived from the first record at the ingestion boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl Dataset {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        Self { columns, rows }
    }

    /// Create a Dataset from a JSON array of objects. Field order of the
    /// first object defines the column order; missing fields become Null.
    pub fn from_json(value: &JsonValue) -> Result<Self> {
        let array = value
            .as_array()
            .ok_or_else(|| anyhow!("Input data must be a JSON array of objects"))?;

        if array.is_empty() {
            return Err(anyhow!("Input data array is empty"));
        }

        let first_obj = array[0]
            .as_object()
            .ok_or_else(|| anyhow!("Items in array must be objects"))?;

        let columns: Vec<String> = first_obj.keys().cloned().collect();

        let mut rows = Vec::new();
        for item in array {
            let obj = item
                .as_object()
                .ok_or_else(|| anyhow!("Items in array must be objects"))?;

            let mut row = Vec::new();
            for column in &columns {
                let value = match obj.get(column) {
                    Some(JsonValue::Number(n)) => {
                        Value::Number(n.as_f64().unwrap_or(f64::NAN))
                    }
                    Some(JsonValue::String(s)) => crate::ingest::coerce_field(s),
                    Some(JsonValue::Bool(b)) => Value::Text(b.to_string()),
                    Some(JsonValue::Null) | None => Value::Null,
                    _ => return Err(anyhow!("Unsupported value type for field '{}'", column)),
                };
                row.push(value);
            }
            rows.push(row);
        }

        Ok(Self { columns, rows })
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of a column by name (exact match).
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Iterate one column's values, top to bottom. Unknown columns yield an
    /// empty iterator rather than an error.
    pub fn column<'a>(&'a self, name: &str) -> impl Iterator<Item = &'a Value> {
        let idx = self.column_index(name);
        self.rows
            .iter()
            .filter_map(move |row| idx.and_then(|i| row.get(i)))
    }

    pub fn value(&self, row: usize, column: &str) -> Option<&Value> {
        let idx = self.column_index(column)?;
        self.rows.get(row).and_then(|r| r.get(idx))
    }

    /// Min/max of a column's numeric view, skipping non-numeric cells.
    pub fn extent(&self, name: &str) -> Option<(f64, f64)> {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for v in self.column(name) {
            if let Some(n) = v.as_number() {
                if n < min {
                    min = n;
                }
                if n > max {
                    max = n;
                }
            }
        }
        if min.is_finite() && max.is_finite() {
            Some((min, max))
        } else {
            None
        }
    }

    /// Unique display values of a column in first-seen order.
    pub fn unique(&self, name: &str) -> Vec<String> {
        let mut seen = Vec::new();
        for v in self.column(name) {
            let s = v.display();
            if !seen.contains(&s) {
                seen.push(s);
            }
        }
        seen
    }
}

/// A column is numeric iff every row's value has a finite numeric view.
/// One non-numeric cell forces the whole column to categorical; there are no
/// mixed-type columns. Vacuously true for an empty column (scales guard the
/// degenerate domain downstream).
pub fn is_numeric(data: &Dataset, name: &str) -> bool {
    data.column(name).all(|v| v.as_number().is_some())
}
