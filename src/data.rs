use anyhow::{Context, Result};
use serde_json::{Map, Number, Value};
use std::path::Path;

/// Training rows kept as ordered JSON records so `/data/sample` can serve
/// whatever columns the file has. Loaded once at startup, read-only after.
pub struct TrainTable {
    rows: Vec<Value>,
}

impl TrainTable {
    pub fn load(path: &Path) -> Result<Self> {
        let mut reader = csv::Reader::from_path(path)
            .with_context(|| format!("failed to open training data at {}", path.display()))?;
        let headers = reader.headers()?.clone();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record =
                record.with_context(|| format!("bad CSV record in {}", path.display()))?;
            let mut obj = Map::with_capacity(headers.len());
            for (name, cell) in headers.iter().zip(record.iter()) {
                obj.insert(name.to_string(), cell_value(cell));
            }
            rows.push(Value::Object(obj));
        }

        Ok(Self { rows })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// First `n` rows in file order, clamped to the table size.
    pub fn head(&self, n: usize) -> &[Value] {
        &self.rows[..n.min(self.rows.len())]
    }
}

// Numeric-looking cells become JSON numbers, everything else stays a string.
fn cell_value(cell: &str) -> Value {
    if let Ok(i) = cell.parse::<i64>() {
        return Value::Number(i.into());
    }
    if let Ok(f) = cell.parse::<f64>() {
        if let Some(n) = Number::from_f64(f) {
            return Value::Number(n);
        }
    }
    Value::String(cell.to_string())
}
