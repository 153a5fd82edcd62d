// src/dataset.rs
// In-memory, column-oriented view of the reloaded spreadsheet.

use std::{collections::HashMap, fmt};

use crate::{
    error::ReportError,
    sheet::{CellKind, SheetGrid},
};

#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Empty,
    Number(f64),
    Text(String),
}

impl Value {
    /// Text that reads as a finite number becomes `Number`.
    pub fn infer(raw: &str) -> Value {
        let t = raw.trim();
        if t.is_empty() {
            return Value::Empty;
        }
        match t.parse::<f64>() {
            Ok(n) if n.is_finite() && looks_numeric(t) => Value::Number(n),
            _ => Value::Text(s!(raw)),
        }
    }

    pub fn is_empty(&self) -> bool { matches!(self, Value::Empty) }

    pub fn as_f64(&self) -> Option<f64> {
        match self { Value::Number(n) => Some(*n), _ => None }
    }
}

// Rust parses "inf", "NaN" and "1e5"; only plain decimal/exponent text counts.
fn looks_numeric(t: &str) -> bool {
    t.bytes().all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'-' | b'+' | b'e' | b'E'))
        && t.bytes().any(|b| b.is_ascii_digit())
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Empty => Ok(()),
            Value::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => write!(f, "{}", *n as i64),
            Value::Number(n) => write!(f, "{n}"),
            Value::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Column {
    pub name: String,
    pub values: Vec<Value>,
}

/// Named columns of equal length.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Dataset {
    columns: Vec<Column>,
    rows: usize,
}

impl Dataset {
    pub fn new(columns: Vec<Column>) -> Self {
        let rows = columns.iter().map(|c| c.values.len()).max().unwrap_or(0);
        let mut columns = columns;
        for col in &mut columns {
            col.values.resize(rows, Value::Empty);
        }
        Self { columns, rows }
    }

    /// First grid row is the header; the rest are data rows.
    ///
    /// Blank header cells become `Unnamed: <i>`, repeated names get `.1`, `.2`, …
    pub fn from_grid(grid: &SheetGrid) -> Self {
        let dense = grid.dense();
        let Some((header, body)) = dense.split_first() else {
            return Self::default();
        };

        let mut seen: HashMap<String, usize> = HashMap::new();
        let mut columns: Vec<Column> = header
            .iter()
            .enumerate()
            .map(|(i, cell)| {
                let base = match cell {
                    Some(c) if !c.value.trim().is_empty() => header_text(c.value.as_str(), c.kind),
                    _ => format!("Unnamed: {i}"),
                };
                let n = seen.entry(base.clone()).or_insert(0);
                let name = if *n == 0 { base.clone() } else { format!("{base}.{n}") };
                *n += 1;
                Column { name, values: Vec::with_capacity(body.len()) }
            })
            .collect();

        for row in body {
            for (col, cell) in columns.iter_mut().zip(row.iter()) {
                col.values.push(match cell {
                    None => Value::Empty,
                    Some(c) => match c.kind {
                        CellKind::Number => c.value.trim().parse::<f64>().map(Value::Number).unwrap_or_else(|_| Value::infer(&c.value)),
                        CellKind::Bool => Value::Text(s!(if c.value == "1" { "TRUE" } else { "FALSE" })),
                        CellKind::Text | CellKind::Error => Value::infer(&c.value),
                    },
                });
            }
        }
        Self::new(columns)
    }

    pub fn shape(&self) -> (usize, usize) { (self.rows, self.columns.len()) }

    pub fn row_count(&self) -> usize { self.rows }

    pub fn column_count(&self) -> usize { self.columns.len() }

    pub fn columns(&self) -> &[Column] { &self.columns }

    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Like [`Dataset::column`] but a missing column is an error naming what exists.
    pub fn require(&self, name: &str) -> Result<&Column, ReportError> {
        self.column(name)
            .ok_or_else(|| ReportError::missing_column(name, &self.column_names()))
    }

    pub fn require_columns(&self, names: &[&str]) -> Result<(), ReportError> {
        for name in names {
            self.require(name)?;
        }
        Ok(())
    }

    /// Values of row `i` in column order.
    pub fn row(&self, i: usize) -> Vec<&Value> {
        self.columns.iter().filter_map(|c| c.values.get(i)).collect()
    }

    /// First `n` rows.
    pub fn head(&self, n: usize) -> Dataset {
        let take = n.min(self.rows);
        Dataset::new(
            self.columns
                .iter()
                .map(|c| Column { name: c.name.clone(), values: c.values[..take].to_vec() })
                .collect(),
        )
    }

    /// Drop a column by name if present.
    pub fn without_column(mut self, name: &str) -> Dataset {
        self.columns.retain(|c| c.name != name);
        self
    }

    /// Header row followed by every data row, as display text.
    pub fn to_text_grid(&self) -> Vec<Vec<String>> {
        let mut out = Vec::with_capacity(self.rows + 1);
        out.push(self.column_names());
        for i in 0..self.rows {
            out.push(self.row(i).into_iter().map(|v| v.to_string()).collect());
        }
        out
    }
}

fn header_text(raw: &str, kind: CellKind) -> String {
    match kind {
        CellKind::Number => Value::infer(raw).to_string(),
        _ => s!(raw),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inference() {
        assert_eq!(Value::infer("1"), Value::Number(1.0));
        assert_eq!(Value::infer("-2.5"), Value::Number(-2.5));
        assert_eq!(Value::infer("Login"), Value::Text(s!("Login")));
        assert_eq!(Value::infer("inf"), Value::Text(s!("inf")));
        assert_eq!(Value::infer("NaN"), Value::Text(s!("NaN")));
        assert_eq!(Value::infer("  "), Value::Empty);
    }

    #[test]
    fn display_drops_integral_fraction() {
        assert_eq!(Value::Number(1.0).to_string(), "1");
        assert_eq!(Value::Number(0.25).to_string(), "0.25");
        assert_eq!(Value::Empty.to_string(), "");
    }

    #[test]
    fn new_pads_short_columns() {
        let ds = Dataset::new(vec![
            Column { name: s!("a"), values: vec![Value::Number(1.0), Value::Number(2.0)] },
            Column { name: s!("b"), values: vec![Value::Empty] },
        ]);
        assert_eq!(ds.shape(), (2, 2));
        assert_eq!(ds.row(1), vec![&Value::Number(2.0), &Value::Empty]);
    }

    #[test]
    fn missing_column_lists_available() {
        let ds = Dataset::new(vec![Column { name: s!("x"), values: vec![] }]);
        let err = ds.require_columns(&["x", "Failed"]).unwrap_err();
        assert_eq!(err.to_string(), "Column 'Failed' not found (available: x)");
    }
}
