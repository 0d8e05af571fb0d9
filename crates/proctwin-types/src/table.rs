use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Column holding the case identifier
pub const CASE_ID_COLUMN: &str = "case_id";
/// Column holding the step label
pub const STEP_COLUMN: &str = "step";
/// Optional column holding the event time
pub const TIMESTAMP_COLUMN: &str = "timestamp";

const CANONICAL_COLUMNS: [&str; 3] = [CASE_ID_COLUMN, STEP_COLUMN, TIMESTAMP_COLUMN];

/// Raw tabular input: named columns and rows of string cells.
///
/// Empty (or whitespace-only) cells are treated as null.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row. The row must have exactly one cell per column.
    pub fn push_row<I, S>(&mut self, cells: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let row: Vec<String> = cells.into_iter().map(Into::into).collect();
        if row.len() != self.columns.len() {
            return Err(Error::RowWidth {
                row: self.rows.len(),
                expected: self.columns.len(),
                found: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Cell value at (row, column), `None` when the cell is blank
    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .map(|c| c.trim())
            .filter(|c| !c.is_empty())
    }

    /// Indices of the named columns, or a schema error listing every missing one
    pub fn require_columns<const N: usize>(&self, names: [&str; N]) -> Result<[usize; N]> {
        let mut found = [0usize; N];
        let mut missing = Vec::new();
        for (slot, name) in found.iter_mut().zip(names) {
            match self.column_index(name) {
                Some(idx) => *slot = idx,
                None => missing.push(name.to_string()),
            }
        }

        if missing.is_empty() {
            Ok(found)
        } else {
            Err(Error::Schema { missing })
        }
    }

    /// Return a copy with source columns renamed to the canonical names.
    ///
    /// Canonical columns only come from the mapping: an existing column that
    /// already carries a canonical name but is not a mapping source is dropped.
    /// So a `timestamp` column disappears when the mapping has no (existing)
    /// timestamp source.
    pub fn with_mapping(&self, mapping: &ColumnMapping) -> Result<Table> {
        let mut missing = Vec::new();
        for (source, role) in [(&mapping.case, "case_col"), (&mapping.step, "step_col")] {
            if !self.has_column(source) {
                missing.push(format!("{}='{}'", role, source));
            }
        }
        if !missing.is_empty() {
            return Err(Error::Schema { missing });
        }

        let mut renames: Vec<(&str, &str)> = vec![
            (mapping.case.as_str(), CASE_ID_COLUMN),
            (mapping.step.as_str(), STEP_COLUMN),
        ];
        // A timestamp source that isn't in the table is ignored
        if let Some(ts) = mapping.timestamp.as_deref()
            && self.has_column(ts)
        {
            renames.push((ts, TIMESTAMP_COLUMN));
        }

        let mut keep = Vec::with_capacity(self.columns.len());
        let mut columns = Vec::with_capacity(self.columns.len());
        for (idx, name) in self.columns.iter().enumerate() {
            match renames.iter().find(|(source, _)| *source == name) {
                Some((_, target)) => {
                    keep.push(idx);
                    columns.push(target.to_string());
                }
                None if CANONICAL_COLUMNS.contains(&name.as_str()) => {}
                None => {
                    keep.push(idx);
                    columns.push(name.clone());
                }
            }
        }

        let rows = self
            .rows
            .iter()
            .map(|row| keep.iter().map(|&idx| row[idx].clone()).collect())
            .collect();

        Ok(Table { columns, rows })
    }
}

/// Source column names for the canonical `case_id`, `step` and `timestamp` roles
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMapping {
    pub case: String,
    pub step: String,
    #[serde(default)]
    pub timestamp: Option<String>,
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            case: CASE_ID_COLUMN.to_string(),
            step: STEP_COLUMN.to_string(),
            timestamp: Some(TIMESTAMP_COLUMN.to_string()),
        }
    }
}
