use std::fmt;

/// Result type for proctwin-types operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the types layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Required columns are absent from the input table.
    ///
    /// Each entry names the missing column, or the mapping role that pointed
    /// at a column the table does not have (e.g. `case_col='Order'`).
    Schema { missing: Vec<String> },

    /// A row does not have one cell per column
    RowWidth {
        row: usize,
        expected: usize,
        found: usize,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Schema { missing } => {
                write!(f, "Schema error: missing required columns: {}", missing.join(", "))
            }
            Error::RowWidth {
                row,
                expected,
                found,
            } => write!(
                f,
                "Row {} has {} cells, expected {}",
                row, found, expected
            ),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_error_lists_every_missing_column() {
        let err = Error::Schema {
            missing: vec!["case_id".to_string(), "step".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "Schema error: missing required columns: case_id, step"
        );
    }
}
