use std::fmt;

/// Result type for proctwin-engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the engine layer
#[derive(Debug)]
pub enum Error {
    /// Input table failed validation (missing columns, ragged rows)
    Types(proctwin_types::Error),

    /// A report generator could not produce its text
    Report(String),
}

impl Error {
    /// True when the caller supplied a table without the required columns
    pub fn is_schema(&self) -> bool {
        matches!(self, Error::Types(proctwin_types::Error::Schema { .. }))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Types(err) => write!(f, "{}", err),
            Error::Report(msg) => write!(f, "Report generation failed: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Types(err) => Some(err),
            Error::Report(_) => None,
        }
    }
}

impl From<proctwin_types::Error> for Error {
    fn from(err: proctwin_types::Error) -> Self {
        Error::Types(err)
    }
}
