use thiserror::Error;

// ---------------------------------------------------------------------------
// Domain errors
// ---------------------------------------------------------------------------

/// Failures raised by the data layer.
///
/// Loader entry points wrap these in `anyhow` with file context; use
/// `err.downcast_ref::<DataError>()` to recover the kind.
#[derive(Debug, Error)]
pub enum DataError {
    /// A cell could not be parsed into its column type.
    #[error("row {row}: column '{column}' has invalid value '{value}' ({reason})")]
    Parse {
        row: usize,
        column: &'static str,
        value: String,
        reason: &'static str,
    },

    /// A required column is absent from the header / schema.
    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),

    /// The table has no record with Rank == 1.
    #[error("no character holds rank 1 in this table")]
    NoTopRank,
}

impl DataError {
    /// Whether this error belongs to the load-time (parse) class.
    pub fn is_parse(&self) -> bool {
        matches!(self, DataError::Parse { .. } | DataError::MissingColumn(_))
    }
}
