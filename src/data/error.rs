use thiserror::Error;

/// Schema and value problems found while typing a loaded table.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("file has no header row")]
    EmptyHeader,

    #[error("missing required column '{column}' (or '{alias}')")]
    MissingColumn {
        column: &'static str,
        alias: &'static str,
    },

    #[error("row {row}: year '{value}' is not a whole number")]
    InvalidYear { row: usize, value: String },

    #[error("row {row}: population '{value}' is not a non-negative number")]
    InvalidPopulation { row: usize, value: String },
}
