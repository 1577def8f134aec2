use polars::prelude::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("{table} header invalid: {message}")]
    InvalidHeader {
        table: &'static str,
        message: String,
    },

    #[error("{table} CSV error: {source}")]
    Csv {
        table: &'static str,
        #[source]
        source: csv::Error,
    },

    #[error("{table} I/O error: {source}")]
    Io {
        table: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("{table} data row {line_index} invalid: {message}")]
    DataRow {
        table: &'static str,
        line_index: usize,
        message: String,
    },

    #[error("{table} did not contain any data rows")]
    EmptyData { table: &'static str },

    #[error("Polars operation failed: {0}")]
    Polars(#[from] PolarsError),
}

impl RecordError {
    pub(crate) fn csv(table: &'static str, source: csv::Error) -> Self {
        RecordError::Csv { table, source }
    }

    pub(crate) fn io(table: &'static str, source: std::io::Error) -> Self {
        RecordError::Io { table, source }
    }
}
