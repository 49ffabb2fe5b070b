use kgtk_io::KgtkIoError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CompactError {
    #[error("key column '{name}' is not in the input file")]
    UnknownKeyColumn { name: String },
    #[error("no key columns: the input is neither an edge nor a node file and no key column names were given")]
    NoKeyColumns,
    #[error("key '{key}' reappeared after its group was closed; the input is not grouped by key")]
    KeyNotGrouped { key: String },
    #[error("data row {row} has {actual} cells, expected {expected}")]
    RowLength {
        row: u64,
        expected: usize,
        actual: usize,
    },
    #[error(transparent)]
    Io(#[from] KgtkIoError),
}
