use thiserror::Error;

#[derive(Debug, Error)]
pub enum KgtkIoError {
    #[error("input was empty: no header line found")]
    EmptyInput,
    #[error("header column {index} has a blank name")]
    BlankColumnName { index: usize },
    #[error("duplicate column name '{name}' (columns {first} and {second})")]
    DuplicateColumn {
        name: String,
        first: usize,
        second: usize,
    },
    #[error("{kind} file is missing its {role} column (expected one of: {expected})")]
    MissingColumn {
        kind: &'static str,
        role: &'static str,
        expected: String,
    },
    #[error("line {line}: expected {expected} columns, found {actual}")]
    RowLength {
        line: u64,
        expected: usize,
        actual: usize,
    },
    #[error("line {line}, column {column}: invalid UTF-8")]
    Utf8 { line: u64, column: usize },
    #[error("input column '{name}' is not one of the output columns")]
    ExtraColumn { name: String },
    #[error("row has {actual} cells but the writer expects {expected}")]
    RowArity { expected: usize, actual: usize },
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
