//! In-memory [`RowSource`] / [`RowSink`] implementations.

use crate::{Header, KgtkIoError, Row, RowSink, RowSource};

/// Yields a fixed list of rows, enforcing the header's arity like [`crate::TsvReader`].
///
/// Row numbers in [`KgtkIoError::RowLength`] count the header as line 1.
#[derive(Debug)]
pub struct MemorySource {
    header: Header,
    rows: std::vec::IntoIter<Row>,
    line: u64,
}

impl MemorySource {
    pub fn new(header: Header, rows: Vec<Row>) -> Self {
        Self {
            header,
            rows: rows.into_iter(),
            line: 1,
        }
    }
}

impl Iterator for MemorySource {
    type Item = Result<Row, KgtkIoError>;

    fn next(&mut self) -> Option<Self::Item> {
        let row = self.rows.next()?;
        self.line += 1;
        if row.len() != self.header.len() {
            return Some(Err(KgtkIoError::RowLength {
                line: self.line,
                expected: self.header.len(),
                actual: row.len(),
            }));
        }
        Some(Ok(row))
    }
}

impl RowSource for MemorySource {
    fn header(&self) -> &Header {
        &self.header
    }
}

/// Collects written rows.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub rows: Vec<Row>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }
}

impl RowSink for MemorySink {
    fn write_row(&mut self, row: &[String]) -> Result<(), KgtkIoError> {
        self.rows.push(row.to_vec());
        Ok(())
    }

    fn flush(&mut self) -> Result<(), KgtkIoError> {
        Ok(())
    }

    fn rows_written(&self) -> u64 {
        self.rows.len() as u64
    }
}
