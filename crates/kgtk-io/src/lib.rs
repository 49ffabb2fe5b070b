//! Row-level I/O for KGTK tab-separated files.
//!
//! This crate owns the tokenizing/serializing side of the toolkit:
//! - [`TsvReader`] parses the header, classifies the file as an edge file
//!   (`node1`/`label`/`node2`), a node file (`id`) or a plain table, and yields
//!   schema-consistent rows.
//! - [`TsvWriter`] serializes rows back out, optionally mapping an input layout
//!   onto a wider output schema.
//!
//! Processing crates consume rows through the [`RowSource`] and [`RowSink`]
//! traits so they can be driven from in-memory fixtures as easily as from files.

#![forbid(unsafe_code)]

mod error;
pub mod format;
mod header;
mod memory;
mod reader;
mod writer;

pub use crate::error::KgtkIoError;
pub use crate::format::{FileKind, FileMode};
pub use crate::header::Header;
pub use crate::memory::{MemorySink, MemorySource};
pub use crate::reader::{ReaderOptions, TsvReader};
pub use crate::writer::TsvWriter;

/// One record: a fixed-length sequence of string cells aligned with a [`Header`].
pub type Row = Vec<String>;

/// A finite, pull-based stream of rows that share one [`Header`].
///
/// Implementations must only yield rows whose length equals `header().len()`;
/// a row of the wrong arity is reported as [`KgtkIoError::RowLength`].
pub trait RowSource: Iterator<Item = Result<Row, KgtkIoError>> {
    fn header(&self) -> &Header;
}

/// Destination for fixed-arity rows.
pub trait RowSink {
    fn write_row(&mut self, row: &[String]) -> Result<(), KgtkIoError>;

    fn flush(&mut self) -> Result<(), KgtkIoError>;

    /// Number of data rows accepted so far (the header is not counted).
    fn rows_written(&self) -> u64;
}

impl<T: RowSink + ?Sized> RowSink for &mut T {
    fn write_row(&mut self, row: &[String]) -> Result<(), KgtkIoError> {
        (**self).write_row(row)
    }

    fn flush(&mut self) -> Result<(), KgtkIoError> {
        (**self).flush()
    }

    fn rows_written(&self) -> u64 {
        (**self).rows_written()
    }
}
