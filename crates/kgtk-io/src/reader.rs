use std::io::Read;

use csv::ByteRecord;

use crate::format::{FileMode, COLUMN_SEPARATOR, COMMENT_CHAR};
use crate::{Header, KgtkIoError, Row, RowSource};

#[derive(Clone, Debug, Default)]
pub struct ReaderOptions {
    pub mode: FileMode,
}

/// Streaming reader for KGTK tab-separated input.
///
/// Fields are split on tabs only (no quoting). Blank lines and `#` comment lines
/// are skipped. Every data row must have exactly as many fields as the header.
pub struct TsvReader<R> {
    inner: csv::Reader<R>,
    header: Header,
    record: ByteRecord,
    rows_read: u64,
    done: bool,
}

impl<R: Read> TsvReader<R> {
    pub fn new(reader: R, options: &ReaderOptions) -> Result<Self, KgtkIoError> {
        let mut inner = csv::ReaderBuilder::new()
            .delimiter(COLUMN_SEPARATOR)
            .comment(Some(COMMENT_CHAR))
            .quoting(false)
            // Headers are parsed by hand so we can classify them.
            .has_headers(false)
            // Row length is checked per record to report the offending line.
            .flexible(true)
            .from_reader(reader);

        let mut record = ByteRecord::new();
        if !inner.read_byte_record(&mut record)? {
            return Err(KgtkIoError::EmptyInput);
        }
        let names = decode_record(&record)?;
        let header = Header::new(names, options.mode)?;
        log::debug!(
            "read header with {} columns ({:?})",
            header.len(),
            header.kind()
        );

        Ok(Self {
            inner,
            header,
            record,
            rows_read: 0,
            done: false,
        })
    }

    /// Number of data rows yielded so far.
    pub fn rows_read(&self) -> u64 {
        self.rows_read
    }

    fn decode_current(&self) -> Result<Row, KgtkIoError> {
        let expected = self.header.len();
        if self.record.len() != expected {
            return Err(KgtkIoError::RowLength {
                line: record_line(&self.record),
                expected,
                actual: self.record.len(),
            });
        }
        decode_record(&self.record)
    }
}

fn record_line(record: &ByteRecord) -> u64 {
    record.position().map(|p| p.line()).unwrap_or(0)
}

fn decode_record(record: &ByteRecord) -> Result<Row, KgtkIoError> {
    record
        .iter()
        .enumerate()
        .map(|(i, raw)| {
            std::str::from_utf8(raw)
                .map(str::to_owned)
                .map_err(|_| KgtkIoError::Utf8 {
                    line: record_line(record),
                    column: i + 1,
                })
        })
        .collect()
}

impl<R: Read> Iterator for TsvReader<R> {
    type Item = Result<Row, KgtkIoError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let result = match self.inner.read_byte_record(&mut self.record) {
            Ok(false) => {
                self.done = true;
                return None;
            }
            Ok(true) => self.decode_current(),
            Err(err) => Err(err.into()),
        };
        match &result {
            Ok(_) => self.rows_read += 1,
            // A malformed row ends the stream; callers treat it as fatal.
            Err(_) => self.done = true,
        }
        Some(result)
    }
}

impl<R: Read> RowSource for TsvReader<R> {
    fn header(&self) -> &Header {
        &self.header
    }
}
