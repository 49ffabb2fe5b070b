use std::io::{BufWriter, Write};

use crate::format::COLUMN_SEPARATOR;
use crate::{KgtkIoError, RowSink};

/// Writer for KGTK tab-separated output.
///
/// The header is written on construction. Cells are written verbatim (KGTK has
/// no quoting), tab-separated, one row per line.
pub struct TsvWriter<W: Write> {
    out: BufWriter<W>,
    /// For each output column, the input column that feeds it (`None` = fill
    /// with an empty cell). Absent when input and output layouts are identical.
    layout: Option<Vec<Option<usize>>>,
    input_len: usize,
    rows_written: u64,
}

impl<W: Write> TsvWriter<W> {
    pub fn new(out: W, columns: Vec<String>) -> Result<Self, KgtkIoError> {
        let input_len = columns.len();
        Self::build(out, columns, None, input_len)
    }

    /// Create a writer whose rows arrive in `input_columns` order and are laid
    /// out in `output_columns` order.
    ///
    /// Output columns that the input lacks are filled with empty cells. An input
    /// column that has no place in the output is rejected.
    pub fn with_input_columns(
        out: W,
        output_columns: Vec<String>,
        input_columns: &[String],
    ) -> Result<Self, KgtkIoError> {
        if let Some(extra) = input_columns.iter().find(|c| !output_columns.contains(c)) {
            return Err(KgtkIoError::ExtraColumn {
                name: extra.clone(),
            });
        }
        let layout: Vec<Option<usize>> = output_columns
            .iter()
            .map(|name| input_columns.iter().position(|c| c == name))
            .collect();
        let identity = input_columns.len() == output_columns.len()
            && layout.iter().enumerate().all(|(i, slot)| *slot == Some(i));
        let layout = if identity { None } else { Some(layout) };
        Self::build(out, output_columns, layout, input_columns.len())
    }

    fn build(
        out: W,
        columns: Vec<String>,
        layout: Option<Vec<Option<usize>>>,
        input_len: usize,
    ) -> Result<Self, KgtkIoError> {
        let mut out = BufWriter::new(out);
        write_line(&mut out, columns.iter().map(String::as_str))?;
        Ok(Self {
            out,
            layout,
            input_len,
            rows_written: 0,
        })
    }

    /// Flush buffered output and return the underlying writer.
    pub fn finish(self) -> Result<W, KgtkIoError> {
        self.out
            .into_inner()
            .map_err(|err| KgtkIoError::Io(err.into_error()))
    }
}

fn write_line<'a, W: Write>(
    out: &mut W,
    cells: impl Iterator<Item = &'a str>,
) -> Result<(), KgtkIoError> {
    for (i, cell) in cells.enumerate() {
        if i > 0 {
            out.write_all(&[COLUMN_SEPARATOR])?;
        }
        out.write_all(cell.as_bytes())?;
    }
    out.write_all(b"\n")?;
    Ok(())
}

impl<W: Write> RowSink for TsvWriter<W> {
    fn write_row(&mut self, row: &[String]) -> Result<(), KgtkIoError> {
        if row.len() != self.input_len {
            return Err(KgtkIoError::RowArity {
                expected: self.input_len,
                actual: row.len(),
            });
        }
        match &self.layout {
            None => write_line(&mut self.out, row.iter().map(String::as_str))?,
            Some(layout) => write_line(
                &mut self.out,
                layout.iter().map(|slot| match slot {
                    Some(idx) => row[*idx].as_str(),
                    None => "",
                }),
            )?,
        }
        self.rows_written += 1;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), KgtkIoError> {
        self.out.flush()?;
        Ok(())
    }

    fn rows_written(&self) -> u64 {
        self.rows_written
    }
}
