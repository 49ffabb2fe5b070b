use kgtk_io::format::LIST_SEPARATOR;
use kgtk_io::{Header, Row, RowSink, RowSource};

use crate::strategy::RunCounts;
use crate::{Buffered, CompactError, GroupAccumulator, GroupingStrategy, KeyColumns, Streaming};

/// How rows are brought into key-adjacent order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GroupingMode {
    /// The input is already grouped by key; keep one group in memory.
    Streaming,
    /// Load the input and group it in memory; output is sorted by key.
    #[default]
    Buffered,
}

impl GroupingMode {
    pub fn as_str(self) -> &'static str {
        match self {
            GroupingMode::Streaming => "streaming",
            GroupingMode::Buffered => "buffered",
        }
    }
}

#[derive(Clone, Debug)]
pub struct CompactOptions {
    /// Extra columns appended to the file's natural key.
    pub key_column_names: Vec<String>,
    pub mode: GroupingMode,
    /// Joins key cells into a group key and values into a merged cell.
    pub field_separator: String,
    /// Streaming mode only: fail when a closed key reappears.
    pub verify_grouping: bool,
}

impl Default for CompactOptions {
    fn default() -> Self {
        Self {
            key_column_names: Vec::new(),
            mode: GroupingMode::default(),
            field_separator: LIST_SEPARATOR.to_string(),
            verify_grouping: false,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CompactStats {
    pub rows_read: u64,
    pub rows_written: u64,
    /// Output rows that were merged from two or more input rows.
    pub groups_merged: u64,
}

/// A configured compaction run over one input schema.
///
/// Construction resolves the key columns, so configuration errors surface
/// before any output is produced.
#[derive(Debug)]
pub struct Compactor {
    options: CompactOptions,
    key_columns: KeyColumns,
    row_len: usize,
}

impl Compactor {
    pub fn new(header: &Header, options: CompactOptions) -> Result<Self, CompactError> {
        let key_columns = KeyColumns::resolve(header, &options.key_column_names)?;
        log::info!(
            "key columns: {}",
            key_columns
                .indices()
                .iter()
                .map(|&i| header.names()[i].as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );
        Ok(Self {
            options,
            key_columns,
            row_len: header.len(),
        })
    }

    /// Compact `source` into `sink`.
    ///
    /// Every row must have as many cells as the header this compactor was built
    /// from, whatever the source.
    pub fn run<S, W>(&self, source: S, sink: &mut W) -> Result<CompactStats, CompactError>
    where
        S: RowSource,
        W: RowSink + ?Sized,
    {
        let separator = self.options.field_separator.as_str();
        let mut row_number = 0u64;
        let keyed = source.map(|row| -> Result<(String, Row), CompactError> {
            let row = row?;
            row_number += 1;
            if row.len() != self.row_len {
                return Err(CompactError::RowLength {
                    row: row_number,
                    expected: self.row_len,
                    actual: row.len(),
                });
            }
            Ok((self.key_columns.build_key(&row, separator), row))
        });

        let mut accumulator = GroupAccumulator::new(separator);
        log::info!("grouping mode: {}", self.options.mode.as_str());
        let counts = match self.options.mode {
            GroupingMode::Streaming => Streaming::new()
                .verify_grouping(self.options.verify_grouping)
                .run(keyed, &mut accumulator, sink)?,
            GroupingMode::Buffered => Buffered::new().run(keyed, &mut accumulator, sink)?,
        };
        sink.flush()?;

        let RunCounts {
            rows_read,
            rows_written,
        } = counts;
        let stats = CompactStats {
            rows_read,
            rows_written,
            groups_merged: accumulator.groups_merged(),
        };
        log::info!(
            "read {} rows, wrote {} rows ({} merged groups)",
            stats.rows_read,
            stats.rows_written,
            stats.groups_merged
        );
        Ok(stats)
    }
}

/// Resolve keys against `source`'s header and compact it into `sink`.
pub fn compact<S, W>(
    source: S,
    sink: &mut W,
    options: CompactOptions,
) -> Result<CompactStats, CompactError>
where
    S: RowSource,
    W: RowSink + ?Sized,
{
    let compactor = Compactor::new(source.header(), options)?;
    compactor.run(source, sink)
}
