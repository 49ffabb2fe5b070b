use std::collections::{HashMap, HashSet};

use kgtk_io::{Row, RowSink};

use crate::{CompactError, GroupAccumulator};

/// Counts produced by one strategy run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunCounts {
    pub rows_read: u64,
    pub rows_written: u64,
}

/// Feeds keyed rows to a [`GroupAccumulator`] so that rows sharing a key arrive
/// adjacently, then flushes exactly once.
pub trait GroupingStrategy {
    fn name(&self) -> &'static str;

    fn run<I, W>(
        &mut self,
        rows: I,
        accumulator: &mut GroupAccumulator,
        sink: &mut W,
    ) -> Result<RunCounts, CompactError>
    where
        I: Iterator<Item = Result<(String, Row), CompactError>>,
        W: RowSink + ?Sized;
}

fn emit<W: RowSink + ?Sized>(
    sink: &mut W,
    row: Option<Row>,
    counts: &mut RunCounts,
) -> Result<(), CompactError> {
    if let Some(row) = row {
        sink.write_row(&row)?;
        counts.rows_written += 1;
    }
    Ok(())
}

/// Passes rows through in input order.
///
/// The input must already be grouped by key (not necessarily sorted). Without
/// [`verify_grouping`](Self::verify_grouping), a key that reappears after its
/// group closed is emitted again as a separate row.
#[derive(Debug, Default)]
pub struct Streaming {
    verify_grouping: bool,
    closed: HashSet<String>,
}

impl Streaming {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remember every closed key and fail with [`CompactError::KeyNotGrouped`]
    /// when one reappears. This costs memory proportional to the number of keys.
    pub fn verify_grouping(mut self, verify: bool) -> Self {
        self.verify_grouping = verify;
        self
    }

    fn check_grouping(&mut self, key: &str, open: Option<&str>) -> Result<(), CompactError> {
        if let Some(open) = open {
            if open != key {
                self.closed.insert(open.to_owned());
            }
        }
        if self.closed.contains(key) {
            return Err(CompactError::KeyNotGrouped {
                key: key.to_owned(),
            });
        }
        Ok(())
    }
}

impl GroupingStrategy for Streaming {
    fn name(&self) -> &'static str {
        "streaming"
    }

    fn run<I, W>(
        &mut self,
        rows: I,
        accumulator: &mut GroupAccumulator,
        sink: &mut W,
    ) -> Result<RunCounts, CompactError>
    where
        I: Iterator<Item = Result<(String, Row), CompactError>>,
        W: RowSink + ?Sized,
    {
        let mut counts = RunCounts::default();
        for item in rows {
            let (key, row) = item?;
            counts.rows_read += 1;
            if self.verify_grouping {
                self.check_grouping(&key, accumulator.current_key())?;
            }
            emit(sink, accumulator.push(&key, row), &mut counts)?;
        }
        emit(sink, accumulator.flush(), &mut counts)?;
        Ok(counts)
    }
}

/// Loads every row, then replays them grouped by key in ascending key order.
///
/// Rows that share a key keep their arrival order. Nothing is written until the
/// input is exhausted.
#[derive(Debug, Default)]
pub struct Buffered;

impl Buffered {
    pub fn new() -> Self {
        Self
    }
}

impl GroupingStrategy for Buffered {
    fn name(&self) -> &'static str {
        "buffered"
    }

    fn run<I, W>(
        &mut self,
        rows: I,
        accumulator: &mut GroupAccumulator,
        sink: &mut W,
    ) -> Result<RunCounts, CompactError>
    where
        I: Iterator<Item = Result<(String, Row), CompactError>>,
        W: RowSink + ?Sized,
    {
        let mut counts = RunCounts::default();
        let mut staged: HashMap<String, Vec<Row>> = HashMap::new();
        for item in rows {
            let (key, row) = item?;
            counts.rows_read += 1;
            staged.entry(key).or_default().push(row);
        }
        log::debug!(
            "staged {} rows under {} distinct keys",
            counts.rows_read,
            staged.len()
        );

        let mut groups: Vec<(String, Vec<Row>)> = staged.into_iter().collect();
        groups.sort_unstable_by(|a, b| a.0.cmp(&b.0));

        for (key, rows) in groups {
            for row in rows {
                emit(sink, accumulator.push(&key, row), &mut counts)?;
            }
        }
        emit(sink, accumulator.flush(), &mut counts)?;
        Ok(counts)
    }
}
