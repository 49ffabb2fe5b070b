//! Coalesce KGTK rows that share a key.
//!
//! Rows whose key columns (the edge triple, the node id, plus any extra
//! caller-chosen columns) are identical are merged into a single output row.
//! Each non-key cell of the merged row holds the sorted, deduplicated,
//! `|`-joined set of the non-empty values seen across the group.
//!
//! Two drivers feed rows to the [`GroupAccumulator`]:
//! - [`Streaming`] trusts that rows with the same key are already adjacent and
//!   keeps only the open group in memory.
//! - [`Buffered`] loads the whole input, then replays it grouped by key in
//!   ascending key order.

#![forbid(unsafe_code)]

pub mod cli;
mod compact;
mod error;
mod group;
mod key;
mod output;
mod strategy;

pub use crate::compact::{compact, CompactOptions, CompactStats, Compactor, GroupingMode};
pub use crate::error::CompactError;
pub use crate::group::GroupAccumulator;
pub use crate::key::KeyColumns;
pub use crate::strategy::{Buffered, GroupingStrategy, RunCounts, Streaming};
