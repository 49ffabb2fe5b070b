//! KGTK file-format constants and header classification.

use std::collections::HashMap;
use std::fmt;

use crate::KgtkIoError;

/// Joins multiple values within one cell.
pub const LIST_SEPARATOR: char = '|';

pub const COLUMN_SEPARATOR: u8 = b'\t';

/// Lines starting with this byte are comments.
pub const COMMENT_CHAR: u8 = b'#';

pub const NODE1_COLUMN_NAMES: &[&str] = &["node1", "from", "subject"];
pub const LABEL_COLUMN_NAMES: &[&str] = &["label", "predicate", "relation", "relationship"];
pub const NODE2_COLUMN_NAMES: &[&str] = &["node2", "to", "object"];
pub const ID_COLUMN_NAMES: &[&str] = &["id", "ID"];

/// How the reader should interpret the header.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FileMode {
    /// Edge file if all three edge columns are present, otherwise node file if
    /// an id column is present, otherwise a plain table.
    #[default]
    Auto,
    /// Require `node1`, `label` and `node2`.
    Edge,
    /// Require `id`.
    Node,
    /// Never look for key columns.
    None,
}

impl FileMode {
    pub fn as_str(self) -> &'static str {
        match self {
            FileMode::Auto => "auto",
            FileMode::Edge => "edge",
            FileMode::Node => "node",
            FileMode::None => "none",
        }
    }
}

impl fmt::Display for FileMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The key-bearing columns discovered in a header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FileKind {
    Edge {
        node1: usize,
        label: usize,
        node2: usize,
    },
    Node {
        id: usize,
    },
    Plain,
}

impl FileKind {
    /// The natural key of the file: `[node1, label, node2]` for edges, `[id]` for
    /// nodes, nothing for plain tables.
    pub fn key_columns(self) -> Vec<usize> {
        match self {
            FileKind::Edge { node1, label, node2 } => vec![node1, label, node2],
            FileKind::Node { id } => vec![id],
            FileKind::Plain => Vec::new(),
        }
    }
}

fn find_column(index: &HashMap<String, usize>, aliases: &[&str]) -> Option<usize> {
    aliases.iter().find_map(|alias| index.get(*alias).copied())
}

fn require_column(
    index: &HashMap<String, usize>,
    aliases: &[&str],
    kind: &'static str,
    role: &'static str,
) -> Result<usize, KgtkIoError> {
    find_column(index, aliases).ok_or_else(|| KgtkIoError::MissingColumn {
        kind,
        role,
        expected: aliases.join(", "),
    })
}

/// Classify a header given its column-name index.
pub fn classify(index: &HashMap<String, usize>, mode: FileMode) -> Result<FileKind, KgtkIoError> {
    match mode {
        FileMode::None => Ok(FileKind::Plain),
        FileMode::Edge => Ok(FileKind::Edge {
            node1: require_column(index, NODE1_COLUMN_NAMES, "edge", "node1")?,
            label: require_column(index, LABEL_COLUMN_NAMES, "edge", "label")?,
            node2: require_column(index, NODE2_COLUMN_NAMES, "edge", "node2")?,
        }),
        FileMode::Node => Ok(FileKind::Node {
            id: require_column(index, ID_COLUMN_NAMES, "node", "id")?,
        }),
        FileMode::Auto => {
            let edge = (
                find_column(index, NODE1_COLUMN_NAMES),
                find_column(index, LABEL_COLUMN_NAMES),
                find_column(index, NODE2_COLUMN_NAMES),
            );
            if let (Some(node1), Some(label), Some(node2)) = edge {
                return Ok(FileKind::Edge { node1, label, node2 });
            }
            Ok(match find_column(index, ID_COLUMN_NAMES) {
                Some(id) => FileKind::Node { id },
                None => FileKind::Plain,
            })
        }
    }
}
