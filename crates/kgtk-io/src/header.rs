use std::collections::HashMap;

use crate::format::{self, FileKind, FileMode};
use crate::KgtkIoError;

/// Column schema shared by every row of one file.
#[derive(Clone, Debug)]
pub struct Header {
    names: Vec<String>,
    index: HashMap<String, usize>,
    kind: FileKind,
}

impl Header {
    pub fn new(names: Vec<String>, mode: FileMode) -> Result<Self, KgtkIoError> {
        let mut index = HashMap::with_capacity(names.len());
        for (i, name) in names.iter().enumerate() {
            if name.is_empty() {
                return Err(KgtkIoError::BlankColumnName { index: i });
            }
            if let Some(first) = index.insert(name.clone(), i) {
                return Err(KgtkIoError::DuplicateColumn {
                    name: name.clone(),
                    first,
                    second: i,
                });
            }
        }
        let kind = format::classify(&index, mode)?;
        Ok(Self { names, index, kind })
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn kind(&self) -> FileKind {
        self.kind
    }
}
