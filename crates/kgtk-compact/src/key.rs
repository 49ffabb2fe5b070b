use kgtk_io::Header;

use crate::CompactError;

/// Ordered column indices whose values form a row's group key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyColumns {
    indices: Vec<usize>,
}

impl KeyColumns {
    /// Start from the file's natural key (edge triple or node id) and append the
    /// named columns in order, skipping any already present.
    pub fn resolve(header: &Header, extra_names: &[String]) -> Result<Self, CompactError> {
        let mut indices = header.kind().key_columns();
        for name in extra_names {
            let Some(idx) = header.column_index(name) else {
                return Err(CompactError::UnknownKeyColumn { name: name.clone() });
            };
            if !indices.contains(&idx) {
                indices.push(idx);
            }
        }
        Self::from_indices(indices)
    }

    fn from_indices(indices: Vec<usize>) -> Result<Self, CompactError> {
        if indices.is_empty() {
            return Err(CompactError::NoKeyColumns);
        }
        Ok(Self { indices })
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Join the key cells of `row` with `separator`.
    ///
    /// Cells are not escaped: a value containing the separator can collide with
    /// a different combination of values.
    pub fn build_key(&self, row: &[String], separator: &str) -> String {
        let len = self.indices.iter().map(|&i| row[i].len()).sum::<usize>()
            + separator.len() * (self.indices.len() - 1);
        let mut key = String::with_capacity(len);
        for (n, &idx) in self.indices.iter().enumerate() {
            if n > 0 {
                key.push_str(separator);
            }
            key.push_str(&row[idx]);
        }
        key
    }
}

#[cfg(test)]
mod tests {
    use kgtk_io::FileMode;

    use super::*;

    fn header(names: &[&str]) -> Header {
        Header::new(names.iter().map(|n| n.to_string()).collect(), FileMode::Auto).unwrap()
    }

    fn strings(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn edge_key_is_extended_without_duplicates() {
        let header = header(&["node2", "note", "node1", "label", "lang"]);
        let keys = KeyColumns::resolve(&header, &strings(&["lang", "node1", "lang"])).unwrap();
        assert_eq!(keys.indices(), &[2, 3, 0, 4]);
    }

    #[test]
    fn node_key_starts_with_id() {
        let header = header(&["name", "id"]);
        let keys = KeyColumns::resolve(&header, &[]).unwrap();
        assert_eq!(keys.indices(), &[1]);
    }

    #[test]
    fn unknown_column_is_a_configuration_error() {
        let header = header(&["node1", "label", "node2"]);
        let err = KeyColumns::resolve(&header, &strings(&["missing"])).unwrap_err();
        assert!(
            matches!(&err, CompactError::UnknownKeyColumn { name } if name == "missing"),
            "unexpected error: {err}"
        );
    }

    #[test]
    fn plain_table_without_extra_columns_has_no_key() {
        let header = header(&["a", "b"]);
        let err = KeyColumns::resolve(&header, &[]).unwrap_err();
        assert!(matches!(err, CompactError::NoKeyColumns), "unexpected error: {err}");

        let keys = KeyColumns::resolve(&header, &strings(&["b"])).unwrap();
        assert_eq!(keys.indices(), &[1]);
    }

    #[test]
    fn key_joins_cells_in_column_order() {
        let keys = KeyColumns::from_indices(vec![2, 0]).unwrap();
        let row = strings(&["A", "p", "X"]);
        assert_eq!(keys.build_key(&row, "|"), "X|A");
        assert_eq!(keys.build_key(&strings(&["", "p", ""]), "|"), "|");
    }
}
