use kgtk_io::Row;

/// Merge state of the single open group.
#[derive(Debug, Default)]
enum GroupState {
    #[default]
    Empty,
    /// Exactly one row so far, kept verbatim.
    Seed { key: String, row: Row },
    /// Two or more rows: the distinct values seen in each column.
    Expanded {
        key: String,
        lists: Vec<Vec<String>>,
    },
}

/// Coalesces consecutive rows that share a key into one row.
///
/// Callers feed rows with [`push`](Self::push) in key-adjacent order and call
/// [`flush`](Self::flush) once the input is exhausted. A row is handed back each
/// time a group closes.
#[derive(Debug)]
pub struct GroupAccumulator {
    state: GroupState,
    separator: String,
    groups_merged: u64,
}

impl GroupAccumulator {
    /// `separator` joins the values of a merged cell.
    pub fn new(separator: impl Into<String>) -> Self {
        Self {
            state: GroupState::Empty,
            separator: separator.into(),
            groups_merged: 0,
        }
    }

    pub fn current_key(&self) -> Option<&str> {
        match &self.state {
            GroupState::Empty => None,
            GroupState::Seed { key, .. } | GroupState::Expanded { key, .. } => Some(key.as_str()),
        }
    }

    pub fn is_open(&self) -> bool {
        !matches!(self.state, GroupState::Empty)
    }

    /// Number of emitted groups that were built from more than one row.
    pub fn groups_merged(&self) -> u64 {
        self.groups_merged
    }

    /// Add `row` under `key`.
    ///
    /// When `key` differs from the open group's key, the open group is compacted
    /// and returned, and `row` seeds a new group.
    pub fn push(&mut self, key: &str, row: Row) -> Option<Row> {
        match std::mem::take(&mut self.state) {
            GroupState::Empty => {
                self.state = GroupState::Seed {
                    key: key.to_owned(),
                    row,
                };
                None
            }
            GroupState::Seed {
                key: current,
                row: seed,
            } if current == key => {
                let mut lists = expand(seed);
                merge(&mut lists, row);
                self.state = GroupState::Expanded {
                    key: current,
                    lists,
                };
                None
            }
            GroupState::Expanded {
                key: current,
                mut lists,
            } if current == key => {
                merge(&mut lists, row);
                self.state = GroupState::Expanded {
                    key: current,
                    lists,
                };
                None
            }
            closed => {
                self.state = GroupState::Seed {
                    key: key.to_owned(),
                    row,
                };
                self.compact(closed)
            }
        }
    }

    /// Compact and return the open group, if any. Calling it again is a no-op.
    pub fn flush(&mut self) -> Option<Row> {
        let closed = std::mem::take(&mut self.state);
        self.compact(closed)
    }

    fn compact(&mut self, state: GroupState) -> Option<Row> {
        match state {
            GroupState::Empty => None,
            GroupState::Seed { row, .. } => Some(row),
            GroupState::Expanded { lists, .. } => {
                self.groups_merged += 1;
                Some(
                    lists
                        .into_iter()
                        .map(|mut values| {
                            values.sort_unstable();
                            values.join(&self.separator)
                        })
                        .collect(),
                )
            }
        }
    }
}

fn expand(seed: Row) -> Vec<Vec<String>> {
    seed.into_iter().map(|value| vec![value]).collect()
}

fn merge(lists: &mut [Vec<String>], row: Row) {
    debug_assert_eq!(lists.len(), row.len(), "row length changed within a group");
    for (values, item) in lists.iter_mut().zip(row) {
        if item.is_empty() {
            continue;
        }
        if values.len() == 1 && values[0].is_empty() {
            values[0] = item;
            continue;
        }
        if values.contains(&item) {
            continue;
        }
        values.push(item);
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn row(cells: &[&str]) -> Row {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn singleton_group_is_returned_verbatim() {
        let mut acc = GroupAccumulator::new("|");
        // Unsorted list-looking text must survive untouched.
        assert_eq!(acc.push("C|r", row(&["C", "r", "W|A", ""])), None);
        assert_eq!(acc.flush(), Some(row(&["C", "r", "W|A", ""])));
        assert_eq!(acc.groups_merged(), 0);
    }

    #[test]
    fn duplicates_collapse_and_values_sort() {
        let mut acc = GroupAccumulator::new("|");
        assert_eq!(acc.push("A|p", row(&["A", "p", "X"])), None);
        assert_eq!(acc.push("A|p", row(&["A", "p", "Y"])), None);
        assert_eq!(acc.push("A|p", row(&["A", "p", "X"])), None);
        assert_eq!(acc.flush(), Some(row(&["A", "p", "X|Y"])));
        assert_eq!(acc.groups_merged(), 1);
    }

    #[test]
    fn empty_seed_cell_is_replaced() {
        let mut acc = GroupAccumulator::new("|");
        acc.push("B|q", row(&["B", "q", ""]));
        acc.push("B|q", row(&["B", "q", "Z"]));
        assert_eq!(acc.flush(), Some(row(&["B", "q", "Z"])));
    }

    #[test]
    fn empty_cells_never_contribute() {
        let mut acc = GroupAccumulator::new("|");
        acc.push("k", row(&["k", "b", ""]));
        acc.push("k", row(&["k", "", ""]));
        acc.push("k", row(&["k", "a", ""]));
        assert_eq!(acc.flush(), Some(row(&["k", "a|b", ""])));
    }

    #[test]
    fn key_change_emits_previous_group() {
        let mut acc = GroupAccumulator::new("|");
        assert_eq!(acc.push("a", row(&["a", "1"])), None);
        assert_eq!(acc.push("a", row(&["a", "2"])), None);
        assert_eq!(acc.push("b", row(&["b", "3"])), Some(row(&["a", "1|2"])));
        assert_eq!(acc.current_key(), Some("b"));
        assert_eq!(acc.push("c", row(&["c", "4"])), Some(row(&["b", "3"])));
        assert_eq!(acc.flush(), Some(row(&["c", "4"])));
    }

    #[test]
    fn second_flush_is_a_no_op() {
        let mut acc = GroupAccumulator::new("|");
        assert_eq!(acc.flush(), None);
        acc.push("a", row(&["a"]));
        assert!(acc.is_open());
        assert_eq!(acc.flush(), Some(row(&["a"])));
        assert!(!acc.is_open());
        assert_eq!(acc.flush(), None);
        assert_eq!(acc.current_key(), None);
    }

    #[test]
    fn merge_never_grows_a_list_with_a_known_value() {
        let mut lists = expand(row(&["x", ""]));
        merge(&mut lists, row(&["x", "y"]));
        merge(&mut lists, row(&["x", "y"]));
        assert_eq!(lists, vec![vec!["x".to_string()], vec!["y".to_string()]]);
    }

    #[test]
    fn custom_separator_joins_merged_cells() {
        let mut acc = GroupAccumulator::new(";");
        acc.push("k", row(&["k", "b"]));
        acc.push("k", row(&["k", "a"]));
        assert_eq!(acc.flush(), Some(row(&["k", "a;b"])));
    }
}
